//! Core domain models for the chat relay.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::value_object::{ConnectionId, FeatureRequestId, FeatureText, Username};

/// A participant that completed `join` on a live connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Connection identifier assigned by the gateway
    pub id: ConnectionId,
    /// Display name supplied by the client
    pub username: Username,
    /// Moderator flag as asserted by the client at join time
    pub is_moderator: bool,
}

impl User {
    /// Create a new user
    pub fn new(id: ConnectionId, username: Username, is_moderator: bool) -> Self {
        Self {
            id,
            username,
            is_moderator,
        }
    }

    /// Take the snapshot that goes on the ban list
    pub fn snapshot(&self) -> BannedUser {
        BannedUser {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

/// Snapshot of a user at the moment of banning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannedUser {
    pub id: ConnectionId,
    pub username: Username,
}

/// A feature request submitted by a joined user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRequest {
    /// Client supplied identifier, used later for deletion
    pub id: FeatureRequestId,
    pub text: FeatureText,
    /// Attached from the Registry, never taken from the client payload
    pub username: Username,
}

impl FeatureRequest {
    /// Create a new feature request
    pub fn new(id: FeatureRequestId, text: FeatureText, username: Username) -> Self {
        Self { id, text, username }
    }
}

/// A chat (or admin) message exactly as the client sent it.
///
/// The payload is relayed verbatim. The `username` inside it is whatever the
/// client claimed and is not checked against the Registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatMessage(Value);

impl ChatMessage {
    /// Wrap a raw client payload
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    /// Claimed sender name, if the payload carries one
    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(Value::as_str)
    }

    /// Message body, if the payload carries one
    pub fn text(&self) -> Option<&str> {
        self.0.get("text").and_then(Value::as_str)
    }

    /// Borrow the raw payload
    pub fn payload(&self) -> &Value {
        &self.0
    }
}

/// Lifecycle of a single connection.
///
/// `Unjoined -> Joined -> (Disconnected | Banned)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Unjoined,
    Joined,
    Disconnected,
    Banned,
}

impl SessionState {
    /// Terminal states never transition again
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Disconnected | SessionState::Banned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: &str, name: &str, is_moderator: bool) -> User {
        User::new(
            ConnectionId::new(id.to_string()).unwrap(),
            Username::new(name.to_string()).unwrap(),
            is_moderator,
        )
    }

    #[test]
    fn test_user_snapshot_copies_identity() {
        // テスト項目: スナップショットは ID と表示名をコピーする
        // given (前提条件):
        let bob = user("conn-b", "bob", false);

        // when (操作):
        let banned = bob.snapshot();

        // then (期待する結果):
        assert_eq!(banned.id, bob.id);
        assert_eq!(banned.username, bob.username);
    }

    #[test]
    fn test_user_serializes_camel_case() {
        // テスト項目: User は isModerator を camelCase でシリアライズする
        let value = serde_json::to_value(user("conn-a", "alice", true)).unwrap();
        assert_eq!(
            value,
            json!({"id": "conn-a", "username": "alice", "isModerator": true})
        );
    }

    #[test]
    fn test_chat_message_keeps_payload_verbatim() {
        // テスト項目: メッセージは未知のフィールドも含めてそのまま保持される
        // given (前提条件):
        let payload = json!({"username": "mallory", "text": "hi", "color": "red"});

        // when (操作):
        let message = ChatMessage::new(payload.clone());

        // then (期待する結果):
        assert_eq!(message.username(), Some("mallory"));
        assert_eq!(message.text(), Some("hi"));
        assert_eq!(serde_json::to_value(&message).unwrap(), payload);
    }

    #[test]
    fn test_session_state_terminal() {
        // テスト項目: Disconnected と Banned のみが終端状態
        assert!(!SessionState::Unjoined.is_terminal());
        assert!(!SessionState::Joined.is_terminal());
        assert!(SessionState::Disconnected.is_terminal());
        assert!(SessionState::Banned.is_terminal());
    }
}
