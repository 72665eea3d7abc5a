//! WebSocket message DTOs for the chat relay.
//!
//! Every frame is a JSON text frame shaped as
//! `{"event": "<name>", "payload": <value>}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{BannedUser, FeatureRequest, OutboundEvent, User};

/// Client to server events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ClientEvent {
    Join(JoinPayload),
    /// Relayed verbatim, so kept as raw JSON
    Message(Value),
    /// Relayed verbatim, so kept as raw JSON
    AdminMessage(Value),
    FeatureRequest(FeatureRequestPayload),
    BanUser(TargetUserPayload),
    UnbanUser(TargetUserPayload),
    DeleteFeatureRequest(DeleteFeatureRequestPayload),
}

/// Identity announced by a client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    /// Prior connection identifier, tested against the ban list
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    #[serde(default)]
    pub is_moderator: bool,
}

/// Feature request submission. Any `username` field sent by the client is
/// dropped here; the server attaches its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureRequestPayload {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetUserPayload {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteFeatureRequestPayload {
    pub request_id: String,
}

/// Server to client events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum ServerEvent {
    ConnectionDenied(ConnectionDeniedPayload),
    BannedUsersList(Vec<BannedUserDto>),
    FeatureRequestsList(Vec<FeatureRequestDto>),
    UserList(Vec<UserDto>),
    Message(Value),
    AdminMessage(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDeniedPayload {
    pub reason: String,
}

/// Connected user as shown in `userList`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub is_moderator: bool,
}

/// Ban list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannedUserDto {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRequestDto {
    pub id: String,
    pub text: String,
    pub username: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            username: user.username.as_str().to_string(),
            is_moderator: user.is_moderator,
        }
    }
}

impl From<&BannedUser> for BannedUserDto {
    fn from(banned: &BannedUser) -> Self {
        Self {
            id: banned.id.as_str().to_string(),
            username: banned.username.as_str().to_string(),
        }
    }
}

impl From<&FeatureRequest> for FeatureRequestDto {
    fn from(request: &FeatureRequest) -> Self {
        Self {
            id: request.id.as_str().to_string(),
            text: request.text.as_str().to_string(),
            username: request.username.as_str().to_string(),
        }
    }
}

impl From<&OutboundEvent> for ServerEvent {
    fn from(event: &OutboundEvent) -> Self {
        match event {
            OutboundEvent::ConnectionDenied { reason } => {
                Self::ConnectionDenied(ConnectionDeniedPayload {
                    reason: reason.clone(),
                })
            }
            OutboundEvent::BannedUsersList(list) => {
                Self::BannedUsersList(list.iter().map(BannedUserDto::from).collect())
            }
            OutboundEvent::FeatureRequestsList(list) => {
                Self::FeatureRequestsList(list.iter().map(FeatureRequestDto::from).collect())
            }
            OutboundEvent::UserList(list) => {
                Self::UserList(list.iter().map(UserDto::from).collect())
            }
            OutboundEvent::Message(message) => Self::Message(message.payload().clone()),
            OutboundEvent::AdminMessage(message) => Self::AdminMessage(message.payload().clone()),
        }
    }
}

/// Serialize an outbound event into a text frame
pub fn encode(event: &OutboundEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&ServerEvent::from(event))
}
