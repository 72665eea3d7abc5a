//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

const MAX_ID_LENGTH: usize = 100;
const MAX_USERNAME_LENGTH: usize = 100;
const MAX_FEATURE_TEXT_LENGTH: usize = 10000;

/// Connection identifier value object.
///
/// Assigned by the gateway when a connection is accepted. Unique only for
/// the lifetime of that connection. A banned user's snapshot keeps it, and
/// a rejoining client presents it again as its prior identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Create a new ConnectionId.
    ///
    /// # Arguments
    ///
    /// * `id` - The connection identifier string
    ///
    /// # Returns
    ///
    /// A Result containing the ConnectionId or an error if validation fails
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        let len = id.chars().count();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::ConnectionIdTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConnectionId> for String {
    fn from(value: ConnectionId) -> Self {
        value.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name chosen by the client. Not unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a new Username.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.trim().is_empty() {
            return Err(ValueObjectError::UsernameEmpty);
        }
        let len = name.chars().count();
        if len > MAX_USERNAME_LENGTH {
            return Err(ValueObjectError::UsernameTooLong {
                max: MAX_USERNAME_LENGTH,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Feature request identifier value object.
///
/// Supplied by the client and treated as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureRequestId(String);

impl FeatureRequestId {
    /// Create a new FeatureRequestId.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::FeatureRequestIdEmpty);
        }
        let len = id.chars().count();
        if len > MAX_ID_LENGTH {
            return Err(ValueObjectError::FeatureRequestIdTooLong {
                max: MAX_ID_LENGTH,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FeatureRequestId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeatureRequestId> for String {
    fn from(value: FeatureRequestId) -> Self {
        value.0
    }
}

impl fmt::Display for FeatureRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of a feature request with validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureText(String);

impl FeatureText {
    /// Create a new FeatureText.
    ///
    /// # Arguments
    ///
    /// * `text` - The feature request body
    ///
    /// # Returns
    ///
    /// A Result containing the FeatureText or an error if validation fails
    pub fn new(text: String) -> Result<Self, ValueObjectError> {
        if text.trim().is_empty() {
            return Err(ValueObjectError::FeatureTextEmpty);
        }
        let len = text.chars().count();
        if len > MAX_FEATURE_TEXT_LENGTH {
            return Err(ValueObjectError::FeatureTextTooLong {
                max: MAX_FEATURE_TEXT_LENGTH,
                actual: len,
            });
        }
        Ok(Self(text))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FeatureText {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeatureText> for String {
    fn from(value: FeatureText) -> Self {
        value.0
    }
}

impl fmt::Display for FeatureText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_new_success() {
        // テスト項目: 有効な接続 ID を作成できる
        // given (前提条件):
        let id = "conn-1".to_string();

        // when (操作):
        let result = ConnectionId::new(id);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "conn-1");
    }

    #[test]
    fn test_connection_id_new_empty_fails() {
        // テスト項目: 空の接続 ID は作成できない
        // when (操作):
        let result = ConnectionId::new(String::new());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::ConnectionIdEmpty);
    }

    #[test]
    fn test_connection_id_new_too_long_fails() {
        // テスト項目: 101 文字以上の接続 ID は作成できない
        // given (前提条件):
        let id = "a".repeat(101);

        // when (操作):
        let result = ConnectionId::new(id);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::ConnectionIdTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_connection_id_deserialize_rejects_empty() {
        // テスト項目: デシリアライズ時にもバリデーションが適用される
        // when (操作):
        let ok: Result<ConnectionId, _> = serde_json::from_str("\"abc\"");
        let empty: Result<ConnectionId, _> = serde_json::from_str("\"\"");

        // then (期待する結果):
        assert_eq!(ok.unwrap().as_str(), "abc");
        assert!(empty.is_err());
    }

    #[test]
    fn test_username_whitespace_only_fails() {
        // テスト項目: 空白のみのユーザー名は作成できない
        // when (操作):
        let result = Username::new("   ".to_string());

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::UsernameEmpty);
    }

    #[test]
    fn test_username_allows_duplicates_by_value() {
        // テスト項目: 同じ表示名は値として等価（一意性は要求しない）
        let a = Username::new("alice".to_string()).unwrap();
        let b = Username::new("alice".to_string()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_feature_request_id_new_empty_fails() {
        // テスト項目: 空のリクエスト ID は作成できない
        let result = FeatureRequestId::new(String::new());
        assert_eq!(result.unwrap_err(), ValueObjectError::FeatureRequestIdEmpty);
    }

    #[test]
    fn test_feature_text_too_long_fails() {
        // テスト項目: 10001 文字以上の本文は作成できない
        // given (前提条件):
        let text = "a".repeat(10001);

        // when (操作):
        let result = FeatureText::new(text);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::FeatureTextTooLong {
                max: 10000,
                actual: 10001
            }
        );
    }
}
