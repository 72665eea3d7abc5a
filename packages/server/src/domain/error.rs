//! Domain layer error definitions.

use thiserror::Error;

use super::value_object::{ConnectionId, FeatureRequestId};

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// ConnectionId too long error
    #[error("ConnectionId cannot exceed {max} characters (got {actual})")]
    ConnectionIdTooLong { max: usize, actual: usize },

    #[error("Username cannot be empty")]
    UsernameEmpty,

    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("FeatureRequestId cannot be empty")]
    FeatureRequestIdEmpty,

    #[error("FeatureRequestId cannot exceed {max} characters (got {actual})")]
    FeatureRequestIdTooLong { max: usize, actual: usize },

    /// FeatureText validation error
    #[error("FeatureText cannot be empty")]
    FeatureTextEmpty,

    /// FeatureText too long error
    #[error("FeatureText cannot exceed {max} characters (got {actual})")]
    FeatureTextTooLong { max: usize, actual: usize },
}

/// Errors raised by the Registry aggregate when an invariant would break
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The identity presented at join time is on the ban list
    #[error("Identity '{0}' is banned")]
    Banned(ConnectionId),

    /// A user is already registered for this connection
    #[error("Connection '{0}' has already joined")]
    AlreadyJoined(ConnectionId),

    /// The connection already reached a terminal state (banned)
    #[error("Connection '{0}' is closed")]
    SessionClosed(ConnectionId),

    /// Feature request identifiers must be unique
    #[error("Feature request '{0}' already exists")]
    DuplicateFeatureRequest(FeatureRequestId),
}
