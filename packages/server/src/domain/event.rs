//! Outbound events the core hands to the gateway.

use super::entity::{BannedUser, ChatMessage, FeatureRequest, User};

/// Denial reason sent when a banned identity tries to join
pub const REASON_BANNED_ON_JOIN: &str = "You are banned from this chat.";

/// Denial reason sent to a connection a moderator just banned
pub const REASON_BANNED_BY_MODERATOR: &str = "You have been banned by a moderator.";

/// Server to client event.
///
/// List events always carry the full collection, so re-delivery is harmless.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    ConnectionDenied { reason: String },
    BannedUsersList(Vec<BannedUser>),
    FeatureRequestsList(Vec<FeatureRequest>),
    UserList(Vec<User>),
    Message(ChatMessage),
    AdminMessage(ChatMessage),
}

impl OutboundEvent {
    pub fn connection_denied(reason: &str) -> Self {
        Self::ConnectionDenied {
            reason: reason.to_string(),
        }
    }

    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConnectionDenied { .. } => "connectionDenied",
            Self::BannedUsersList(_) => "bannedUsersList",
            Self::FeatureRequestsList(_) => "featureRequestsList",
            Self::UserList(_) => "userList",
            Self::Message(_) => "message",
            Self::AdminMessage(_) => "adminMessage",
        }
    }
}
