//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod gateway;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{BannedUser, ChatMessage, FeatureRequest, SessionState, User};
pub use error::{RegistryError, ValueObjectError};
pub use event::{OutboundEvent, REASON_BANNED_BY_MODERATOR, REASON_BANNED_ON_JOIN};
pub use factory::ConnectionIdFactory;
pub use gateway::Gateway;
pub use registry::Registry;
pub use repository::RegistryRepository;
pub use value_object::{ConnectionId, FeatureRequestId, FeatureText, Username};
