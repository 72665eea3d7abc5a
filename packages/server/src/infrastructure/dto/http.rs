//! HTTP API response DTOs for the chat relay.

use serde::{Deserialize, Serialize};

use super::websocket::{BannedUserDto, FeatureRequestDto, UserDto};

/// Debug view of the Registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStateDto {
    pub users: Vec<UserDto>,
    pub banned_users: Vec<BannedUserDto>,
    pub feature_requests: Vec<FeatureRequestDto>,
    /// Live connections known to the gateway, joined or not
    pub connections: usize,
    pub generated_at: String, // ISO 8601
}
