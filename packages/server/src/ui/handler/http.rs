//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use moderated_chat_shared::time::{get_jst_timestamp, timestamp_to_jst_rfc3339};

use crate::{
    domain::RegistryRepository,
    infrastructure::dto::{
        http::RegistryStateDto,
        websocket::{BannedUserDto, FeatureRequestDto, UserDto},
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint to get the current Registry contents
pub async fn registry_state(State(state): State<Arc<AppState>>) -> Json<RegistryStateDto> {
    let registry = state.repository.snapshot().await;

    Json(RegistryStateDto {
        users: registry.list_users().iter().map(UserDto::from).collect(),
        banned_users: registry.list_banned().iter().map(BannedUserDto::from).collect(),
        feature_requests: registry
            .list_feature_requests()
            .iter()
            .map(FeatureRequestDto::from)
            .collect(),
        connections: state.gateway.connection_count().await,
        generated_at: timestamp_to_jst_rfc3339(get_jst_timestamp()),
    })
}
