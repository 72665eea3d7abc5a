//! UseCase: 機能リクエストの削除（モデレーター操作）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, FeatureRequest, FeatureRequestId, Gateway, OutboundEvent, RegistryRepository,
};

use super::error::ModerationError;

/// 機能リクエスト削除のユースケース
pub struct DeleteFeatureRequestUseCase {
    repository: Arc<dyn RegistryRepository>,
    gateway: Arc<dyn Gateway>,
}

impl DeleteFeatureRequestUseCase {
    pub fn new(repository: Arc<dyn RegistryRepository>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// 削除を実行し、更新後の一覧を全員へ配信
    pub async fn execute(
        &self,
        actor: &ConnectionId,
        request_id: &FeatureRequestId,
    ) -> Result<FeatureRequest, ModerationError> {
        let mut registry = self.repository.lock().await;

        let moderator = registry
            .find_moderator(actor)
            .cloned()
            .ok_or_else(|| ModerationError::Unauthorized(actor.clone()))?;
        let removed = registry
            .remove_feature_request(request_id)
            .ok_or_else(|| ModerationError::NotFound(request_id.to_string()))?;

        self.gateway
            .broadcast(&OutboundEvent::FeatureRequestsList(
                registry.list_feature_requests(),
            ))
            .await;

        tracing::info!(
            "Feature request {} deleted by {}",
            removed.id,
            moderator.username
        );
        Ok(removed)
    }
}
