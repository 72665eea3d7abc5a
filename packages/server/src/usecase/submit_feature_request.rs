//! UseCase: 機能リクエストの投稿
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitFeatureRequestUseCase::execute() メソッド
//! - 投稿者名をサーバー側で付与すること、一覧の配信
//!
//! ### なぜこのテストが必要か
//! - 保存される username が常に Registry 上の登録名と一致することを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みユーザーの投稿
//! - 異常系：未参加の接続からの投稿、重複 ID

use std::sync::Arc;

use crate::domain::{
    ConnectionId, FeatureRequest, FeatureRequestId, FeatureText, Gateway, OutboundEvent,
    RegistryRepository,
};

use super::error::FeatureRequestError;

/// 機能リクエスト投稿のユースケース
pub struct SubmitFeatureRequestUseCase {
    repository: Arc<dyn RegistryRepository>,
    gateway: Arc<dyn Gateway>,
}

impl SubmitFeatureRequestUseCase {
    pub fn new(repository: Arc<dyn RegistryRepository>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// 機能リクエストを登録して一覧を全員へ配信
    ///
    /// # Arguments
    ///
    /// * `sender` - 投稿者の接続 ID（参加済みであること）
    /// * `id` - クライアントが採番したリクエスト ID
    /// * `text` - 本文
    ///
    /// # Returns
    ///
    /// * `Ok(FeatureRequest)` - 保存されたリクエスト（username は登録名）
    /// * `Err(FeatureRequestError)` - 未参加、または ID 重複
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        id: FeatureRequestId,
        text: FeatureText,
    ) -> Result<FeatureRequest, FeatureRequestError> {
        let mut registry = self.repository.lock().await;

        let username = registry
            .find_user(sender)
            .map(|user| user.username.clone())
            .ok_or_else(|| FeatureRequestError::NotJoined(sender.clone()))?;

        let request = FeatureRequest::new(id, text, username);
        registry.add_feature_request(request.clone())?;

        self.gateway
            .broadcast(&OutboundEvent::FeatureRequestsList(
                registry.list_feature_requests(),
            ))
            .await;

        tracing::info!(
            "New feature request from {}: {}",
            request.username,
            request.text
        );
        Ok(request)
    }
}
