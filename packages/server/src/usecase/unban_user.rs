//! UseCase: BAN 解除（モデレーター操作）

use std::sync::Arc;

use crate::domain::{BannedUser, ConnectionId, Gateway, OutboundEvent, RegistryRepository};

use super::error::ModerationError;

/// BAN 解除のユースケース
pub struct UnbanUserUseCase {
    repository: Arc<dyn RegistryRepository>,
    gateway: Arc<dyn Gateway>,
}

impl UnbanUserUseCase {
    pub fn new(repository: Arc<dyn RegistryRepository>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// BAN 解除を実行
    ///
    /// 一致する BAN 一覧のエントリを 1 件だけ削除し、BAN 一覧を配信します。
    /// 接続中ユーザーの一覧には触れません。
    pub async fn execute(
        &self,
        actor: &ConnectionId,
        target: &ConnectionId,
    ) -> Result<BannedUser, ModerationError> {
        let mut registry = self.repository.lock().await;

        let moderator = registry
            .find_moderator(actor)
            .cloned()
            .ok_or_else(|| ModerationError::Unauthorized(actor.clone()))?;
        let lifted = registry
            .unban_user(target)
            .ok_or_else(|| ModerationError::NotFound(target.to_string()))?;

        self.gateway
            .broadcast(&OutboundEvent::BannedUsersList(registry.list_banned()))
            .await;

        tracing::info!("{} unbanned user: {}", moderator.username, lifted.username);
        Ok(lifted)
    }
}
