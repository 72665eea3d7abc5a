//! UseCase: 管理メッセージの中継（モデレーター限定）

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, Gateway, OutboundEvent, RegistryRepository};

use super::error::ModerationError;

/// 管理メッセージ中継のユースケース
pub struct RelayAdminMessageUseCase {
    repository: Arc<dyn RegistryRepository>,
    gateway: Arc<dyn Gateway>,
}

impl RelayAdminMessageUseCase {
    pub fn new(repository: Arc<dyn RegistryRepository>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// 送信者がモデレーターとして参加中であれば全員へ配信
    ///
    /// 権限がなければ何も配信せずに `ModerationError::Unauthorized` を返します。
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        message: ChatMessage,
    ) -> Result<(), ModerationError> {
        let registry = self.repository.lock().await;

        if registry.find_moderator(sender).is_none() {
            return Err(ModerationError::Unauthorized(sender.clone()));
        }

        tracing::info!(
            "Admin message from {}: {}",
            message.username().unwrap_or("<anonymous>"),
            message.text().unwrap_or_default()
        );
        self.gateway
            .broadcast(&OutboundEvent::AdminMessage(message))
            .await;
        Ok(())
    }
}
