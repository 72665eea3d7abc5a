//! UseCase: チャットメッセージの中継
//!
//! 送信者のチェックは行わず、ペイロードをそのまま全員へ配信します。
//! ペイロード中の username は送信者の登録名と照合しません（既知の信頼ギャップ）。

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, Gateway, OutboundEvent};

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    gateway: Arc<dyn Gateway>,
}

impl RelayMessageUseCase {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// メッセージを全員へ配信
    pub async fn execute(&self, sender: &ConnectionId, message: ChatMessage) {
        tracing::info!(
            "Message from {} ({}): {}",
            message.username().unwrap_or("<anonymous>"),
            sender,
            message.text().unwrap_or_default()
        );
        self.gateway.broadcast(&OutboundEvent::Message(message)).await;
    }
}
