//! UseCase: 接続確立
//!
//! Gateway が新しい接続を受け付けたときに呼ばれ、セッションを `Unjoined` で記録します。
//! この時点ではユーザー一覧には現れません。

use std::sync::Arc;

use crate::domain::{ConnectionId, RegistryRepository};

/// 接続確立のユースケース
pub struct ConnectSessionUseCase {
    repository: Arc<dyn RegistryRepository>,
}

impl ConnectSessionUseCase {
    pub fn new(repository: Arc<dyn RegistryRepository>) -> Self {
        Self { repository }
    }

    /// セッションを開始
    pub async fn execute(&self, connection_id: ConnectionId) {
        let mut registry = self.repository.lock().await;
        registry.open_session(connection_id);
        tracing::debug!("{} open session(s)", registry.session_count());
    }
}
