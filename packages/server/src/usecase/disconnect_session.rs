//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - 参加済み接続の削除とユーザー一覧の再配信
//!
//! ### なぜこのテストが必要か
//! - 切断後のユーザー一覧に残骸が残らないことを保証する
//! - 未参加・BAN 済みの接続の切断では何も配信されないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みユーザーの切断
//! - エッジケース：join 前の切断、BAN 後の切断

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Gateway, OutboundEvent, RegistryRepository, SessionState, User,
};

/// 切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RegistryRepository>,
    gateway: Arc<dyn Gateway>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(repository: Arc<dyn RegistryRepository>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(User)` - 参加済みだったユーザー（ユーザー一覧を配信済み）
    /// * `None` - 参加していなかった（何もしない）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<User> {
        let mut registry = self.repository.lock().await;

        let removed = match registry.session_state(connection_id) {
            SessionState::Joined => registry.remove_user(connection_id),
            _ => None,
        };
        // 接続 ID は再利用されないため、終端状態の記録も破棄する
        registry.close_session(connection_id);

        if removed.is_some() {
            self.gateway
                .broadcast(&OutboundEvent::UserList(registry.list_users()))
                .await;
        }

        removed
    }
}
