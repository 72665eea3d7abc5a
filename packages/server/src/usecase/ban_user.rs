//! UseCase: ユーザーの BAN（モデレーター操作）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BanUserUseCase::execute() メソッド
//! - 権限チェック、BAN 一覧への追加、対象接続への拒否通知と切断、一覧の配信
//!
//! ### なぜこのテストが必要か
//! - 「接続中かつ BAN 済み」という状態が観測されないことを保証する
//! - 非モデレーターの操作が何の痕跡も残さないことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：モデレーターによる BAN
//! - 異常系：非モデレーター、未参加の操作者、存在しない対象

use std::sync::Arc;

use crate::domain::{
    BannedUser, ConnectionId, Gateway, OutboundEvent, REASON_BANNED_BY_MODERATOR,
    RegistryRepository,
};

use super::error::ModerationError;

/// BAN のユースケース
pub struct BanUserUseCase {
    repository: Arc<dyn RegistryRepository>,
    gateway: Arc<dyn Gateway>,
}

impl BanUserUseCase {
    pub fn new(repository: Arc<dyn RegistryRepository>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// BAN を実行
    ///
    /// 権限チェックから配信までを 1 つのロック区間で行います。
    ///
    /// # Arguments
    ///
    /// * `actor` - 操作者の接続 ID
    /// * `target` - BAN 対象の接続 ID
    ///
    /// # Returns
    ///
    /// * `Ok(BannedUser)` - BAN 一覧に追加されたスナップショット
    /// * `Err(ModerationError)` - 権限なし、または対象なし（何も変更しない）
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
        let target_user = registry
            .find_user(target)
            .cloned()
            .ok_or_else(|| ModerationError::NotFound(target.to_string()))?;

        let snapshot = registry.ban_user(&target_user);

        self.gateway
            .unicast(
                target,
                &OutboundEvent::connection_denied(REASON_BANNED_BY_MODERATOR),
            )
            .await;
        self.gateway.terminate(target).await;

        self.gateway
            .broadcast(&OutboundEvent::UserList(registry.list_users()))
            .await;
        self.gateway
            .broadcast(&OutboundEvent::BannedUsersList(registry.list_banned()))
            .await;

        tracing::info!(
            "{} banned user: {}",
            moderator.username,
            snapshot.username
        );
        Ok(snapshot)
    }
}
