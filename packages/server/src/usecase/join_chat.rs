//! UseCase: チャットへの参加（join）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - BAN チェック、ユーザー登録、初期状態の同期、ユーザー一覧の配信
//!
//! ### なぜこのテストが必要か
//! - BAN 済みの ID が接続一覧に現れないことを保証する
//! - 参加者本人にだけ BAN 一覧・機能リクエスト一覧が届くことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加
//! - 異常系：BAN 済み ID での参加、同一接続での二重参加

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Gateway, OutboundEvent, REASON_BANNED_ON_JOIN, RegistryError,
    RegistryRepository, User, Username,
};

use super::error::JoinError;

/// 参加のユースケース
pub struct JoinChatUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RegistryRepository>,
    /// 配送先（Gateway の抽象化）
    gateway: Arc<dyn Gateway>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
    pub fn new(repository: Arc<dyn RegistryRepository>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// 参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID（Gateway が採番）
    /// * `claimed_id` - クライアントが名乗る以前の ID（BAN 判定に使用）
    /// * `username` - 表示名
    /// * `is_moderator` - クライアント申告のモデレーターフラグ
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - 登録されたユーザー
    /// * `Err(JoinError::Banned)` - BAN 済み（拒否通知と切断を実施済み）
    /// * `Err(JoinError::Rejected)` - 既に参加済み、または終了済みの接続
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        claimed_id: Option<ConnectionId>,
        username: Username,
        is_moderator: bool,
    ) -> Result<User, JoinError> {
        let mut registry = self.repository.lock().await;

        // 1. BAN チェックと登録（Registry が原子的に判定）
        let user = User::new(connection_id.clone(), username, is_moderator);
        match registry.add_user(claimed_id.as_ref(), user.clone()) {
            Ok(()) => {}
            Err(RegistryError::Banned(banned_id)) => {
                self.gateway
                    .unicast(
                        &connection_id,
                        &OutboundEvent::connection_denied(REASON_BANNED_ON_JOIN),
                    )
                    .await;
                self.gateway.terminate(&connection_id).await;
                return Err(JoinError::Banned(banned_id));
            }
            Err(e) => return Err(JoinError::Rejected(e)),
        }

        // 2. 参加者本人へ現在の状態を送信
        self.gateway
            .unicast(
                &connection_id,
                &OutboundEvent::BannedUsersList(registry.list_banned()),
            )
            .await;
        self.gateway
            .unicast(
                &connection_id,
                &OutboundEvent::FeatureRequestsList(registry.list_feature_requests()),
            )
            .await;

        // 3. 全員へユーザー一覧を配信
        self.gateway
            .broadcast(&OutboundEvent::UserList(registry.list_users()))
            .await;

        Ok(user)
    }
}
