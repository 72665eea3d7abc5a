//! UseCase 層のエラー定義
//!
//! `JoinError::Banned` を除き、これらのエラーはクライアントには返されません。
//! EventDispatcher がログに記録して握りつぶします。

use thiserror::Error;

use crate::domain::{ConnectionId, RegistryError};

/// 参加（join）時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// BAN 済みの ID で参加しようとした（connectionDenied を送信済み）
    #[error("Identity '{0}' is banned")]
    Banned(ConnectionId),

    /// 既に参加済み、または終了済みの接続からの join
    #[error("Join rejected: {0}")]
    Rejected(RegistryError),
}

/// モデレーター操作（BAN / BAN 解除 / 管理メッセージ / リクエスト削除）のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModerationError {
    /// 操作者がモデレーターとして参加していない
    #[error("Connection '{0}' is not a joined moderator")]
    Unauthorized(ConnectionId),

    /// 対象が存在しない
    #[error("Target '{0}' not found")]
    NotFound(String),
}

/// 機能リクエスト投稿のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeatureRequestError {
    /// 投稿者が参加していない
    #[error("Connection '{0}' has not joined")]
    NotJoined(ConnectionId),

    /// 同じ ID のリクエストが既に存在する
    #[error(transparent)]
    Duplicate(#[from] RegistryError),
}
