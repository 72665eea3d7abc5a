//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（Gateway）から EventDispatcher 経由で呼び出され、Domain 層を操作します。

pub mod ban_user;
pub mod connect_session;
pub mod delete_feature_request;
pub mod disconnect_session;
pub mod dispatcher;
pub mod error;
pub mod join_chat;
pub mod relay_admin_message;
pub mod relay_message;
pub mod submit_feature_request;
pub mod unban_user;

#[cfg(test)]
mod test_support;

pub use ban_user::BanUserUseCase;
pub use connect_session::ConnectSessionUseCase;
pub use delete_feature_request::DeleteFeatureRequestUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use dispatcher::EventDispatcher;
pub use error::{FeatureRequestError, JoinError, ModerationError};
pub use join_chat::JoinChatUseCase;
pub use relay_admin_message::RelayAdminMessageUseCase;
pub use relay_message::RelayMessageUseCase;
pub use submit_feature_request::SubmitFeatureRequestUseCase;
pub use unban_user::UnbanUserUseCase;
