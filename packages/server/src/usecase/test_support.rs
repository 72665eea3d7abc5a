//! UseCase テスト用の共通セットアップ

use std::sync::Arc;

use crate::{
    domain::{
        ConnectionId, FeatureRequest, FeatureRequestId, FeatureText, RegistryRepository, User,
        Username,
    },
    infrastructure::{gateway::RecordingGateway, repository::InMemoryRegistryRepository},
};

pub struct Fixture {
    pub repository: Arc<InMemoryRegistryRepository>,
    pub gateway: Arc<RecordingGateway>,
}

pub fn fixture() -> Fixture {
    Fixture {
        repository: Arc::new(InMemoryRegistryRepository::new()),
        gateway: Arc::new(RecordingGateway::new()),
    }
}

pub fn conn(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub fn name(username: &str) -> Username {
    Username::new(username.to_string()).unwrap()
}

/// ゲートウェイを経由せずに Registry へ直接ユーザーを登録する
pub async fn seed_user(fixture: &Fixture, id: &str, username: &str, is_moderator: bool) -> User {
    let user = User::new(conn(id), name(username), is_moderator);
    let mut registry = fixture.repository.lock().await;
    registry.open_session(user.id.clone());
    registry.add_user(None, user.clone()).unwrap();
    user
}

pub async fn seed_feature_request(fixture: &Fixture, id: &str, text: &str, username: &str) {
    let request = FeatureRequest::new(
        FeatureRequestId::new(id.to_string()).unwrap(),
        FeatureText::new(text.to_string()).unwrap(),
        name(username),
    );
    fixture
        .repository
        .lock()
        .await
        .add_feature_request(request)
        .unwrap();
}
