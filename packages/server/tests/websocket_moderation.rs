//! WebSocket integration tests for joining, moderation and feature requests.

mod fixtures;

use fixtures::{TestServer, usernames};
use moderated_chat_server::infrastructure::dto::websocket::{
    BannedUserDto, ConnectionDeniedPayload, ServerEvent,
};
use serde_json::json;

#[tokio::test]
async fn test_join_syncs_state_and_broadcasts_user_list() {
    // テスト項目: 参加者本人に初期状態が届き、既存の参加者にもユーザー一覧が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, users) = server.join("alice", true).await;
    assert_eq!(usernames(&users), vec!["alice"]);

    // when (操作):
    let (_bob, users) = server.join("bob", false).await;

    // then (期待する結果):
    assert_eq!(usernames(&users), vec!["alice", "bob"]);
    assert!(users[0].is_moderator);
    assert!(!users[1].is_moderator);
    let seen_by_alice = alice.expect_user_list().await;
    assert_eq!(seen_by_alice, users);
}

#[tokio::test]
async fn test_scenario_moderator_bans_user() {
    // テスト項目: A（モデレーター）が B を BAN し、B の ID での再参加が拒否される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = server.join("alice", true).await;
    let (mut bob, users) = server.join("bob", false).await;
    let bob_id = users[1].id.clone();
    alice.expect_user_list().await;

    // when (操作): B の管理メッセージ（配信されない）に続けて通常メッセージ
    bob.send(json!({"event": "adminMessage", "payload": {"username": "bob", "text": "fake"}}))
        .await;
    bob.send(json!({"event": "message", "payload": {"username": "bob", "text": "hi"}}))
        .await;

    // then (期待する結果): A が次に受け取るのは通常メッセージ
    assert_eq!(
        alice.recv().await,
        Some(ServerEvent::Message(json!({"username": "bob", "text": "hi"})))
    );
    assert!(matches!(bob.recv().await, Some(ServerEvent::Message(_))));

    // when (操作): A が B を BAN
    alice
        .send(json!({"event": "banUser", "payload": {"userId": bob_id}}))
        .await;

    // then (期待する結果):
    assert_eq!(
        bob.recv().await,
        Some(ServerEvent::ConnectionDenied(ConnectionDeniedPayload {
            reason: "You have been banned by a moderator.".to_string()
        }))
    );
    bob.expect_closed().await;

    let users = alice.expect_user_list().await;
    assert_eq!(usernames(&users), vec!["alice"]);
    assert_eq!(
        alice.recv().await,
        Some(ServerEvent::BannedUsersList(vec![BannedUserDto {
            id: bob_id.clone(),
            username: "bob".to_string()
        }]))
    );

    // when (操作): 新しい接続が B の ID で参加を試みる
    let mut again = server.connect().await;
    again
        .send(json!({"event": "join", "payload": {"id": bob_id, "username": "bob"}}))
        .await;

    // then (期待する結果):
    assert_eq!(
        again.recv().await,
        Some(ServerEvent::ConnectionDenied(ConnectionDeniedPayload {
            reason: "You are banned from this chat.".to_string()
        }))
    );
    again.expect_closed().await;
}

#[tokio::test]
async fn test_unban_allows_rejoin() {
    // テスト項目: BAN 解除後は同じ ID で再参加できる
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = server.join("alice", true).await;
    let (mut bob, users) = server.join("bob", false).await;
    let bob_id = users[1].id.clone();
    alice.expect_user_list().await;
    alice
        .send(json!({"event": "banUser", "payload": {"userId": bob_id}}))
        .await;
    bob.expect_closed().await;
    alice.expect_user_list().await;
    alice.recv().await; // bannedUsersList [bob]

    // when (操作):
    alice
        .send(json!({"event": "unbanUser", "payload": {"userId": bob_id}}))
        .await;

    // then (期待する結果):
    assert_eq!(alice.recv().await, Some(ServerEvent::BannedUsersList(vec![])));

    let mut again = server.connect().await;
    again
        .send(json!({"event": "join", "payload": {"id": bob_id, "username": "bob"}}))
        .await;
    assert_eq!(again.recv().await, Some(ServerEvent::BannedUsersList(vec![])));
}

#[tokio::test]
async fn test_scenario_feature_request_lifecycle() {
    // テスト項目: 機能リクエストの username はサーバーが付与し、モデレーターの削除で空になる
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = server.join("alice", true).await;
    let (mut carol, _) = server.join("C", false).await;
    alice.expect_user_list().await;

    // when (操作):
    carol
        .send(json!({
            "event": "featureRequest",
            "payload": {"id": "fr1", "text": "dark mode", "username": "mallory"}
        }))
        .await;

    // then (期待する結果):
    for client in [&mut alice, &mut carol] {
        match client.recv().await {
            Some(ServerEvent::FeatureRequestsList(list)) => {
                assert_eq!(list.len(), 1);
                assert_eq!(list[0].id, "fr1");
                assert_eq!(list[0].text, "dark mode");
                assert_eq!(list[0].username, "C");
            }
            other => panic!("expected featureRequestsList, got {other:?}"),
        }
    }

    // when (操作): C（非モデレーター）の削除 → 無視、A の削除 → 空の一覧
    carol
        .send(json!({"event": "deleteFeatureRequest", "payload": {"requestId": "fr1"}}))
        .await;
    carol
        .send(json!({"event": "message", "payload": {"username": "C", "text": "sync"}}))
        .await;
    assert!(matches!(alice.recv().await, Some(ServerEvent::Message(_))));
    assert!(matches!(carol.recv().await, Some(ServerEvent::Message(_))));

    alice
        .send(json!({"event": "deleteFeatureRequest", "payload": {"requestId": "fr1"}}))
        .await;

    // then (期待する結果):
    assert_eq!(
        alice.recv().await,
        Some(ServerEvent::FeatureRequestsList(vec![]))
    );
    assert_eq!(
        carol.recv().await,
        Some(ServerEvent::FeatureRequestsList(vec![]))
    );
}

#[tokio::test]
async fn test_admin_message_from_moderator_is_broadcast() {
    // テスト項目: モデレーターの管理メッセージは全員に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = server.join("alice", true).await;
    let (mut bob, _) = server.join("bob", false).await;
    alice.expect_user_list().await;

    // when (操作):
    let payload = json!({"username": "alice", "text": "welcome"});
    alice
        .send(json!({"event": "adminMessage", "payload": payload}))
        .await;

    // then (期待する結果):
    assert_eq!(
        bob.recv().await,
        Some(ServerEvent::AdminMessage(payload.clone()))
    );
    assert_eq!(alice.recv().await, Some(ServerEvent::AdminMessage(payload)));
}

#[tokio::test]
async fn test_disconnect_broadcasts_user_list() {
    // テスト項目: 切断すると残りの参加者に更新後のユーザー一覧が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = server.join("alice", false).await;
    let (bob, _) = server.join("bob", false).await;
    alice.expect_user_list().await;

    // when (操作):
    bob.close().await;

    // then (期待する結果):
    let users = alice.expect_user_list().await;
    assert_eq!(usernames(&users), vec!["alice"]);
}

#[tokio::test]
async fn test_malformed_frames_are_ignored() {
    // テスト項目: 解析できないフレームは無視され、接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let (mut alice, _) = server.join("alice", false).await;

    // when (操作):
    alice.send_raw("not json at all").await;
    alice
        .send(json!({"event": "selfDestruct", "payload": {}}))
        .await;
    alice
        .send(json!({"event": "message", "payload": {"username": "alice", "text": "still here"}}))
        .await;

    // then (期待する結果):
    assert_eq!(
        alice.recv().await,
        Some(ServerEvent::Message(
            json!({"username": "alice", "text": "still here"})
        ))
    );
}
