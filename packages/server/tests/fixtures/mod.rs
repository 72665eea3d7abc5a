//! Shared fixtures for integration tests.
//!
//! `TestServer` runs the real server on an ephemeral port inside the test
//! runtime. `TestClient` is a thin WebSocket client speaking the
//! `{"event", "payload"}` envelope.

#![allow(dead_code)]

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use moderated_chat_server::infrastructure::dto::websocket::{ServerEvent, UserDto};
use serde_json::{Value, json};
use tokio::{net::TcpListener, net::TcpStream, sync::oneshot, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

pub const RECV_TIMEOUT: Duration = Duration::from_secs(3);

/// Server running in the background until dropped
pub struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = moderated_chat_server::serve(listener, shutdown).await {
                eprintln!("test server error: {e}");
            }
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Open a WebSocket connection without joining
    pub async fn connect(&self) -> TestClient {
        let (stream, _) = tokio_tungstenite::connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        TestClient { stream }
    }

    /// Connect and join, consuming the join handshake
    /// (`bannedUsersList`, `featureRequestsList`, `userList`).
    ///
    /// Returns the client and the `userList` it received.
    pub async fn join(&self, username: &str, is_moderator: bool) -> (TestClient, Vec<UserDto>) {
        let mut client = self.connect().await;
        client
            .send(json!({
                "event": "join",
                "payload": {"username": username, "isModerator": is_moderator}
            }))
            .await;

        assert!(matches!(
            client.recv().await,
            Some(ServerEvent::BannedUsersList(_))
        ));
        assert!(matches!(
            client.recv().await,
            Some(ServerEvent::FeatureRequestsList(_))
        ));
        let users = client.expect_user_list().await;
        (client, users)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn send(&mut self, event: Value) {
        self.stream
            .send(Message::Text(event.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send frame");
    }

    /// Next server event, or `None` once the server closed the socket
    pub async fn recv(&mut self) -> Option<ServerEvent> {
        loop {
            let frame = timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a frame");
            match frame {
                Some(Ok(Message::Text(text))) => {
                    return Some(
                        serde_json::from_str(text.as_str()).expect("Failed to parse server event"),
                    );
                }
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => return None,
                Some(Ok(_)) => continue,
            }
        }
    }

    pub async fn expect_user_list(&mut self) -> Vec<UserDto> {
        match self.recv().await {
            Some(ServerEvent::UserList(users)) => users,
            other => panic!("expected userList, got {other:?}"),
        }
    }

    /// Read until the server closes the connection
    pub async fn expect_closed(&mut self) {
        while let Some(event) = self.recv().await {
            // Frames queued before the close are allowed to arrive.
            let _ = event;
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

pub fn usernames(users: &[UserDto]) -> Vec<&str> {
    users.iter().map(|u| u.username.as_str()).collect()
}
