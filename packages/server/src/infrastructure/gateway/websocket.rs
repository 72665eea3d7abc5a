//! WebSocket 実装の Gateway
//!
//! 接続ごとの送信チャンネルを保持し、ドメインの OutboundEvent を JSON に
//! 変換して配送します。送信は有界キューへの try_send のみで完了するため、
//! 遅いクライアントが他のクライアントへの配送を止めることはありません。
//! キューが溢れた接続は登録を解除され、送信側が閉じることで切断されます。

use std::collections::HashMap;

use async_trait::async_trait;
use moderated_chat_shared::time::get_jst_timestamp;
use tokio::sync::{
    Mutex,
    mpsc::{self, error::TrySendError},
};

use crate::{
    domain::{ConnectionId, Gateway, OutboundEvent},
    infrastructure::dto::websocket::encode,
};

/// Frames a connection may have queued before it is considered stalled
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// Frame queued for a single connection's writer task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    Text(String),
    /// Close the socket after everything queued before it
    Close,
}

/// Client connection information
pub struct ClientInfo {
    /// Message sender channel
    pub sender: mpsc::Sender<OutboundFrame>,
    /// Unix timestamp when connected (in JST, milliseconds)
    pub connected_at: i64,
}

/// Gateway backed by per-connection mpsc channels
#[derive(Default)]
pub struct WebSocketGateway {
    clients: Mutex<HashMap<ConnectionId, ClientInfo>>,
}

impl WebSocketGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start delivering to a newly accepted connection
    pub async fn register(&self, id: ConnectionId, info: ClientInfo) {
        self.clients.lock().await.insert(id, info);
    }

    /// Stop delivering to a connection that has gone away
    pub async fn unregister(&self, id: &ConnectionId) {
        if let Some(info) = self.clients.lock().await.remove(id) {
            tracing::debug!(
                "Connection '{}' unregistered after {} ms",
                id,
                get_jst_timestamp() - info.connected_at
            );
        }
    }

    /// Number of live connections
    pub async fn connection_count(&self) -> usize {
        self.clients.lock().await.len()
    }

    /// Queue a frame; returns false when the connection's queue is full
    fn send_frame(id: &ConnectionId, info: &ClientInfo, frame: OutboundFrame) -> bool {
        match info.sender.try_send(frame) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Outbound queue full for connection '{}'", id);
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!("Failed to queue frame for connection '{}'", id);
                true
            }
        }
    }

    /// Drop stalled connections; their writer sees the channel close
    fn evict(clients: &mut HashMap<ConnectionId, ClientInfo>, stalled: Vec<ConnectionId>) {
        for id in stalled {
            clients.remove(&id);
            tracing::warn!("Disconnecting stalled connection '{}'", id);
        }
    }
}

#[async_trait]
impl Gateway for WebSocketGateway {
    async fn unicast(&self, to: &ConnectionId, event: &OutboundEvent) {
        let frame = match encode(event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Failed to encode '{}' event: {}", event.name(), e);
                return;
            }
        };

        let mut clients = self.clients.lock().await;
        match clients.get(to) {
            Some(info) => {
                if !Self::send_frame(to, info, OutboundFrame::Text(frame)) {
                    Self::evict(&mut clients, vec![to.clone()]);
                }
            }
            None => tracing::debug!("Unicast '{}' to unknown connection '{}'", event.name(), to),
        }
    }

    async fn broadcast(&self, event: &OutboundEvent) {
        let frame = match encode(event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Failed to encode '{}' event: {}", event.name(), e);
                return;
            }
        };

        let mut clients = self.clients.lock().await;
        let mut stalled = Vec::new();
        for (id, info) in clients.iter() {
            if !Self::send_frame(id, info, OutboundFrame::Text(frame.clone())) {
                stalled.push(id.clone());
            }
        }
        Self::evict(&mut clients, stalled);
        tracing::debug!(
            "Broadcasted '{}' to {} connection(s)",
            event.name(),
            clients.len()
        );
    }

    async fn terminate(&self, id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if let Some(info) = clients.get(id) {
            tracing::info!("Terminating connection '{}'", id);
            if !Self::send_frame(id, info, OutboundFrame::Close) {
                Self::evict(&mut clients, vec![id.clone()]);
            }
        }
    }
}
