//! WebSocket connection handlers.
//!
//! This is the gateway side of a connection: it assigns the connection
//! identifier, feeds decoded client events to the dispatcher in arrival
//! order, and drains the connection's outbound queue into the socket.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use moderated_chat_shared::time::get_jst_timestamp;
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionIdFactory,
    infrastructure::{
        dto::websocket::ClientEvent,
        gateway::{ClientInfo, OUTBOUND_QUEUE_CAPACITY, OutboundFrame},
    },
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = match ConnectionIdFactory::generate() {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to assign connection id: {}", e);
            return;
        }
    };

    // Create a channel for this connection to receive outbound frames
    let (tx, mut rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
    state
        .gateway
        .register(
            connection_id.clone(),
            ClientInfo {
                sender: tx,
                connected_at: get_jst_timestamp(),
            },
        )
        .await;
    state.dispatcher.connect(&connection_id).await;

    let (mut sender, mut receiver) = socket.split();

    let dispatcher = state.dispatcher.clone();
    let recv_connection_id = connection_id.clone();

    // Spawn a task to receive events from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                    Ok(event) => dispatcher.dispatch(&recv_connection_id, event).await,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to parse event from '{}': {}",
                            recv_connection_id,
                            e
                        );
                    }
                },
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to drain the outbound queue into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match frame {
                OutboundFrame::Text(text) => {
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                OutboundFrame::Close => {
                    let _ = sender.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.gateway.unregister(&connection_id).await;
    state.dispatcher.disconnect(&connection_id).await;
}
