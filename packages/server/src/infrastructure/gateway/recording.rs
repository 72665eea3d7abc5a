//! In-memory Gateway that records every delivery.
//!
//! Used by tests to assert on exactly what the core sent, in order.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, Gateway, OutboundEvent};

/// One recorded call on the gateway
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Unicast(ConnectionId, OutboundEvent),
    Broadcast(OutboundEvent),
    Terminate(ConnectionId),
}

#[derive(Default)]
pub struct RecordingGateway {
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first
    pub async fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().await.clone()
    }

    /// Drain the recording
    pub async fn take(&self) -> Vec<Delivery> {
        std::mem::take(&mut *self.deliveries.lock().await)
    }

    /// Only the broadcast events, oldest first
    pub async fn broadcasts(&self) -> Vec<OutboundEvent> {
        self.deliveries
            .lock()
            .await
            .iter()
            .filter_map(|d| match d {
                Delivery::Broadcast(event) => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    /// Events unicast to `id`, oldest first
    pub async fn unicasts_to(&self, id: &ConnectionId) -> Vec<OutboundEvent> {
        self.deliveries
            .lock()
            .await
            .iter()
            .filter_map(|d| match d {
                Delivery::Unicast(to, event) if to == id => Some(event.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn was_terminated(&self, id: &ConnectionId) -> bool {
        self.deliveries
            .lock()
            .await
            .iter()
            .any(|d| matches!(d, Delivery::Terminate(t) if t == id))
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn unicast(&self, to: &ConnectionId, event: &OutboundEvent) {
        self.deliveries
            .lock()
            .await
            .push(Delivery::Unicast(to.clone(), event.clone()));
    }

    async fn broadcast(&self, event: &OutboundEvent) {
        self.deliveries
            .lock()
            .await
            .push(Delivery::Broadcast(event.clone()));
    }

    async fn terminate(&self, id: &ConnectionId) {
        self.deliveries
            .lock()
            .await
            .push(Delivery::Terminate(id.clone()));
    }
}
