//! Outbound side of the connection gateway.
//!
//! The core never talks to a transport directly. The UI layer provides a
//! WebSocket implementation and tests substitute an in-memory recorder.

use async_trait::async_trait;

use super::{event::OutboundEvent, value_object::ConnectionId};

/// Delivery primitives offered by the gateway.
///
/// All methods are fire-and-forget: delivery failures are handled (logged)
/// per connection by the implementation and never surface to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Deliver an event to exactly one connection
    async fn unicast(&self, to: &ConnectionId, event: &OutboundEvent);

    /// Deliver an event to every live connection
    async fn broadcast(&self, event: &OutboundEvent);

    /// Close a connection from the server side.
    ///
    /// Must be ordered after any event already unicast to that connection.
    async fn terminate(&self, id: &ConnectionId);
}
