//! Gateway 実装
//!
//! ドメイン層の Gateway trait を実装します。

#[cfg(test)]
pub mod recording;
pub mod websocket;

#[cfg(test)]
pub use recording::{Delivery, RecordingGateway};
pub use websocket::{ClientInfo, OUTBOUND_QUEUE_CAPACITY, OutboundFrame, WebSocketGateway};
