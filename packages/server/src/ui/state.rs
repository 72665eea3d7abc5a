//! Server state and connection management.

use std::sync::Arc;

use crate::{
    domain::RegistryRepository,
    infrastructure::{gateway::WebSocketGateway, repository::InMemoryRegistryRepository},
    usecase::EventDispatcher,
};

/// Shared application state
///
/// Built once per server and handed to every connection handler; there is
/// no process-wide global.
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn RegistryRepository>,
    /// WebSocket sender channels for unicast/broadcast
    pub gateway: Arc<WebSocketGateway>,
    /// Inbound event router shared by all connections
    pub dispatcher: EventDispatcher,
}

impl AppState {
    /// Wire an empty in-memory Registry to a WebSocket gateway
    pub fn new() -> Self {
        let repository: Arc<dyn RegistryRepository> = Arc::new(InMemoryRegistryRepository::new());
        let gateway = Arc::new(WebSocketGateway::new());
        let dispatcher = EventDispatcher::new(repository.clone(), gateway.clone());
        Self {
            repository,
            gateway,
            dispatcher,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
