//! Inbound event routing.
//!
//! The gateway hands every decoded client event to [`EventDispatcher`], which
//! converts the raw payload into domain values and runs the matching use
//! case. Failures end here: they are logged and never reach the client.
//! The one user-visible failure, `connectionDenied`, is emitted by the use
//! cases themselves.

use std::sync::Arc;

use crate::{
    domain::{
        ChatMessage, ConnectionId, FeatureRequestId, FeatureText, Gateway, RegistryRepository,
        Username,
    },
    infrastructure::dto::websocket::{
        ClientEvent, DeleteFeatureRequestPayload, FeatureRequestPayload, JoinPayload,
        TargetUserPayload,
    },
};

use super::{
    BanUserUseCase, ConnectSessionUseCase, DeleteFeatureRequestUseCase, DisconnectSessionUseCase,
    JoinChatUseCase, ModerationError, RelayAdminMessageUseCase, RelayMessageUseCase,
    SubmitFeatureRequestUseCase, UnbanUserUseCase,
};

/// Routes connection lifecycle and client events to use cases
#[derive(Clone)]
pub struct EventDispatcher {
    repository: Arc<dyn RegistryRepository>,
    gateway: Arc<dyn Gateway>,
}

impl EventDispatcher {
    pub fn new(repository: Arc<dyn RegistryRepository>, gateway: Arc<dyn Gateway>) -> Self {
        Self {
            repository,
            gateway,
        }
    }

    /// The gateway accepted a new connection
    pub async fn connect(&self, connection_id: &ConnectionId) {
        ConnectSessionUseCase::new(self.repository.clone())
            .execute(connection_id.clone())
            .await;
        tracing::info!("User connected: {}", connection_id);
    }

    /// The gateway lost a connection
    pub async fn disconnect(&self, connection_id: &ConnectionId) {
        let usecase = DisconnectSessionUseCase::new(self.repository.clone(), self.gateway.clone());
        match usecase.execute(connection_id).await {
            Some(user) => tracing::info!("{} disconnected.", user.username),
            None => tracing::debug!("Connection '{}' closed without a joined user", connection_id),
        }
        tracing::info!("User disconnected: {}", connection_id);
    }

    /// Handle one client event
    ///
    /// The use case runs on its own task and is awaited here, so cancelling
    /// the caller (e.g. the connection's receive loop being aborted) never
    /// interrupts a use case between its Registry mutation and its
    /// deliveries.
    pub async fn dispatch(&self, connection_id: &ConnectionId, event: ClientEvent) {
        let dispatcher = self.clone();
        let connection_id = connection_id.clone();
        let handle =
            tokio::spawn(async move { dispatcher.route(&connection_id, event).await });
        if let Err(e) = handle.await {
            tracing::error!("Event handler task failed: {}", e);
        }
    }

    async fn route(&self, connection_id: &ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::Join(payload) => self.join(connection_id, payload).await,
            ClientEvent::Message(payload) => {
                RelayMessageUseCase::new(self.gateway.clone())
                    .execute(connection_id, ChatMessage::new(payload))
                    .await;
            }
            ClientEvent::AdminMessage(payload) => {
                let usecase =
                    RelayAdminMessageUseCase::new(self.repository.clone(), self.gateway.clone());
                let result = usecase
                    .execute(connection_id, ChatMessage::new(payload))
                    .await;
                log_moderation("adminMessage", connection_id, result);
            }
            ClientEvent::FeatureRequest(payload) => {
                self.submit_feature_request(connection_id, payload).await
            }
            ClientEvent::BanUser(TargetUserPayload { user_id }) => {
                let Some(target) = parse_target("banUser", connection_id, user_id) else {
                    return;
                };
                let usecase = BanUserUseCase::new(self.repository.clone(), self.gateway.clone());
                let result = usecase.execute(connection_id, &target).await;
                log_moderation("banUser", connection_id, result);
            }
            ClientEvent::UnbanUser(TargetUserPayload { user_id }) => {
                let Some(target) = parse_target("unbanUser", connection_id, user_id) else {
                    return;
                };
                let usecase = UnbanUserUseCase::new(self.repository.clone(), self.gateway.clone());
                let result = usecase.execute(connection_id, &target).await;
                log_moderation("unbanUser", connection_id, result);
            }
            ClientEvent::DeleteFeatureRequest(DeleteFeatureRequestPayload { request_id }) => {
                let request_id = match FeatureRequestId::new(request_id) {
                    Ok(id) => id,
                    Err(e) => {
                        tracing::warn!(
                            "Ignoring deleteFeatureRequest from '{}': {}",
                            connection_id,
                            e
                        );
                        return;
                    }
                };
                let usecase =
                    DeleteFeatureRequestUseCase::new(self.repository.clone(), self.gateway.clone());
                let result = usecase.execute(connection_id, &request_id).await;
                log_moderation("deleteFeatureRequest", connection_id, result);
            }
        }
    }

    async fn join(&self, connection_id: &ConnectionId, payload: JoinPayload) {
        let username = match Username::new(payload.username) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("Ignoring join from '{}': {}", connection_id, e);
                return;
            }
        };
        // A missing or malformed prior id just means "no prior identity".
        let claimed_id = payload.id.and_then(|id| ConnectionId::new(id).ok());

        let usecase = JoinChatUseCase::new(self.repository.clone(), self.gateway.clone());
        match usecase
            .execute(
                connection_id.clone(),
                claimed_id,
                username,
                payload.is_moderator,
            )
            .await
        {
            Ok(user) => tracing::info!(
                "{} has joined the chat{}.",
                user.username,
                if user.is_moderator { " as moderator" } else { "" }
            ),
            Err(e) => tracing::warn!("Join from '{}' refused: {}", connection_id, e),
        }
    }

    async fn submit_feature_request(
        &self,
        connection_id: &ConnectionId,
        payload: FeatureRequestPayload,
    ) {
        let parsed = FeatureRequestId::new(payload.id)
            .and_then(|id| FeatureText::new(payload.text).map(|text| (id, text)));
        let (id, text) = match parsed {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Ignoring featureRequest from '{}': {}", connection_id, e);
                return;
            }
        };

        let usecase =
            SubmitFeatureRequestUseCase::new(self.repository.clone(), self.gateway.clone());
        if let Err(e) = usecase.execute(connection_id, id, text).await {
            tracing::warn!("featureRequest from '{}' ignored: {}", connection_id, e);
        }
    }
}

fn parse_target(event: &str, actor: &ConnectionId, raw: String) -> Option<ConnectionId> {
    match ConnectionId::new(raw) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!("Ignoring {} from '{}': {}", event, actor, e);
            None
        }
    }
}

/// Moderation failures are silent to clients; keep an audit trail here.
fn log_moderation<T>(event: &str, actor: &ConnectionId, result: Result<T, ModerationError>) {
    match result {
        Ok(_) => {}
        Err(e @ ModerationError::Unauthorized(_)) => {
            tracing::warn!("Unauthorized {} attempt: {}", event, e);
        }
        Err(e @ ModerationError::NotFound(_)) => {
            tracing::debug!("{} from '{}' skipped: {}", event, actor, e);
        }
    }
}
