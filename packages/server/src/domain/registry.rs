//! The Registry aggregate.
//!
//! Single owner of connected users, banned users and feature requests, plus
//! the per-connection session state. Every mutation goes through a method
//! here so the invariants below hold after each call:
//!
//! - at most one user per connection identifier
//! - a banned identity is never in the connected list
//! - collections keep insertion order

use std::collections::HashMap;

use super::{
    entity::{BannedUser, FeatureRequest, SessionState, User},
    error::RegistryError,
    value_object::{ConnectionId, FeatureRequestId},
};

#[derive(Debug, Clone, Default)]
pub struct Registry {
    users: Vec<User>,
    banned: Vec<BannedUser>,
    feature_requests: Vec<FeatureRequest>,
    sessions: HashMap<ConnectionId, SessionState>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    // ---- sessions -------------------------------------------------------

    /// Record a freshly accepted connection as `Unjoined`.
    ///
    /// Re-opening a known connection keeps its current state.
    pub fn open_session(&mut self, id: ConnectionId) {
        self.sessions.entry(id).or_insert(SessionState::Unjoined);
    }

    /// Current state of a connection.
    ///
    /// Connections the gateway never reported are treated as `Unjoined`.
    pub fn session_state(&self, id: &ConnectionId) -> SessionState {
        self.sessions
            .get(id)
            .copied()
            .unwrap_or(SessionState::Unjoined)
    }

    /// Forget a connection once the gateway reports it gone
    pub fn close_session(&mut self, id: &ConnectionId) {
        self.sessions.remove(id);
    }

    /// Number of connections known to the registry, joined or not
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    // ---- users ----------------------------------------------------------

    /// Register a user on its connection.
    ///
    /// `claimed_id` is the prior identity the client presented at join time.
    ///
    /// # Errors
    ///
    /// * `RegistryError::Banned` if the claimed identity (or the connection
    ///   itself) is on the ban list
    /// * `RegistryError::AlreadyJoined` if the connection already has a user
    /// * `RegistryError::SessionClosed` if the connection was banned
    pub fn add_user(
        &mut self,
        claimed_id: Option<&ConnectionId>,
        user: User,
    ) -> Result<(), RegistryError> {
        if let Some(claimed) = claimed_id
            && self.is_banned(claimed)
        {
            return Err(RegistryError::Banned(claimed.clone()));
        }
        if self.is_banned(&user.id) {
            return Err(RegistryError::Banned(user.id));
        }

        match self.session_state(&user.id) {
            SessionState::Joined => return Err(RegistryError::AlreadyJoined(user.id)),
            state if state.is_terminal() => return Err(RegistryError::SessionClosed(user.id)),
            _ => {}
        }
        if self.find_user(&user.id).is_some() {
            return Err(RegistryError::AlreadyJoined(user.id));
        }

        self.sessions.insert(user.id.clone(), SessionState::Joined);
        self.users.push(user);
        Ok(())
    }

    /// Remove a user by connection identifier. Absent users are a no-op.
    pub fn remove_user(&mut self, id: &ConnectionId) -> Option<User> {
        let index = self.users.iter().position(|u| &u.id == id)?;
        let user = self.users.remove(index);
        if let Some(state) = self.sessions.get_mut(id)
            && *state == SessionState::Joined
        {
            *state = SessionState::Disconnected;
        }
        Some(user)
    }

    /// Find a connected user by connection identifier
    pub fn find_user(&self, id: &ConnectionId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Find a connected user that carries the moderator flag
    pub fn find_moderator(&self, id: &ConnectionId) -> Option<&User> {
        self.find_user(id).filter(|u| u.is_moderator)
    }

    /// Connected users in join order
    pub fn list_users(&self) -> Vec<User> {
        self.users.clone()
    }

    // ---- bans -----------------------------------------------------------

    /// Ban a connected user.
    ///
    /// Appends the snapshot, removes the user from the connected list and
    /// moves its session to `Banned`, in one step.
    pub fn ban_user(&mut self, user: &User) -> BannedUser {
        let snapshot = user.snapshot();
        self.users.retain(|u| u.id != user.id);
        self.sessions.insert(user.id.clone(), SessionState::Banned);
        self.banned.push(snapshot.clone());
        snapshot
    }

    /// Lift the first ban matching `id`. Absent entries are a no-op.
    pub fn unban_user(&mut self, id: &ConnectionId) -> Option<BannedUser> {
        let index = self.banned.iter().position(|b| &b.id == id)?;
        Some(self.banned.remove(index))
    }

    /// Banned users in ban order
    pub fn list_banned(&self) -> Vec<BannedUser> {
        self.banned.clone()
    }

    pub fn is_banned(&self, id: &ConnectionId) -> bool {
        self.banned.iter().any(|b| &b.id == id)
    }

    // ---- feature requests ----------------------------------------------

    /// Append a feature request.
    ///
    /// # Errors
    ///
    /// `RegistryError::DuplicateFeatureRequest` if the identifier is taken
    pub fn add_feature_request(&mut self, request: FeatureRequest) -> Result<(), RegistryError> {
        if self.feature_requests.iter().any(|r| r.id == request.id) {
            return Err(RegistryError::DuplicateFeatureRequest(request.id));
        }
        self.feature_requests.push(request);
        Ok(())
    }

    /// Remove the first feature request matching `id`
    pub fn remove_feature_request(&mut self, id: &FeatureRequestId) -> Option<FeatureRequest> {
        let index = self.feature_requests.iter().position(|r| &r.id == id)?;
        Some(self.feature_requests.remove(index))
    }

    /// Feature requests in submission order
    pub fn list_feature_requests(&self) -> Vec<FeatureRequest> {
        self.feature_requests.clone()
    }
}
