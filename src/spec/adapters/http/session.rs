//! Bearer credential holder shared by HTTP gateway calls.

use std::sync::{PoisonError, RwLock};
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Signal broadcast when the service rejects the current credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutEvent;

/// Opaque bearer credential attached to every gateway request.
///
/// A `401` response clears the credential and broadcasts a [`LogoutEvent`].
/// Reacting to the event (showing a sign-in prompt, dropping user data) is
/// left to the session owner.
#[derive(Debug)]
pub struct AuthSession {
    token: RwLock<Option<String>>,
    logout: broadcast::Sender<LogoutEvent>,
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AuthSession {
    /// Creates a session, optionally already signed in.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        let (logout, _) = broadcast::channel(4);
        Self {
            token: RwLock::new(token.filter(|value| !value.trim().is_empty())),
            logout,
        }
    }

    /// Returns the current bearer token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores a new bearer token.
    pub fn sign_in(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Subscribes to logout signals.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LogoutEvent> {
        self.logout.subscribe()
    }

    /// Clears the credential and notifies subscribers.
    pub fn sign_out(&self) {
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        info!("credential rejected, signing out");
        if self.logout.send(LogoutEvent).is_err() {
            debug!("no logout subscribers");
        }
    }
}
