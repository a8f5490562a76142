//! Auth collaborator: shared session state for the gateways and stores.
//!
//! The session is held behind an `RwLock`, so a token update is atomic and
//! every gateway call reads whichever token is current at dispatch time.
//! An in-flight request keeps the token it was dispatched with.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// The signed-in user's session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The user ID
    pub user_id: String,
    /// The bearer access token
    pub access_token: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
        }
    }
}

/// Shared auth handle.
///
/// Cloned into every gateway and store; all clones observe the same session.
/// Store/binding code subscribes to the authenticated flag to react to
/// sign-in and sign-out transitions.
#[derive(Clone)]
pub struct Auth {
    current_session: Arc<RwLock<Option<Session>>>,
    changes: Arc<watch::Sender<bool>>,
}

impl Auth {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(false);
        Self {
            current_session: Arc::new(RwLock::new(None)),
            changes: Arc::new(changes),
        }
    }

    /// Install a session, marking the handle authenticated
    pub fn set_session(&self, session: Session) {
        {
            let mut write_guard = self.current_session.write().unwrap();
            *write_guard = Some(session);
        }
        self.changes.send_replace(true);
    }

    /// Drop the session, marking the handle unauthenticated
    pub fn clear_session(&self) {
        {
            let mut write_guard = self.current_session.write().unwrap();
            *write_guard = None;
        }
        self.changes.send_replace(false);
    }

    /// Get the current session, if any
    pub fn session(&self) -> Option<Session> {
        let read_guard = self.current_session.read().unwrap();
        read_guard.clone()
    }

    /// The signed-in user's id, if any
    pub fn user_id(&self) -> Option<String> {
        let read_guard = self.current_session.read().unwrap();
        read_guard.as_ref().map(|session| session.user_id.clone())
    }

    /// The freshest known bearer token, if any
    pub fn access_token(&self) -> Option<String> {
        let read_guard = self.current_session.read().unwrap();
        read_guard
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session.read().unwrap().is_some()
    }

    /// Subscribe to transitions of the authenticated flag
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.changes.subscribe()
    }
}

impl Default for Auth {
    fn default() -> Self {
        Self::new()
    }
}
