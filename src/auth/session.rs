use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    db::{DataModel, User},
    error::{AppError, AppResult},
    storage::{load_json, save_json, KeyValueStore, CURRENT_USER_KEY},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    /// Holds a copy of the user taken at login time.
    Authenticated(User),
}

/// Tracks the single logged-in user, mirrored into the session store.
pub struct AuthSessionManager {
    store: Arc<dyn KeyValueStore>,
    state: SessionState,
}

impl AuthSessionManager {
    /// Rehydrate from the session store. The snapshot is trusted as-is; a
    /// missing or unreadable snapshot leaves the session anonymous.
    pub fn restore_from_session(store: Arc<dyn KeyValueStore>) -> Self {
        let state = match load_json::<User>(store.as_ref(), CURRENT_USER_KEY) {
            Ok(Some(user)) => {
                info!(user_id = %user.id, "session restored");
                SessionState::Authenticated(user)
            }
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                warn!(error = %e, "could not restore session; starting anonymous");
                SessionState::Anonymous
            }
        };
        Self { store, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Anonymous => None,
        }
    }

    pub fn require_user(&self) -> AppResult<&User> {
        self.current_user().ok_or(AppError::AuthRequired)
    }

    /// On a credential miss the current state is kept.
    pub fn login(&mut self, model: &DataModel, email: &str, password: &str) -> AppResult<&User> {
        let Some(user) = model.find_user_by_credentials(email, password) else {
            warn!(email, "login with invalid credentials");
            return Err(AppError::InvalidCredentials);
        };
        let snapshot = user.clone();
        save_json(self.store.as_ref(), CURRENT_USER_KEY, &snapshot)?;
        info!(user_id = %snapshot.id, email = %snapshot.email, "user logged in");
        self.state = SessionState::Authenticated(snapshot);
        self.require_user()
    }

    pub fn logout(&mut self) -> AppResult<()> {
        self.store.remove(CURRENT_USER_KEY)?;
        if let SessionState::Authenticated(user) = &self.state {
            info!(user_id = %user.id, "user logged out");
        }
        self.state = SessionState::Anonymous;
        Ok(())
    }
}
