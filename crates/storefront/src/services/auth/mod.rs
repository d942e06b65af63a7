//! Session manager behind the login popup.
//!
//! Login is demo-only: any non-empty username/password pair is accepted and
//! nothing is verified. The password never leaves this module and is never
//! persisted.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use funky_teens_core::{Username, UsernameError};

use crate::models::{CurrentUser, Session};
use crate::storage::{self, KeyValueStore};

/// Owns the login session and keeps it in sync with storage.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    key: String,
    session: Session,
    revision: u64,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("key", &self.key)
            .field("session", &self.session)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Load the session stored under `key`.
    ///
    /// A missing or malformed record loads as logged out.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let session = storage::load_json::<Session>(store.as_ref(), &key)
            .map(Session::normalized)
            .unwrap_or_default();

        tracing::debug!(key = %key, logged_in = session.is_logged_in(), "Loaded session");

        Self {
            store,
            key,
            session,
            revision: 0,
        }
    }

    /// Current session state.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// The logged-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.session.current_user()
    }

    /// Incremented on every state change; renderers compare it to skip
    /// redundant work.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Log in with any non-empty username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if either field is empty, or
    /// `AuthError::InvalidUsername` if the username is too long.
    pub fn login(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<CurrentUser, AuthError> {
        self.login_at(username, password, Utc::now())
    }

    /// [`SessionManager::login`] with an explicit login time.
    ///
    /// # Errors
    ///
    /// Same as [`SessionManager::login`].
    #[instrument(skip(self, username, password))]
    pub fn login_at(
        &mut self,
        username: &str,
        password: &SecretString,
        now: DateTime<Utc>,
    ) -> Result<CurrentUser, AuthError> {
        let username = match Username::parse(username) {
            Ok(username) => username,
            Err(UsernameError::Empty) => return Err(AuthError::MissingFields),
            Err(e) => return Err(e.into()),
        };

        if password.expose_secret().is_empty() {
            return Err(AuthError::MissingFields);
        }

        tracing::info!(username = %username, "User logged in");

        let user = CurrentUser {
            username,
            login_time: now,
        };
        self.session = Session::logged_in(user.clone());
        self.persist();

        Ok(user)
    }

    /// Log out. Returns whether a user was logged in.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> bool {
        let was_logged_in = self.session.is_logged_in();
        if let Some(user) = self.session.current_user() {
            tracing::info!(username = %user.username, "User logged out");
        }

        self.session = Session::logged_out();
        self.persist();
        was_logged_in
    }

    /// Write the session record. Failures are logged; the in-memory session
    /// stays authoritative.
    fn persist(&mut self) {
        self.revision += 1;
        if let Err(e) = storage::save_json(self.store.as_ref(), &self.key, &self.session) {
            tracing::error!(key = %self.key, error = %e, "Failed to persist session");
        }
    }
}
