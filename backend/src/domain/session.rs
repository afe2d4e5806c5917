//! Login session state.
//!
//! The session is explicit state owned by the backend and injected into the
//! services that need it. There is no process-global; gated operations take
//! the acting [`Session`] as an argument, which keeps authorization
//! decisions visible at every call site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::domain::models::user::UserRole;

/// The acting user, captured at login time.
///
/// Role changes made after login take effect at the next login; the
/// snapshot is deliberately not refreshed mid-session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
    pub logged_in_at: DateTime<Utc>,
}

/// Single login slot shared across the backend.
///
/// Login and logout go through the write lock, so concurrent logins
/// serialize and the slot never holds a torn session. Reads hand out a
/// clone of the current snapshot.
#[derive(Clone, Default)]
pub struct SessionState {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session, if someone is logged in.
    pub fn current(&self) -> Option<Session> {
        self.inner.read().unwrap().clone()
    }

    /// Install a new session, replacing any previous login.
    pub fn install(&self, session: Session) -> Option<Session> {
        self.inner.write().unwrap().replace(session)
    }

    /// Clear the slot. Idempotent; returns the session that was active.
    pub fn clear(&self) -> Option<Session> {
        self.inner.write().unwrap().take()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner.read().unwrap().is_some()
    }
}
