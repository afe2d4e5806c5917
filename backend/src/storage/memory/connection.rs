//! Shared in-memory tables.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::models::club::Club as DomainClub;
use crate::domain::models::event::{Event as DomainEvent, EventParticipant};
use crate::domain::models::report::Report as DomainReport;
use crate::domain::models::user::User as DomainUser;

/// MemoryConnection owns the table storage shared by all repositories.
///
/// Each table sits behind its own lock. Repository methods hold a single
/// guard, except the event-delete cascade which always locks events before
/// participants; with that fixed order, repository calls cannot deadlock.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    pub(crate) users: Arc<RwLock<HashMap<String, DomainUser>>>,
    pub(crate) clubs: Arc<RwLock<HashMap<String, DomainClub>>>,
    pub(crate) events: Arc<RwLock<HashMap<String, DomainEvent>>>,
    /// Keyed by (event_id, user_id)
    pub(crate) participants: Arc<RwLock<HashMap<(String, String), EventParticipant>>>,
    pub(crate) reports: Arc<RwLock<HashMap<String, DomainReport>>>,
}

impl MemoryConnection {
    /// Create a fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}
