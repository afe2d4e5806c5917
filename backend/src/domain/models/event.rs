//! Domain models for events and registrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle phase of an event, derived from the draft flag and the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPhase {
    Draft,
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub club_id: String,
    pub name: String,
    pub description: String,
    /// Scheduled start
    pub date: DateTime<Utc>,
    pub location: String,
    /// Maximum number of participants; None means unlimited
    pub capacity: Option<u32>,
    /// Draft events are unpublished and closed to registration.
    /// Always false on creation; update_event can un-publish.
    pub draft: bool,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Generate a unique event ID.
    /// Format: event::<uuid>
    pub fn generate_id() -> String {
        format!("event::{}", Uuid::new_v4())
    }

    /// Phase of the event as seen at `now`: Open until the event date,
    /// Closed from then on, Draft while unpublished.
    pub fn phase_at(&self, now: DateTime<Utc>) -> EventPhase {
        if self.draft {
            EventPhase::Draft
        } else if now < self.date {
            EventPhase::Open
        } else {
            EventPhase::Closed
        }
    }

    /// Whether the event has been held (counts toward activity numbers).
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        !self.draft && self.date <= now
    }
}

/// Attendance outcome for one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Registered, attendance not yet recorded
    Registered,
    Attended,
    Absent,
}

/// A user's registration for an event. Cancelling removes the row entirely,
/// so every stored participant counts against capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventParticipant {
    pub event_id: String,
    pub user_id: String,
    pub status: AttendanceStatus,
    pub registered_at: DateTime<Utc>,
    /// Set when attendance is recorded; overwritten on re-recording
    pub attended_at: Option<DateTime<Utc>>,
}
