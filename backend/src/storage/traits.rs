//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Implementations return plain storage errors through `anyhow`; services
//! re-classify them into the domain error taxonomy. Every method is a
//! single atomic call, and all of them are synchronous.

use anyhow::Result;

use crate::domain::models::club::Club as DomainClub;
use crate::domain::models::event::{
    AttendanceStatus, Event as DomainEvent, EventParticipant as DomainEventParticipant,
};
use crate::domain::models::report::Report as DomainReport;
use crate::domain::models::user::User as DomainUser;

/// Trait defining the interface for user storage operations
pub trait UserStore: Send + Sync {
    /// Store a new user
    fn store_user(&self, user: &DomainUser) -> Result<()>;

    /// Retrieve a specific user by ID
    fn get_user(&self, user_id: &str) -> Result<Option<DomainUser>>;

    /// Retrieve a user by email, compared case-insensitively
    fn get_user_by_email(&self, email: &str) -> Result<Option<DomainUser>>;

    /// List all users ordered by email
    fn list_users(&self) -> Result<Vec<DomainUser>>;

    /// Update an existing user
    fn update_user(&self, user: &DomainUser) -> Result<()>;
}

/// Trait defining the interface for club storage operations
pub trait ClubStore: Send + Sync {
    /// Store a new club
    fn store_club(&self, club: &DomainClub) -> Result<()>;

    /// Retrieve a specific club by ID
    fn get_club(&self, club_id: &str) -> Result<Option<DomainClub>>;

    /// Retrieve a club by name, compared case-insensitively
    fn get_club_by_name(&self, name: &str) -> Result<Option<DomainClub>>;

    /// List all clubs ordered by name
    fn list_clubs(&self) -> Result<Vec<DomainClub>>;

    /// Update an existing club
    fn update_club(&self, club: &DomainClub) -> Result<()>;
}

/// Trait defining the interface for event and registration storage
pub trait EventStore: Send + Sync {
    /// Store a new event
    fn store_event(&self, event: &DomainEvent) -> Result<()>;

    /// Retrieve a specific event by ID
    fn get_event(&self, event_id: &str) -> Result<Option<DomainEvent>>;

    /// List events belonging to one club, ordered by date ascending
    fn list_events_for_club(&self, club_id: &str) -> Result<Vec<DomainEvent>>;

    /// Update an existing event
    fn update_event(&self, event: &DomainEvent) -> Result<()>;

    /// Delete an event together with its registrations
    /// Returns true if the event was found and deleted
    fn delete_event(&self, event_id: &str) -> Result<bool>;

    /// Store a new registration
    fn store_participant(&self, participant: &DomainEventParticipant) -> Result<()>;

    /// Retrieve one registration
    fn get_participant(
        &self,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<DomainEventParticipant>>;

    /// List an event's registrations ordered by registration time
    fn list_participants(&self, event_id: &str) -> Result<Vec<DomainEventParticipant>>;

    /// Number of registrations on file for an event
    fn count_participants(&self, event_id: &str) -> Result<usize>;

    /// Record the attendance outcome of one registration
    fn update_participant_status(
        &self,
        event_id: &str,
        user_id: &str,
        status: AttendanceStatus,
        attended_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<()>;

    /// Remove one registration
    /// Returns true if the registration was found and deleted
    fn delete_participant(&self, event_id: &str, user_id: &str) -> Result<bool>;
}

/// Trait defining the interface for report storage operations
pub trait ReportStore: Send + Sync {
    /// Store a generated report
    fn store_report(&self, report: &DomainReport) -> Result<()>;

    /// Retrieve a specific report by ID
    fn get_report(&self, report_id: &str) -> Result<Option<DomainReport>>;

    /// List one club's reports ordered by generation time descending
    fn list_reports_for_club(&self, club_id: &str) -> Result<Vec<DomainReport>>;
}
