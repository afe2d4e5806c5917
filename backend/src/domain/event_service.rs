//! Events, registration and attendance.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::BackendConfig;
use crate::domain::authorization_service::{Action, AuthorizationService};
use crate::domain::commands::events::{
    CreateEventCommand, RecordAttendanceCommand, UpdateEventCommand,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::mappers::EventMapper;
use crate::domain::models::event::{
    AttendanceStatus, Event as DomainEvent, EventParticipant, EventPhase,
};
use crate::domain::session::Session;
use crate::storage::traits::{ClubStore, EventStore, UserStore};

/// Service for managing events and registrations in the club management system
#[derive(Clone)]
pub struct EventService {
    event_store: Arc<dyn EventStore>,
    user_store: Arc<dyn UserStore>,
    club_store: Arc<dyn ClubStore>,
    config: BackendConfig,
    authorization: AuthorizationService,
    /// One lock per event; registration serializes its check-then-insert
    /// on it so capacity is never oversold
    registration_locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl EventService {
    /// Create a new EventService
    pub fn new(
        event_store: Arc<dyn EventStore>,
        user_store: Arc<dyn UserStore>,
        club_store: Arc<dyn ClubStore>,
        config: BackendConfig,
        authorization: AuthorizationService,
    ) -> Self {
        Self {
            event_store,
            user_store,
            club_store,
            config,
            authorization,
            registration_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a new event. Events start published and open for registration.
    pub fn create_event(
        &self,
        actor: &Session,
        command: CreateEventCommand,
    ) -> DomainResult<shared::Event> {
        info!(
            "Creating event: name={}, club={}",
            command.name, command.club_id
        );

        self.authorization.ensure(actor.role, Action::CreateEvent)?;

        self.validate_name(&command.name)?;
        self.validate_capacity(command.capacity)?;
        let date = Self::parse_date(&command.date)?;

        let club = self
            .club_store
            .get_club(&command.club_id)
            .map_err(|e| DomainError::data_integrity("create_event", e))?
            .ok_or_else(|| DomainError::ClubNotFound {
                club_id: command.club_id.clone(),
            })?;
        if !club.active {
            return Err(DomainError::ClubInactive { club_id: club.id });
        }

        let event = DomainEvent {
            id: DomainEvent::generate_id(),
            club_id: club.id,
            name: command.name.trim().to_string(),
            description: command.description,
            date,
            location: command.location,
            capacity: command.capacity,
            draft: false,
            created_at: Utc::now(),
        };

        self.event_store
            .store_event(&event)
            .map_err(|e| DomainError::data_integrity("create_event", e))?;

        info!("Created event: {} with ID: {}", event.name, event.id);

        Ok(EventMapper::to_dto(event, Utc::now()))
    }

    /// Update an existing event. Fields left as None stay unchanged;
    /// `draft: Some(true)` takes the event off the published calendar.
    pub fn update_event(
        &self,
        actor: &Session,
        command: UpdateEventCommand,
    ) -> DomainResult<shared::Event> {
        info!("Updating event: {}", command.event_id);

        self.authorization.ensure(actor.role, Action::UpdateEvent)?;

        if let Some(ref name) = command.name {
            self.validate_name(name)?;
        }
        if let Some(capacity) = command.capacity {
            self.validate_capacity(capacity)?;
        }
        let new_date = match command.date {
            Some(ref raw) => Some(Self::parse_date(raw)?),
            None => None,
        };

        let mut event = self
            .event_store
            .get_event(&command.event_id)
            .map_err(|e| DomainError::data_integrity("update_event", e))?
            .ok_or_else(|| DomainError::EventNotFound {
                event_id: command.event_id.clone(),
            })?;

        let club = self
            .club_store
            .get_club(&event.club_id)
            .map_err(|e| DomainError::data_integrity("update_event", e))?
            .ok_or_else(|| DomainError::ClubNotFound {
                club_id: event.club_id.clone(),
            })?;
        if !club.active {
            return Err(DomainError::ClubInactive { club_id: club.id });
        }

        if let Some(name) = command.name {
            event.name = name.trim().to_string();
        }
        if let Some(description) = command.description {
            event.description = description;
        }
        if let Some(date) = new_date {
            event.date = date;
        }
        if let Some(location) = command.location {
            event.location = location;
        }
        if let Some(capacity) = command.capacity {
            event.capacity = capacity;
        }
        if let Some(draft) = command.draft {
            event.draft = draft;
        }

        self.event_store
            .update_event(&event)
            .map_err(|e| DomainError::data_integrity("update_event", e))?;

        info!("Updated event: {} with ID: {}", event.name, event.id);

        Ok(EventMapper::to_dto(event, Utc::now()))
    }

    /// Delete an event together with all of its registrations.
    pub fn delete_event(&self, actor: &Session, event_id: &str) -> DomainResult<()> {
        info!("Deleting event: {}", event_id);

        self.authorization.ensure(actor.role, Action::DeleteEvent)?;

        let deleted = self
            .event_store
            .delete_event(event_id)
            .map_err(|e| DomainError::data_integrity("delete_event", e))?;
        if !deleted {
            return Err(DomainError::EventNotFound {
                event_id: event_id.to_string(),
            });
        }

        // The registration lock has nothing left to guard
        self.registration_locks.lock().unwrap().remove(event_id);

        info!("Deleted event {} and its registrations", event_id);

        Ok(())
    }

    /// Register a user for an event.
    ///
    /// The whole check-then-insert runs under the event's registration
    /// lock, so concurrent calls against a capacity-N event admit exactly
    /// N and the rest fail `CapacityExceeded`.
    pub fn register(
        &self,
        actor: &Session,
        event_id: &str,
        user_id: &str,
    ) -> DomainResult<shared::EventParticipant> {
        info!("Registering user {} for event {}", user_id, event_id);

        self.authorization
            .ensure(actor.role, Action::RegisterParticipant)?;

        let lock = self.registration_lock(event_id);
        let _guard = lock.lock().unwrap();

        let event = self
            .event_store
            .get_event(event_id)
            .map_err(|e| DomainError::data_integrity("register", e))?
            .ok_or_else(|| DomainError::EventNotFound {
                event_id: event_id.to_string(),
            })?;

        let club = self
            .club_store
            .get_club(&event.club_id)
            .map_err(|e| DomainError::data_integrity("register", e))?
            .ok_or_else(|| DomainError::ClubNotFound {
                club_id: event.club_id.clone(),
            })?;
        if !club.active {
            return Err(DomainError::ClubInactive { club_id: club.id });
        }

        let now = Utc::now();
        if event.phase_at(now) != EventPhase::Open {
            warn!(
                "Registration refused: event {} is {:?}",
                event.id,
                event.phase_at(now)
            );
            return Err(DomainError::RegistrationClosed {
                event_id: event.id,
                event_date: event.date,
            });
        }

        let user = self
            .user_store
            .get_user(user_id)
            .map_err(|e| DomainError::data_integrity("register", e))?;
        // A deactivated account cannot register; it is reported the same
        // as a missing one
        let user = match user {
            Some(user) if user.active => user,
            _ => {
                return Err(DomainError::UserNotFound {
                    user_id: user_id.to_string(),
                })
            }
        };

        let existing = self
            .event_store
            .get_participant(&event.id, &user.id)
            .map_err(|e| DomainError::data_integrity("register", e))?;
        if existing.is_some() {
            return Err(DomainError::AlreadyRegistered {
                user_id: user.id,
                event_id: event.id,
            });
        }

        if let Some(max) = event.capacity {
            let count = self
                .event_store
                .count_participants(&event.id)
                .map_err(|e| DomainError::data_integrity("register", e))?;
            if count >= max as usize {
                warn!("Event {} is full ({}/{})", event.id, count, max);
                return Err(DomainError::CapacityExceeded {
                    event_id: event.id,
                    max,
                });
            }
        }

        let participant = EventParticipant {
            event_id: event.id.clone(),
            user_id: user.id.clone(),
            status: AttendanceStatus::Registered,
            registered_at: now,
            attended_at: None,
        };

        self.event_store
            .store_participant(&participant)
            .map_err(|e| DomainError::data_integrity("register", e))?;

        info!("Registered user {} for event {}", user.id, event.id);

        Ok(EventMapper::participant_to_dto(participant))
    }

    /// Withdraw a registration, freeing its capacity slot.
    pub fn cancel_registration(
        &self,
        actor: &Session,
        event_id: &str,
        user_id: &str,
    ) -> DomainResult<()> {
        info!(
            "Cancelling registration of user {} for event {}",
            user_id, event_id
        );

        self.authorization
            .ensure(actor.role, Action::CancelRegistration)?;

        let event = self
            .event_store
            .get_event(event_id)
            .map_err(|e| DomainError::data_integrity("cancel_registration", e))?
            .ok_or_else(|| DomainError::EventNotFound {
                event_id: event_id.to_string(),
            })?;

        if event.phase_at(Utc::now()) != EventPhase::Open {
            return Err(DomainError::RegistrationClosed {
                event_id: event.id,
                event_date: event.date,
            });
        }

        let deleted = self
            .event_store
            .delete_participant(&event.id, user_id)
            .map_err(|e| DomainError::data_integrity("cancel_registration", e))?;
        if !deleted {
            return Err(DomainError::business_rule(
                "registration_exists",
                format!("user {} is not registered for event {}", user_id, event.id),
            ));
        }

        info!(
            "Cancelled registration of user {} for event {}",
            user_id, event.id
        );

        Ok(())
    }

    /// Record whether a registered participant attended.
    ///
    /// Only valid once the event date has passed, unless on-site check-in
    /// is enabled in the configuration. Re-recording overwrites the prior
    /// outcome; it never duplicates rows.
    pub fn record_attendance(
        &self,
        actor: &Session,
        command: RecordAttendanceCommand,
    ) -> DomainResult<()> {
        info!(
            "Recording attendance for user {} at event {}: attended={}",
            command.user_id, command.event_id, command.attended
        );

        self.authorization
            .ensure(actor.role, Action::RecordAttendance)?;

        let event = self
            .event_store
            .get_event(&command.event_id)
            .map_err(|e| DomainError::data_integrity("record_attendance", e))?
            .ok_or_else(|| DomainError::EventNotFound {
                event_id: command.event_id.clone(),
            })?;

        self.user_store
            .get_user(&command.user_id)
            .map_err(|e| DomainError::data_integrity("record_attendance", e))?
            .ok_or_else(|| DomainError::UserNotFound {
                user_id: command.user_id.clone(),
            })?;

        let registered = self
            .event_store
            .get_participant(&event.id, &command.user_id)
            .map_err(|e| DomainError::data_integrity("record_attendance", e))?;
        if registered.is_none() {
            return Err(DomainError::business_rule(
                "attendance_requires_registration",
                format!(
                    "user {} is not registered for event {}",
                    command.user_id, event.id
                ),
            ));
        }

        let now = Utc::now();
        if !event.has_started(now) && !self.config.allow_onsite_checkin {
            return Err(DomainError::business_rule(
                "attendance_after_event",
                format!("event {} has not started yet", event.id),
            ));
        }

        let status = if command.attended {
            AttendanceStatus::Attended
        } else {
            AttendanceStatus::Absent
        };

        self.event_store
            .update_participant_status(&event.id, &command.user_id, status, now)
            .map_err(|e| DomainError::data_integrity("record_attendance", e))?;

        info!(
            "Recorded {:?} for user {} at event {}",
            status, command.user_id, event.id
        );

        Ok(())
    }

    /// Aggregate registration numbers for one event.
    pub fn compute_statistics(&self, event_id: &str) -> DomainResult<shared::EventStatistics> {
        info!("Computing statistics for event {}", event_id);

        let event = self
            .event_store
            .get_event(event_id)
            .map_err(|e| DomainError::data_integrity("compute_statistics", e))?
            .ok_or_else(|| DomainError::EventNotFound {
                event_id: event_id.to_string(),
            })?;

        let participants = self
            .event_store
            .list_participants(&event.id)
            .map_err(|e| DomainError::data_integrity("compute_statistics", e))?;

        let registered = participants.len();
        let attended = participants
            .iter()
            .filter(|p| p.status == AttendanceStatus::Attended)
            .count();
        let absent = participants
            .iter()
            .filter(|p| p.status == AttendanceStatus::Absent)
            .count();
        let pending = participants
            .iter()
            .filter(|p| p.status == AttendanceStatus::Registered)
            .count();

        let attendance_rate = if registered == 0 {
            0.0
        } else {
            attended as f64 / registered as f64
        };

        Ok(shared::EventStatistics {
            event_id: event.id,
            registered,
            attended,
            absent,
            pending,
            attendance_rate,
            capacity: event.capacity,
        })
    }

    /// Get an event by ID
    pub fn get_event(&self, event_id: &str) -> DomainResult<shared::Event> {
        debug!("Getting event: {}", event_id);

        let event = self
            .event_store
            .get_event(event_id)
            .map_err(|e| DomainError::data_integrity("get_event", e))?
            .ok_or_else(|| DomainError::EventNotFound {
                event_id: event_id.to_string(),
            })?;

        Ok(EventMapper::to_dto(event, Utc::now()))
    }

    /// List a club's events ordered by date
    pub fn list_events_by_club(&self, club_id: &str) -> DomainResult<Vec<shared::Event>> {
        debug!("Listing events for club {}", club_id);

        let events = self
            .event_store
            .list_events_for_club(club_id)
            .map_err(|e| DomainError::data_integrity("list_events_by_club", e))?;

        let now = Utc::now();
        Ok(events
            .into_iter()
            .map(|event| EventMapper::to_dto(event, now))
            .collect())
    }

    /// List a club's open events, soonest first
    pub fn list_upcoming(&self, club_id: &str) -> DomainResult<Vec<shared::Event>> {
        debug!("Listing upcoming events for club {}", club_id);

        let events = self
            .event_store
            .list_events_for_club(club_id)
            .map_err(|e| DomainError::data_integrity("list_upcoming", e))?;

        // The store returns events ordered by date, so filtering keeps
        // the soonest first
        let now = Utc::now();
        Ok(events
            .into_iter()
            .filter(|event| event.phase_at(now) == EventPhase::Open)
            .map(|event| EventMapper::to_dto(event, now))
            .collect())
    }

    fn registration_lock(&self, event_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.registration_locks.lock().unwrap();
        locks
            .entry(event_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Validate an event name
    fn validate_name(&self, name: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::validation_failed("name", "must not be empty"));
        }
        Ok(())
    }

    /// Validate a capacity limit
    fn validate_capacity(&self, capacity: Option<u32>) -> DomainResult<()> {
        if capacity == Some(0) {
            return Err(DomainError::invalid_parameters(
                "capacity",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    fn parse_date(raw: &str) -> DomainResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|_| {
                DomainError::invalid_parameters("date", "must be an RFC 3339 timestamp")
            })
    }
}
