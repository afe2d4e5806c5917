//! Conversions from domain event types to their boundary projections.

use chrono::{DateTime, Utc};

use crate::domain::models::event::{
    AttendanceStatus as DomainStatus, Event as DomainEvent,
    EventParticipant as DomainParticipant, EventPhase as DomainPhase,
};
use shared::{
    AttendanceStatus as SharedStatus, Event as SharedEvent,
    EventParticipant as SharedParticipant, EventPhase as SharedPhase,
};

/// Mapper to convert domain event models into shared DTOs.
pub struct EventMapper;

impl EventMapper {
    pub fn phase_to_dto(phase: DomainPhase) -> SharedPhase {
        match phase {
            DomainPhase::Draft => SharedPhase::Draft,
            DomainPhase::Open => SharedPhase::Open,
            DomainPhase::Closed => SharedPhase::Closed,
        }
    }

    pub fn status_to_dto(status: DomainStatus) -> SharedStatus {
        match status {
            DomainStatus::Registered => SharedStatus::Registered,
            DomainStatus::Attended => SharedStatus::Attended,
            DomainStatus::Absent => SharedStatus::Absent,
        }
    }

    /// Convert a domain event to a shared Event DTO.
    ///
    /// The phase is evaluated against `now`, so the projection is a
    /// snapshot taken at mapping time rather than stored state.
    pub fn to_dto(domain: DomainEvent, now: DateTime<Utc>) -> SharedEvent {
        let phase = domain.phase_at(now);
        SharedEvent {
            id: domain.id,
            club_id: domain.club_id,
            name: domain.name,
            description: domain.description,
            date: domain.date.to_rfc3339(),
            location: domain.location,
            capacity: domain.capacity,
            phase: Self::phase_to_dto(phase),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    /// Convert a domain registration to a shared EventParticipant DTO.
    pub fn participant_to_dto(domain: DomainParticipant) -> SharedParticipant {
        SharedParticipant {
            event_id: domain.event_id,
            user_id: domain.user_id,
            status: Self::status_to_dto(domain.status),
            registered_at: domain.registered_at.to_rfc3339(),
            attended_at: domain.attended_at.map(|at| at.to_rfc3339()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_dto_snapshots_phase_at_mapping_time() {
        let date = Utc.with_ymd_and_hms(2026, 3, 14, 15, 0, 0).unwrap();
        let domain = DomainEvent {
            id: "event::1".to_string(),
            club_id: "club::1".to_string(),
            name: "Kickoff".to_string(),
            description: String::new(),
            date,
            location: "Lab 2".to_string(),
            capacity: Some(30),
            draft: false,
            created_at: Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0).unwrap(),
        };

        let before = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();

        assert_eq!(EventMapper::to_dto(domain.clone(), before).phase, SharedPhase::Open);
        assert_eq!(EventMapper::to_dto(domain, after).phase, SharedPhase::Closed);
    }

    #[test]
    fn test_participant_to_dto_keeps_optional_attendance_time() {
        let registered_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let pending = DomainParticipant {
            event_id: "event::1".to_string(),
            user_id: "user::1".to_string(),
            status: DomainStatus::Registered,
            registered_at,
            attended_at: None,
        };

        let dto = EventMapper::participant_to_dto(pending);
        assert_eq!(dto.status, SharedStatus::Registered);
        assert_eq!(dto.attended_at, None);

        let attended_at = Utc.with_ymd_and_hms(2026, 3, 14, 15, 5, 0).unwrap();
        let attended = DomainParticipant {
            event_id: "event::1".to_string(),
            user_id: "user::1".to_string(),
            status: DomainStatus::Attended,
            registered_at,
            attended_at: Some(attended_at),
        };

        let dto = EventMapper::participant_to_dto(attended);
        assert_eq!(dto.status, SharedStatus::Attended);
        assert_eq!(dto.attended_at, Some(attended_at.to_rfc3339()));
    }
}
