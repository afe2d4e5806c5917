//! Clubs, leadership positions and club-wide statistics.

use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::authorization_service::{Action, AuthorizationService};
use crate::domain::commands::clubs::{
    AssignLeadershipCommand, CreateClubCommand, UpdateClubCommand,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::mappers::ClubMapper;
use crate::domain::models::club::Club as DomainClub;
use crate::domain::models::event::{AttendanceStatus, EventPhase};
use crate::domain::models::user::UserRole;
use crate::domain::session::Session;
use crate::storage::traits::{ClubStore, EventStore, UserStore};

/// Service for managing clubs in the club management system
#[derive(Clone)]
pub struct ClubService {
    club_store: Arc<dyn ClubStore>,
    user_store: Arc<dyn UserStore>,
    event_store: Arc<dyn EventStore>,
    authorization: AuthorizationService,
}

impl ClubService {
    /// Create a new ClubService
    pub fn new(
        club_store: Arc<dyn ClubStore>,
        user_store: Arc<dyn UserStore>,
        event_store: Arc<dyn EventStore>,
        authorization: AuthorizationService,
    ) -> Self {
        Self {
            club_store,
            user_store,
            event_store,
            authorization,
        }
    }

    /// Create a new club
    pub fn create_club(
        &self,
        actor: &Session,
        command: CreateClubCommand,
    ) -> DomainResult<shared::Club> {
        info!("Creating club: name={}", command.name);

        self.authorization.ensure(actor.role, Action::CreateClub)?;

        self.validate_name(&command.name)?;
        let established = NaiveDate::parse_from_str(&command.established, "%Y-%m-%d")
            .map_err(|_| {
                DomainError::invalid_parameters(
                    "established",
                    "must be an ISO 8601 date (YYYY-MM-DD)",
                )
            })?;

        let name = command.name.trim().to_string();
        let existing = self
            .club_store
            .get_club_by_name(&name)
            .map_err(|e| DomainError::data_integrity("create_club", e))?;
        if existing.is_some() {
            return Err(DomainError::ClubAlreadyExists { name });
        }

        let club = DomainClub {
            id: DomainClub::generate_id(),
            name,
            description: command.description,
            established,
            active: true,
        };

        self.club_store
            .store_club(&club)
            .map_err(|e| DomainError::data_integrity("create_club", e))?;

        info!("Created club: {} with ID: {}", club.name, club.id);

        Ok(ClubMapper::to_dto(club))
    }

    /// Update an existing club. Fields left as None stay unchanged.
    pub fn update_club(
        &self,
        actor: &Session,
        command: UpdateClubCommand,
    ) -> DomainResult<shared::Club> {
        info!("Updating club: {}", command.club_id);

        self.authorization.ensure(actor.role, Action::UpdateClub)?;

        if let Some(ref name) = command.name {
            self.validate_name(name)?;
        }

        let mut club = self
            .club_store
            .get_club(&command.club_id)
            .map_err(|e| DomainError::data_integrity("update_club", e))?
            .ok_or_else(|| DomainError::ClubNotFound {
                club_id: command.club_id.clone(),
            })?;

        if !club.active {
            return Err(DomainError::ClubInactive { club_id: club.id });
        }

        if let Some(name) = command.name {
            let name = name.trim().to_string();
            let existing = self
                .club_store
                .get_club_by_name(&name)
                .map_err(|e| DomainError::data_integrity("update_club", e))?;
            if let Some(existing) = existing {
                if existing.id != club.id {
                    return Err(DomainError::ClubAlreadyExists { name });
                }
            }
            club.name = name;
        }
        if let Some(description) = command.description {
            club.description = description;
        }

        self.club_store
            .update_club(&club)
            .map_err(|e| DomainError::data_integrity("update_club", e))?;

        info!("Updated club: {} with ID: {}", club.name, club.id);

        Ok(ClubMapper::to_dto(club))
    }

    /// Retire a club. Its history stays on file but every mutation other
    /// than reactivation is refused from here on.
    pub fn deactivate(&self, actor: &Session, club_id: &str) -> DomainResult<()> {
        info!("Deactivating club: {}", club_id);

        self.authorization.ensure(actor.role, Action::DeactivateClub)?;

        let mut club = self
            .club_store
            .get_club(club_id)
            .map_err(|e| DomainError::data_integrity("deactivate", e))?
            .ok_or_else(|| DomainError::ClubNotFound {
                club_id: club_id.to_string(),
            })?;

        if !club.active {
            return Err(DomainError::ClubInactive { club_id: club.id });
        }

        club.active = false;
        self.club_store
            .update_club(&club)
            .map_err(|e| DomainError::data_integrity("deactivate", e))?;

        info!("Deactivated club: {}", club.id);

        Ok(())
    }

    /// Bring a retired club back. Reactivating an active club is a no-op.
    pub fn reactivate(&self, actor: &Session, club_id: &str) -> DomainResult<()> {
        info!("Reactivating club: {}", club_id);

        self.authorization.ensure(actor.role, Action::DeactivateClub)?;

        let mut club = self
            .club_store
            .get_club(club_id)
            .map_err(|e| DomainError::data_integrity("reactivate", e))?
            .ok_or_else(|| DomainError::ClubNotFound {
                club_id: club_id.to_string(),
            })?;

        if club.active {
            debug!("Club {} is already active", club.id);
            return Ok(());
        }

        club.active = true;
        self.club_store
            .update_club(&club)
            .map_err(|e| DomainError::data_integrity("reactivate", e))?;

        info!("Reactivated club: {}", club.id);

        Ok(())
    }

    /// Hand a leadership position to a member of the club.
    ///
    /// A club has at most one Chairman; assigning a new one demotes the
    /// incumbent to Member. Vice-chairman and team-leader positions are
    /// unbounded.
    pub fn assign_leadership(
        &self,
        actor: &Session,
        command: AssignLeadershipCommand,
    ) -> DomainResult<()> {
        info!(
            "Assigning {} as {} in club {}",
            command.user_id, command.role, command.club_id
        );

        self.authorization.ensure(actor.role, Action::AssignLeadership)?;

        if !matches!(
            command.role,
            UserRole::Chairman | UserRole::ViceChairman | UserRole::TeamLeader
        ) {
            return Err(DomainError::invalid_parameters(
                "role",
                "must be Chairman, ViceChairman or TeamLeader",
            ));
        }

        let club = self
            .club_store
            .get_club(&command.club_id)
            .map_err(|e| DomainError::data_integrity("assign_leadership", e))?
            .ok_or_else(|| DomainError::ClubNotFound {
                club_id: command.club_id.clone(),
            })?;
        if !club.active {
            return Err(DomainError::ClubInactive { club_id: club.id });
        }

        let mut user = self
            .user_store
            .get_user(&command.user_id)
            .map_err(|e| DomainError::data_integrity("assign_leadership", e))?
            .ok_or_else(|| DomainError::UserNotFound {
                user_id: command.user_id.clone(),
            })?;

        if !user.is_member_of(&club.id) {
            return Err(DomainError::business_rule(
                "leadership_requires_membership",
                format!("user {} is not a member of club {}", user.id, club.id),
            ));
        }

        if command.role == UserRole::Chairman {
            self.demote_incumbent_chairman(&club.id, &user.id)?;
        }

        user.role = command.role;
        self.user_store
            .update_user(&user)
            .map_err(|e| DomainError::data_integrity("assign_leadership", e))?;

        info!("User {} is now {} of club {}", user.id, user.role, club.id);

        Ok(())
    }

    /// Aggregate membership and event numbers for one club.
    ///
    /// Allowed on inactive clubs; reads never require the club to be
    /// active. The role breakdown covers every affiliated account,
    /// deactivated ones included.
    pub fn compute_statistics(&self, club_id: &str) -> DomainResult<shared::ClubStatistics> {
        info!("Computing statistics for club {}", club_id);

        let club = self
            .club_store
            .get_club(club_id)
            .map_err(|e| DomainError::data_integrity("compute_statistics", e))?
            .ok_or_else(|| DomainError::ClubNotFound {
                club_id: club_id.to_string(),
            })?;

        let users = self
            .user_store
            .list_users()
            .map_err(|e| DomainError::data_integrity("compute_statistics", e))?;

        let mut active_members = 0;
        let mut inactive_members = 0;
        let mut role_breakdown = shared::RoleBreakdown::default();
        for user in users.iter().filter(|u| u.is_member_of(&club.id)) {
            if user.active {
                active_members += 1;
            } else {
                inactive_members += 1;
            }
            match user.role {
                UserRole::Admin => role_breakdown.admins += 1,
                UserRole::Chairman => role_breakdown.chairmen += 1,
                UserRole::ViceChairman => role_breakdown.vice_chairmen += 1,
                UserRole::TeamLeader => role_breakdown.team_leaders += 1,
                UserRole::Member => role_breakdown.members += 1,
            }
        }

        let now = Utc::now();
        let events = self
            .event_store
            .list_events_for_club(&club.id)
            .map_err(|e| DomainError::data_integrity("compute_statistics", e))?;

        let mut event_counts = shared::EventPhaseCounts::default();
        let mut registered_total = 0;
        let mut attended_total = 0;
        for event in &events {
            match event.phase_at(now) {
                EventPhase::Draft => event_counts.draft += 1,
                EventPhase::Open => event_counts.open += 1,
                EventPhase::Closed => event_counts.closed += 1,
            }

            let participants = self
                .event_store
                .list_participants(&event.id)
                .map_err(|e| DomainError::data_integrity("compute_statistics", e))?;
            registered_total += participants.len();
            attended_total += participants
                .iter()
                .filter(|p| p.status == AttendanceStatus::Attended)
                .count();
        }

        let attendance_rate = if registered_total == 0 {
            0.0
        } else {
            attended_total as f64 / registered_total as f64
        };

        Ok(shared::ClubStatistics {
            club_id: club.id,
            active_members,
            inactive_members,
            role_breakdown,
            event_counts,
            attendance_rate,
        })
    }

    /// Get a club by ID
    pub fn get_club(&self, club_id: &str) -> DomainResult<shared::Club> {
        debug!("Getting club: {}", club_id);

        let club = self
            .club_store
            .get_club(club_id)
            .map_err(|e| DomainError::data_integrity("get_club", e))?;

        match club {
            Some(club) => Ok(ClubMapper::to_dto(club)),
            None => {
                warn!("Club not found: {}", club_id);
                Err(DomainError::ClubNotFound {
                    club_id: club_id.to_string(),
                })
            }
        }
    }

    /// List all clubs ordered by name
    pub fn list_clubs(&self) -> DomainResult<Vec<shared::Club>> {
        debug!("Listing all clubs");

        let clubs = self
            .club_store
            .list_clubs()
            .map_err(|e| DomainError::data_integrity("list_clubs", e))?;

        Ok(clubs.into_iter().map(ClubMapper::to_dto).collect())
    }

    fn demote_incumbent_chairman(&self, club_id: &str, incoming_user_id: &str) -> DomainResult<()> {
        let users = self
            .user_store
            .list_users()
            .map_err(|e| DomainError::data_integrity("assign_leadership", e))?;

        for mut incumbent in users {
            if incumbent.role == UserRole::Chairman
                && incumbent.is_member_of(club_id)
                && incumbent.id != incoming_user_id
            {
                info!(
                    "Demoting incumbent chairman {} of club {}",
                    incumbent.id, club_id
                );
                incumbent.role = UserRole::Member;
                self.user_store
                    .update_user(&incumbent)
                    .map_err(|e| DomainError::data_integrity("assign_leadership", e))?;
            }
        }

        Ok(())
    }

    /// Validate a club name
    fn validate_name(&self, name: &str) -> DomainResult<()> {
        if name.trim().is_empty() {
            return Err(DomainError::validation_failed("name", "must not be empty"));
        }
        if name.len() > 100 {
            return Err(DomainError::validation_failed(
                "name",
                "must not exceed 100 characters",
            ));
        }
        Ok(())
    }
}
