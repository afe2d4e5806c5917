//! # Club Manager Backend
//!
//! Contains all non-UI logic for the club management application.
//!
//! This crate is the orchestration layer that brings together:
//! - **Domain**: Business logic and rules for accounts, clubs, events and reports
//! - **Storage**: Data persistence behind the store traits
//! - **Config**: The YAML-file configuration the host loads at startup
//!
//! The backend is UI-agnostic: a desktop shell, a CLI or a test harness all
//! drive it the same way. A host authenticates through the
//! [`UserService`](domain::UserService), reads the acting
//! [`Session`](domain::Session) from [`AppState::session`] and passes it
//! into every gated operation.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Host (UI shell, tests)
//!     ↓
//! Domain Layer (services, authorization, session)
//!     ↓
//! Storage Layer (store traits, in-memory repositories)
//! ```

pub mod auth;
pub mod config;
pub mod domain;
pub mod storage;

use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::config::{BackendConfig, BootstrapAdmin};
use crate::domain::models::user::{User as DomainUser, UserRole};

pub use domain::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub club_service: ClubService,
    pub event_service: EventService,
    pub report_service: ReportService,
    pub authorization: AuthorizationService,
    pub session: SessionState,
}

impl AppState {
    /// Wire the services against caller-provided stores.
    ///
    /// Hosts bringing their own persistence implement the four store
    /// traits and build the state from them; everything above the traits
    /// behaves identically.
    pub fn with_stores(
        user_store: Arc<dyn UserStore>,
        club_store: Arc<dyn ClubStore>,
        event_store: Arc<dyn EventStore>,
        report_store: Arc<dyn ReportStore>,
        config: BackendConfig,
    ) -> Self {
        let authorization = AuthorizationService::new();
        let session = SessionState::new();

        let user_service = UserService::new(
            user_store.clone(),
            club_store.clone(),
            authorization.clone(),
            session.clone(),
        );
        let club_service = ClubService::new(
            club_store.clone(),
            user_store.clone(),
            event_store.clone(),
            authorization.clone(),
        );
        let event_service = EventService::new(
            event_store,
            user_store.clone(),
            club_store,
            config,
            authorization.clone(),
        );
        let report_service = ReportService::new(
            report_store,
            club_service.clone(),
            event_service.clone(),
            user_store,
            authorization.clone(),
        );

        AppState {
            user_service,
            club_service,
            event_service,
            report_service,
            authorization,
            session,
        }
    }
}

/// Initialize the backend with all required services.
///
/// Wires the services against the in-memory store and seeds the bootstrap
/// admin from the configuration, so a fresh install has an account that
/// can log in and create everything else.
pub fn initialize_backend(config: BackendConfig) -> Result<AppState> {
    info!("Setting up storage");
    let connection = Arc::new(MemoryConnection::new());
    let user_store: Arc<dyn UserStore> = Arc::new(UserRepository::new(connection.clone()));
    let club_store: Arc<dyn ClubStore> = Arc::new(ClubRepository::new(connection.clone()));
    let event_store: Arc<dyn EventStore> = Arc::new(EventRepository::new(connection.clone()));
    let report_store: Arc<dyn ReportStore> = Arc::new(ReportRepository::new(connection));

    info!("Setting up domain model");
    let app_state = AppState::with_stores(
        user_store.clone(),
        club_store,
        event_store,
        report_store,
        config.clone(),
    );

    if let Some(admin) = config.bootstrap_admin {
        seed_bootstrap_admin(&user_store, admin)?;
    }

    Ok(app_state)
}

/// Store the configured admin account unless its email is already taken.
fn seed_bootstrap_admin(user_store: &Arc<dyn UserStore>, admin: BootstrapAdmin) -> Result<()> {
    if user_store.get_user_by_email(&admin.email)?.is_some() {
        info!("Bootstrap admin {} already on file", admin.email);
        return Ok(());
    }

    let password_hash = auth::hash_password(&admin.password)
        .map_err(|e| anyhow::anyhow!("hashing the bootstrap admin password failed: {}", e))?;

    let user = DomainUser {
        id: DomainUser::generate_id(),
        full_name: admin.full_name,
        email: admin.email,
        // The bootstrap admin is staff, not a student
        student_id: String::new(),
        role: UserRole::Admin,
        password_hash,
        joined_at: Utc::now(),
        active: true,
        club_id: None,
    };

    info!("Seeding bootstrap admin {}", user.email);
    user_store.store_user(&user)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::clubs::{AssignLeadershipCommand, CreateClubCommand};
    use crate::domain::commands::events::{CreateEventCommand, RecordAttendanceCommand};
    use crate::domain::commands::reports::GenerateReportCommand;
    use crate::domain::commands::users::{AssignClubCommand, AuthenticateCommand, CreateUserCommand};
    use crate::domain::errors::DomainError;
    use crate::domain::models::report::ReportKind;
    use crate::domain::session::Session;
    use chrono::{Datelike, Duration};

    fn bootstrap_config() -> BackendConfig {
        BackendConfig {
            // Check-in at the door, so attendance can be recorded while
            // the event is still upcoming
            allow_onsite_checkin: true,
            bootstrap_admin: Some(BootstrapAdmin {
                full_name: "Site Admin".to_string(),
                email: "admin@school.edu".to_string(),
                password: "chair-the-meeting".to_string(),
            }),
        }
    }

    fn login(app_state: &AppState, email: &str, password: &str) -> Session {
        app_state
            .user_service
            .authenticate(AuthenticateCommand {
                email: email.to_string(),
                password: password.to_string(),
            })
            .unwrap();
        app_state.session.current().unwrap()
    }

    fn create_member(
        app_state: &AppState,
        actor: &Session,
        full_name: &str,
        email: &str,
    ) -> shared::User {
        app_state
            .user_service
            .create_user(
                actor,
                CreateUserCommand {
                    full_name: full_name.to_string(),
                    email: email.to_string(),
                    student_id: format!("S-{}", email.len()),
                    password: "correct horse".to_string(),
                    role: UserRole::Member,
                },
            )
            .unwrap()
    }

    /// Semester tag covering the given moment
    fn semester_for(moment: chrono::DateTime<Utc>) -> String {
        let term = if moment.month() <= 6 { "Spring" } else { "Fall" };
        format!("{}-{}", moment.year(), term)
    }

    #[test]
    fn test_initialize_backend_seeds_bootstrap_admin() {
        let app_state = initialize_backend(bootstrap_config()).unwrap();

        let result = app_state
            .user_service
            .authenticate(AuthenticateCommand {
                email: "admin@school.edu".to_string(),
                password: "chair-the-meeting".to_string(),
            })
            .unwrap();

        assert_eq!(result.user.role, shared::UserRole::Admin);
        assert!(app_state.session.is_logged_in());
    }

    #[test]
    fn test_initialize_backend_without_bootstrap_admin() {
        let app_state = initialize_backend(BackendConfig::default()).unwrap();

        let result = app_state.user_service.authenticate(AuthenticateCommand {
            email: "admin@school.edu".to_string(),
            password: "chair-the-meeting".to_string(),
        });

        assert!(matches!(
            result.unwrap_err(),
            DomainError::InvalidCredentials
        ));
        assert!(!app_state.session.is_logged_in());
    }

    #[test]
    fn test_bootstrap_admin_not_duplicated_when_email_taken() {
        let connection = Arc::new(MemoryConnection::new());
        let user_store: Arc<dyn UserStore> = Arc::new(UserRepository::new(connection.clone()));
        let existing = DomainUser {
            id: "user::existing".to_string(),
            full_name: "Existing Admin".to_string(),
            email: "admin@school.edu".to_string(),
            student_id: String::new(),
            role: UserRole::Admin,
            password_hash: String::new(),
            joined_at: Utc::now(),
            active: true,
            club_id: None,
        };
        user_store.store_user(&existing).unwrap();

        seed_bootstrap_admin(
            &user_store,
            BootstrapAdmin {
                full_name: "Site Admin".to_string(),
                email: "admin@school.edu".to_string(),
                password: "chair-the-meeting".to_string(),
            },
        )
        .unwrap();

        assert_eq!(user_store.list_users().unwrap().len(), 1);
        let kept = user_store
            .get_user_by_email("admin@school.edu")
            .unwrap()
            .unwrap();
        assert_eq!(kept.id, "user::existing");
    }

    #[test]
    fn test_with_stores_runs_against_caller_provided_stores() {
        let connection = Arc::new(MemoryConnection::new());
        let user_store: Arc<dyn UserStore> = Arc::new(UserRepository::new(connection.clone()));
        let hash = auth::hash_password("correct horse").unwrap();
        user_store
            .store_user(&DomainUser {
                id: "user::seeded".to_string(),
                full_name: "Seeded User".to_string(),
                email: "seeded@school.edu".to_string(),
                student_id: "S-1".to_string(),
                role: UserRole::Member,
                password_hash: hash,
                joined_at: Utc::now(),
                active: true,
                club_id: None,
            })
            .unwrap();

        let app_state = AppState::with_stores(
            user_store,
            Arc::new(ClubRepository::new(connection.clone())),
            Arc::new(EventRepository::new(connection.clone())),
            Arc::new(ReportRepository::new(connection)),
            BackendConfig::default(),
        );

        let result = app_state
            .user_service
            .authenticate(AuthenticateCommand {
                email: "seeded@school.edu".to_string(),
                password: "correct horse".to_string(),
            })
            .unwrap();
        assert_eq!(result.user.id, "user::seeded");
    }

    /// One semester of club life, end to end: the admin sets up the club
    /// and its people, members register for an event up to capacity, a
    /// team leader records attendance and the vice chairman reports on it.
    #[test]
    fn test_club_semester_scenario() {
        let app_state = initialize_backend(bootstrap_config()).unwrap();

        // Admin sets up accounts and the club
        let admin = login(&app_state, "admin@school.edu", "chair-the-meeting");

        let amira = create_member(&app_state, &admin, "Amira Hassan", "amira@school.edu");
        let bo = create_member(&app_state, &admin, "Bo Lin", "bo@school.edu");
        let caleb = create_member(&app_state, &admin, "Caleb Ortiz", "caleb@school.edu");
        let dina = create_member(&app_state, &admin, "Dina Petrov", "dina@school.edu");
        let eli = create_member(&app_state, &admin, "Eli Moreau", "eli@school.edu");
        let fay = create_member(&app_state, &admin, "Fay Okafor", "fay@school.edu");

        let club = app_state
            .club_service
            .create_club(
                &admin,
                CreateClubCommand {
                    name: "Robotics".to_string(),
                    description: "Builds and races robots".to_string(),
                    established: "2019-09-01".to_string(),
                },
            )
            .unwrap();

        for user in [&amira, &bo, &caleb, &dina, &eli, &fay] {
            app_state
                .user_service
                .assign_club(
                    &admin,
                    AssignClubCommand {
                        user_id: user.id.clone(),
                        club_id: Some(club.id.clone()),
                    },
                )
                .unwrap();
        }

        for (user, role) in [
            (&amira, UserRole::Chairman),
            (&bo, UserRole::ViceChairman),
            (&caleb, UserRole::TeamLeader),
        ] {
            app_state
                .club_service
                .assign_leadership(
                    &admin,
                    AssignLeadershipCommand {
                        club_id: club.id.clone(),
                        user_id: user.id.clone(),
                        role,
                    },
                )
                .unwrap();
        }

        // A workshop next week, capped at two seats
        let workshop_date = Utc::now() + Duration::days(7);
        let workshop = app_state
            .event_service
            .create_event(
                &admin,
                CreateEventCommand {
                    club_id: club.id.clone(),
                    name: "Soldering Workshop".to_string(),
                    description: "Hands-on intro".to_string(),
                    date: workshop_date.to_rfc3339(),
                    location: "Lab 2".to_string(),
                    capacity: Some(2),
                },
            )
            .unwrap();

        // A member fills the seats first come, first served
        let member = login(&app_state, "dina@school.edu", "correct horse");
        app_state
            .event_service
            .register(&member, &workshop.id, &dina.id)
            .unwrap();
        app_state
            .event_service
            .register(&member, &workshop.id, &eli.id)
            .unwrap();
        let full = app_state
            .event_service
            .register(&member, &workshop.id, &fay.id);
        assert!(matches!(
            full.unwrap_err(),
            DomainError::CapacityExceeded { max: 2, .. }
        ));

        // A freed seat goes to the next member
        app_state
            .event_service
            .cancel_registration(&member, &workshop.id, &eli.id)
            .unwrap();
        app_state
            .event_service
            .register(&member, &workshop.id, &fay.id)
            .unwrap();

        // On-site check-in is enabled, so the team leader records
        // attendance at the door
        let leader = login(&app_state, "caleb@school.edu", "correct horse");
        app_state
            .event_service
            .record_attendance(
                &leader,
                RecordAttendanceCommand {
                    event_id: workshop.id.clone(),
                    user_id: dina.id.clone(),
                    attended: true,
                },
            )
            .unwrap();
        app_state
            .event_service
            .record_attendance(
                &leader,
                RecordAttendanceCommand {
                    event_id: workshop.id.clone(),
                    user_id: fay.id.clone(),
                    attended: false,
                },
            )
            .unwrap();

        let stats = app_state
            .event_service
            .compute_statistics(&workshop.id)
            .unwrap();
        assert_eq!(stats.registered, 2);
        assert_eq!(stats.attended, 1);
        assert_eq!(stats.absent, 1);
        assert!((stats.attendance_rate - 0.5).abs() < f64::EPSILON);

        // The vice chairman reports on the semester
        let vice = login(&app_state, "bo@school.edu", "correct horse");
        let report = app_state
            .report_service
            .generate(
                &vice,
                GenerateReportCommand {
                    kind: ReportKind::ActivityTracking,
                    club_id: club.id.clone(),
                    semester: semester_for(workshop_date),
                    author_id: bo.id.clone(),
                },
            )
            .unwrap();

        let content: serde_json::Value = serde_json::from_str(&report.content).unwrap();
        assert_eq!(content["events_held"], 1);
        assert_eq!(content["total_registrations"], 2);

        let leadership = app_state
            .report_service
            .generate(
                &vice,
                GenerateReportCommand {
                    kind: ReportKind::ClubLeadership,
                    club_id: club.id.clone(),
                    semester: semester_for(workshop_date),
                    author_id: bo.id,
                },
            )
            .unwrap();
        let roster: serde_json::Value = serde_json::from_str(&leadership.content).unwrap();
        assert_eq!(roster["chairman"], "Amira Hassan");
        assert_eq!(roster["vice_chairmen"][0], "Bo Lin");
        assert_eq!(roster["team_leaders"][0], "Caleb Ortiz");

        let summaries = app_state.report_service.get_summaries(&club.id).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, leadership.id);

        // A member cannot see the admin surface
        let denied = app_state.club_service.deactivate(&member, &club.id);
        assert!(matches!(
            denied.unwrap_err(),
            DomainError::InsufficientPermissions { .. }
        ));
    }

    #[test]
    fn test_services_share_one_session_slot() {
        let app_state = initialize_backend(bootstrap_config()).unwrap();

        login(&app_state, "admin@school.edu", "chair-the-meeting");
        let first = app_state.session.current().unwrap();

        // current_user resolves through the same slot the login installed
        let current = app_state.user_service.current_user().unwrap().unwrap();
        assert_eq!(current.id, first.user_id);

        app_state.user_service.logout().unwrap();
        assert!(app_state.session.current().is_none());
        assert!(app_state.user_service.current_user().unwrap().is_none());
    }
}
