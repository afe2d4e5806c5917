//! Domain-level command types.
//! These structs are the inputs of service operations inside the domain
//! layer and are **not** exposed over the public API. A frontend maps the
//! DTOs defined in the `shared` crate to these internal types; service
//! outputs are already DTO projections.

pub mod users {
    use crate::domain::models::user::UserRole;

    /// Credentials presented at login.
    #[derive(Debug, Clone)]
    pub struct AuthenticateCommand {
        pub email: String,
        pub password: String,
    }

    /// Successful login: the account and the installed session snapshot.
    #[derive(Debug, Clone)]
    pub struct AuthenticateResult {
        pub user: shared::User,
        pub session: shared::SessionInfo,
    }

    /// Input for creating a new user account.
    #[derive(Debug, Clone)]
    pub struct CreateUserCommand {
        pub full_name: String,
        pub email: String,
        pub student_id: String,
        /// Plaintext password, hashed before storage
        pub password: String,
        pub role: UserRole,
    }

    /// Input for updating an existing account. None fields stay unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateUserCommand {
        pub user_id: String,
        pub full_name: Option<String>,
        pub email: Option<String>,
        pub student_id: Option<String>,
        pub password: Option<String>,
    }

    /// Input for moving a user between clubs. `club_id: None` clears the
    /// affiliation and demotes any leadership role back to Member.
    #[derive(Debug, Clone)]
    pub struct AssignClubCommand {
        pub user_id: String,
        pub club_id: Option<String>,
    }
}

pub mod clubs {
    use crate::domain::models::user::UserRole;

    /// Input for creating a new club.
    #[derive(Debug, Clone)]
    pub struct CreateClubCommand {
        pub name: String,
        pub description: String,
        /// Founding date (ISO 8601, YYYY-MM-DD)
        pub established: String,
    }

    /// Input for updating a club. None fields stay unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateClubCommand {
        pub club_id: String,
        pub name: Option<String>,
        pub description: Option<String>,
    }

    /// Input for assigning a leadership position. The role must be
    /// Chairman, ViceChairman or TeamLeader.
    #[derive(Debug, Clone)]
    pub struct AssignLeadershipCommand {
        pub club_id: String,
        pub user_id: String,
        pub role: UserRole,
    }
}

pub mod events {
    /// Input for creating a new event. Events always start published
    /// and open for registration.
    #[derive(Debug, Clone)]
    pub struct CreateEventCommand {
        pub club_id: String,
        pub name: String,
        pub description: String,
        /// Scheduled start (RFC 3339)
        pub date: String,
        pub location: String,
        /// None means unlimited
        pub capacity: Option<u32>,
    }

    /// Input for updating an event. None fields stay unchanged;
    /// `capacity: Some(None)` removes the cap, `draft: Some(true)`
    /// un-publishes the event.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateEventCommand {
        pub event_id: String,
        pub name: Option<String>,
        pub description: Option<String>,
        pub date: Option<String>,
        pub location: Option<String>,
        pub capacity: Option<Option<u32>>,
        pub draft: Option<bool>,
    }

    /// Input for recording one participant's attendance outcome.
    #[derive(Debug, Clone)]
    pub struct RecordAttendanceCommand {
        pub event_id: String,
        pub user_id: String,
        /// true marks Attended, false marks Absent
        pub attended: bool,
    }
}

pub mod reports {
    use crate::domain::models::report::ReportKind;

    /// Input for generating a report snapshot.
    #[derive(Debug, Clone)]
    pub struct GenerateReportCommand {
        pub kind: ReportKind,
        pub club_id: String,
        /// Semester tag like "2026-Spring"
        pub semester: String,
        pub author_id: String,
    }
}
