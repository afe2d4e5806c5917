use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a member account as exposed at the boundary.
///
/// The password hash never leaves the backend; this projection carries
/// everything a frontend needs to render an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User ID in format: "user::<uuid>"
    pub id: String,
    pub full_name: String,
    /// Globally unique, compared case-insensitively
    pub email: String,
    pub student_id: String,
    pub role: UserRole,
    /// Deactivated accounts stay on file but cannot log in
    pub active: bool,
    /// Club the user belongs to, if any
    pub club_id: Option<String>,
    pub joined_at: String, // RFC 3339 timestamp
}

/// Role held by a user, ordered from least to most privileged.
/// Inside a club, the role doubles as the leadership position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Member,
    TeamLeader,
    ViceChairman,
    Chairman,
    Admin,
}

impl UserRole {
    /// Human-readable label for rendering
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Member => "Member",
            UserRole::TeamLeader => "Team Leader",
            UserRole::ViceChairman => "Vice Chairman",
            UserRole::Chairman => "Chairman",
            UserRole::Admin => "Administrator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Represents a club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    /// Club ID in format: "club::<uuid>"
    pub id: String,
    pub name: String,
    pub description: String,
    pub established: String, // ISO 8601 date format (YYYY-MM-DD)
    /// Inactive clubs keep their history but accept no new activity
    pub active: bool,
}

/// Represents a club event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event ID in format: "event::<uuid>"
    pub id: String,
    pub club_id: String,
    pub name: String,
    pub description: String,
    /// Scheduled start (RFC 3339)
    pub date: String,
    pub location: String,
    /// Maximum number of participants; None means unlimited
    pub capacity: Option<u32>,
    /// Lifecycle phase derived from the draft flag and the event date
    pub phase: EventPhase,
    pub created_at: String, // RFC 3339 timestamp
}

/// Lifecycle phase of an event for rendering and registration logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPhase {
    /// Unpublished; invisible to registration
    Draft,
    /// Published and accepting registrations
    Open,
    /// The event date has been reached; registration is over
    Closed,
}

impl fmt::Display for EventPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventPhase::Draft => "Draft",
            EventPhase::Open => "Open",
            EventPhase::Closed => "Closed",
        };
        write!(f, "{}", label)
    }
}

/// A user's registration for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventParticipant {
    pub event_id: String,
    pub user_id: String,
    pub status: AttendanceStatus,
    pub registered_at: String, // RFC 3339 timestamp
    /// Set when attendance was recorded (RFC 3339)
    pub attended_at: Option<String>,
}

/// Attendance outcome for a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Registered, attendance not yet recorded
    Registered,
    Attended,
    Absent,
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttendanceStatus::Registered => "Registered",
            AttendanceStatus::Attended => "Attended",
            AttendanceStatus::Absent => "Absent",
        };
        write!(f, "{}", label)
    }
}

/// Member counts by role for one club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RoleBreakdown {
    pub admins: usize,
    pub chairmen: usize,
    pub vice_chairmen: usize,
    pub team_leaders: usize,
    pub members: usize,
}

/// Event counts by lifecycle phase for one club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EventPhaseCounts {
    pub draft: usize,
    pub open: usize,
    pub closed: usize,
}

/// Aggregated activity numbers for a single club
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubStatistics {
    pub club_id: String,
    pub active_members: usize,
    pub inactive_members: usize,
    pub role_breakdown: RoleBreakdown,
    pub event_counts: EventPhaseCounts,
    /// Attended registrations over total registrations across the club's
    /// events, 0.0 when nothing was registered
    pub attendance_rate: f64,
}

/// Aggregated registration numbers for a single event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventStatistics {
    pub event_id: String,
    /// Total registrations on file
    pub registered: usize,
    pub attended: usize,
    pub absent: usize,
    /// Registrations whose attendance has not been recorded yet
    pub pending: usize,
    /// attended / registered, 0.0 when nobody registered
    pub attendance_rate: f64,
    pub capacity: Option<u32>,
}

/// Kind of report that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    /// Member counts and role breakdown
    MemberStatistics,
    /// Per-event registration and attendance outcomes
    EventOutcomes,
    /// Events held, registrations and attendance across a semester
    ActivityTracking,
    /// Current leadership by name
    ClubLeadership,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportKind::MemberStatistics => "Member Statistics",
            ReportKind::EventOutcomes => "Event Outcomes",
            ReportKind::ActivityTracking => "Activity Tracking",
            ReportKind::ClubLeadership => "Club Leadership",
        };
        write!(f, "{}", label)
    }
}

/// A generated report, content included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Report ID in format: "report::<uuid>"
    pub id: String,
    pub title: String,
    pub kind: ReportKind,
    pub club_id: String,
    /// Semester tag, e.g. "2026-Spring"
    pub semester: String,
    pub author_id: String,
    pub generated_at: String, // RFC 3339 timestamp
    /// Immutable JSON snapshot captured at generation time
    pub content: String,
}

/// Listing projection of a report without its content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: String,
    pub title: String,
    pub kind: ReportKind,
    pub club_id: String,
    pub semester: String,
    pub author_id: String,
    pub generated_at: String, // RFC 3339 timestamp
}

/// The logged-in user as exposed at the boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
    pub logged_in_at: String, // RFC 3339 timestamp
}
