//! Domain entities for the club manager.

pub mod club;
pub mod event;
pub mod report;
pub mod user;

pub use club::Club;
pub use event::{AttendanceStatus, Event, EventParticipant, EventPhase};
pub use report::{Report, ReportKind, Semester, SemesterParseError, Term};
pub use user::{User, UserRole};
