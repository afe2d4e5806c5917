//! Domain error taxonomy.
//!
//! Every service operation fails with a [`DomainError`]; callers can rely
//! on this enum being the complete set of business failures. Storage
//! problems surface through [`DomainError::DataIntegrity`] with the failing
//! operation attached, so a raw I/O error never reaches the boundary
//! unclassified, and nothing in the domain panics.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::authorization_service::Action;
use crate::domain::models::report::ReportKind;
use crate::domain::models::user::UserRole;

#[derive(Debug, Error)]
pub enum DomainError {
    // Users and sessions
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("A user with email '{email}' already exists")]
    UserAlreadyExists { email: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{action} requires {required} or above")]
    InsufficientPermissions { action: Action, required: UserRole },

    // Clubs
    #[error("Club not found: {club_id}")]
    ClubNotFound { club_id: String },

    #[error("A club named '{name}' already exists")]
    ClubAlreadyExists { name: String },

    #[error("Club is inactive: {club_id}")]
    ClubInactive { club_id: String },

    // Events and registration
    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("Registration for event {event_id} is closed (event date {event_date})")]
    RegistrationClosed {
        event_id: String,
        event_date: DateTime<Utc>,
    },

    #[error("User {user_id} is already registered for event {event_id}")]
    AlreadyRegistered { user_id: String, event_id: String },

    #[error("Event {event_id} is full (capacity {max})")]
    CapacityExceeded { event_id: String, max: u32 },

    // Reports
    #[error("Report not found: {report_id}")]
    ReportNotFound { report_id: String },

    #[error("Generating {kind} report failed: {cause}")]
    ReportGenerationFailed { kind: ReportKind, cause: String },

    // Cross-cutting
    #[error("Invalid parameter '{param}': {reason}")]
    InvalidParameters { param: String, reason: String },

    #[error("Validation failed for '{field}': {rule}")]
    ValidationFailed { field: String, rule: String },

    #[error("Business rule '{rule}' violated: {reason}")]
    BusinessRuleViolation { rule: String, reason: String },

    #[error("Storage failure during {operation}")]
    DataIntegrity {
        operation: String,
        #[source]
        cause: anyhow::Error,
    },
}

impl DomainError {
    /// Wrap a storage error with the name of the failing operation.
    pub fn data_integrity(operation: impl Into<String>, cause: anyhow::Error) -> Self {
        DomainError::DataIntegrity {
            operation: operation.into(),
            cause,
        }
    }

    pub fn invalid_parameters(param: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::InvalidParameters {
            param: param.into(),
            reason: reason.into(),
        }
    }

    pub fn validation_failed(field: impl Into<String>, rule: impl Into<String>) -> Self {
        DomainError::ValidationFailed {
            field: field.into(),
            rule: rule.into(),
        }
    }

    pub fn business_rule(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::BusinessRuleViolation {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_error_messages() {
        let cases = vec![
            (
                DomainError::UserNotFound {
                    user_id: "user::42".to_string(),
                },
                "User not found: user::42",
            ),
            (
                DomainError::InvalidCredentials,
                "Invalid email or password",
            ),
            (
                DomainError::UserAlreadyExists {
                    email: "noor@school.edu".to_string(),
                },
                "A user with email 'noor@school.edu' already exists",
            ),
            (
                DomainError::CapacityExceeded {
                    event_id: "event::7".to_string(),
                    max: 30,
                },
                "Event event::7 is full (capacity 30)",
            ),
            (
                DomainError::validation_failed("full_name", "must not be empty"),
                "Validation failed for 'full_name': must not be empty",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected, "message for {:?}", error);
        }
    }

    #[test]
    fn test_insufficient_permissions_names_threshold() {
        let error = DomainError::InsufficientPermissions {
            action: Action::CreateClub,
            required: UserRole::Admin,
        };
        let message = error.to_string();
        assert!(message.contains("CreateClub"), "got: {}", message);
        assert!(message.contains("Admin"), "got: {}", message);
    }

    #[test]
    fn test_data_integrity_keeps_source() {
        let error = DomainError::data_integrity("create_user", anyhow!("disk full"));
        assert!(error.to_string().contains("create_user"));
        let source = std::error::Error::source(&error).expect("source attached");
        assert!(source.to_string().contains("disk full"));
    }
}
