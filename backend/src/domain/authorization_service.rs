//! Role-based authorization.
//!
//! Every gated operation is an [`Action`] with a minimum role; the check is
//! a single comparison on the role order. Services call
//! [`AuthorizationService::ensure`] before touching any entity, so a denied
//! caller never causes a read or a partial write.

use log::warn;
use std::fmt;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::user::UserRole;

/// Everything a role can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateUser,
    UpdateUser,
    SetUserActive,
    AssignClubMembership,
    CreateClub,
    UpdateClub,
    DeactivateClub,
    AssignLeadership,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    RegisterParticipant,
    CancelRegistration,
    RecordAttendance,
    GenerateReport,
}

impl Action {
    /// Minimum role that may perform this action.
    pub fn required_role(&self) -> UserRole {
        match self {
            Action::CreateUser => UserRole::Admin,
            Action::UpdateUser => UserRole::Chairman,
            Action::SetUserActive => UserRole::Admin,
            Action::AssignClubMembership => UserRole::Chairman,
            Action::CreateClub => UserRole::Admin,
            Action::UpdateClub => UserRole::Chairman,
            Action::DeactivateClub => UserRole::Admin,
            Action::AssignLeadership => UserRole::Chairman,
            Action::CreateEvent => UserRole::TeamLeader,
            Action::UpdateEvent => UserRole::TeamLeader,
            Action::DeleteEvent => UserRole::Chairman,
            Action::RegisterParticipant => UserRole::Member,
            Action::CancelRegistration => UserRole::Member,
            Action::RecordAttendance => UserRole::TeamLeader,
            Action::GenerateReport => UserRole::ViceChairman,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug names are the catalog names
        write!(f, "{:?}", self)
    }
}

/// Service answering "may this role perform that action".
#[derive(Clone)]
pub struct AuthorizationService;

impl AuthorizationService {
    pub fn new() -> Self {
        Self
    }

    /// Check a role against an action's threshold.
    pub fn can_perform(&self, role: UserRole, action: Action) -> bool {
        role >= action.required_role()
    }

    /// Authorize or fail with the action and the role it requires; the
    /// caller propagates the error untouched.
    pub fn ensure(&self, role: UserRole, action: Action) -> DomainResult<()> {
        let required = action.required_role();
        if role >= required {
            return Ok(());
        }
        warn!("Denied {} (holds {}, needs {})", action, role, required);
        Err(DomainError::InsufficientPermissions { action, required })
    }
}

impl Default for AuthorizationService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_thresholds() {
        let cases = vec![
            (Action::CreateUser, UserRole::Admin),
            (Action::UpdateUser, UserRole::Chairman),
            (Action::SetUserActive, UserRole::Admin),
            (Action::AssignClubMembership, UserRole::Chairman),
            (Action::CreateClub, UserRole::Admin),
            (Action::UpdateClub, UserRole::Chairman),
            (Action::DeactivateClub, UserRole::Admin),
            (Action::AssignLeadership, UserRole::Chairman),
            (Action::CreateEvent, UserRole::TeamLeader),
            (Action::UpdateEvent, UserRole::TeamLeader),
            (Action::DeleteEvent, UserRole::Chairman),
            (Action::RegisterParticipant, UserRole::Member),
            (Action::CancelRegistration, UserRole::Member),
            (Action::RecordAttendance, UserRole::TeamLeader),
            (Action::GenerateReport, UserRole::ViceChairman),
        ];

        for (action, required) in cases {
            assert_eq!(action.required_role(), required, "threshold for {}", action);
        }
    }

    #[test]
    fn test_exact_threshold_passes() {
        let service = AuthorizationService::new();

        assert!(service.ensure(UserRole::TeamLeader, Action::CreateEvent).is_ok());
        assert!(service.ensure(UserRole::Member, Action::RegisterParticipant).is_ok());
        assert!(service.ensure(UserRole::ViceChairman, Action::GenerateReport).is_ok());
    }

    #[test]
    fn test_one_below_threshold_fails_with_context() {
        let service = AuthorizationService::new();

        let error = service
            .ensure(UserRole::ViceChairman, Action::DeleteEvent)
            .unwrap_err();
        match error {
            DomainError::InsufficientPermissions { action, required } => {
                assert_eq!(action, Action::DeleteEvent);
                assert_eq!(required, UserRole::Chairman);
            }
            other => panic!("expected InsufficientPermissions, got {:?}", other),
        }
    }

    #[test]
    fn test_admin_clears_every_action() {
        let service = AuthorizationService::new();
        let actions = [
            Action::CreateUser,
            Action::UpdateUser,
            Action::SetUserActive,
            Action::AssignClubMembership,
            Action::CreateClub,
            Action::UpdateClub,
            Action::DeactivateClub,
            Action::AssignLeadership,
            Action::CreateEvent,
            Action::UpdateEvent,
            Action::DeleteEvent,
            Action::RegisterParticipant,
            Action::CancelRegistration,
            Action::RecordAttendance,
            Action::GenerateReport,
        ];

        for action in actions {
            assert!(
                service.can_perform(UserRole::Admin, action),
                "admin denied {}",
                action
            );
        }
    }

    #[test]
    fn test_member_denied_chairman_gated_action() {
        let service = AuthorizationService::new();
        assert!(!service.can_perform(UserRole::Member, Action::AssignLeadership));
        assert!(service.ensure(UserRole::Member, Action::AssignLeadership).is_err());
    }
}
