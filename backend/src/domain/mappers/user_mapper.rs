//! Conversions from domain user types to their boundary projections.

use crate::domain::models::user::{User as DomainUser, UserRole as DomainRole};
use crate::domain::session::Session;
use shared::{SessionInfo, User as SharedUser, UserRole as SharedRole};

/// Mapper to convert domain user models into shared DTOs.
///
/// Conversion is one-way on purpose: the password hash stays behind and
/// nothing at the boundary can be turned back into a stored account.
pub struct UserMapper;

impl UserMapper {
    /// Convert a domain role to its shared counterpart.
    pub fn role_to_dto(role: DomainRole) -> SharedRole {
        match role {
            DomainRole::Member => SharedRole::Member,
            DomainRole::TeamLeader => SharedRole::TeamLeader,
            DomainRole::ViceChairman => SharedRole::ViceChairman,
            DomainRole::Chairman => SharedRole::Chairman,
            DomainRole::Admin => SharedRole::Admin,
        }
    }

    /// Convert a domain user to a shared User DTO, dropping the password hash.
    pub fn to_dto(domain: DomainUser) -> SharedUser {
        SharedUser {
            id: domain.id,
            full_name: domain.full_name,
            email: domain.email,
            student_id: domain.student_id,
            role: Self::role_to_dto(domain.role),
            active: domain.active,
            club_id: domain.club_id,
            joined_at: domain.joined_at.to_rfc3339(),
        }
    }

    /// Convert a session snapshot to a shared SessionInfo DTO.
    pub fn session_to_dto(session: Session) -> SessionInfo {
        SessionInfo {
            user_id: session.user_id,
            email: session.email,
            role: Self::role_to_dto(session.role),
            logged_in_at: session.logged_in_at.to_rfc3339(),
        }
    }
}
