//! Conversions from domain club types to their boundary projections.

use crate::domain::models::club::Club as DomainClub;
use shared::Club as SharedClub;

/// Mapper to convert domain club models into shared DTOs.
pub struct ClubMapper;

impl ClubMapper {
    /// Convert a domain club to a shared Club DTO.
    pub fn to_dto(domain: DomainClub) -> SharedClub {
        SharedClub {
            id: domain.id,
            name: domain.name,
            description: domain.description,
            established: domain.established.format("%Y-%m-%d").to_string(),
            active: domain.active,
        }
    }
}
