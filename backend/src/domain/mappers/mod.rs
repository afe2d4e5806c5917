//! Mappers from domain models to the DTO projections in `shared`.
//!
//! Services return DTOs, never domain models; these mappers are the only
//! place that translation happens.

pub mod club_mapper;
pub mod event_mapper;
pub mod report_mapper;
pub mod user_mapper;

pub use club_mapper::ClubMapper;
pub use event_mapper::EventMapper;
pub use report_mapper::ReportMapper;
pub use user_mapper::UserMapper;
