//! # Domain Module
//!
//! Contains all business logic for the club management application.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how member accounts, clubs, events and reports are modeled
//! and managed. It operates independently of any specific UI framework or
//! storage mechanism.
//!
//! ## Module Organization
//!
//! - **user_service**: Account lifecycle, authentication and club membership
//! - **club_service**: Club lifecycle, leadership assignment and statistics
//! - **event_service**: Event lifecycle, registration, attendance and capacity rules
//! - **report_service**: Immutable report snapshots aggregated from the other services
//! - **authorization_service**: The role-based permission gate in front of every mutation
//! - **session**: The single logged-in user context shared across services
//! - **mappers**: Projections from domain models to the DTOs in `shared`
//!
//! ## Core Concepts
//!
//! - **Role**: Member, Team Leader, Vice Chairman, Chairman or Admin, ordered
//!   by privilege; a role covers every action a lower role may perform
//! - **Session**: the authenticated user for the lifetime of one running instance
//! - **Lifecycle phase**: an event is Draft, Open or Closed depending on its
//!   draft flag and how its date relates to the current time
//! - **Semester**: a reporting window, either Spring (Jan–Jun) or Fall (Jul–Dec)
//!
//! ## Business Rules
//!
//! - Emails and club names are unique, compared case-insensitively
//! - Inactive clubs keep their history but accept no new activity
//! - A club has at most one Chairman; assigning a new one demotes the incumbent
//! - Registration is first-come-first-served up to capacity and closes at the
//!   event date; concurrent registrations never oversell a capacity limit
//! - Attendance is recorded after the event unless on-site check-in is enabled
//! - Reports are immutable once generated

pub mod authorization_service;
pub mod club_service;
pub mod commands;
pub mod errors;
pub mod event_service;
pub mod mappers;
pub mod models;
pub mod report_service;
pub mod session;
pub mod user_service;

pub use authorization_service::*;
pub use club_service::*;
pub use commands::*;
pub use errors::*;
pub use event_service::*;
pub use report_service::*;
pub use session::*;
pub use user_service::*;
