//! # Storage Module
//!
//! Handles persistence for the club manager. The domain layer only sees the
//! traits defined in [`traits`]; the shipped implementation keeps everything
//! in process memory behind a shared connection, which is also what the
//! test suites run against. A file- or database-backed implementation can
//! be swapped in without touching domain code.

pub mod memory;
pub mod traits;

// Re-export the main types that other modules need
pub use memory::{
    ClubRepository, EventRepository, MemoryConnection, ReportRepository, UserRepository,
};
pub use traits::{ClubStore, EventStore, ReportStore, UserStore};
