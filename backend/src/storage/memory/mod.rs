//! # In-Memory Storage Module
//!
//! Keeps all tables in process memory behind read-write locks. One
//! [`MemoryConnection`] is shared by every repository, so the repositories
//! observe a single consistent store the way they would share one database.

pub mod club_repository;
pub mod connection;
pub mod event_repository;
pub mod report_repository;
pub mod user_repository;

pub use club_repository::ClubRepository;
pub use connection::MemoryConnection;
pub use event_repository::EventRepository;
pub use report_repository::ReportRepository;
pub use user_repository::UserRepository;
