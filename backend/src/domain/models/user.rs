//! Domain model for a user account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Role held by a user.
///
/// Variants are declared from least to most privileged so the derived
/// ordering is the authorization order: a single `>=` comparison answers
/// whether a role clears a threshold. Within a club the role doubles as
/// the leadership position the user holds there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UserRole {
    Member,
    TeamLeader,
    ViceChairman,
    Chairman,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserRole::Member => "Member",
            UserRole::TeamLeader => "TeamLeader",
            UserRole::ViceChairman => "ViceChairman",
            UserRole::Chairman => "Chairman",
            UserRole::Admin => "Admin",
        };
        write!(f, "{}", label)
    }
}

/// Domain model representing a user account.
///
/// Carries the argon2 password hash; mappers strip it before anything
/// crosses the boundary. Email is the login identifier and unique
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub student_id: String,
    pub role: UserRole,
    pub password_hash: String,
    pub joined_at: DateTime<Utc>,
    pub active: bool,
    /// Club the user belongs to; a user is affiliated with at most one club
    pub club_id: Option<String>,
}

impl User {
    /// Generate a unique user ID.
    /// Format: user::<uuid>
    pub fn generate_id() -> String {
        format!("user::{}", Uuid::new_v4())
    }

    pub fn is_member_of(&self, club_id: &str) -> bool {
        self.club_id.as_deref() == Some(club_id)
    }
}
