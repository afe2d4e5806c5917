//! Domain model for a club.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model representing a club.
///
/// Leadership is not stored here: it is derived from the roles of the
/// users affiliated with the club, with at most one Chairman at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: String,
    /// Globally unique, compared case-insensitively
    pub name: String,
    pub description: String,
    pub established: NaiveDate,
    /// Inactive clubs keep their history but reject new activity
    pub active: bool,
}

impl Club {
    /// Generate a unique club ID.
    /// Format: club::<uuid>
    pub fn generate_id() -> String {
        format!("club::{}", Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_prefixed() {
        assert!(Club::generate_id().starts_with("club::"));
    }
}
