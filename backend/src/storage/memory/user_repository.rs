//! In-memory user repository.

use anyhow::{bail, Result};
use log::debug;
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::domain::models::user::User as DomainUser;
use crate::storage::traits::UserStore;

#[derive(Clone)]
pub struct UserRepository {
    connection: Arc<MemoryConnection>,
}

impl UserRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl UserStore for UserRepository {
    fn store_user(&self, user: &DomainUser) -> Result<()> {
        let mut users = self.connection.users.write().unwrap();
        if users.contains_key(&user.id) {
            bail!("user already stored: {}", user.id);
        }
        debug!("Storing user {}", user.id);
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<Option<DomainUser>> {
        Ok(self.connection.users.read().unwrap().get(user_id).cloned())
    }

    fn get_user_by_email(&self, email: &str) -> Result<Option<DomainUser>> {
        Ok(self
            .connection
            .users
            .read()
            .unwrap()
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn list_users(&self) -> Result<Vec<DomainUser>> {
        let mut users: Vec<DomainUser> =
            self.connection.users.read().unwrap().values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    fn update_user(&self, user: &DomainUser) -> Result<()> {
        let mut users = self.connection.users.write().unwrap();
        if !users.contains_key(&user.id) {
            bail!("cannot update missing user: {}", user.id);
        }
        debug!("Updating user {}", user.id);
        users.insert(user.id.clone(), user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::UserRole;
    use chrono::Utc;

    fn user(id: &str, email: &str) -> DomainUser {
        DomainUser {
            id: id.to_string(),
            full_name: format!("{} name", id),
            email: email.to_string(),
            student_id: "S-100".to_string(),
            role: UserRole::Member,
            password_hash: String::new(),
            joined_at: Utc::now(),
            active: true,
            club_id: None,
        }
    }

    fn setup_test() -> UserRepository {
        UserRepository::new(Arc::new(MemoryConnection::new()))
    }

    #[test]
    fn test_store_and_lookup() {
        let repo = setup_test();
        repo.store_user(&user("user::1", "noor@school.edu")).unwrap();

        assert_eq!(
            repo.get_user("user::1").unwrap().unwrap().email,
            "noor@school.edu"
        );
        assert!(repo.get_user("user::missing").unwrap().is_none());
    }

    #[test]
    fn test_email_lookup_is_case_insensitive() {
        let repo = setup_test();
        repo.store_user(&user("user::1", "Noor@School.edu")).unwrap();

        assert_eq!(
            repo.get_user_by_email("noor@school.edu").unwrap().unwrap().id,
            "user::1"
        );
        assert!(repo.get_user_by_email("other@school.edu").unwrap().is_none());
    }

    #[test]
    fn test_store_rejects_duplicate_id() {
        let repo = setup_test();
        repo.store_user(&user("user::1", "noor@school.edu")).unwrap();
        assert!(repo.store_user(&user("user::1", "other@school.edu")).is_err());
    }

    #[test]
    fn test_list_sorted_by_email() {
        let repo = setup_test();
        repo.store_user(&user("user::1", "zane@school.edu")).unwrap();
        repo.store_user(&user("user::2", "amira@school.edu")).unwrap();

        let emails: Vec<String> = repo
            .list_users()
            .unwrap()
            .into_iter()
            .map(|u| u.email)
            .collect();
        assert_eq!(emails, vec!["amira@school.edu", "zane@school.edu"]);
    }

    #[test]
    fn test_update_requires_existing_row() {
        let repo = setup_test();
        assert!(repo.update_user(&user("user::1", "noor@school.edu")).is_err());

        repo.store_user(&user("user::1", "noor@school.edu")).unwrap();
        let mut updated = user("user::1", "noor@school.edu");
        updated.full_name = "Noor A.".to_string();
        repo.update_user(&updated).unwrap();
        assert_eq!(
            repo.get_user("user::1").unwrap().unwrap().full_name,
            "Noor A."
        );
    }
}
