//! In-memory club repository.

use anyhow::{bail, Result};
use log::debug;
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::domain::models::club::Club as DomainClub;
use crate::storage::traits::ClubStore;

#[derive(Clone)]
pub struct ClubRepository {
    connection: Arc<MemoryConnection>,
}

impl ClubRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl ClubStore for ClubRepository {
    fn store_club(&self, club: &DomainClub) -> Result<()> {
        let mut clubs = self.connection.clubs.write().unwrap();
        if clubs.contains_key(&club.id) {
            bail!("club already stored: {}", club.id);
        }
        debug!("Storing club {}", club.id);
        clubs.insert(club.id.clone(), club.clone());
        Ok(())
    }

    fn get_club(&self, club_id: &str) -> Result<Option<DomainClub>> {
        Ok(self.connection.clubs.read().unwrap().get(club_id).cloned())
    }

    fn get_club_by_name(&self, name: &str) -> Result<Option<DomainClub>> {
        Ok(self
            .connection
            .clubs
            .read()
            .unwrap()
            .values()
            .find(|club| club.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn list_clubs(&self) -> Result<Vec<DomainClub>> {
        let mut clubs: Vec<DomainClub> =
            self.connection.clubs.read().unwrap().values().cloned().collect();
        clubs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(clubs)
    }

    fn update_club(&self, club: &DomainClub) -> Result<()> {
        let mut clubs = self.connection.clubs.write().unwrap();
        if !clubs.contains_key(&club.id) {
            bail!("cannot update missing club: {}", club.id);
        }
        debug!("Updating club {}", club.id);
        clubs.insert(club.id.clone(), club.clone());
        Ok(())
    }
}
