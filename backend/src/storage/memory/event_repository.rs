//! In-memory event and registration repository.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

use super::connection::MemoryConnection;
use crate::domain::models::event::{
    AttendanceStatus, Event as DomainEvent, EventParticipant as DomainEventParticipant,
};
use crate::storage::traits::EventStore;

#[derive(Clone)]
pub struct EventRepository {
    connection: Arc<MemoryConnection>,
}

impl EventRepository {
    pub fn new(connection: Arc<MemoryConnection>) -> Self {
        Self { connection }
    }
}

impl EventStore for EventRepository {
    fn store_event(&self, event: &DomainEvent) -> Result<()> {
        let mut events = self.connection.events.write().unwrap();
        if events.contains_key(&event.id) {
            bail!("event already stored: {}", event.id);
        }
        debug!("Storing event {}", event.id);
        events.insert(event.id.clone(), event.clone());
        Ok(())
    }

    fn get_event(&self, event_id: &str) -> Result<Option<DomainEvent>> {
        Ok(self.connection.events.read().unwrap().get(event_id).cloned())
    }

    fn list_events_for_club(&self, club_id: &str) -> Result<Vec<DomainEvent>> {
        let mut events: Vec<DomainEvent> = self
            .connection
            .events
            .read()
            .unwrap()
            .values()
            .filter(|e| e.club_id == club_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    fn update_event(&self, event: &DomainEvent) -> Result<()> {
        let mut events = self.connection.events.write().unwrap();
        if !events.contains_key(&event.id) {
            bail!("cannot update missing event: {}", event.id);
        }
        debug!("Updating event {}", event.id);
        events.insert(event.id.clone(), event.clone());
        Ok(())
    }

    fn delete_event(&self, event_id: &str) -> Result<bool> {
        // Lock order is events, then participants; this is the only method
        // holding both guards.
        let mut events = self.connection.events.write().unwrap();
        if events.remove(event_id).is_none() {
            return Ok(false);
        }
        let mut participants = self.connection.participants.write().unwrap();
        participants.retain(|(e_id, _), _| e_id != event_id);
        debug!("Deleted event {} with its registrations", event_id);
        Ok(true)
    }

    fn store_participant(&self, participant: &DomainEventParticipant) -> Result<()> {
        let key = (participant.event_id.clone(), participant.user_id.clone());
        let mut participants = self.connection.participants.write().unwrap();
        if participants.contains_key(&key) {
            bail!(
                "participant already stored: {} in {}",
                participant.user_id,
                participant.event_id
            );
        }
        participants.insert(key, participant.clone());
        Ok(())
    }

    fn get_participant(
        &self,
        event_id: &str,
        user_id: &str,
    ) -> Result<Option<DomainEventParticipant>> {
        let key = (event_id.to_string(), user_id.to_string());
        Ok(self
            .connection
            .participants
            .read()
            .unwrap()
            .get(&key)
            .cloned())
    }

    fn list_participants(&self, event_id: &str) -> Result<Vec<DomainEventParticipant>> {
        let mut participants: Vec<DomainEventParticipant> = self
            .connection
            .participants
            .read()
            .unwrap()
            .values()
            .filter(|p| p.event_id == event_id)
            .cloned()
            .collect();
        participants.sort_by_key(|p| p.registered_at);
        Ok(participants)
    }

    fn count_participants(&self, event_id: &str) -> Result<usize> {
        Ok(self
            .connection
            .participants
            .read()
            .unwrap()
            .keys()
            .filter(|(e_id, _)| e_id == event_id)
            .count())
    }

    fn update_participant_status(
        &self,
        event_id: &str,
        user_id: &str,
        status: AttendanceStatus,
        attended_at: DateTime<Utc>,
    ) -> Result<()> {
        let key = (event_id.to_string(), user_id.to_string());
        let mut participants = self.connection.participants.write().unwrap();
        match participants.get_mut(&key) {
            Some(participant) => {
                participant.status = status;
                participant.attended_at = Some(attended_at);
                Ok(())
            }
            None => bail!("no registration for {} in {}", user_id, event_id),
        }
    }

    fn delete_participant(&self, event_id: &str, user_id: &str) -> Result<bool> {
        let key = (event_id.to_string(), user_id.to_string());
        Ok(self
            .connection
            .participants
            .write()
            .unwrap()
            .remove(&key)
            .is_some())
    }
}
