//! In-memory adapter implementations
//!
//! Suitable for development and tests; data is lost when the process exits.
//! The conditional state write is checked under the write lock, so the
//! compare-and-set contract of the port holds.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::{
        error::EngineError,
        manuscript::{Manuscript, ManuscriptId},
        person::Person,
        state::State
    },
    port::{directory::PersonDirectory, repository::ManuscriptRepository}
};

/// In-memory manuscript repository
#[derive(Debug, Default)]
pub struct MemoryStore {
    manuscripts: Arc<RwLock<HashMap<ManuscriptId, Manuscript>>>
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ManuscriptRepository for MemoryStore {
    async fn load(&self, id: &ManuscriptId) -> Result<Option<Manuscript>, EngineError> {
        let manuscripts = self.manuscripts.read().await;
        Ok(manuscripts.get(id).cloned())
    }

    async fn load_by_title(&self, title: &str) -> Result<Option<Manuscript>, EngineError> {
        let manuscripts = self.manuscripts.read().await;
        Ok(manuscripts.values().find(|m| m.title == title).cloned())
    }

    async fn insert(&self, manuscript: &Manuscript) -> Result<(), EngineError> {
        let mut manuscripts = self.manuscripts.write().await;
        manuscripts.insert(manuscript.id, manuscript.clone());
        Ok(())
    }

    async fn persist_state(&self, id: &ManuscriptId, expected: State, next: State) -> Result<(), EngineError> {
        let mut manuscripts = self.manuscripts.write().await;
        let manuscript = manuscripts
            .get_mut(id)
            .ok_or_else(|| EngineError::Persistence(format!("Manuscript vanished during update: {}", id)))?;

        if manuscript.state != expected {
            return Err(EngineError::Persistence(format!(
                "Concurrent update on {}: expected {}, found {}",
                id, expected, manuscript.state
            )));
        }

        manuscript.state = next;
        manuscript.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn persist_referees(&self, id: &ManuscriptId, referees: &[String]) -> Result<(), EngineError> {
        let mut manuscripts = self.manuscripts.write().await;
        let manuscript = manuscripts
            .get_mut(id)
            .ok_or_else(|| EngineError::Persistence(format!("Manuscript vanished during update: {}", id)))?;

        manuscript.referees = referees.to_vec();
        manuscript.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn delete_by_title(&self, title: &str) -> Result<bool, EngineError> {
        let mut manuscripts = self.manuscripts.write().await;
        let id = manuscripts.values().find(|m| m.title == title).map(|m| m.id);

        match id {
            Some(id) => {
                manuscripts.remove(&id);
                Ok(true)
            }
            None => Ok(false)
        }
    }

    async fn list(&self) -> Result<Vec<Manuscript>, EngineError> {
        let manuscripts = self.manuscripts.read().await;
        let mut all: Vec<Manuscript> = manuscripts.values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }
}

/// In-memory person directory, keyed by email
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    people: Arc<RwLock<HashMap<String, Person>>>
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the directory with a set of people
    pub fn with_people(people: impl IntoIterator<Item = Person>) -> Self {
        let map = people.into_iter().map(|p| (p.email.clone(), p)).collect();
        Self { people: Arc::new(RwLock::new(map)) }
    }

    pub async fn add(&self, person: Person) {
        let mut people = self.people.write().await;
        people.insert(person.email.clone(), person);
    }
}

#[async_trait]
impl PersonDirectory for MemoryDirectory {
    async fn exists(&self, person_id: &str) -> Result<bool, EngineError> {
        let people = self.people.read().await;
        Ok(people.contains_key(person_id))
    }

    async fn lookup(&self, person_id: &str) -> Result<Option<Person>, EngineError> {
        let people = self.people.read().await;
        Ok(people.get(person_id).cloned())
    }
}
