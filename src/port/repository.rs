//! Manuscript repository port - the storage boundary of the engine
//!
//! Loads return `Ok(None)` for absent records; mapping absence to
//! [`EngineError::ManuscriptNotFound`] is the service's job, so adapters
//! stay free of workflow semantics.

use async_trait::async_trait;

use crate::domain::{
    error::EngineError,
    manuscript::{Manuscript, ManuscriptId},
    state::State
};

/// Port for persisting and retrieving manuscripts
#[async_trait]
pub trait ManuscriptRepository: Send + Sync {
    /// Load a manuscript by identity
    async fn load(&self, id: &ManuscriptId) -> Result<Option<Manuscript>, EngineError>;

    /// Load a manuscript by its unique title (secondary key, used at creation)
    async fn load_by_title(&self, title: &str) -> Result<Option<Manuscript>, EngineError>;

    /// Insert a freshly created manuscript
    async fn insert(&self, manuscript: &Manuscript) -> Result<(), EngineError>;

    /// Conditionally persist a state change
    ///
    /// The write only applies while the stored state still equals `expected`;
    /// a stale expectation fails with [`EngineError::Persistence`]. This is
    /// the single-document atomic update that closes the lost-update race
    /// between two concurrent dispatches against the same manuscript.
    async fn persist_state(&self, id: &ManuscriptId, expected: State, next: State) -> Result<(), EngineError>;

    /// Persist the full referee ledger for a manuscript
    async fn persist_referees(&self, id: &ManuscriptId, referees: &[String]) -> Result<(), EngineError>;

    /// Delete a manuscript by title; returns whether a record was removed
    async fn delete_by_title(&self, title: &str) -> Result<bool, EngineError>;

    /// All manuscripts, ordered by title
    async fn list(&self) -> Result<Vec<Manuscript>, EngineError>;
}
