//! Person directory port
//!
//! Consulted only at manuscript creation to validate the author reference
//! and resolve the display name.

use async_trait::async_trait;

use crate::domain::{error::EngineError, person::Person};

/// Port for looking up people known to the journal
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Whether a person exists for the given identity (email)
    async fn exists(&self, person_id: &str) -> Result<bool, EngineError>;

    /// Look up a person by identity
    async fn lookup(&self, person_id: &str) -> Result<Option<Person>, EngineError>;
}
