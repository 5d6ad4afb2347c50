//! Typed error taxonomy for the editorial workflow engine
//!
//! Every failure is surfaced verbatim to the caller with enough context to
//! render a user-facing message. Nothing is downgraded to a generic failure
//! and the engine never guesses a "best effort" next state.

use thiserror::Error;

use crate::domain::state::{Action, State};

/// Errors raised by the workflow engine and its collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// State code is not a member of the closed state set
    #[error("Bad state: {state}")]
    UnknownState { state: String },

    /// Action is not legal in the manuscript's current state
    #[error("{action} not available in {state}")]
    ActionNotAllowed { action: Action, state: State },

    /// No manuscript exists for the given identity
    #[error("No manuscript found: {id}")]
    ManuscriptNotFound { id: String },

    /// Referee is already on the manuscript's referee list
    #[error("Referee already assigned: {referee}")]
    DuplicateReferee { referee: String },

    /// Referee is not on the manuscript's referee list
    #[error("Referee not found: {referee}")]
    RefereeNotFound { referee: String },

    /// Referee action submitted without a referee in the payload
    #[error("{action} requires a referee")]
    MissingReferee { action: Action },

    /// A manuscript with this title already exists
    #[error("Manuscript title already exists: {title}")]
    DuplicateTitle { title: String },

    /// Author reference does not resolve to a known person
    #[error("Unknown author: {person_id}")]
    UnknownAuthor { person_id: String },

    /// Storage failure, the only condition that may warrant caller-side retry
    #[error("Persistence failure: {0}")]
    Persistence(String)
}

/// Convert from serde_json::Error (record encoding at the storage boundary)
impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Persistence(err.to_string())
    }
}
