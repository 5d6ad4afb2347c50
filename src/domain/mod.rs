//! Pure business types and logic for the editorial workflow
//!
//! Nothing here performs I/O. The state machine, the manuscript record and
//! the error taxonomy are all testable without any adapter.

pub mod error;
pub mod manuscript;
pub mod person;
pub mod role;
pub mod state;
pub mod table;

pub use error::EngineError;
pub use manuscript::{Manuscript, ManuscriptId};
pub use person::Person;
pub use role::Role;
pub use state::{Action, State};
pub use table::{Transition, dispatch, valid_actions};
