//! # Editorial Workflow Engine
//!
//! A backend for journal manuscript management. The heart of the crate is an
//! editorial finite state machine: a manuscript moves through submission,
//! referee review, revision, copy edit and publication, and every editorial
//! action is validated against a central transition table before anything is
//! persisted.
//!
//! The crate is laid out hexagonally:
//! - [`domain`] — pure types and the state machine, no I/O
//! - [`port`] — traits for the storage and person-directory collaborators
//! - [`adapter`] — in-memory and RocksDB implementations of the ports
//! - [`service`] — the workflow dispatcher orchestrating load, validate,
//!   transition and persist
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use editorial::{
//!     adapter::{MemoryDirectory, MemoryStore},
//!     domain::{Action, Person},
//!     service::{ActionPayload, WorkflowService}
//! };
//!
//! # async fn demo() -> Result<(), editorial::domain::EngineError> {
//! let repo = Arc::new(MemoryStore::new());
//! let directory = Arc::new(MemoryDirectory::with_people([Person::new("Ada", "a@x.edu", "NYU")]));
//! let service = WorkflowService::new(repo, directory);
//!
//! let manuscript = service.create("Paper A", "a@x.edu", "Abstract", "Text").await?;
//! service
//!     .handle_action(&manuscript.id, Action::AssignReferee, &ActionPayload::referee("r1"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod domain;
pub mod port;
pub mod service;

pub use adapter::{MemoryDirectory, MemoryStore, RocksDbStore, StoreFactory, StoreType};
pub use config::{Config, load_config, save_config};
pub use domain::{Action, EngineError, Manuscript, ManuscriptId, Person, Role, State};
pub use service::{ActionPayload, WorkflowService};
