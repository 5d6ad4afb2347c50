//! # edflow CLI
//!
//! Command-line front end for the editorial workflow engine.
//!
//! ```bash
//! # Show the lifecycle states and the actions legal in one of them
//! edflow states
//! edflow actions SUB
//!
//! # Submit a manuscript and move it through the workflow
//! edflow create "Paper A" a@x.edu
//! edflow act "Paper A" ARF --referee r1@x.edu
//! edflow act "Paper A" ACC
//! edflow show "Paper A"
//! ```
//!
//! The repository backend (in-memory or RocksDB) and the person directory
//! are configured in `config.yaml`; `--storage` overrides the backend for a
//! single invocation.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use editorial::{
    adapter::{MemoryDirectory, StoreFactory, StoreType},
    cli::{self, Cli},
    config,
    service::WorkflowService
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = config::load_config()?;

    let store_type = cli.storage.unwrap_or(config.storage);
    let repo = match store_type {
        StoreType::InMemory => StoreFactory::create(store_type, None)?,
        StoreType::RocksDb => {
            let db_path = config::resolve_db_path(&config)?;
            StoreFactory::create(store_type, Some(db_path.as_path()))?
        }
    };

    let directory = Arc::new(MemoryDirectory::with_people(config.people.clone()));
    let service = WorkflowService::new(repo, directory);

    cli::run(cli.command, &service).await
}
