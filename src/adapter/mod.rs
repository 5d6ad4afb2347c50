//! Adapter implementations of the storage and directory ports

pub mod memory;
pub mod rocksdb;

use std::{path::Path, sync::Arc};

pub use memory::{MemoryDirectory, MemoryStore};
pub use rocksdb::RocksDbStore;

use crate::{domain::error::EngineError, port::repository::ManuscriptRepository};

/// Which repository backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum)]
pub enum StoreType {
    #[serde(rename = "inmemory")]
    #[value(name = "inmemory")]
    InMemory,
    #[serde(rename = "rocksdb")]
    #[value(name = "rocksdb")]
    RocksDb
}

impl StoreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreType::InMemory => "inmemory",
            StoreType::RocksDb => "rocksdb"
        }
    }
}

/// Factory for creating repositories based on configuration
pub struct StoreFactory;

impl StoreFactory {
    pub fn create(store_type: StoreType, db_path: Option<&Path>) -> Result<Arc<dyn ManuscriptRepository>, EngineError> {
        match store_type {
            StoreType::InMemory => Ok(Arc::new(MemoryStore::new())),
            StoreType::RocksDb => {
                let path =
                    db_path.ok_or_else(|| EngineError::Persistence("RocksDB path required".to_string()))?;
                Ok(Arc::new(RocksDbStore::open(path)?))
            }
        }
    }
}
