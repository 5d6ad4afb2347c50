//! RocksDB implementation of the manuscript repository
//!
//! Storage layout (column families):
//! - `manuscripts`: manuscript id -> JSON record
//! - `titles`: title -> manuscript id (unique secondary key)
//!
//! RocksDB offers no compare-and-set, so the read-modify-write cycles
//! (conditional state update, referee ledger write, delete) are serialized
//! behind a single write mutex. Reads go through `spawn_blocking` to keep
//! blocking I/O off the async runtime.

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use rocksdb::{ColumnFamily, DB, IteratorMode, Options, WriteBatch};
use tokio::sync::Mutex;

use crate::{
    domain::{
        error::EngineError,
        manuscript::{Manuscript, ManuscriptId},
        state::State
    },
    port::repository::ManuscriptRepository
};

const CF_MANUSCRIPTS: &str = "manuscripts";
const CF_TITLES: &str = "titles";

/// RocksDB-backed manuscript repository
pub struct RocksDbStore {
    db:         Arc<DB>,
    write_lock: Mutex<()>
}

impl RocksDbStore {
    /// Open (or create) the database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let cf_names = vec![CF_MANUSCRIPTS, CF_TITLES];
        let db = DB::open_cf(&opts, path, &cf_names)
            .map_err(|e| EngineError::Persistence(format!("Failed to open RocksDB: {}", e)))?;

        Ok(Self { db: Arc::new(db), write_lock: Mutex::new(()) })
    }

    fn cf<'a>(db: &'a DB, name: &str) -> Result<&'a ColumnFamily, EngineError> {
        db.cf_handle(name)
            .ok_or_else(|| EngineError::Persistence(format!("Column family '{}' not found", name)))
    }

    fn read_manuscript(db: &DB, id: &ManuscriptId) -> Result<Option<Manuscript>, EngineError> {
        let cf = Self::cf(db, CF_MANUSCRIPTS)?;
        match db.get_cf(cf, id.to_string().as_bytes()) {
            Ok(Some(data)) => Ok(Some(serde_json::from_slice(&data)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(EngineError::Persistence(format!("Failed to read manuscript: {}", e)))
        }
    }

    fn write_manuscript(db: &DB, manuscript: &Manuscript) -> Result<(), EngineError> {
        let cf_manuscripts = Self::cf(db, CF_MANUSCRIPTS)?;
        let cf_titles = Self::cf(db, CF_TITLES)?;

        let data = serde_json::to_vec(manuscript)?;
        let id = manuscript.id.to_string();

        let mut batch = WriteBatch::default();
        batch.put_cf(cf_manuscripts, id.as_bytes(), &data);
        batch.put_cf(cf_titles, manuscript.title.as_bytes(), id.as_bytes());

        db.write(batch).map_err(|e| EngineError::Persistence(format!("Failed to write manuscript: {}", e)))
    }

    /// Mutate one record under the write lock and persist the result
    async fn update_record<F>(&self, id: &ManuscriptId, mutate: F) -> Result<(), EngineError>
    where
        F: FnOnce(&mut Manuscript) -> Result<(), EngineError> + Send + 'static
    {
        let _guard = self.write_lock.lock().await;
        let db = self.db.clone();
        let id = *id;

        tokio::task::spawn_blocking(move || -> Result<(), EngineError> {
            let mut manuscript = Self::read_manuscript(&db, &id)?
                .ok_or_else(|| EngineError::Persistence(format!("Manuscript vanished during update: {}", id)))?;

            mutate(&mut manuscript)?;
            manuscript.updated_at = chrono::Utc::now();
            Self::write_manuscript(&db, &manuscript)
        })
        .await
        .map_err(|e| EngineError::Persistence(format!("Update task failed: {}", e)))?
    }
}

#[async_trait]
impl ManuscriptRepository for RocksDbStore {
    async fn load(&self, id: &ManuscriptId) -> Result<Option<Manuscript>, EngineError> {
        let db = self.db.clone();
        let id = *id;

        tokio::task::spawn_blocking(move || Self::read_manuscript(&db, &id))
            .await
            .map_err(|e| EngineError::Persistence(format!("Read task failed: {}", e)))?
    }

    async fn load_by_title(&self, title: &str) -> Result<Option<Manuscript>, EngineError> {
        let db = self.db.clone();
        let title = title.to_string();

        tokio::task::spawn_blocking(move || -> Result<Option<Manuscript>, EngineError> {
            let cf_titles = Self::cf(&db, CF_TITLES)?;

            let id_bytes = db
                .get_cf(cf_titles, title.as_bytes())
                .map_err(|e| EngineError::Persistence(format!("Failed to read title index: {}", e)))?;

            match id_bytes {
                Some(bytes) => {
                    let id: ManuscriptId = String::from_utf8_lossy(&bytes)
                        .parse()
                        .map_err(|e| EngineError::Persistence(format!("Corrupt title index: {}", e)))?;
                    Self::read_manuscript(&db, &id)
                }
                None => Ok(None)
            }
        })
        .await
        .map_err(|e| EngineError::Persistence(format!("Read task failed: {}", e)))?
    }

    async fn insert(&self, manuscript: &Manuscript) -> Result<(), EngineError> {
        let _guard = self.write_lock.lock().await;
        let db = self.db.clone();
        let manuscript = manuscript.clone();

        tokio::task::spawn_blocking(move || Self::write_manuscript(&db, &manuscript))
            .await
            .map_err(|e| EngineError::Persistence(format!("Insert task failed: {}", e)))?
    }

    async fn persist_state(&self, id: &ManuscriptId, expected: State, next: State) -> Result<(), EngineError> {
        let id_for_msg = *id;
        self.update_record(id, move |manuscript| {
            if manuscript.state != expected {
                return Err(EngineError::Persistence(format!(
                    "Concurrent update on {}: expected {}, found {}",
                    id_for_msg, expected, manuscript.state
                )));
            }
            manuscript.state = next;
            Ok(())
        })
        .await
    }

    async fn persist_referees(&self, id: &ManuscriptId, referees: &[String]) -> Result<(), EngineError> {
        let referees = referees.to_vec();
        self.update_record(id, move |manuscript| {
            manuscript.referees = referees;
            Ok(())
        })
        .await
    }

    async fn delete_by_title(&self, title: &str) -> Result<bool, EngineError> {
        let _guard = self.write_lock.lock().await;
        let db = self.db.clone();
        let title = title.to_string();

        tokio::task::spawn_blocking(move || -> Result<bool, EngineError> {
            let cf_titles = Self::cf(&db, CF_TITLES)?;
            let cf_manuscripts = Self::cf(&db, CF_MANUSCRIPTS)?;

            let id_bytes = db
                .get_cf(cf_titles, title.as_bytes())
                .map_err(|e| EngineError::Persistence(format!("Failed to read title index: {}", e)))?;

            match id_bytes {
                Some(bytes) => {
                    let mut batch = WriteBatch::default();
                    batch.delete_cf(cf_manuscripts, &bytes);
                    batch.delete_cf(cf_titles, title.as_bytes());
                    db.write(batch)
                        .map_err(|e| EngineError::Persistence(format!("Failed to delete manuscript: {}", e)))?;
                    Ok(true)
                }
                None => Ok(false)
            }
        })
        .await
        .map_err(|e| EngineError::Persistence(format!("Delete task failed: {}", e)))?
    }

    async fn list(&self) -> Result<Vec<Manuscript>, EngineError> {
        let db = self.db.clone();

        tokio::task::spawn_blocking(move || -> Result<Vec<Manuscript>, EngineError> {
            let cf = Self::cf(&db, CF_MANUSCRIPTS)?;
            let mut manuscripts = Vec::new();

            for item in db.iterator_cf(cf, IteratorMode::Start) {
                let (_, value) =
                    item.map_err(|e| EngineError::Persistence(format!("Failed to iterate manuscripts: {}", e)))?;
                manuscripts.push(serde_json::from_slice(&value)?);
            }

            manuscripts.sort_by(|a: &Manuscript, b: &Manuscript| a.title.cmp(&b.title));
            Ok(manuscripts)
        })
        .await
        .map_err(|e| EngineError::Persistence(format!("List task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manuscript(title: &str) -> Manuscript {
        Manuscript::new(title, "Eugene Callahan", "ec@nyu.edu", "Abstract.", "Text.")
    }

    #[tokio::test]
    async fn insert_load_and_title_index() {
        let dir = tempfile::tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        let manu = manuscript("Paper A");
        store.insert(&manu).await.unwrap();

        let by_id = store.load(&manu.id).await.unwrap().unwrap();
        assert_eq!(by_id.title, "Paper A");
        assert_eq!(by_id.state, State::Submitted);

        let by_title = store.load_by_title("Paper A").await.unwrap().unwrap();
        assert_eq!(by_title.id, manu.id);

        assert!(store.load_by_title("Paper B").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn conditional_state_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        let manu = manuscript("Paper A");
        store.insert(&manu).await.unwrap();

        store.persist_state(&manu.id, State::Submitted, State::InRefereeReview).await.unwrap();

        let err = store.persist_state(&manu.id, State::Submitted, State::Withdrawn).await.unwrap_err();
        assert!(matches!(err, EngineError::Persistence(_)));

        let stored = store.load(&manu.id).await.unwrap().unwrap();
        assert_eq!(stored.state, State::InRefereeReview);
    }

    #[tokio::test]
    async fn referees_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let manu = manuscript("Paper A");

        {
            let store = RocksDbStore::open(dir.path()).unwrap();
            store.insert(&manu).await.unwrap();
            store.persist_referees(&manu.id, &["r1".to_string(), "r2".to_string()]).await.unwrap();
        }

        let store = RocksDbStore::open(dir.path()).unwrap();
        let stored = store.load(&manu.id).await.unwrap().unwrap();
        assert_eq!(stored.referees, vec!["r1", "r2"]);
    }

    #[tokio::test]
    async fn delete_removes_record_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        let manu = manuscript("Paper A");
        store.insert(&manu).await.unwrap();

        assert!(store.delete_by_title("Paper A").await.unwrap());
        assert!(store.load(&manu.id).await.unwrap().is_none());
        assert!(store.load_by_title("Paper A").await.unwrap().is_none());
        assert!(!store.delete_by_title("Paper A").await.unwrap());
    }

    #[tokio::test]
    async fn list_orders_by_title() {
        let dir = tempfile::tempdir().unwrap();
        let store = RocksDbStore::open(dir.path()).unwrap();

        store.insert(&manuscript("Zeta")).await.unwrap();
        store.insert(&manuscript("Alpha")).await.unwrap();

        let titles: Vec<String> = store.list().await.unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, vec!["Alpha", "Zeta"]);
    }
}
