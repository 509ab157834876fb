//! Record store subsystem.
//!
//! # Data Flow
//! ```text
//! RainService
//!     → RecordStore::insert (fully formed record, id assigned)
//!     → RecordStore::query_by_owner (exact match, newest first)
//!
//! Implementations:
//!     memory.rs  (DashMap keyed by id, process-local)
//!     file.rs    (memory.rs + JSON snapshot rewritten on every insert)
//! ```
//!
//! # Design Decisions
//! - Stores synchronize internally; callers share them as `Arc<dyn RecordStore>`
//! - Ties on `occurred_at` are broken by insertion order, later first
//! - No retries: every fault surfaces immediately as a `StoreError`

pub mod file;
pub mod memory;

use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{StorageBackend, StorageConfig};
use crate::rain::RainRecord;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors raised by the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record with this id already exists.
    #[error("record {0} already exists")]
    DuplicateId(Uuid),

    /// The store cannot serve requests (poisoned lock, missing config).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable keyed storage with owner-filtered, time-ordered retrieval.
pub trait RecordStore: Send + Sync {
    /// Add a fully formed record.
    fn insert(&self, record: RainRecord) -> Result<(), StoreError>;

    /// All records whose owner equals `owner` exactly, newest first.
    fn query_by_owner(&self, owner: &str) -> Result<Vec<RainRecord>, StoreError>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the store selected by configuration.
pub fn open_store(config: &StorageConfig) -> Result<Arc<dyn RecordStore>, StoreError> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory record store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            let path = config
                .path
                .as_deref()
                .ok_or_else(|| StoreError::Unavailable("storage.path is not set".to_string()))?;
            Ok(Arc::new(JsonFileStore::open(path)?))
        }
    }
}
