//! JSON snapshot persistence.
//!
//! Records live in a [`MemoryStore`]; every insert rewrites the snapshot
//! file (temp file + rename) before the record becomes visible, so a failed
//! write leaves neither the file nor the memory view changed.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::rain::RainRecord;
use crate::store::memory::MemoryStore;
use crate::store::{RecordStore, StoreError};

/// A record store persisted as a JSON array on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    memory: MemoryStore,
    path: PathBuf,
    /// Serializes writers so concurrent inserts never overwrite each other's snapshot.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store, loading the snapshot if the file exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let records: Vec<RainRecord> = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            Vec::new()
        };

        let memory = MemoryStore::from_records(records)?;
        tracing::info!(path = ?path, records = memory.len(), "Loaded record store snapshot");

        Ok(Self {
            memory,
            path,
            write_lock: Mutex::new(()),
        })
    }

    fn write_snapshot(&self, records: &[RainRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            serde_json::to_writer(&mut writer, records)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn insert(&self, record: RainRecord) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Unavailable("snapshot writer lock poisoned".to_string()))?;

        if self.memory.contains(&record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }

        let mut records = self.memory.snapshot();
        records.push(record.clone());
        self.write_snapshot(&records)?;

        self.memory.insert(record)
    }

    fn query_by_owner(&self, owner: &str) -> Result<Vec<RainRecord>, StoreError> {
        self.memory.query_by_owner(owner)
    }

    fn len(&self) -> usize {
        self.memory.len()
    }
}
