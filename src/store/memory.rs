//! In-memory record store.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use crate::rain::RainRecord;
use crate::store::{RecordStore, StoreError};

/// A record plus its insertion sequence number.
#[derive(Debug, Clone)]
struct Slot {
    seq: u64,
    record: RainRecord,
}

/// A thread-safe store backed by a concurrent map keyed by record id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<Uuid, Slot>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records in insertion order.
    pub fn from_records(records: impl IntoIterator<Item = RainRecord>) -> Result<Self, StoreError> {
        let store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Whether a record with this id is stored.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.records.contains_key(id)
    }

    /// Every record in insertion order.
    pub fn snapshot(&self) -> Vec<RainRecord> {
        let mut slots: Vec<Slot> = self.records.iter().map(|r| r.value().clone()).collect();
        slots.sort_by_key(|s| s.seq);
        slots.into_iter().map(|s| s.record).collect()
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, record: RainRecord) -> Result<(), StoreError> {
        match self.records.entry(record.id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId(record.id)),
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Slot { seq, record });
                Ok(())
            }
        }
    }

    fn query_by_owner(&self, owner: &str) -> Result<Vec<RainRecord>, StoreError> {
        let mut matches: Vec<Slot> = self
            .records
            .iter()
            .filter(|r| r.value().record.owner == owner)
            .map(|r| r.value().clone())
            .collect();

        matches.sort_by(|a, b| {
            b.record
                .occurred_at
                .cmp(&a.record.occurred_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });

        Ok(matches.into_iter().map(|s| s.record).collect())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
