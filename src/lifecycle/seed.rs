//! Sample observations for a fresh store.

use chrono::{Duration, Utc};

use crate::rain::RainRecord;
use crate::store::{RecordStore, StoreError};

/// (owner, rained, minutes before startup)
const SAMPLES: [(&str, bool, i64); 4] = [
    ("PatJan", true, 40),
    ("NanJan", false, 30),
    ("GregJan", true, 20),
    ("AugJan", true, 10),
];

/// Insert the sample records if the store is empty. Returns how many were added.
pub fn seed_if_empty(store: &dyn RecordStore) -> Result<usize, StoreError> {
    if !store.is_empty() {
        tracing::debug!(records = store.len(), "Store already populated, skipping seed");
        return Ok(0);
    }

    let now = Utc::now();
    for (owner, rained, minutes_ago) in SAMPLES {
        let mut record = RainRecord::new(owner, rained);
        record.occurred_at = now - Duration::minutes(minutes_ago);
        store.insert(record)?;
    }

    tracing::info!(records = SAMPLES.len(), "Seeded sample rain data");
    Ok(SAMPLES.len())
}
