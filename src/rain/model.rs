//! Observation types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Confirmation message returned for every successful write.
pub const RECORDED_MESSAGE: &str = "Rain data recorded successfully";

/// A stored rain observation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainRecord {
    /// Unique identifier assigned at creation.
    pub id: Uuid,
    /// Caller-supplied user identifier.
    pub owner: String,
    /// When the observation was recorded (system clock, UTC).
    pub occurred_at: DateTime<Utc>,
    /// Whether it rained.
    pub rained: bool,
}

impl RainRecord {
    /// Build a fresh record stamped with a new id and the current time.
    pub fn new(owner: impl Into<String>, rained: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            occurred_at: Utc::now(),
            rained,
        }
    }
}

/// Write payload: `{ "rain": <bool> }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainRecordInput {
    pub rain: bool,
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCreated {
    pub id: Uuid,
    pub message: String,
}

/// A single listed observation. Id and owner are not exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainDataItem {
    /// RFC 3339 timestamp, e.g. `2024-11-05T19:51:33.294Z`.
    pub timestamp: DateTime<Utc>,
    pub rain: bool,
}

impl From<&RainRecord> for RainDataItem {
    fn from(record: &RainRecord) -> Self {
        Self {
            timestamp: record.occurred_at,
            rain: record.rained,
        }
    }
}

/// Listing response, newest observation first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RainDataResponse {
    pub data: Vec<RainDataItem>,
}
