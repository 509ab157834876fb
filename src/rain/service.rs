//! Record and list rain observations.
//!
//! # Responsibilities
//! - Validate the caller-supplied owner and the write payload
//! - Stamp new records with an id and the current time
//! - Translate store results into listing responses
//!
//! # Design Decisions
//! - Transport agnostic: callers pass plain owner strings and payloads
//! - All validation happens before the store is touched
//! - Store failures are logged here with owner context, then returned as-is

use std::sync::Arc;

use crate::observability::metrics;
use crate::rain::error::{RainError, RainResult};
use crate::rain::model::{
    RainDataItem, RainDataResponse, RainRecord, RainRecordInput, RecordCreated, RECORDED_MESSAGE,
};
use crate::store::RecordStore;

/// Request handler for the rain endpoints.
#[derive(Clone)]
pub struct RainService {
    store: Arc<dyn RecordStore>,
}

impl RainService {
    /// Create a service over an injected store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Persist one observation for `owner`.
    pub fn record_observation(
        &self,
        owner: Option<&str>,
        body: Option<RainRecordInput>,
    ) -> RainResult<RecordCreated> {
        let Some(owner) = valid_owner(owner) else {
            tracing::warn!("Record request received without x-userId header");
            return Err(RainError::InvalidOwner);
        };

        let Some(input) = body else {
            tracing::warn!(user_id = %owner, "Record request received without a body");
            return Err(RainError::MissingBody);
        };

        tracing::info!(user_id = %owner, rain = input.rain, "Recording rain data");

        let record = RainRecord::new(owner, input.rain);
        let id = record.id;

        if let Err(e) = self.store.insert(record) {
            tracing::error!(user_id = %owner, error = %e, "Error recording rain data");
            metrics::record_store_error("insert");
            return Err(e.into());
        }

        metrics::record_observation(input.rain);
        tracing::info!(user_id = %owner, id = %id, "Rain data recorded successfully");

        Ok(RecordCreated {
            id,
            message: RECORDED_MESSAGE.to_string(),
        })
    }

    /// List every observation for `owner`, newest first.
    pub fn list_observations(&self, owner: Option<&str>) -> RainResult<RainDataResponse> {
        let Some(owner) = valid_owner(owner) else {
            tracing::warn!("List request received without x-userId header");
            return Err(RainError::InvalidOwner);
        };

        tracing::info!(user_id = %owner, "Retrieving rain data");

        let records = match self.store.query_by_owner(owner) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(user_id = %owner, error = %e, "Error retrieving rain data");
                metrics::record_store_error("query");
                return Err(e.into());
            }
        };

        let data: Vec<RainDataItem> = records.iter().map(RainDataItem::from).collect();
        tracing::info!(user_id = %owner, count = data.len(), "Retrieved rain data");

        Ok(RainDataResponse { data })
    }
}

/// Owner identifiers must contain something other than whitespace.
/// The value itself is used verbatim.
pub fn valid_owner(owner: Option<&str>) -> Option<&str> {
    owner.filter(|o| !o.trim().is_empty())
}
