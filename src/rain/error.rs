//! Request handler error taxonomy.

use thiserror::Error;

use crate::store::StoreError;

/// Why a rain request failed.
#[derive(Debug, Error)]
pub enum RainError {
    /// Owner identifier absent, empty or whitespace-only.
    #[error("x-userId header is required")]
    InvalidOwner,

    /// Write request without a body.
    #[error("Request body is required")]
    MissingBody,

    /// Unexpected fault from the record store.
    #[error("record store failure: {0}")]
    Store(#[from] StoreError),
}

impl RainError {
    /// True for caller mistakes, false for server faults.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RainError::InvalidOwner | RainError::MissingBody)
    }
}

/// Convenience result type for request handling.
pub type RainResult<T> = Result<T, RainError>;
