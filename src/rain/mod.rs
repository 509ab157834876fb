//! Rain observation domain.

pub mod error;
pub mod model;
pub mod service;

pub use error::{RainError, RainResult};
pub use model::{RainDataItem, RainDataResponse, RainRecord, RainRecordInput, RecordCreated};
pub use service::RainService;
