//! Rain Tracker Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rain;
pub mod store;

pub use config::schema::RainConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use rain::RainService;
pub use store::{JsonFileStore, MemoryStore, RecordStore};
