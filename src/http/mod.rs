//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, x-userid extraction)
//!     → rain.rs (decode body, call RainService)
//!     → response.rs (status codes, error bodies)
//!     → Send to client
//! ```

pub mod rain;
pub mod request;
pub mod response;
pub mod server;

pub use request::{X_REQUEST_ID, X_USER_ID};
pub use response::{ApiError, ErrorBody, Operation};
pub use server::{AppState, HttpServer};
