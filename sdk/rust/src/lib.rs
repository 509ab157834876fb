//! Client SDK for the Rain Tracker API.

pub mod client;

pub use client::{ClientError, RainClient};
