//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use rain_tracker::rain::RainRecord;
use rain_tracker::store::{RecordStore, StoreError};
use rain_tracker::{HttpServer, RainConfig, Shutdown};

/// Serve `store` on an ephemeral local port.
#[allow(dead_code)]
pub async fn start_server(store: Arc<dyn RecordStore>) -> (SocketAddr, Shutdown) {
    let mut config = RainConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.seed.enabled = false;

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// A store whose every operation fails, counting attempts.
#[derive(Default)]
#[allow(dead_code)]
pub struct FailingStore {
    pub calls: AtomicUsize,
}

impl RecordStore for FailingStore {
    fn insert(&self, _record: RainRecord) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused by 10.0.0.7:5432".into()))
    }

    fn query_by_owner(&self, _owner: &str) -> Result<Vec<RainRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused by 10.0.0.7:5432".into()))
    }

    fn len(&self) -> usize {
        0
    }
}
