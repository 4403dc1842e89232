// Application state module
// Shared, read-only state handed to every connection

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::sync::Notify;

use super::types::Config;
use crate::catalog::Catalog;

/// Application state
pub struct AppState {
    pub config: Config,
    pub catalog: &'static Catalog,
    /// Connections currently being served
    pub active_connections: Arc<AtomicUsize>,
    /// Notified once when the server should stop accepting
    pub shutdown: Arc<Notify>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            catalog: Catalog::global(),
            active_connections: Arc::new(AtomicUsize::new(0)),
            shutdown: Arc::new(Notify::new()),
        }
    }
}
