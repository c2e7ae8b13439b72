// Application state module
// Read-only state shared by every connection

use std::sync::atomic::AtomicUsize;

use super::types::Config;
use crate::routing::RouteTable;

/// Application state
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    /// Connections currently being served
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let routes = RouteTable::new(&config.routes.normalized_prefix());

        Self {
            config,
            routes,
            active_connections: AtomicUsize::new(0),
        }
    }
}
