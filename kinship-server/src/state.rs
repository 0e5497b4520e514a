//! Application state management

use kinship::registry::Registry;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Kinship registry handle
    pub registry: Registry,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(registry: Registry, config: ServerConfig) -> Self {
        Self { registry, config }
    }
}
