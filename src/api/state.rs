//! Application state for the Policy Impact Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::RegimeRegistry;

/// Shared application state.
///
/// Holds the regime registry, loaded once at start-up and read-only
/// thereafter.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<RegimeRegistry>,
}

impl AppState {
    /// Creates a new application state around a loaded registry.
    pub fn new(registry: RegimeRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Returns a reference to the regime registry.
    pub fn registry(&self) -> &RegimeRegistry {
        &self.registry
    }
}
