//! Application state for the timekeeping API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::TimeClock;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// currently the timekeeping engine.
#[derive(Clone)]
pub struct AppState {
    /// The timekeeping engine.
    engine: Arc<TimeClock>,
}

impl AppState {
    /// Creates a new application state owning the given engine.
    pub fn new(engine: TimeClock) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Creates a new application state sharing an existing engine.
    pub fn from_shared(engine: Arc<TimeClock>) -> Self {
        Self { engine }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &TimeClock {
        &self.engine
    }
}
