//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::SignageService;

/// Shared state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Widget data service
    pub signage: Arc<SignageService>,
    /// Reported by `/health`.
    pub version: &'static str,
}

impl AppState {
    /// State reporting this crate's version
    pub fn new(signage: Arc<SignageService>) -> Self {
        Self { signage, version: env!("CARGO_PKG_VERSION") }
    }
}
