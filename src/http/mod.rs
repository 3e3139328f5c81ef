//! HTTP server for the display client.
//!
//! Read-only JSON endpoints, one per widget, backed by
//! [`SignageService`](crate::services::SignageService). Collection endpoints
//! never fail: upstream errors are logged and answered with an empty list.

/// Error responses
pub mod error;
/// Endpoint handlers
pub mod handlers;
/// Route table
pub mod router;
/// Shared handler state
pub mod state;

pub use router::create_router;
pub use state::AppState;
