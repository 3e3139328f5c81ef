//! `Signage` - church digital signage backend for `ChurchTools`.
//!
//! This crate pulls appointments, room bookings, birthdays and service
//! rosters from the `ChurchTools` API, normalizes them for a looping display
//! and serves one JSON endpoint per widget.

// Re-export public modules for use in integration tests and binaries
/// `ChurchTools` API client and record types
pub mod churchtools;
/// Environment configuration
pub mod config;
/// Shared constants
pub mod constants;
/// Error types
pub mod error;
/// HTTP server
pub mod http;
/// Tracing setup
pub mod logging;
/// Normalization of upstream records into display payloads
pub mod normalize;
/// Widget services
pub mod services;
/// Structured signage configuration
pub mod settings;
/// In-memory sample data
pub mod store;
/// Identifier newtypes
pub mod types;
