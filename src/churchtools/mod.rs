//! `ChurchTools` API integration.
//!
//! Provides the authenticated HTTP client, the raw and reference record types
//! it returns, and the process-wide memoization for slow-changing lookups.

/// API client for `ChurchTools` requests
pub mod api;
/// Write-once caches for reference data
pub mod cache;
/// Data types representing `ChurchTools` resources
pub mod types;

// Re-export key components
pub use api::ChurchToolsClient;
pub use cache::Memo;
