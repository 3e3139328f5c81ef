//! Service layer between the HTTP handlers and the upstream sources.
//!
//! [`signage::SignageService`] produces every widget payload; the verse of the
//! week sits behind the [`verse::VerseProvider`] trait so tests can swap it.

/// Widget data
pub mod signage;
/// Verse of the week
pub mod verse;

pub use signage::{ConnectionStatus, SignageService};
pub use verse::{Devotionalium, Verse, VerseProvider};
