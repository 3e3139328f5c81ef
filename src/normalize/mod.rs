//! Normalization and enrichment of raw `ChurchTools` records.
//!
//! Everything here is a pure function of raw records, [`Settings`](crate::settings::Settings)
//! and the current local time. Network access lives in [`crate::services`].

/// Appointment rows, day partitioning and flyers
pub mod appointments;
/// Birthday rows
pub mod birthdays;
/// Fallback-chain field accessors
pub mod extract;
/// German date and time formatting
pub mod format;
/// Catering status state machine
pub mod gastro;
/// Resource and location labels
pub mod resources;
/// Roster buckets for the sermon detail
pub mod roster;
/// Next sermon and its detail
pub mod sermon;
/// Public/private title resolution
pub mod visibility;

pub use appointments::{DisplayAppointment, Flyer, ListKind};
pub use birthdays::Birthday;
pub use sermon::SermonDetail;
pub use visibility::Visibility;
