//! Live status of catering roles (coffee bar, bistro).
//!
//! Status is a pure function of the service id, whether the role is staffed
//! and the local wall-clock minute. Time-gated services are looked up in a
//! static schedule table; every other staffed role is simply open.

use serde::Serialize;

use crate::types::ServiceId;

/// Operational state of a catering role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GastroState {
    /// Within the opening window.
    Open,
    /// Inside the warning window before close.
    ClosingSoon,
    /// Outside the opening window.
    Closed,
    /// Before opening, for services that announce it.
    OpeningSoon,
    /// Nobody is rostered; wins over any time window.
    Unavailable,
}

/// Color hint for the display badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Open
    Green,
    /// Transitioning
    Yellow,
    /// Closed
    Red,
    /// Unstaffed
    Gray,
}

impl GastroState {
    /// German badge text.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Geöffnet",
            Self::ClosingSoon => "Schliesst bald",
            Self::Closed => "Geschlossen",
            Self::OpeningSoon => "Öffnet bald",
            Self::Unavailable => "Nicht besetzt",
        }
    }

    /// Badge color for the state.
    pub const fn tone(self) -> Tone {
        match self {
            Self::Open => Tone::Green,
            Self::ClosingSoon | Self::OpeningSoon => Tone::Yellow,
            Self::Closed => Tone::Red,
            Self::Unavailable => Tone::Gray,
        }
    }
}

/// Opening window of a time-gated service, in minutes since local midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Opening minute
    pub open: u32,
    /// Start of the "closing soon" warning, if the service has one.
    pub warn: Option<u32>,
    /// Closing minute; closed from here on
    pub close: u32,
    /// Before `open`: `OpeningSoon` when set, `Closed` otherwise.
    pub announce_before_open: bool,
}

const fn hm(hour: u32, minute: u32) -> u32 {
    hour * 60 + minute
}

/// Time-gated services. Adding a new gated service means adding a row here.
const SCHEDULES: &[(ServiceId, Schedule)] = &[
    // Kaffeebar
    (
        ServiceId(85),
        Schedule { open: hm(9, 30), warn: Some(hm(9, 55)), close: hm(10, 0), announce_before_open: false },
    ),
    // Bistro
    (
        ServiceId(86),
        Schedule { open: hm(11, 30), warn: None, close: hm(13, 30), announce_before_open: true },
    ),
];

/// Schedule of a time-gated service.
pub fn schedule(id: ServiceId) -> Option<&'static Schedule> {
    SCHEDULES.iter().find(|(sid, _)| *sid == id).map(|(_, s)| s)
}

impl Schedule {
    /// State at a given minute of the day.
    pub fn state_at(&self, minute: u32) -> GastroState {
        if minute < self.open {
            if self.announce_before_open {
                GastroState::OpeningSoon
            } else {
                GastroState::Closed
            }
        } else if minute >= self.close {
            GastroState::Closed
        } else if self.warn.is_some_and(|w| minute >= w) {
            GastroState::ClosingSoon
        } else {
            GastroState::Open
        }
    }
}

/// Status of a catering role.
pub fn status(id: ServiceId, staffed: bool, minute: u32) -> GastroState {
    if !staffed {
        return GastroState::Unavailable;
    }
    schedule(id).map_or(GastroState::Open, |s| s.state_at(minute))
}
