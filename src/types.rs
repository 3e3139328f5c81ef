//! Core type definitions for compile-time safety.
//!
//! This module provides newtype wrappers around the numeric identifiers used by
//! `ChurchTools` so that calendar, service and service-group ids cannot be mixed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `ChurchTools` calendar identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarId(pub i64);

/// `ChurchTools` service-definition identifier (roster role, e.g. "Predigt").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(pub i64);

/// `ChurchTools` service-group identifier (e.g. kids, gastro).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceGroupId(pub i64);

macro_rules! numeric_id {
    ($name:ident) => {
        impl $name {
            /// Get the inner numeric value.
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Read an id from a JSON number or numeric string.
            pub fn from_json(value: &serde_json::Value) -> Option<Self> {
                value
                    .as_i64()
                    .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
                    .map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(CalendarId);
numeric_id!(ServiceId);
numeric_id!(ServiceGroupId);
