//! `ChurchTools` data types.
//!
//! Reference data (calendars, service definitions, events) is parsed into typed
//! structs. Appointments stay raw: their shape is inconsistent between
//! occurrence, appointment and base nestings, and the normalization engine
//! reads them through fallback chains.

use serde_json::Value;
use std::collections::HashMap;

use crate::normalize::extract::{first_i64, first_text};
use crate::types::{CalendarId, ServiceGroupId, ServiceId};

/// A calendar with its visibility flag and display color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    /// Upstream id
    pub id: CalendarId,
    /// Calendar name
    pub name: String,
    /// Display color (`#rrggbb`), if set
    pub color: Option<String>,
    /// Explicit public flag; `None` when upstream omits it
    pub is_public: Option<bool>,
}

impl Calendar {
    /// Parse a calendar object, skipping entries without an id
    pub fn from_json(value: &Value) -> Option<Self> {
        Some(Self {
            id: CalendarId::from_json(&value["id"])?,
            name: value["name"].as_str().unwrap_or_default().to_string(),
            color: value["color"].as_str().filter(|c| !c.is_empty()).map(String::from),
            is_public: value["isPublic"].as_bool(),
        })
    }
}

/// One appointment occurrence exactly as upstream returned it
#[derive(Debug, Clone, PartialEq)]
pub struct RawAppointment(pub Value);

impl RawAppointment {
    /// Borrow the underlying JSON
    pub const fn json(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for RawAppointment {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// An upcoming event as listed by `/events`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    /// Event id
    pub id: i64,
    /// Event name
    pub name: String,
    /// Start timestamp as delivered upstream
    pub start_date: String,
    /// Appointment this event was created from, when upstream exposes it
    pub appointment_id: Option<i64>,
}

impl EventSummary {
    /// Parse an event list entry, skipping entries without an id
    pub fn from_json(value: &Value) -> Option<Self> {
        Some(Self {
            id: first_i64(value, &["/id"])?,
            name: value["name"].as_str().unwrap_or_default().to_string(),
            start_date: value["startDate"].as_str().unwrap_or_default().to_string(),
            appointment_id: first_i64(value, &["/appointmentId", "/appointment/id"]),
        })
    }
}

/// A full event with its long description and service roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetail {
    /// Event id
    pub id: i64,
    /// Start timestamp as delivered upstream
    pub start_date: String,
    /// Long description (may contain simple HTML)
    pub description: String,
    /// Service assignments
    pub roster: Vec<RosterEntry>,
}

impl EventDetail {
    /// Parse an event with its `eventServices`
    pub fn from_json(value: &Value) -> Option<Self> {
        let roster = value["eventServices"]
            .as_array()
            .map(|a| a.iter().filter_map(RosterEntry::from_json).collect())
            .unwrap_or_default();
        Some(Self {
            id: first_i64(value, &["/id"])?,
            start_date: value["startDate"].as_str().unwrap_or_default().to_string(),
            description: first_text(value, &["/description", "/note"]).unwrap_or_default().to_string(),
            roster,
        })
    }
}

/// One staffing slot on an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Service definition of the slot
    pub service_id: ServiceId,
    /// Role name carried by the entry itself (used when the catalog misses)
    pub service_name: Option<String>,
    /// Group carried by the entry itself
    pub service_group_id: Option<ServiceGroupId>,
    /// Assigned person's display name
    pub person: Option<String>,
    /// Assigned person's image URL
    pub avatar: Option<String>,
}

impl RosterEntry {
    /// Parse a roster entry; the person's name falls back to first and last name
    pub fn from_json(value: &Value) -> Option<Self> {
        let service_id = ServiceId(first_i64(value, &["/serviceId", "/service/id"])?);
        let person = first_text(value, &["/person/title", "/name"])
            .map(String::from)
            .or_else(|| {
                let attrs = &value["person"]["domainAttributes"];
                let full = format!(
                    "{} {}",
                    attrs["firstName"].as_str().unwrap_or_default(),
                    attrs["lastName"].as_str().unwrap_or_default()
                );
                let full = full.trim();
                (!full.is_empty()).then(|| full.to_string())
            });
        Some(Self {
            service_id,
            service_name: first_text(value, &["/service/name", "/serviceName"]).map(String::from),
            service_group_id: first_i64(value, &["/service/serviceGroupId", "/serviceGroupId"]).map(ServiceGroupId),
            person,
            avatar: first_text(value, &["/person/imageUrl", "/person/domainAttributes/imageUrl"]).map(String::from),
        })
    }

    /// Whether somebody is assigned to this slot
    pub fn is_staffed(&self) -> bool {
        self.person.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}

/// A service definition from the global catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    /// Service id
    pub id: ServiceId,
    /// Role name, e.g. "Predigt"
    pub name: String,
    /// Owning service group
    pub service_group_id: Option<ServiceGroupId>,
}

impl ServiceDefinition {
    /// Parse a catalog entry, skipping entries without an id
    pub fn from_json(value: &Value) -> Option<Self> {
        Some(Self {
            id: ServiceId(first_i64(value, &["/id"])?),
            name: value["name"].as_str().unwrap_or_default().to_string(),
            service_group_id: first_i64(value, &["/serviceGroupId"]).map(ServiceGroupId),
        })
    }
}

/// The service-definition catalog, keeping upstream order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    definitions: Vec<ServiceDefinition>,
    index: HashMap<ServiceId, usize>,
}

impl ServiceCatalog {
    /// Build a catalog; later duplicates of an id are ignored
    pub fn new(definitions: impl IntoIterator<Item = ServiceDefinition>) -> Self {
        let mut catalog = Self::default();
        for def in definitions {
            if catalog.index.contains_key(&def.id) {
                continue;
            }
            catalog.index.insert(def.id, catalog.definitions.len());
            catalog.definitions.push(def);
        }
        catalog
    }

    /// Look up a definition by id
    pub fn get(&self, id: ServiceId) -> Option<&ServiceDefinition> {
        self.index.get(&id).map(|&i| &self.definitions[i])
    }

    /// Definitions belonging to a service group, in catalog order
    pub fn in_group(&self, group: ServiceGroupId) -> impl Iterator<Item = &ServiceDefinition> {
        self.definitions.iter().filter(move |d| d.service_group_id == Some(group))
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog has no definitions
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
