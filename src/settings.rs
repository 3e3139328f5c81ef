//! Structured signage configuration.
//!
//! The operator supplies a single JSON document (calendar ids, overrides, room
//! types, roster maps, labels). Every field is optional; a missing or
//! malformed document yields the built-in defaults so the server always starts.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use crate::constants::{sermon, verse};
use crate::error::{Error, Result};
use crate::types::{CalendarId, ServiceGroupId, ServiceId};

/// Root of the configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Calendar partitioning and overrides.
    pub calendars: CalendarSettings,
    /// Resource (room) settings.
    pub resources: ResourceSettings,
    /// Roster (service assignment) settings.
    pub services: ServiceSettings,
    /// Display horizon and labels.
    pub signage: DisplaySettings,
    /// Verse-of-the-week API settings.
    pub devotionalium: DevotionaliumSettings,
}

/// Calendar lists and per-calendar overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarSettings {
    /// Calendars holding worship services.
    pub sermons: Vec<CalendarId>,
    /// General church event calendars.
    pub church_events: Vec<CalendarId>,
    /// Group event calendars.
    pub group_events: Vec<CalendarId>,
    /// Calendars treated as public when upstream metadata has no flag.
    pub public_ids: Vec<CalendarId>,
    /// Calendar id (as string) to replacement title.
    pub title_overrides: HashMap<String, String>,
    /// Calendar id (as string) to replacement description.
    pub description_overrides: HashMap<String, String>,
}

/// Resource settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceSettings {
    /// Resource-type ids that count as rooms for location labels.
    pub room_type_ids: Vec<i64>,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self { room_type_ids: vec![2] }
    }
}

/// Roster settings for the sermon detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceSettings {
    /// Service groups left out of the "other" program tags.
    pub exclude_group_ids: Vec<ServiceGroupId>,
    /// Service group of the kids program.
    pub kids_group_id: Option<ServiceGroupId>,
    /// Service group of catering roles.
    pub gastro_group_id: Option<ServiceGroupId>,
    /// Service id of the teens program; `null` disables the teens entry.
    pub teens_service_id: Option<ServiceId>,
    /// Service id (as string) to descriptive text; keys form the kids allowlist.
    pub kids_descriptions: HashMap<String, String>,
    /// Status strings toggled by description keywords.
    pub kids_status: KidsStatus,
    /// Case-insensitive substrings marking a description line as special.
    pub specials_keywords: Vec<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            exclude_group_ids: Vec::new(),
            kids_group_id: None,
            gastro_group_id: None,
            teens_service_id: Some(ServiceId(sermon::TEENS_SERVICE_ID)),
            kids_descriptions: HashMap::new(),
            kids_status: KidsStatus::default(),
            specials_keywords: vec!["abendmahl".into(), "taufe".into(), "segnung".into()],
        }
    }
}

/// Canned status strings for the kids and teens programs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KidsStatus {
    /// Kids meet outside.
    pub kids_outside: String,
    /// Kids meet inside.
    pub kids_inside: String,
    /// Teens meet outside.
    pub teens_outside: String,
    /// Teens meet inside.
    pub teens_inside: String,
}

impl Default for KidsStatus {
    fn default() -> Self {
        Self {
            kids_outside: "Heute sind die Kids draussen unterwegs".into(),
            kids_inside: "Heute sind die Kids in ihren Räumen".into(),
            teens_outside: "Heute sind die Teens draussen unterwegs".into(),
            teens_inside: "Heute sind die Teens im Jugendraum".into(),
        }
    }
}

/// Display horizon and section labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplaySettings {
    /// Horizon in days for upcoming appointments.
    pub max_upcoming_days: i64,
    /// How many upcoming events are searched for the sermon's roster.
    pub event_lookahead: usize,
    /// Section titles.
    pub labels: SignageLabels,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_upcoming_days: 7,
            event_lookahead: 10,
            labels: SignageLabels::default(),
        }
    }
}

/// Operator-configurable section titles with German defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignageLabels {
    /// Sermon section title on Sundays.
    pub sermon_title_sunday: String,
    /// Sermon section title on weekdays.
    pub sermon_title_weekday: String,
    /// Program block heading.
    pub sermon_program: String,
    /// Kids block heading.
    pub sermon_kids: String,
    /// Gastro block heading.
    pub sermon_gastro: String,
    /// Today's appointments heading.
    pub today_title: String,
    /// Upcoming appointments heading.
    pub upcoming_title: String,
    /// Birthdays heading.
    pub birthdays_title: String,
    /// Verse heading.
    pub verse_title: String,
    /// Placeholder for appointments whose title is hidden.
    pub private_appointment: String,
}

impl Default for SignageLabels {
    fn default() -> Self {
        Self {
            sermon_title_sunday: "WIR FEIERN GOTTESDIENST".into(),
            sermon_title_weekday: "NÄCHSTER GOTTESDIENST".into(),
            sermon_program: "MIT DABEI".into(),
            sermon_kids: "FÜR UNSERE KIDS & TEENS".into(),
            sermon_gastro: "KAFFEE & BEGEGNUNG".into(),
            today_title: "HEUTE IM HAUS".into(),
            upcoming_title: "DEMNÄCHST".into(),
            birthdays_title: "GEBURTSTAGE".into(),
            verse_title: "TAGESVERS".into(),
            private_appointment: "Privater Termin".into(),
        }
    }
}

/// Devotionalium API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevotionaliumSettings {
    /// Endpoint URL.
    pub base_url: String,
    /// Language code.
    pub language: String,
    /// Bible translation code.
    pub bible_version: String,
}

impl Default for DevotionaliumSettings {
    fn default() -> Self {
        Self {
            base_url: verse::DEVOTIONALIUM_URL.into(),
            language: "de".into(),
            bible_version: "LUT".into(),
        }
    }
}

impl Settings {
    /// Load the document, substituting defaults when it is absent or malformed.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                tracing::info!("Loaded signage settings from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("Using default signage settings: {e}");
                Self::default()
            }
        }
    }

    /// Load the document, reporting why it could not be used.
    pub fn try_load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        Self::from_json(&raw).map_err(|e| match e {
            Error::Parse { message, .. } => Error::parse(message, path.to_path_buf()),
            other => other,
        })
    }

    /// Parse the document from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| Error::parse(e.to_string(), None))
    }

    /// Union of sermon, church-event and group-event calendars, sorted and deduplicated.
    pub fn configured_calendars(&self) -> Vec<CalendarId> {
        let c = &self.calendars;
        c.sermons
            .iter()
            .chain(&c.church_events)
            .chain(&c.group_events)
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether a calendar holds worship services.
    pub fn is_sermon_calendar(&self, id: CalendarId) -> bool {
        self.calendars.sermons.contains(&id)
    }

    /// Title override for a calendar, if configured.
    pub fn title_override(&self, id: CalendarId) -> Option<&str> {
        self.calendars.title_overrides.get(&id.to_string()).map(String::as_str)
    }

    /// Description override for a calendar, if configured (may be empty).
    pub fn description_override(&self, id: CalendarId) -> Option<&str> {
        self.calendars.description_overrides.get(&id.to_string()).map(String::as_str)
    }

    /// Service ids listed in the kids description map.
    pub fn kids_service_ids(&self) -> Vec<ServiceId> {
        let mut ids: Vec<_> = self
            .services
            .kids_descriptions
            .keys()
            .filter_map(|k| k.trim().parse().ok().map(ServiceId))
            .collect();
        ids.sort();
        ids
    }

    /// Descriptive text for a kids service.
    pub fn kids_description(&self, id: ServiceId) -> Option<&str> {
        self.services
            .kids_descriptions
            .get(&id.to_string())
            .map(String::as_str)
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::io::Write;

    #[test]
    fn missing_document_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert!(settings.calendars.sermons.is_empty());
        assert_eq!(settings.resources.room_type_ids, vec![2]);
        assert_eq!(settings.signage.max_upcoming_days, 7);
    }

    #[test]
    fn missing_document_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        match Settings::try_load(&path).unwrap_err() {
            Error::Io { path: Some(p), .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_document_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(Settings::try_load(file.path()).is_err());
        let settings = Settings::load(file.path());
        assert_eq!(settings.signage.labels, SignageLabels::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let settings = Settings::from_json(
            r#"{"calendars": {"sermons": [10], "titleOverrides": {"10": "Gottesdienst"}},
                "signage": {"labels": {"sermonProgram": "DABEI"}}}"#,
        )
        .unwrap();
        assert_eq!(settings.calendars.sermons, vec![CalendarId(10)]);
        assert_eq!(settings.title_override(CalendarId(10)), Some("Gottesdienst"));
        assert_eq!(settings.signage.labels.sermon_program, "DABEI");
        assert_eq!(settings.signage.labels.sermon_kids, "FÜR UNSERE KIDS & TEENS");
        assert_eq!(settings.resources.room_type_ids, vec![2]);
    }

    #[test]
    fn configured_calendars_is_a_deduplicated_union() {
        let settings = Settings::from_json(
            r#"{"calendars": {"sermons": [10, 3], "churchEvents": [3, 4], "groupEvents": [10, 8]}}"#,
        )
        .unwrap();
        assert_eq!(
            settings.configured_calendars(),
            vec![CalendarId(3), CalendarId(4), CalendarId(8), CalendarId(10)]
        );
    }

    #[test]
    fn teens_service_has_a_default_that_can_be_disabled() {
        assert_eq!(Settings::default().services.teens_service_id, Some(ServiceId(62)));
        let partial = Settings::from_json(r#"{"services": {"gastroGroupId": 7}}"#).unwrap();
        assert_eq!(partial.services.teens_service_id, Some(ServiceId(62)));
        let disabled = Settings::from_json(r#"{"services": {"teensServiceId": null}}"#).unwrap();
        assert_eq!(disabled.services.teens_service_id, None);
    }

    #[test]
    fn kids_ids_come_from_description_keys() {
        let settings = Settings::from_json(
            r#"{"services": {"kidsDescriptions": {"61": "6-11 Jahre", "60": "0-5 Jahre", "x": "?"}}}"#,
        )
        .unwrap();
        assert_eq!(settings.kids_service_ids(), vec![ServiceId(60), ServiceId(61)]);
        assert_eq!(settings.kids_description(ServiceId(61)), Some("6-11 Jahre"));
    }
}
