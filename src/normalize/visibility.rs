//! Public/private resolution for appointment titles.

use std::collections::HashMap;

use crate::churchtools::types::Calendar;
use crate::settings::Settings;
use crate::types::CalendarId;

/// Decides whether an appointment may show its real title.
#[derive(Debug, Clone, Default)]
pub struct Visibility {
    upstream: HashMap<CalendarId, bool>,
    static_public: Vec<CalendarId>,
    configured: Vec<CalendarId>,
}

impl Visibility {
    /// Combine upstream calendar metadata with the configured calendar lists.
    pub fn new(calendars: &[Calendar], settings: &Settings) -> Self {
        Self {
            upstream: calendars
                .iter()
                .filter_map(|c| c.is_public.map(|p| (c.id, p)))
                .collect(),
            static_public: settings.calendars.public_ids.clone(),
            configured: settings.configured_calendars(),
        }
    }

    /// A calendar is public by its explicit upstream flag, else by the static list.
    pub fn is_public_calendar(&self, id: CalendarId) -> bool {
        self.upstream
            .get(&id)
            .copied()
            .unwrap_or_else(|| self.static_public.contains(&id))
    }

    /// Explicit per-appointment flag wins; otherwise the calendar decides.
    pub fn is_public(&self, id: CalendarId, explicit: Option<bool>) -> bool {
        explicit.unwrap_or_else(|| self.is_public_calendar(id))
    }

    /// Real titles are shown for public calendars and for every configured calendar.
    pub fn allow_title(&self, id: CalendarId, explicit: Option<bool>) -> bool {
        self.is_public(id, explicit) || self.configured.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn calendar(id: i64, is_public: Option<bool>) -> Calendar {
        Calendar { id: CalendarId(id), name: String::new(), color: None, is_public }
    }

    #[test]
    fn explicit_flags_beat_the_static_list() {
        let settings = Settings::from_json(r#"{"calendars": {"publicIds": [1, 2]}}"#).unwrap();
        let vis = Visibility::new(&[calendar(1, Some(false)), calendar(3, Some(true))], &settings);
        assert!(!vis.is_public_calendar(CalendarId(1)));
        assert!(vis.is_public_calendar(CalendarId(2)));
        assert!(vis.is_public_calendar(CalendarId(3)));
        assert!(!vis.is_public_calendar(CalendarId(4)));
    }

    #[test]
    fn configured_calendars_may_always_show_titles() {
        let settings = Settings::from_json(r#"{"calendars": {"groupEvents": [9]}}"#).unwrap();
        let vis = Visibility::new(&[calendar(9, Some(false))], &settings);
        assert!(vis.allow_title(CalendarId(9), Some(false)));
        assert!(!vis.allow_title(CalendarId(8), None));
        assert!(vis.allow_title(CalendarId(8), Some(true)));
    }
}
