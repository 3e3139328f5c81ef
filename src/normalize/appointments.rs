//! Appointment rows for the today/upcoming lists and the flyer carousel.

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::churchtools::types::RawAppointment;
use crate::constants::display::{FLYER_HORIZON_DAYS, MAX_FLYERS};
use crate::normalize::extract;
use crate::normalize::format::{parse_timestamp, short_date, time_of_day};
use crate::normalize::resources::{join_labels, resource_labels, truncated_labels};
use crate::normalize::visibility::Visibility;
use crate::settings::Settings;
use crate::types::CalendarId;

/// Which list a row is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Full-width rows for today.
    Today,
    /// Compact rows; resource labels are width-capped.
    Upcoming,
}

/// One appointment in display form.
///
/// `title` is empty when the calendar is private and not configured; the
/// display renders a "private appointment" placeholder for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayAppointment {
    /// Appointment id
    pub id: i64,
    /// Same as `id`; kept for the display client
    pub church_tools_id: i64,
    /// Resolved title, empty for private calendars
    pub title: String,
    /// Calendar color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Resolved start timestamp as delivered upstream, for sorting and grouping
    pub start_date_time: String,
    /// `10:00`
    pub start_time: String,
    /// `11:30`, empty when unknown
    pub end_time: String,
    /// `So., 18. Okt.`
    pub date: String,
    /// Full location label
    pub location: String,
    /// Location label as shown in the row (capped for upcoming)
    pub resource: String,
    /// Whether the title may be shown
    pub is_public: bool,
    /// Owning calendar
    pub calendar_id: CalendarId,
    /// Flyer image, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One flyer in the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flyer {
    /// Source record id
    pub id: i64,
    /// Same as `id`; kept for the display client
    pub church_tools_id: i64,
    /// Image to show
    pub image_url: String,
    /// Caption
    pub title: String,
    /// Start timestamp; empty for standalone flyers
    pub start_date: String,
}

/// Resolved start instant of an appointment.
pub fn start_instant(appointment: &RawAppointment) -> Option<DateTime<Local>> {
    parse_timestamp(extract::start(appointment.json()))
}

/// Normalize one appointment.
pub fn to_display(
    appointment: &RawAppointment,
    kind: ListKind,
    settings: &Settings,
    visibility: &Visibility,
) -> DisplayAppointment {
    let json = appointment.json();
    let id = extract::appointment_id(json);
    let calendar_id = extract::calendar_id(json);
    let explicit_public = json.pointer("/base/calendar/isPublic").and_then(serde_json::Value::as_bool);
    let allow_title = visibility.allow_title(calendar_id, explicit_public);

    let start_raw = extract::start(json);
    let start = parse_timestamp(start_raw);
    let end = parse_timestamp(extract::end(json));

    let labels = resource_labels(json, &settings.resources.room_type_ids);
    let location = join_labels(&labels);
    let resource = match kind {
        ListKind::Today => location.clone(),
        ListKind::Upcoming => truncated_labels(&labels),
    };

    DisplayAppointment {
        id,
        church_tools_id: id,
        title: if allow_title { extract::title(json, settings) } else { String::new() },
        color: extract::color(json).map(String::from),
        start_date_time: start_raw.to_string(),
        start_time: start.as_ref().map(time_of_day).unwrap_or_default(),
        end_time: end.as_ref().map(time_of_day).unwrap_or_default(),
        date: start.as_ref().map(short_date).unwrap_or_default(),
        location,
        resource,
        is_public: allow_title,
        calendar_id,
        image_url: Some(extract::image(json)).filter(|u| !u.is_empty()).map(String::from),
    }
}

/// Appointments split into today and the following days.
#[derive(Debug, Clone, Default)]
pub struct DayPartition {
    /// Same local date as now
    pub today: Vec<RawAppointment>,
    /// Following days within the horizon
    pub upcoming: Vec<RawAppointment>,
}

/// Split appointments by local calendar day.
///
/// "Today" is the same local date as `now`; "upcoming" is strictly after today
/// and at most `max_upcoming_days` ahead. Sermon calendars and appointments
/// without a usable start are dropped. Both lists are sorted by start
/// (stable, so ties keep upstream order).
pub fn partition(appointments: Vec<RawAppointment>, settings: &Settings, now: DateTime<Local>) -> DayPartition {
    let today = now.date_naive();
    let last_day = today + Duration::days(settings.signage.max_upcoming_days.max(0));

    let mut dated: Vec<(DateTime<Local>, RawAppointment)> = appointments
        .into_iter()
        .filter(|a| !settings.is_sermon_calendar(extract::calendar_id(a.json())))
        .filter_map(|a| start_instant(&a).map(|s| (s, a)))
        .collect();
    dated.sort_by_key(|(start, _)| *start);

    let mut split = DayPartition::default();
    for (start, appointment) in dated {
        let day = start.date_naive();
        if day == today {
            split.today.push(appointment);
        } else if day > today && day <= last_day {
            split.upcoming.push(appointment);
        }
    }
    split
}

/// Normalize a list of appointments of one kind.
pub fn display_list(
    appointments: &[RawAppointment],
    kind: ListKind,
    settings: &Settings,
    visibility: &Visibility,
) -> Vec<DisplayAppointment> {
    appointments
        .iter()
        .map(|a| to_display(a, kind, settings, visibility))
        .collect()
}

/// Flyers: configured-calendar appointments with an image that have not started
/// before today, soonest first.
pub fn flyers(appointments: &[RawAppointment], settings: &Settings, now: DateTime<Local>) -> Vec<Flyer> {
    let configured = settings.configured_calendars();
    let today = now.date_naive();
    let last_day = today + Duration::days(FLYER_HORIZON_DAYS);

    let mut candidates: Vec<(DateTime<Local>, &RawAppointment)> = appointments
        .iter()
        .filter(|a| configured.contains(&extract::calendar_id(a.json())))
        .filter(|a| !extract::image(a.json()).is_empty())
        .filter_map(|a| start_instant(a).map(|s| (s, a)))
        .filter(|(s, _)| s.date_naive() >= today && s.date_naive() <= last_day)
        .collect();
    candidates.sort_by_key(|(start, _)| *start);

    candidates
        .into_iter()
        .take(MAX_FLYERS)
        .map(|(_, a)| {
            let json = a.json();
            let id = extract::appointment_id(json);
            Flyer {
                id,
                church_tools_id: id,
                image_url: extract::image(json).to_string(),
                title: extract::title(json, settings),
                start_date: extract::start(json).to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at(d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, d, h, 0, 0).single().unwrap()
    }

    fn appointment(id: i64, calendar: i64, start: DateTime<Local>) -> RawAppointment {
        RawAppointment(json!({
            "base": {"id": id, "title": format!("Termin {id}"), "calendar": {"id": calendar}},
            "calculated": {"startDate": start.to_rfc3339(), "endDate": (start + Duration::hours(1)).to_rfc3339()}
        }))
    }

    fn settings() -> Settings {
        Settings::from_json(r#"{"calendars": {"sermons": [10], "churchEvents": [2]}, "signage": {"maxUpcomingDays": 3}}"#)
            .unwrap()
    }

    #[test]
    fn partition_splits_by_local_day_and_excludes_sermons() {
        let now = at(16, 9);
        let split = partition(
            vec![
                appointment(1, 2, at(17, 10)),
                appointment(2, 2, at(16, 18)),
                appointment(3, 10, at(16, 10)),
                appointment(4, 2, at(16, 7)),
                appointment(5, 2, at(19, 10)),
                appointment(6, 2, at(20, 10)),
                appointment(7, 2, at(15, 10)),
            ],
            &settings(),
            now,
        );
        let ids = |list: &[RawAppointment]| list.iter().map(|a| extract::appointment_id(a.json())).collect::<Vec<_>>();
        assert_eq!(ids(&split.today), vec![4, 2]);
        assert_eq!(ids(&split.upcoming), vec![1, 5]);
    }

    #[test]
    fn ties_keep_upstream_order() {
        let split = partition(
            vec![appointment(8, 2, at(17, 10)), appointment(9, 2, at(17, 10))],
            &settings(),
            at(16, 9),
        );
        let ids: Vec<_> = split.upcoming.iter().map(|a| extract::appointment_id(a.json())).collect();
        assert_eq!(ids, vec![8, 9]);
    }

    #[test]
    fn private_calendar_titles_are_blanked() {
        let s = settings();
        let vis = Visibility::new(&[], &s);
        let private = to_display(&appointment(1, 99, at(16, 10)), ListKind::Today, &s, &vis);
        assert_eq!(private.title, "");
        assert!(!private.is_public);

        let configured = to_display(&appointment(2, 2, at(16, 10)), ListKind::Today, &s, &vis);
        assert_eq!(configured.title, "Termin 2");
        assert!(configured.is_public);
        assert_eq!(configured.start_time, "10:00");
        assert_eq!(configured.end_time, "11:00");
        assert_eq!(configured.date, "Fr., 16. Okt.");
    }

    #[test]
    fn explicit_public_flag_on_the_appointment_is_honored() {
        let s = settings();
        let vis = Visibility::new(&[], &s);
        let a = RawAppointment(json!({
            "base": {"id": 5, "title": "Offen", "calendar": {"id": 42, "isPublic": true}},
            "calculated": {"startDate": at(16, 10).to_rfc3339()}
        }));
        assert_eq!(to_display(&a, ListKind::Today, &s, &vis).title, "Offen");
    }

    #[test]
    fn upcoming_rows_cap_the_resource_label() {
        let s = settings();
        let vis = Visibility::new(&[], &s);
        let mut a = appointment(1, 2, at(17, 10));
        a.0["bookings"] = json!([
            {"resource": {"name": "Grosser Gemeindesaal", "resourceTypeId": 2}},
            {"resource": {"name": "Kleiner Saal", "resourceTypeId": 2}},
            {"resource": {"name": "Jugendraum", "resourceTypeId": 2}},
            {"resource": {"name": "Kapelle", "resourceTypeId": 2}}
        ]);
        let today = to_display(&a, ListKind::Today, &s, &vis);
        let upcoming = to_display(&a, ListKind::Upcoming, &s, &vis);
        assert_eq!(today.resource, "Grosser Gemeindesaal, Kleiner Saal, Jugendraum, Kapelle");
        assert_eq!(upcoming.resource, "Grosser Gemeindesaal, Kleiner Saal, Jugendraum +1 more");
        assert_eq!(upcoming.location, today.location);
    }

    #[test]
    fn flyers_need_configured_calendar_and_image() {
        let s = settings();
        let now = at(16, 9);
        let mut with_image = appointment(1, 2, at(20, 10));
        with_image.0["base"]["image"] = json!({"fileUrl": "https://img/1.jpg"});
        let mut foreign = appointment(2, 99, at(18, 10));
        foreign.0["base"]["image"] = json!({"fileUrl": "https://img/2.jpg"});
        let plain = appointment(3, 2, at(18, 10));
        let mut soon = appointment(4, 2, at(17, 10));
        soon.0["event"] = json!({"image": {"imageUrl": "https://img/4.jpg"}});

        let result = flyers(&[with_image, foreign, plain, soon], &s, now);
        let ids: Vec<_> = result.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![4, 1]);
        assert_eq!(result[0].image_url, "https://img/4.jpg");
    }

    #[test]
    fn flyers_are_capped() {
        let s = settings();
        let list: Vec<_> = (1..=8)
            .map(|i| {
                let mut a = appointment(i, 2, at(17, 8 + u32::try_from(i).unwrap()));
                a.0["base"]["image"] = json!({"fileUrl": "https://img/x.jpg"});
                a
            })
            .collect();
        assert_eq!(flyers(&list, &s, at(16, 9)).len(), 5);
    }
}
