//! Next-sermon selection and the enriched sermon detail.

// Constant regex patterns in LazyLock blocks
#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Local};
use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::LazyLock;

use crate::churchtools::types::{EventDetail, EventSummary, RawAppointment, ServiceCatalog};
use crate::constants::sermon::PREDIGT_MARKER;
use crate::normalize::appointments::start_instant;
use crate::normalize::extract;
use crate::normalize::format::{long_date, minutes_since_midnight, parse_timestamp, time_range};
use crate::normalize::resources::{join_labels, resource_labels};
use crate::normalize::roster::{self, SermonServices};
use crate::settings::Settings;

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>|<p(\s[^>]*)?>|</div\s*>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static ENTITY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap());
static PREDIGT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*predigt\s*:\s*").unwrap());

/// The sermon widget payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SermonDetail {
    /// Appointment id
    pub id: i64,
    /// Resolved title
    pub title: String,
    /// Resolved description, as delivered
    pub description: String,
    /// Calendar color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// `18. Oktober 2026`
    pub date: String,
    /// `10:00–11:30`
    pub time: String,
    /// Header image, empty when none
    pub image_url: String,
    /// Room labels
    pub location: String,
    /// Sermon topic without its label
    pub predigt_line: Option<String>,
    /// Lines matching a special keyword
    pub specials: Vec<String>,
    /// Roster, when a matching event was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<SermonServices>,
}

/// Earliest sermon-calendar appointment starting strictly after `now`.
pub fn select_next(appointments: Vec<RawAppointment>, settings: &Settings, now: DateTime<Local>) -> Option<RawAppointment> {
    appointments
        .into_iter()
        .filter(|a| settings.is_sermon_calendar(extract::calendar_id(a.json())))
        .filter_map(|a| start_instant(&a).map(|s| (s, a)))
        .filter(|(start, _)| *start > now)
        .min_by_key(|(start, _)| *start)
        .map(|(_, a)| a)
}

/// Decode one entity body (the text between `&` and `;`); unknown names stay as they are.
fn decode_entity(body: &str) -> Option<char> {
    match body {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = body.strip_prefix('#')?;
            let code = match num.strip_prefix(|c: char| c.eq_ignore_ascii_case(&'x')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Split a description (plain text or simple HTML) into trimmed, non-empty lines.
pub fn description_lines(raw: &str) -> Vec<String> {
    let text = LINE_BREAK.replace_all(raw, "\n");
    let text = TAG.replace_all(&text, "");
    let text = ENTITY.replace_all(&text, |caps: &Captures<'_>| {
        decode_entity(&caps[1]).map_or_else(|| caps[0].to_string(), String::from)
    });
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// The sermon topic: first line mentioning "predigt", without its label.
pub fn predigt_line(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .find(|l| l.to_lowercase().contains(PREDIGT_MARKER))
        .map(|l| PREDIGT_PREFIX.replace(l, "").trim().to_string())
}

/// Lines containing any special keyword (case-insensitive).
pub fn specials(lines: &[String], keywords: &[String]) -> Vec<String> {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    lines
        .iter()
        .filter(|l| {
            let lower = l.to_lowercase();
            keywords.iter().any(|k| lower.contains(k.as_str()))
        })
        .cloned()
        .collect()
}

/// Find the event created from a sermon appointment.
///
/// Tries the appointment id first, then the exact start string, then the
/// parsed start instant (which tolerates offset formatting differences).
pub fn find_event<'a>(events: &'a [EventSummary], appointment: &RawAppointment) -> Option<&'a EventSummary> {
    let json = appointment.json();
    let id = extract::appointment_id(json);
    let start = extract::start(json);
    let instant = parse_timestamp(start);

    events
        .iter()
        .find(|e| id != 0 && e.appointment_id == Some(id))
        .or_else(|| events.iter().find(|e| !start.is_empty() && e.start_date == start))
        .or_else(|| {
            let instant = instant?;
            events.iter().find(|e| parse_timestamp(&e.start_date) == Some(instant))
        })
}

/// Assemble the sermon widget.
///
/// `event` and `catalog` are optional: without a matched event there is no
/// roster, and predigt/specials come from the appointment description alone.
pub fn detail(
    appointment: &RawAppointment,
    settings: &Settings,
    event: Option<&EventDetail>,
    catalog: Option<&ServiceCatalog>,
    now: DateTime<Local>,
) -> SermonDetail {
    let json = appointment.json();
    let description = extract::description(json, settings);
    let start = parse_timestamp(extract::start(json));
    let end = parse_timestamp(extract::end(json));

    let mut lines = description_lines(&description);
    if let Some(event) = event {
        for line in description_lines(&event.description) {
            if !lines.contains(&line) {
                lines.push(line);
            }
        }
    }

    let services = event.map(|e| {
        let empty = ServiceCatalog::default();
        roster::build(&e.roster, catalog.unwrap_or(&empty), settings, &lines, minutes_since_midnight(&now))
    });

    SermonDetail {
        id: extract::appointment_id(json),
        title: extract::title(json, settings),
        description,
        color: extract::color(json).map(String::from),
        date: start.as_ref().map(long_date).unwrap_or_default(),
        time: time_range(start.as_ref(), end.as_ref()),
        image_url: extract::image(json).to_string(),
        location: join_labels(&resource_labels(json, &settings.resources.room_type_ids)),
        predigt_line: predigt_line(&lines),
        specials: specials(&lines, &settings.services.specials_keywords),
        services,
    }
}
