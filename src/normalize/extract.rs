//! Field extraction with fallback chains.
//!
//! `ChurchTools` carries the same logical field under different nestings
//! (calculated occurrence, linked appointment, base definition). Each chain is
//! an ordered list of JSON pointers; the first present, non-empty value wins.

use serde_json::Value;

use crate::constants::display::DEFAULT_TITLE;
use crate::settings::Settings;
use crate::types::CalendarId;

/// Ordered JSON-pointer candidates for one logical field.
pub type Chain = &'static [&'static str];

/// Start timestamp: calculated occurrence, nested appointment, base definition.
pub const START: Chain = &["/calculated/startDate", "/appointment/calculated/startDate", "/base/startDate"];

/// End timestamp, same precedence as [`START`].
pub const END: Chain = &["/calculated/endDate", "/appointment/calculated/endDate", "/base/endDate"];

/// Image URL: file URLs before alternate URLs, base before linked event.
pub const IMAGE: Chain = &[
    "/base/image/fileUrl",
    "/event/image/fileUrl",
    "/base/image/imageUrl",
    "/event/image/imageUrl",
];

/// Upstream title candidates (after any override).
pub const TITLE: Chain = &["/base/title", "/base/caption"];

/// Upstream description candidates (after any override).
pub const DESCRIPTION: Chain = &["/base/description"];

/// Calendar color.
pub const COLOR: Chain = &["/base/calendar/color"];

/// Where the resource object hides inside a booking.
pub const BOOKING_RESOURCE: Chain = &["/resource", "/base/resource", "/resource/base", "/base/resource/base"];

/// Resource-type id inside a resource object.
pub const RESOURCE_TYPE: Chain = &["/resourceTypeId", "/resourceType/id"];

/// First candidate holding a non-empty string.
pub fn first_text<'a>(value: &'a Value, chain: Chain) -> Option<&'a str> {
    chain
        .iter()
        .filter_map(|path| value.pointer(path))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
}

/// First candidate holding a JSON object.
pub fn first_object<'a>(value: &'a Value, chain: Chain) -> Option<&'a Value> {
    chain.iter().filter_map(|path| value.pointer(path)).find(|v| v.is_object())
}

/// First candidate holding an integer (or numeric string).
pub fn first_i64(value: &Value, chain: Chain) -> Option<i64> {
    chain.iter().filter_map(|path| value.pointer(path)).find_map(|v| {
        v.as_i64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

/// Resolved start timestamp, or empty.
pub fn start(appointment: &Value) -> &str {
    first_text(appointment, START).unwrap_or_default()
}

/// Resolved end timestamp, or empty.
pub fn end(appointment: &Value) -> &str {
    first_text(appointment, END).unwrap_or_default()
}

/// Resolved image URL, or empty.
pub fn image(appointment: &Value) -> &str {
    first_text(appointment, IMAGE).unwrap_or_default()
}

/// Calendar color, if any.
pub fn color(appointment: &Value) -> Option<&str> {
    first_text(appointment, COLOR)
}

/// Appointment id (`base.id`), 0 when absent.
pub fn appointment_id(appointment: &Value) -> i64 {
    first_i64(appointment, &["/base/id", "/id"]).unwrap_or_default()
}

/// Owning calendar id (`base.calendar.id`), 0 when absent.
pub fn calendar_id(appointment: &Value) -> CalendarId {
    CalendarId(first_i64(appointment, &["/base/calendar/id"]).unwrap_or_default())
}

/// Display title: calendar override, base title, base caption, generic placeholder.
///
/// A non-empty override always wins over upstream text.
pub fn title(appointment: &Value, settings: &Settings) -> String {
    settings
        .title_override(calendar_id(appointment))
        .filter(|o| !o.is_empty())
        .or_else(|| first_text(appointment, TITLE))
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

/// Display description: calendar override (an empty override is honored),
/// base description, empty.
pub fn description(appointment: &Value, settings: &Settings) -> String {
    settings
        .description_override(calendar_id(appointment))
        .or_else(|| first_text(appointment, DESCRIPTION))
        .unwrap_or_default()
        .to_string()
}
