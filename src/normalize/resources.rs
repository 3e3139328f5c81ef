//! Resource and location labels for bookings.

use serde_json::Value;

use crate::constants::display::{MAX_RESOURCE_CHARS, VISIBLE_RESOURCE_LABELS};
use crate::normalize::extract::{first_i64, first_object, BOOKING_RESOURCE, RESOURCE_TYPE};

/// Resolve the resource object of a booking.
///
/// Prefers the first candidate that carries a name; falls back to the first
/// object found at all.
pub fn booking_resource(booking: &Value) -> Option<&Value> {
    BOOKING_RESOURCE
        .iter()
        .filter_map(|path| booking.pointer(path))
        .find(|r| r["name"].as_str().is_some_and(|n| !n.is_empty()))
        .or_else(|| first_object(booking, BOOKING_RESOURCE))
}

/// `"{name} ({location})"`, or just the name.
fn label(booking: &Value) -> String {
    let Some(resource) = booking_resource(booking) else {
        return String::new();
    };
    let name = resource["name"].as_str().unwrap_or_default();
    match resource["location"].as_str().filter(|l| !l.is_empty()) {
        Some(loc) => format!("{name} ({loc})"),
        None => name.to_string(),
    }
}

fn is_room(booking: &Value, room_type_ids: &[i64]) -> bool {
    booking_resource(booking)
        .and_then(|r| first_i64(r, RESOURCE_TYPE))
        .is_some_and(|t| room_type_ids.contains(&t))
}

/// Labels of the room-typed bookings; every booking when none is a room.
pub fn resource_labels(appointment: &Value, room_type_ids: &[i64]) -> Vec<String> {
    let bookings = appointment["bookings"].as_array().map(|a| a.as_slice()).unwrap_or(&[]);

    let rooms: Vec<String> = bookings
        .iter()
        .filter(|b| is_room(b, room_type_ids))
        .map(label)
        .filter(|l| !l.is_empty())
        .collect();
    if !rooms.is_empty() {
        return rooms;
    }

    bookings.iter().map(label).filter(|l| !l.is_empty()).collect()
}

/// Join labels with `", "`.
pub fn join_labels(labels: &[String]) -> String {
    labels.join(", ")
}

/// Join labels, capping the width for compact rows.
///
/// Past the width limit only the first three labels are kept, followed by
/// `" +{N} more"` for the omitted ones. Three or fewer labels are never
/// suffixed.
pub fn truncated_labels(labels: &[String]) -> String {
    let joined = join_labels(labels);
    if joined.chars().count() <= MAX_RESOURCE_CHARS || labels.len() <= VISIBLE_RESOURCE_LABELS {
        return joined;
    }
    format!(
        "{} +{} more",
        join_labels(&labels[..VISIBLE_RESOURCE_LABELS]),
        labels.len() - VISIBLE_RESOURCE_LABELS
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn resolves_resource_across_nestings() {
        let direct = json!({"resource": {"name": "Saal", "resourceTypeId": 2}});
        let base = json!({"base": {"resource": {"name": "Foyer"}}});
        let wrapped = json!({"resource": {"base": {"name": "Kapelle"}}});
        let deep = json!({"base": {"resource": {"base": {"name": "Keller"}}}});
        assert_eq!(booking_resource(&direct).unwrap()["name"], "Saal");
        assert_eq!(booking_resource(&base).unwrap()["name"], "Foyer");
        assert_eq!(booking_resource(&wrapped).unwrap()["name"], "Kapelle");
        assert_eq!(booking_resource(&deep).unwrap()["name"], "Keller");
        assert!(booking_resource(&json!({})).is_none());
    }

    #[test]
    fn rooms_filter_out_equipment() {
        let appointment = json!({"bookings": [
            {"resource": {"name": "Beamer", "resourceTypeId": 5}},
            {"resource": {"name": "Saal", "location": "EG", "resourceTypeId": 2}},
            {"base": {"resource": {"name": "Kapelle", "resourceType": {"id": 2}}}}
        ]});
        assert_eq!(resource_labels(&appointment, &[2]), strings(&["Saal (EG)", "Kapelle"]));
    }

    #[test]
    fn falls_back_to_all_bookings_without_rooms() {
        let appointment = json!({"bookings": [
            {"resource": {"name": "Beamer", "resourceTypeId": 5}},
            {"resource": {"name": "Bus", "resourceTypeId": 7}}
        ]});
        assert_eq!(resource_labels(&appointment, &[2]), strings(&["Beamer", "Bus"]));
        assert!(resource_labels(&json!({}), &[2]).is_empty());
    }

    #[test]
    fn long_label_lists_keep_three_and_count_the_rest() {
        let labels = strings(&["Grosser Saal", "Kleiner Saal", "Jugendraum", "Kapelle"]);
        let joined = join_labels(&labels);
        assert!(joined.len() > 40);
        assert_eq!(truncated_labels(&labels), "Grosser Saal, Kleiner Saal, Jugendraum +1 more");
    }

    #[test]
    fn three_long_labels_are_never_suffixed() {
        let labels = strings(&["Grosser Gemeindesaal", "Kleiner Gemeindesaal", "Jugendraum"]);
        assert!(join_labels(&labels).len() > 40);
        assert_eq!(truncated_labels(&labels), join_labels(&labels));
    }

    #[test]
    fn short_label_lists_are_untouched() {
        let labels = strings(&["A", "B", "C", "D", "E"]);
        assert_eq!(truncated_labels(&labels), "A, B, C, D, E");
    }
}
