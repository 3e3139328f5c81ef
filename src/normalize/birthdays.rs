//! Birthday rows for the current week.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use crate::constants::display::{MAX_BIRTHDAYS, UNKNOWN_PERSON};
use crate::normalize::extract::{first_i64, first_text};
use crate::normalize::format::weekday_date;

/// One birthday in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Birthday {
    /// Person id
    pub id: i64,
    /// Same as `id`; kept for the display client
    pub church_tools_id: i64,
    /// `First Last`, or `Unbekannt`
    pub name: String,
    /// `Mittwoch, 21. Oktober`
    pub birthday_text: String,
    /// Image URL, empty when unknown
    pub avatar: String,
}

/// Monday and Sunday of the week containing `today`.
pub fn week_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    (monday, monday + Duration::days(6))
}

fn anniversary(row: &Value) -> Option<NaiveDate> {
    let raw = first_text(row, &["/anniversary", "/date"])?;
    NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d").ok()
}

fn name(row: &Value) -> String {
    let attrs = &row["person"]["domainAttributes"];
    let full = format!(
        "{} {}",
        attrs["firstName"].as_str().unwrap_or_default(),
        attrs["lastName"].as_str().unwrap_or_default()
    );
    let full = full.trim();
    if full.is_empty() {
        first_text(row, &["/person/title"]).unwrap_or(UNKNOWN_PERSON).to_string()
    } else {
        full.to_string()
    }
}

/// Normalize upstream birthday rows: sorted by date, capped.
pub fn birthdays(rows: &[Value]) -> Vec<Birthday> {
    let mut dated: Vec<(Option<NaiveDate>, &Value)> = rows.iter().map(|r| (anniversary(r), r)).collect();
    // Undated rows go last.
    dated.sort_by_key(|(date, _)| (date.is_none(), *date));

    dated
        .into_iter()
        .take(MAX_BIRTHDAYS)
        .map(|(date, row)| {
            let id = first_i64(row, &["/person/domainIdentifier", "/id"]).unwrap_or_default();
            Birthday {
                id,
                church_tools_id: id,
                name: name(row),
                birthday_text: date.map(weekday_date).unwrap_or_default(),
                avatar: first_text(row, &["/person/imageUrl"]).unwrap_or_default().to_string(),
            }
        })
        .collect()
}
