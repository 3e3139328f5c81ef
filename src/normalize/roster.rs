//! Service roster buckets for the sermon detail.
//!
//! Each roster entry of the matched event lands in at most one bucket:
//! program (featured or other), kids, or gastro. Gastro roles are enumerated
//! from the service catalog so that unstaffed roles still appear.

use serde::Serialize;
use std::collections::HashSet;

use crate::churchtools::types::{RosterEntry, ServiceCatalog};
use crate::constants::display::UNKNOWN_SERVICE;
use crate::constants::sermon::{FEATURED_ROLES, KIDS_INSIDE, KIDS_OUTSIDE, TEENS_INSIDE, TEENS_OUTSIDE};
use crate::normalize::gastro::{self, GastroState, Tone};
use crate::settings::Settings;
use crate::types::{ServiceGroupId, ServiceId};

/// A staffed program role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramEntry {
    /// Service id
    pub id: ServiceId,
    /// Role name
    pub name: String,
    /// Assigned person
    pub person: Option<String>,
    /// Person's image URL
    pub avatar: Option<String>,
    /// Role label for featured roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Program roles split into prominent and compact ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgramServices {
    /// Preacher, host and prayer roles
    pub featured: Vec<ProgramEntry>,
    /// Remaining staffed roles
    pub others: Vec<ProgramEntry>,
}

/// A kids or teens program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KidsEntry {
    /// Service id
    pub id: ServiceId,
    /// Program name
    pub name: String,
    /// Indoor/outdoor note from the description
    pub status_label: Option<String>,
    /// Configured text, e.g. an age range
    pub description: Option<String>,
}

/// A catering role with its live status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GastroEntry {
    /// Service id
    pub id: ServiceId,
    /// Role name
    pub name: String,
    /// Current state
    pub status: GastroState,
    /// German badge text
    pub label: String,
    /// Badge color
    pub tone: Tone,
}

/// All roster buckets of one sermon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SermonServices {
    /// Program roles
    pub program: ProgramServices,
    /// Kids and teens programs
    pub kids: Vec<KidsEntry>,
    /// Catering roles
    pub gastro: Vec<GastroEntry>,
}

/// Status strings for kids and teens, picked from description keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KidsStatusLabels {
    /// Status for kids programs
    pub kids: Option<String>,
    /// Status for the teens program
    pub teens: Option<String>,
}

/// Scan description lines for the kids/teens location keywords.
///
/// Matching is a case-insensitive substring search; "outside" wins over
/// "inside" when both occur.
pub fn kids_status(lines: &[String], settings: &Settings) -> KidsStatusLabels {
    let lowered: Vec<String> = lines.iter().map(|l| l.to_lowercase()).collect();
    let mentions = |keyword: &str| lowered.iter().any(|l| l.contains(keyword));
    let status = &settings.services.kids_status;

    let pick = |outside: &str, inside: &str, out_text: &String, in_text: &String| {
        if mentions(outside) {
            Some(out_text.clone())
        } else if mentions(inside) {
            Some(in_text.clone())
        } else {
            None
        }
    };

    KidsStatusLabels {
        kids: pick(KIDS_OUTSIDE, KIDS_INSIDE, &status.kids_outside, &status.kids_inside),
        teens: pick(TEENS_OUTSIDE, TEENS_INSIDE, &status.teens_outside, &status.teens_inside),
    }
}

/// Keep the first entry per service id.
fn dedupe<T>(items: Vec<T>, id: impl Fn(&T) -> ServiceId) -> Vec<T> {
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(id(item))).collect()
}

fn display_name(entry: &RosterEntry, catalog: &ServiceCatalog) -> String {
    catalog
        .get(entry.service_id)
        .map(|d| d.name.as_str())
        .filter(|n| !n.is_empty())
        .or(entry.service_name.as_deref())
        .unwrap_or(UNKNOWN_SERVICE)
        .to_string()
}

fn group_of(entry: &RosterEntry, catalog: &ServiceCatalog) -> Option<ServiceGroupId> {
    catalog
        .get(entry.service_id)
        .and_then(|d| d.service_group_id)
        .or(entry.service_group_id)
}

fn featured_label(id: ServiceId) -> Option<&'static str> {
    FEATURED_ROLES
        .iter()
        .find(|(role, _)| *role == id.get())
        .map(|(_, label)| *label)
}

/// Build the program, kids and gastro buckets.
pub fn build(
    roster: &[RosterEntry],
    catalog: &ServiceCatalog,
    settings: &Settings,
    description_lines: &[String],
    minute: u32,
) -> SermonServices {
    let services = &settings.services;
    let kids_ids = settings.kids_service_ids();
    let is_kids = |id: ServiceId| kids_ids.contains(&id) || services.teens_service_id == Some(id);
    let in_group = |group: Option<ServiceGroupId>, target: Option<ServiceGroupId>| {
        target.is_some() && group == target
    };

    let program: Vec<(Option<ServiceGroupId>, ProgramEntry)> = roster
        .iter()
        .filter(|e| e.is_staffed() && !is_kids(e.service_id))
        .map(|e| (group_of(e, catalog), e))
        .filter(|(group, _)| {
            !in_group(*group, services.kids_group_id) && !in_group(*group, services.gastro_group_id)
        })
        .map(|(group, e)| {
            let entry = ProgramEntry {
                id: e.service_id,
                name: display_name(e, catalog),
                person: e.person.clone(),
                avatar: e.avatar.clone(),
                label: featured_label(e.service_id).map(String::from),
            };
            (group, entry)
        })
        .collect();
    let (featured, others): (Vec<_>, Vec<_>) = dedupe(program, |(_, p)| p.id)
        .into_iter()
        .partition(|(_, p)| p.label.is_some());
    // Excluded groups only thin out the compact tags.
    let featured = featured.into_iter().map(|(_, p)| p).collect();
    let others = others
        .into_iter()
        .filter(|(group, _)| !group.is_some_and(|g| services.exclude_group_ids.contains(&g)))
        .map(|(_, p)| p)
        .collect();

    let status = kids_status(description_lines, settings);
    let kids = roster
        .iter()
        .filter(|e| is_kids(e.service_id))
        .map(|e| {
            let is_teens = services.teens_service_id == Some(e.service_id);
            KidsEntry {
                id: e.service_id,
                name: display_name(e, catalog),
                status_label: if is_teens { status.teens.clone() } else { status.kids.clone() },
                description: settings.kids_description(e.service_id).map(String::from),
            }
        })
        .collect();

    SermonServices {
        program: ProgramServices { featured, others },
        kids: dedupe(kids, |k| k.id),
        gastro: gastro_bucket(roster, catalog, services.gastro_group_id, minute),
    }
}

fn gastro_bucket(
    roster: &[RosterEntry],
    catalog: &ServiceCatalog,
    group: Option<ServiceGroupId>,
    minute: u32,
) -> Vec<GastroEntry> {
    let Some(group) = group else {
        return Vec::new();
    };

    let staffed = |id: ServiceId| roster.iter().any(|e| e.service_id == id && e.is_staffed());
    let entry = |id: ServiceId, name: String| {
        let state = gastro::status(id, staffed(id), minute);
        GastroEntry { id, name, status: state, label: state.label().to_string(), tone: state.tone() }
    };

    let from_catalog = catalog.in_group(group).map(|d| entry(d.id, d.name.clone()));
    let from_roster = roster
        .iter()
        .filter(|e| e.service_group_id == Some(group))
        .map(|e| entry(e.service_id, display_name(e, catalog)));

    dedupe(from_catalog.chain(from_roster).collect(), |g| g.id)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::churchtools::types::ServiceDefinition;

    fn entry(id: i64, person: Option<&str>) -> RosterEntry {
        RosterEntry {
            service_id: ServiceId(id),
            service_name: None,
            service_group_id: None,
            person: person.map(String::from),
            avatar: None,
        }
    }

    fn def(id: i64, name: &str, group: i64) -> ServiceDefinition {
        ServiceDefinition { id: ServiceId(id), name: name.into(), service_group_id: Some(ServiceGroupId(group)) }
    }

    fn catalog() -> ServiceCatalog {
        ServiceCatalog::new(vec![
            def(24, "Predigt", 1),
            def(27, "Moderation", 1),
            def(30, "Technik", 2),
            def(40, "Ordner", 9),
            def(60, "Kids 0-5", 5),
            def(61, "Kids 6-11", 5),
            def(62, "Teens", 5),
            def(85, "Kaffeebar", 7),
            def(86, "Bistro", 7),
        ])
    }

    fn settings() -> Settings {
        Settings::from_json(
            r#"{"services": {
                "excludeGroupIds": [9], "kidsGroupId": 5, "gastroGroupId": 7, "teensServiceId": 62,
                "kidsDescriptions": {"60": "0-5 Jahre", "61": "6-11 Jahre"}
            }}"#,
        )
        .unwrap()
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn program_splits_featured_from_others() {
        let roster = vec![
            entry(24, Some("Anna")),
            entry(30, Some("Ben")),
            entry(27, None),
            entry(40, Some("Carl")),
            entry(85, Some("Dora")),
        ];
        let services = build(&roster, &catalog(), &settings(), &[], 0);
        let featured: Vec<_> = services.program.featured.iter().map(|p| p.id.get()).collect();
        let others: Vec<_> = services.program.others.iter().map(|p| p.id.get()).collect();
        assert_eq!(featured, vec![24]);
        assert_eq!(others, vec![30]);
        assert_eq!(services.program.featured[0].label.as_deref(), Some("Predigt"));
    }

    #[test]
    fn excluded_group_keeps_featured_roles() {
        let s = Settings::from_json(r#"{"services": {"excludeGroupIds": [1]}}"#).unwrap();
        let cat = ServiceCatalog::new(vec![def(24, "Predigt", 1), def(31, "Licht", 1)]);
        let roster = vec![entry(24, Some("Anna")), entry(31, Some("Ben"))];
        let services = build(&roster, &cat, &s, &[], 0);
        let featured: Vec<_> = services.program.featured.iter().map(|p| p.id.get()).collect();
        assert_eq!(featured, vec![24]);
        assert!(services.program.others.is_empty());
    }

    #[test]
    fn duplicate_service_ids_collapse_per_bucket() {
        let roster = vec![entry(30, Some("Ben")), entry(30, Some("Eva")), entry(61, None), entry(61, Some("Fe"))];
        let services = build(&roster, &catalog(), &settings(), &[], 0);
        assert_eq!(services.program.others.len(), 1);
        assert_eq!(services.program.others[0].person.as_deref(), Some("Ben"));
        assert_eq!(services.kids.len(), 1);
    }

    #[test]
    fn catalog_miss_uses_roster_fields() {
        let mut unknown = entry(99, Some("Gina"));
        unknown.service_name = Some("Lobpreis".into());
        let nameless = entry(98, Some("Hans"));
        let services = build(&[unknown, nameless], &catalog(), &settings(), &[], 0);
        let names: Vec<_> = services.program.others.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Lobpreis", "Dienst"]);
    }

    #[test]
    fn kids_get_status_and_description() {
        let roster = vec![entry(61, Some("Ina")), entry(62, Some("Jo"))];
        let desc = lines(&["Heute: Kids draussen!", "Teens drinnen"]);
        let s = settings();
        let services = build(&roster, &catalog(), &s, &desc, 0);
        assert_eq!(services.kids.len(), 2);
        assert_eq!(services.kids[0].status_label.as_ref(), Some(&s.services.kids_status.kids_outside));
        assert_eq!(services.kids[0].description.as_deref(), Some("6-11 Jahre"));
        assert_eq!(services.kids[1].status_label.as_ref(), Some(&s.services.kids_status.teens_inside));
        assert_eq!(services.kids[1].description, None);
    }

    #[test]
    fn outside_beats_inside() {
        let s = settings();
        let status = kids_status(&lines(&["kids drinnen", "KIDS DRAUSSEN"]), &s);
        assert_eq!(status.kids.as_ref(), Some(&s.services.kids_status.kids_outside));
        assert_eq!(status.teens, None);
    }

    #[test]
    fn gastro_lists_unstaffed_roles_from_catalog() {
        let roster = vec![entry(85, Some("Kim"))];
        let services = build(&roster, &catalog(), &settings(), &[], 9 * 60 + 40);
        let gastro: Vec<_> = services.gastro.iter().map(|g| (g.id.get(), g.status)).collect();
        assert_eq!(gastro, vec![(85, GastroState::Open), (86, GastroState::Unavailable)]);
        assert_eq!(services.gastro[1].label, "Nicht besetzt");
    }

    #[test]
    fn no_gastro_group_means_no_gastro() {
        let services = build(&[entry(85, Some("Kim"))], &catalog(), &Settings::default(), &[], 0);
        assert!(services.gastro.is_empty());
    }
}
