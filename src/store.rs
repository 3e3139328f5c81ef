//! In-memory fallback store.
//!
//! Sample data used when no `ChurchTools` credentials are configured, so a
//! fresh installation shows a populated display. It is not a cache of
//! upstream data.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::constants::verse::{FALLBACK_REFERENCE, FALLBACK_TEXT};
use crate::normalize::birthdays::week_range;
use crate::normalize::format::{short_date, time_of_day, weekday_date};
use crate::normalize::{Birthday, DisplayAppointment, Flyer};
use crate::types::CalendarId;

/// Maximum rows returned by [`MemoryStore::upcoming_bookings`].
const MAX_UPCOMING_BOOKINGS: usize = 6;

/// A promotional event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Assigned on insert
    pub id: i64,
    /// Event title
    pub title: String,
    /// Teaser text
    pub description: Option<String>,
    /// Start
    pub start: DateTime<Local>,
    /// End
    pub end: DateTime<Local>,
    /// Flyer image
    pub image_url: Option<String>,
    /// Address or room
    pub location: Option<String>,
}

/// A room booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomBooking {
    /// Assigned on insert
    pub id: i64,
    /// What the room is booked for
    pub title: String,
    /// Start
    pub start: DateTime<Local>,
    /// End
    pub end: DateTime<Local>,
    /// Booked room
    pub resource_name: String,
}

/// A person's birthday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBirthday {
    /// Assigned on insert
    pub id: i64,
    /// Display name
    pub name: String,
    /// Date of birth; only month and day matter
    pub birth_date: NaiveDate,
    /// Portrait
    pub avatar_url: Option<String>,
}

/// Verse assigned to a week (Monday).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseOfWeek {
    /// Assigned on insert
    pub id: i64,
    /// Verse text
    pub text: String,
    /// Bible reference
    pub reference: String,
    /// Monday of the week
    pub week_start: NaiveDate,
}

/// A standalone flyer image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFlyer {
    /// Assigned on insert
    pub id: i64,
    /// Image to show
    pub image_url: String,
    /// Shown as the flyer title
    pub description: String,
}

#[derive(Default)]
struct StoreData {
    events: BTreeMap<i64, Event>,
    bookings: BTreeMap<i64, RoomBooking>,
    birthdays: BTreeMap<i64, StoredBirthday>,
    verses: BTreeMap<i64, VerseOfWeek>,
    flyers: BTreeMap<i64, StoredFlyer>,
    next_id: i64,
}

impl StoreData {
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Thread-safe CRUD store; clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<StoreData>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with sample data relative to `now`.
    pub fn seeded(now: DateTime<Local>) -> Self {
        let store = Self::new();
        let today = now.date_naive();
        let at = |day: NaiveDate, hour: u32, minute: u32| {
            day.and_hms_opt(hour, minute, 0)
                .and_then(|dt| Local.from_local_datetime(&dt).earliest())
                .unwrap_or(now)
        };
        let tomorrow = today + Duration::days(1);
        let day_after = today + Duration::days(2);

        let open_house = now + Duration::days(3);
        store.create_event(Event {
            id: 0,
            title: "Tag der offenen Tür".into(),
            description: Some("Gebäudeführung, Kinderattraktionen, Kaffee und Kuchen".into()),
            start: open_house,
            end: open_house + Duration::hours(4),
            image_url: Some("https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=800&h=400&fit=crop".into()),
            location: Some("Habsburgstr. 17, 8037 Zürich".into()),
        });

        for (title, day, (sh, sm), (eh, em), room) in [
            ("Hauskreis", today, (10, 0), (12, 0), "Hauptraum"),
            ("Bibelstunde", today, (14, 0), (16, 0), "Seminarraum"),
            ("Jugendtreff", today, (19, 0), (20, 30), "Jugendraum"),
            ("Gebetskreis", tomorrow, (9, 0), (10, 0), "Kapelle"),
            ("Worship Team Abend", tomorrow, (18, 0), (20, 0), "Hauptraum"),
            ("Seniorentreff", day_after, (14, 30), (16, 30), "Seminarraum"),
        ] {
            store.create_booking(RoomBooking {
                id: 0,
                title: title.into(),
                start: at(day, sh, sm),
                end: at(day, eh, em),
                resource_name: room.into(),
            });
        }

        let (monday, _) = week_range(today);
        store.create_birthday(StoredBirthday {
            id: 0,
            name: "Anna Müller".into(),
            birth_date: monday + Duration::days(2),
            avatar_url: None,
        });
        store.create_birthday(StoredBirthday {
            id: 0,
            name: "Peter Schmidt".into(),
            birth_date: monday + Duration::days(5),
            avatar_url: None,
        });

        store.create_verse(VerseOfWeek {
            id: 0,
            text: FALLBACK_TEXT.into(),
            reference: FALLBACK_REFERENCE.into(),
            week_start: monday,
        });

        store
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreData> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert an event; its id is assigned by the store.
    pub fn create_event(&self, mut event: Event) -> Event {
        let mut data = self.write();
        event.id = data.allocate_id();
        data.events.insert(event.id, event.clone());
        event
    }

    /// Insert a booking, assigning its id.
    pub fn create_booking(&self, mut booking: RoomBooking) -> RoomBooking {
        let mut data = self.write();
        booking.id = data.allocate_id();
        data.bookings.insert(booking.id, booking.clone());
        booking
    }

    /// Insert a birthday, assigning its id.
    pub fn create_birthday(&self, mut birthday: StoredBirthday) -> StoredBirthday {
        let mut data = self.write();
        birthday.id = data.allocate_id();
        data.birthdays.insert(birthday.id, birthday.clone());
        birthday
    }

    /// Insert a verse of the week, assigning its id.
    pub fn create_verse(&self, mut verse: VerseOfWeek) -> VerseOfWeek {
        let mut data = self.write();
        verse.id = data.allocate_id();
        data.verses.insert(verse.id, verse.clone());
        verse
    }

    /// Insert a flyer, assigning its id.
    pub fn create_flyer(&self, mut flyer: StoredFlyer) -> StoredFlyer {
        let mut data = self.write();
        flyer.id = data.allocate_id();
        data.flyers.insert(flyer.id, flyer.clone());
        flyer
    }

    /// Events starting after `now`, soonest first.
    pub fn upcoming_events(&self, now: DateTime<Local>, limit: usize) -> Vec<Event> {
        let mut events: Vec<Event> = self.read().events.values().filter(|e| e.start > now).cloned().collect();
        events.sort_by_key(|e| e.start);
        events.truncate(limit);
        events
    }

    /// Bookings on the local day of `now`.
    pub fn today_bookings(&self, now: DateTime<Local>) -> Vec<RoomBooking> {
        let today = now.date_naive();
        self.sorted_bookings(|b| b.start.date_naive() == today)
    }

    /// Bookings after today, at most `days` ahead.
    pub fn upcoming_bookings(&self, now: DateTime<Local>, days: i64) -> Vec<RoomBooking> {
        let today = now.date_naive();
        let last = today + Duration::days(days);
        let mut bookings = self.sorted_bookings(|b| {
            let day = b.start.date_naive();
            day > today && day <= last
        });
        bookings.truncate(MAX_UPCOMING_BOOKINGS);
        bookings
    }

    fn sorted_bookings(&self, keep: impl Fn(&RoomBooking) -> bool) -> Vec<RoomBooking> {
        let mut bookings: Vec<RoomBooking> = self.read().bookings.values().filter(|b| keep(*b)).cloned().collect();
        bookings.sort_by_key(|b| b.start);
        bookings
    }

    /// Birthdays falling into the Monday-based week of `today`, in week order,
    /// each with the anniversary date it matched.
    pub fn weekly_birthdays(&self, today: NaiveDate) -> Vec<(NaiveDate, StoredBirthday)> {
        let (monday, sunday) = week_range(today);
        let mut found: Vec<(NaiveDate, StoredBirthday)> = self
            .read()
            .birthdays
            .values()
            .filter_map(|b| {
                [monday.year(), sunday.year()]
                    .into_iter()
                    .filter_map(|year| NaiveDate::from_ymd_opt(year, b.birth_date.month(), b.birth_date.day()))
                    .find(|d| *d >= monday && *d <= sunday)
                    .map(|d| (d, b.clone()))
            })
            .collect();
        found.sort_by_key(|(d, _)| *d);
        found
    }

    /// Verse assigned to the week of `today`.
    pub fn current_verse(&self, today: NaiveDate) -> Option<VerseOfWeek> {
        let (monday, _) = week_range(today);
        self.read().verses.values().find(|v| v.week_start == monday).cloned()
    }

    /// All standalone flyers in insertion order.
    pub fn flyers(&self) -> Vec<StoredFlyer> {
        self.read().flyers.values().cloned().collect()
    }
}

impl RoomBooking {
    /// Display row; sample bookings are always public.
    pub fn to_display(&self) -> DisplayAppointment {
        DisplayAppointment {
            id: self.id,
            church_tools_id: self.id,
            title: self.title.clone(),
            color: None,
            start_date_time: self.start.to_rfc3339(),
            start_time: time_of_day(&self.start),
            end_time: time_of_day(&self.end),
            date: short_date(&self.start),
            location: self.resource_name.clone(),
            resource: self.resource_name.clone(),
            is_public: true,
            calendar_id: CalendarId(0),
            image_url: None,
        }
    }
}

impl StoredBirthday {
    /// Display row for the birthday celebrated on `anniversary`.
    pub fn to_display(&self, anniversary: NaiveDate) -> Birthday {
        Birthday {
            id: self.id,
            church_tools_id: self.id,
            name: self.name.clone(),
            birthday_text: weekday_date(anniversary),
            avatar: self.avatar_url.clone().unwrap_or_default(),
        }
    }
}

impl Event {
    /// Flyer for events that carry an image.
    pub fn to_flyer(&self) -> Option<Flyer> {
        let image_url = self.image_url.clone().filter(|u| !u.is_empty())?;
        Some(Flyer {
            id: self.id,
            church_tools_id: self.id,
            image_url,
            title: self.title.clone(),
            start_date: self.start.to_rfc3339(),
        })
    }
}

impl StoredFlyer {
    /// Carousel entry without a start date.
    pub fn to_flyer(&self) -> Flyer {
        Flyer {
            id: self.id,
            church_tools_id: self.id,
            image_url: self.image_url.clone(),
            title: self.description.clone(),
            start_date: String::new(),
        }
    }
}
