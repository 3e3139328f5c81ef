//! Display data, one method per widget.
//!
//! [`SignageService`] combines the `ChurchTools` client, the configuration
//! document and the normalization engine. Without credentials it serves the
//! sample data of the [`MemoryStore`] instead.

use chrono::{DateTime, Duration, Local, NaiveDate};
use serde::Serialize;
use std::sync::Arc;

use crate::churchtools::types::{Calendar, RawAppointment, ServiceCatalog};
use crate::churchtools::{ChurchToolsClient, Memo};
use crate::config::Config;
use crate::constants::churchtools::SERVICE_NAME;
use crate::constants::display::{FLYER_HORIZON_DAYS, MAX_BIRTHDAYS, MAX_FLYERS};
use crate::constants::sermon::{NOT_FOUND_MESSAGE, SEARCH_HORIZON_DAYS};
use crate::constants::verse::FALLBACK_SOURCE;
use crate::error::{Error, Result};
use crate::normalize::appointments::{self, DayPartition};
use crate::normalize::birthdays::{self, week_range};
use crate::normalize::sermon;
use crate::normalize::{Birthday, DisplayAppointment, Flyer, ListKind, SermonDetail, Visibility};
use crate::services::verse::{verse_or_fallback, Devotionalium, Verse, VerseProvider};
use crate::settings::{Settings, SignageLabels};
use crate::store::MemoryStore;
use crate::types::CalendarId;

/// Upstream connectivity report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    /// Whether the connectivity check succeeded
    pub connected: bool,
    /// Time of the check (RFC 3339)
    pub last_update: String,
    /// Failure reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Upstream name
    pub service: String,
}

/// Widget data service.
pub struct SignageService {
    client: ChurchToolsClient,
    settings: Arc<Settings>,
    store: MemoryStore,
    verse: Arc<dyn VerseProvider>,
    calendars: Memo<Vec<Calendar>>,
    catalog: Memo<ServiceCatalog>,
}

impl SignageService {
    /// Assemble a service from its parts.
    pub fn new(
        client: ChurchToolsClient,
        settings: Settings,
        store: MemoryStore,
        verse: Arc<dyn VerseProvider>,
    ) -> Self {
        Self {
            client,
            settings: Arc::new(settings),
            store,
            verse,
            calendars: Memo::new("calendar metadata"),
            catalog: Memo::new("service catalog"),
        }
    }

    /// Production wiring: configured client, Devotionalium, seeded store.
    pub fn from_config(config: &Config, settings: Settings) -> Self {
        let verse = Arc::new(Devotionalium::new(settings.devotionalium.clone()));
        Self::new(ChurchToolsClient::new(config), settings, MemoryStore::seeded(Local::now()), verse)
    }

    /// The configuration document in use.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether upstream data is used (otherwise the sample store).
    pub fn is_live(&self) -> bool {
        self.client.is_configured()
    }

    async fn calendars(&self) -> Result<&[Calendar]> {
        self.calendars
            .get_or_load(|| self.client.get_calendars())
            .await
            .map(Vec::as_slice)
    }

    async fn catalog(&self) -> Result<&ServiceCatalog> {
        self.catalog.get_or_load(|| self.client.get_service_catalog()).await
    }

    /// Visibility from calendar metadata; the static list alone when it is unavailable.
    async fn visibility(&self) -> Visibility {
        match self.calendars().await {
            Ok(calendars) => Visibility::new(calendars, &self.settings),
            Err(e) => {
                tracing::warn!("Calendar metadata unavailable, using configured public ids: {e}");
                Visibility::new(&[], &self.settings)
            }
        }
    }

    /// Every calendar known upstream; the configured union when metadata fails.
    async fn source_calendars(&self) -> Vec<CalendarId> {
        match self.calendars().await {
            Ok(calendars) if !calendars.is_empty() => calendars.iter().map(|c| c.id).collect(),
            Ok(_) => self.settings.configured_calendars(),
            Err(e) => {
                tracing::warn!("Calendar metadata unavailable, using configured calendars: {e}");
                self.settings.configured_calendars()
            }
        }
    }

    async fn appointments_between(&self, calendars: &[CalendarId], from: NaiveDate, days: i64) -> Result<Vec<RawAppointment>> {
        self.client
            .get_appointments(calendars, from, from + Duration::days(days))
            .await
    }

    async fn partition(&self, now: DateTime<Local>) -> Result<DayPartition> {
        let calendars = self.source_calendars().await;
        let horizon = self.settings.signage.max_upcoming_days.max(0);
        let raw = self.appointments_between(&calendars, now.date_naive(), horizon).await?;
        Ok(appointments::partition(raw, &self.settings, now))
    }

    /// Appointments on the local day of `now`.
    pub async fn today(&self, now: DateTime<Local>) -> Result<Vec<DisplayAppointment>> {
        if !self.is_live() {
            return Ok(self.store.today_bookings(now).iter().map(|b| b.to_display()).collect());
        }
        let split = self.partition(now).await?;
        let visibility = self.visibility().await;
        Ok(appointments::display_list(&split.today, ListKind::Today, &self.settings, &visibility))
    }

    /// Appointments after today within the configured horizon.
    pub async fn upcoming(&self, now: DateTime<Local>) -> Result<Vec<DisplayAppointment>> {
        if !self.is_live() {
            let days = self.settings.signage.max_upcoming_days;
            return Ok(self.store.upcoming_bookings(now, days).iter().map(|b| b.to_display()).collect());
        }
        let split = self.partition(now).await?;
        let visibility = self.visibility().await;
        Ok(appointments::display_list(&split.upcoming, ListKind::Upcoming, &self.settings, &visibility))
    }

    /// Birthdays of the current Monday-based week.
    pub async fn birthdays(&self, now: DateTime<Local>) -> Result<Vec<Birthday>> {
        let today = now.date_naive();
        if !self.is_live() {
            return Ok(self
                .store
                .weekly_birthdays(today)
                .iter()
                .take(MAX_BIRTHDAYS)
                .map(|(date, b)| b.to_display(*date))
                .collect());
        }
        let (monday, sunday) = week_range(today);
        let rows = self.client.get_birthdays(monday, sunday).await?;
        Ok(birthdays::birthdays(&rows))
    }

    /// Flyer carousel.
    pub async fn flyers(&self, now: DateTime<Local>) -> Result<Vec<Flyer>> {
        if !self.is_live() {
            let stored = self.store.flyers().into_iter().map(|f| f.to_flyer());
            let events = self
                .store
                .upcoming_events(now, MAX_FLYERS)
                .into_iter()
                .filter_map(|e| e.to_flyer());
            return Ok(stored.chain(events).take(MAX_FLYERS).collect());
        }
        let calendars = self.settings.configured_calendars();
        let raw = self.appointments_between(&calendars, now.date_naive(), FLYER_HORIZON_DAYS).await?;
        Ok(appointments::flyers(&raw, &self.settings, now))
    }

    /// The next worship service with its roster.
    ///
    /// Returns [`Error::NotFound`] when no sermon starts after `now`. Roster
    /// enrichment is best effort: failures there still yield the sermon.
    pub async fn sermon(&self, now: DateTime<Local>) -> Result<SermonDetail> {
        if !self.is_live() {
            return Err(Error::not_found(NOT_FOUND_MESSAGE));
        }
        let raw = self
            .appointments_between(&self.settings.calendars.sermons, now.date_naive(), SEARCH_HORIZON_DAYS)
            .await?;
        let next = sermon::select_next(raw, &self.settings, now).ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))?;

        let event = match self.client.get_upcoming_events(now.date_naive(), self.settings.signage.event_lookahead).await {
            Ok(events) => match sermon::find_event(&events, &next) {
                Some(summary) => self
                    .client
                    .get_event(summary.id)
                    .await
                    .map_err(|e| tracing::warn!("Event {} unavailable: {e}", summary.id))
                    .ok(),
                None => {
                    tracing::debug!("No event matches the next sermon");
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Upcoming events unavailable: {e}");
                None
            }
        };

        let catalog = match event {
            Some(_) => self
                .catalog()
                .await
                .map_err(|e| tracing::warn!("Service catalog unavailable: {e}"))
                .ok(),
            None => None,
        };

        Ok(sermon::detail(&next, &self.settings, event.as_ref(), catalog, now))
    }

    /// Verse of the week; never fails.
    pub async fn verse(&self, now: DateTime<Local>) -> Verse {
        verse_or_fallback(self.verse.as_ref(), || {
            self.store
                .current_verse(now.date_naive())
                .map_or_else(Verse::fallback, |v| Verse {
                    id: 0,
                    text: v.text,
                    reference: v.reference,
                    source: FALLBACK_SOURCE.to_string(),
                    date: None,
                })
        })
        .await
    }

    /// Check upstream connectivity.
    pub async fn status(&self, now: DateTime<Local>) -> ConnectionStatus {
        let error = self.client.ping().await.err().map(|e| e.to_string());
        if let Some(e) = &error {
            tracing::warn!("{SERVICE_NAME} connectivity check failed: {e}");
        }
        ConnectionStatus {
            connected: error.is_none(),
            last_update: now.to_rfc3339(),
            error,
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Section titles for the display.
    pub fn labels(&self) -> &SignageLabels {
        &self.settings.signage.labels
    }
}
