use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration as StdDuration;

use crate::churchtools::types::{
    Calendar, EventDetail, EventSummary, RawAppointment, ServiceCatalog, ServiceDefinition,
};
use crate::config::Config;
use crate::constants::churchtools::{AUTH_SCHEME, REQUEST_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::types::CalendarId;

/// Client for accessing the `ChurchTools` REST API
///
/// Every method returns `Error::Config` without touching the network when no
/// token is configured, so callers can degrade to empty results.
#[derive(Clone)]
pub struct ChurchToolsClient {
    base_url: String,
    token: String,
    client: Client,
}

impl ChurchToolsClient {
    /// Create a new `ChurchTools` client from config
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_base, &config.api_token)
    }

    /// Create a client for an explicit base URL and token
    pub fn with_base_url(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client: Client::builder()
                .timeout(StdDuration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Check if credentials are configured
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(Error::config(
                "ChurchTools API token not configured",
                "Set CHURCHTOOLS_API_TOKEN (and CHURCHTOOLS_API_BASE) environment variables",
            ))
        }
    }

    /// Make an authenticated GET request with query parameters and unwrap `data`
    async fn get_with_query(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.ensure_configured()?;

        let url = format!("{}{}", self.base_url, path);
        let resp = self.client
            .get(&url)
            .header("Authorization", format!("{AUTH_SCHEME} {}", self.token))
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {path} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::api_status(
                format!("Request to {path} returned {status} - {body}"),
                status.as_u16(),
            ));
        }

        let mut json: Value = resp.json().await
            .map_err(|e| Error::parse(format!("Invalid JSON from {path}: {e}"), None))?;
        Ok(json.get_mut("data").map(Value::take).unwrap_or_default())
    }

    /// Make an authenticated GET request
    async fn get(&self, path: &str) -> Result<Value> {
        self.get_with_query(path, &[]).await
    }

    /// All calendars visible to the API user
    pub async fn get_calendars(&self) -> Result<Vec<Calendar>> {
        let data = self.get("/calendars").await?;
        Ok(as_list(&data).iter().filter_map(Calendar::from_json).collect())
    }

    /// Appointment occurrences of the given calendars between two dates (inclusive)
    pub async fn get_appointments(
        &self,
        calendar_ids: &[CalendarId],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RawAppointment>> {
        if calendar_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: Vec<(&str, String)> = calendar_ids
            .iter()
            .map(|id| ("calendar_ids[]", id.to_string()))
            .collect();
        query.push(("from", from.format("%Y-%m-%d").to_string()));
        query.push(("to", to.format("%Y-%m-%d").to_string()));

        let data = self.get_with_query("/calendars/appointments", &query).await?;
        Ok(as_list(&data).iter().cloned().map(RawAppointment::from).collect())
    }

    /// Upcoming events starting today, in chronological order
    pub async fn get_upcoming_events(&self, from: NaiveDate, limit: usize) -> Result<Vec<EventSummary>> {
        let data = self.get_with_query("/events", &[
            ("from", from.format("%Y-%m-%d").to_string()),
            ("limit", limit.to_string()),
            ("direction", "forward".to_string()),
        ]).await?;
        Ok(as_list(&data).iter().filter_map(EventSummary::from_json).collect())
    }

    /// One event with its services roster
    pub async fn get_event(&self, id: i64) -> Result<EventDetail> {
        let path = format!("/events/{id}");
        let data = self.get_with_query(&path, &[("include", "eventServices".to_string())]).await?;
        EventDetail::from_json(&data)
            .ok_or_else(|| Error::parse(format!("Event {id} has no id in response"), None))
    }

    /// The global service-definition catalog
    pub async fn get_service_catalog(&self) -> Result<ServiceCatalog> {
        let data = self.get("/services").await?;
        let catalog = ServiceCatalog::new(
            as_list(&data).iter().filter_map(ServiceDefinition::from_json),
        );
        if catalog.is_empty() {
            tracing::warn!("Service catalog is empty; roster names fall back to event data");
        } else {
            tracing::debug!("Loaded {} service definitions", catalog.len());
        }
        Ok(catalog)
    }

    /// Birthday rows (`{person, anniversary, ...}`) between two dates
    pub async fn get_birthdays(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Value>> {
        let data = self.get_with_query("/persons/birthdays", &[
            ("start_date", from.format("%Y-%m-%d").to_string()),
            ("end_date", to.format("%Y-%m-%d").to_string()),
        ]).await?;
        Ok(as_list(&data).to_vec())
    }

    /// Cheapest authenticated request, used as a health check
    pub async fn ping(&self) -> Result<()> {
        self.get_with_query("/events", &[("limit", "1".to_string())]).await.map(|_| ())
    }
}

/// Treat a missing or non-array `data` as an empty list
fn as_list(data: &Value) -> &[Value] {
    data.as_array().map(|a| a.as_slice()).unwrap_or(&[])
}
