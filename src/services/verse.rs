//! Verse of the week.
//!
//! A [`VerseProvider`] fetches the verse from some source; [`verse_or_fallback`]
//! turns any failure into a fallback verse so the widget never errors.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration as StdDuration;

use crate::constants::churchtools::REQUEST_TIMEOUT_SECS;
use crate::constants::verse::{DEVOTIONALIUM_SOURCE, FALLBACK_REFERENCE, FALLBACK_SOURCE, FALLBACK_TEXT};
use crate::error::{Error, Result};
use crate::settings::DevotionaliumSettings;

/// The verse widget payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verse {
    /// 1 for a fetched verse, 0 for the fallback.
    pub id: i64,
    /// Verse text
    pub text: String,
    /// e.g. "Johannes 8:12"
    pub reference: String,
    /// `Devotionalium` or `Fallback`
    pub source: String,
    /// Upstream date of the verse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Verse {
    /// The built-in verse (Johannes 8:12).
    pub fn fallback() -> Self {
        Self {
            id: 0,
            text: FALLBACK_TEXT.to_string(),
            reference: FALLBACK_REFERENCE.to_string(),
            source: FALLBACK_SOURCE.to_string(),
            date: None,
        }
    }
}

/// Source of the verse of the week.
#[async_trait]
pub trait VerseProvider: Send + Sync {
    /// Fetch the current verse.
    async fn current(&self) -> Result<Verse>;

    /// Name used in log lines.
    fn name(&self) -> &'static str;
}

/// Fetch from `provider`, substituting `fallback` on any failure.
pub async fn verse_or_fallback(provider: &dyn VerseProvider, fallback: impl FnOnce() -> Verse) -> Verse {
    match provider.current().await {
        Ok(verse) => verse,
        Err(e) => {
            tracing::warn!("{} verse unavailable, using fallback: {e}", provider.name());
            fallback()
        }
    }
}

/// Devotionalium daily-verse API.
#[derive(Debug, Clone)]
pub struct Devotionalium {
    settings: DevotionaliumSettings,
    client: Client,
}

impl Devotionalium {
    /// Provider with its own HTTP client.
    pub fn new(settings: DevotionaliumSettings) -> Self {
        Self {
            settings,
            client: Client::builder()
                .timeout(StdDuration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Extract the Bible verse (collection `"1"`) from a response body.
    pub fn parse(body: &Value) -> Result<Verse> {
        let bible = &body["1"];
        let text = bible["text"]
            .as_str()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::parse("Devotionalium response has no Bible verse", None))?;

        Ok(Verse {
            id: 1,
            text: text.to_string(),
            reference: bible["reference"].as_str().unwrap_or_default().to_string(),
            source: DEVOTIONALIUM_SOURCE.to_string(),
            date: body["date"].as_str().map(String::from),
        })
    }
}

#[async_trait]
impl VerseProvider for Devotionalium {
    async fn current(&self) -> Result<Verse> {
        let resp = self
            .client
            .get(&self.settings.base_url)
            .query(&[
                ("lang", self.settings.language.as_str()),
                ("bibleVersion", self.settings.bible_version.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Network(format!("Devotionalium request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Network(format!("Devotionalium returned {status}")));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| Error::parse(format!("Invalid JSON from Devotionalium: {e}"), None))?;
        Self::parse(&body)
    }

    fn name(&self) -> &'static str {
        DEVOTIONALIUM_SOURCE
    }
}
