//! Integration tests against a real `ChurchTools` instance.

// Only runs with `--features integration_test` and credentials in the
// environment or ".env"; otherwise every test is skipped.
#![cfg(feature = "integration_test")]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use chrono::{Duration, Local};
use std::time::Instant;

use signage::churchtools::ChurchToolsClient;
use signage::config::Config;
use signage::services::SignageService;
use signage::settings::Settings;

fn setup() -> Option<(Config, ChurchToolsClient)> {
    match Config::load() {
        Ok(config) if config.has_churchtools_credentials() => {
            let client = ChurchToolsClient::new(&config);
            Some((config, client))
        }
        Ok(_) => {
            println!(r#"Skipping integration test: ChurchTools token not found in environment/".env" file."#);
            None
        }
        Err(e) => {
            println!("Skipping integration test: Failed to load config: {e}");
            None
        }
    }
}

#[tokio::test]
async fn test_ping_and_calendars() {
    let Some((_, client)) = setup() else { return };

    client.ping().await.unwrap();
    let calendars = client.get_calendars().await.unwrap();
    println!("Found {} calendars", calendars.len());
    assert!(!calendars.is_empty(), "Expected at least one visible calendar.");
}

#[tokio::test]
async fn test_appointments_for_all_calendars() {
    let Some((_, client)) = setup() else { return };

    let ids: Vec<_> = client.get_calendars().await.unwrap().iter().map(|c| c.id).collect();
    let today = Local::now().date_naive();
    let raw = client.get_appointments(&ids, today, today + Duration::days(7)).await.unwrap();
    println!("Fetched {} appointments for {} calendars", raw.len(), ids.len());
}

#[tokio::test]
async fn test_sermon_widget_performance() {
    let Some((config, _)) = setup() else { return };

    let settings = Settings::load(&config.settings_path);
    if settings.calendars.sermons.is_empty() {
        println!("Skipping sermon test: no sermon calendars configured.");
        return;
    }
    let service = SignageService::from_config(&config, settings);

    let start = Instant::now();
    let result = service.sermon(Local::now()).await;
    let duration = start.elapsed();

    match result {
        Ok(detail) => println!("Sermon {:?} loaded in {duration:.2?}", detail.title),
        Err(e) if e.is_not_found() => println!("No upcoming sermon ({duration:.2?})"),
        Err(e) => panic!("sermon failed: {e}"),
    }
    assert!(duration.as_secs() < 10, "Sermon took longer than expected: {duration:.2?}");
}
