//! Dump every widget payload as JSON for analysis.
//!
//! Usage: cargo run --bin dump_signage [-- --widget sermon]

use chrono::Local;
use futures::future::join_all;
use serde_json::{json, Value};

use signage::config::Config;
use signage::services::SignageService;
use signage::settings::Settings;

const WIDGETS: &[&str] = &["sermon", "today", "upcoming", "birthdays", "verse", "flyers", "status", "labels"];

async fn widget(service: &SignageService, name: &str) -> anyhow::Result<Value> {
    let now = Local::now();
    let value = match name {
        "sermon" => match service.sermon(now).await {
            Ok(detail) => serde_json::to_value(detail)?,
            Err(e) if e.is_not_found() => json!({ "message": e.to_string() }),
            Err(e) => return Err(e.into()),
        },
        "today" => serde_json::to_value(service.today(now).await?)?,
        "upcoming" => serde_json::to_value(service.upcoming(now).await?)?,
        "birthdays" => serde_json::to_value(service.birthdays(now).await?)?,
        "verse" => serde_json::to_value(service.verse(now).await)?,
        "flyers" => serde_json::to_value(service.flyers(now).await?)?,
        "status" => serde_json::to_value(service.status(now).await)?,
        "labels" => serde_json::to_value(service.labels())?,
        other => anyhow::bail!("Unknown widget {other:?}, expected one of {WIDGETS:?}"),
    };
    Ok(value)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let only: Option<String> = std::env::args()
        .position(|a| a == "--widget")
        .and_then(|i| std::env::args().nth(i + 1));

    let config = Config::load()?;
    let settings = Settings::load(&config.settings_path);
    let service = SignageService::from_config(&config, settings);

    let names: Vec<&str> = match only.as_deref() {
        Some(name) => vec![name],
        None => WIDGETS.to_vec(),
    };

    println!("=== {} ({}) ===", config.api_base, if service.is_live() { "live" } else { "sample data" });

    let results = join_all(names.iter().map(|name| widget(&service, name))).await;
    for (name, result) in names.iter().zip(results) {
        println!("\n--- {name} ---");
        match result {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(e) => eprintln!("  Error: {e}"),
        }
    }

    Ok(())
}
