//! `Signage` server - serves display data for the church signage client.
//!
//! # Environment Variables
//!
//! - `CHURCHTOOLS_API_BASE`: API base URL (e.g. `https://example.church.tools/api`)
//! - `CHURCHTOOLS_API_TOKEN`: login token (`API_TOKEN` is accepted too)
//! - `SIGNAGE_CONFIG`: path of the JSON configuration (default: config.json)
//! - `HOST` / `PORT`: bind address (default: 0.0.0.0:5000)
//! - `RUST_LOG`: log filter (default: signage=info)

use std::sync::Arc;

use signage::config::Config;
use signage::http::{create_router, AppState};
use signage::logging;
use signage::services::SignageService;
use signage::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::load()?;
    tracing::info!("Starting {} {}", config.app_name(), config.app_version());

    if !config.has_churchtools_credentials() {
        tracing::warn!("No ChurchTools token configured; serving sample data");
    }

    let settings = Settings::load(&config.settings_path);
    let service = Arc::new(SignageService::from_config(&config, settings));
    let app = create_router(AppState::new(service));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
