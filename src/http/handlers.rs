//! HTTP handlers, one per widget.

use axum::{extract::State, Json};
use chrono::Local;
use serde::Serialize;

use super::error::AppError;
use super::state::AppState;
use crate::error::Result;
use crate::normalize::{Birthday, DisplayAppointment, Flyer, SermonDetail};
use crate::services::{ConnectionStatus, Verse};
use crate::settings::SignageLabels;

/// Result type for handlers.
pub type HandlerResult<T> = std::result::Result<Json<T>, AppError>;

/// Health check body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`
    pub status: &'static str,
    /// Crate version
    pub version: &'static str,
}

/// Log a failed collection and answer with an empty list.
fn list_or_empty<T>(widget: &str, result: Result<Vec<T>>) -> Json<Vec<T>> {
    Json(result.unwrap_or_else(|e| {
        tracing::error!("Error fetching {widget}: {e}");
        Vec::new()
    }))
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", version: state.version })
}

/// GET /signage/sermon
pub async fn sermon(State(state): State<AppState>) -> HandlerResult<SermonDetail> {
    Ok(Json(state.signage.sermon(Local::now()).await?))
}

/// GET /signage/appointments/today
pub async fn today(State(state): State<AppState>) -> Json<Vec<DisplayAppointment>> {
    list_or_empty("today's appointments", state.signage.today(Local::now()).await)
}

/// GET /signage/appointments/upcoming
pub async fn upcoming(State(state): State<AppState>) -> Json<Vec<DisplayAppointment>> {
    list_or_empty("upcoming appointments", state.signage.upcoming(Local::now()).await)
}

/// GET /signage/birthdays
pub async fn birthdays(State(state): State<AppState>) -> Json<Vec<Birthday>> {
    list_or_empty("birthdays", state.signage.birthdays(Local::now()).await)
}

/// GET /signage/verse
pub async fn verse(State(state): State<AppState>) -> Json<Verse> {
    Json(state.signage.verse(Local::now()).await)
}

/// GET /signage/flyers
pub async fn flyers(State(state): State<AppState>) -> Json<Vec<Flyer>> {
    list_or_empty("flyers", state.signage.flyers(Local::now()).await)
}

/// GET /signage/status
pub async fn status(State(state): State<AppState>) -> Json<ConnectionStatus> {
    Json(state.signage.status(Local::now()).await)
}

/// GET /signage/labels
pub async fn labels(State(state): State<AppState>) -> Json<SignageLabels> {
    Json(state.signage.labels().clone())
}
