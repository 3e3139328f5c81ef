//! Route table and middleware.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Build the router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The display may be served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let signage = Router::new()
        .route("/sermon", get(handlers::sermon))
        .route("/appointments/today", get(handlers::today))
        .route("/appointments/upcoming", get(handlers::upcoming))
        .route("/birthdays", get(handlers::birthdays))
        .route("/verse", get(handlers::verse))
        .route("/flyers", get(handlers::flyers))
        .route("/status", get(handlers::status))
        .route("/labels", get(handlers::labels));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/signage", signage)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
