// Presentation layer - HTTP routes
pub mod app_state;
pub mod handlers;
pub mod pages;

use crate::presentation::app_state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health_check))
        .route("/employee/:id", get(handlers::employee_detail))
        .route("/insights", get(handlers::insights))
        .route("/your-dashboard", get(handlers::your_dashboard))
        .route("/charts/:kind", get(handlers::chart_fragment))
        .route("/submit-work", post(handlers::submit_work))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
