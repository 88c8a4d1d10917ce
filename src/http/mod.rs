//! HTTP router and handlers.

use crate::app::AppState;
use axum::{
  Router,
  routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub mod logs;

/// Assemble the HTTP router with all routes.
pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route("/logs", post(logs::insert_log).delete(logs::delete_logs))
    .route("/logs/", post(logs::insert_log).delete(logs::delete_logs))
    .route("/logs/search", get(logs::search_logs))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
