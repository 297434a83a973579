//! Axum router construction.
//!
//! [`build`] assembles the complete application router:
//! - Health / heartbeat route
//! - Task list, create, update and delete pages
//! - Watchlist import endpoint
//! - Request tracing

mod health;
mod tasks;
mod watchlist;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(tasks::router())
        .merge(watchlist::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
