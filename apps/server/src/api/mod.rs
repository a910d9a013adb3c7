use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub mod countries;
pub mod health;

/// Assemble the full application router under `/api/v1`.
pub fn app_router(state: Arc<AppState>) -> Router {
    let api = countries::router().merge(health::router());

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
