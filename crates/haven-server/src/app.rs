use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{routes, state::AppState};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// `TraceLayer` wraps every route with structured request/response logging
/// via `tracing`.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/dashboard/analytics",
            get(routes::dashboard::analytics_page),
        )
        .route(
            "/dashboard/analytics/chart.svg",
            get(routes::dashboard::analytics_chart),
        )
        .route(
            "/dashboard/analytics/data",
            get(routes::dashboard::analytics_data),
        )
        .route("/dashboard/products", get(routes::products::product_images))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
