use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{routes::session_cookie, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ProductImagesQuery {
    pub category: Option<String>,
}

impl ProductImagesQuery {
    /// The category filter; a blank `?category=` means no filter.
    fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
    }
}

/// `GET /dashboard/products` — Catalog images, optionally for one category.
///
/// Always 200: an unavailable catalog shows up as an empty list.
#[tracing::instrument(skip(state, headers))]
pub async fn product_images(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ProductImagesQuery>,
) -> impl IntoResponse {
    let images = state
        .images
        .with_session(session_cookie(&headers))
        .product_images(query.category())
        .await;
    Json(json!({ "data": images }))
}
