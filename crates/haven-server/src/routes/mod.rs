pub mod dashboard;
pub mod health;
pub mod products;

use axum::http::{header::COOKIE, HeaderMap};

/// The caller's `Cookie` header, forwarded so the data source can resolve the
/// signed-in seller.
pub(crate) fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Fallback for paths no route claims.
pub async fn not_found(uri: axum::http::Uri) -> crate::error::AppError {
    crate::error::AppError::NotFound(format!("no route for {}", uri.path()))
}
