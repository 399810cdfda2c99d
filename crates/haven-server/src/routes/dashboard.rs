use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use haven_core::analytics::{AnalyticsData, TimeFrame};

use crate::{error::AppError, page, routes::session_cookie, state::AppState};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub timeframe: Option<String>,
    /// Container width in pixels for the chart; defaults to the configured width.
    pub width: Option<u32>,
}

impl DashboardQuery {
    fn timeframe(&self) -> Result<TimeFrame, AppError> {
        TimeFrame::parse(self.timeframe.as_deref()).map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

async fn fetch_analytics(
    state: &AppState,
    headers: &HeaderMap,
    timeframe: TimeFrame,
) -> AnalyticsData {
    state
        .analytics
        .with_session(session_cookie(headers))
        .seller_analytics(timeframe)
        .await
}

/// `GET /dashboard/analytics` — Seller analytics page with summary and chart.
#[tracing::instrument(skip(state, headers))]
pub async fn analytics_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let timeframe = query.timeframe()?;
    let width = query.width.unwrap_or(state.config.chart_width);

    let data = fetch_analytics(&state, &headers, timeframe).await;
    let chart = state
        .chart
        .render(&data.sales_over_time, width)
        .map_err(anyhow::Error::from)?;

    Ok(Html(page::analytics_page(timeframe, &data, &chart)))
}

/// `GET /dashboard/analytics/chart.svg` — The sales chart on its own.
#[tracing::instrument(skip(state, headers))]
pub async fn analytics_chart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let timeframe = query.timeframe()?;
    let width = query.width.unwrap_or(state.config.chart_width);

    let data = fetch_analytics(&state, &headers, timeframe).await;
    let chart = state
        .chart
        .render(&data.sales_over_time, width)
        .map_err(anyhow::Error::from)?;

    Ok(([(CONTENT_TYPE, "image/svg+xml")], chart.svg))
}

/// `GET /dashboard/analytics/data` — The analytics payload as JSON.
#[tracing::instrument(skip(state, headers))]
pub async fn analytics_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let timeframe = query.timeframe()?;
    let data = fetch_analytics(&state, &headers, timeframe).await;
    Ok(Json(json!({ "data": data, "timeframe": timeframe })))
}
