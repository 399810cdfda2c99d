use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header as header_is, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use haven_core::config::Config;
use haven_core::features::FeatureFlags;
use haven_server::app::build_app;
use haven_server::state::AppState;

fn config(data_source_url: String) -> Config {
    Config {
        port: 0,
        data_source_url,
        catalog_path: None,
        chart_width: 640,
        features: FeatureFlags::default(),
    }
}

async fn setup() -> (MockServer, axum::Router) {
    let source = MockServer::start().await;
    let state = Arc::new(AppState::new(config(source.uri())).expect("state"));
    (source, build_app(state))
}

async fn body_bytes(response: axum::http::Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes()
        .to_vec()
}

async fn json_body(response: axum::http::Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("parse JSON")
}

async fn text_body(response: axum::http::Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("utf-8 body")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, "session=seller-7")
        .body(Body::empty())
        .expect("build request")
}

fn analytics_body() -> Value {
    json!({
        "salesOverTime": [
            { "month": "Jan", "sales": 10 },
            { "month": "Feb", "sales": 5 }
        ],
        "salesByCategory": [
            { "category": "pottery", "sales": 15, "revenue": 300.0 }
        ],
        "topProducts": [
            { "id": 9, "name": "Raku <Bowl>", "sales": 6, "revenue": 180.0 }
        ],
        "summary": {
            "totalSales": 15,
            "totalRevenue": 300.0,
            "totalOrders": 6,
            "averageOrderValue": 50.0,
            "newCustomers": 2
        }
    })
}

async fn mount_analytics(source: &MockServer, timeframe: &str) {
    Mock::given(method("GET"))
        .and(path("/api/seller/analytics"))
        .and(query_param("timeframe", timeframe))
        .and(header_is("cookie", "session=seller-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analytics_body()))
        .mount(source)
        .await;
}

// ============================================================
// Analytics page composes the fetched data and the chart
// ============================================================
#[tokio::test]
async fn test_analytics_page_renders_summary_chart_and_tooltips() {
    let (source, app) = setup().await;
    mount_analytics(&source, "week").await;

    let response = app
        .oneshot(get("/dashboard/analytics?timeframe=week"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);

    let html = text_body(response).await;
    assert!(html.contains("<strong>week</strong>"));
    assert!(html.contains("<dt>Total revenue</dt><dd>$300.00</dd>"));
    assert!(html.contains("<svg"));
    assert_eq!(html.matches("class=\"bar-tooltip\"").count(), 2);
    assert!(html.contains("title=\"Jan: 10\""));
    assert!(html.contains("Raku &lt;Bowl&gt;"));
    assert!(html.contains("width:640px"));
}

#[tokio::test]
async fn test_analytics_page_defaults_to_month() {
    let (source, app) = setup().await;
    mount_analytics(&source, "month").await;

    let response = app
        .oneshot(get("/dashboard/analytics?width=1000"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert!(html.contains("<strong>month</strong>"));
    assert!(html.contains("width:1000px"));
    assert!(!html.contains("No sales data"));
}

#[tokio::test]
async fn test_oversized_width_is_capped() {
    let (source, app) = setup().await;
    mount_analytics(&source, "month").await;

    let response = app
        .oneshot(get("/dashboard/analytics?width=3000000000"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert!(html.contains("width:4096px"));
    assert!(!html.contains("left:-"));
    assert!(!html.contains("width:-"));
}

#[tokio::test]
async fn test_invalid_timeframe_is_rejected() {
    let (_source, app) = setup().await;

    let response = app
        .oneshot(get("/dashboard/analytics?timeframe=decade"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
}

// ============================================================
// Data source failures degrade to an empty but working page
// ============================================================
#[tokio::test]
async fn test_failing_data_source_renders_empty_dashboard() {
    let (source, app) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/seller/analytics"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&source)
        .await;

    let response = app
        .oneshot(get("/dashboard/analytics"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert!(html.contains("No sales data for this period."));
    assert!(html.contains("<dt>Total orders</dt><dd>0</dd>"));
    assert!(!html.contains("bar-tooltip"));
}

#[tokio::test]
async fn test_analytics_data_is_zero_value_on_failure() {
    let (source, app) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/seller/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ truncated"))
        .mount(&source)
        .await;

    let response = app
        .oneshot(get("/dashboard/analytics/data?timeframe=year"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["timeframe"], "year");
    assert_eq!(json["data"]["salesOverTime"], json!([]));
    assert_eq!(json["data"]["salesByCategory"], json!([]));
    assert_eq!(json["data"]["topProducts"], json!([]));
    assert_eq!(json["data"]["summary"]["totalRevenue"], 0.0);
    assert_eq!(json["data"]["summary"]["averageOrderValue"], 0.0);
}

#[tokio::test]
async fn test_chart_endpoint_serves_svg() {
    let (source, app) = setup().await;
    mount_analytics(&source, "month").await;

    let response = app
        .oneshot(get("/dashboard/analytics/chart.svg"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).expect("content type"),
        "image/svg+xml"
    );
    let svg = text_body(response).await;
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Jan"));
}

// ============================================================
// Product images pass through the fail-safe query
// ============================================================
#[tokio::test]
async fn test_products_filtered_by_category() {
    let (source, app) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/product-images"))
        .and(query_param("category", "pottery"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "path": "/images/2.jpg", "name": "Celadon Vase",
              "category": "pottery", "description": null }
        ])))
        .expect(1)
        .mount(&source)
        .await;

    let response = app
        .oneshot(get("/dashboard/products?category=pottery"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"][0]["name"], "Celadon Vase");
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_blank_category_means_no_filter() {
    let (source, app) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/product-images"))
        .and(query_param_is_missing("category"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "path": "/images/1.jpg", "name": "Ash Glaze Mug",
              "category": "pottery", "description": null },
            { "id": 4, "path": "/images/4.jpg", "name": "Oak Spoon",
              "category": null, "description": null }
        ])))
        .expect(1)
        .mount(&source)
        .await;

    let response = app
        .oneshot(get("/dashboard/products?category="))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_products_empty_when_source_fails() {
    let (source, app) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/product-images"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&source)
        .await;

    let response = app
        .oneshot(get("/dashboard/products"))
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"], json!([]));
}
