//! End-to-end requests against the dashboard router

use acqboard::core::CsvImportOptions;
use acqboard::dashboard::DashboardContext;
use acqboard::server::{AppState, router};
use acqboard::services::DataService;
use acqboard::{ChartBuilder, ViewSettings};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;
use std::path::PathBuf;
use tower::ServiceExt;

async fn sample_state(debug: bool) -> AppState {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("sample-data")
        .join("acquisitions.csv");
    let table = DataService::load_acquisitions_async(path, CsvImportOptions::default())
        .await
        .unwrap();
    let context =
        DashboardContext::build(table, ChartBuilder::default(), ViewSettings::default(), debug)
            .unwrap();
    AppState::new(context)
}

async fn get(state: AppState, uri: &str) -> Response {
    router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_json(uri: &str) -> Value {
    let response = get(sample_state(false).await, uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_index_serves_page() {
    let response = get(sample_state(false).await, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains(r#"<option value="Yahoo">Yahoo</option>"#));
    assert!(html.contains(r#"<div class="stat-value">7</div><div class="stat-label">Parent companies</div>"#));
    assert!(html.contains(r#"<div class="stat-value">33</div><div class="stat-label">Acquired companies</div>"#));
}

#[tokio::test]
async fn test_debug_mode_disables_caching() {
    let state = sample_state(true).await;
    let page = get(state.clone(), "/").await;
    assert_eq!(page.headers()[header::CACHE_CONTROL], "no-store");

    let charts = get(state, "/api/company-charts?company=IBM").await;
    assert_eq!(charts.status(), StatusCode::OK);
    assert_eq!(charts.headers()[header::CACHE_CONTROL], "no-store");
}

#[tokio::test]
async fn test_company_without_countries() {
    let charts = get_json("/api/company-charts?company=Yahoo").await;
    assert_eq!(charts["company"], "Yahoo");
    assert_eq!(charts["acquisitions"], 3);
    assert_eq!(charts["countries"]["data"], Value::Array(vec![]));
    assert_eq!(
        charts["countries"]["layout"]["annotations"][0]["text"],
        "Countries not disclosed for this selection"
    );
}

#[tokio::test]
async fn test_company_with_one_acquisition() {
    let charts = get_json("/api/company-charts?company=Twitter").await;
    assert_eq!(charts["top_prices"]["data"][0]["x"], serde_json::json!(["Vine"]));
    let counts: f64 = charts["year_histogram"]["data"][0]["y"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .sum();
    assert_eq!(counts, 1.0);
}

#[tokio::test]
async fn test_company_charts_follow_selection() {
    let charts = get_json("/api/company-charts?company=Google").await;
    assert_eq!(
        charts["countries"]["data"][0]["x"],
        serde_json::json!(["USA", "Israel", "UK"])
    );
    assert_eq!(
        charts["year_histogram"]["layout"]["title"]["text"],
        "Acquisitions per year: Google"
    );
}

#[tokio::test]
async fn test_empty_selection_means_all_companies() {
    let all = get_json("/api/company-charts?company=").await;
    let missing = get_json("/api/company-charts").await;
    assert_eq!(all, missing);
    assert_eq!(all["company"], Value::Null);
    assert_eq!(all["acquisitions"], 33);
}

#[tokio::test]
async fn test_unknown_company_is_empty_not_an_error() {
    let charts = get_json("/api/company-charts?company=Initech").await;
    assert_eq!(charts["acquisitions"], 0);
    assert_eq!(charts["top_prices"]["data"][0]["x"], serde_json::json!([]));
    assert_eq!(charts["countries"]["data"], Value::Array(vec![]));
}
