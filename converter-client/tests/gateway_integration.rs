//! Integration tests for the HTTP gateway.
//!
//! These tests start a local axum server that mimics the upstream API and
//! verify that every failure mode reaches the caller as an error value.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};

use converter_client::{GatewayConfig, HttpGateway};
use converter_types::{ErrorKind, GatewayError, QueryParams, Rate, RateTransport};
use exchange_rates::CurrencyConverter;

async fn rate_on_date(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let rate = match params.get("ondate").map(String::as_str) {
        Some("2022-02-14") => 2.5,
        _ => 2.0,
    };
    if params.get("parammode").map(String::as_str) != Some("2") {
        return Json(json!({}));
    }
    Json(json!({"Cur_Scale": 1.0, "Cur_OfficialRate": rate}))
}

async fn dynamics(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let start = params.get("startdate").cloned().unwrap_or_default();
    let end = params.get("enddate").cloned().unwrap_or_default();
    Json(json!([
        {"Date": format!("{start}T00:00:00"), "Cur_OfficialRate": 2.0},
        {"Date": format!("{end}T00:00:00"), "Cur_OfficialRate": 2.5},
    ]))
}

/// Helper to start the mock upstream and return its base URL.
async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/rates/USD", get(rate_on_date))
        .route(
            "/rates/EUR",
            get(|| async { (StatusCode::NOT_FOUND, "Not Found") }),
        )
        .route("/rates/GBP", get(|| async { "json" }))
        .route(
            "/currencies",
            get(|| async {
                Json(json!([{
                    "Cur_ID": 159,
                    "Cur_Scale": 10.0,
                    "Cur_Abbreviation": "USD",
                    "Cur_DateStart": "2020-01-01T00:00:00",
                    "Cur_DateEnd": "2050-01-01T00:00:00",
                }]))
            }),
        )
        .route("/rates/dynamics/159", get(dynamics));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn gateway(base_url: &str) -> HttpGateway {
    HttpGateway::with_config(GatewayConfig::default().with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn test_gateway_returns_json_body() {
    let gateway = gateway(&spawn_upstream().await);
    let params: QueryParams = vec![("parammode", "2".to_string())];
    let body = gateway.get_json("/rates/USD", &params).await.unwrap();
    assert_eq!(body["Cur_OfficialRate"], json!(2.0));
}

#[tokio::test]
async fn test_gateway_maps_404_to_status_error() {
    let gateway = gateway(&spawn_upstream().await);
    let err = gateway
        .get_json("/rates/EUR", &QueryParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 404, .. }));
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn test_gateway_maps_malformed_json_to_decode_error() {
    let gateway = gateway(&spawn_upstream().await);
    let err = gateway
        .get_json("/rates/GBP", &QueryParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_gateway_maps_refused_connection() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = gateway(&format!("http://{addr}"));
    let err = gateway
        .get_json("/currencies", &QueryParams::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Connect(_)));
}

#[tokio::test]
async fn test_converter_over_http() {
    let converter = CurrencyConverter::new(gateway(&spawn_upstream().await));

    let outcome = converter.get_rate("usd", None).await;
    assert!(outcome.is_ok());
    assert_eq!(outcome.value, Rate::new(1.0, 2.0));

    let outcome = converter.convert(100.0, "usd", "byn", None).await;
    assert_eq!(outcome.value, 200.0);

    let outcome = converter.convert(100.0, "usd", "byn", Some("2022-02-14")).await;
    assert_eq!(outcome.value, 250.0);
}

#[tokio::test]
async fn test_converter_transport_failures_are_values() {
    let converter = CurrencyConverter::new(gateway(&spawn_upstream().await));

    for code in ["eur", "gbp"] {
        let outcome = converter.convert(100.0, code, "byn", None).await;
        assert_eq!(outcome.value, 0.0);
        assert_eq!(outcome.error.unwrap().kind(), ErrorKind::Transport);

        let outcome = converter.get_rate(code, None).await;
        assert_eq!(outcome.value, Rate::SENTINEL);
        assert_eq!(outcome.error.unwrap().kind(), ErrorKind::Transport);
    }
}

#[tokio::test]
async fn test_dynamics_over_http() {
    let converter = CurrencyConverter::new(gateway(&spawn_upstream().await));
    let outcome = converter
        .get_rate_dynamics("usd", "2022-02-14", "2022-02-01")
        .await;
    assert!(outcome.is_ok());
    assert_eq!(outcome.value.scale, 10.0);

    let rates: Vec<f64> = outcome.value.rates.values().copied().collect();
    assert_eq!(rates, vec![2.0, 2.5]);
    let first = outcome.value.rates.keys().next().unwrap();
    assert_eq!(first.format("%Y-%m-%d").to_string(), "2022-02-01");
}
