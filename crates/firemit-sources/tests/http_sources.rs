//! Integration tests for [`HttpDataSource`] against a local fake upstream.
//!
//! A throwaway Axum server on `127.0.0.1:0` plays the Overpass interpreter
//! and several ArcGIS feature layers, so the real request building, status
//! handling and body decoding paths are exercised without network access.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{Form, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use firemit_sources::{DataSource, HttpDataSource, SourceConfig, UpstreamError};
use firemit_types::Hydrant;
use reqwest::Url;
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn interpreter(Form(form): Form<HashMap<String, String>>) -> Response {
    let query = form.get("data").cloned().unwrap_or_default();
    if !query.contains("area[\"name\"=\"Testland\"]") || !query.contains("fire_hydrant") {
        return (StatusCode::BAD_REQUEST, "unexpected query").into_response();
    }
    Json(json!({
        "elements": [
            {"type": "node", "id": 10, "lat": 34.01, "lon": -118.01},
            {"type": "way", "id": 11},
            {"type": "node", "id": 12, "lat": 34.02, "lon": -118.02}
        ]
    }))
    .into_response()
}

async fn echo_layer(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "features": [
            {
                "geometry": {"x": -118.5, "y": 34.5},
                "attributes": {
                    "where": params.get("where"),
                    "outFields": params.get("outFields"),
                    "returnGeometry": params.get("returnGeometry"),
                    "f": params.get("f"),
                    "token": params.get("token")
                }
            },
            {"attributes": {"OBJECTID": 2}}
        ]
    }))
}

async fn spawn_upstream() -> SocketAddr {
    let router = Router::new()
        .route("/api/interpreter", post(interpreter))
        .route("/ok/FeatureServer/0/query", get(echo_layer))
        .route(
            "/broken/FeatureServer/0/query",
            get(|| async { Json(json!({"error": {"code": 498, "message": "Invalid token."}})) }),
        )
        .route(
            "/down/FeatureServer/0/query",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance window") }),
        )
        .route(
            "/garbage/FeatureServer/0/query",
            get(|| async { "<html>not json</html>" }),
        )
        .route(
            "/slow/FeatureServer/0/query",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"features": []}))
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

fn config(addr: SocketAddr, region: &str, outbreaks: &str, wildfires: &str) -> SourceConfig {
    let url = |path: &str| Url::parse(&format!("http://{addr}{path}")).unwrap();
    SourceConfig {
        overpass_url: url("/api/interpreter"),
        hydrant_region: region.to_owned(),
        outbreak_layer_url: url(outbreaks),
        wildfire_layer_url: url(wildfires),
    }
}

fn data_source(addr: SocketAddr, region: &str, outbreaks: &str, wildfires: &str) -> HttpDataSource {
    HttpDataSource::new(config(addr, region, outbreaks, wildfires), REQUEST_TIMEOUT).unwrap()
}

#[tokio::test]
async fn hydrants_are_region_scoped_nodes() {
    let addr = spawn_upstream().await;
    let source = data_source(addr, "Testland", "/ok/FeatureServer/0", "/ok/FeatureServer/0");

    let hydrants = source.fetch_hydrants().await.unwrap();
    assert_eq!(
        hydrants,
        vec![
            Hydrant { latitude: 34.01, longitude: -118.01 },
            Hydrant { latitude: 34.02, longitude: -118.02 },
        ]
    );
}

#[tokio::test]
async fn hydrant_query_rejection_is_status_error() {
    let addr = spawn_upstream().await;
    let source = data_source(addr, "Elsewhere", "/ok/FeatureServer/0", "/ok/FeatureServer/0");

    let err = source.fetch_hydrants().await.unwrap_err();
    match err {
        UpstreamError::Status { provider, status, body } => {
            assert_eq!(provider, "Overpass");
            assert_eq!(status, 400);
            assert_eq!(body, "unexpected query");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn feature_layers_are_queried_unfiltered() {
    let addr = spawn_upstream().await;
    let source = data_source(addr, "Testland", "/ok/FeatureServer/0", "/ok/FeatureServer/0/");

    let outbreaks = source.fetch_outbreaks().await.unwrap();
    assert_eq!(outbreaks.len(), 2);
    let attrs = &outbreaks[0].attributes;
    assert_eq!(attrs["where"], "1=1");
    assert_eq!(attrs["outFields"], "*");
    assert_eq!(attrs["returnGeometry"], "true");
    assert_eq!(attrs["f"], "json");
    assert_eq!(outbreaks[0].geometry["x"], -118.5);
    assert!(outbreaks[1].geometry.is_null());

    let wildfires = source.fetch_wildfires().await.unwrap();
    assert_eq!(wildfires, outbreaks);
}

#[tokio::test]
async fn layer_token_survives_query_building() {
    let addr = spawn_upstream().await;
    let source = data_source(
        addr,
        "Testland",
        "/ok/FeatureServer/0?token=abc",
        "/ok/FeatureServer/0/?token=xyz",
    );

    let outbreaks = source.fetch_outbreaks().await.unwrap();
    assert_eq!(outbreaks[0].attributes["token"], "abc");
    assert_eq!(outbreaks[0].attributes["where"], "1=1");

    let wildfires = source.fetch_wildfires().await.unwrap();
    assert_eq!(wildfires[0].attributes["token"], "xyz");
}

#[tokio::test]
async fn stalled_upstream_hits_request_timeout() {
    let addr = spawn_upstream().await;
    let source = HttpDataSource::new(
        config(addr, "Testland", "/slow/FeatureServer/0", "/ok/FeatureServer/0"),
        Duration::from_millis(100),
    )
    .unwrap();

    let started = tokio::time::Instant::now();
    let err = source.fetch_outbreaks().await.unwrap_err();
    assert!(matches!(err, UpstreamError::Request { provider: "Outbreaks", .. }));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn embedded_service_error_fails_fetch() {
    let addr = spawn_upstream().await;
    let source = data_source(addr, "Testland", "/ok/FeatureServer/0", "/broken/FeatureServer/0");

    let err = source.fetch_wildfires().await.unwrap_err();
    assert_eq!(
        err,
        UpstreamError::Service {
            provider: "Wildfires",
            code: 498,
            message: String::from("Invalid token."),
        }
    );
}

#[tokio::test]
async fn non_success_status_fails_fetch() {
    let addr = spawn_upstream().await;
    let source = data_source(addr, "Testland", "/down/FeatureServer/0", "/ok/FeatureServer/0");

    let err = source.fetch_outbreaks().await.unwrap_err();
    assert!(matches!(
        err,
        UpstreamError::Status { provider: "Outbreaks", status: 503, .. }
    ));
    assert!(err.to_string().contains("maintenance window"));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let addr = spawn_upstream().await;
    let source = data_source(addr, "Testland", "/garbage/FeatureServer/0", "/ok/FeatureServer/0");

    let err = source.fetch_outbreaks().await.unwrap_err();
    assert!(matches!(err, UpstreamError::Malformed { provider: "Outbreaks", .. }));
}

#[tokio::test]
async fn unreachable_upstream_is_request_error() {
    // Bind then drop to obtain a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = data_source(addr, "Testland", "/ok/FeatureServer/0", "/ok/FeatureServer/0");
    let err = source.fetch_hydrants().await.unwrap_err();
    assert!(matches!(err, UpstreamError::Request { provider: "Overpass", .. }));
}
