//! Integration tests for the deployment API endpoint.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server, with in-memory fixture data standing in for the
//! upstream services.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use firemit_api::{AppState, build_router};
use firemit_env::STATIONS;
use firemit_sources::{FixtureDataSource, FixtureFailure};
use firemit_types::{EpisodeResult, FeatureRecord, Hydrant};
use serde_json::Value;
use tower::ServiceExt;

const ROUTE: &str = "/api/optimal-deployment";

fn fixture(hydrant_count: u32, wildfire_count: u32) -> FixtureDataSource {
    let hydrants = (0..hydrant_count)
        .map(|i| Hydrant {
            latitude: 34.0 + f64::from(i) * 0.001,
            longitude: -118.3,
        })
        .collect();
    let wildfires = (0..wildfire_count)
        .map(|i| FeatureRecord {
            geometry: serde_json::json!({"rings": [[[-118.5, 34.0], [-118.4, 34.1]]]}),
            attributes: serde_json::json!({"OBJECTID": i, "IncidentName": format!("Fire {i}")}),
        })
        .collect();
    FixtureDataSource::new(hydrants, Vec::new(), wildfires)
}

fn router_for(source: FixtureDataSource) -> axum::Router {
    build_router(Arc::new(AppState::new(source, Duration::from_secs(5))))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_optimal_deployment_success() {
    let router = router_for(fixture(50, 20));

    let response = router
        .oneshot(Request::get(ROUTE).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["stations"].as_array().unwrap().len(), 3);
    assert_eq!(json["hydrants"].as_array().unwrap().len(), 10);
    assert_eq!(json["wildfires"].as_array().unwrap().len(), 5);
    assert_eq!(json["route"].as_array().unwrap().len(), 3);
    assert_eq!(json["stations"][0]["id"], 1);
    assert_eq!(json["wildfires"][4]["attributes"]["IncidentName"], "Fire 4");
}

#[tokio::test]
async fn test_optimal_deployment_payload_shape() {
    let router = router_for(fixture(2, 1));

    let response = router
        .oneshot(Request::get(ROUTE).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    for key in ["stations", "hydrants", "wildfires", "route"] {
        assert!(keys.contains(&key), "missing {key}");
    }

    let result: EpisodeResult = serde_json::from_value(json).unwrap();
    assert_eq!(result.stations, STATIONS.to_vec());
    for (point, station) in result.route.iter().zip(&result.stations) {
        assert_eq!(point.lat.to_bits(), station.latitude.to_bits());
        assert_eq!(point.lng.to_bits(), station.longitude.to_bits());
    }
}

#[tokio::test]
async fn test_upstream_failure_returns_500_error_body() {
    for failure in [
        FixtureFailure::Hydrants,
        FixtureFailure::Outbreaks,
        FixtureFailure::Wildfires,
    ] {
        let router = router_for(fixture(50, 20).failing(failure));

        let response = router
            .oneshot(Request::get(ROUTE).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_to_json(response.into_body()).await;
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1, "partial payload leaked: {json}");
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("503"), "unexpected message {message}");
        assert!(message.contains("fixture unavailable"));
    }
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let router = router_for(fixture(1, 1));

    let response = router
        .oneshot(
            Request::get(ROUTE)
                .header("origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let allow = response
        .headers()
        .get("access-control-allow-origin")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(allow, "*");
}

#[tokio::test]
async fn test_post_is_not_allowed() {
    let router = router_for(fixture(1, 1));

    let response = router
        .oneshot(Request::post(ROUTE).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let router = router_for(fixture(1, 1));

    let response = router
        .oneshot(Request::get("/api/shelters").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
