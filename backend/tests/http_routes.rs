#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use sargassum_drift::http::{create_router, AppState};
use sargassum_drift::render::RenderOptions;
use sargassum_drift::source::{LocalRepository, PredictionRepository};

use support::{cancun_arrival_points, cancun_repository, response_from};

fn app_with(repo: LocalRepository) -> Router {
    let repo = Arc::new(repo) as Arc<dyn PredictionRepository>;
    create_router(AppState::new(repo).with_render_options(RenderOptions {
        mark_affected_sites: true,
        seed: Some(5),
    }))
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Method::GET, uri).await
}

#[tokio::test]
async fn test_health_reports_source() {
    let app = app_with(cancun_repository());
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["source"], "connected");
    assert_eq!(body["source_kind"], "local (in-memory)");

    let app = app_with(LocalRepository::failing("down"));
    let (_, body) = get(&app, "/health").await;
    assert_eq!(body["source"], "disconnected");
}

#[tokio::test]
async fn test_prediction_is_chronological() {
    let repo = cancun_repository();
    let app = app_with(repo.clone());
    let (status, body) = get(&app, "/v1/prediction").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"], "live");
    assert_eq!(body["total_steps"], 4);
    let steps = body["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[3]["sample"]["density"], 95);

    // Served from the cache afterwards
    get(&app, "/v1/prediction").await;
    get(&app, "/v1/prediction/statistics").await;
    assert_eq!(repo.fetch_count(), 1);
}

#[tokio::test]
async fn test_statistics_endpoint() {
    let app = app_with(cancun_repository());
    let (status, body) = get(&app, "/v1/prediction/statistics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_biomass_km2"], 100.0);
    assert_eq!(body["monitored_site_count"], 18);
    assert_eq!(body["top_affected_sites"][0]["name"], "Cancún");
}

#[tokio::test]
async fn test_failing_source_serves_fallback() {
    let app = app_with(LocalRepository::failing("offline"));
    let (status, body) = get(&app, "/v1/prediction").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"], "fallback");
    assert_eq!(body["total_steps"], 5);
}

#[tokio::test]
async fn test_reload_picks_up_new_data() {
    let repo = LocalRepository::failing("offline");
    let app = app_with(repo.clone());
    let (_, body) = get(&app, "/v1/prediction").await;
    assert_eq!(body["origin"], "fallback");

    repo.set_response(response_from(&cancun_arrival_points()));
    let (status, body) = call(&app, Method::POST, "/v1/prediction/reload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["origin"], "live");

    let (_, body) = get(&app, "/v1/prediction").await;
    assert_eq!(body["origin"], "live");
}

#[tokio::test]
async fn test_strict_reload_surfaces_source_error() {
    let repo = cancun_repository();
    let app = app_with(repo.clone());
    get(&app, "/v1/prediction").await;

    repo.fail_with("connection refused");
    let (status, body) = call(&app, Method::POST, "/v1/prediction/reload?strict=true").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SOURCE_ERROR");

    // The served prediction is untouched
    let (_, body) = get(&app, "/v1/prediction").await;
    assert_eq!(body["origin"], "live");
}

#[tokio::test]
async fn test_terminal_frame_has_impact_overlay() {
    let app = app_with(cancun_repository());
    let (status, body) = get(&app, "/v1/prediction/frames/3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["current_step"], 3);
    assert_eq!(body["state"]["total_steps"], 4);
    assert_eq!(body["state"]["is_animating"], false);

    let commands = body["commands"].as_array().unwrap();
    assert_eq!(commands[0]["shape"], "polyline");
    assert!(commands
        .iter()
        .any(|c| c["shape"] == "circle" && c["radius_m"] == 40000.0));
    assert!(commands.iter().any(|c| c["shape"] == "label_marker"));
}

#[tokio::test]
async fn test_frame_step_is_clamped() {
    let app = app_with(cancun_repository());
    let (status, body) = get(&app, "/v1/prediction/frames/99").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["current_step"], 3);
}

#[tokio::test]
async fn test_frame_filters() {
    let app = app_with(cancun_repository());

    let (_, body) = get(&app, "/v1/prediction/frames/3?site=somewhere-else").await;
    assert!(body["commands"].as_array().unwrap().is_empty());

    let (status, body) = get(&app, "/v1/prediction/frames/3?near=cancun").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["commands"].as_array().unwrap().is_empty());

    let (status, body) = get(&app, "/v1/prediction/frames/3?near=atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_seeded_frames_are_reproducible() {
    let app = app_with(cancun_repository());
    let (_, a) = get(&app, "/v1/prediction/frames/2?seed=42").await;
    let (_, b) = get(&app, "/v1/prediction/frames/2?seed=42").await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_empty_prediction_frame() {
    let app = app_with(LocalRepository::new());
    let (status, body) = get(&app, "/v1/prediction/frames/0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["total_steps"], 0);
    assert!(body["commands"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_impact_endpoint() {
    let app = app_with(LocalRepository::new());

    let (status, body) = get(&app, "/v1/impact?lat=21.1619&lon=-86.8515").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["radius_km"], 40.0);
    assert_eq!(body["open_ocean"], false);
    assert_eq!(body["affected_sites"][0]["site"]["slug"], "cancun");

    let (_, body) = get(&app, "/v1/impact?lat=25.0&lon=-80.0&radius_km=10").await;
    assert_eq!(body["open_ocean"], true);

    let (status, _) = get(&app, "/v1/impact?lat=95.0&lon=-86.0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/v1/impact?lat=21.0&lon=-86.0&radius_km=-1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
