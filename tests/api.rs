use std::net::SocketAddr;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::ConnectInfo,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use fare_quote_service::{AppState, Config, routes};

fn app() -> Router {
    routes::create_router(AppState {
        config: Config::default(),
    })
}

fn with_peer(mut request: Request<Body>) -> Request<Body> {
    let addr: SocketAddr = "203.0.113.7:50000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

fn get(uri: &str) -> Request<Body> {
    with_peer(Request::builder().uri(uri).body(Body::empty()).unwrap())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    with_peer(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_quote_returns_all_three_schemes() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/quotes",
            json!({ "distance_meters": 1597, "duration_seconds": 300 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency_symbol"], "£");

    let quotes = body["quotes"].as_array().unwrap();
    assert_eq!(quotes.len(), 3);
    assert_eq!(quotes[0]["scheme"], "rate1");
    assert_eq!(quotes[0]["amount"], "6.80");
    assert_eq!(quotes[0]["display"], "£6.80");
    assert_eq!(quotes[0]["breakdown"]["units"]["second_tier"], 7);
    assert_eq!(quotes[1]["scheme"], "rate2");
    assert_eq!(quotes[2]["scheme"], "rate3");
}

#[tokio::test]
async fn test_quote_without_duration_defaults_to_zero() {
    let (status, body) = send(
        app(),
        post_json("/api/quotes", json!({ "distance_meters": 100 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration_seconds"], 0.0);
    assert_eq!(body["quotes"][2]["display"], "£7.00");
}

#[tokio::test]
async fn test_negative_distance_is_rejected() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/quotes",
            json!({ "distance_meters": -10, "duration_seconds": 0 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("distance_meters"));
}

#[tokio::test]
async fn test_origin_outside_service_area_is_rejected() {
    let (status, body) = send(
        app(),
        post_json(
            "/api/quotes",
            json!({
                "distance_meters": 2000,
                "duration_seconds": 240,
                "origin": { "lat": 51.5074, "lng": -0.1278 },
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Origin"));
}

#[tokio::test]
async fn test_points_inside_service_area_are_accepted() {
    let (status, _) = send(
        app(),
        post_json(
            "/api/quotes",
            json!({
                "distance_meters": 2000,
                "duration_seconds": 240,
                "origin": { "lat": 51.8896, "lng": 0.9030 },
                "destination": { "lat": 51.9008, "lng": 0.8929 },
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_single_scheme_quote() {
    let (status, body) = send(
        app(),
        get("/api/quotes/rate3?distance_meters=5000&duration_seconds=600"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scheme"], "rate3");
    assert_eq!(body["amount"], "18.50");
    assert_eq!(body["breakdown"]["total_units"], 23);
}

#[tokio::test]
async fn test_unknown_scheme_is_not_found() {
    let (status, body) = send(app(), get("/api/quotes/rate9?distance_meters=500")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("rate9"));
}

#[tokio::test]
async fn test_list_schemes() {
    let (status, body) = send(app(), get("/api/schemes")).await;

    assert_eq!(status, StatusCode::OK);
    let schemes = body.as_array().unwrap();
    assert_eq!(schemes.len(), 3);
    assert_eq!(schemes[1]["id"], "rate2");
    assert_eq!(schemes[1]["initial_charge_cost"], "5.40");
    assert_eq!(schemes[1]["third_tier_distance"], 3154);
}

#[tokio::test]
async fn test_service_area_lists_pickup_points() {
    let (status, body) = send(app(), get("/api/service-area")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["radius_km"], 25.0);
    assert_eq!(body["pickup_points"][0]["label"], "Town");

    let (status, body) = send(app(), get("/api/pickup-points")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[1]["address"], "Station Wy, Colchester CO1 1UZ");
}

#[tokio::test]
async fn test_burst_beyond_limit_is_rate_limited() {
    let app = app();
    let mut last = (StatusCode::OK, Value::Null);
    for _ in 0..40 {
        last = send(app.clone(), get("/api/schemes")).await;
        if last.0 == StatusCode::TOO_MANY_REQUESTS {
            break;
        }
    }

    let (status, body) = last;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Too many requests");
    assert!(body["retry_after_seconds"].is_number());
}

#[tokio::test]
async fn test_missing_distance_is_json_bad_request() {
    let response = app()
        .oneshot(post_json("/api/quotes", json!({ "duration_seconds": 5 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["content-type"], "application/json");

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap().contains("distance_meters"));
}

#[tokio::test]
async fn test_malformed_json_is_json_bad_request() {
    let request = with_peer(
        Request::builder()
            .method("POST")
            .uri("/api/quotes")
            .header("content-type", "application/json")
            .body(Body::from("{\"distance_meters\": "))
            .unwrap(),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_non_numeric_query_is_json_bad_request() {
    let (status, body) = send(app(), get("/api/quotes/rate1?distance_meters=abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
