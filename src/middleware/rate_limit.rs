use axum::{
    Json,
    body::Body,
    extract::{ConnectInfo, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

/// Type alias for the public governor layer (IP-based rate limiting)
pub type PublicGovernorLayer = GovernorLayer<
    tower_governor::key_extractor::PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware<governor::clock::QuantaInstant>,
    Body,
>;

/// Create a GovernorLayer for the public quote API (per IP address)
/// - 100 requests per minute (one token every 600ms)
/// - Bursts of up to 30 requests
pub fn create_public_governor() -> PublicGovernorLayer {
    let config = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(600) // One token every 600ms (100 per minute)
            .burst_size(30)
            .finish()
            .expect("period and burst size are non-zero"),
    );

    GovernorLayer::new(config).error_handler(rate_limit_error_handler)
}

/// Render governor rejections as JSON like every other API error
pub fn rate_limit_error_handler(error: GovernorError) -> Response {
    match error {
        GovernorError::TooManyRequests { wait_time, .. } => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Too many requests",
                "retry_after_seconds": wait_time,
            })),
        )
            .into_response(),
        GovernorError::UnableToExtractKey => {
            tracing::error!("Rate limiter could not determine client address");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
        GovernorError::Other { code, msg, .. } => (
            code,
            Json(json!({ "error": msg.unwrap_or_else(|| "Request rejected".to_string()) })),
        )
            .into_response(),
    }
}

/// Log every API call once it has been answered, with its latency.
/// Rate-limited calls are warnings, other client errors are info.
pub async fn log_request(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    let client_ip = addr.ip();

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            tracing::warn!(%client_ip, %method, %path, "Rate limit exceeded")
        }
        s if s.is_server_error() => {
            tracing::error!(%client_ip, %method, %path, status = s.as_u16(), latency_ms, "Request failed")
        }
        s if s.is_client_error() => {
            tracing::info!(%client_ip, %method, %path, status = s.as_u16(), latency_ms, "Request rejected")
        }
        s => tracing::debug!(%client_ip, %method, %path, status = s.as_u16(), latency_ms, "Request served"),
    }

    response
}
