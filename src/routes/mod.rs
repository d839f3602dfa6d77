use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::AppState;
use crate::handlers::{area, quotes};
use crate::middleware::rate_limit::{create_public_governor, log_request};

pub fn create_router(state: AppState) -> Router {
    // IP-based governor for the public API
    let public_governor = create_public_governor();

    let api_routes = Router::new()
        // Quotes
        .route("/quotes", post(quotes::create_quote))
        .route("/quotes/{scheme}", get(quotes::get_quote))
        .route("/schemes", get(quotes::list_schemes))
        // Service area
        .route("/service-area", get(area::get_service_area))
        .route("/pickup-points", get(area::list_pickup_points))
        .layer(public_governor);

    Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
