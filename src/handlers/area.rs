use axum::{Json, extract::State};
use serde::Serialize;

use crate::AppState;
use crate::utils::geo::Coordinates;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PickupPoint {
    pub label: &'static str,
    pub address: &'static str,
}

pub const PICKUP_POINTS: [PickupPoint; 2] = [
    PickupPoint {
        label: "Town",
        address: "35/37 High St, Colchester CO1 1DH",
    },
    PickupPoint {
        label: "Station",
        address: "Station Wy, Colchester CO1 1UZ",
    },
];

#[derive(Debug, Serialize)]
pub struct ServiceAreaResponse {
    pub center: Coordinates,
    pub radius_km: f64,
    pub pickup_points: Vec<PickupPoint>,
}

/// Service area and its predefined pick-up points
pub async fn get_service_area(State(state): State<AppState>) -> Json<ServiceAreaResponse> {
    let area = state.config.service_area;

    Json(ServiceAreaResponse {
        center: area.center,
        radius_km: area.radius_km,
        pickup_points: PICKUP_POINTS.to_vec(),
    })
}

/// List predefined pick-up points
pub async fn list_pickup_points() -> Json<Vec<PickupPoint>> {
    Json(PICKUP_POINTS.to_vec())
}
