use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Circle around a town center where pick-ups and drop-offs are accepted
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceArea {
    pub center: Coordinates,
    pub radius_km: f64,
}

impl ServiceArea {
    pub fn contains(&self, point: Coordinates) -> bool {
        is_within_radius(point, self.center, self.radius_km)
    }
}

/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in kilometers
pub fn haversine_distance(from: Coordinates, to: Coordinates) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Check if a point is within the given radius of a center
pub fn is_within_radius(point: Coordinates, center: Coordinates, max_radius_km: f64) -> bool {
    haversine_distance(point, center) <= max_radius_km
}
