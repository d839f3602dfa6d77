use std::env;
use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::utils::geo::{Coordinates, ServiceArea};

/// Colchester town center
const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 51.8893,
    lng: 0.9042,
};
const DEFAULT_RADIUS_KM: f64 = 25.0;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub currency_symbol: String,
    pub service_area: ServiceArea,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            currency_symbol: "£".to_string(),
            service_area: ServiceArea {
                center: DEFAULT_CENTER,
                radius_km: DEFAULT_RADIUS_KM,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key/value source, falling back to defaults
    /// for missing keys.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let center = Coordinates::new(
            parse_or(&lookup, "SERVICE_AREA_LAT", defaults.service_area.center.lat)?,
            parse_or(&lookup, "SERVICE_AREA_LNG", defaults.service_area.center.lng)?,
        );
        if !center.is_valid() {
            return Err(AppError::Config(format!(
                "service area center ({}, {}) is not a valid coordinate",
                center.lat, center.lng
            )));
        }

        let radius_km = parse_or(&lookup, "SERVICE_AREA_RADIUS_KM", defaults.service_area.radius_km)?;
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(AppError::Config(
                "SERVICE_AREA_RADIUS_KM must be a positive number".to_string(),
            ));
        }

        Ok(Self {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or(&lookup, "SERVER_PORT", defaults.server_port)?,
            currency_symbol: lookup("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
            service_area: ServiceArea { center, radius_km },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", key, raw))),
        None => Ok(default),
    }
}
