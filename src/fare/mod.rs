//! Tiered meter fare engine.
//!
//! A fare is a flat initial charge covering the first stretch of the
//! journey, plus a fixed cost for every billable unit of distance beyond it.
//! Each tier has its own unit size; any part of a unit is billed as a whole
//! unit.

pub mod calculator;
pub mod schemes;

use thiserror::Error;

pub use calculator::{Fare, RouteMetrics, TierUnits, compute_breakdown, compute_fare, quote_all};
pub use schemes::{PricingScheme, RATE1, RATE2, RATE3, SchemeId};

/// Longest journey the engine will price (1,000 km)
pub const MAX_DISTANCE_METERS: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FareError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Unknown pricing scheme: {0}")]
    UnknownScheme(String),
}
