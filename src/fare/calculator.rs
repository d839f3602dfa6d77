use rust_decimal::Decimal;
use serde::Serialize;

use super::{FareError, MAX_DISTANCE_METERS, PricingScheme, SchemeId};

/// Distance and duration of a resolved route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteMetrics {
    distance_meters: f64,
    duration_seconds: f64,
}

impl RouteMetrics {
    /// Both values must be finite and non-negative. Duration is carried for
    /// display only; it does not take part in the fare.
    pub fn new(distance_meters: f64, duration_seconds: f64) -> Result<Self, FareError> {
        check_non_negative("distance_meters", distance_meters)?;
        check_non_negative("duration_seconds", duration_seconds)?;

        if distance_meters > MAX_DISTANCE_METERS {
            return Err(FareError::InvalidInput {
                field: "distance_meters",
                reason: format!(
                    "{} exceeds the maximum of {} meters",
                    distance_meters, MAX_DISTANCE_METERS
                ),
            });
        }

        Ok(Self {
            distance_meters,
            duration_seconds,
        })
    }

    pub fn distance_meters(&self) -> f64 {
        self.distance_meters
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), FareError> {
    if !value.is_finite() {
        return Err(FareError::InvalidInput {
            field,
            reason: format!("{} is not a finite number", value),
        });
    }
    if value < 0.0 {
        return Err(FareError::InvalidInput {
            field,
            reason: format!("{} is negative", value),
        });
    }
    Ok(())
}

/// Billable units per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierUnits {
    pub second_tier: u64,
    pub third_tier: u64,
    pub beyond_third_tier: u64,
}

impl TierUnits {
    pub fn total(&self) -> u64 {
        self.second_tier + self.third_tier + self.beyond_third_tier
    }
}

/// A priced journey under one scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fare {
    pub scheme: SchemeId,
    pub units: TierUnits,
    pub initial_charge_pence: i64,
    pub distance_charge_pence: i64,
}

impl Fare {
    pub fn total_pence(&self) -> i64 {
        self.initial_charge_pence + self.distance_charge_pence
    }

    /// Total in currency units, unrounded
    pub fn amount(&self) -> Decimal {
        Decimal::new(self.total_pence(), 2)
    }
}

/// Price a journey under `scheme`, returning the amount in currency units.
pub fn compute_fare(
    scheme: &PricingScheme,
    distance_meters: f64,
    duration_seconds: f64,
) -> Result<Decimal, FareError> {
    let metrics = RouteMetrics::new(distance_meters, duration_seconds)?;
    Ok(compute_breakdown(scheme, &metrics).amount())
}

/// Price a journey under `scheme`, keeping the per-tier unit counts.
pub fn compute_breakdown(scheme: &PricingScheme, metrics: &RouteMetrics) -> Fare {
    let units = tier_units(scheme, metrics.distance_meters);
    // Units are bounded by MAX_DISTANCE_METERS, so this cannot overflow.
    let distance_charge_pence = units.total() as i64 * scheme.tier_cost_per_unit_pence;

    Fare {
        scheme: scheme.id,
        units,
        initial_charge_pence: scheme.initial_charge_pence,
        distance_charge_pence,
    }
}

/// Price a journey under every scheme, in display order.
pub fn quote_all(metrics: &RouteMetrics) -> Vec<Fare> {
    SchemeId::ALL
        .iter()
        .map(|id| compute_breakdown(id.scheme(), metrics))
        .collect()
}

// Each tier past the first recounts the full units of the tiers below it,
// since every tier converts meters to units at its own rate.
fn tier_units(scheme: &PricingScheme, distance: f64) -> TierUnits {
    let initial = f64::from(scheme.initial_charge_distance);
    let second = f64::from(scheme.second_tier_distance);
    let third = f64::from(scheme.third_tier_distance);

    if distance <= initial {
        return TierUnits::default();
    }

    if distance <= second {
        return TierUnits {
            second_tier: billable_units(distance - initial, scheme.second_tier_unit_distance),
            ..TierUnits::default()
        };
    }

    let full_second_tier = billable_units(second - initial, scheme.second_tier_unit_distance);

    if distance <= third {
        return TierUnits {
            second_tier: full_second_tier,
            third_tier: billable_units(distance - second, scheme.third_tier_unit_distance),
            beyond_third_tier: 0,
        };
    }

    TierUnits {
        second_tier: full_second_tier,
        third_tier: billable_units(third - second, scheme.third_tier_unit_distance),
        beyond_third_tier: billable_units(distance - third, scheme.beyond_third_tier_unit_distance),
    }
}

fn billable_units(distance: f64, unit_distance: u32) -> u64 {
    (distance / f64::from(unit_distance)).ceil() as u64
}
