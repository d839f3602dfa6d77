use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FareError;

/// Identifier of a meter tariff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeId {
    Rate1,
    Rate2,
    Rate3,
}

impl SchemeId {
    /// Display order of the quotes
    pub const ALL: [SchemeId; 3] = [SchemeId::Rate1, SchemeId::Rate2, SchemeId::Rate3];

    pub fn as_str(self) -> &'static str {
        match self {
            SchemeId::Rate1 => "rate1",
            SchemeId::Rate2 => "rate2",
            SchemeId::Rate3 => "rate3",
        }
    }

    pub fn scheme(self) -> &'static PricingScheme {
        match self {
            SchemeId::Rate1 => &RATE1,
            SchemeId::Rate2 => &RATE2,
            SchemeId::Rate3 => &RATE3,
        }
    }
}

impl fmt::Display for SchemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemeId {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rate1" => Ok(SchemeId::Rate1),
            "rate2" => Ok(SchemeId::Rate2),
            "rate3" => Ok(SchemeId::Rate3),
            _ => Err(FareError::UnknownScheme(s.to_string())),
        }
    }
}

/// A tiered distance tariff.
///
/// Distances are in meters and absolute (measured from the start of the
/// journey). Costs are in pence. Tier thresholds must be strictly increasing:
/// `initial_charge_distance < second_tier_distance < third_tier_distance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingScheme {
    pub id: SchemeId,
    pub name: &'static str,
    /// Distance covered by the flat starting charge
    pub initial_charge_distance: u32,
    pub initial_charge_pence: i64,
    /// Charge added for every billable unit in any tier
    pub tier_cost_per_unit_pence: i64,
    pub second_tier_distance: u32,
    pub third_tier_distance: u32,
    pub second_tier_unit_distance: u32,
    pub third_tier_unit_distance: u32,
    pub beyond_third_tier_unit_distance: u32,
}

pub const RATE1: PricingScheme = PricingScheme {
    id: SchemeId::Rate1,
    name: "Rate 1",
    initial_charge_distance: 183,
    initial_charge_pence: 400,
    tier_cost_per_unit_pence: 40,
    second_tier_distance: 1597,
    third_tier_distance: 3202,
    second_tier_unit_distance: 202,
    third_tier_unit_distance: 535,
    beyond_third_tier_unit_distance: 320,
};

pub const RATE2: PricingScheme = PricingScheme {
    id: SchemeId::Rate2,
    name: "Rate 2",
    initial_charge_distance: 183,
    initial_charge_pence: 540,
    tier_cost_per_unit_pence: 40,
    second_tier_distance: 1549,
    third_tier_distance: 3154,
    second_tier_unit_distance: 152,
    third_tier_unit_distance: 401,
    beyond_third_tier_unit_distance: 240,
};

pub const RATE3: PricingScheme = PricingScheme {
    id: SchemeId::Rate3,
    name: "Rate 3",
    initial_charge_distance: 183,
    initial_charge_pence: 700,
    tier_cost_per_unit_pence: 50,
    second_tier_distance: 1591,
    third_tier_distance: 3094,
    second_tier_unit_distance: 141,
    third_tier_unit_distance: 376,
    beyond_third_tier_unit_distance: 224,
};
