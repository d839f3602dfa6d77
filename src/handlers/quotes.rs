use axum::{
    Json,
    extract::{Path, Query, State},
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::fare::{Fare, RouteMetrics, SchemeId, TierUnits, compute_breakdown, quote_all};
use crate::utils::geo::Coordinates;
use crate::utils::money::format_amount;

// ============ Quotes ============

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub distance_meters: f64,
    #[serde(default)]
    pub duration_seconds: f64,
    pub origin: Option<Coordinates>,
    pub destination: Option<Coordinates>,
}

#[derive(Debug, Deserialize)]
pub struct SingleQuoteParams {
    pub distance_meters: f64,
    #[serde(default)]
    pub duration_seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct FareQuote {
    pub scheme: SchemeId,
    pub name: &'static str,
    pub amount: Decimal,
    pub display: String,
    pub breakdown: FareBreakdown,
}

#[derive(Debug, Serialize)]
pub struct FareBreakdown {
    pub units: TierUnits,
    pub total_units: u64,
    pub initial_charge: Decimal,
    pub distance_charge: Decimal,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub currency_symbol: String,
    pub quotes: Vec<FareQuote>,
    pub quoted_at: DateTime<Utc>,
}

fn to_fare_quote(config: &Config, fare: Fare) -> FareQuote {
    let amount = fare.amount();
    FareQuote {
        scheme: fare.scheme,
        name: fare.scheme.scheme().name,
        amount,
        display: format_amount(&config.currency_symbol, amount),
        breakdown: FareBreakdown {
            units: fare.units,
            total_units: fare.units.total(),
            initial_charge: Decimal::new(fare.initial_charge_pence, 2),
            distance_charge: Decimal::new(fare.distance_charge_pence, 2),
        },
    }
}

fn check_in_service_area(
    config: &Config,
    label: &str,
    point: Option<Coordinates>,
) -> AppResult<()> {
    let Some(point) = point else {
        return Ok(());
    };

    if !point.is_valid() {
        return Err(AppError::BadRequest(format!(
            "{} ({}, {}) is not a valid coordinate",
            label, point.lat, point.lng
        )));
    }

    let area = &config.service_area;
    if !area.contains(point) {
        return Err(AppError::BadRequest(format!(
            "{} must be within {} km of the service area center",
            label, area.radius_km
        )));
    }

    Ok(())
}

/// Quote a route under every pricing scheme
pub async fn create_quote(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<QuoteRequest>, AppError>,
) -> AppResult<Json<QuoteResponse>> {
    check_in_service_area(&state.config, "Origin", payload.origin)?;
    check_in_service_area(&state.config, "Destination", payload.destination)?;

    let metrics = RouteMetrics::new(payload.distance_meters, payload.duration_seconds)?;

    let quotes: Vec<FareQuote> = quote_all(&metrics)
        .into_iter()
        .map(|fare| to_fare_quote(&state.config, fare))
        .collect();

    tracing::debug!(
        distance_meters = metrics.distance_meters(),
        duration_seconds = metrics.duration_seconds(),
        quotes = ?quotes.iter().map(|q| q.display.as_str()).collect::<Vec<_>>(),
        "Quoted route"
    );

    Ok(Json(QuoteResponse {
        distance_meters: metrics.distance_meters(),
        duration_seconds: metrics.duration_seconds(),
        currency_symbol: state.config.currency_symbol.clone(),
        quotes,
        quoted_at: Utc::now(),
    }))
}

/// Quote a route under a single scheme
pub async fn get_quote(
    State(state): State<AppState>,
    WithRejection(Path(scheme), _): WithRejection<Path<String>, AppError>,
    WithRejection(Query(params), _): WithRejection<Query<SingleQuoteParams>, AppError>,
) -> AppResult<Json<FareQuote>> {
    let scheme: SchemeId = scheme.parse()?;
    let metrics = RouteMetrics::new(params.distance_meters, params.duration_seconds)?;

    let fare = compute_breakdown(scheme.scheme(), &metrics);
    tracing::debug!(
        scheme = %scheme,
        distance_meters = metrics.distance_meters(),
        total_pence = fare.total_pence(),
        "Quoted route"
    );

    Ok(Json(to_fare_quote(&state.config, fare)))
}

// ============ Schemes ============

#[derive(Debug, Serialize)]
pub struct SchemeResponse {
    pub id: SchemeId,
    pub name: &'static str,
    pub initial_charge_distance: u32,
    pub initial_charge_cost: Decimal,
    pub tier_cost_per_unit: Decimal,
    pub second_tier_distance: u32,
    pub third_tier_distance: u32,
    pub second_tier_unit_distance: u32,
    pub third_tier_unit_distance: u32,
    pub beyond_third_tier_unit_distance: u32,
}

/// List the tariff tables
pub async fn list_schemes() -> Json<Vec<SchemeResponse>> {
    let responses = SchemeId::ALL
        .iter()
        .map(|id| {
            let s = id.scheme();
            SchemeResponse {
                id: s.id,
                name: s.name,
                initial_charge_distance: s.initial_charge_distance,
                initial_charge_cost: Decimal::new(s.initial_charge_pence, 2),
                tier_cost_per_unit: Decimal::new(s.tier_cost_per_unit_pence, 2),
                second_tier_distance: s.second_tier_distance,
                third_tier_distance: s.third_tier_distance,
                second_tier_unit_distance: s.second_tier_unit_distance,
                third_tier_unit_distance: s.third_tier_unit_distance,
                beyond_third_tier_unit_distance: s.beyond_third_tier_unit_distance,
            }
        })
        .collect();

    Json(responses)
}
