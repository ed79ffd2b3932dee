//! Request types for the driver pay API.
//!
//! This module defines the JSON request structures for the remote surface.
//! The same types serve both halves of the system: the axum handlers
//! deserialize them, and the remote store client serializes them. Field
//! names are fixed by the wire contract and must not drift.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{PricingConfig, ShiftDraft, ShiftKind};

/// Wire shape of the pricing configuration.
///
/// The wire names predate this implementation: `cost_per_point` is the
/// per-point rate, `departure_fee` the flat city base rate, and
/// `price_per_tone` the per-ton rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsPayload {
    /// Rate paid per delivery point.
    #[serde(default)]
    pub cost_per_point: Decimal,
    /// Flat amount paid for every `CITY_MAIN` shift.
    #[serde(default)]
    pub departure_fee: Decimal,
    /// Rate paid per ton of cargo.
    #[serde(default)]
    pub price_per_tone: Decimal,
}

impl From<PricingConfig> for SettingsPayload {
    fn from(config: PricingConfig) -> Self {
        SettingsPayload {
            cost_per_point: config.price_per_point,
            departure_fee: config.base_rate,
            price_per_tone: config.price_per_ton,
        }
    }
}

impl From<SettingsPayload> for PricingConfig {
    fn from(payload: SettingsPayload) -> Self {
        PricingConfig {
            base_rate: payload.departure_fee,
            price_per_point: payload.cost_per_point,
            price_per_ton: payload.price_per_tone,
        }
    }
}

/// Request body for `POST /api/days`.
///
/// All numeric fields are optional and default to zero; which of them the
/// server reads depends on `record_type`. Negative values are coerced to
/// zero during conversion, so they behave identically to missing ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDayRequest {
    /// The calendar date the shift was worked.
    pub date: NaiveDate,
    /// One of `CITY_MAIN`, `CITY_EXTRA` or `INTERCITY`.
    pub record_type: String,
    /// Delivery points served (city shifts).
    #[serde(default)]
    pub points: i64,
    /// Additional points on top of the planned route (city shifts).
    #[serde(default)]
    pub additional_points: i64,
    /// Cargo weight in tons (city shifts).
    #[serde(default)]
    pub weight: Decimal,
    /// Caller-supplied base amount (`CITY_EXTRA` only).
    #[serde(default)]
    pub manual_payment: Decimal,
    /// Distance in kilometres (`INTERCITY` only).
    #[serde(default)]
    pub distance_km: Decimal,
    /// Agreed price per kilometre (`INTERCITY` only).
    #[serde(default)]
    pub price_per_km: Decimal,
}

/// Coerces a possibly-negative wire integer into a point count.
fn clamp_points(raw: i64) -> u32 {
    raw.clamp(0, i64::from(u32::MAX)) as u32
}

impl TryFrom<CreateDayRequest> for ShiftDraft {
    type Error = EngineError;

    fn try_from(request: CreateDayRequest) -> EngineResult<Self> {
        let kind = match request.record_type.as_str() {
            "CITY_MAIN" => ShiftKind::CityMain {
                points: clamp_points(request.points),
                extra_points: clamp_points(request.additional_points),
                weight: request.weight,
            },
            "CITY_EXTRA" => ShiftKind::CityExtra {
                points: clamp_points(request.points),
                extra_points: clamp_points(request.additional_points),
                weight: request.weight,
                manual_base: request.manual_payment,
            },
            "INTERCITY" => ShiftKind::Intercity {
                distance_km: request.distance_km,
                price_per_km: request.price_per_km,
            },
            other => {
                return Err(EngineError::validation(
                    "record_type",
                    format!(
                        "'{}' is not one of CITY_MAIN, CITY_EXTRA, INTERCITY",
                        other
                    ),
                ));
            }
        };

        Ok(ShiftDraft {
            date: request.date,
            kind,
        })
    }
}

impl From<&ShiftDraft> for CreateDayRequest {
    fn from(draft: &ShiftDraft) -> Self {
        let mut request = CreateDayRequest {
            date: draft.date,
            record_type: draft.kind.type_code().to_string(),
            points: 0,
            additional_points: 0,
            weight: Decimal::ZERO,
            manual_payment: Decimal::ZERO,
            distance_km: Decimal::ZERO,
            price_per_km: Decimal::ZERO,
        };

        match &draft.kind {
            ShiftKind::CityMain {
                points,
                extra_points,
                weight,
            } => {
                request.points = i64::from(*points);
                request.additional_points = i64::from(*extra_points);
                request.weight = *weight;
            }
            ShiftKind::CityExtra {
                points,
                extra_points,
                weight,
                manual_base,
            } => {
                request.points = i64::from(*points);
                request.additional_points = i64::from(*extra_points);
                request.weight = *weight;
                request.manual_payment = *manual_base;
            }
            ShiftKind::Intercity {
                distance_km,
                price_per_km,
            } => {
                request.distance_km = *distance_km;
                request.price_per_km = *price_per_km;
            }
        }

        request
    }
}
