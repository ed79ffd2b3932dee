//! Response types and error mapping for the driver pay API.
//!
//! Like the request types, the response shapes are shared between the axum
//! handlers (which serialize them) and the remote store client (which
//! deserializes them).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{MonthlySummary, ShiftKind, ShiftRecord};

/// Wire shape of one persisted shift record.
///
/// Flat rather than tagged: every variant field is present, zeroed when the
/// pay model does not use it, with `record_type` naming the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayResponse {
    /// Unique identifier assigned at creation.
    pub id: String,
    /// The calendar date the shift was worked.
    pub date: NaiveDate,
    /// One of `CITY_MAIN`, `CITY_EXTRA` or `INTERCITY`.
    pub record_type: String,
    /// Delivery points served.
    #[serde(default)]
    pub points: i64,
    /// Additional points on top of the planned route.
    #[serde(default)]
    pub additional_points: i64,
    /// Cargo weight in tons.
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
    /// The income snapshot computed at save time.
    pub total_salary: Decimal,
}

impl From<&ShiftRecord> for DayResponse {
    fn from(record: &ShiftRecord) -> Self {
        let mut response = DayResponse {
            id: record.id.clone(),
            date: record.date,
            record_type: record.kind.type_code().to_string(),
            points: 0,
            additional_points: 0,
            weight: Decimal::ZERO,
            manual_payment: Decimal::ZERO,
            distance_km: Decimal::ZERO,
            price_per_km: Decimal::ZERO,
            total_salary: record.total_income,
        };

        match &record.kind {
            ShiftKind::CityMain {
                points,
                extra_points,
                weight,
            } => {
                response.points = i64::from(*points);
                response.additional_points = i64::from(*extra_points);
                response.weight = *weight;
            }
            ShiftKind::CityExtra {
                points,
                extra_points,
                weight,
                manual_base,
            } => {
                response.points = i64::from(*points);
                response.additional_points = i64::from(*extra_points);
                response.weight = *weight;
                response.manual_payment = *manual_base;
            }
            ShiftKind::Intercity {
                distance_km,
                price_per_km,
            } => {
                response.distance_km = *distance_km;
                response.price_per_km = *price_per_km;
            }
        }

        response
    }
}

impl TryFrom<DayResponse> for ShiftRecord {
    type Error = EngineError;

    fn try_from(response: DayResponse) -> EngineResult<Self> {
        let clamp = |raw: i64| raw.clamp(0, i64::from(u32::MAX)) as u32;
        let kind = match response.record_type.as_str() {
            "CITY_MAIN" => ShiftKind::CityMain {
                points: clamp(response.points),
                extra_points: clamp(response.additional_points),
                weight: response.weight,
            },
            "CITY_EXTRA" => ShiftKind::CityExtra {
                points: clamp(response.points),
                extra_points: clamp(response.additional_points),
                weight: response.weight,
                manual_base: response.manual_payment,
            },
            "INTERCITY" => ShiftKind::Intercity {
                distance_km: response.distance_km,
                price_per_km: response.price_per_km,
            },
            other => {
                return Err(EngineError::validation(
                    "record_type",
                    format!("unknown record type '{}' in response", other),
                ));
            }
        };

        Ok(ShiftRecord {
            id: response.id,
            date: response.date,
            kind,
            total_income: response.total_salary,
        })
    }
}

/// Response body for `GET /api/stats/{year}/{month}`: the month's history
/// (date descending) together with its aggregate totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// The month's records, date descending, creation ties newest first.
    pub history: Vec<DayResponse>,
    /// Sum of income snapshots.
    pub total_salary: Decimal,
    /// Sum of intercity distances.
    pub total_km: Decimal,
    /// Sum of points plus extra points.
    pub total_points: u64,
    /// Sum of cargo weight in tons.
    pub total_weight: Decimal,
    /// Number of shifts worked in the month.
    pub total_days: usize,
}

impl StatsResponse {
    /// Builds the response from a month's records and their aggregate.
    pub fn new(records: &[ShiftRecord], summary: MonthlySummary) -> Self {
        StatsResponse {
            history: records.iter().map(DayResponse::from).collect(),
            total_salary: summary.total_income,
            total_km: summary.total_distance_km,
            total_points: summary.total_points,
            total_weight: summary.total_weight,
            total_days: summary.shift_count,
        }
    }
}

/// Confirmation body for destructive operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// What happened, e.g. `deleted` or `wiped`.
    pub status: String,
}

impl StatusResponse {
    /// Creates a confirmation with the given status word.
    pub fn new(status: impl Into<String>) -> Self {
        StatusResponse {
            status: status.into(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Validation { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "VALIDATION_ERROR",
                    format!("Invalid value for '{}': {}", field, message),
                ),
            },
            EngineError::NotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", format!("No shift record with id '{}'", id)),
            },
            EngineError::Persistence { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("PERSISTENCE_ERROR", message),
            },
            EngineError::ConfigUnavailable { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("CONFIG_UNAVAILABLE", message),
            },
        }
    }
}
