//! HTTP request handlers for the driver pay API.
//!
//! This module contains the handler functions for all endpoints of the
//! remote surface. Every request is scoped to one account through the
//! identity header; the handlers resolve the per-account store, perform the
//! operation and map [`EngineError`](crate::error::EngineError) values onto
//! HTTP statuses.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::aggregate_month;
use crate::error::EngineError;
use crate::models::{PricingConfig, ShiftDraft};
use crate::store::{ConfigStore, RecordStore};

use super::request::{CreateDayRequest, SettingsPayload};
use super::response::{ApiError, ApiErrorResponse, DayResponse, StatsResponse, StatusResponse};
use super::state::AppState;

/// Header carrying the caller's opaque numeric identity.
pub const ACCOUNT_ID_HEADER: &str = "x-account-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/settings", get(get_settings).put(put_settings))
        .route("/api/stats/:year/:month", get(get_stats))
        .route("/api/days", post(create_day))
        .route("/api/days/:id", delete(delete_day))
        .route("/api/wipe", delete(wipe_all))
        .with_state(state)
}

/// Extracts the account id from the identity header.
fn account_from_headers(headers: &HeaderMap) -> Result<i64, ApiErrorResponse> {
    let value = headers.get(ACCOUNT_ID_HEADER).ok_or_else(|| {
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::new(
                "MISSING_ACCOUNT_ID",
                format!("Request is missing the {} header", ACCOUNT_ID_HEADER),
            ),
        }
    })?;

    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .ok_or_else(|| {
            EngineError::validation(ACCOUNT_ID_HEADER, "must be a decimal integer").into()
        })
}

/// Maps a JSON extraction failure onto a 400 response.
fn map_json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
}

/// Handler for GET /api/settings.
///
/// Returns the account's pricing configuration, or the all-zero defaults
/// when nothing has been saved yet.
async fn get_settings(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let account_id = match account_from_headers(&headers) {
        Ok(id) => id,
        Err(response) => return response.into_response(),
    };

    let result = async {
        let store = state.store_for(account_id)?;
        store.get().await
    }
    .await;

    match result {
        Ok(config) => Json(SettingsPayload::from(config)).into_response(),
        Err(err) => {
            warn!(account_id, error = %err, "Failed to read settings");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for PUT /api/settings.
///
/// Replaces the configuration wholesale and echoes the saved values.
async fn put_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SettingsPayload>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let account_id = match account_from_headers(&headers) {
        Ok(id) => id,
        Err(response) => return response.into_response(),
    };
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => return map_json_rejection(correlation_id, rejection).into_response(),
    };

    if let Err(err) = validate_settings(&payload) {
        warn!(correlation_id = %correlation_id, account_id, error = %err, "Rejected settings");
        return ApiErrorResponse::from(err).into_response();
    }

    let result = async {
        let store = state.store_for(account_id)?;
        let _guard = state.write_lock().lock().await;
        store.save(PricingConfig::from(payload.clone())).await
    }
    .await;

    match result {
        Ok(()) => {
            info!(correlation_id = %correlation_id, account_id, "Settings replaced");
            Json(payload).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, account_id, error = %err, "Failed to save settings");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Rejects out-of-range tariff values before they reach storage.
fn validate_settings(payload: &SettingsPayload) -> Result<(), EngineError> {
    let fields = [
        ("cost_per_point", payload.cost_per_point),
        ("departure_fee", payload.departure_fee),
        ("price_per_tone", payload.price_per_tone),
    ];
    for (field, value) in fields {
        if value < Decimal::ZERO {
            return Err(EngineError::validation(field, "must not be negative"));
        }
    }
    Ok(())
}

/// Handler for GET /api/stats/:year/:month.
///
/// Returns the month's history (date descending) and aggregate totals.
async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    let account_id = match account_from_headers(&headers) {
        Ok(id) => id,
        Err(response) => return response.into_response(),
    };

    if !(1..=12).contains(&month) {
        return ApiErrorResponse::from(EngineError::validation(
            "month",
            "must be between 1 and 12",
        ))
        .into_response();
    }

    let result = async {
        let store = state.store_for(account_id)?;
        store.list_by_month(year, month).await
    }
    .await;

    match result {
        Ok(records) => {
            let summary = aggregate_month(&records, year, month);
            Json(StatsResponse::new(&records, summary)).into_response()
        }
        Err(err) => {
            warn!(account_id, year, month, error = %err, "Failed to read month");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /api/days.
///
/// Computes the income from the pricing in force, persists the record and
/// returns it. The server is authoritative for both the id and the income
/// snapshot.
async fn create_day(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateDayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let account_id = match account_from_headers(&headers) {
        Ok(id) => id,
        Err(response) => return response.into_response(),
    };
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return map_json_rejection(correlation_id, rejection).into_response(),
    };

    let draft = match ShiftDraft::try_from(request) {
        Ok(draft) => draft,
        Err(err) => {
            warn!(correlation_id = %correlation_id, account_id, error = %err, "Rejected day");
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let result = async {
        let store = state.store_for(account_id)?;
        let _guard = state.write_lock().lock().await;
        store.create(draft).await
    }
    .await;

    match result {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                account_id,
                record_id = %record.id,
                record_type = record.kind.type_code(),
                total_income = %record.total_income,
                "Day saved"
            );
            (StatusCode::CREATED, Json(DayResponse::from(&record))).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, account_id, error = %err, "Failed to save day");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for DELETE /api/days/:id.
async fn delete_day(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let account_id = match account_from_headers(&headers) {
        Ok(id) => id,
        Err(response) => return response.into_response(),
    };

    let result = async {
        let store = state.store_for(account_id)?;
        let _guard = state.write_lock().lock().await;
        store.delete_by_id(&id).await
    }
    .await;

    match result {
        Ok(()) => {
            info!(account_id, record_id = %id, "Day deleted");
            Json(StatusResponse::new("deleted")).into_response()
        }
        Err(err) => {
            warn!(account_id, record_id = %id, error = %err, "Failed to delete day");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for DELETE /api/wipe.
///
/// Removes every record and the configuration for the account. The handler
/// performs no confirmation; that gate lives with the caller.
async fn wipe_all(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let account_id = match account_from_headers(&headers) {
        Ok(id) => id,
        Err(response) => return response.into_response(),
    };

    let result = async {
        let store = state.store_for(account_id)?;
        let _guard = state.write_lock().lock().await;
        store.wipe_all().await
    }
    .await;

    match result {
        Ok(()) => {
            info!(account_id, "Account data wiped");
            Json(StatusResponse::new("wiped")).into_response()
        }
        Err(err) => {
            warn!(account_id, error = %err, "Failed to wipe account data");
            ApiErrorResponse::from(err).into_response()
        }
    }
}
