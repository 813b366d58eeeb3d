//! Weight logging and trend API routes

use crate::auth::Session;
use crate::error::ApiResult;
use crate::services::weight::{WeightEntryInput, WeightService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use healthlog_shared::types::{
    LogWeightRequest, WeightEntryResponse, WeightHistoryQuery, WeightHistoryResponse,
    WeightTrendQuery, WeightTrendResponse,
};
use healthlog_shared::validation::parse_date;

/// Create weight routes
pub fn weight_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_weight_history).post(log_weight))
        .route("/trend", get(get_weight_trend))
        .route("/:date", delete(delete_weight))
}

/// POST /api/v1/weight - Log a weigh-in
///
/// Accepts lbs (default), kg or stone. Stored and returned in pounds. A second
/// weigh-in for the same date replaces the first.
async fn log_weight(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LogWeightRequest>,
) -> ApiResult<(StatusCode, Json<WeightEntryResponse>)> {
    let input = WeightEntryInput {
        date: parse_date("date", &req.date)?,
        weight: req.weight,
        unit: req.unit,
        notes: req.notes,
    };

    let entry = WeightService::log_weight(state.db(), session.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(WeightEntryResponse::from(&entry))))
}

/// GET /api/v1/weight - Weight history, newest first
///
/// Pagination: limit (default 50, max 100) and offset.
async fn get_weight_history(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<WeightHistoryQuery>,
) -> ApiResult<Json<WeightHistoryResponse>> {
    let query = query.normalize();
    let today = Utc::now().date_naive();

    let page = WeightService::get_history(
        state.db(),
        session.user_id,
        today,
        query.days,
        query.limit,
        query.offset,
    )
    .await?;

    let items: Vec<WeightEntryResponse> = page.entries.iter().map(Into::into).collect();
    let has_more = query.offset + (items.len() as i64) < page.total_count;

    Ok(Json(WeightHistoryResponse {
        items,
        total_count: page.total_count,
        limit: query.limit,
        offset: query.offset,
        has_more,
    }))
}

/// GET /api/v1/weight/trend - Smoothed trend and moving average
///
/// `days` defaults to `analytics.default_lookback_days`, `as_of` to today.
async fn get_weight_trend(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<WeightTrendQuery>,
) -> ApiResult<Json<WeightTrendResponse>> {
    let as_of = match query.as_of.as_deref() {
        Some(s) => parse_date("as_of", s)?,
        None => Utc::now().date_naive(),
    };
    let days = query
        .days
        .unwrap_or(state.config().analytics.default_lookback_days);

    let series = WeightService::get_trend(state.db(), state.trend(), session.user_id, as_of, days).await?;
    Ok(Json(WeightTrendResponse::new(&series, state.trend().config())))
}

/// DELETE /api/v1/weight/:date - Remove the weigh-in for a date
async fn delete_weight(
    State(state): State<AppState>,
    session: Session,
    Path(date): Path<String>,
) -> ApiResult<StatusCode> {
    let date = parse_date("date", &date)?;
    WeightService::delete_entry(state.db(), session.user_id, date).await?;
    Ok(StatusCode::NO_CONTENT)
}
