//! Nutrition API routes

use crate::auth::Session;
use crate::error::ApiResult;
use crate::services::NutritionService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use healthlog_shared::types::{
    DailyNutritionResponse, DailySummaryResponse, DateQuery, FoodLogResponse, LogFoodRequest,
    NutritionRangeQuery, NutritionRangeResponse,
};
use healthlog_shared::validation::parse_date;
use healthlog_shared::ValidationError;
use uuid::Uuid;

/// Create nutrition routes
pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/log", get(get_food_logs).post(log_food))
        .route("/log/:id", delete(delete_food_log))
        .route("/daily", get(get_daily_nutrition))
        .route("/summary", get(get_range_summary))
}

fn date_or_today(query: &DateQuery) -> Result<NaiveDate, ValidationError> {
    match query.date.as_deref() {
        Some(s) => parse_date("date", s),
        None => Ok(Utc::now().date_naive()),
    }
}

/// POST /api/v1/nutrition/log - Log a food entry
async fn log_food(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LogFoodRequest>,
) -> ApiResult<(StatusCode, Json<FoodLogResponse>)> {
    let entry = NutritionService::log_food(state.db(), session.user_id, &req).await?;
    Ok((StatusCode::CREATED, Json(FoodLogResponse::from(&entry))))
}

/// GET /api/v1/nutrition/log?date= - Entries of one date
async fn get_food_logs(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<Vec<FoodLogResponse>>> {
    let date = date_or_today(&query)?;
    let entries = NutritionService::get_logs(state.db(), session.user_id, date).await?;
    Ok(Json(entries.iter().map(Into::into).collect()))
}

/// DELETE /api/v1/nutrition/log/:id - Delete a food entry
async fn delete_food_log(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = Uuid::parse_str(&id).map_err(|_| ValidationError::new("id", "must be a UUID"))?;
    NutritionService::delete_log(state.db(), session.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/nutrition/daily?date= - Meal buckets and daily totals
async fn get_daily_nutrition(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<DailyNutritionResponse>> {
    let date = date_or_today(&query)?;
    let day = NutritionService::get_daily(state.db(), &state.nutrition, session.user_id, date).await?;
    Ok(Json(DailyNutritionResponse::from(&day)))
}

/// GET /api/v1/nutrition/summary?start=&end= - One summary per day
async fn get_range_summary(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<NutritionRangeQuery>,
) -> ApiResult<Json<NutritionRangeResponse>> {
    let start = parse_date("start", &query.start)?;
    let end = parse_date("end", &query.end)?;

    let days = NutritionService::get_range_summary(state.db(), &state.nutrition, session.user_id, start, end)
        .await?;

    Ok(Json(NutritionRangeResponse {
        start,
        end,
        days: days.iter().map(DailySummaryResponse::from).collect(),
    }))
}
