//! Food logging and daily nutrition service

use crate::error::ApiError;
use crate::repositories::{CreateFoodLog, FoodLogRecord, FoodLogRepository};
use chrono::NaiveDate;
use healthlog_shared::validation::{
    parse_date, parse_meal_type, validate_date_range, validate_food_name, validate_macro,
    validate_servings,
};
use healthlog_shared::{DailyNutrition, DailyNutritionSummary, FoodLogEntry, NutritionAggregator};
use healthlog_shared::types::LogFoodRequest;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

/// Validate a food log request into a repository insert
pub fn validate_food_request(user_id: Uuid, req: &LogFoodRequest) -> Result<CreateFoodLog, ApiError> {
    Ok(CreateFoodLog {
        user_id,
        entry_date: parse_date("date", &req.date)?,
        meal_type: parse_meal_type(&req.meal_type)?,
        food_name: validate_food_name(&req.food_name)?,
        servings: validate_servings(req.servings)?,
        calories: validate_macro("calories", req.calories)?,
        protein_g: validate_macro("protein_g", req.protein_g)?,
        carbs_g: validate_macro("carbs_g", req.carbs_g)?,
        fat_g: validate_macro("fat_g", req.fat_g)?,
    })
}

fn into_entries(records: Vec<FoodLogRecord>) -> Result<Vec<FoodLogEntry>, ApiError> {
    records
        .into_iter()
        .map(|r| FoodLogEntry::try_from(r).map_err(ApiError::Internal))
        .collect()
}

/// Nutrition service
pub struct NutritionService;

impl NutritionService {
    pub async fn log_food(
        pool: &PgPool,
        user_id: Uuid,
        req: &LogFoodRequest,
    ) -> Result<FoodLogEntry, ApiError> {
        let input = validate_food_request(user_id, req)?;
        let record = FoodLogRepository::create(pool, input).await?;

        metrics::counter!("healthlog_food_entries_logged_total").increment(1);
        info!(
            user_id = %user_id,
            date = %record.entry_date,
            meal_type = %record.meal_type,
            "Food logged"
        );

        FoodLogEntry::try_from(record).map_err(ApiError::Internal)
    }

    pub async fn get_logs(pool: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<Vec<FoodLogEntry>, ApiError> {
        into_entries(FoodLogRepository::list_by_date(pool, user_id, date).await?)
    }

    /// Meal buckets and totals for one date
    pub async fn get_daily(
        pool: &PgPool,
        aggregator: &NutritionAggregator,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<DailyNutrition, ApiError> {
        let entries = Self::get_logs(pool, user_id, date).await?;
        let day = aggregator.aggregate(date, &entries);

        debug!(
            user_id = %user_id,
            date = %date,
            meal_count = day.summary.meal_count,
            "Daily nutrition aggregated"
        );
        Ok(day)
    }

    /// One summary per day of the inclusive range, empty days included
    pub async fn get_range_summary(
        pool: &PgPool,
        aggregator: &NutritionAggregator,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyNutritionSummary>, ApiError> {
        validate_date_range(start, end)?;
        let entries = into_entries(FoodLogRepository::list_by_range(pool, user_id, start, end).await?)?;

        debug!(user_id = %user_id, start = %start, end = %end, entries = entries.len(), "Nutrition range summarized");
        Ok(aggregator.summarize_range(start, end, &entries))
    }

    pub async fn delete_log(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        if !FoodLogRepository::delete(pool, id, user_id).await? {
            return Err(ApiError::NotFound("Food log not found".to_string()));
        }
        info!(user_id = %user_id, food_log_id = %id, "Food log deleted");
        Ok(())
    }
}
