//! Food log repository for database operations

use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use healthlog_shared::{FoodLogEntry, MealType};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Food log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoodLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub meal_type: String,
    pub food_name: String,
    pub servings: Decimal,
    pub calories: Decimal,
    pub protein_g: Decimal,
    pub carbs_g: Decimal,
    pub fat_g: Decimal,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<FoodLogRecord> for FoodLogEntry {
    type Error = anyhow::Error;

    fn try_from(record: FoodLogRecord) -> Result<Self> {
        let meal_type: MealType = record
            .meal_type
            .parse()
            .map_err(|e: String| anyhow!("Corrupt food log {}: {}", record.id, e))?;

        Ok(FoodLogEntry {
            id: record.id,
            date: record.entry_date,
            meal_type,
            food_name: record.food_name,
            servings: record.servings,
            calories: record.calories,
            protein_g: record.protein_g,
            carbs_g: record.carbs_g,
            fat_g: record.fat_g,
        })
    }
}

/// Input for logging food
#[derive(Debug, Clone)]
pub struct CreateFoodLog {
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub meal_type: MealType,
    pub food_name: String,
    pub servings: Decimal,
    pub calories: Decimal,
    pub protein_g: Decimal,
    pub carbs_g: Decimal,
    pub fat_g: Decimal,
}

const FOOD_LOG_COLUMNS: &str =
    "id, user_id, entry_date, meal_type, food_name, servings, calories, protein_g, carbs_g, fat_g, created_at";

/// Food log repository
pub struct FoodLogRepository;

impl FoodLogRepository {
    pub async fn create(pool: &PgPool, input: CreateFoodLog) -> Result<FoodLogRecord> {
        let sql = format!(
            r#"
            INSERT INTO food_log_entries
                (user_id, entry_date, meal_type, food_name, servings, calories, protein_g, carbs_g, fat_g)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            FOOD_LOG_COLUMNS
        );

        let record = sqlx::query_as::<_, FoodLogRecord>(&sql)
            .bind(input.user_id)
            .bind(input.entry_date)
            .bind(input.meal_type.as_str())
            .bind(&input.food_name)
            .bind(input.servings)
            .bind(input.calories)
            .bind(input.protein_g)
            .bind(input.carbs_g)
            .bind(input.fat_g)
            .fetch_one(pool)
            .await?;

        Ok(record)
    }

    /// Entries of one date, in logging order
    pub async fn list_by_date(pool: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<Vec<FoodLogRecord>> {
        Self::list_by_range(pool, user_id, date, date).await
    }

    /// Entries of an inclusive date range, by date then logging order
    pub async fn list_by_range(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<FoodLogRecord>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM food_log_entries
            WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
            ORDER BY entry_date ASC, created_at ASC, id ASC
            "#,
            FOOD_LOG_COLUMNS
        );

        let records = sqlx::query_as::<_, FoodLogRecord>(&sql)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await?;

        Ok(records)
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM food_log_entries
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
