//! Weight entry repository for database operations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use healthlog_shared::WeightEntry;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Weight entry record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeightEntryRecord {
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub weight_lbs: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WeightEntryRecord> for WeightEntry {
    fn from(record: WeightEntryRecord) -> Self {
        WeightEntry {
            date: record.entry_date,
            weight: record.weight_lbs.as_f64(),
            note: record.notes,
        }
    }
}

/// Input for upserting a weigh-in
#[derive(Debug, Clone)]
pub struct UpsertWeightEntry {
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub weight_lbs: Decimal,
    pub notes: Option<String>,
}

/// Weight repository for database operations
pub struct WeightRepository;

impl WeightRepository {
    /// Insert a weigh-in, replacing any existing entry for the same date
    pub async fn upsert(pool: &PgPool, input: UpsertWeightEntry) -> Result<WeightEntryRecord> {
        let record = sqlx::query_as::<_, WeightEntryRecord>(
            r#"
            INSERT INTO weight_entries (user_id, entry_date, weight_lbs, notes)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, entry_date) DO UPDATE
            SET weight_lbs = EXCLUDED.weight_lbs,
                notes = EXCLUDED.notes,
                updated_at = NOW()
            RETURNING user_id, entry_date, weight_lbs, notes, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.entry_date)
        .bind(input.weight_lbs)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Page through a user's weigh-ins, newest first
    ///
    /// Returns the page and the total number of matching entries.
    pub async fn list_page(
        pool: &PgPool,
        user_id: Uuid,
        since: Option<NaiveDate>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<WeightEntryRecord>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM weight_entries
            WHERE user_id = $1 AND ($2::date IS NULL OR entry_date >= $2)
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(pool)
        .await?;

        let records = sqlx::query_as::<_, WeightEntryRecord>(
            r#"
            SELECT user_id, entry_date, weight_lbs, notes, created_at, updated_at
            FROM weight_entries
            WHERE user_id = $1 AND ($2::date IS NULL OR entry_date >= $2)
            ORDER BY entry_date DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(since)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok((records, total))
    }

    /// Every weigh-in on or before `as_of`, oldest first
    pub async fn list_until(
        pool: &PgPool,
        user_id: Uuid,
        as_of: NaiveDate,
    ) -> Result<Vec<WeightEntryRecord>> {
        let records = sqlx::query_as::<_, WeightEntryRecord>(
            r#"
            SELECT user_id, entry_date, weight_lbs, notes, created_at, updated_at
            FROM weight_entries
            WHERE user_id = $1 AND entry_date <= $2
            ORDER BY entry_date ASC
            "#,
        )
        .bind(user_id)
        .bind(as_of)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn delete_by_date(pool: &PgPool, user_id: Uuid, entry_date: NaiveDate) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM weight_entries
            WHERE user_id = $1 AND entry_date = $2
            "#,
        )
        .bind(user_id)
        .bind(entry_date)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_converts_to_pounds_entry() {
        let record = WeightEntryRecord {
            user_id: Uuid::new_v4(),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            weight_lbs: Decimal::new(19840, 2),
            notes: Some("morning".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let entry = WeightEntry::from(record);
        assert_eq!(entry.weight, 198.4);
        assert_eq!(entry.note.as_deref(), Some("morning"));
    }

    #[test]
    fn test_record_conversion_keeps_extreme_weights() {
        let record = WeightEntryRecord {
            user_id: Uuid::new_v4(),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            weight_lbs: Decimal::new(99_999_99, 2),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(WeightEntry::from(record).weight, 99_999.99);
    }
}
