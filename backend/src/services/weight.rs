//! Weight logging and trend service
//!
//! Validates weigh-ins, persists them in pounds, and runs the stored history
//! through the [`WeightTrendProcessor`].

use crate::error::ApiError;
use crate::repositories::{UpsertWeightEntry, WeightRepository};
use chrono::{Duration, NaiveDate};
use healthlog_shared::validation::{parse_weight_unit, validate_lookback_days, validate_note, validate_weight_lbs};
use healthlog_shared::{TrendSeries, ValidationError, WeightEntry, WeightTrendProcessor};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Stored precision for weigh-ins, in pounds
const WEIGHT_SCALE: u32 = 2;

/// Unvalidated weigh-in as received from a client
#[derive(Debug, Clone)]
pub struct WeightEntryInput {
    pub date: NaiveDate,
    pub weight: f64,
    pub unit: Option<String>,
    pub notes: Option<String>,
}

/// One page of weight history
#[derive(Debug, Clone)]
pub struct WeightPage {
    pub entries: Vec<WeightEntry>,
    pub total_count: i64,
}

/// Convert to pounds and validate, rounded to storage precision
pub fn normalize_weight(weight: f64, unit: Option<&str>) -> Result<Decimal, ValidationError> {
    let unit = parse_weight_unit(unit)?;
    let lbs = validate_weight_lbs(unit.to_lbs(weight))?;
    let stored = Decimal::from_f64(lbs)
        .map(|d| d.round_dp(WEIGHT_SCALE))
        .ok_or_else(|| ValidationError::new("weight", "cannot be represented as a decimal"))?;
    if stored <= Decimal::ZERO {
        return Err(ValidationError::new("weight", "must be positive"));
    }
    Ok(stored)
}

/// Weight service for business logic
pub struct WeightService;

impl WeightService {
    /// Log a weigh-in, replacing any entry already stored for that date
    pub async fn log_weight(
        pool: &PgPool,
        user_id: Uuid,
        input: WeightEntryInput,
    ) -> Result<WeightEntry, ApiError> {
        let weight_lbs = normalize_weight(input.weight, input.unit.as_deref())?;
        let notes = validate_note(input.notes)?;

        let record = WeightRepository::upsert(
            pool,
            UpsertWeightEntry {
                user_id,
                entry_date: input.date,
                weight_lbs,
                notes,
            },
        )
        .await?;

        metrics::counter!("healthlog_weight_entries_logged_total").increment(1);
        info!(user_id = %user_id, date = %input.date, weight_lbs = %weight_lbs, "Weight logged");

        Ok(record.into())
    }

    /// Paginated history, newest first, optionally limited to the trailing `days`
    pub async fn get_history(
        pool: &PgPool,
        user_id: Uuid,
        today: NaiveDate,
        days: Option<u32>,
        limit: i64,
        offset: i64,
    ) -> Result<WeightPage, ApiError> {
        let since = days
            .map(validate_lookback_days)
            .transpose()?
            .map(|d| today - Duration::days(i64::from(d) - 1));

        let (records, total_count) =
            WeightRepository::list_page(pool, user_id, since, limit, offset).await?;

        Ok(WeightPage {
            entries: records.into_iter().map(Into::into).collect(),
            total_count,
        })
    }

    /// Trend series for the `days` ending at `as_of`
    ///
    /// Smoothing uses the full stored history up to `as_of`.
    pub async fn get_trend(
        pool: &PgPool,
        processor: &WeightTrendProcessor,
        user_id: Uuid,
        as_of: NaiveDate,
        days: u32,
    ) -> Result<TrendSeries, ApiError> {
        let days = validate_lookback_days(days)?;
        let entries: Vec<WeightEntry> = WeightRepository::list_until(pool, user_id, as_of)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let series = processor.compute_window(&entries, as_of, Some(days));
        if let Err(e) = series.ensure_finite() {
            error!(user_id = %user_id, as_of = %as_of, "Trend produced non-finite value: {}", e);
            return Err(e.into());
        }

        metrics::counter!("healthlog_trend_computations_total").increment(1);
        debug!(
            user_id = %user_id,
            as_of = %as_of,
            history = entries.len(),
            points = series.points.len(),
            "Weight trend computed"
        );

        Ok(series)
    }

    pub async fn delete_entry(pool: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<(), ApiError> {
        if !WeightRepository::delete_by_date(pool, user_id, date).await? {
            return Err(ApiError::NotFound(format!("No weight entry for {}", date)));
        }
        info!(user_id = %user_id, date = %date, "Weight entry deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_weight_defaults_to_pounds() {
        assert_eq!(normalize_weight(180.456, None).unwrap(), Decimal::new(18046, 2));
    }

    #[test]
    fn test_normalize_weight_converts_kg() {
        let lbs = normalize_weight(100.0, Some("kg")).unwrap();
        assert_eq!(lbs, Decimal::new(22046, 2));
    }

    #[test]
    fn test_normalize_weight_rejects_bad_input() {
        assert_eq!(normalize_weight(-1.0, None).unwrap_err().field, "weight");
        assert_eq!(normalize_weight(f64::NAN, None).unwrap_err().field, "weight");
        assert_eq!(normalize_weight(180.0, Some("grams")).unwrap_err().field, "unit");
        // Rounds to zero at storage precision
        assert_eq!(normalize_weight(0.001, None).unwrap_err().field, "weight");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_normalized_weight_within_a_cent(weight in 50.0f64..1000.0) {
            let stored = normalize_weight(weight, None).unwrap();
            let back: f64 = rust_decimal::prelude::ToPrimitive::to_f64(&stored).unwrap();
            prop_assert!((back - weight).abs() <= 0.005 + 1e-9);
        }
    }
}
