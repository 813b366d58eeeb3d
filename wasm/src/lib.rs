//! Healthlog WASM Module
//!
//! Browser bindings for the trend and nutrition computations, so a dashboard
//! can recompute locally with the same code the backend runs. JSON in, JSON
//! out, in the same shapes the HTTP API returns.

use chrono::NaiveDate;
use healthlog_shared::types::{DailyNutritionResponse, WeightTrendResponse};
use healthlog_shared::validation::{parse_date, validate_food_entry, validate_weight_lbs};
use healthlog_shared::{
    FoodLogEntry, GapPolicy, NutritionAggregator, TrendConfig, WeightEntry, WeightTrendProcessor,
};
use wasm_bindgen::prelude::*;

/// Trend series for a JSON array of `{date, weight}` entries (pounds)
#[wasm_bindgen]
pub fn weight_trend(
    entries_json: &str,
    alpha: f64,
    window_days: u32,
    time_weighted: bool,
) -> Result<String, JsError> {
    compute_trend_json(entries_json, alpha, window_days, time_weighted).map_err(|e| JsError::new(&e))
}

/// Meal buckets and totals for `date` from a JSON array of food log entries
#[wasm_bindgen]
pub fn daily_nutrition(date: &str, entries_json: &str) -> Result<String, JsError> {
    aggregate_day_json(date, entries_json).map_err(|e| JsError::new(&e))
}

fn compute_trend_json(
    entries_json: &str,
    alpha: f64,
    window_days: u32,
    time_weighted: bool,
) -> Result<String, String> {
    let entries: Vec<WeightEntry> =
        serde_json::from_str(entries_json).map_err(|e| format!("invalid entries: {}", e))?;
    for entry in &entries {
        validate_weight_lbs(entry.weight).map_err(|e| format!("{} ({})", e, entry.date))?;
    }

    let config = TrendConfig {
        alpha,
        window_days,
        gap_policy: if time_weighted {
            GapPolicy::TimeWeighted
        } else {
            GapPolicy::Sequential
        },
    };
    let processor = WeightTrendProcessor::new(config).map_err(|e| e.to_string())?;

    let as_of = entries.iter().map(|e| e.date).max().unwrap_or(NaiveDate::MIN);
    let series = processor.compute_window(&entries, as_of, None);
    series.ensure_finite().map_err(|e| e.to_string())?;

    serde_json::to_string(&WeightTrendResponse::new(&series, processor.config())).map_err(|e| e.to_string())
}

fn aggregate_day_json(date: &str, entries_json: &str) -> Result<String, String> {
    let date = parse_date("date", date).map_err(|e| e.to_string())?;
    let entries: Vec<FoodLogEntry> =
        serde_json::from_str(entries_json).map_err(|e| format!("invalid entries: {}", e))?;
    for entry in &entries {
        if entry.date != date {
            return Err(format!("date: entry {} is dated {}, expected {}", entry.id, entry.date, date));
        }
        validate_food_entry(entry).map_err(|e| format!("{} ({})", e, entry.id))?;
    }

    let day = NutritionAggregator.aggregate(date, &entries);
    serde_json::to_string(&DailyNutritionResponse::from(&day)).map_err(|e| e.to_string())
}
