//! API request and response types
//!
//! Requests are closed schemas: unknown fields are rejected. Dates, meal types
//! and units arrive as strings and are parsed by [`crate::validation`].
//!
//! Responses are built from the domain models through `From` impls, so every
//! handler renders a given payload the same way.

use crate::models::{
    DailyNutrition, DailyNutritionSummary, FoodLogEntry, MacroTotals, MealBucket, MealType,
    WeightEntry, WeightTrendPoint,
};
use crate::trend::{GapPolicy, TrendConfig, TrendSeries, TrendSummary};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for history queries
pub const DEFAULT_PAGE_SIZE: i64 = 50;
/// Largest page size a client may request
pub const MAX_PAGE_SIZE: i64 = 100;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Session Types
// ============================================================================

/// Authentication tokens response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// User profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Weight Types
// ============================================================================

/// Weight log request
///
/// Logging a second weight for the same date replaces the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogWeightRequest {
    /// Calendar date of the weigh-in (YYYY-MM-DD)
    pub date: String,
    /// Weight value in `unit`
    pub weight: f64,
    /// lbs (default), kg or stone
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Stored weigh-in, always in pounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntryResponse {
    pub date: NaiveDate,
    pub weight_lbs: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&WeightEntry> for WeightEntryResponse {
    fn from(entry: &WeightEntry) -> Self {
        Self {
            date: entry.date,
            weight_lbs: round2(entry.weight),
            notes: entry.note.clone(),
        }
    }
}

/// Weight history query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightHistoryQuery {
    /// Only entries from the trailing `days` calendar days
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Weight history query with pagination applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedHistoryQuery {
    pub days: Option<u32>,
    pub limit: i64,
    pub offset: i64,
}

impl WeightHistoryQuery {
    /// Clamp pagination: limit defaults to 50 and is capped at 100, offset is never negative
    pub fn normalize(&self) -> NormalizedHistoryQuery {
        NormalizedHistoryQuery {
            days: self.days,
            limit: self
                .limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

/// Paginated weight history, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightHistoryResponse {
    pub items: Vec<WeightEntryResponse>,
    pub total_count: i64,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

/// Weight trend query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightTrendQuery {
    /// Lookback window in days, ending at `as_of`
    #[serde(default)]
    pub days: Option<u32>,
    /// Reference date (YYYY-MM-DD), defaults to today
    #[serde(default)]
    pub as_of: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightTrendPointResponse {
    pub date: NaiveDate,
    pub weight_lbs: f64,
    pub trend_weight_lbs: f64,
    pub seven_day_avg: f64,
}

impl From<&WeightTrendPoint> for WeightTrendPointResponse {
    fn from(point: &WeightTrendPoint) -> Self {
        Self {
            date: point.date,
            weight_lbs: round2(point.raw_weight),
            trend_weight_lbs: round2(point.trend_weight),
            seven_day_avg: round2(point.seven_day_avg),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSummaryResponse {
    pub start_weight: Option<f64>,
    pub current_weight: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
}

impl From<TrendSummary> for TrendSummaryResponse {
    fn from(summary: TrendSummary) -> Self {
        Self {
            start_weight: summary.start_weight.map(round2),
            current_weight: summary.current_weight.map(round2),
            change: summary.change.map(round2),
            change_percent: summary.change_percent.map(round2),
        }
    }
}

/// Trend series with the parameters it was computed under
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightTrendResponse {
    pub points: Vec<WeightTrendPointResponse>,
    pub summary: TrendSummaryResponse,
    pub alpha: f64,
    pub window_days: u32,
    pub gap_policy: GapPolicy,
}

impl WeightTrendResponse {
    pub fn new(series: &TrendSeries, config: &TrendConfig) -> Self {
        Self {
            points: series.points.iter().map(Into::into).collect(),
            summary: series.summary.into(),
            alpha: config.alpha,
            window_days: config.window_days,
            gap_policy: config.gap_policy,
        }
    }
}

// ============================================================================
// Nutrition Types
// ============================================================================

fn default_servings() -> f64 {
    1.0
}

/// Log food request
///
/// Macro values are totals for the logged servings, not per serving.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogFoodRequest {
    /// Calendar date the food was eaten (YYYY-MM-DD)
    pub date: String,
    /// breakfast, lunch, dinner or snack
    pub meal_type: String,
    pub food_name: String,
    #[serde(default = "default_servings")]
    pub servings: f64,
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
}

/// Food log response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogResponse {
    pub id: String,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub food_name: String,
    pub servings: f64,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl From<&FoodLogEntry> for FoodLogResponse {
    fn from(entry: &FoodLogEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            date: entry.date,
            meal_type: entry.meal_type,
            food_name: entry.food_name.clone(),
            servings: entry.servings.as_f64(),
            calories: entry.calories.as_f64(),
            protein_g: entry.protein_g.as_f64(),
            carbs_g: entry.carbs_g.as_f64(),
            fat_g: entry.fat_g.as_f64(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTotalsResponse {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl From<MacroTotals> for MacroTotalsResponse {
    fn from(totals: MacroTotals) -> Self {
        Self {
            calories: totals.calories.as_f64(),
            protein_g: totals.protein_g.as_f64(),
            carbs_g: totals.carbs_g.as_f64(),
            fat_g: totals.fat_g.as_f64(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealBucketResponse {
    pub meal_type: MealType,
    pub entries: Vec<FoodLogResponse>,
    pub totals: MacroTotalsResponse,
}

impl From<&MealBucket> for MealBucketResponse {
    fn from(bucket: &MealBucket) -> Self {
        Self {
            meal_type: bucket.meal_type,
            entries: bucket.entries.iter().map(Into::into).collect(),
            totals: bucket.totals.into(),
        }
    }
}

/// One day's totals without the entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummaryResponse {
    pub date: NaiveDate,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub meal_count: usize,
}

impl From<&DailyNutritionSummary> for DailySummaryResponse {
    fn from(summary: &DailyNutritionSummary) -> Self {
        Self {
            date: summary.date,
            total_calories: summary.total_calories.as_f64(),
            total_protein: summary.total_protein.as_f64(),
            total_carbs: summary.total_carbs.as_f64(),
            total_fat: summary.total_fat.as_f64(),
            meal_count: summary.meal_count,
        }
    }
}

/// Daily nutrition: totals plus the four meal buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyNutritionResponse {
    pub date: NaiveDate,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub meal_count: usize,
    pub meals: Vec<MealBucketResponse>,
}

impl From<&DailyNutrition> for DailyNutritionResponse {
    fn from(day: &DailyNutrition) -> Self {
        let summary = DailySummaryResponse::from(&day.summary);
        Self {
            date: day.date,
            total_calories: summary.total_calories,
            total_protein: summary.total_protein,
            total_carbs: summary.total_carbs,
            total_fat: summary.total_fat,
            meal_count: summary.meal_count,
            meals: day.meals.iter().map(Into::into).collect(),
        }
    }
}

/// Multi-day nutrition summary, one entry per calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionRangeResponse {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DailySummaryResponse>,
}

/// Date query parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateQuery {
    /// YYYY-MM-DD, defaults to today
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NutritionRangeQuery {
    pub start: String,
    pub end: String,
}
