//! Input validation functions
//!
//! Every value that reaches the trend processor or the nutrition aggregator
//! passes through here first. Each check reports the offending field.

use crate::errors::ValidationError;
use crate::models::{FoodLogEntry, MealType};
use crate::units::WeightUnit;
use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Upper bound for a single weigh-in, in pounds
pub const MAX_WEIGHT_LBS: f64 = 1500.0;
/// Upper bound for calories of a single food entry
pub const MAX_CALORIES: f64 = 50_000.0;
/// Upper bound for any macro of a single food entry, in grams
pub const MAX_MACRO_GRAMS: f64 = 10_000.0;
/// Upper bound for servings of a single food entry
pub const MAX_SERVINGS: f64 = 1_000.0;
pub const MAX_FOOD_NAME_LEN: usize = 200;
pub const MAX_NOTE_LEN: usize = 500;
/// Longest lookback accepted for weight queries (ten years)
pub const MAX_LOOKBACK_DAYS: u32 = 3650;
/// Longest span accepted for multi-day nutrition summaries
pub const MAX_SUMMARY_SPAN_DAYS: i64 = 366;

/// Decimal places kept for stored nutrition values
const NUTRITION_SCALE: u32 = 4;

fn ensure_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "must be a valid number"));
    }
    Ok(())
}

fn to_decimal(field: &str, value: f64) -> Result<Decimal, ValidationError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(NUTRITION_SCALE).normalize())
        .ok_or_else(|| ValidationError::new(field, "cannot be represented as a decimal"))
}

/// Validate a weigh-in already converted to pounds
pub fn validate_weight_lbs(weight_lbs: f64) -> Result<f64, ValidationError> {
    ensure_finite("weight", weight_lbs)?;
    if weight_lbs <= 0.0 {
        return Err(ValidationError::new("weight", "must be positive"));
    }
    if weight_lbs > MAX_WEIGHT_LBS {
        return Err(ValidationError::new(
            "weight",
            format!("must be at most {} lbs", MAX_WEIGHT_LBS),
        ));
    }
    Ok(weight_lbs)
}

/// Parse an optional unit string, defaulting to pounds
pub fn parse_weight_unit(unit: Option<&str>) -> Result<WeightUnit, ValidationError> {
    match unit {
        None => Ok(WeightUnit::default()),
        Some(s) => s.parse().map_err(|e: String| ValidationError::new("unit", e)),
    }
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`)
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::new(field, format!("'{}' is not a YYYY-MM-DD date", value)))
}

pub fn parse_meal_type(value: &str) -> Result<MealType, ValidationError> {
    value
        .parse()
        .map_err(|e: String| ValidationError::new("meal_type", e))
}

pub fn validate_servings(servings: f64) -> Result<Decimal, ValidationError> {
    ensure_finite("servings", servings)?;
    if servings <= 0.0 {
        return Err(ValidationError::new("servings", "must be positive"));
    }
    if servings > MAX_SERVINGS {
        return Err(ValidationError::new(
            "servings",
            format!("must be at most {}", MAX_SERVINGS),
        ));
    }
    to_decimal("servings", servings)
}

/// Validate a calorie or gram amount: finite, non-negative and bounded
pub fn validate_macro(field: &str, value: f64) -> Result<Decimal, ValidationError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::new(field, "cannot be negative"));
    }
    let max = if field == "calories" {
        MAX_CALORIES
    } else {
        MAX_MACRO_GRAMS
    };
    if value > max {
        return Err(ValidationError::new(
            field,
            format!("value unreasonably high (max {})", max),
        ));
    }
    to_decimal(field, value)
}

pub fn validate_food_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("food_name", "cannot be empty"));
    }
    if trimmed.chars().count() > MAX_FOOD_NAME_LEN {
        return Err(ValidationError::new(
            "food_name",
            format!("must be at most {} characters", MAX_FOOD_NAME_LEN),
        ));
    }
    Ok(trimmed.to_string())
}

/// Normalize an optional note: blank notes become `None`
pub fn validate_note(note: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(note) = note else {
        return Ok(None);
    };
    let trimmed = note.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_NOTE_LEN {
        return Err(ValidationError::new(
            "notes",
            format!("must be at most {} characters", MAX_NOTE_LEN),
        ));
    }
    Ok(Some(trimmed.to_string()))
}

fn check_entry_amount(field: &str, value: Decimal, max: f64) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new(field, "cannot be negative"));
    }
    if value.as_f64() > max {
        return Err(ValidationError::new(
            field,
            format!("value unreasonably high (max {})", max),
        ));
    }
    Ok(())
}

/// Validate a food entry that arrived already deserialized
///
/// Applies the same bounds as the request validators above, so the
/// aggregator only ever sees entries a logging request could have produced.
pub fn validate_food_entry(entry: &FoodLogEntry) -> Result<(), ValidationError> {
    if entry.servings <= Decimal::ZERO {
        return Err(ValidationError::new("servings", "must be positive"));
    }
    check_entry_amount("servings", entry.servings, MAX_SERVINGS)?;
    check_entry_amount("calories", entry.calories, MAX_CALORIES)?;
    check_entry_amount("protein_g", entry.protein_g, MAX_MACRO_GRAMS)?;
    check_entry_amount("carbs_g", entry.carbs_g, MAX_MACRO_GRAMS)?;
    check_entry_amount("fat_g", entry.fat_g, MAX_MACRO_GRAMS)?;
    validate_food_name(&entry.food_name)?;
    Ok(())
}

pub fn validate_lookback_days(days: u32) -> Result<u32, ValidationError> {
    if days == 0 || days > MAX_LOOKBACK_DAYS {
        return Err(ValidationError::new(
            "days",
            format!("must be between 1 and {}", MAX_LOOKBACK_DAYS),
        ));
    }
    Ok(days)
}

/// Validate an inclusive date range for multi-day summaries
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end < start {
        return Err(ValidationError::new("end", "must not be before start"));
    }
    if (end - start).num_days() >= MAX_SUMMARY_SPAN_DAYS {
        return Err(ValidationError::new(
            "end",
            format!("range cannot exceed {} days", MAX_SUMMARY_SPAN_DAYS),
        ));
    }
    Ok(())
}

/// EWMA coefficient must lie in (0, 1]
pub fn validate_smoothing_alpha(alpha: f64) -> Result<f64, ValidationError> {
    ensure_finite("smoothing_alpha", alpha)?;
    if alpha <= 0.0 || alpha > 1.0 {
        return Err(ValidationError::new(
            "smoothing_alpha",
            "must be greater than 0 and at most 1",
        ));
    }
    Ok(alpha)
}

pub fn validate_window_days(days: u32) -> Result<u32, ValidationError> {
    if days == 0 || days > 365 {
        return Err(ValidationError::new(
            "moving_average_days",
            "must be between 1 and 365",
        ));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(-150.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(1500.5)]
    fn test_invalid_weight_rejected(#[case] weight: f64) {
        let err = validate_weight_lbs(weight).unwrap_err();
        assert_eq!(err.field, "weight");
    }

    #[rstest]
    #[case(0.1)]
    #[case(180.4)]
    #[case(1500.0)]
    fn test_valid_weight_accepted(#[case] weight: f64) {
        assert_eq!(validate_weight_lbs(weight).unwrap(), weight);
    }

    #[rstest]
    #[case("protein_g", -1.0)]
    #[case("calories", 50_001.0)]
    #[case("fat_g", 10_000.5)]
    #[case("carbs_g", f64::NAN)]
    fn test_invalid_macro_rejected(#[case] field: &str, #[case] value: f64) {
        let err = validate_macro(field, value).unwrap_err();
        assert_eq!(err.field, field);
    }

    #[test]
    fn test_macro_converts_to_exact_decimal() {
        assert_eq!(validate_macro("protein_g", 0.1).unwrap(), Decimal::new(1, 1));
        assert_eq!(validate_macro("calories", 0.0).unwrap(), Decimal::ZERO);
        assert_eq!(validate_macro("calories", 250.5).unwrap(), Decimal::new(2505, 1));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-2.0)]
    #[case(f64::NEG_INFINITY)]
    fn test_invalid_servings_rejected(#[case] servings: f64) {
        assert_eq!(validate_servings(servings).unwrap_err().field, "servings");
    }

    fn stored_entry() -> FoodLogEntry {
        FoodLogEntry {
            id: uuid::Uuid::nil(),
            date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            meal_type: MealType::Lunch,
            food_name: "Soup".to_string(),
            servings: Decimal::ONE,
            calories: Decimal::from(450),
            protein_g: Decimal::from(30),
            carbs_g: Decimal::from(40),
            fat_g: Decimal::new(125, 1),
        }
    }

    #[test]
    fn test_stored_entry_accepted() {
        assert!(validate_food_entry(&stored_entry()).is_ok());
    }

    #[rstest]
    #[case::negative_servings(|e: &mut FoodLogEntry| e.servings = Decimal::from(-3), "servings")]
    #[case::zero_servings(|e: &mut FoodLogEntry| e.servings = Decimal::ZERO, "servings")]
    #[case::negative_calories(|e: &mut FoodLogEntry| e.calories = Decimal::from(-500), "calories")]
    #[case::negative_protein(|e: &mut FoodLogEntry| e.protein_g = Decimal::new(-1, 1), "protein_g")]
    #[case::huge_calories(|e: &mut FoodLogEntry| e.calories = Decimal::MAX, "calories")]
    #[case::huge_fat(|e: &mut FoodLogEntry| e.fat_g = Decimal::from(10_001), "fat_g")]
    #[case::blank_name(|e: &mut FoodLogEntry| e.food_name = "  ".to_string(), "food_name")]
    fn test_invalid_stored_entry_rejected(#[case] corrupt: fn(&mut FoodLogEntry), #[case] field: &str) {
        let mut entry = stored_entry();
        corrupt(&mut entry);
        assert_eq!(validate_food_entry(&entry).unwrap_err().field, field);
    }

    #[rstest]
    #[case("2024-02-30")]
    #[case("01/02/2024")]
    #[case("")]
    fn test_malformed_date_rejected(#[case] value: &str) {
        assert_eq!(parse_date("date", value).unwrap_err().field, "date");
    }

    #[test]
    fn test_date_parses_iso() {
        let date = parse_date("date", "2024-01-08").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
    }

    #[test]
    fn test_unknown_meal_type_reports_field() {
        let err = parse_meal_type("brunch").unwrap_err();
        assert_eq!(err.field, "meal_type");
        assert!(err.reason.contains("breakfast"));
        assert_eq!(parse_meal_type("Lunch").unwrap(), MealType::Lunch);
    }

    #[test]
    fn test_weight_unit_defaults_to_lbs() {
        assert_eq!(parse_weight_unit(None).unwrap(), WeightUnit::Lbs);
        assert_eq!(parse_weight_unit(Some("kg")).unwrap(), WeightUnit::Kg);
        assert_eq!(parse_weight_unit(Some("furlong")).unwrap_err().field, "unit");
    }

    #[test]
    fn test_food_name_trimmed_and_required() {
        assert_eq!(validate_food_name("  Oatmeal ").unwrap(), "Oatmeal");
        assert!(validate_food_name("   ").is_err());
        assert!(validate_food_name(&"x".repeat(MAX_FOOD_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_blank_note_becomes_none() {
        assert_eq!(validate_note(Some("  ".to_string())).unwrap(), None);
        assert_eq!(validate_note(None).unwrap(), None);
        assert_eq!(
            validate_note(Some(" after run ".to_string())).unwrap(),
            Some("after run".to_string())
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(1.01)]
    #[case(-0.2)]
    #[case(f64::NAN)]
    fn test_invalid_alpha_rejected(#[case] alpha: f64) {
        assert!(validate_smoothing_alpha(alpha).is_err());
    }

    #[test]
    fn test_alpha_of_one_accepted() {
        assert_eq!(validate_smoothing_alpha(1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_date_range_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(validate_date_range(start, start).is_ok());
        assert!(validate_date_range(start, start.pred_opt().unwrap()).is_err());
        let too_far = start + chrono::Duration::days(MAX_SUMMARY_SPAN_DAYS);
        assert!(validate_date_range(start, too_far).is_err());
    }

    #[test]
    fn test_lookback_days_bounds() {
        assert!(validate_lookback_days(0).is_err());
        assert_eq!(validate_lookback_days(30).unwrap(), 30);
        assert!(validate_lookback_days(MAX_LOOKBACK_DAYS + 1).is_err());
    }
}
