//! Data models for the Healthlog application

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A single weigh-in. The date is the natural key: one entry per user per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub date: NaiveDate,
    /// Body weight in pounds
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Derived trend value for one weigh-in date. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTrendPoint {
    pub date: NaiveDate,
    pub raw_weight: f64,
    pub trend_weight: f64,
    pub seven_day_avg: f64,
}

/// Meal slot a food entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// All meal types in display order
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Position in [`MealType::ALL`]
    pub fn index(&self) -> usize {
        match self {
            MealType::Breakfast => 0,
            MealType::Lunch => 1,
            MealType::Dinner => 2,
            MealType::Snack => 3,
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(format!(
                "Unknown meal type '{}'. Must be one of: breakfast, lunch, dinner, snack",
                s
            )),
        }
    }
}

/// One logged food item. Macro values are totals for the logged servings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub food_name: String,
    pub servings: Decimal,
    pub calories: Decimal,
    pub protein_g: Decimal,
    pub carbs_g: Decimal,
    pub fat_g: Decimal,
}

/// Calorie and macronutrient totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: Decimal,
    pub protein_g: Decimal,
    pub carbs_g: Decimal,
    pub fat_g: Decimal,
}

impl MacroTotals {
    /// Add one entry's macros to the running totals
    pub fn add_entry(&mut self, entry: &FoodLogEntry) {
        self.calories += entry.calories;
        self.protein_g += entry.protein_g;
        self.carbs_g += entry.carbs_g;
        self.fat_g += entry.fat_g;
    }
}

impl std::ops::Add for MacroTotals {
    type Output = MacroTotals;

    fn add(self, rhs: MacroTotals) -> MacroTotals {
        MacroTotals {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            carbs_g: self.carbs_g + rhs.carbs_g,
            fat_g: self.fat_g + rhs.fat_g,
        }
    }
}

/// Entries of one meal slot together with their subtotal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealBucket {
    pub meal_type: MealType,
    pub entries: Vec<FoodLogEntry>,
    pub totals: MacroTotals,
}

impl MealBucket {
    pub fn empty(meal_type: MealType) -> Self {
        Self {
            meal_type,
            entries: Vec::new(),
            totals: MacroTotals::default(),
        }
    }
}

/// Whole-day fold over every food entry of a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNutritionSummary {
    pub date: NaiveDate,
    pub total_calories: Decimal,
    pub total_protein: Decimal,
    pub total_carbs: Decimal,
    pub total_fat: Decimal,
    pub meal_count: usize,
}

impl DailyNutritionSummary {
    pub fn from_totals(date: NaiveDate, totals: MacroTotals, meal_count: usize) -> Self {
        Self {
            date,
            total_calories: totals.calories,
            total_protein: totals.protein_g,
            total_carbs: totals.carbs_g,
            total_fat: totals.fat_g,
            meal_count,
        }
    }
}

/// Meal buckets plus the daily summary for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutrition {
    pub date: NaiveDate,
    /// Always four buckets, in [`MealType::ALL`] order
    pub meals: Vec<MealBucket>,
    pub summary: DailyNutritionSummary,
}

impl DailyNutrition {
    pub fn bucket(&self, meal_type: MealType) -> Option<&MealBucket> {
        self.meals.iter().find(|b| b.meal_type == meal_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_parse_is_case_insensitive() {
        assert_eq!("Breakfast".parse::<MealType>().unwrap(), MealType::Breakfast);
        assert_eq!(" SNACK ".parse::<MealType>().unwrap(), MealType::Snack);
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn test_meal_type_all_matches_index_order() {
        for (i, meal) in MealType::ALL.iter().enumerate() {
            assert_eq!(meal.index(), i);
        }
    }

    #[test]
    fn test_meal_type_serializes_lowercase() {
        let json = serde_json::to_string(&MealType::Dinner).unwrap();
        assert_eq!(json, "\"dinner\"");
    }
}
