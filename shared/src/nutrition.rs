//! Daily nutrition aggregation
//!
//! Groups food entries into the four meal buckets and folds them into daily
//! totals. Sums are exact decimal arithmetic, so the result does not depend on
//! the order entries arrive in.

use crate::models::{
    DailyNutrition, DailyNutritionSummary, FoodLogEntry, MacroTotals, MealBucket, MealType,
};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, Default)]
pub struct NutritionAggregator;

impl NutritionAggregator {
    /// Build the meal buckets and summary for `date`
    ///
    /// Folds every entry it is given; callers pass the entries of one date.
    /// Every meal type gets a bucket, empty ones included. Within a bucket,
    /// entries keep their input order.
    pub fn aggregate(&self, date: NaiveDate, entries: &[FoodLogEntry]) -> DailyNutrition {
        let mut meals: Vec<MealBucket> = MealType::ALL.iter().copied().map(MealBucket::empty).collect();
        let mut day_totals = MacroTotals::default();
        let mut count = 0usize;

        for entry in entries {
            let bucket = &mut meals[entry.meal_type.index()];
            bucket.totals.add_entry(entry);
            bucket.entries.push(entry.clone());
            day_totals.add_entry(entry);
            count += 1;
        }

        DailyNutrition {
            date,
            meals,
            summary: DailyNutritionSummary::from_totals(date, day_totals, count),
        }
    }

    /// One summary per calendar day in `[start, end]`, ascending
    ///
    /// Days with no entries appear with zero totals.
    pub fn summarize_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        entries: &[FoodLogEntry],
    ) -> Vec<DailyNutritionSummary> {
        let mut sorted: Vec<&FoodLogEntry> = entries
            .iter()
            .filter(|e| e.date >= start && e.date <= end)
            .collect();
        sorted.sort_by_key(|e| e.date);

        let mut summaries = Vec::new();
        let mut remaining = sorted.as_slice();
        for day in start.iter_days().take_while(|d| *d <= end) {
            let split = remaining.iter().take_while(|e| e.date == day).count();
            let (today, rest) = remaining.split_at(split);
            let totals = today.iter().fold(MacroTotals::default(), |mut acc, e| {
                acc.add_entry(e);
                acc
            });
            summaries.push(DailyNutritionSummary::from_totals(day, totals, today.len()));
            remaining = rest;
        }
        summaries
    }
}
