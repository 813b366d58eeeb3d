//! Weight trend processing
//!
//! Turns an irregularly sampled weigh-in history into a smoothed series:
//!
//! - **Trend weight**: exponentially weighted moving average (EWMA) of the raw
//!   weigh-ins. `trend[0] = raw[0]`, then `trend[i] = α·raw[i] + (1−α)·trend[i−1]`.
//! - **Moving average**: mean of every weigh-in within the trailing calendar
//!   window `[d − (window_days − 1), d]`, however many entries that is.
//!
//! # Gaps between weigh-ins
//!
//! Under [`GapPolicy::Sequential`] (the default) the recurrence ignores elapsed
//! calendar time: a missed week neither resets the state nor interpolates the
//! skipped days. [`GapPolicy::TimeWeighted`] instead applies one decay step per
//! elapsed day, `α_eff = 1 − (1 − α)^days`.
//!
//! Results depend only on the input entries and the config.

use crate::errors::{ComputationError, ValidationError};
use crate::models::{WeightEntry, WeightTrendPoint};
use crate::validation::{validate_smoothing_alpha, validate_window_days};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.1;
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// How the EWMA treats calendar gaps between weigh-ins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// One smoothing step per observation, regardless of elapsed days
    #[default]
    Sequential,
    /// One smoothing step per elapsed calendar day
    TimeWeighted,
}

/// Tunable trend parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    pub alpha: f64,
    pub window_days: u32,
    #[serde(default)]
    pub gap_policy: GapPolicy,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_SMOOTHING_ALPHA,
            window_days: DEFAULT_WINDOW_DAYS,
            gap_policy: GapPolicy::Sequential,
        }
    }
}

impl TrendConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_smoothing_alpha(self.alpha)?;
        validate_window_days(self.window_days)?;
        Ok(())
    }
}

/// Start/end comparison over a window of trend points
///
/// Fields are `None` when the window is too small to define them: no points
/// at all, or (for the change fields) a single point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub start_weight: Option<f64>,
    pub current_weight: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
}

/// Trend points of a lookback window plus their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub points: Vec<WeightTrendPoint>,
    pub summary: TrendSummary,
}

impl TrendSeries {
    /// Check every derived value is finite
    pub fn ensure_finite(&self) -> Result<(), ComputationError> {
        for point in &self.points {
            if !point.trend_weight.is_finite() {
                return Err(ComputationError::NonFinite {
                    quantity: "trend_weight",
                    date: point.date,
                });
            }
            if !point.seven_day_avg.is_finite() {
                return Err(ComputationError::NonFinite {
                    quantity: "seven_day_avg",
                    date: point.date,
                });
            }
        }
        Ok(())
    }
}

/// Computes trend series from weigh-in history
#[derive(Debug, Clone)]
pub struct WeightTrendProcessor {
    config: TrendConfig,
}

impl Default for WeightTrendProcessor {
    fn default() -> Self {
        Self {
            config: TrendConfig::default(),
        }
    }
}

impl WeightTrendProcessor {
    pub fn new(config: TrendConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Compute one trend point per distinct date, ascending
    ///
    /// Input order does not matter. If a date appears more than once, the entry
    /// that comes last in the input wins.
    pub fn compute(&self, entries: &[WeightEntry]) -> Vec<WeightTrendPoint> {
        let series = ordered_unique(entries);
        let mut points = Vec::with_capacity(series.len());
        let mut previous: Option<(NaiveDate, f64)> = None;

        for (i, &(date, raw)) in series.iter().enumerate() {
            let trend = match previous {
                None => raw,
                Some((prev_date, prev_trend)) => {
                    let alpha = self.effective_alpha((date - prev_date).num_days());
                    alpha * raw + (1.0 - alpha) * prev_trend
                }
            };
            previous = Some((date, trend));

            let avg = self.window_average(&series[..=i], date);

            points.push(WeightTrendPoint {
                date,
                raw_weight: raw,
                trend_weight: trend,
                seven_day_avg: avg,
            });
        }

        points
    }

    /// Compute the series as of `as_of` and keep the trailing `lookback_days`
    ///
    /// Smoothing state is built from the full history up to `as_of`, so the
    /// first points of the window carry their real trend rather than restarting.
    /// Entries after `as_of` are ignored. `None` keeps the whole history.
    pub fn compute_window(
        &self,
        entries: &[WeightEntry],
        as_of: NaiveDate,
        lookback_days: Option<u32>,
    ) -> TrendSeries {
        let history: Vec<WeightEntry> = entries
            .iter()
            .filter(|e| e.date <= as_of)
            .cloned()
            .collect();
        let mut points = self.compute(&history);

        // A cutoff before the earliest representable date keeps everything
        if let Some(cutoff) = lookback_days.and_then(|days| days_before(as_of, i64::from(days))) {
            points.retain(|p| p.date > cutoff);
        }

        let summary = summarize(&points);
        TrendSeries { points, summary }
    }

    fn effective_alpha(&self, elapsed_days: i64) -> f64 {
        match self.config.gap_policy {
            GapPolicy::Sequential => self.config.alpha,
            GapPolicy::TimeWeighted => {
                let steps = elapsed_days.clamp(1, i64::from(i32::MAX)) as i32;
                1.0 - (1.0 - self.config.alpha).powi(steps)
            }
        }
    }

    /// Mean raw weight over the trailing calendar window ending at `date`
    ///
    /// `upto` is sorted ascending and ends with the entry for `date`.
    fn window_average(&self, upto: &[(NaiveDate, f64)], date: NaiveDate) -> f64 {
        let span = i64::from(self.config.window_days) - 1;
        let start = date.checked_sub_signed(Duration::days(span)).unwrap_or(NaiveDate::MIN);
        let in_window = upto.iter().rev().take_while(|(d, _)| *d >= start);

        let (sum, count) = in_window.fold((0.0, 0usize), |(sum, n), (_, w)| (sum + w, n + 1));
        sum / count as f64
    }
}

/// Summarize a window of trend points by comparing its first and last raw weights
pub fn summarize(points: &[WeightTrendPoint]) -> TrendSummary {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return TrendSummary::default(),
    };

    let mut summary = TrendSummary {
        start_weight: Some(first.raw_weight),
        current_weight: Some(last.raw_weight),
        change: None,
        change_percent: None,
    };

    if points.len() > 1 {
        let change = last.raw_weight - first.raw_weight;
        summary.change = Some(change);
        summary.change_percent = Some(change / first.raw_weight * 100.0);
    }

    summary
}

fn days_before(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_sub_signed(Duration::days(days))
}

/// Sort by date (stable) and collapse duplicate dates to their last occurrence
fn ordered_unique(entries: &[WeightEntry]) -> Vec<(NaiveDate, f64)> {
    let mut sorted: Vec<(NaiveDate, f64)> = entries.iter().map(|e| (e.date, e.weight)).collect();
    sorted.sort_by_key(|(date, _)| *date);

    let mut unique: Vec<(NaiveDate, f64)> = Vec::with_capacity(sorted.len());
    for (date, weight) in sorted {
        match unique.last_mut() {
            Some(last) if last.0 == date => last.1 = weight,
            _ => unique.push((date, weight)),
        }
    }
    unique
}
