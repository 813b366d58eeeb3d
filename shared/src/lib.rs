//! Healthlog Shared Library
//!
//! Domain models, validation and the pure weight-trend and nutrition
//! computations, shared by the backend and the WASM bindings.

pub mod errors;
pub mod models;
pub mod nutrition;
pub mod trend;
pub mod types;
pub mod units;
pub mod validation;

pub use errors::*;
pub use models::*;
pub use nutrition::NutritionAggregator;
pub use trend::{GapPolicy, TrendConfig, TrendSeries, TrendSummary, WeightTrendProcessor};
pub use units::WeightUnit;
