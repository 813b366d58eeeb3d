//! Database repositories
//!
//! Data access layer. Repositories return `anyhow::Result` and leave HTTP
//! mapping to the services.

pub mod nutrition;
pub mod user;
pub mod weight;

pub use nutrition::{CreateFoodLog, FoodLogRecord, FoodLogRepository};
pub use user::{UserRecord, UserRepository};
pub use weight::{UpsertWeightEntry, WeightEntryRecord, WeightRepository};
