//! Business logic services
//!
//! Services validate input, call the repositories and run the shared
//! computations. They return `ApiError` so handlers stay thin.

pub mod nutrition;
pub mod session;
pub mod weight;

pub use nutrition::NutritionService;
pub use session::SessionService;
pub use weight::WeightService;
