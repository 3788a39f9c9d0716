//! Nutrition calculation module
//!
//! Resolves food item calories and aggregates them per meal.

pub mod calories;

pub use calories::{meal_calories, resolve_calories, unknown_items};
