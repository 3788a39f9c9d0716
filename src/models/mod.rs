//! Data models
//!
//! Rust structs representing the food log as it is loaded.

mod food_item;
mod log_entry;
mod meal;

pub use food_item::FoodItem;
pub use log_entry::LogEntry;
pub use meal::Meal;
