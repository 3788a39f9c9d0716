//! Food Item model
//!
//! One line of a meal: what was eaten, how much, and how its calories are
//! known.

use serde::{Deserialize, Serialize};

fn default_quantity() -> f64 {
    1.0
}

/// A food item within a meal.
///
/// Calories come either from `calories` directly or from
/// `quantity * unit_calories`. An item with neither has unknown calories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub food: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub units: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_calories: Option<f64>,
}

impl FoodItem {
    /// Item with explicit calories
    pub fn with_calories(food: &str, quantity: f64, units: &str, calories: f64) -> Self {
        Self {
            food: food.to_string(),
            quantity,
            units: units.to_string(),
            calories: Some(calories),
            unit_calories: None,
        }
    }

    /// Item priced per unit
    pub fn with_unit_calories(food: &str, quantity: f64, units: &str, unit_calories: f64) -> Self {
        Self {
            food: food.to_string(),
            quantity,
            units: units.to_string(),
            calories: None,
            unit_calories: Some(unit_calories),
        }
    }

    /// Table label, e.g. "oatmeal, 40g"
    pub fn label(&self) -> String {
        format!("{}, {}{}", self.food, self.quantity, self.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let item = FoodItem::with_unit_calories("oatmeal", 40.0, "g", 3.8);
        assert_eq!(item.label(), "oatmeal, 40g");

        let item = FoodItem::with_calories("banana", 1.5, "", 135.0);
        assert_eq!(item.label(), "banana, 1.5");
    }

    #[test]
    fn test_deserialize_unit_calories() {
        let item: FoodItem = serde_json::from_str(
            r#"{"food": "egg", "quantity": 2, "units": "", "unit_calories": 78}"#,
        )
        .unwrap();
        assert_eq!(item.calories, None);
        assert_eq!(item.unit_calories, Some(78.0));
    }

    #[test]
    fn test_deserialize_defaults() {
        let item: FoodItem = serde_json::from_str(r#"{"food": "coffee"}"#).unwrap();
        assert_eq!(item.quantity, 1.0);
        assert_eq!(item.units, "");
        assert_eq!(item.calories, None);
        assert_eq!(item.unit_calories, None);
    }
}
