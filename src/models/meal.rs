//! Meal model

use serde::{Deserialize, Serialize};

use super::FoodItem;

/// A meal: when, where, how it felt, and what was eaten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub items: Vec<FoodItem>,
}

impl Meal {
    /// Comma-joined food names
    pub fn summary_line(&self) -> String {
        self.items
            .iter()
            .map(|item| item.food.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let meal = Meal {
            time: "8:00".to_string(),
            location: "home".to_string(),
            mood: "rushed".to_string(),
            items: vec![
                FoodItem::with_calories("toast", 2.0, " slices", 160.0),
                FoodItem::with_calories("coffee", 1.0, " cup", 5.0),
            ],
        };
        assert_eq!(meal.summary_line(), "toast, coffee");
    }

    #[test]
    fn test_empty_meal_summary() {
        let meal: Meal = serde_json::from_str(r#"{"time": "noon"}"#).unwrap();
        assert_eq!(meal.summary_line(), "");
        assert!(meal.items.is_empty());
    }
}
