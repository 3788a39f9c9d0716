//! Calorie resolution
//!
//! Resolves each food item's calories and totals them per meal.
//! An unknown item (`None`) makes every total that includes it unknown.

use crate::models::{FoodItem, LogEntry, Meal};

/// Resolve an item's calories, caching a computed value onto the item.
///
/// Explicit calories win and are returned unchanged. Otherwise
/// `quantity * unit_calories` is stored in `calories` so later calls return
/// the same value without recomputing. Neither field set means unknown.
pub fn resolve_calories(item: &mut FoodItem) -> Option<f64> {
    if let Some(calories) = item.calories {
        return Some(calories);
    }

    let unit_calories = item.unit_calories?;
    let calories = item.quantity * unit_calories;
    item.calories = Some(calories);
    Some(calories)
}

/// Sum of a meal's item calories. Every item is resolved, even after an
/// unknown one.
pub fn meal_calories(meal: &mut Meal) -> Option<f64> {
    let resolved: Vec<Option<f64>> = meal.items.iter_mut().map(resolve_calories).collect();
    resolved.into_iter().sum()
}

/// Items in an entry whose calories cannot be resolved
pub fn unknown_items(entry: &LogEntry) -> impl Iterator<Item = &FoodItem> {
    entry
        .meals
        .iter()
        .flat_map(|meal| meal.items.iter())
        .filter(|item| item.calories.is_none() && item.unit_calories.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown(food: &str) -> FoodItem {
        FoodItem {
            food: food.to_string(),
            quantity: 1.0,
            units: String::new(),
            calories: None,
            unit_calories: None,
        }
    }

    fn meal(items: Vec<FoodItem>) -> Meal {
        Meal {
            time: "12:30".to_string(),
            location: "office".to_string(),
            mood: "hungry".to_string(),
            items,
        }
    }

    #[test]
    fn test_resolve_by_unit() {
        let mut item = FoodItem::with_unit_calories("yogurt", 2.0, " cups", 150.0);
        assert_eq!(resolve_calories(&mut item), Some(300.0));
        assert_eq!(item.calories, Some(300.0));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut item = FoodItem::with_unit_calories("rice", 0.75, " cup", 206.0);
        let first = resolve_calories(&mut item);
        let second = resolve_calories(&mut item);
        assert_eq!(first, second);

        let mut explicit = FoodItem::with_calories("apple", 1.0, "", 95.0);
        let before = explicit.clone();
        assert_eq!(resolve_calories(&mut explicit), Some(95.0));
        assert_eq!(resolve_calories(&mut explicit), Some(95.0));
        assert_eq!(explicit, before);
    }

    #[test]
    fn test_explicit_calories_win() {
        let mut item = FoodItem::with_calories("pizza", 2.0, " slices", 570.0);
        item.unit_calories = Some(1000.0);
        assert_eq!(resolve_calories(&mut item), Some(570.0));
    }

    #[test]
    fn test_unknown_item() {
        let mut item = unknown("mystery stew");
        assert_eq!(resolve_calories(&mut item), None);
        assert_eq!(item.calories, None);
    }

    #[test]
    fn test_meal_total() {
        let mut m = meal(vec![
            FoodItem::with_calories("sandwich", 1.0, "", 420.0),
            FoodItem::with_unit_calories("chips", 28.0, "g", 5.0),
        ]);
        assert_eq!(meal_calories(&mut m), Some(560.0));
    }

    #[test]
    fn test_unknown_poisons_totals() {
        let mut entry = LogEntry::new("2016-01-04", 80.0)
            .with_meal(meal(vec![FoodItem::with_calories("eggs", 2.0, "", 156.0)]))
            .with_meal(meal(vec![
                FoodItem::with_calories("salad", 1.0, "", 220.0),
                unknown("dressing"),
            ]));
        assert_eq!(meal_calories(&mut entry.meals[0]), Some(156.0));
        assert_eq!(meal_calories(&mut entry.meals[1]), None);
        assert_eq!(unknown_items(&entry).count(), 1);
    }

    #[test]
    fn test_items_after_unknown_still_resolved() {
        let mut m = meal(vec![
            unknown("sauce"),
            FoodItem::with_unit_calories("pasta", 2.0, " cups", 220.0),
        ]);
        assert_eq!(meal_calories(&mut m), None);
        assert_eq!(m.items[1].calories, Some(440.0));
    }

    #[test]
    fn test_empty_meal_is_zero() {
        assert_eq!(meal_calories(&mut meal(Vec::new())), Some(0.0));
    }
}
