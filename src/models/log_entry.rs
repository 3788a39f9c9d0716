//! Log Entry model
//!
//! One day of the log: morning weight, step count and meals.

use serde::{Deserialize, Serialize};

use super::Meal;

/// A single day's record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub date: String, // ISO date: "2016-01-04"
    pub weight: f64,
    #[serde(default)]
    pub steps: Option<u64>,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl LogEntry {
    pub fn new(date: &str, weight: f64) -> Self {
        Self {
            date: date.to_string(),
            weight,
            steps: None,
            meals: Vec::new(),
        }
    }

    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn with_meal(mut self, meal: Meal) -> Self {
        self.meals.push(meal);
        self
    }

    /// Step count for the table; a missing or zero count shows as "na"
    pub fn steps_display(&self) -> String {
        match self.steps {
            Some(steps) if steps > 0 => steps.to_string(),
            _ => "na".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_entry() {
        let entry: LogEntry = serde_json::from_str(
            r#"{
                "date": "2016-01-04",
                "weight": 81.3,
                "steps": null,
                "meals": [{"time": "8:00", "location": "home", "mood": "ok", "items": []}]
            }"#,
        )
        .unwrap();
        assert_eq!(entry.date, "2016-01-04");
        assert_eq!(entry.steps, None);
        assert_eq!(entry.meals.len(), 1);
    }

    #[test]
    fn test_steps_display() {
        assert_eq!(LogEntry::new("2016-01-04", 80.0).steps_display(), "na");
        assert_eq!(LogEntry::new("2016-01-04", 80.0).with_steps(0).steps_display(), "na");
        assert_eq!(
            LogEntry::new("2016-01-04", 80.0).with_steps(9120).steps_display(),
            "9120"
        );
    }
}
