//! Chart series
//!
//! Projects processed entries into named (date, value) series and groups
//! them into the four charts of the report.

use serde::Serialize;

use crate::dates::Instant;

use super::ProcessedEntry;

/// One chart point; `y` is `None` when the value is absent or unknown,
/// `x` when the entry's date did not parse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: Option<Instant>,
    pub y: Option<f64>,
}

/// A named series
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub key: String,
    pub values: Vec<Point>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Present values only
    pub fn known_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(|p| p.y).filter(|y| y.is_finite())
    }
}

/// One point per entry, in entry order
pub fn project<F>(entries: &[ProcessedEntry], key: &str, select: F) -> Series
where
    F: Fn(&ProcessedEntry) -> Option<f64>,
{
    Series {
        key: key.to_string(),
        values: entries
            .iter()
            .map(|e| Point {
                x: e.instant,
                y: select(e),
            })
            .collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// A chart and the series drawn on it
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    /// File stem for the rendered image
    pub id: &'static str,
    pub title: &'static str,
    pub y_label: &'static str,
    pub kind: ChartKind,
    pub series: Vec<Series>,
}

impl Chart {
    /// Number of x positions (entries)
    pub fn points(&self) -> usize {
        self.series.first().map(Series::len).unwrap_or(0)
    }
}

/// The four charts of the report
#[derive(Debug, Clone, Serialize)]
pub struct ChartSet {
    pub calories: Chart,
    pub steps: Chart,
    pub weight: Chart,
    pub variation: Chart,
}

impl ChartSet {
    pub fn build(entries: &[ProcessedEntry]) -> Self {
        let weights = project(entries, "Weight", |e| Some(e.entry.weight));
        let averages = project(entries, "Average", |e| Some(e.moving_average));
        let errors = project(entries, "Weight Variation", |e| Some(e.error));
        let steps = project(entries, "Steps", |e| e.entry.steps.map(|s| s as f64));
        let calories = project(entries, "Calories", |e| e.calories);

        Self {
            calories: Chart {
                id: "calories",
                title: "Calories",
                y_label: "Calories",
                kind: ChartKind::Bar,
                series: vec![calories],
            },
            steps: Chart {
                id: "steps",
                title: "Steps",
                y_label: "Steps",
                kind: ChartKind::Bar,
                series: vec![steps],
            },
            weight: Chart {
                id: "weight",
                title: "Weight",
                y_label: "Weight (kg)",
                kind: ChartKind::Line,
                series: vec![weights, averages],
            },
            variation: Chart {
                id: "weight-noise",
                title: "Weight Variation",
                y_label: "Variation (kg)",
                kind: ChartKind::Line,
                series: vec![errors],
            },
        }
    }

    /// Charts in page order
    pub fn iter(&self) -> impl Iterator<Item = &Chart> {
        [&self.calories, &self.steps, &self.weight, &self.variation].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::models::LogEntry;
    use crate::report::pipeline::process;

    fn processed() -> Vec<ProcessedEntry> {
        let entries = vec![
            LogEntry::new("2016-01-04", 80.0).with_steps(8000),
            LogEntry::new("2016-01-05", 79.6),
            LogEntry::new("2016-01-06", 79.9).with_steps(11000),
        ];
        process(entries, &ReportConfig::default()).unwrap().entries
    }

    #[test]
    fn test_project_preserves_order_and_count() {
        let entries = processed();
        let series = project(&entries, "Weight", |e| Some(e.entry.weight));
        assert_eq!(series.len(), entries.len());
        for (point, entry) in series.values.iter().zip(&entries) {
            assert_eq!(point.x, entry.instant);
            assert_eq!(point.y, Some(entry.entry.weight));
        }
    }

    #[test]
    fn test_missing_steps_stay_absent() {
        let charts = ChartSet::build(&processed());
        let ys: Vec<Option<f64>> = charts.steps.series[0].values.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![Some(8000.0), None, Some(11000.0)]);
        assert_eq!(charts.steps.series[0].known_values().count(), 2);
    }

    #[test]
    fn test_chart_layout() {
        let charts = ChartSet::build(&processed());
        let ids: Vec<&str> = charts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["calories", "steps", "weight", "weight-noise"]);
        assert_eq!(charts.weight.series.len(), 2);
        assert_eq!(charts.weight.series[1].key, "Average");
        assert_eq!(charts.variation.kind, ChartKind::Line);
        assert_eq!(charts.calories.points(), 3);
    }
}
