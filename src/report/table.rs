//! Log table
//!
//! Normalizes each processed entry into a display record and renders the
//! records through a [`TableRenderer`].

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;

use crate::dates::{format_display_date, format_iso_date};

use super::summary::UNKNOWN;
use super::{ProcessedEntry, Trend};

/// One food line under a meal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRow {
    pub label: String,
    pub calories: Option<f64>,
}

/// One meal of a day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealRow {
    pub time: String,
    pub summary_line: String,
    pub total_calories: Option<f64>,
    pub location: String,
    pub mood: String,
    pub items: Vec<ItemRow>,
}

/// One day of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Locale date, or "unknown" when the entry's date did not parse
    pub display_date: String,
    pub iso_date: Option<String>,
    pub weight: f64,
    pub steps: String,
    pub trend: Trend,
    pub meals: Vec<MealRow>,
}

impl TableRow {
    /// Build the display record; item calories were resolved by the pass
    pub fn from_entry(processed: &ProcessedEntry) -> Self {
        let entry = &processed.entry;
        let meals = entry
            .meals
            .iter()
            .zip(&processed.meal_calories)
            .map(|(meal, total)| MealRow {
                time: meal.time.clone(),
                summary_line: meal.summary_line(),
                total_calories: *total,
                location: meal.location.clone(),
                mood: meal.mood.clone(),
                items: meal
                    .items
                    .iter()
                    .map(|item| ItemRow {
                        label: item.label(),
                        calories: item.calories,
                    })
                    .collect(),
            })
            .collect();

        Self {
            display_date: processed
                .instant
                .as_ref()
                .map(format_display_date)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            iso_date: processed.instant.as_ref().map(format_iso_date),
            weight: entry.weight,
            steps: entry.steps_display(),
            trend: processed.trend,
            meals,
        }
    }
}

/// Calories as shown in a cell
pub fn format_calories(calories: Option<f64>) -> String {
    match calories {
        Some(c) if c.is_finite() => format!("{:.0}", c),
        _ => UNKNOWN.to_string(),
    }
}

/// Turns table records into a document fragment
pub trait TableRenderer {
    fn render(&self, rows: &[TableRow]) -> String;
}

/// Bootstrap-styled HTML table: one `<tbody>` per day, a summary row per
/// meal and hidden detail rows per item
#[derive(Debug, Clone, Default)]
pub struct HtmlTableRenderer;

impl HtmlTableRenderer {
    fn date_cell(row: &TableRow) -> String {
        match &row.iso_date {
            Some(iso) => format!(
                "<time datetime=\"{}\">{}</time>",
                encode_double_quoted_attribute(iso),
                encode_text(&row.display_date)
            ),
            None => encode_text(&row.display_date).into_owned(),
        }
    }

    fn render_day(out: &mut String, row: &TableRow) {
        let glyph = row
            .trend
            .glyph()
            .map(|(name, class)| {
                format!(
                    " <span class=\"glyphicon glyphicon-{} {}\"></span>",
                    name, class
                )
            })
            .unwrap_or_default();

        out.push_str("<tbody>\n");
        out.push_str(&format!(
            "<tr class=\"day {}\"><td></td><td>{}</td><td></td><td><data value=\"{}\">{}</data>{}</td><td></td><td>{}</td></tr>\n",
            row.trend.row_class(),
            Self::date_cell(row),
            row.weight,
            row.weight,
            glyph,
            encode_text(&row.steps),
        ));

        for meal in &row.meals {
            out.push_str(&format!(
                "<tr class=\"summary\"><td>{}</td><td><a href=\"#\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                encode_text(&meal.time),
                encode_text(&meal.summary_line),
                format_calories(meal.total_calories),
                encode_text(&meal.location),
                encode_text(&meal.mood),
            ));
            for (i, item) in meal.items.iter().enumerate() {
                let lead = if i == 0 {
                    format!("<td rowspan=\"{}\"></td>", meal.items.len())
                } else {
                    String::new()
                };
                out.push_str(&format!(
                    "<tr class=\"detail\">{}<td>{}</td><td>{}</td></tr>\n",
                    lead,
                    encode_text(&item.label),
                    format_calories(item.calories),
                ));
            }
        }
        out.push_str("</tbody>\n");
    }
}

impl TableRenderer for HtmlTableRenderer {
    fn render(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        out.push_str("<table id=\"foodlog\" class=\"table table-condensed\">\n");
        out.push_str(
            "<thead><tr><th></th><th>Date</th><th></th><th>Weight</th><th></th><th>Steps</th></tr></thead>\n",
        );
        for row in rows {
            Self::render_day(&mut out, row);
        }
        out.push_str("</table>\n");
        out
    }
}

/// Plain-text table for terminals
#[derive(Debug, Clone, Default)]
pub struct TextTableRenderer {
    pub show_items: bool,
}

impl TableRenderer for TextTableRenderer {
    fn render(&self, rows: &[TableRow]) -> String {
        let mut lines = Vec::new();
        for row in rows {
            lines.push(format!(
                "{:<28} {:>7.1} {} steps: {}",
                row.display_date,
                row.weight,
                row.trend.marker(),
                row.steps
            ));
            for meal in &row.meals {
                lines.push(format!(
                    "    {:<8} {:>7} kcal  {} @ {} ({})",
                    meal.time,
                    format_calories(meal.total_calories),
                    meal.summary_line,
                    meal.location,
                    meal.mood
                ));
                if self.show_items {
                    lines.extend(meal.items.iter().map(|item| {
                        format!("        {:<32} {:>7}", item.label, format_calories(item.calories))
                    }));
                }
            }
        }
        lines.iter().map(|line| format!("{}\n", line)).collect()
    }
}
