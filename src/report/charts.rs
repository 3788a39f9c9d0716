//! Chart generation (plotters)
//!
//! Draws each chart into an RGB buffer and encodes it as PNG. Bar charts
//! skip absent values; line charts break at them.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;
use thiserror::Error;

use crate::config::ChartSize;
use crate::dates::format_axis_date;

use super::series::{Chart, ChartKind, Series};

const SERIES_COLORS: [RGBColor; 3] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
];

/// Chart rendering errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("no data to chart for '{0}'")]
    NoData(&'static str),

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Y axis range covering every known value. Bars always start from zero;
/// lines get a little headroom.
pub fn value_range(chart: &Chart) -> Option<(f64, f64)> {
    let mut values = chart.series.iter().flat_map(Series::known_values).peekable();
    values.peek()?;

    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    match chart.kind {
        ChartKind::Bar => {
            let lo = min.min(0.0);
            let hi = max.max(0.0);
            let pad = ((hi - lo) * 0.05).max(1.0);
            Some((lo, hi + pad))
        }
        ChartKind::Line => {
            let pad = ((max - min) * 0.1).max(0.1);
            Some((min - pad, max + pad))
        }
    }
}

/// Axis label for an x position; only whole positions get a date
pub fn axis_label(dates: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    dates.get(index as usize).cloned().unwrap_or_default()
}

/// Runs of consecutive known points, for drawing broken lines
fn segments(series: &Series) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, point) in series.values.iter().enumerate() {
        match point.y.filter(|y| y.is_finite()) {
            Some(y) => current.push((i as f64, y)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Bytes of an RGB buffer for `size`, refusing sizes outside the configured
/// bounds
fn buffer_len(size: ChartSize) -> Result<usize, ChartError> {
    let too_large = || {
        ChartError::Draw(format!(
            "chart size {}x{} is out of range",
            size.width, size.height
        ))
    };
    if !size.is_valid() {
        return Err(too_large());
    }
    (size.width as usize)
        .checked_mul(size.height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or_else(too_large)
}

/// Render one chart as PNG bytes
pub fn render_chart(chart: &Chart, size: ChartSize) -> Result<Vec<u8>, ChartError> {
    let len = buffer_len(size)?;
    let (y_min, y_max) = value_range(chart).ok_or(ChartError::NoData(chart.id))?;
    let points = chart.points();
    let dates: Vec<String> = chart
        .series
        .first()
        .map(|s| {
            s.values
                .iter()
                .map(|p| p.x.as_ref().map(format_axis_date).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    tracing::debug!(
        "Drawing {} chart '{}' with {} points",
        if chart.kind == ChartKind::Bar { "bar" } else { "line" },
        chart.id,
        points
    );

    let mut buffer = vec![0u8; len];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (size.width, size.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut ctx = ChartBuilder::on(&root)
            .margin(20)
            .caption(chart.title, ("sans-serif", 20))
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(points as f64 - 0.5), y_min..y_max)
            .map_err(draw_err)?;

        ctx.configure_mesh()
            .x_labels(points.min(12))
            .x_label_formatter(&|x| axis_label(&dates, *x))
            .y_desc(chart.y_label)
            .draw()
            .map_err(draw_err)?;

        for (n, series) in chart.series.iter().enumerate() {
            let color = SERIES_COLORS[n % SERIES_COLORS.len()];
            match chart.kind {
                ChartKind::Bar => {
                    ctx.draw_series(series.values.iter().enumerate().filter_map(|(i, p)| {
                        p.y.filter(|y| y.is_finite()).map(|y| {
                            let x = i as f64;
                            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, y)], color.filled())
                        })
                    }))
                    .map_err(draw_err)?
                    .label(series.key.as_str())
                    .legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled())
                    });
                }
                ChartKind::Line => {
                    for (run, segment) in segments(series).into_iter().enumerate() {
                        let drawn = ctx
                            .draw_series(LineSeries::new(segment, color.stroke_width(2)))
                            .map_err(draw_err)?;
                        if run == 0 {
                            drawn.label(series.key.as_str()).legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                            });
                        }
                    }
                }
            }
        }

        if chart.series.len() > 1 {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
    }

    encode_png(buffer, size)
}

fn encode_png(buffer: Vec<u8>, size: ChartSize) -> Result<Vec<u8>, ChartError> {
    let img = RgbImage::from_raw(size.width, size.height, buffer)
        .ok_or_else(|| ChartError::Encode("buffer does not match image size".to_string()))?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| ChartError::Encode(e.to_string()))?;

    Ok(png_bytes)
}
