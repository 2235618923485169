//! Plotters-backed chart rasterisation.
//!
//! Each call opens a bitmap backend scoped to the output path, draws the
//! prepared spec and presents the file before returning. No selection or
//! aggregation policy lives here.

use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

use super::spec::{BarPanel, ChartRenderer, ChartSpec, HistogramPanel, SeriesPanel};
use crate::config::AnalysisOptions;

pub struct BitmapRenderer {
    options: AnalysisOptions,
}

impl BitmapRenderer {
    pub fn new(options: AnalysisOptions) -> Self {
        Self { options }
    }
}

impl ChartRenderer for BitmapRenderer {
    fn render(&self, spec: &ChartSpec, path: &Path) -> Result<()> {
        match spec {
            ChartSpec::Heatmap { columns, values } => {
                draw_heatmap(path, self.options.heatmap_canvas, columns, values)
            }
            ChartSpec::TimeSeries { panels } => {
                let height = self.options.timeseries_panel_height * panels.len().max(1) as u32;
                draw_time_series(path, (self.options.timeseries_width, height), panels)
            }
            ChartSpec::Distributions { panels } => {
                draw_distributions(path, self.options.grid_canvas, panels)
            }
            ChartSpec::Categorical { panels } => {
                draw_categorical(path, self.options.grid_canvas, panels)
            }
        }
    }
}

/// Diverging color ramp for correlation values: blue for negative, white at
/// zero, red for positive.
fn correlation_color(value: f64) -> RGBColor {
    let value = value.clamp(-1.0, 1.0);
    let blend = |from: u8, to: u8, t: f64| (from as f64 + (to as f64 - from as f64) * t) as u8;
    if value >= 0.0 {
        RGBColor(255, blend(255, 40, value), blend(255, 40, value))
    } else {
        let t = -value;
        RGBColor(blend(255, 40, t), blend(255, 40, t), 255)
    }
}

fn draw_heatmap(
    path: &Path,
    canvas: (u32, u32),
    columns: &[String],
    values: &[Vec<f64>],
) -> Result<()> {
    let root = BitMapBackend::new(path, canvas).into_drawing_area();
    root.fill(&WHITE)?;

    let n = columns.len();
    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation Heatmap", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(60)
        .y_label_area_size(140)
        .build_cartesian_2d(0f64..n as f64, 0f64..n as f64)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|x| {
            columns
                .get(x.floor() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| {
            columns
                .get(y.floor() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()?;

    for (i, row) in values.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            let (x, y) = (j as f64, i as f64);
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x, y), (x + 1.0, y + 1.0)],
                correlation_color(*value).filled(),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                format!("{value:.2}"),
                (x + 0.35, y + 0.55),
                ("sans-serif", 16),
            )))?;
        }
    }

    root.present()?;
    Ok(())
}

fn draw_time_series(path: &Path, canvas: (u32, u32), panels: &[SeriesPanel]) -> Result<()> {
    let root = BitMapBackend::new(path, canvas).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((panels.len().max(1), 1));
    for (panel, area) in panels.iter().zip(areas.iter()) {
        if panel.points.is_empty() {
            continue;
        }

        let means: Vec<f64> = panel.points.iter().map(|p| p.mean).collect();
        let mut y_min = means.iter().copied().fold(f64::INFINITY, f64::min);
        let mut y_max = means.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !(y_max > y_min) {
            y_min -= 1.0;
            y_max += 1.0;
        }
        let pad = (y_max - y_min) * 0.05;
        let x_max = (panel.points.len() as i32 - 1).max(1);

        let points = &panel.points;
        let mut chart = ChartBuilder::on(area)
            .caption(format!("{} Over Time", panel.column), ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(0i32..x_max, (y_min - pad)..(y_max + pad))?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc(panel.column.clone())
            .x_label_formatter(&|x| {
                points
                    .get(*x as usize)
                    .map(|p| p.label.clone())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(LineSeries::new(
            points.iter().enumerate().map(|(i, p)| (i as i32, p.mean)),
            BLUE.stroke_width(2),
        ))?;
        chart.draw_series(
            points
                .iter()
                .enumerate()
                .map(|(i, p)| Circle::new((i as i32, p.mean), 3, BLUE.filled())),
        )?;
    }

    root.present()?;
    Ok(())
}

fn draw_distributions(path: &Path, canvas: (u32, u32), panels: &[HistogramPanel]) -> Result<()> {
    let root = BitMapBackend::new(path, canvas).into_drawing_area();
    root.fill(&WHITE)?;

    // Fixed 2x2 grid; cells without a panel stay blank
    let areas = root.split_evenly((2, 2));
    for (panel, area) in panels.iter().zip(areas.iter()) {
        if panel.bins.is_empty() {
            continue;
        }

        let x_min = panel.bins[0].0;
        let x_max = panel
            .bins
            .last()
            .map(|b| b.0 + panel.bin_width)
            .unwrap_or(x_min + 1.0);
        let y_max = panel.bins.iter().map(|b| b.1).max().unwrap_or(1).max(1) as f64 * 1.1;

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Distribution of {}", panel.column),
                ("sans-serif", 22),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc(panel.column.clone())
            .y_desc("Frequency")
            .draw()?;

        chart.draw_series(panel.bins.iter().map(|(start, count)| {
            Rectangle::new(
                [(*start, 0.0), (start + panel.bin_width, *count as f64)],
                BLUE.mix(0.6).filled(),
            )
        }))?;
    }

    root.present()?;
    Ok(())
}

fn draw_categorical(path: &Path, canvas: (u32, u32), panels: &[BarPanel]) -> Result<()> {
    let root = BitMapBackend::new(path, canvas).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((2, 2));
    for (panel, area) in panels.iter().zip(areas.iter()) {
        if panel.entries.is_empty() {
            continue;
        }

        let x_max = panel.entries.iter().map(|e| e.1).max().unwrap_or(1).max(1) as f64 * 1.1;
        let n = panel.entries.len() as i32;
        let entries = &panel.entries;

        let mut chart = ChartBuilder::on(area)
            .caption(format!("Top Values in {}", panel.column), ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(120)
            .build_cartesian_2d(0f64..x_max, 0i32..n)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc("Count")
            .y_labels(entries.len())
            .y_label_formatter(&|y| {
                entries
                    .get(*y as usize)
                    .map(|e| e.0.clone())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(entries.iter().enumerate().map(|(k, (_, count))| {
            Rectangle::new(
                [(0.0, k as i32), (*count as f64, k as i32 + 1)],
                GREEN.mix(0.6).filled(),
            )
        }))?;
    }

    root.present()?;
    Ok(())
}
