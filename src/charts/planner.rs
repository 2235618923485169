//! Chart branch policy.
//!
//! Four independent, order-stable branches decide from dataset shape which
//! charts to produce: correlation heatmap, time-series panels, distribution
//! histograms, categorical bars. Selection limits (first 3 numeric columns
//! for time-series, first 4 for the grids), the identifier-name exclusion
//! and the output file names are externally observable contract. A branch
//! that fails, while preparing its data or while rendering, is logged and
//! skipped; the other branches still run.

use anyhow::Result;
use chrono::NaiveDateTime;
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::spec::{
    BarPanel, ChartArtifact, ChartCategory, ChartRenderer, ChartSpec, HistogramPanel, SeriesPanel,
    TimePoint,
};
use super::temporal::{format_key, parse_temporal};
use crate::analysis::types::{is_temporal_candidate, CorrelationMatrix, Dataset};
use crate::config::AnalysisOptions;

pub const HEATMAP_FILE: &str = "correlation_heatmap.png";
pub const TIME_SERIES_FILE: &str = "time_series_analysis.png";
pub const DISTRIBUTIONS_FILE: &str = "distributions.png";
pub const CATEGORICAL_FILE: &str = "categorical_distributions.png";

/// Decide which chart categories apply and render each of them.
///
/// Returns the artifacts that were actually produced; a shorter list than
/// four means some branches did not apply or failed locally. No error
/// crosses this boundary.
pub fn plan_and_render(
    dataset: &Dataset,
    correlations: Option<&CorrelationMatrix>,
    out_dir: &Path,
    renderer: &dyn ChartRenderer,
    options: &AnalysisOptions,
) -> Vec<ChartArtifact> {
    let mut artifacts = Vec::new();

    render_branch(
        ChartCategory::Heatmap,
        HEATMAP_FILE,
        Ok(heatmap_spec(correlations)),
        out_dir,
        renderer,
        &mut artifacts,
    );
    render_branch(
        ChartCategory::TimeSeries,
        TIME_SERIES_FILE,
        time_series_spec(dataset, options),
        out_dir,
        renderer,
        &mut artifacts,
    );
    render_branch(
        ChartCategory::Distribution,
        DISTRIBUTIONS_FILE,
        distributions_spec(dataset, options),
        out_dir,
        renderer,
        &mut artifacts,
    );
    render_branch(
        ChartCategory::Categorical,
        CATEGORICAL_FILE,
        categorical_spec(dataset, options),
        out_dir,
        renderer,
        &mut artifacts,
    );

    artifacts
}

fn render_branch(
    category: ChartCategory,
    file_name: &str,
    planned: Result<Option<ChartSpec>>,
    out_dir: &Path,
    renderer: &dyn ChartRenderer,
    artifacts: &mut Vec<ChartArtifact>,
) {
    let spec = match planned {
        Ok(Some(spec)) => spec,
        Ok(None) => return,
        Err(e) => {
            tracing::warn!("skipping {category} chart, preparation failed: {e:#}");
            return;
        }
    };

    let path = out_dir.join(file_name);
    match renderer.render(&spec, &path) {
        Ok(()) => artifacts.push(ChartArtifact { path, category }),
        Err(e) => tracing::warn!("skipping {category} chart, rendering failed: {e:#}"),
    }
}

/// Heatmap branch: applies iff a correlation matrix exists.
fn heatmap_spec(correlations: Option<&CorrelationMatrix>) -> Option<ChartSpec> {
    correlations.map(|matrix| ChartSpec::Heatmap {
        columns: matrix.columns.clone(),
        values: matrix.data.clone(),
    })
}

/// Time-series branch.
///
/// Takes the first column whose name marks it as a temporal candidate,
/// parses its cells (failures become null), and plots the per-date-group
/// mean of up to the first three remaining numeric columns. Emits nothing
/// when no candidate column exists, no numeric columns remain, or no cell
/// parses. The date derivation is private to this branch; the shared
/// dataset stays untouched.
fn time_series_spec(dataset: &Dataset, options: &AnalysisOptions) -> Result<Option<ChartSpec>> {
    let names = dataset.column_names();
    let Some(date_column) = names.iter().find(|n| is_temporal_candidate(n)) else {
        return Ok(None);
    };

    let numeric: Vec<String> = dataset
        .numeric_column_names()
        .into_iter()
        .filter(|n| n != date_column)
        .collect();
    if numeric.is_empty() {
        return Ok(None);
    }

    let cells = string_cells(dataset.frame(), date_column)?;
    let keys: Vec<Option<NaiveDateTime>> = cells
        .iter()
        .map(|cell| cell.as_deref().and_then(parse_temporal))
        .collect();
    if keys.iter().all(Option::is_none) {
        return Ok(None);
    }

    let mut panels = Vec::new();
    for name in numeric.iter().take(options.max_timeseries_panels) {
        let values = f64_cells(dataset.frame(), name)?;

        let mut groups: BTreeMap<NaiveDateTime, (f64, usize)> = BTreeMap::new();
        for (key, value) in keys.iter().zip(values) {
            if let (Some(key), Some(value)) = (key, value) {
                let entry = groups.entry(*key).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }

        let points: Vec<TimePoint> = groups
            .iter()
            .map(|(key, (sum, count))| TimePoint {
                label: format_key(key),
                mean: sum / *count as f64,
            })
            .collect();

        if !points.is_empty() {
            panels.push(SeriesPanel {
                column: name.clone(),
                points,
            });
        }
    }

    if panels.is_empty() {
        return Ok(None);
    }
    Ok(Some(ChartSpec::TimeSeries { panels }))
}

/// Distributions branch: applies iff at least one numeric column exists.
/// Fixed 2x2 grid populated with up to the first four numeric columns;
/// unused cells stay blank.
fn distributions_spec(dataset: &Dataset, options: &AnalysisOptions) -> Result<Option<ChartSpec>> {
    let numeric = dataset.numeric_column_names();
    if numeric.is_empty() {
        return Ok(None);
    }

    let mut panels = Vec::new();
    for name in numeric.iter().take(options.max_distribution_panels) {
        let values: Vec<f64> = f64_cells(dataset.frame(), name)?
            .into_iter()
            .flatten()
            .collect();
        let (bin_width, bins) = bin_values(&values, options.histogram_bins);
        panels.push(HistogramPanel {
            column: name.clone(),
            bin_width,
            bins,
        });
    }

    Ok(Some(ChartSpec::Distributions { panels }))
}

/// Categorical branch.
///
/// Candidates are textual columns whose name does not contain "id"
/// (case-insensitive), the identifier heuristic. Applies iff at least one
/// candidate exists; same 2x2 grid as distributions, each panel holding the
/// top-10 values by descending frequency.
fn categorical_spec(dataset: &Dataset, options: &AnalysisOptions) -> Result<Option<ChartSpec>> {
    let candidates: Vec<String> = dataset
        .text_column_names()
        .into_iter()
        .filter(|name| !name.to_lowercase().contains("id"))
        .collect();
    if candidates.is_empty() {
        return Ok(None);
    }

    let mut panels = Vec::new();
    for name in candidates.iter().take(options.max_categorical_panels) {
        let entries = ranked_values(dataset.frame(), name, options.top_value_limit)?;
        panels.push(BarPanel {
            column: name.clone(),
            entries,
        });
    }

    Ok(Some(ChartSpec::Categorical { panels }))
}

/// Row-aligned string cells of one column, nulls preserved.
fn string_cells(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df.column(name)?.as_materialized_series();
    let casted = series.cast(&DataType::String)?;
    let ca = casted.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_owned)).collect())
}

/// Row-aligned f64 cells of one column, nulls preserved.
fn f64_cells(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)?.as_materialized_series();
    let casted = series.cast(&DataType::Float64)?;
    let ca = casted.f64()?;
    Ok(ca.into_iter().collect())
}

/// Fixed-count equal-width binning; the maximum clamps into the last bin.
/// A constant column collapses to a single bin of nominal width.
fn bin_values(values: &[f64], bin_count: usize) -> (f64, Vec<(f64, usize)>) {
    if values.is_empty() || bin_count == 0 {
        return (0.0, Vec::new());
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return (1.0, vec![(min, values.len())]);
    }

    let width = (max - min) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &value in values {
        let mut index = ((value - min) / width).floor() as usize;
        if index >= bin_count {
            index = bin_count - 1;
        }
        counts[index] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| (min + i as f64 * width, count))
        .collect();
    (width, bins)
}

/// Value frequencies of a textual column, descending by count with ties
/// broken by value so the ordering is deterministic.
fn ranked_values(df: &DataFrame, name: &str, limit: usize) -> Result<Vec<(String, usize)>> {
    let series = df.column(name)?.as_materialized_series();
    let ca = series.str()?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in ca.into_iter().flatten() {
        *counts.entry(value.to_owned()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    Ok(ranked)
}
