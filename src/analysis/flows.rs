//! Pipeline orchestration.
//!
//! One invocation runs load → quality → statistics → correlation → charts →
//! report, strictly in that order, exactly once. Loader failures propagate
//! unchanged and produce no report; every later stage degrades instead of
//! aborting, so a readable dataset always yields a complete report,
//! possibly with fewer statistic blocks or fewer chart artifacts.

use std::path::Path;

use super::types::{AnalysisSummary, Dataset};
use super::{analyze_correlations, analyze_quality, compute_statistics, load_dataset};
use crate::charts::{plan_and_render, BitmapRenderer, ChartRenderer};
use crate::config::AnalysisOptions;
use crate::error::Result;
use crate::report::format_report;

/// Run the full pipeline and return everything it produced, unformatted.
///
/// The renderer is injected so hosts and tests can substitute their own;
/// [`summarize`] wires in the plotters bitmap renderer.
pub fn run_analysis(
    path: &Path,
    out_dir: &Path,
    options: &AnalysisOptions,
    renderer: &dyn ChartRenderer,
) -> Result<AnalysisSummary> {
    let dataset = load_dataset(path)?;

    let quality = analyze_quality(&dataset);

    let statistics = compute_statistics(&dataset).unwrap_or_else(|e| {
        tracing::warn!("statistics stage failed, continuing without it: {e:#}");
        Vec::new()
    });

    let correlations = analyze_correlations(&dataset).unwrap_or_else(|e| {
        tracing::warn!("correlation stage failed, continuing without it: {e:#}");
        None
    });

    let artifacts = match std::fs::create_dir_all(out_dir) {
        Ok(()) => plan_and_render(&dataset, correlations.as_ref(), out_dir, renderer, options),
        Err(e) => {
            tracing::warn!(
                "cannot create output directory {}, continuing without charts: {e}",
                out_dir.display()
            );
            Vec::new()
        }
    };

    Ok(assemble_summary(
        path,
        &dataset,
        quality,
        statistics,
        correlations,
        artifacts,
    ))
}

/// Analyze one CSV file and return the formatted report.
///
/// Chart artifacts are written into `out_dir` under their fixed names; a
/// second run overwrites them silently.
pub fn summarize(path: &Path, out_dir: &Path) -> Result<String> {
    let options = AnalysisOptions::default();
    let renderer = BitmapRenderer::new(options.clone());
    let analysis = run_analysis(path, out_dir, &options, &renderer)?;
    Ok(format_report(&analysis))
}

fn assemble_summary(
    path: &Path,
    dataset: &Dataset,
    quality: super::types::QualityReport,
    statistics: Vec<super::types::ColumnStatistics>,
    correlations: Option<super::types::CorrelationMatrix>,
    artifacts: Vec<crate::charts::ChartArtifact>,
) -> AnalysisSummary {
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    AnalysisSummary {
        file_name,
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        schema: dataset.schema_info(),
        quality,
        statistics,
        correlations,
        artifacts,
    }
}
