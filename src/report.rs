//! Text report assembly.
//!
//! A pure, deterministic function of the analysis results: identical inputs
//! produce byte-identical text. Sections appear in a fixed order and chart
//! artifacts are listed by file name only, so absolute paths never leak
//! into the report.

use crate::analysis::types::{AnalysisSummary, CorrelationMatrix};

const RULE: &str = "============================================================";

/// Render the final human-readable report.
pub fn format_report(analysis: &AnalysisSummary) -> String {
    let mut out = String::new();

    // Overview
    out.push_str(RULE);
    out.push('\n');
    out.push_str("DATA OVERVIEW\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "Rows: {} | Columns: {}\n",
        analysis.row_count, analysis.column_count
    ));
    out.push('\n');
    let names: Vec<&str> = analysis.schema.iter().map(|c| c.name.as_str()).collect();
    out.push_str(&format!("Columns: {}\n", names.join(", ")));

    // Inferred types
    out.push('\n');
    out.push_str("DATA TYPES:\n");
    for column in &analysis.schema {
        out.push_str(&format!(
            "  - {}: {} ({})\n",
            column.name, column.dtype, column.inferred
        ));
    }

    // Quality
    out.push('\n');
    out.push_str("DATA QUALITY:\n");
    let quality = &analysis.quality;
    if quality.is_complete {
        out.push_str("No missing values - dataset is complete.\n");
    } else {
        out.push_str(&format!(
            "Missing values: {} ({:.2}% of total data)\n",
            quality.total_missing, quality.missing_percentage
        ));
        out.push_str("Missing by column:\n");
        for missing in &quality.missing_by_column {
            out.push_str(&format!(
                "  - {}: {} ({:.1}%)\n",
                missing.name, missing.count, missing.percentage
            ));
        }
    }

    // Numeric summaries
    if !analysis.statistics.is_empty() {
        out.push('\n');
        out.push_str("NUMERICAL ANALYSIS:\n");
        for column in &analysis.statistics {
            out.push('\n');
            out.push_str(&format!("{}:\n", column.name));
            match &column.summary {
                Some(s) => {
                    out.push_str(&format!("  - Mean: {}\n", s.mean));
                    match s.std {
                        Some(std) => out.push_str(&format!("  - Std Dev: {std}\n")),
                        None => out.push_str("  - Std Dev: undefined\n"),
                    }
                    out.push_str(&format!("  - Min: {}\n", s.min));
                    out.push_str(&format!("  - 25th Percentile: {}\n", s.p25));
                    out.push_str(&format!("  - Median: {}\n", s.median));
                    out.push_str(&format!("  - 75th Percentile: {}\n", s.p75));
                    out.push_str(&format!("  - Max: {}\n", s.max));
                }
                None => out.push_str("  - No non-null values; statistics undefined.\n"),
            }
        }
    }

    // Correlations
    if let Some(matrix) = &analysis.correlations {
        out.push('\n');
        out.push_str("CORRELATIONS:\n");
        render_matrix(&mut out, matrix);
    }

    // Artifacts
    if !analysis.artifacts.is_empty() {
        out.push('\n');
        out.push_str("VISUALIZATIONS CREATED:\n");
        for artifact in &analysis.artifacts {
            out.push_str(&format!("  - {}\n", artifact.file_name()));
        }
    }

    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out.push_str("ANALYSIS COMPLETE\n");
    out.push_str(RULE);
    out.push('\n');

    out
}

/// Literal aligned rendering of the correlation matrix.
fn render_matrix(out: &mut String, matrix: &CorrelationMatrix) {
    let width = matrix
        .columns
        .iter()
        .map(|c| c.len())
        .max()
        .unwrap_or(0)
        .max(6)
        + 2;

    out.push_str(&" ".repeat(width));
    for name in &matrix.columns {
        out.push_str(&format!("{name:>width$}"));
    }
    out.push('\n');

    for (name, row) in matrix.columns.iter().zip(&matrix.data) {
        out.push_str(&format!("{name:<width$}"));
        for value in row {
            out.push_str(&format!("{value:>width$.2}"));
        }
        out.push('\n');
    }
}
