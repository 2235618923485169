use polars::prelude::{DataFrame, DataType};
use serde::{Deserialize, Serialize};

use crate::charts::ChartArtifact;

/// In-memory tabular dataset, loaded once and read by every analyzer.
///
/// Row and column counts are fixed after loading; column order is stable and
/// carries through to every derived report.
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_count(&self) -> usize {
        self.df.width()
    }

    /// Column names in original order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Names of columns with a numeric dtype, in original order.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.df
            .get_columns()
            .iter()
            .filter(|c| c.dtype().is_primitive_numeric())
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Names of columns with a string dtype, in original order.
    pub fn text_column_names(&self) -> Vec<String> {
        self.df
            .get_columns()
            .iter()
            .filter(|c| c.dtype().is_string())
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Per-column name, physical dtype and inferred class, in original order.
    pub fn schema_info(&self) -> Vec<ColumnInfo> {
        self.df
            .get_columns()
            .iter()
            .map(|c| {
                let name = c.name().to_string();
                let inferred = ColumnType::infer(&name, c.dtype());
                ColumnInfo {
                    name,
                    dtype: c.dtype().to_string(),
                    inferred,
                }
            })
            .collect()
    }
}

/// True when a column name marks it as a temporal candidate.
pub fn is_temporal_candidate(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("date") || lower.contains("time")
}

/// Inferred class of a column, derived from dtype and name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Textual,
    TemporalCandidate,
    Other,
}

impl ColumnType {
    pub fn infer(name: &str, dtype: &DataType) -> Self {
        if dtype.is_primitive_numeric() {
            Self::Numeric
        } else if is_temporal_candidate(name) {
            Self::TemporalCandidate
        } else if dtype.is_string() {
            Self::Textual
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Textual => "textual",
            Self::TemporalCandidate => "temporal candidate",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One column's entry in the dataset schema listing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub inferred: ColumnType,
}

/// Missingness summary for the whole dataset.
///
/// Invariant: `is_complete == (total_missing == 0)`, and a column appears in
/// `missing_by_column` iff its missing count is positive.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QualityReport {
    pub total_missing: usize,
    /// Share of missing cells over all cells, percent, 2 decimal places.
    pub missing_percentage: f64,
    pub is_complete: bool,
    /// Columns with at least one missing cell, in original column order.
    pub missing_by_column: Vec<ColumnMissing>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnMissing {
    pub name: String,
    pub count: usize,
    /// Share of missing cells over the column's rows, percent, 1 decimal place.
    pub percentage: f64,
}

/// Descriptive statistics for one numeric column.
///
/// `summary` is `None` for a numeric column with zero non-null values: the
/// statistics are undefined rather than fabricated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub name: String,
    pub summary: Option<NumericSummary>,
}

/// Seven-number summary, each value rounded to 2 decimal places.
///
/// `std` is the sample standard deviation (ddof = 1) and is `None` for a
/// single-sample column, where it is undefined.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

/// Pairwise Pearson correlation over the numeric columns.
///
/// Square, symmetric, diagonal exactly 1.0 by construction. Only built when
/// at least two numeric columns exist; callers hold `Option<CorrelationMatrix>`
/// and branch on absence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub data: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.data.get(i).and_then(|row| row.get(j)).copied()
    }
}

/// Everything one pipeline run produced, before formatting.
#[derive(Serialize)]
pub struct AnalysisSummary {
    pub file_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub schema: Vec<ColumnInfo>,
    pub quality: QualityReport,
    pub statistics: Vec<ColumnStatistics>,
    pub correlations: Option<CorrelationMatrix>,
    pub artifacts: Vec<ChartArtifact>,
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
