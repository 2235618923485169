use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The four chart categories the planner can emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartCategory {
    Heatmap,
    TimeSeries,
    Distribution,
    Categorical,
}

impl ChartCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heatmap => "heatmap",
            Self::TimeSeries => "time series",
            Self::Distribution => "distribution",
            Self::Categorical => "categorical",
        }
    }
}

impl std::fmt::Display for ChartCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One rendered chart file. Created once per run, never mutated; the report
/// references it by file name only.
#[derive(Clone, Debug, Serialize)]
pub struct ChartArtifact {
    pub path: PathBuf,
    pub category: ChartCategory,
}

impl ChartArtifact {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Mean of one numeric column for one date group.
#[derive(Clone, Debug)]
pub struct TimePoint {
    /// Axis label for the group key.
    pub label: String,
    pub mean: f64,
}

/// One sub-plot of the time-series chart: a numeric column aggregated by
/// date group, points already sorted ascending by the date key.
#[derive(Clone, Debug)]
pub struct SeriesPanel {
    pub column: String,
    pub points: Vec<TimePoint>,
}

/// One cell of the distributions grid: a binned histogram.
#[derive(Clone, Debug)]
pub struct HistogramPanel {
    pub column: String,
    pub bin_width: f64,
    /// (bin start, count) pairs in ascending bin order.
    pub bins: Vec<(f64, usize)>,
}

/// One cell of the categorical grid: ranked value frequencies.
#[derive(Clone, Debug)]
pub struct BarPanel {
    pub column: String,
    /// (value, count) pairs, descending by count.
    pub entries: Vec<(String, usize)>,
}

/// A fully prepared chart, ready to draw. All selection and aggregation
/// policy lives upstream in the planner; the renderer only lays out pixels.
#[derive(Clone, Debug)]
pub enum ChartSpec {
    Heatmap {
        columns: Vec<String>,
        values: Vec<Vec<f64>>,
    },
    TimeSeries {
        panels: Vec<SeriesPanel>,
    },
    Distributions {
        panels: Vec<HistogramPanel>,
    },
    Categorical {
        panels: Vec<BarPanel>,
    },
}

/// Capability seam for chart rasterisation.
///
/// Production uses the plotters bitmap backend; tests substitute recording
/// or failing fakes. Implementations must write the finished image to `path`
/// before returning.
pub trait ChartRenderer {
    fn render(&self, spec: &ChartSpec, path: &Path) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_file_name_strips_directories() {
        let artifact = ChartArtifact {
            path: PathBuf::from("/tmp/out/distributions.png"),
            category: ChartCategory::Distribution,
        };
        assert_eq!(artifact.file_name(), "distributions.png");
    }
}
