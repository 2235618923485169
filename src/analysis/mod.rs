pub mod correlation;
pub mod flows;
pub mod io;
pub mod quality;
pub mod statistics;
pub mod types;

pub use correlation::analyze_correlations;
pub use flows::{run_analysis, summarize};
pub use io::load_dataset;
pub use quality::analyze_quality;
pub use statistics::compute_statistics;
pub use types::{
    AnalysisSummary, ColumnInfo, ColumnMissing, ColumnStatistics, ColumnType, CorrelationMatrix,
    Dataset, NumericSummary, QualityReport,
};
