use super::types::{round_to, ColumnMissing, Dataset, QualityReport};

/// Scan the dataset for missing values.
///
/// Pure function of the dataset snapshot. The overall percentage is defined
/// as 0.0 when the dataset has zero cells; per-column percentages are over
/// the row count. Only columns with at least one missing cell get an entry,
/// in original column order.
pub fn analyze_quality(dataset: &Dataset) -> QualityReport {
    let df = dataset.frame();
    let rows = df.height();
    let total_cells = rows * df.width();

    let mut total_missing = 0;
    let mut missing_by_column = Vec::new();

    for col in df.get_columns() {
        let nulls = col.null_count();
        total_missing += nulls;

        if nulls > 0 {
            let pct = if rows > 0 {
                nulls as f64 / rows as f64 * 100.0
            } else {
                0.0
            };
            missing_by_column.push(ColumnMissing {
                name: col.name().to_string(),
                count: nulls,
                percentage: round_to(pct, 1),
            });
        }
    }

    let missing_percentage = if total_cells > 0 {
        round_to(total_missing as f64 / total_cells as f64 * 100.0, 2)
    } else {
        0.0
    };

    QualityReport {
        total_missing,
        missing_percentage,
        is_complete: total_missing == 0,
        missing_by_column,
    }
}
