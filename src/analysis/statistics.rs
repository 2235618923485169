use anyhow::{Context as _, Result};
use polars::prelude::*;

use super::types::{round_to, ColumnStatistics, Dataset, NumericSummary};

/// Compute descriptive statistics for every numeric column.
///
/// Returns one entry per numeric column, in original column order; an empty
/// table when the dataset has no numeric column. A numeric column with zero
/// non-null values gets `summary: None`; its statistics are undefined, not
/// fabricated. Quantiles use linear interpolation and the standard deviation
/// is the sample one (ddof = 1), so it is itself undefined for a
/// single-sample column.
pub fn compute_statistics(dataset: &Dataset) -> Result<Vec<ColumnStatistics>> {
    let mut table = Vec::new();

    for col in dataset.frame().get_columns() {
        if !col.dtype().is_primitive_numeric() {
            continue;
        }

        let name = col.name().to_string();
        let series = col.as_materialized_series();
        let casted = series
            .cast(&DataType::Float64)
            .with_context(|| format!("Failed to cast column '{name}' to f64"))?;
        let ca = casted
            .f64()
            .with_context(|| format!("Column '{name}' is not f64 after cast"))?;

        let summary = summarize_values(ca)
            .with_context(|| format!("Failed to summarize column '{name}'"))?;

        table.push(ColumnStatistics { name, summary });
    }

    Ok(table)
}

fn summarize_values(ca: &Float64Chunked) -> Result<Option<NumericSummary>> {
    let non_null = ca.len() - ca.null_count();
    if non_null == 0 {
        return Ok(None);
    }

    let mean = ca.mean().context("mean undefined for non-empty column")?;
    let min = ca.min().context("min undefined for non-empty column")?;
    let max = ca.max().context("max undefined for non-empty column")?;
    let median = ca.median().context("median undefined for non-empty column")?;
    let p25 = ca
        .quantile(0.25, QuantileMethod::Linear)?
        .context("p25 undefined for non-empty column")?;
    let p75 = ca
        .quantile(0.75, QuantileMethod::Linear)?
        .context("p75 undefined for non-empty column")?;
    // Sample std is undefined with a single observation
    let std = if non_null > 1 {
        ca.std(1).map(|s| round_to(s, 2))
    } else {
        None
    };

    Ok(Some(NumericSummary {
        mean: round_to(mean, 2),
        std,
        min: round_to(min, 2),
        p25: round_to(p25, 2),
        median: round_to(median, 2),
        p75: round_to(p75, 2),
        max: round_to(max, 2),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_restricted_to_numeric_columns() {
        let df = df! {
            "quantity" => &[1.0, 2.0, 3.0, 4.0],
            "region" => &["n", "s", "e", "w"],
            "revenue" => &[10.0, 20.0, 30.0, 40.0],
        }
        .expect("df");

        let table = compute_statistics(&Dataset::new(df)).expect("stats");
        let names: Vec<&str> = table.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["quantity", "revenue"]);
    }

    #[test]
    fn test_summary_values() {
        let df = df! {
            "x" => &[1.0, 2.0, 3.0, 4.0, 5.0],
        }
        .expect("df");

        let table = compute_statistics(&Dataset::new(df)).expect("stats");
        let summary = table[0].summary.as_ref().expect("defined summary");
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.p25, 2.0);
        assert_eq!(summary.p75, 4.0);
        // Sample std of 1..=5 is sqrt(2.5) = 1.5811... -> 1.58
        assert_eq!(summary.std, Some(1.58));
    }

    #[test]
    fn test_no_numeric_columns_yields_empty_table() {
        let df = df! {
            "a" => &["x", "y"],
            "b" => &["u", "v"],
        }
        .expect("df");

        let table = compute_statistics(&Dataset::new(df)).expect("stats");
        assert!(table.is_empty());
    }

    #[test]
    fn test_all_null_numeric_column_is_undefined() {
        let df = df! {
            "x" => &[None::<f64>, None, None],
        }
        .expect("df");

        let table = compute_statistics(&Dataset::new(df)).expect("stats");
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].name, "x");
        assert!(table[0].summary.is_none());
    }

    #[test]
    fn test_single_sample_column_has_undefined_std() {
        let df = df! {
            "x" => &[Some(7.0), None],
        }
        .expect("df");

        let table = compute_statistics(&Dataset::new(df)).expect("stats");
        let summary = table[0].summary.as_ref().expect("defined summary");
        assert_eq!(summary.mean, 7.0);
        assert_eq!(summary.min, 7.0);
        assert_eq!(summary.max, 7.0);
        assert!(summary.std.is_none());
    }

    #[test]
    fn test_nulls_excluded_from_summary() {
        let df = df! {
            "x" => &[Some(2.0), None, Some(4.0)],
        }
        .expect("df");

        let table = compute_statistics(&Dataset::new(df)).expect("stats");
        let summary = table[0].summary.as_ref().expect("defined summary");
        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 4.0);
    }
}
