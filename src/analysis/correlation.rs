use anyhow::{Context as _, Result};
use polars::prelude::*;

use super::types::{CorrelationMatrix, Dataset};

/// Compute the pairwise Pearson correlation matrix over numeric columns.
///
/// Returns `None` when fewer than two numeric columns exist: a distinct
/// "not applicable" state, not an empty matrix. The matrix is symmetric and
/// its diagonal is exactly 1.0 by construction: the upper triangle is
/// computed and mirrored, the diagonal written as a literal. Coefficients
/// the collaborator cannot produce (e.g. zero variance) fall back to 0.0 so
/// every cell stays inside [-1, 1].
pub fn analyze_correlations(dataset: &Dataset) -> Result<Option<CorrelationMatrix>> {
    let df = dataset.frame();
    let columns = dataset.numeric_column_names();

    if columns.len() < 2 {
        return Ok(None);
    }

    let mut casted = Vec::with_capacity(columns.len());
    for name in &columns {
        let series = df
            .column(name)
            .with_context(|| format!("Column '{name}' disappeared from dataset"))?
            .as_materialized_series()
            .cast(&DataType::Float64)
            .with_context(|| format!("Failed to cast column '{name}' to f64"))?;
        casted.push(series);
    }

    let n = columns.len();
    let mut data = vec![vec![0.0; n]; n];
    for (i, row) in data.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let ca_i = casted[i].f64().context("cast invariant violated")?;
            let ca_j = casted[j].f64().context("cast invariant violated")?;
            let coefficient = polars::prelude::cov::pearson_corr(ca_i, ca_j)
                .filter(|c| c.is_finite())
                .unwrap_or(0.0);
            data[i][j] = coefficient;
            data[j][i] = coefficient;
        }
    }

    Ok(Some(CorrelationMatrix { columns, data }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_numeric_column_is_absent() {
        let df = df! {
            "x" => &[1.0, 2.0, 3.0],
            "label" => &["a", "b", "c"],
        }
        .expect("df");

        let matrix = analyze_correlations(&Dataset::new(df)).expect("corr");
        assert!(matrix.is_none());
    }

    #[test]
    fn test_no_numeric_columns_is_absent() {
        let df = df! {
            "a" => &["x", "y"],
        }
        .expect("df");

        let matrix = analyze_correlations(&Dataset::new(df)).expect("corr");
        assert!(matrix.is_none());
    }

    #[test]
    fn test_perfectly_correlated_columns() {
        let df = df! {
            "x" => &[1.0, 2.0, 3.0, 4.0],
            "y" => &[2.0, 4.0, 6.0, 8.0],
        }
        .expect("df");

        let matrix = analyze_correlations(&Dataset::new(df))
            .expect("corr")
            .expect("present");
        assert_eq!(matrix.size(), 2);
        let r = matrix.get(0, 1).expect("cell");
        assert!((r - 1.0).abs() < 1e-9, "expected r = 1, got {r}");
    }

    #[test]
    fn test_anti_correlated_columns() {
        let df = df! {
            "x" => &[1.0, 2.0, 3.0, 4.0],
            "y" => &[8.0, 6.0, 4.0, 2.0],
        }
        .expect("df");

        let matrix = analyze_correlations(&Dataset::new(df))
            .expect("corr")
            .expect("present");
        let r = matrix.get(0, 1).expect("cell");
        assert!((r + 1.0).abs() < 1e-9, "expected r = -1, got {r}");
    }

    #[test]
    fn test_diagonal_is_exactly_one_and_matrix_symmetric() {
        let df = df! {
            "a" => &[1.0, 5.0, 2.0, 9.0, 4.0],
            "b" => &[3.0, 1.0, 8.0, 2.0, 7.0],
            "c" => &[2.0, 2.0, 2.0, 3.0, 1.0],
        }
        .expect("df");

        let matrix = analyze_correlations(&Dataset::new(df))
            .expect("corr")
            .expect("present");
        assert_eq!(matrix.size(), 3);

        for i in 0..3 {
            assert_eq!(matrix.get(i, i), Some(1.0), "diagonal must be exactly 1.0");
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i), "must be symmetric");
                let v = matrix.get(i, j).expect("cell");
                assert!((-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_zero_variance_column_falls_back_to_zero() {
        let df = df! {
            "x" => &[1.0, 2.0, 3.0],
            "constant" => &[5.0, 5.0, 5.0],
        }
        .expect("df");

        let matrix = analyze_correlations(&Dataset::new(df))
            .expect("corr")
            .expect("present");
        assert_eq!(matrix.get(0, 1), Some(0.0));
        assert_eq!(matrix.get(1, 1), Some(1.0));
    }
}
