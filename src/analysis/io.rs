use polars::prelude::*;
use std::path::Path;

use super::types::Dataset;
use crate::error::{PipelineError, Result};

/// Load a CSV file into a [`Dataset`].
///
/// Fails with [`PipelineError::NotFound`] when the path does not exist,
/// [`PipelineError::EmptyInput`] when the file has zero bytes or parses to
/// zero rows or columns, and [`PipelineError::MalformedInput`] when the CSV
/// collaborator cannot tokenize the content. Rows with inconsistent widths
/// are accepted as-is; the reader truncates ragged lines instead of
/// rejecting them.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(PipelineError::NotFound(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    if size == 0 {
        return Err(PipelineError::EmptyInput(format!(
            "{} has zero bytes",
            path.display()
        )));
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10_000))
        .with_has_header(true)
        .with_truncate_ragged_lines(true)
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| PipelineError::MalformedInput(e.to_string()))?;

    if df.height() == 0 || df.width() == 0 {
        return Err(PipelineError::EmptyInput(format!(
            "{} parsed to {} rows and {} columns",
            path.display(),
            df.height(),
            df.width()
        )));
    }

    tracing::info!(
        rows = df.height(),
        columns = df.width(),
        "loaded {}",
        path.display()
    );

    Ok(Dataset::new(df))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_load_missing_file() {
        let result = load_dataset(Path::new("/nonexistent/path/data.csv"));
        assert!(matches!(result, Err(PipelineError::NotFound(_))));
    }

    #[test]
    fn test_load_zero_byte_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.csv");
        std::fs::File::create(&path).expect("create");

        let result = load_dataset(&path);
        assert!(matches!(result, Err(PipelineError::EmptyInput(_))));
    }

    #[test]
    fn test_load_header_only_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("header_only.csv");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(file, "a,b,c").expect("write");

        let result = load_dataset(&path);
        assert!(matches!(result, Err(PipelineError::EmptyInput(_))));
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("data.csv");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(file, "name,age").expect("write");
        writeln!(file, "alice,30").expect("write");
        writeln!(file, "bob,25").expect("write");

        let dataset = load_dataset(&path).expect("should load");
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.column_count(), 2);
        assert_eq!(dataset.column_names(), vec!["name", "age"]);
        assert_eq!(dataset.numeric_column_names(), vec!["age"]);
    }

    #[test]
    fn test_load_ragged_rows_accepted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ragged.csv");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(file, "a,b,c").expect("write");
        writeln!(file, "1,2,3").expect("write");
        writeln!(file, "4,5,6,7").expect("write");

        let dataset = load_dataset(&path).expect("ragged rows should be accepted");
        assert_eq!(dataset.column_count(), 3);
        assert_eq!(dataset.row_count(), 2);
    }
}
