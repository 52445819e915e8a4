use anyhow::{Context, Result};
use log::info;
use polars::prelude::*;

const INFER_SCHEMA_LENGTH: usize = 10_000;

/// Read the raw observation table. The file must exist and parse as
/// delimited data with a header row; anything else aborts the run. The
/// pipeline never continues with partial data.
pub fn load_data(path: &str) -> Result<DataFrame> {
    info!("Loading raw dataset from {path}");
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_LENGTH))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("Failed to read CSV at {path}"))?;
    info!("Loaded {} rows × {} columns", df.height(), df.width());
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_fatal() {
        let result = load_data("does/not/exist.csv");
        assert!(result.is_err());
    }

    #[test]
    fn loads_csv_with_header() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("input.csv");
        std::fs::write(&path, "Country Name,Year\nAland,2000\nBorduria,2001\n")?;
        let df = load_data(path.to_str().unwrap())?;
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(df.get_column_names(), &["Country Name", "Year"]);
        Ok(())
    }
}
