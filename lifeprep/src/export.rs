//! Serializes the processed tables and the dataset description document.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use polars::prelude::DataFrame;

use crate::formatters::{CSVFormatter, OutputGenerator};
use crate::ProcessedTables;

pub const BASE_FILE: &str = "life_expectancy_clean.csv";
pub const REGION_FILE: &str = "region_year_summary.csv";
pub const INCOME_FILE: &str = "income_year_summary.csv";
pub const ADVANCED_FILE: &str = "life_expectancy_advanced.csv";
pub const MISSING_REPORT_FILE: &str = "missing_value_report.csv";
pub const README_FILE: &str = "README.txt";

/// Description document shipped alongside the datasets. The wording is part
/// of the published artifact set and must not drift.
pub const README_TEXT: &str = "Processed Datasets Description
==============================

1. life_expectancy_clean.csv
   - Base dataset for visualization
   - Country-level World Bank indicators
   - Missing values preserved (except critical fields)

2. region_year_summary.csv
   - Yearly averages aggregated by region

3. income_year_summary.csv
   - Yearly averages aggregated by income group

4. life_expectancy_advanced.csv
   - Exploratory dataset with derived features
   - Includes interpolation flags, rolling averages,
     CO2 outlier flags, and disease burden ratio
   - NOT a replacement for base dataset

5. missing_value_report.csv
   - Missing value proportions per variable";

fn write_csv(df: &mut DataFrame, dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(name);
    let mut file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    CSVFormatter.save(&mut file, df)?;
    Ok(())
}

/// Write the five tables plus `README.txt` into `out_dir`, creating the
/// directory if needed. No atomic-replace guarantee: the validation gate
/// upstream is what protects against exporting bad data.
pub fn export_all(tables: &mut ProcessedTables, out_dir: &str) -> Result<()> {
    let dir = Path::new(out_dir);
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {out_dir}"))?;

    write_csv(&mut tables.base, dir, BASE_FILE)?;
    write_csv(&mut tables.region_year, dir, REGION_FILE)?;
    write_csv(&mut tables.income_year, dir, INCOME_FILE)?;
    write_csv(&mut tables.advanced, dir, ADVANCED_FILE)?;
    write_csv(&mut tables.missing_report, dir, MISSING_REPORT_FILE)?;

    fs::write(dir.join(README_FILE), README_TEXT).context("Failed to write README.txt")?;
    info!("README.txt saved");
    info!("All datasets exported successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    fn tiny_tables() -> anyhow::Result<ProcessedTables> {
        Ok(ProcessedTables {
            base: df!("a" => &[1i32, 2])?,
            region_year: df!("a" => &[1i32])?,
            income_year: df!("a" => &[1i32])?,
            advanced: df!("a" => &[1i32, 2])?,
            missing_report: df!("variable" => &["a"], "missing_ratio" => &[0.0])?,
            dropped_critical: 0,
        })
    }

    #[test]
    fn exports_every_artifact_and_the_readme() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out_dir = dir.path().join("derived");
        let mut tables = tiny_tables()?;
        export_all(&mut tables, out_dir.to_str().unwrap())?;

        for name in [
            BASE_FILE,
            REGION_FILE,
            INCOME_FILE,
            ADVANCED_FILE,
            MISSING_REPORT_FILE,
        ] {
            let contents = std::fs::read_to_string(out_dir.join(name))?;
            assert!(contents.starts_with("a,") || contents.starts_with("a\n") || contents.starts_with("variable"),
                "unexpected header in {name}: {contents}");
        }

        let readme = std::fs::read_to_string(out_dir.join(README_FILE))?;
        assert_eq!(readme, README_TEXT);
        assert!(readme.starts_with("Processed Datasets Description"));
        assert!(!readme.ends_with('\n'));
        Ok(())
    }
}
