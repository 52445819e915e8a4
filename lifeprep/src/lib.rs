use anyhow::Result;
use log::{debug, info};
use polars::frame::DataFrame;

use crate::config::Config;

// Re-exports
pub use column_names as COL;

// Modules
pub mod aggregate;
pub mod clean;
pub mod column_names;
pub mod config;
pub mod error;
pub mod export;
pub mod features;
pub mod formatters;
pub mod load;
pub mod report;

/// Type for the lifeprep pipeline: the raw observation table plus the
/// configuration it was loaded under.
pub struct Lifeprep {
    pub raw: DataFrame,
    pub config: Config,
}

/// The tables produced by one pipeline run. The advanced table is a sibling
/// artifact of the base table, not a replacement; both are exported.
pub struct ProcessedTables {
    pub base: DataFrame,
    pub region_year: DataFrame,
    pub income_year: DataFrame,
    pub advanced: DataFrame,
    pub missing_report: DataFrame,
    /// Rows removed by the critical-field filter, kept for observability.
    pub dropped_critical: usize,
}

impl Lifeprep {
    /// Setup the Lifeprep object with default configuration
    pub fn new() -> Result<Self> {
        Self::new_with_config(Config::default())
    }

    /// Setup the Lifeprep object with custom configuration. The raw table
    /// is loaded eagerly so a missing or unreadable input fails here rather
    /// than mid-pipeline.
    pub fn new_with_config(config: Config) -> Result<Self> {
        debug!("config: {config:?}");
        let raw = load::load_data(&config.input_path)?;
        Ok(Self { raw, config })
    }

    /// Run base cleaning, validation, the aggregations and the advanced
    /// feature branch. Nothing is written to disk; see [`Lifeprep::export`].
    pub fn process(&self) -> Result<ProcessedTables> {
        let df = clean::standardize_columns(self.raw.clone());
        let df = clean::coerce_types(df)?;
        let (df, dropped_critical) = clean::drop_critical_missing(df)?;
        let df = clean::filter_years(df, &self.config)?;

        // The validation gate: if this fails, nothing downstream runs and
        // nothing is exported.
        clean::validate_base(&df, &self.config)?;

        let region_year = aggregate::aggregate_region_year(&df)?;
        let income_year = aggregate::aggregate_income_year(&df)?;
        let missing_report = report::missing_value_report(&df)?;
        let advanced = features::build_advanced(&df, COL::CO2)?;
        info!("Processed base table: {} rows", df.height());

        Ok(ProcessedTables {
            base: df,
            region_year,
            income_year,
            advanced,
            missing_report,
            dropped_critical,
        })
    }

    /// Export every artifact to the configured output directory.
    pub fn export(&self, tables: &mut ProcessedTables) -> Result<()> {
        export::export_all(tables, &self.config.output_dir)
    }
}
