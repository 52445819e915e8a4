//! Base cleaning: header standardization, type coercion, critical-field
//! filtering, year filtering and the post-cleaning validation gate.

use anyhow::Result;
use log::info;
use polars::prelude::*;

use crate::{config::Config, error::LifeprepError, COL};

/// Rename raw source headers to their canonical snake_case names. Columns
/// not in the rename table pass through unchanged; never fails.
pub fn standardize_columns(mut df: DataFrame) -> DataFrame {
    for (source, canonical) in COL::SOURCE_RENAMES {
        // A source column absent from the frame is passed through, not an error
        let _ = df.rename(source, canonical);
    }
    df
}

/// Force `year` to integers and the indicator columns to floats.
///
/// The year cast is strict: grouping and range filtering depend on integral
/// years, so a missing or fractional value is fatal. Indicator values that
/// fail to parse become null; downstream consumers tolerate missing
/// indicators, and this silent absorption is the designed mechanism for
/// dirty input.
pub fn coerce_types(mut df: DataFrame) -> Result<DataFrame> {
    let year = df.column(COL::YEAR)?.cast(&DataType::Float64)?;
    let year_ca = year.f64()?;
    if year_ca.null_count() > 0 {
        return Err(LifeprepError::NonIntegralYear(
            "column contains missing or unparseable values".to_string(),
        )
        .into());
    }
    if year_ca.into_no_null_iter().any(|y| y.fract() != 0.0) {
        return Err(
            LifeprepError::NonIntegralYear("column contains fractional values".to_string()).into(),
        );
    }
    df.replace(COL::YEAR, year.cast(&DataType::Int32)?)?;

    for name in COL::NUMERIC_INDICATORS {
        let coerced = df.column(name)?.cast(&DataType::Float64)?;
        df.replace(name, coerced)?;
    }
    Ok(df)
}

/// Drop rows missing any critical field. Missingness in every other column
/// is intentionally preserved. Returns the cleaned frame together with the
/// dropped-row count.
pub fn drop_critical_missing(df: DataFrame) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let keep = col(COL::LIFE_EXPECTANCY)
        .is_not_null()
        .and(col(COL::REGION).is_not_null())
        .and(col(COL::INCOME_GROUP).is_not_null());
    let cleaned = df.lazy().filter(keep).collect()?;
    let dropped = before - cleaned.height();
    info!("Dropped {dropped} rows with missing critical fields");
    Ok((cleaned, dropped))
}

/// Keep rows with `start_year <= year <= end_year`. Idempotent: re-applying
/// to an already filtered frame changes nothing.
pub fn filter_years(df: DataFrame, config: &Config) -> Result<DataFrame> {
    let filtered = df
        .lazy()
        .filter(
            col(COL::YEAR)
                .gt_eq(lit(config.start_year))
                .and(col(COL::YEAR).lt_eq(lit(config.end_year))),
        )
        .collect()?;
    info!(
        "Filtered data to years {}–{}",
        config.start_year, config.end_year
    );
    Ok(filtered)
}

/// Post-cleaning validation. Runs once after the base table is built and
/// gates everything downstream: aggregation and export only happen when the
/// base invariants hold on every row.
pub fn validate_base(df: &DataFrame, config: &Config) -> Result<(), LifeprepError> {
    let years = df.column(COL::YEAR)?.i32()?;
    let in_range = years
        .into_iter()
        .all(|y| y.is_some_and(|y| y >= config.start_year && y <= config.end_year));
    if !in_range {
        return Err(LifeprepError::YearOutOfRange(format!(
            "expected all years within [{}, {}]",
            config.start_year, config.end_year
        )));
    }
    for name in COL::CRITICAL_FIELDS {
        if df.column(name)?.null_count() > 0 {
            return Err(LifeprepError::CriticalFieldMissing(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    fn test_config() -> Config {
        Config {
            start_year: 2000,
            end_year: 2020,
            ..Default::default()
        }
    }

    /// Four raw rows with canonical names but uncoerced string values:
    /// one before the year window, one with a missing region, one after the
    /// window, plus assorted dirty indicator values.
    fn observations() -> DataFrame {
        df!(
            COL::COUNTRY => &["Aland", "Aland", "Borduria", "Borduria"],
            COL::COUNTRY_CODE => &["ALA", "ALA", "BOR", "BOR"],
            COL::REGION => &[Some("North"), Some("North"), None, Some("South")],
            COL::INCOME_GROUP => &["High income", "High income", "Low income", "Low income"],
            COL::YEAR => &["1999", "2000", "2001", "2021"],
            COL::LIFE_EXPECTANCY => &["81.0", "81.5", "62.0", "63.0"],
            COL::UNDERNOURISHMENT => &["2.5", "n/a", "24.0", "23.5"],
            COL::CO2 => &["55", "54", "not recorded", "91"],
            COL::HEALTH_EXP_PCT => &["9.1", "9.2", "4.0", "4.1"],
            COL::EDUCATION_EXP_PCT => &["5.0", "5.1", "3.1", "3.0"],
            COL::UNEMPLOYMENT => &["4.5", "4.4", "8.0", "8.1"],
            COL::CORRUPTION => &["12.1", "12.0", "55.0", "54.0"],
            COL::SANITATION => &["97.9", "98.0", "40.0", "41.0"],
            COL::INJURIES => &["999", "1000", "3000", "3001"],
            COL::COMMUNICABLE => &["201", "200", "4000", "4002"],
            COL::NON_COMMUNICABLE => &["4999", "5000", "2500", "2499"],
        )
        .unwrap()
    }

    fn single_row_with_year(year: Option<&str>) -> DataFrame {
        df!(
            COL::COUNTRY => &["Aland"],
            COL::COUNTRY_CODE => &["ALA"],
            COL::REGION => &["North"],
            COL::INCOME_GROUP => &["High income"],
            COL::YEAR => &[year],
            COL::LIFE_EXPECTANCY => &["81.0"],
            COL::UNDERNOURISHMENT => &["2.5"],
            COL::CO2 => &["55"],
            COL::HEALTH_EXP_PCT => &["9.1"],
            COL::EDUCATION_EXP_PCT => &["5.0"],
            COL::UNEMPLOYMENT => &["4.5"],
            COL::CORRUPTION => &["12.1"],
            COL::SANITATION => &["97.9"],
            COL::INJURIES => &["999"],
            COL::COMMUNICABLE => &["201"],
            COL::NON_COMMUNICABLE => &["4999"],
        )
        .unwrap()
    }

    #[test]
    fn standardize_renames_known_headers_and_passes_others_through() {
        let df = df!(
            "Country Name" => &["Aland"],
            "Year" => &[2000i32],
            "CO2" => &[55.0],
            "extra" => &[1.0],
        )
        .unwrap();
        let df = standardize_columns(df);
        assert_eq!(
            df.get_column_names(),
            &[COL::COUNTRY, COL::YEAR, COL::CO2, "extra"]
        );
    }

    #[test]
    fn coerce_absorbs_dirty_indicators_and_fixes_year() -> anyhow::Result<()> {
        let df = coerce_types(observations())?;
        assert_eq!(df.column(COL::YEAR)?.dtype(), &DataType::Int32);
        // Unparseable values became nulls, parseable neighbours survived
        let undernourishment = df.column(COL::UNDERNOURISHMENT)?.f64()?;
        assert_eq!(undernourishment.get(0), Some(2.5));
        assert_eq!(undernourishment.get(1), None);
        let co2 = df.column(COL::CO2)?.f64()?;
        assert_eq!(co2.get(2), None);
        assert_eq!(co2.get(3), Some(91.0));
        Ok(())
    }

    #[test]
    fn coerce_rejects_fractional_years() {
        let result = coerce_types(single_row_with_year(Some("2000.5")));
        assert!(result.is_err());
    }

    #[test]
    fn coerce_rejects_missing_years() {
        let result = coerce_types(single_row_with_year(None));
        assert!(result.is_err());
    }

    #[test]
    fn cleaning_chain_upholds_base_invariants() -> anyhow::Result<()> {
        let config = test_config();
        let df = coerce_types(observations())?;
        let loaded = df.height();

        let (df, dropped) = drop_critical_missing(df)?;
        assert_eq!(dropped, 1);
        assert!(df.height() <= loaded);

        let df = filter_years(df, &config)?;
        assert_eq!(df.height(), 1);
        assert!(df.height() <= loaded);

        validate_base(&df, &config)?;
        Ok(())
    }

    #[test]
    fn year_filter_is_idempotent() -> anyhow::Result<()> {
        let config = test_config();
        let df = coerce_types(observations())?;
        let once = filter_years(df, &config)?;
        let twice = filter_years(once.clone(), &config)?;
        assert!(once.equals_missing(&twice));
        Ok(())
    }

    #[test]
    fn validation_rejects_out_of_range_years() -> anyhow::Result<()> {
        let config = test_config();
        let df = coerce_types(single_row_with_year(Some("1995")))?;
        let result = validate_base(&df, &config);
        assert!(matches!(result, Err(LifeprepError::YearOutOfRange(_))));
        Ok(())
    }

    #[test]
    fn validation_rejects_missing_critical_fields() -> anyhow::Result<()> {
        let config = test_config();
        let df = df!(
            COL::YEAR => &[2000i32],
            COL::LIFE_EXPECTANCY => &[None::<f64>],
            COL::REGION => &["North"],
            COL::INCOME_GROUP => &["High income"],
        )?;
        let result = validate_base(&df, &config);
        assert!(matches!(
            result,
            Err(LifeprepError::CriticalFieldMissing(_))
        ));
        Ok(())
    }
}
