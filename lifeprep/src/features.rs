//! The advanced feature pipeline: a branch built from a copy of the base
//! table and enriched with interpolation, outlier flags, a derived ratio
//! and a rolling average.
//!
//! Interpolation and the rolling average are order-sensitive: both sort by
//! (country, year) ascending before applying their per-country window.
//! Reordering the advanced table afterwards invalidates those columns.

use anyhow::Result;
use log::info;
use polars::prelude::*;

use crate::COL;

const ROLLING_WINDOW: usize = 5;
const ROLLING_MIN_PERIODS: usize = 1;
const IQR_MULTIPLIER: f64 = 1.5;

fn sort_country_year(lf: LazyFrame) -> LazyFrame {
    lf.sort([COL::COUNTRY, COL::YEAR], SortMultipleOptions::default())
}

/// Time-aware linear interpolation of life expectancy, applied only within
/// a country. A country needs at least two non-missing observations to
/// anchor a trend; with fewer its series is left untouched. Leading and
/// trailing gaps take the nearest filled value.
///
/// Adds the interpolated series and a flag that is true exactly where the
/// original value was missing and the interpolated one is present.
pub fn interpolate_within_country(df: DataFrame) -> Result<DataFrame> {
    let has_trend = col(COL::LIFE_EXPECTANCY)
        .is_not_null()
        .sum()
        .over([col(COL::COUNTRY)])
        .gt(lit(1));
    let filled = col(COL::LIFE_EXPECTANCY)
        .interpolate(InterpolationMethod::Linear)
        .forward_fill(None)
        .backward_fill(None)
        .over([col(COL::COUNTRY)]);
    Ok(sort_country_year(df.lazy())
        .with_column(
            when(has_trend)
                .then(filled)
                .otherwise(col(COL::LIFE_EXPECTANCY))
                .alias(COL::LIFE_EXPECTANCY_INTERP),
        )
        .with_column(
            col(COL::LIFE_EXPECTANCY)
                .is_null()
                .and(col(COL::LIFE_EXPECTANCY_INTERP).is_not_null())
                .alias(COL::LIFE_EXPECTANCY_WAS_INTERPOLATED),
        )
        .collect()?)
}

/// Flag IQR outliers in `column` against quartiles computed over the whole
/// table. Flag only; the underlying values are never modified or removed.
pub fn detect_outliers_iqr(df: DataFrame, column: &str) -> Result<DataFrame> {
    let q1 = col(column).quantile(lit(0.25), QuantileInterpolOptions::Linear);
    let q3 = col(column).quantile(lit(0.75), QuantileInterpolOptions::Linear);
    let iqr = q3.clone() - q1.clone();
    let lower = q1 - lit(IQR_MULTIPLIER) * iqr.clone();
    let upper = q3 + lit(IQR_MULTIPLIER) * iqr;
    let flag = col(column)
        .lt(lower)
        .or(col(column).gt(upper))
        // null values are not outliers
        .fill_null(lit(false))
        .alias(&format!("{column}_is_outlier"));
    Ok(df.lazy().with_column(flag).collect()?)
}

/// Derived sustainability & health indicators.
///
/// The +1 in the denominator keeps the ratio defined when communicable
/// deaths are zero; a null in either operand propagates to a null ratio.
pub fn derive_health_indicators(df: DataFrame) -> Result<DataFrame> {
    Ok(df
        .lazy()
        .with_column(
            (col(COL::NON_COMMUNICABLE) / (col(COL::COMMUNICABLE) + lit(1.0)))
                .alias(COL::DISEASE_BURDEN_RATIO),
        )
        .collect()?)
}

/// Trailing five-year rolling average of life expectancy per country. The
/// first rows of each series average over however many years exist so far;
/// nulls inside a window are excluded from its mean.
pub fn rolling_life_expectancy(df: DataFrame) -> Result<DataFrame> {
    let options = RollingOptionsFixedWindow {
        window_size: ROLLING_WINDOW,
        min_periods: ROLLING_MIN_PERIODS,
        ..Default::default()
    };
    Ok(sort_country_year(df.lazy())
        .with_column(
            col(COL::LIFE_EXPECTANCY)
                .rolling_mean(options)
                .over([col(COL::COUNTRY)])
                .alias(COL::LIFE_EXPECTANCY_5YR_AVG),
        )
        .collect()?)
}

/// Build the advanced dataset from a copy of the base table, applying
/// interpolation, outlier flagging, the derived ratio and the rolling
/// average in that order. The base frame is left untouched; the two tables
/// are exported as sibling artifacts.
pub fn build_advanced(base: &DataFrame, outlier_column: &str) -> Result<DataFrame> {
    let advanced = base.clone();
    let advanced = interpolate_within_country(advanced)?;
    let advanced = detect_outliers_iqr(advanced, outlier_column)?;
    let advanced = derive_health_indicators(advanced)?;
    let advanced = rolling_life_expectancy(advanced)?;
    info!(
        "Built advanced dataset: {} rows × {} columns",
        advanced.height(),
        advanced.width()
    );
    Ok(advanced)
}
