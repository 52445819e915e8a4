//! Mean aggregations backing the dashboard's regional and income-group
//! views.

use anyhow::Result;
use itertools::Itertools;
use polars::prelude::*;

use crate::COL;

/// Group by the given pair of key columns and take the arithmetic mean of
/// every numeric indicator. Nulls are excluded from each mean; a group with
/// only nulls yields a null mean. Keys become ordinary output columns and
/// the result is sorted by them.
fn mean_by(df: &DataFrame, keys: [&str; 2]) -> Result<DataFrame> {
    let aggs = COL::NUMERIC_INDICATORS
        .iter()
        .map(|name| col(*name).mean())
        .collect_vec();
    Ok(df
        .clone()
        .lazy()
        .group_by([col(keys[0]), col(keys[1])])
        .agg(aggs)
        .sort(keys, SortMultipleOptions::default())
        .collect()?)
}

/// Yearly averages aggregated by region.
pub fn aggregate_region_year(df: &DataFrame) -> Result<DataFrame> {
    mean_by(df, [COL::REGION, COL::YEAR])
}

/// Yearly averages aggregated by income group.
pub fn aggregate_income_year(df: &DataFrame) -> Result<DataFrame> {
    mean_by(df, [COL::INCOME_GROUP, COL::YEAR])
}
