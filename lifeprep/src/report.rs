//! Missing-value diagnostics over the cleaned base table.

use std::cmp::Ordering;

use anyhow::Result;
use polars::df;
use polars::prelude::*;

use crate::COL;

/// Fraction of null rows per column, worst first. The sort is stable so
/// tied columns keep the table's schema order.
pub fn missing_value_report(df: &DataFrame) -> Result<DataFrame> {
    let height = df.height();
    let mut entries = df
        .get_columns()
        .iter()
        .map(|series| {
            let ratio = if height == 0 {
                0.0
            } else {
                series.null_count() as f64 / height as f64
            };
            (series.name().to_string(), ratio)
        })
        .collect::<Vec<_>>();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    let (variables, ratios): (Vec<String>, Vec<f64>) = entries.into_iter().unzip();
    Ok(df!(
        COL::VARIABLE => variables,
        COL::MISSING_RATIO => ratios,
    )?)
}
