use comfy_table::{presets::NOTHING, *};
use itertools::izip;
use lifeprep::{config::Config, ProcessedTables, COL};
use polars::frame::DataFrame;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_style(comfy_table::TableComponent::BottomBorder, '─')
        .set_style(comfy_table::TableComponent::MiddleHeaderIntersections, '─')
        .set_style(comfy_table::TableComponent::HeaderLines, '─')
        .set_style(comfy_table::TableComponent::BottomBorderIntersections, '─')
        .set_style(comfy_table::TableComponent::TopBorder, '─')
        .set_style(comfy_table::TableComponent::TopBorderIntersections, '─');
    table
}

/// Render the missing-value report as a two-column table, worst first.
pub fn display_missing_report(report: &DataFrame) -> anyhow::Result<()> {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Variable").add_attribute(Attribute::Bold),
        Cell::new("Missing ratio").add_attribute(Attribute::Bold),
    ]);
    for (variable, ratio) in izip!(
        report.column(COL::VARIABLE)?.str()?,
        report.column(COL::MISSING_RATIO)?.f64()?,
    ) {
        table.add_row(vec![
            variable.unwrap_or_default().to_string(),
            format!("{:.4}", ratio.unwrap_or_default()),
        ]);
    }
    println!("\n{}", table);
    Ok(())
}

/// Render the head of a yearly summary aggregate, keyed by `key`.
pub fn display_summary(
    summary: &DataFrame,
    key: &str,
    max_results: Option<usize>,
) -> anyhow::Result<()> {
    let df_to_show = match max_results {
        Some(max) => summary.head(Some(max)),
        None => summary.clone(),
    };
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Group").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Life expectancy (mean)").add_attribute(Attribute::Bold),
        Cell::new("CO2 (mean)").add_attribute(Attribute::Bold),
    ]);
    for (group, year, life_expectancy, co2) in izip!(
        df_to_show.column(key)?.str()?,
        df_to_show.column(COL::YEAR)?.i32()?,
        df_to_show.column(COL::LIFE_EXPECTANCY)?.f64()?,
        df_to_show.column(COL::CO2)?.f64()?,
    ) {
        table.add_row(vec![
            group.unwrap_or_default().to_string(),
            year.map(|y| y.to_string()).unwrap_or_default(),
            life_expectancy
                .map(|v| format!("{v:.2}"))
                .unwrap_or_default(),
            co2.map(|v| format!("{v:.2}")).unwrap_or_default(),
        ]);
    }
    println!("\n{}", table);
    Ok(())
}

/// Print the stage diagnostics of a pipeline run: dropped-row counts, the
/// retained year window and the output table shapes.
pub fn print_run_summary(tables: &ProcessedTables, config: &Config) {
    println!(
        "Dropped {} rows with missing critical fields",
        tables.dropped_critical
    );
    println!(
        "Filtered data to years {}–{}",
        config.start_year, config.end_year
    );
    println!("Base dataset: {} rows", tables.base.height());
    println!("Region × year summary: {} rows", tables.region_year.height());
    println!("Income × year summary: {} rows", tables.income_year.height());
    println!(
        "Advanced dataset: {} rows × {} columns",
        tables.advanced.height(),
        tables.advanced.width()
    );
}
