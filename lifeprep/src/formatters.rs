use std::io::{Cursor, Write};

use anyhow::{anyhow, Result};
use enum_dispatch::enum_dispatch;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Utility function to convert from polars `AnyValue` to `serde_json::Value`.
/// Covers the types the pipeline emits.
fn any_value_to_json(value: &AnyValue) -> Result<Value> {
    match value {
        AnyValue::Null => Ok(Value::Null),
        AnyValue::Boolean(b) => Ok(Value::Bool(*b)),
        AnyValue::String(s) => Ok(Value::String((*s).to_string())),
        AnyValue::Int32(n) => Ok(json!(*n)),
        AnyValue::Int64(n) => Ok(json!(*n)),
        AnyValue::UInt32(n) => Ok(json!(*n)),
        AnyValue::UInt64(n) => Ok(json!(*n)),
        AnyValue::Float64(n) => Ok(json!(*n)),
        _ => Err(anyhow!("Failed to convert type")),
    }
}

/// Trait to define different output generators. Defines two functions:
/// `save`, which serializes the `DataFrame` into a writer, and `format`,
/// which renders it to an in-memory string.
#[enum_dispatch]
pub trait OutputGenerator {
    fn save(&self, writer: &mut impl Write, df: &mut DataFrame) -> Result<()>;
    fn format(&self, df: &mut DataFrame) -> Result<String> {
        let mut data: Vec<u8> = vec![];
        let mut buff = Cursor::new(&mut data);
        self.save(&mut buff, df)?;
        Ok(String::from_utf8(data)?)
    }
}

/// Enum of OutputFormatters, one for each potential output type
#[enum_dispatch(OutputGenerator)]
#[derive(Serialize, Deserialize, Debug)]
pub enum OutputFormatter {
    Csv(CSVFormatter),
    Json(JsonFormatter),
}

/// Format the results as a CSV file with a header row. All exported
/// artifacts use this format.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct CSVFormatter;

impl OutputGenerator for CSVFormatter {
    fn save(&self, writer: &mut impl Write, df: &mut DataFrame) -> Result<()> {
        CsvWriter::new(writer).include_header(true).finish(df)?;
        Ok(())
    }
}

/// Format the results as one JSON object per row, newline separated.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct JsonFormatter;

impl OutputGenerator for JsonFormatter {
    fn save(&self, writer: &mut impl Write, df: &mut DataFrame) -> Result<()> {
        for idx in 0..df.height() {
            let mut record = serde_json::Map::new();
            for column in df.get_columns() {
                let val = any_value_to_json(&column.get(idx)?)?;
                record.insert(column.name().to_string(), val);
            }
            writeln!(writer, "{}", Value::Object(record))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use polars::df;

    use super::*;

    #[test]
    fn csv_formatter_writes_header_and_rows() -> anyhow::Result<()> {
        let mut df = df!(
            "variable" => &["co2", "unemployment"],
            "missing_ratio" => &[0.25, 0.0],
        )?;
        let out = CSVFormatter.format(&mut df)?;
        assert_eq!(out, "variable,missing_ratio\nco2,0.25\nunemployment,0.0\n");
        Ok(())
    }

    #[test]
    fn json_formatter_emits_one_record_per_row() -> anyhow::Result<()> {
        let mut df = df!(
            "variable" => &["co2", "unemployment"],
            "missing_ratio" => &[Some(0.25), None],
        )?;
        let out = JsonFormatter.format(&mut df)?;
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Value = serde_json::from_str(lines[0])?;
        assert_eq!(first, json!({"variable": "co2", "missing_ratio": 0.25}));
        let second: Value = serde_json::from_str(lines[1])?;
        assert_eq!(
            second,
            json!({"variable": "unemployment", "missing_ratio": null})
        );
        Ok(())
    }
}
