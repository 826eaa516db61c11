//! CSV loader with per-column type inference
//!
//! The games file is header-driven and loosely typed; each column is read
//! as text and then narrowed to the strictest type that fits every
//! non-empty cell (int, then float, then bool, else text). Empty cells
//! become missing values.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::{ChessError, Column, Result, Table, Value};

/// Load a games CSV from disk
pub fn load_csv(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let table = read_table(file)?;
    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.num_rows(),
        table.num_columns(),
        path.display()
    );
    Ok(table)
}

/// Parse CSV content from any reader
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|s| s.to_string()).collect();
    if headers.is_empty() {
        return Err(ChessError::schema("<header>", "CSV file has no header row"));
    }

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    for record in rdr.records() {
        let record = record?;
        for (i, field) in record.iter().enumerate() {
            cells[i].push(field.to_string());
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column::new(name, infer_values(&raw)))
        .collect();

    Table::new(columns)
}

/// Narrow a raw text column to the strictest value type that fits
fn infer_values(raw: &[String]) -> Vec<Value> {
    let present: Vec<&str> = raw
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    let all_int = !present.is_empty() && present.iter().all(|s| s.parse::<i64>().is_ok());
    let all_float = !present.is_empty() && present.iter().all(|s| s.parse::<f64>().is_ok());
    let all_bool = !present.is_empty() && present.iter().all(|s| parse_bool(s).is_some());

    raw.iter()
        .map(|s| {
            let s = s.trim();
            if s.is_empty() {
                Value::Missing
            } else if all_int {
                Value::Int(s.parse().unwrap())
            } else if all_float {
                Value::Float(s.parse().unwrap())
            } else if all_bool {
                Value::Bool(parse_bool(s).unwrap())
            } else {
                Value::Text(s.to_string())
            }
        })
        .collect()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
