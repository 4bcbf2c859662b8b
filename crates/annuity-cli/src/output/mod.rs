pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};
use std::io::{self, Write};

/// Column order of an amortisation row, as read left to right.
const SCHEDULE_COLUMNS: [&str; 6] = [
    "period",
    "capital_start",
    "interest",
    "amortization",
    "annuity",
    "capital_end",
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

fn print_json(value: &Value) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = serde_json::to_writer_pretty(&mut out, value)
        .map_err(io::Error::from)
        .and_then(|_| writeln!(out));
    if let Err(e) = written {
        eprintln!("JSON output error: {}", e);
    }
}

/// Headers for an array of row objects: schedule columns first, in their
/// natural order, then anything else alphabetically.
fn ordered_headers(first: &Map<String, Value>) -> Vec<String> {
    let mut headers: Vec<String> = SCHEDULE_COLUMNS
        .iter()
        .filter(|c| first.contains_key(**c))
        .map(|c| c.to_string())
        .collect();
    headers.extend(
        first
            .keys()
            .filter(|k| !SCHEDULE_COLUMNS.contains(&k.as_str()))
            .cloned(),
    );
    headers
}

/// The first array-of-objects field of a result, e.g. the schedule.
fn row_array(result: &Map<String, Value>) -> Option<(&str, &[Value])> {
    result.iter().find_map(|(key, val)| match val {
        Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
            Some((key.as_str(), rows.as_slice()))
        }
        _ => None,
    })
}
