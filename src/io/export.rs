//! CSV export for load tables.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::table::LoadTable;

/// Timestamp column header; series columns follow in table order.
const TIMESTAMP_HEADER: &str = "timestamp";

/// Exports a load table to a CSV file at the given path.
///
/// Writes a header row (`timestamp` plus one column per series) followed by
/// one data row per timestamp. Produces deterministic output for identical
/// inputs.
///
/// # Arguments
///
/// * `table` - The built load table
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(table: &LoadTable, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(table, buf)
}

/// Writes a load table as CSV to any writer.
///
/// # Arguments
///
/// * `table` - The built load table
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(table: &LoadTable, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    let mut header = vec![TIMESTAMP_HEADER.to_string()];
    header.extend(table.names().map(str::to_string));
    wtr.write_record(&header)?;

    // Data rows
    for (i, ts) in table.index().timestamps().iter().enumerate() {
        let mut record = vec![ts.format("%Y-%m-%d %H:%M").to_string()];
        for (_, values) in table.iter() {
            record.push(format!("{:.4}", values[i]));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
