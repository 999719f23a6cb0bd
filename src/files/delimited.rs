use std::io::Read;

use crate::core::{Cell, GstError, RawTable};

/// Read a CSV export into a raw table. Headers are kept verbatim; every
/// non-empty field becomes a text cell and is coerced later by the
/// adapter. Ragged rows are accepted.
pub fn read_csv<R: Read>(name: &str, reader: R) -> Result<RawTable, GstError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = RawTable::new(name, columns);
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        table.push_row(record.iter().map(Cell::from).collect());
    }
    Ok(table)
}

/// Write a report as CSV, header row first.
#[cfg(feature = "report")]
pub fn write_report_csv<W: std::io::Write>(
    table: &crate::report::ReportTable,
    writer: W,
) -> Result<(), GstError> {
    let mut writer = ::csv::Writer::from_writer(writer);
    writer.write_record(table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
