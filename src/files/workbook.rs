use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::{debug, warn};

use crate::core::{Cell, GstError, RawTable, Workbook, parse_decimal};

/// Read every sheet of a spreadsheet workbook (`.xlsx`, `.xlsm`, `.xlsb`,
/// `.xls`, `.ods`). The first row of each sheet is its header.
pub fn read_workbook(path: &Path) -> Result<Workbook, GstError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| GstError::Workbook(format!("{}: {e}", path.display())))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names().to_vec() {
        match workbook.worksheet_range(&name) {
            Ok(range) => {
                let table = range_to_table(&name, &range);
                debug!(sheet = %name, rows = table.len(), "read sheet");
                sheets.push(table);
            }
            Err(e) => warn!(sheet = %name, "skipping unreadable sheet: {e}"),
        }
    }
    Ok(Workbook::new(sheets))
}

fn range_to_table(name: &str, range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();
    let columns = rows
        .next()
        .map(|header| header.iter().map(header_text).collect())
        .unwrap_or_default();

    let mut table = RawTable::new(name, columns);
    for row in rows {
        let cells: Vec<Cell> = row.iter().map(to_cell).collect();
        if cells.iter().all(Cell::is_empty) {
            continue;
        }
        table.push_row(cells);
    }
    table
}

/// Header cells keep their exact text, trailing spaces included.
fn header_text(data: &Data) -> String {
    match data {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn float_cell(f: f64) -> Cell {
    // Shortest round-trip text keeps 0.18 as 0.18 rather than its binary
    // expansion.
    match parse_decimal(&f.to_string()) {
        Some(d) => Cell::Number(d),
        None => Cell::Empty,
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::from(s.as_str()),
        Data::Int(i) => Cell::from(*i),
        Data::Float(f) => float_cell(*f),
        Data::Bool(b) => Cell::Text(b.to_string()),
        // Day serial, like an unformatted date cell.
        Data::DateTime(dt) => float_cell(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
    }
}
