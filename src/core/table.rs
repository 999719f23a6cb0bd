//! Raw tabular input as handed over by the file readers.
//!
//! A [`RawTable`] is untyped: column names are kept verbatim and every cell
//! is either empty, text, or a number. Adapters validate the columns they
//! need through a [`Frame`] and coerce cells themselves.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::IngestError;
use super::rate::coerce_numeric_or_default;

/// A single spreadsheet / CSV cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    /// Numeric cell. Spreadsheet dates arrive as their day-serial number.
    Number(Decimal),
}

impl Cell {
    /// String form of the cell, trimmed. Whole numbers are rendered without
    /// a fractional part (`1234`, not `1234.0`).
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(d) => d.normalize().to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s)
        }
    }
}

impl From<Decimal> for Cell {
    fn from(d: Decimal) -> Self {
        Cell::Number(d)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Number(Decimal::from(i))
    }
}

/// One sheet (or one CSV file) of rows with named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Sheet name; for CSV input, the file stem.
    pub name: String,
    /// Header row, verbatim.
    pub columns: Vec<String>,
    /// Data rows. Rows shorter than the header read as empty cells.
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from string literals; convenient for tests and demos.
    pub fn from_rows<C, R>(name: impl Into<String>, columns: &[&str], rows: R) -> Self
    where
        R: IntoIterator<Item = Vec<C>>,
        C: Into<Cell>,
    {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check that every `required` column is present and return an indexed
    /// view over the table.
    pub fn frame<'a>(&'a self, required: &[&str]) -> Result<Frame<'a>, IngestError> {
        let index: HashMap<&'a str, usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|c| !index.contains_key(**c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns {
                sheet: self.name.clone(),
                columns: missing,
            });
        }

        Ok(Frame { table: self, index })
    }
}

/// All sheets of one uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<RawTable>,
}

impl Workbook {
    pub fn new(sheets: Vec<RawTable>) -> Self {
        Self { sheets }
    }

    /// The first sheet, which single-table exports are read from.
    pub fn first(&self) -> Option<&RawTable> {
        self.sheets.first()
    }

    pub fn sheet(&self, name: &str) -> Option<&RawTable> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

impl From<RawTable> for Workbook {
    fn from(table: RawTable) -> Self {
        Self {
            sheets: vec![table],
        }
    }
}

/// An uploaded file: its name (used for duplicate detection) and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upload {
    pub name: String,
    pub workbook: Workbook,
}

impl Upload {
    pub fn new(name: impl Into<String>, workbook: impl Into<Workbook>) -> Self {
        Self {
            name: name.into(),
            workbook: workbook.into(),
        }
    }
}

/// A [`RawTable`] whose required columns have been checked.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    table: &'a RawTable,
    index: HashMap<&'a str, usize>,
}

impl<'a> Frame<'a> {
    pub fn name(&self) -> &'a str {
        &self.table.name
    }

    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = FrameRow<'_>> + '_ {
        self.table.rows.iter().map(move |cells| FrameRow {
            cells,
            index: &self.index,
        })
    }
}

/// One row of a [`Frame`], addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct FrameRow<'a> {
    cells: &'a [Cell],
    index: &'a HashMap<&'a str, usize>,
}

static EMPTY: Cell = Cell::Empty;

impl<'a> FrameRow<'a> {
    pub fn cell(&self, column: &str) -> &'a Cell {
        self.index
            .get(column)
            .and_then(|&i| self.cells.get(i))
            .unwrap_or(&EMPTY)
    }

    /// Numeric value of `column`, 0 when missing or unparsable.
    pub fn number(&self, column: &str) -> Decimal {
        coerce_numeric_or_default(self.cell(column))
    }

    /// Trimmed text of `column`.
    pub fn text(&self, column: &str) -> String {
        self.cell(column).as_text()
    }
}
