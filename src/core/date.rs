//! Invoice date parsing for B2B registers.
//!
//! Spreadsheets store dates as day serials counted from 1899-12-30; CSV
//! exports carry them as text in whatever format the marketplace prefers.
//! GSTR-1 templates expect `DD-Mon-YYYY`.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::rate::parse_decimal;
use super::table::Cell;

/// Output format for invoice dates, e.g. `05-Mar-2024`.
pub const INVOICE_DATE_FORMAT: &str = "%d-%b-%Y";

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d-%B-%Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d-%b-%y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M",
];

fn serial_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Convert a spreadsheet day serial to a date. The time-of-day fraction is
/// discarded.
pub fn from_serial(serial: Decimal) -> Option<NaiveDate> {
    let days = serial.floor().to_i64()?;
    serial_epoch().checked_add_signed(Duration::try_days(days)?)
}

/// Parse an invoice date from a cell.
///
/// Numbers (and text that parses as a number) are day serials; text is
/// tried against the common ISO, US, day-first and month-name formats.
/// Returns `None` when nothing matches.
pub fn parse_invoice_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Empty => None,
        Cell::Number(serial) => from_serial(*serial),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            if let Some(serial) = parse_decimal(s) {
                return from_serial(serial);
            }
            parse_date_text(s)
        }
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    None
}

/// Parse and format an invoice date as `DD-Mon-YYYY`.
pub fn format_invoice_date(cell: &Cell) -> Option<String> {
    parse_invoice_date(cell).map(|d| d.format(INVOICE_DATE_FORMAT).to_string())
}
