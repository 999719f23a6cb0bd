//! Core GST types: state codes, rate slabs, tax splitting, configuration.
//!
//! Everything here is pure and shared by the platform adapters, the
//! compiler and the report formatters.

mod config;
mod date;
mod error;
mod rate;
mod split;
mod states;
mod table;
mod types;

pub use config::*;
pub use date::{INVOICE_DATE_FORMAT, format_invoice_date, from_serial, parse_invoice_date};
pub use error::*;
pub use rate::{
    MAX_AMOUNT, coerce_numeric_or_default, effective_rate, parse_decimal, round_rate,
    round_rate_cell,
};
pub use split::*;
pub use states::{PlaceOfSupply, StateCode, canonicalize_state, title_case};
pub use table::*;
pub use types::*;
