//! # gstify
//!
//! GSTR-1 preparation from Indian e-commerce marketplace exports. Sales
//! reports from Amazon, Flipkart, Jiomart, Meesho and Glowroad, plus
//! generic B2C and B2B templates, are normalised into B2CS, HSN and B2B
//! tables and an e-commerce operator TCS summary.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use gstify::core::*;
//! use gstify::report::{ReportKind, Reports};
//! use gstify::store::Session;
//! use rust_decimal_macros::dec;
//!
//! let mtr = RawTable::from_rows(
//!     "MTR",
//!     &["Ship To State", "Tax Exclusive Gross", "Cgst Rate", "Sgst Rate",
//!       "Igst Rate", "Hsn/sac", "Quantity", "Invoice Amount"],
//!     vec![vec!["Maharashtra", "1000", "0.09", "0.09", "0", "1234.0", "2", "1180"]],
//! );
//!
//! let config = BusinessConfigBuilder::new(StateCode::Maharashtra).build().unwrap();
//! let mut session = Session::new(config);
//! session.ingest(Platform::Amazon, &Upload::new("mtr_march.csv", mtr));
//!
//! let b2cs = session.b2cs_summary();
//! assert_eq!(b2cs[0].state.to_string(), "27-Maharashtra");
//! assert_eq!(b2cs[0].rate, 18);
//!
//! let hsn = &session.hsn_summary()[0];
//! assert_eq!((hsn.cgst, hsn.sgst, hsn.igst), (dec!(90), dec!(90), dec!(0)));
//!
//! let reports = Reports::build(&session);
//! assert_eq!(reports.get(ReportKind::B2cs).rows[0][1], "27-Maharashtra");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | State codes, rate slabs, tax split, configuration |
//! | `ingest` (default) | Platform adapters, session store, compiler |
//! | `report` (default) | GSTR-1 report tables, ECO TCS summary |
//! | `csv` | Read CSV exports, write reports as CSV |
//! | `xlsx` | Read spreadsheet workbooks |
//! | `json` | Business configuration as JSON |
//! | `cli` | The `gstify` command-line tool |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "ingest")]
pub mod ingest;

#[cfg(feature = "ingest")]
pub mod store;

#[cfg(feature = "report")]
pub mod report;

#[cfg(any(feature = "csv", feature = "xlsx"))]
pub mod files;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
