//! GSTR-1 report tables and the e-commerce TCS summary.
//!
//! Each formatter turns compiled rows into a [`ReportTable`]: a fixed list
//! of column names and rows of rendered cells, ready for a writer.
//!
//! # Example
//!
//! ```
//! use gstify::core::BusinessConfig;
//! use gstify::report::{ReportKind, Reports};
//! use gstify::store::Session;
//!
//! let session = Session::new(BusinessConfig::default());
//! let reports = Reports::build(&session);
//! assert_eq!(reports.tables().len(), 5);
//! assert!(reports.get(ReportKind::B2cs).is_empty());
//! ```

mod format;
mod tcs;

use std::fmt;

use chrono::NaiveDateTime;

use crate::store::Session;

pub use format::{
    B2B_COLUMNS, B2CS_COLUMNS, B2CS_TYPE, HSN_COLUMNS, TCS_COLUMNS, amount, b2b_report,
    b2cs_report, hsn_b2b_report, hsn_report, tcs_report,
};
pub use tcs::{NATURE_OF_SUPPLY, TcsRow, build_eco_tcs};

/// Timestamp suffix on report file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// The five downloadable reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    B2cs,
    HsnB2c,
    B2b,
    HsnB2b,
    EcoTcs,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        Self::B2cs,
        Self::HsnB2c,
        Self::B2b,
        Self::HsnB2b,
        Self::EcoTcs,
    ];

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::B2cs => B2CS_COLUMNS,
            Self::HsnB2c | Self::HsnB2b => HSN_COLUMNS,
            Self::B2b => B2B_COLUMNS,
            Self::EcoTcs => TCS_COLUMNS,
        }
    }

    /// Base file name, without timestamp or extension.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::B2cs => "B2CS",
            Self::HsnB2c => "hsn(b2c)",
            Self::B2b => "B2B_Output",
            Self::HsnB2b => "hsn(b2b)",
            Self::EcoTcs => "ECO_TCS",
        }
    }

    /// `"{stem}_{YYYYmmdd_HHMMSS}.{extension}"`.
    pub fn file_name(&self, timestamp: NaiveDateTime, extension: &str) -> String {
        format!(
            "{}_{}.{extension}",
            self.file_stem(),
            timestamp.format(FILE_TIMESTAMP_FORMAT)
        )
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// A rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub kind: ReportKind,
    pub columns: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn new(kind: ReportKind, rows: Vec<Vec<String>>) -> Self {
        Self {
            kind,
            columns: kind.columns(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All five reports for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reports {
    tables: Vec<ReportTable>,
}

impl Reports {
    pub fn build(session: &Session) -> Self {
        let tcs = build_eco_tcs(
            &session.hsn_rows(),
            &session.hsn_b2b_rows(),
            session.config(),
        );
        Self {
            tables: vec![
                b2cs_report(&session.b2cs_summary()),
                hsn_report(&session.hsn_summary()),
                b2b_report(&session.b2b_register()),
                hsn_b2b_report(&session.hsn_b2b_summary()),
                tcs_report(&tcs),
            ],
        }
    }

    pub fn tables(&self) -> &[ReportTable] {
        &self.tables
    }

    /// Reports with at least one row; empty reports are not offered for
    /// download.
    pub fn non_empty(&self) -> impl Iterator<Item = &ReportTable> {
        self.tables.iter().filter(|t| !t.is_empty())
    }

    pub fn get(&self, kind: ReportKind) -> &ReportTable {
        // `build` always produces one table per kind, in `ReportKind::ALL` order.
        let index = ReportKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        &self.tables[index]
    }
}
