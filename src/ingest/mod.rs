//! Platform adapters: marketplace exports in, canonical GST rows out.
//!
//! Every adapter follows the same two steps:
//!
//! 1. [`Adapter::validate`] checks that the required columns (and, for
//!    Flipkart, sheets) are present. A missing column rejects the whole
//!    file; nothing is partially ingested.
//! 2. [`Adapter::transform`] coerces cells, derives the GST slab, splits
//!    tax and aggregates into a [`Delta`].
//!
//! Adapters are pure: they never touch the session store. See
//! [`crate::store::Session`] for duplicate detection and accumulation.
//!
//! # Example
//!
//! ```
//! use gstify::core::*;
//! use gstify::ingest::{self, Context};
//! use rust_decimal_macros::dec;
//!
//! let sheet = RawTable::from_rows(
//!     "orders",
//!     &["Ship To State", "Tax Exclusive Gross", "Cgst Rate", "Sgst Rate",
//!       "Igst Rate", "Hsn/sac", "Quantity", "Invoice Amount"],
//!     vec![vec!["Maharashtra", "1000", "0.09", "0.09", "0", "1234.0", "2", "1180"]],
//! );
//! let config = BusinessConfigBuilder::new(StateCode::Maharashtra).build().unwrap();
//! let delta = ingest::run(Platform::Amazon, &sheet.into(), &Context::new(&config)).unwrap();
//!
//! assert_eq!(delta.b2cs[0].rate, 18);
//! assert_eq!(delta.hsn[0].cgst, dec!(90));
//! ```

mod aggregate;
mod amazon;
mod b2b;
mod b2c_other;
mod flipkart;
mod glowroad;
mod jiomart;
mod meesho;

use crate::core::{
    B2bInvoiceRow, B2bTaxMode, B2csRow, BusinessConfig, Frame, HsnB2bRow, HsnRow, IngestError,
    Platform, RawTable, StateCode, TaxSplitter, Workbook,
};

pub use amazon::Amazon;
pub use b2b::{AmazonB2b, B2bTemplate};
pub use b2c_other::B2cOther;
pub use flipkart::{Flipkart, FlipkartSheets, HSN_SHEET, INTER_STATE_SHEET, INTRA_STATE_SHEET};
pub use glowroad::Glowroad;
pub use jiomart::Jiomart;
pub use meesho::Meesho;

/// Shared collaborators handed to every adapter.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub splitter: TaxSplitter,
    pub home_state: Option<StateCode>,
    pub b2b_tax_mode: B2bTaxMode,
}

impl Context {
    pub fn new(config: &BusinessConfig) -> Self {
        Self {
            splitter: config.splitter(),
            home_state: config.home_state,
            b2b_tax_mode: config.b2b_tax_mode,
        }
    }
}

/// Canonical rows produced from one uploaded file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Delta {
    pub b2cs: Vec<B2csRow>,
    pub hsn: Vec<HsnRow>,
    pub b2b: Vec<B2bInvoiceRow>,
    pub hsn_b2b: Vec<HsnB2bRow>,
    /// Rows dropped because their invoice date could not be parsed.
    pub dropped_rows: usize,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.b2cs.is_empty() && self.hsn.is_empty() && self.b2b.is_empty() && self.hsn_b2b.is_empty()
    }

    /// Number of canonical rows across all four outputs.
    pub fn row_count(&self) -> usize {
        self.b2cs.len() + self.hsn.len() + self.b2b.len() + self.hsn_b2b.len()
    }
}

/// A marketplace export format.
pub trait Adapter {
    /// Validated view over the uploaded workbook.
    type Input<'a>;

    fn platform(&self) -> Platform;

    /// Check the workbook's schema; reject with the full list of missing
    /// columns.
    fn validate<'a>(&self, workbook: &'a Workbook) -> Result<Self::Input<'a>, IngestError>;

    /// Coerce, derive and aggregate validated rows.
    fn transform(&self, input: Self::Input<'_>, ctx: &Context) -> Result<Delta, IngestError>;

    /// Validate then transform.
    fn process(&self, workbook: &Workbook, ctx: &Context) -> Result<Delta, IngestError> {
        let input = self.validate(workbook)?;
        self.transform(input, ctx)
    }
}

/// Process `workbook` with the adapter for `platform`.
pub fn run(platform: Platform, workbook: &Workbook, ctx: &Context) -> Result<Delta, IngestError> {
    match platform {
        Platform::Amazon => Amazon.process(workbook, ctx),
        Platform::Flipkart => Flipkart.process(workbook, ctx),
        Platform::Jiomart => Jiomart.process(workbook, ctx),
        Platform::MeeshoSales => Meesho::sales().process(workbook, ctx),
        Platform::MeeshoReturn => Meesho::returns().process(workbook, ctx),
        Platform::Glowroad => Glowroad.process(workbook, ctx),
        Platform::B2cOther => B2cOther.process(workbook, ctx),
        Platform::B2bTemplate => B2bTemplate.process(workbook, ctx),
        Platform::AmazonB2b => AmazonB2b.process(workbook, ctx),
    }
}

static NO_SHEET: RawTable = RawTable {
    name: String::new(),
    columns: Vec::new(),
    rows: Vec::new(),
};

/// Validate the first sheet of a single-table export.
pub(crate) fn first_sheet<'a>(
    workbook: &'a Workbook,
    required: &[&str],
) -> Result<Frame<'a>, IngestError> {
    workbook.first().unwrap_or(&NO_SHEET).frame(required)
}
