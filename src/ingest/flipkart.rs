//! Flipkart GSTR-1 workbook.
//!
//! The export is a workbook with one sheet per GSTR-1 section:
//!
//! | sheet                        | contents                         |
//! |------------------------------|----------------------------------|
//! | `Section 7(A)(2) in GSTR-1`  | intra-state B2C supplies         |
//! | `Section 7(B)(2) in GSTR-1`  | inter-state B2C supplies         |
//! | `Section 12 in GSTR-1`       | HSN summary                      |
//!
//! Absent sheets are skipped. A present sheet with missing columns rejects
//! the whole workbook.

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::aggregate::{HsnLine, drop_zero_taxable, group_b2cs, group_hsn};
use super::{Adapter, Context, Delta};
use crate::core::{
    EmptyReason, Frame, IngestError, PlaceOfSupply, Platform, TaxSplit, Workbook,
    canonicalize_state, effective_rate, normalize_hsn, round_rate,
};

pub const INTRA_STATE_SHEET: &str = "Section 7(A)(2) in GSTR-1";
pub const INTER_STATE_SHEET: &str = "Section 7(B)(2) in GSTR-1";
pub const HSN_SHEET: &str = "Section 12 in GSTR-1";

const AGGREGATE_TAXABLE: &str = "Aggregate Taxable Value Rs.";
const CGST_PCT: &str = "CGST %";
const SGST_PCT: &str = "SGST/UT %";
const IGST_PCT: &str = "IGST %";
const DELIVERED_STATE: &str = "Delivered State (PoS)";

const HSN_NUMBER: &str = "HSN Number";
const HSN_QUANTITY: &str = "Total Quantity in Nos.";
const HSN_TAXABLE: &str = "Total Taxable Value Rs.";
const HSN_IGST: &str = "IGST Amount Rs.";
const HSN_CGST: &str = "CGST Amount Rs.";
const HSN_SGST: &str = "SGST Amount Rs.";

const INTRA_REQUIRED: &[&str] = &[AGGREGATE_TAXABLE, CGST_PCT, SGST_PCT];
const INTER_REQUIRED: &[&str] = &[AGGREGATE_TAXABLE, IGST_PCT, DELIVERED_STATE];
const HSN_REQUIRED: &[&str] = &[
    HSN_NUMBER,
    HSN_QUANTITY,
    HSN_TAXABLE,
    HSN_IGST,
    HSN_CGST,
    HSN_SGST,
];

/// The recognised sheets of a Flipkart workbook, each validated.
#[derive(Debug, Clone, Default)]
pub struct FlipkartSheets<'a> {
    pub intra_state: Option<Frame<'a>>,
    pub inter_state: Option<Frame<'a>>,
    pub hsn: Option<Frame<'a>>,
}

impl FlipkartSheets<'_> {
    pub fn is_empty(&self) -> bool {
        self.intra_state.is_none() && self.inter_state.is_none() && self.hsn.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Flipkart;

fn optional_sheet<'a>(
    workbook: &'a Workbook,
    name: &str,
    required: &[&str],
) -> Result<Option<Frame<'a>>, IngestError> {
    workbook
        .sheet(name)
        .map(|sheet| sheet.frame(required))
        .transpose()
}

impl Adapter for Flipkart {
    type Input<'a> = FlipkartSheets<'a>;

    fn platform(&self) -> Platform {
        Platform::Flipkart
    }

    fn validate<'a>(&self, workbook: &'a Workbook) -> Result<FlipkartSheets<'a>, IngestError> {
        Ok(FlipkartSheets {
            intra_state: optional_sheet(workbook, INTRA_STATE_SHEET, INTRA_REQUIRED)?,
            inter_state: optional_sheet(workbook, INTER_STATE_SHEET, INTER_REQUIRED)?,
            hsn: optional_sheet(workbook, HSN_SHEET, HSN_REQUIRED)?,
        })
    }

    fn transform(&self, sheets: FlipkartSheets<'_>, ctx: &Context) -> Result<Delta, IngestError> {
        if sheets.is_empty() {
            return Err(IngestError::Empty(EmptyReason::NoRecognisedSheets));
        }

        let mut b2cs_entries: Vec<(PlaceOfSupply, i32, Decimal)> = Vec::new();

        if let Some(frame) = &sheets.intra_state {
            let home = ctx.home_state.ok_or(IngestError::HomeStateRequired)?;
            b2cs_entries.extend(frame.rows().map(|row| {
                let rate = round_rate(Some(row.number(CGST_PCT) + row.number(SGST_PCT)));
                (PlaceOfSupply::Known(home), rate, row.number(AGGREGATE_TAXABLE))
            }));
        }

        if let Some(frame) = &sheets.inter_state {
            b2cs_entries.extend(frame.rows().map(|row| {
                (
                    canonicalize_state(&row.text(DELIVERED_STATE)),
                    round_rate(Some(row.number(IGST_PCT))),
                    row.number(AGGREGATE_TAXABLE),
                )
            }));
        }

        let hsn_lines: Vec<HsnLine> = sheets
            .hsn
            .as_ref()
            .map(|frame| frame.rows().map(|row| hsn_line(&row)).collect())
            .unwrap_or_default();

        let b2cs_entries = drop_zero_taxable(b2cs_entries, |e| e.2).unwrap_or_default();
        let hsn_lines = drop_zero_taxable(hsn_lines, |l| l.taxable_value).unwrap_or_default();
        if b2cs_entries.is_empty() && hsn_lines.is_empty() {
            return Err(IngestError::Empty(EmptyReason::ZeroTaxable));
        }

        debug!(
            intra = sheets.intra_state.is_some(),
            inter = sheets.inter_state.is_some(),
            hsn = sheets.hsn.is_some(),
            "Flipkart sheets present"
        );

        let delta = Delta {
            b2cs: group_b2cs(b2cs_entries),
            hsn: group_hsn(hsn_lines, self.platform()),
            ..Default::default()
        };
        info!(
            b2cs = delta.b2cs.len(),
            hsn = delta.hsn.len(),
            "processed Flipkart workbook"
        );
        Ok(delta)
    }
}

/// HSN summary line; the slab is derived from the tax actually charged.
fn hsn_line(row: &crate::core::FrameRow<'_>) -> HsnLine {
    let taxable_value = row.number(HSN_TAXABLE);
    let tax = TaxSplit {
        igst: row.number(HSN_IGST),
        cgst: row.number(HSN_CGST),
        sgst: row.number(HSN_SGST),
    };
    let rate = effective_rate(tax.total(), taxable_value);
    HsnLine {
        hsn: normalize_hsn(&row.text(HSN_NUMBER)),
        rate,
        quantity: row.number(HSN_QUANTITY),
        invoice_amount: taxable_value + tax.total(),
        taxable_value,
        tax,
    }
}
