use tracing::info;

use super::aggregate::{SaleLine, b2c_delta};
use super::{Adapter, Context, Delta, first_sheet};
use crate::core::{
    Frame, IngestError, Platform, TaxSplit, Workbook, canonicalize_state, normalize_hsn,
    round_rate,
};

const BILLING_STATE: &str = "Customer's Billing State";
const IGST_RATE: &str = "IGST Rate";
const CGST_RATE: &str = "CGST Rate";
const SGST_RATE: &str = "SGST Rate (or UTGST as applicable)";
const TAXABLE: &str = "Taxable Value (Final Invoice Amount -Taxes)";
const HSN: &str = "HSN Code";
const QUANTITY: &str = "Item Quantity";
const INVOICE_AMOUNT: &str = "Final Invoice Amount (Offer Price minus Seller Coupon Amount)";
const IGST_AMOUNT: &str = "IGST Amount";
const CGST_AMOUNT: &str = "CGST Amount";
const SGST_AMOUNT: &str = "SGST Amount (Or UTGST as applicable)";

const REQUIRED: &[&str] = &[
    BILLING_STATE,
    IGST_RATE,
    CGST_RATE,
    SGST_RATE,
    TAXABLE,
    HSN,
    QUANTITY,
    INVOICE_AMOUNT,
    IGST_AMOUNT,
    CGST_AMOUNT,
    SGST_AMOUNT,
];

/// Jiomart seller sales report.
///
/// Rates are already percentages. Tax amounts are taken from the export
/// itself rather than recomputed, since Jiomart reports what it charged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Jiomart;

impl Adapter for Jiomart {
    type Input<'a> = Frame<'a>;

    fn platform(&self) -> Platform {
        Platform::Jiomart
    }

    fn validate<'a>(&self, workbook: &'a Workbook) -> Result<Frame<'a>, IngestError> {
        first_sheet(workbook, REQUIRED)
    }

    fn transform(&self, frame: Frame<'_>, _ctx: &Context) -> Result<Delta, IngestError> {
        let lines: Vec<SaleLine> = frame
            .rows()
            .map(|row| {
                let rate_sum =
                    row.number(IGST_RATE) + row.number(CGST_RATE) + row.number(SGST_RATE);
                SaleLine {
                    state: canonicalize_state(&row.text(BILLING_STATE)),
                    rate: round_rate(Some(rate_sum)),
                    hsn: normalize_hsn(&row.text(HSN)),
                    quantity: row.number(QUANTITY),
                    invoice_amount: row.number(INVOICE_AMOUNT),
                    taxable_value: row.number(TAXABLE),
                    tax: TaxSplit {
                        igst: row.number(IGST_AMOUNT),
                        cgst: row.number(CGST_AMOUNT),
                        sgst: row.number(SGST_AMOUNT),
                    },
                }
            })
            .collect();

        let delta = b2c_delta(self.platform(), lines, false)?;
        info!(
            b2cs = delta.b2cs.len(),
            hsn = delta.hsn.len(),
            "processed Jiomart export"
        );
        Ok(delta)
    }
}
