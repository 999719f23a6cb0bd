use rust_decimal_macros::dec;
use tracing::info;

use super::aggregate::{SaleLine, b2c_delta};
use super::{Adapter, Context, Delta, first_sheet};
use crate::core::{
    Frame, IngestError, Platform, Workbook, canonicalize_state, normalize_hsn, round_rate,
};

const SHIP_TO_STATE: &str = "Ship To State";
const TAXABLE: &str = "Tax Exclusive Gross";
const CGST_RATE: &str = "Cgst Rate";
const SGST_RATE: &str = "Sgst Rate";
const IGST_RATE: &str = "Igst Rate";
const HSN: &str = "Hsn/sac";
const QUANTITY: &str = "Quantity";
const INVOICE_AMOUNT: &str = "Invoice Amount";

const REQUIRED: &[&str] = &[
    SHIP_TO_STATE,
    TAXABLE,
    CGST_RATE,
    SGST_RATE,
    IGST_RATE,
    HSN,
    QUANTITY,
    INVOICE_AMOUNT,
];

/// Amazon MTR (merchant tax report) B2C export.
///
/// Rates are stored as fractions per component (`0.09` CGST + `0.09` SGST),
/// so the slab is `round((cgst + sgst + igst) * 100)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Amazon;

impl Adapter for Amazon {
    type Input<'a> = Frame<'a>;

    fn platform(&self) -> Platform {
        Platform::Amazon
    }

    fn validate<'a>(&self, workbook: &'a Workbook) -> Result<Frame<'a>, IngestError> {
        first_sheet(workbook, REQUIRED)
    }

    fn transform(&self, frame: Frame<'_>, ctx: &Context) -> Result<Delta, IngestError> {
        let lines: Vec<SaleLine> = frame
            .rows()
            .map(|row| {
                let state = canonicalize_state(&row.text(SHIP_TO_STATE));
                let rate_sum =
                    row.number(CGST_RATE) + row.number(SGST_RATE) + row.number(IGST_RATE);
                let rate = round_rate(Some(rate_sum * dec!(100)));
                let taxable_value = row.number(TAXABLE);
                let tax = ctx
                    .splitter
                    .split(taxable_value, rate.into(), Some(&state));
                SaleLine {
                    state,
                    rate,
                    hsn: normalize_hsn(&row.text(HSN)),
                    quantity: row.number(QUANTITY),
                    invoice_amount: row.number(INVOICE_AMOUNT),
                    taxable_value,
                    tax,
                }
            })
            .collect();

        let delta = b2c_delta(self.platform(), lines, false)?;
        info!(
            b2cs = delta.b2cs.len(),
            hsn = delta.hsn.len(),
            "processed Amazon export"
        );
        Ok(delta)
    }
}
