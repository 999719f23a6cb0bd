use rust_decimal_macros::dec;
use tracing::info;

use super::aggregate::{SaleLine, b2c_delta};
use super::{Adapter, Context, Delta, first_sheet};
use crate::core::{
    Frame, IngestError, Platform, Workbook, canonicalize_state, normalize_hsn, round_rate_cell,
};

// The trailing space is part of Glowroad's header.
const TAXABLE: &str = "Base amount for GST ";
const BUYER_STATE: &str = "Buyer state";
const GST_RATE: &str = "GST %";
const HSN: &str = "Product HSN code";
const SGST: &str = "SGST";
const UTGST: &str = "UTGST";
const CGST: &str = "CGST";
const IGST: &str = "IGST";
const INVOICE_VALUE: &str = "Customer invoice value (GMV)";

const REQUIRED: &[&str] = &[
    TAXABLE,
    BUYER_STATE,
    GST_RATE,
    HSN,
    SGST,
    UTGST,
    CGST,
    IGST,
    INVOICE_VALUE,
];

/// Glowroad order report. One row is one unit sold; tax is recomputed
/// from the slab and the buyer's state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Glowroad;

/// Glowroad HSN codes can carry thousands separators and stray dots.
fn glowroad_hsn(raw: &str) -> String {
    normalize_hsn(raw).replace(['.', ','], "")
}

impl Adapter for Glowroad {
    type Input<'a> = Frame<'a>;

    fn platform(&self) -> Platform {
        Platform::Glowroad
    }

    fn validate<'a>(&self, workbook: &'a Workbook) -> Result<Frame<'a>, IngestError> {
        first_sheet(workbook, REQUIRED)
    }

    fn transform(&self, frame: Frame<'_>, ctx: &Context) -> Result<Delta, IngestError> {
        let lines: Vec<SaleLine> = frame
            .rows()
            .map(|row| {
                let state = canonicalize_state(&row.text(BUYER_STATE));
                let rate = round_rate_cell(row.cell(GST_RATE));
                let taxable_value = row.number(TAXABLE);
                let tax = ctx.splitter.split(taxable_value, rate.into(), Some(&state));
                SaleLine {
                    state,
                    rate,
                    hsn: glowroad_hsn(&row.text(HSN)),
                    quantity: dec!(1),
                    invoice_amount: row.number(INVOICE_VALUE),
                    taxable_value,
                    tax,
                }
            })
            .collect();

        let delta = b2c_delta(self.platform(), lines, false)?;
        info!(
            b2cs = delta.b2cs.len(),
            hsn = delta.hsn.len(),
            "processed Glowroad export"
        );
        Ok(delta)
    }
}
