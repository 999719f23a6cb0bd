use tracing::info;

use super::aggregate::{SaleLine, b2c_delta};
use super::{Adapter, Context, Delta, first_sheet};
use crate::core::{
    Frame, IngestError, Platform, Workbook, canonicalize_state, normalize_hsn, round_rate_cell,
};

const STATE: &str = "end_customer_state_new";
const GST_RATE: &str = "gst_rate";
const TAXABLE: &str = "total_taxable_sale_value";
const HSN: &str = "hsn_code";
const QUANTITY: &str = "quantity";
const INVOICE_VALUE: &str = "total_invoice_value";

const REQUIRED: &[&str] = &[STATE, GST_RATE, TAXABLE, HSN, QUANTITY, INVOICE_VALUE];

/// Meesho GST report. Sales and returns share one layout; a returns
/// report is ingested as credit notes with every aggregate negated.
#[derive(Debug, Clone, Copy)]
pub struct Meesho {
    returns: bool,
}

impl Meesho {
    pub fn sales() -> Self {
        Self { returns: false }
    }

    pub fn returns() -> Self {
        Self { returns: true }
    }
}

impl Adapter for Meesho {
    type Input<'a> = Frame<'a>;

    fn platform(&self) -> Platform {
        if self.returns {
            Platform::MeeshoReturn
        } else {
            Platform::MeeshoSales
        }
    }

    fn validate<'a>(&self, workbook: &'a Workbook) -> Result<Frame<'a>, IngestError> {
        first_sheet(workbook, REQUIRED)
    }

    fn transform(&self, frame: Frame<'_>, ctx: &Context) -> Result<Delta, IngestError> {
        let lines: Vec<SaleLine> = frame
            .rows()
            .map(|row| {
                let state = canonicalize_state(&row.text(STATE));
                let rate = round_rate_cell(row.cell(GST_RATE));
                let taxable_value = row.number(TAXABLE);
                let tax = ctx.splitter.split(taxable_value, rate.into(), Some(&state));
                SaleLine {
                    state,
                    rate,
                    hsn: normalize_hsn(&row.text(HSN)),
                    quantity: row.number(QUANTITY),
                    invoice_amount: row.number(INVOICE_VALUE),
                    taxable_value,
                    tax,
                }
            })
            .collect();

        let delta = b2c_delta(self.platform(), lines, self.returns)?;
        info!(
            platform = %self.platform(),
            b2cs = delta.b2cs.len(),
            hsn = delta.hsn.len(),
            "processed Meesho export"
        );
        Ok(delta)
    }
}
