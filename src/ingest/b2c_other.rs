use tracing::info;

use super::aggregate::{SaleLine, b2c_delta};
use super::{Adapter, Context, Delta, first_sheet};
use crate::core::{
    Frame, IngestError, Platform, TaxSplit, Workbook, canonicalize_state, normalize_hsn,
    round_rate_cell,
};

const PLACE_OF_SUPPLY: &str = "Place Of Supply";
const RATE: &str = "Rate";
const TAXABLE: &str = "Taxable Value";
const TOTAL_VALUE: &str = "Total Value";
const HSN: &str = "HSN";
const QUANTITY: &str = "Total Quantity";
const IGST: &str = "Integrated Tax Amount";
const CGST: &str = "Central Tax Amount";
const SGST: &str = "State/UT Tax Amount";
const CESS: &str = "Cess Amount";

const REQUIRED: &[&str] = &[
    PLACE_OF_SUPPLY,
    RATE,
    TAXABLE,
    TOTAL_VALUE,
    HSN,
    QUANTITY,
    IGST,
    CGST,
    SGST,
    CESS,
];

/// Generic B2C template for sales made outside the supported marketplaces.
/// Tax amounts are taken as entered.
#[derive(Debug, Clone, Copy, Default)]
pub struct B2cOther;

impl Adapter for B2cOther {
    type Input<'a> = Frame<'a>;

    fn platform(&self) -> Platform {
        Platform::B2cOther
    }

    fn validate<'a>(&self, workbook: &'a Workbook) -> Result<Frame<'a>, IngestError> {
        first_sheet(workbook, REQUIRED)
    }

    fn transform(&self, frame: Frame<'_>, _ctx: &Context) -> Result<Delta, IngestError> {
        let lines: Vec<SaleLine> = frame
            .rows()
            .map(|row| SaleLine {
                state: canonicalize_state(&row.text(PLACE_OF_SUPPLY)),
                rate: round_rate_cell(row.cell(RATE)),
                hsn: normalize_hsn(&row.text(HSN)),
                quantity: row.number(QUANTITY),
                invoice_amount: row.number(TOTAL_VALUE),
                taxable_value: row.number(TAXABLE),
                tax: TaxSplit {
                    igst: row.number(IGST),
                    cgst: row.number(CGST),
                    sgst: row.number(SGST),
                },
            })
            .collect();

        let delta = b2c_delta(self.platform(), lines, false)?;
        info!(
            b2cs = delta.b2cs.len(),
            hsn = delta.hsn.len(),
            "processed B2C template"
        );
        Ok(delta)
    }
}
