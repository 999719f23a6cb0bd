//! B2B invoice registers: the generic B2B template and Amazon's B2B report.
//!
//! Only lines with a strictly positive taxable value and a parsable
//! invoice date are kept. Lines dropped for their date are counted and
//! logged; the file is only reported empty if no line survives.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, warn};

use super::aggregate::{B2bLine, b2b_delta};
use super::{Adapter, Context, Delta, first_sheet};
use crate::core::{
    B2bInvoiceRow, EmptyReason, Frame, FrameRow, IngestError, Platform, REVERSE_CHARGE_NO,
    Workbook, canonicalize_state, normalize_hsn, parse_invoice_date, round_rate,
    round_rate_cell,
};

/// Invoice type printed for lines from the B2B template.
pub const INVOICE_TYPE_REGULAR: &str = "Regular";
/// Invoice type printed for lines from Amazon's B2B report.
pub const INVOICE_TYPE_REGULAR_B2B: &str = "Regular B2B";

/// Column layout of one B2B source, and how to read a row from it.
trait B2bSource {
    const PLATFORM: Platform;
    const REQUIRED: &'static [&'static str];
    const TAXABLE: &'static str;
    const INVOICE_DATE: &'static str;

    /// Build a line from a row whose taxable value and date were checked.
    fn line(row: &FrameRow<'_>, invoice_date: chrono::NaiveDate) -> B2bLine;
}

fn process_b2b<S: B2bSource>(frame: Frame<'_>, ctx: &Context) -> Result<Delta, IngestError> {
    let positive: Vec<FrameRow<'_>> = frame
        .rows()
        .filter(|row| row.number(S::TAXABLE) > Decimal::ZERO)
        .collect();
    if positive.is_empty() {
        return Err(IngestError::Empty(EmptyReason::NoPositiveTaxable));
    }

    let mut dropped = 0usize;
    let lines: Vec<B2bLine> = positive
        .iter()
        .filter_map(|row| match parse_invoice_date(row.cell(S::INVOICE_DATE)) {
            Some(date) => Some(S::line(row, date)),
            None => {
                dropped += 1;
                None
            }
        })
        .collect();

    if dropped > 0 {
        warn!(
            platform = %S::PLATFORM,
            dropped,
            "dropped rows with unparsable invoice dates"
        );
    }
    if lines.is_empty() {
        return Err(IngestError::Empty(EmptyReason::NoValidInvoiceDates));
    }

    let delta = b2b_delta(S::PLATFORM, lines, dropped, ctx);
    info!(
        platform = %S::PLATFORM,
        invoices = delta.b2b.len(),
        hsn = delta.hsn_b2b.len(),
        "processed B2B register"
    );
    Ok(delta)
}

/// Generic B2B invoice template.
#[derive(Debug, Clone, Copy, Default)]
pub struct B2bTemplate;

mod template {
    pub const GSTIN: &str = "GSTIN/UIN of Recipient";
    pub const RECEIVER: &str = "Receiver Name";
    pub const INVOICE_NUMBER: &str = "Invoice Number";
    pub const INVOICE_DATE: &str = "Invoice Date";
    pub const INVOICE_VALUE: &str = "Invoice Value";
    pub const PLACE_OF_SUPPLY: &str = "Place Of Supply";
    pub const RATE: &str = "Total Rate";
    pub const TAXABLE: &str = "Taxable Value";
    pub const CESS: &str = "Cess Amount";
    pub const HSN: &str = "HSN";
    pub const QUANTITY: &str = "Total Quantity";
}

impl B2bSource for B2bTemplate {
    const PLATFORM: Platform = Platform::B2bTemplate;
    const REQUIRED: &'static [&'static str] = &[
        template::GSTIN,
        template::RECEIVER,
        template::INVOICE_NUMBER,
        template::INVOICE_DATE,
        template::INVOICE_VALUE,
        template::PLACE_OF_SUPPLY,
        template::RATE,
        template::TAXABLE,
        template::CESS,
        template::HSN,
        template::QUANTITY,
    ];
    const TAXABLE: &'static str = template::TAXABLE;
    const INVOICE_DATE: &'static str = template::INVOICE_DATE;

    fn line(row: &FrameRow<'_>, invoice_date: chrono::NaiveDate) -> B2bLine {
        B2bLine {
            invoice: B2bInvoiceRow {
                recipient_gstin: row.text(template::GSTIN),
                receiver_name: row.text(template::RECEIVER),
                invoice_number: row.text(template::INVOICE_NUMBER),
                invoice_date,
                invoice_value: row.number(template::INVOICE_VALUE),
                place_of_supply: canonicalize_state(&row.text(template::PLACE_OF_SUPPLY)),
                reverse_charge: REVERSE_CHARGE_NO.to_string(),
                applicable_tax_rate: String::new(),
                invoice_type: INVOICE_TYPE_REGULAR.to_string(),
                ecommerce_gstin: String::new(),
                rate: round_rate_cell(row.cell(template::RATE)),
                taxable_value: row.number(template::TAXABLE),
                cess_amount: row.number(template::CESS),
                source: Self::PLATFORM,
            },
            hsn: normalize_hsn(&row.text(template::HSN)),
            quantity: row.number(template::QUANTITY),
        }
    }
}

impl Adapter for B2bTemplate {
    type Input<'a> = Frame<'a>;

    fn platform(&self) -> Platform {
        <Self as B2bSource>::PLATFORM
    }

    fn validate<'a>(&self, workbook: &'a Workbook) -> Result<Frame<'a>, IngestError> {
        first_sheet(workbook, <Self as B2bSource>::REQUIRED)
    }

    fn transform(&self, frame: Frame<'_>, ctx: &Context) -> Result<Delta, IngestError> {
        process_b2b::<Self>(frame, ctx)
    }
}

/// Amazon B2B report. Rates are stored as fractions per component.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmazonB2b;

mod amazon {
    pub const GSTIN: &str = "Customer Bill To Gstid";
    pub const BUYER: &str = "Buyer Name";
    pub const INVOICE_NUMBER: &str = "Invoice Number";
    pub const INVOICE_DATE: &str = "Invoice Date";
    pub const INVOICE_AMOUNT: &str = "Invoice Amount";
    pub const SHIP_TO_STATE: &str = "Ship To State";
    pub const CGST_RATE: &str = "Cgst Rate";
    pub const SGST_RATE: &str = "Sgst Rate";
    pub const UTGST_RATE: &str = "Utgst Rate";
    pub const IGST_RATE: &str = "Igst Rate";
    pub const TAXABLE: &str = "Tax Exclusive Gross";
    pub const CESS: &str = "Compensatory Cess Rate";
    pub const HSN: &str = "Hsn/sac";
    pub const QUANTITY: &str = "Quantity";
}

impl B2bSource for AmazonB2b {
    const PLATFORM: Platform = Platform::AmazonB2b;
    const REQUIRED: &'static [&'static str] = &[
        amazon::GSTIN,
        amazon::BUYER,
        amazon::INVOICE_NUMBER,
        amazon::INVOICE_DATE,
        amazon::INVOICE_AMOUNT,
        amazon::SHIP_TO_STATE,
        amazon::CGST_RATE,
        amazon::SGST_RATE,
        amazon::UTGST_RATE,
        amazon::IGST_RATE,
        amazon::TAXABLE,
        amazon::CESS,
        amazon::HSN,
        amazon::QUANTITY,
    ];
    const TAXABLE: &'static str = amazon::TAXABLE;
    const INVOICE_DATE: &'static str = amazon::INVOICE_DATE;

    fn line(row: &FrameRow<'_>, invoice_date: chrono::NaiveDate) -> B2bLine {
        let rate_sum = row.number(amazon::CGST_RATE)
            + row.number(amazon::SGST_RATE)
            + row.number(amazon::UTGST_RATE)
            + row.number(amazon::IGST_RATE);
        B2bLine {
            invoice: B2bInvoiceRow {
                recipient_gstin: row.text(amazon::GSTIN),
                receiver_name: row.text(amazon::BUYER),
                invoice_number: row.text(amazon::INVOICE_NUMBER),
                invoice_date,
                invoice_value: row.number(amazon::INVOICE_AMOUNT),
                place_of_supply: canonicalize_state(&row.text(amazon::SHIP_TO_STATE)),
                reverse_charge: REVERSE_CHARGE_NO.to_string(),
                applicable_tax_rate: String::new(),
                invoice_type: INVOICE_TYPE_REGULAR_B2B.to_string(),
                ecommerce_gstin: String::new(),
                rate: round_rate(Some(rate_sum * dec!(100))),
                taxable_value: row.number(amazon::TAXABLE),
                cess_amount: row.number(amazon::CESS),
                source: Self::PLATFORM,
            },
            hsn: normalize_hsn(&row.text(amazon::HSN)),
            quantity: row.number(amazon::QUANTITY),
        }
    }
}

impl Adapter for AmazonB2b {
    type Input<'a> = Frame<'a>;

    fn platform(&self) -> Platform {
        <Self as B2bSource>::PLATFORM
    }

    fn validate<'a>(&self, workbook: &'a Workbook) -> Result<Frame<'a>, IngestError> {
        first_sheet(workbook, <Self as B2bSource>::REQUIRED)
    }

    fn transform(&self, frame: Frame<'_>, ctx: &Context) -> Result<Delta, IngestError> {
        process_b2b::<Self>(frame, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{B2bTaxMode, BusinessConfigBuilder, RawTable, StateCode};
    use chrono::NaiveDate;

    fn ctx(mode: B2bTaxMode) -> Context {
        Context::new(
            &BusinessConfigBuilder::new(StateCode::MadhyaPradesh)
                .b2b_tax_mode(mode)
                .build()
                .unwrap(),
        )
    }

    fn template_rows(rows: Vec<Vec<&str>>) -> Workbook {
        RawTable::from_rows("b2b", <B2bTemplate as B2bSource>::REQUIRED, rows).into()
    }

    #[test]
    fn template_keeps_dated_positive_lines() {
        let wb = template_rows(vec![
            vec!["23ABCDE1234F1Z5", "Acme", "INV-1", "15-03-2023", "1180", "madhya pradesh", "18", "1000", "0", "8471.0", "2"],
            vec!["27ABCDE1234F1Z5", "Beta", "INV-2", "not a date", "590", "Maharashtra", "18", "500", "0", "8471", "1"],
            vec!["27ABCDE1234F1Z5", "Beta", "INV-3", "2023-03-16", "0", "Maharashtra", "18", "0", "0", "8471", "1"],
        ]);
        let delta = B2bTemplate.process(&wb, &ctx(B2bTaxMode::IgstOnly)).unwrap();

        assert_eq!(delta.b2b.len(), 1);
        assert_eq!(delta.dropped_rows, 1);
        let inv = &delta.b2b[0];
        assert_eq!(inv.invoice_date, NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
        assert_eq!(inv.place_of_supply.to_string(), "23-Madhya Pradesh");
        assert_eq!(inv.invoice_type, "Regular");
        assert_eq!(inv.reverse_charge, "N");

        let hsn = &delta.hsn_b2b[0];
        assert_eq!(hsn.hsn, "8471");
        assert_eq!(hsn.uqc, "PCS-PIECES");
        assert_eq!(hsn.integrated_tax, dec!(180));
        assert_eq!(hsn.central_tax, dec!(0));
    }

    #[test]
    fn state_aware_mode_splits_intra_state() {
        let wb = template_rows(vec![vec![
            "23ABCDE1234F1Z5", "Acme", "INV-1", "15-03-2023", "1180", "Madhya Pradesh", "18", "1000", "0", "8471", "2",
        ]]);
        let delta = B2bTemplate.process(&wb, &ctx(B2bTaxMode::StateAware)).unwrap();
        let hsn = &delta.hsn_b2b[0];
        assert_eq!(hsn.integrated_tax, dec!(0));
        assert_eq!(hsn.central_tax, dec!(90));
        assert_eq!(hsn.state_tax, dec!(90));
    }

    #[test]
    fn no_positive_taxable_warns() {
        let wb = template_rows(vec![vec![
            "X", "Y", "1", "15-03-2023", "0", "Goa", "5", "-10", "0", "1", "1",
        ]]);
        assert_eq!(
            B2bTemplate.process(&wb, &ctx(B2bTaxMode::IgstOnly)).unwrap_err(),
            IngestError::Empty(EmptyReason::NoPositiveTaxable)
        );
    }

    #[test]
    fn no_valid_dates_warns() {
        let wb = template_rows(vec![vec![
            "X", "Y", "1", "someday", "105", "Goa", "5", "100", "0", "1", "1",
        ]]);
        assert_eq!(
            B2bTemplate.process(&wb, &ctx(B2bTaxMode::IgstOnly)).unwrap_err(),
            IngestError::Empty(EmptyReason::NoValidInvoiceDates)
        );
    }

    #[test]
    fn amazon_b2b_register() {
        let wb: Workbook = RawTable::from_rows(
            "b2b",
            <AmazonB2b as B2bSource>::REQUIRED,
            vec![vec![
                "29AAACB1234C1Z1", "Buyer Co", "AMZ-9", "2023-04-01 10:15:00", "1180",
                "KARNATAKA", "0", "0", "0", "0.18", "1000", "12", "6109.0", "3",
            ]],
        )
        .into();
        let delta = AmazonB2b.process(&wb, &ctx(B2bTaxMode::IgstOnly)).unwrap();

        let inv = &delta.b2b[0];
        assert_eq!(inv.rate, 18);
        assert_eq!(inv.invoice_type, "Regular B2B");
        assert_eq!(inv.cess_amount, dec!(12));
        assert_eq!(inv.source, Platform::AmazonB2b);
        assert_eq!(inv.invoice_date, NaiveDate::from_ymd_opt(2023, 4, 1).unwrap());

        let hsn = &delta.hsn_b2b[0];
        assert_eq!(hsn.total_quantity, dec!(3));
        assert_eq!(hsn.total_value, dec!(1180));
        assert_eq!(hsn.cess_amount, dec!(12));
        assert_eq!(hsn.source, Platform::AmazonB2b);
    }
}
