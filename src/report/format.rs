use rust_decimal::Decimal;

use super::tcs::{NATURE_OF_SUPPLY, TcsRow};
use super::{ReportKind, ReportTable};
use crate::core::{B2bInvoiceRow, B2csRow, HsnB2bRow, HsnRow, INVOICE_DATE_FORMAT, UQC_PIECES};

/// B2CS supply type: "OE" (other than e-commerce).
pub const B2CS_TYPE: &str = "OE";

pub const B2CS_COLUMNS: &[&str] = &[
    "Type",
    "Place Of Supply",
    "Rate",
    "Applicable % of Tax Rate",
    "Taxable Value",
    "Cess Amount",
    "E-Commerce GSTIN",
];

pub const HSN_COLUMNS: &[&str] = &[
    "HSN",
    "Description",
    "UQC",
    "Total Quantity",
    "Total Value",
    "Taxable Value",
    "Integrated Tax Amount",
    "Central Tax Amount",
    "State/UT Tax Amount",
    "Cess amount",
    "Rate",
];

pub const B2B_COLUMNS: &[&str] = &[
    "GSTIN/UIN of Recipient",
    "Receiver Name",
    "Invoice Number",
    "Invoice Date",
    "Invoice Value",
    "Place Of Supply",
    "Reverse Charge",
    "Applicable % of Tax Rate",
    "Invoice Type",
    "E-Commerce GSTIN",
    "Rate",
    "Taxable Value",
    "Cess Amount",
];

pub const TCS_COLUMNS: &[&str] = &[
    "Nature of Supply",
    "GSTIN of E-Commerce Operator",
    "E-Commerce Operator Name",
    "Net value of supplies",
    "Integrated tax",
    "Central tax",
    "State/UT tax",
    "Cess",
];

/// Render an amount without trailing zeros; `-0` prints as `0`.
pub fn amount(value: Decimal) -> String {
    value.normalize().to_string()
}

const ZERO: &str = "0";

pub fn b2cs_report(rows: &[B2csRow]) -> ReportTable {
    ReportTable::new(
        ReportKind::B2cs,
        rows.iter()
            .map(|r| {
                vec![
                    B2CS_TYPE.to_string(),
                    r.state.to_string(),
                    r.rate.to_string(),
                    String::new(),
                    amount(r.taxable_value),
                    ZERO.to_string(),
                    String::new(),
                ]
            })
            .collect(),
    )
}

/// HSN summary of B2C supplies. Cess is not collected on these and is
/// reported as 0.
pub fn hsn_report(rows: &[HsnRow]) -> ReportTable {
    ReportTable::new(
        ReportKind::HsnB2c,
        rows.iter()
            .map(|r| {
                vec![
                    r.hsn.clone(),
                    String::new(),
                    UQC_PIECES.to_string(),
                    amount(r.quantity),
                    amount(r.invoice_amount),
                    amount(r.taxable_value),
                    amount(r.igst),
                    amount(r.cgst),
                    amount(r.sgst),
                    ZERO.to_string(),
                    r.rate.to_string(),
                ]
            })
            .collect(),
    )
}

pub fn b2b_report(rows: &[B2bInvoiceRow]) -> ReportTable {
    ReportTable::new(
        ReportKind::B2b,
        rows.iter()
            .map(|r| {
                vec![
                    r.recipient_gstin.clone(),
                    r.receiver_name.clone(),
                    r.invoice_number.clone(),
                    r.invoice_date.format(INVOICE_DATE_FORMAT).to_string(),
                    amount(r.invoice_value),
                    r.place_of_supply.to_string(),
                    r.reverse_charge.clone(),
                    r.applicable_tax_rate.clone(),
                    r.invoice_type.clone(),
                    r.ecommerce_gstin.clone(),
                    r.rate.to_string(),
                    amount(r.taxable_value),
                    amount(r.cess_amount),
                ]
            })
            .collect(),
    )
}

pub fn hsn_b2b_report(rows: &[HsnB2bRow]) -> ReportTable {
    ReportTable::new(
        ReportKind::HsnB2b,
        rows.iter()
            .map(|r| {
                vec![
                    r.hsn.clone(),
                    r.description.clone(),
                    r.uqc.clone(),
                    amount(r.total_quantity),
                    amount(r.total_value),
                    amount(r.taxable_value),
                    amount(r.integrated_tax),
                    amount(r.central_tax),
                    amount(r.state_tax),
                    ZERO.to_string(),
                    r.rate.to_string(),
                ]
            })
            .collect(),
    )
}

pub fn tcs_report(rows: &[TcsRow]) -> ReportTable {
    ReportTable::new(
        ReportKind::EcoTcs,
        rows.iter()
            .map(|r| {
                vec![
                    NATURE_OF_SUPPLY.to_string(),
                    r.gstin.clone(),
                    r.operator.name().to_string(),
                    amount(r.net_value),
                    amount(r.igst),
                    amount(r.cgst),
                    amount(r.sgst),
                    amount(r.cess),
                ]
            })
            .collect(),
    )
}
