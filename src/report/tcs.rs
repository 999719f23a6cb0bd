use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::{BusinessConfig, HsnB2bRow, HsnRow, Operator};

/// Fixed "Nature of Supply" text on the TCS summary.
pub const NATURE_OF_SUPPLY: &str = "Liable to collect tax u/s 52(TCS)";

/// One operator line of the e-commerce TCS summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TcsRow {
    pub operator: Operator,
    pub gstin: String,
    pub net_value: Decimal,
    pub igst: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub cess: Decimal,
}

impl TcsRow {
    fn new(operator: Operator, gstin: &str) -> Self {
        Self {
            operator,
            gstin: gstin.to_string(),
            net_value: Decimal::ZERO,
            igst: Decimal::ZERO,
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
            cess: Decimal::ZERO,
        }
    }

    fn has_totals(&self) -> bool {
        [self.net_value, self.igst, self.cgst, self.sgst]
            .iter()
            .any(|v| !v.is_zero())
    }
}

/// Sum supplies per e-commerce operator.
///
/// `hsn` and `hsn_b2b` must be the ungrouped compiled rows so each still
/// carries its source platform. Amazon collects both its B2C and B2B
/// platforms; Meesho nets sales against returns. An operator is listed
/// only if it has a configured GSTIN or a non-zero total.
///
/// ```
/// use gstify::core::{BusinessConfigBuilder, HsnRow, Operator, Platform, StateCode};
/// use gstify::report::build_eco_tcs;
/// use rust_decimal_macros::dec;
///
/// let sale = HsnRow {
///     hsn: "6109".into(), rate: 5, quantity: dec!(1), invoice_amount: dec!(105),
///     taxable_value: dec!(100), igst: dec!(5), cgst: dec!(0), sgst: dec!(0),
///     source: Platform::Glowroad,
/// };
/// let config = BusinessConfigBuilder::new(StateCode::Delhi)
///     .gstin(Operator::Amazon, "07AAICA3918J1CV")
///     .build()
///     .unwrap();
///
/// let rows = build_eco_tcs(&[sale], &[], &config);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].operator, Operator::Amazon);
/// assert_eq!(rows[1].net_value, dec!(100));
/// ```
pub fn build_eco_tcs(hsn: &[HsnRow], hsn_b2b: &[HsnB2bRow], config: &BusinessConfig) -> Vec<TcsRow> {
    Operator::ALL
        .into_iter()
        .map(|operator| {
            let mut row = TcsRow::new(operator, config.gstin(operator));
            for r in hsn.iter().filter(|r| r.source.operator() == Some(operator)) {
                row.net_value += r.taxable_value;
                row.igst += r.igst;
                row.cgst += r.cgst;
                row.sgst += r.sgst;
            }
            for r in hsn_b2b.iter().filter(|r| r.source.operator() == Some(operator)) {
                row.net_value += r.taxable_value;
                row.igst += r.integrated_tax;
                row.cgst += r.central_tax;
                row.sgst += r.state_tax;
            }
            row
        })
        .filter(|row| !row.gstin.is_empty() || row.has_totals())
        .collect()
}
