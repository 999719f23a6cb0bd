//! Grouping shared by the adapters.
//!
//! Groups are keyed with `BTreeMap`, so output rows come out sorted by
//! their key: (state label, rate) for B2CS and (HSN, rate) for HSN tables.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use super::{Context, Delta};
use crate::core::{
    B2bInvoiceRow, B2bTaxMode, B2csRow, EmptyReason, HsnB2bRow, HsnRow, IngestError,
    PlaceOfSupply, Platform, TaxSplit, UQC_PIECES,
};

/// One B2C sale line after coercion, before grouping.
#[derive(Debug, Clone)]
pub(crate) struct SaleLine {
    pub state: PlaceOfSupply,
    pub rate: i32,
    pub hsn: String,
    pub quantity: Decimal,
    pub invoice_amount: Decimal,
    pub taxable_value: Decimal,
    pub tax: TaxSplit,
}

/// One HSN line (no destination state), before grouping.
#[derive(Debug, Clone)]
pub(crate) struct HsnLine {
    pub hsn: String,
    pub rate: i32,
    pub quantity: Decimal,
    pub invoice_amount: Decimal,
    pub taxable_value: Decimal,
    pub tax: TaxSplit,
}

impl From<&SaleLine> for HsnLine {
    fn from(line: &SaleLine) -> Self {
        Self {
            hsn: line.hsn.clone(),
            rate: line.rate,
            quantity: line.quantity,
            invoice_amount: line.invoice_amount,
            taxable_value: line.taxable_value,
            tax: line.tax,
        }
    }
}

#[derive(Debug, Default)]
struct HsnTotals {
    quantity: Decimal,
    invoice_amount: Decimal,
    taxable_value: Decimal,
    tax: TaxSplit,
}

/// Sum taxable value per (state, rate).
pub(crate) fn group_b2cs<I>(entries: I) -> Vec<B2csRow>
where
    I: IntoIterator<Item = (PlaceOfSupply, i32, Decimal)>,
{
    let mut groups: BTreeMap<(PlaceOfSupply, i32), Decimal> = BTreeMap::new();
    for (state, rate, taxable) in entries {
        *groups.entry((state, rate)).or_default() += taxable;
    }
    groups
        .into_iter()
        .map(|((state, rate), taxable_value)| B2csRow {
            state,
            rate,
            taxable_value,
        })
        .collect()
}

/// Sum quantities and amounts per (HSN, rate).
pub(crate) fn group_hsn<I>(lines: I, source: Platform) -> Vec<HsnRow>
where
    I: IntoIterator<Item = HsnLine>,
{
    let mut groups: BTreeMap<(String, i32), HsnTotals> = BTreeMap::new();
    for line in lines {
        let totals = groups.entry((line.hsn, line.rate)).or_default();
        totals.quantity += line.quantity;
        totals.invoice_amount += line.invoice_amount;
        totals.taxable_value += line.taxable_value;
        totals.tax.igst += line.tax.igst;
        totals.tax.cgst += line.tax.cgst;
        totals.tax.sgst += line.tax.sgst;
    }
    groups
        .into_iter()
        .map(|((hsn, rate), t)| HsnRow {
            hsn,
            rate,
            quantity: t.quantity,
            invoice_amount: t.invoice_amount,
            taxable_value: t.taxable_value,
            igst: t.tax.igst,
            cgst: t.tax.cgst,
            sgst: t.tax.sgst,
            source,
        })
        .collect()
}

/// Drop zero-taxable lines; fail with [`EmptyReason::ZeroTaxable`] when
/// nothing is left.
pub(crate) fn drop_zero_taxable<T>(
    lines: Vec<T>,
    taxable: impl Fn(&T) -> Decimal,
) -> Result<Vec<T>, IngestError> {
    let before = lines.len();
    let kept: Vec<T> = lines.into_iter().filter(|l| !taxable(l).is_zero()).collect();
    if kept.len() < before {
        debug!(dropped = before - kept.len(), "filtered zero taxable rows");
    }
    if kept.is_empty() {
        return Err(IngestError::Empty(EmptyReason::ZeroTaxable));
    }
    Ok(kept)
}

/// Filter, group and (for credit notes) negate B2C sale lines.
pub(crate) fn b2c_delta(
    source: Platform,
    lines: Vec<SaleLine>,
    negate: bool,
) -> Result<Delta, IngestError> {
    let lines = drop_zero_taxable(lines, |l| l.taxable_value)?;

    let mut b2cs = group_b2cs(lines.iter().map(|l| (l.state.clone(), l.rate, l.taxable_value)));
    let mut hsn = group_hsn(lines.iter().map(HsnLine::from), source);

    if negate {
        for row in &mut b2cs {
            row.taxable_value = -row.taxable_value;
        }
        hsn = hsn.into_iter().map(HsnRow::negated).collect();
    }

    Ok(Delta {
        b2cs,
        hsn,
        ..Default::default()
    })
}

/// One B2B invoice line with the fields only the HSN summary needs.
#[derive(Debug, Clone)]
pub(crate) struct B2bLine {
    pub invoice: B2bInvoiceRow,
    pub hsn: String,
    pub quantity: Decimal,
}

#[derive(Debug, Default)]
struct HsnB2bTotals {
    quantity: Decimal,
    total_value: Decimal,
    taxable_value: Decimal,
    cess: Decimal,
    tax: TaxSplit,
}

/// Tax on one B2B line under the configured apportioning mode.
fn b2b_tax(invoice: &B2bInvoiceRow, ctx: &Context) -> TaxSplit {
    let rate = Decimal::from(invoice.rate);
    match ctx.b2b_tax_mode {
        B2bTaxMode::IgstOnly => ctx.splitter.split(invoice.taxable_value, rate, None),
        B2bTaxMode::StateAware => {
            ctx.splitter
                .split(invoice.taxable_value, rate, Some(&invoice.place_of_supply))
        }
    }
}

/// Build the invoice register and its (HSN, rate) summary.
pub(crate) fn b2b_delta(
    source: Platform,
    lines: Vec<B2bLine>,
    dropped_rows: usize,
    ctx: &Context,
) -> Delta {
    let mut groups: BTreeMap<(String, i32), HsnB2bTotals> = BTreeMap::new();
    for line in &lines {
        let tax = b2b_tax(&line.invoice, ctx);
        let totals = groups
            .entry((line.hsn.clone(), line.invoice.rate))
            .or_default();
        totals.quantity += line.quantity;
        totals.total_value += line.invoice.invoice_value;
        totals.taxable_value += line.invoice.taxable_value;
        totals.cess += line.invoice.cess_amount;
        totals.tax.igst += tax.igst;
        totals.tax.cgst += tax.cgst;
        totals.tax.sgst += tax.sgst;
    }

    let hsn_b2b = groups
        .into_iter()
        .map(|((hsn, rate), t)| HsnB2bRow {
            hsn,
            description: String::new(),
            uqc: UQC_PIECES.to_string(),
            total_quantity: t.quantity,
            total_value: t.total_value,
            taxable_value: t.taxable_value,
            integrated_tax: t.tax.igst,
            central_tax: t.tax.cgst,
            state_tax: t.tax.sgst,
            cess_amount: t.cess,
            rate,
            source,
        })
        .collect();

    Delta {
        b2b: lines.into_iter().map(|l| l.invoice).collect(),
        hsn_b2b,
        dropped_rows,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::canonicalize_state;
    use rust_decimal_macros::dec;

    fn line(state: &str, rate: i32, hsn: &str, taxable: Decimal) -> SaleLine {
        SaleLine {
            state: canonicalize_state(state),
            rate,
            hsn: hsn.into(),
            quantity: dec!(1),
            invoice_amount: taxable,
            taxable_value: taxable,
            tax: TaxSplit {
                igst: taxable / dec!(10),
                ..Default::default()
            },
        }
    }

    #[test]
    fn groups_sum_and_sort() {
        let delta = b2c_delta(
            Platform::Amazon,
            vec![
                line("Kerala", 18, "6109", dec!(100)),
                line("Goa", 5, "6109", dec!(50)),
                line("kerala", 18, "1234", dec!(20)),
            ],
            false,
        )
        .unwrap();

        assert_eq!(delta.b2cs.len(), 2);
        assert_eq!(delta.b2cs[0].state.to_string(), "30-Goa");
        assert_eq!(delta.b2cs[1].taxable_value, dec!(120));

        assert_eq!(delta.hsn.len(), 3);
        assert_eq!(delta.hsn[0].hsn, "1234");
        assert!(delta.hsn.iter().all(|r| r.source == Platform::Amazon));
    }

    #[test]
    fn zero_taxable_lines_are_dropped() {
        let delta = b2c_delta(
            Platform::Glowroad,
            vec![line("Goa", 5, "1", dec!(0)), line("Goa", 5, "1", dec!(10))],
            false,
        )
        .unwrap();
        assert_eq!(delta.b2cs[0].taxable_value, dec!(10));
        assert_eq!(delta.hsn[0].quantity, dec!(1));
    }

    #[test]
    fn all_zero_is_empty_warning() {
        let err = b2c_delta(Platform::Amazon, vec![line("Goa", 5, "1", dec!(0))], false)
            .unwrap_err();
        assert_eq!(err, IngestError::Empty(EmptyReason::ZeroTaxable));
    }

    #[test]
    fn negation_applies_to_both_tables() {
        let delta = b2c_delta(
            Platform::MeeshoReturn,
            vec![line("Goa", 5, "1", dec!(100))],
            true,
        )
        .unwrap();
        assert_eq!(delta.b2cs[0].taxable_value, dec!(-100));
        assert_eq!(delta.hsn[0].igst, dec!(-10));
        assert_eq!(delta.hsn[0].quantity, dec!(-1));
    }
}
