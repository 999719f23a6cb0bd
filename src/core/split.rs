//! Intra-state / inter-state split of GST into IGST, CGST and SGST.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::states::{PlaceOfSupply, StateCode};

/// Tax amounts produced by [`TaxSplitter::split`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSplit {
    pub igst: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
}

impl TaxSplit {
    pub fn total(&self) -> Decimal {
        self.igst + self.cgst + self.sgst
    }
}

/// Splits tax according to whether the supply stays within the business'
/// home state.
///
/// - destination == home state: CGST = SGST = tax / 2, IGST = 0
/// - any other destination: IGST = tax
/// - no destination, or no home state configured: IGST = tax
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxSplitter {
    home: Option<StateCode>,
}

impl TaxSplitter {
    pub fn new(home: Option<StateCode>) -> Self {
        Self { home }
    }

    pub fn home(&self) -> Option<StateCode> {
        self.home
    }

    /// Whether a supply to `destination` is intra-state.
    pub fn is_intra_state(&self, destination: &PlaceOfSupply) -> bool {
        match (self.home, destination) {
            (Some(home), PlaceOfSupply::Known(dest)) => home == *dest,
            _ => false,
        }
    }

    /// Split the tax on `taxable_value` at `rate` percent.
    ///
    /// A product outside the `Decimal` range carries no tax.
    ///
    /// ```
    /// use gstify::core::{canonicalize_state, StateCode, TaxSplitter};
    /// use rust_decimal_macros::dec;
    ///
    /// let splitter = TaxSplitter::new(Some(StateCode::Maharashtra));
    /// let intra = splitter.split(dec!(1000), dec!(18), Some(&canonicalize_state("maharashtra")));
    /// assert_eq!((intra.igst, intra.cgst, intra.sgst), (dec!(0), dec!(90), dec!(90)));
    ///
    /// let inter = splitter.split(dec!(1000), dec!(18), Some(&canonicalize_state("Goa")));
    /// assert_eq!((inter.igst, inter.cgst, inter.sgst), (dec!(180), dec!(0), dec!(0)));
    /// ```
    pub fn split(
        &self,
        taxable_value: Decimal,
        rate: Decimal,
        destination: Option<&PlaceOfSupply>,
    ) -> TaxSplit {
        let tax = taxable_value
            .checked_mul(rate)
            .and_then(|t| t.checked_div(dec!(100)))
            .unwrap_or(Decimal::ZERO);
        match destination {
            Some(dest) if self.is_intra_state(dest) => {
                let half = tax / dec!(2);
                TaxSplit {
                    igst: Decimal::ZERO,
                    cgst: half,
                    sgst: half,
                }
            }
            _ => TaxSplit {
                igst: tax,
                cgst: Decimal::ZERO,
                sgst: Decimal::ZERO,
            },
        }
    }
}
