//! GST rate slab rounding and the numeric coercion policy.
//!
//! Marketplace exports are lenient about numbers: cells can be blank,
//! contain text such as `"NA"`, or store rates as fractions (`0.18`) or as
//! component percentages that have to be summed first. Every numeric cell
//! goes through [`coerce_numeric_or_default`], which never fails.
//!
//! Coerced amounts are bounded by [`MAX_AMOUNT`] so that rate, tax and
//! group arithmetic stays inside the `Decimal` range.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use super::table::Cell;

/// Largest magnitude a numeric cell may carry (10^15). Anything beyond it
/// is not a plausible amount, quantity or rate and coerces to 0.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Coerce a cell to a number. Blank, non-numeric, non-finite and
/// out-of-range values become 0.
///
/// Accepted text: optional surrounding whitespace, an optional sign, plain
/// decimals (`"1180"`, `"-12.50"`) and scientific notation (`"1.8e1"`).
/// Thousands separators are not accepted.
///
/// ```
/// use gstify::core::{Cell, coerce_numeric_or_default};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(coerce_numeric_or_default(&Cell::Text("1180".into())), dec!(1180));
/// assert_eq!(coerce_numeric_or_default(&Cell::Text("79228162514264337593543950335".into())), dec!(0));
/// ```
pub fn coerce_numeric_or_default(cell: &Cell) -> Decimal {
    numeric(cell).unwrap_or(Decimal::ZERO)
}

fn numeric(cell: &Cell) -> Option<Decimal> {
    let value = match cell {
        Cell::Empty => return None,
        Cell::Number(d) => *d,
        Cell::Text(s) => parse_decimal(s)?,
    };
    (value.abs() <= MAX_AMOUNT).then_some(value)
}

/// Parse a decimal number from text, if it is one.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.strip_prefix('+').unwrap_or(s);
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

/// Round a rate to its integer GST slab.
///
/// Uses round-half-up (`floor(x + 0.5)`), so `12.5` becomes `13`. Missing
/// input rounds to 0; values outside the `i32` range also yield 0.
///
/// ```
/// use gstify::core::round_rate;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_rate(Some(dec!(12.5))), 13);
/// assert_eq!(round_rate(Some(dec!(17.4))), 17);
/// assert_eq!(round_rate(None), 0);
/// ```
pub fn round_rate(rate: Option<Decimal>) -> i32 {
    match rate {
        Some(r) => r
            .checked_add(dec!(0.5))
            .and_then(|r| r.floor().to_i32())
            .unwrap_or(0),
        None => 0,
    }
}

/// Round a raw cell to its GST slab; unparsable cells give 0.
pub fn round_rate_cell(cell: &Cell) -> i32 {
    round_rate(numeric(cell))
}

/// Back-derive a slab from the tax actually charged: `tax / taxable * 100`,
/// rounded half to even. A zero taxable value, or a ratio outside the
/// `Decimal` range, gives 0.
///
/// ```
/// use gstify::core::effective_rate;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(effective_rate(dec!(25), dec!(200)), 12);
/// assert_eq!(effective_rate(dec!(27), dec!(200)), 14);
/// assert_eq!(effective_rate(dec!(10), dec!(0)), 0);
/// ```
pub fn effective_rate(tax: Decimal, taxable_value: Decimal) -> i32 {
    if taxable_value.is_zero() {
        return 0;
    }
    tax.checked_div(taxable_value)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .and_then(|pct| {
            pct.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
                .to_i32()
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_rounds_up() {
        assert_eq!(round_rate(Some(dec!(12.5))), 13);
        assert_eq!(round_rate(Some(dec!(0.5))), 1);
        assert_eq!(round_rate(Some(dec!(2.5))), 3);
    }

    #[test]
    fn below_half_rounds_down() {
        assert_eq!(round_rate(Some(dec!(17.4))), 17);
        assert_eq!(round_rate(Some(dec!(17.49999))), 17);
    }

    #[test]
    fn fractional_component_sum_hits_slab() {
        // Amazon stores CGST + SGST as fractions.
        let sum = (dec!(0.09) + dec!(0.09)) * dec!(100);
        assert_eq!(round_rate(Some(sum)), 18);
        let odd = (dec!(0.025) + dec!(0.025)) * dec!(100);
        assert_eq!(round_rate(Some(odd)), 5);
    }

    #[test]
    fn already_rounded_is_stable() {
        for slab in [0, 1, 3, 5, 12, 18, 28] {
            assert_eq!(round_rate(Some(Decimal::from(slab))), slab);
        }
    }

    #[test]
    fn negative_rates_floor() {
        assert_eq!(round_rate(Some(dec!(-3))), -3);
        assert_eq!(round_rate(Some(dec!(-2.5))), -2);
    }

    #[test]
    fn missing_and_garbage() {
        assert_eq!(round_rate(None), 0);
        assert_eq!(round_rate_cell(&Cell::Empty), 0);
        assert_eq!(round_rate_cell(&Cell::Text("NaN".into())), 0);
        assert_eq!(round_rate_cell(&Cell::Text("eighteen".into())), 0);
        assert_eq!(round_rate_cell(&Cell::Text(" 18.0 ".into())), 18);
    }

    #[test]
    fn coercion_defaults_to_zero() {
        assert_eq!(coerce_numeric_or_default(&Cell::Empty), dec!(0));
        assert_eq!(coerce_numeric_or_default(&Cell::Text("NA".into())), dec!(0));
        assert_eq!(coerce_numeric_or_default(&Cell::Text("1,000".into())), dec!(0));
        assert_eq!(coerce_numeric_or_default(&Cell::Text("inf".into())), dec!(0));
    }

    #[test]
    fn out_of_range_cells_coerce_to_zero() {
        let huge = Cell::Text("79228162514264337593543950335".into());
        assert_eq!(coerce_numeric_or_default(&huge), dec!(0));
        assert_eq!(coerce_numeric_or_default(&Cell::Text("-1e16".into())), dec!(0));
        assert_eq!(coerce_numeric_or_default(&Cell::Number(Decimal::MAX)), dec!(0));
        assert_eq!(coerce_numeric_or_default(&Cell::Number(MAX_AMOUNT)), MAX_AMOUNT);
        assert_eq!(round_rate_cell(&huge), 0);
        assert_eq!(round_rate(Some(Decimal::MAX)), 0);
    }

    #[test]
    fn effective_rate_rounds_half_to_even() {
        assert_eq!(effective_rate(dec!(25), dec!(200)), 12);
        assert_eq!(effective_rate(dec!(27), dec!(200)), 14);
        assert_eq!(effective_rate(dec!(36), dec!(200)), 18);
        assert_eq!(effective_rate(dec!(5), dec!(0)), 0);
        assert_eq!(effective_rate(MAX_AMOUNT, dec!(0.0000000000000000000000000001)), 0);
    }

    #[test]
    fn coercion_accepts_numbers() {
        assert_eq!(coerce_numeric_or_default(&Cell::Text(" 1180 ".into())), dec!(1180));
        assert_eq!(coerce_numeric_or_default(&Cell::Text("-12.50".into())), dec!(-12.50));
        assert_eq!(coerce_numeric_or_default(&Cell::Text("+7".into())), dec!(7));
        assert_eq!(coerce_numeric_or_default(&Cell::Text("1.8e1".into())), dec!(18));
        assert_eq!(coerce_numeric_or_default(&Cell::Number(dec!(0.18))), dec!(0.18));
    }
}
