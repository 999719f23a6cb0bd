#![cfg(feature = "core")]

use gstify::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// State Code Table
// ---------------------------------------------------------------------------

#[test]
fn canonicalization_ignores_case_and_spelling() {
    let expected = PlaceOfSupply::Known(StateCode::Chhattisgarh);
    assert_eq!(canonicalize_state("chhattisgarh "), expected);
    assert_eq!(canonicalize_state("CHATTISGARH"), expected);
    assert_eq!(expected.to_string(), "22-Chhattisgarh");
}

#[test]
fn unknown_state_is_tagged_not_dropped() {
    let place = canonicalize_state("Mars");
    assert!(place.is_unmapped());
    assert_eq!(place.to_string(), "Unmapped: Mars");
    assert_eq!(place.state(), None);
}

#[test]
fn canonical_labels_are_fixed_points() {
    for state in StateCode::ALL {
        let label = state.label();
        assert_eq!(canonicalize_state(&label).to_string(), label);
    }
    let unmapped = canonicalize_state("atlantis").to_string();
    assert_eq!(canonicalize_state(&unmapped).to_string(), unmapped);
}

#[test]
fn alternate_spellings() {
    assert_eq!(canonicalize_state("Orissa").state(), Some(StateCode::Odisha));
    assert_eq!(canonicalize_state("new delhi").state(), Some(StateCode::Delhi));
    assert_eq!(canonicalize_state("Pondicherry").state(), Some(StateCode::Puducherry));
    assert_eq!(
        canonicalize_state("Lakshadweep").to_string(),
        "31-Lakshdweep"
    );
    assert_eq!(
        canonicalize_state("jammu and kashmir").to_string(),
        "01-Jammu & Kashmir"
    );
}

#[test]
fn home_states_exclude_special_codes() {
    assert_eq!(StateCode::HOME_STATES.len(), 37);
    assert!(!StateCode::HOME_STATES.contains(&StateCode::ForeignCountry));
    assert!(!StateCode::HOME_STATES.contains(&StateCode::OtherTerritory));
}

// ---------------------------------------------------------------------------
// Rate Rounder
// ---------------------------------------------------------------------------

#[test]
fn rate_rounding_examples() {
    assert_eq!(round_rate(Some(dec!(12.5))), 13);
    assert_eq!(round_rate(Some(dec!(17.4))), 17);
    assert_eq!(round_rate(None), 0);
    assert_eq!(round_rate_cell(&Cell::Text("garbage".into())), 0);
}

// ---------------------------------------------------------------------------
// Tax Splitter
// ---------------------------------------------------------------------------

#[test]
fn split_respects_home_state() {
    let splitter = BusinessConfig::default().splitter();
    // Inner whitespace is not collapsed.
    assert!(canonicalize_state("madhya  pradesh").is_unmapped());

    let home = canonicalize_state(" MADHYA PRADESH ");
    let intra = splitter.split(dec!(250), dec!(12), Some(&home));
    assert_eq!(intra, TaxSplit { igst: dec!(0), cgst: dec!(15), sgst: dec!(15) });

    let away = canonicalize_state("Bihar");
    let inter = splitter.split(dec!(250), dec!(12), Some(&away));
    assert_eq!(inter, TaxSplit { igst: dec!(30), cgst: dec!(0), sgst: dec!(0) });
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

#[test]
fn serial_and_text_dates() {
    assert_eq!(format_invoice_date(&Cell::Number(dec!(45000))).as_deref(), Some("15-Mar-2023"));
    assert_eq!(format_invoice_date(&Cell::Text("45000".into())).as_deref(), Some("15-Mar-2023"));
    assert_eq!(format_invoice_date(&Cell::Text("2024-03-05".into())).as_deref(), Some("05-Mar-2024"));
    assert_eq!(format_invoice_date(&Cell::Text("05 Mar 2024".into())).as_deref(), Some("05-Mar-2024"));
    assert_eq!(format_invoice_date(&Cell::Text("soon".into())), None);
    assert_eq!(format_invoice_date(&Cell::Empty), None);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn builder_rejects_non_home_state() {
    let err = BusinessConfigBuilder::new(StateCode::OtherTerritory).build().unwrap_err();
    assert!(matches!(err, GstError::Config(_)));
}

#[cfg(feature = "json")]
#[test]
fn config_json_round_trip() {
    let config = BusinessConfigBuilder::new(StateCode::Gujarat)
        .gstin(Operator::Jiomart, "24AABCR1718E1ZL")
        .build()
        .unwrap();
    let json = config.to_json().unwrap();
    assert_eq!(BusinessConfig::from_json(&json).unwrap(), config);
}

#[cfg(feature = "json")]
#[test]
fn config_json_rejects_foreign_home_state() {
    let err = BusinessConfig::from_json(r#"{"home_state": "Foreign Country"}"#).unwrap_err();
    assert!(matches!(err, GstError::Config(_)));
}

#[test]
fn numeric_coercion_policy() {
    let cells = [
        (Cell::Empty, Decimal::ZERO),
        (Cell::Text("N/A".into()), Decimal::ZERO),
        (Cell::Text(" 12.50 ".into()), dec!(12.50)),
        (Cell::Number(dec!(-3)), dec!(-3)),
    ];
    for (cell, expected) in cells {
        assert_eq!(coerce_numeric_or_default(&cell), expected, "{cell:?}");
    }
}
