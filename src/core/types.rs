use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::Operator;
use super::error::GstError;
use super::states::PlaceOfSupply;

/// Unit quantity code printed on HSN summaries.
pub const UQC_PIECES: &str = "PCS-PIECES";

/// Reverse charge flag on every B2B invoice line.
pub const REVERSE_CHARGE_NO: &str = "N";

/// Source export a canonical row was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    Amazon,
    Flipkart,
    Jiomart,
    MeeshoSales,
    MeeshoReturn,
    Glowroad,
    B2cOther,
    B2bTemplate,
    AmazonB2b,
}

impl Platform {
    pub const ALL: [Platform; 9] = [
        Self::Amazon,
        Self::Flipkart,
        Self::Jiomart,
        Self::MeeshoSales,
        Self::MeeshoReturn,
        Self::Glowroad,
        Self::B2cOther,
        Self::B2bTemplate,
        Self::AmazonB2b,
    ];

    /// Tag stored in the `Source_Platform` column.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::Flipkart => "Flipkart",
            Self::Jiomart => "Jiomart",
            Self::MeeshoSales => "Meesho_Sales",
            Self::MeeshoReturn => "Meesho_Return",
            Self::Glowroad => "Glowroad",
            Self::B2cOther => "B2C_Other",
            Self::B2bTemplate => "B2B_Template",
            Self::AmazonB2b => "Amazon_B2B",
        }
    }

    /// Short machine name, e.g. for command-line flags.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Amazon => "amazon",
            Self::Flipkart => "flipkart",
            Self::Jiomart => "jiomart",
            Self::MeeshoSales => "meesho_sales",
            Self::MeeshoReturn => "meesho_return",
            Self::Glowroad => "glowroad",
            Self::B2cOther => "b2c_other",
            Self::B2bTemplate => "b2b_template",
            Self::AmazonB2b => "amazon_b2b",
        }
    }

    /// Whether the platform produces a B2B invoice register.
    pub fn is_b2b(&self) -> bool {
        matches!(self, Self::B2bTemplate | Self::AmazonB2b)
    }

    /// E-commerce operator that collects TCS on this platform's sales.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Self::Amazon | Self::AmazonB2b => Some(Operator::Amazon),
            Self::Flipkart => Some(Operator::Flipkart),
            Self::Jiomart => Some(Operator::Jiomart),
            Self::MeeshoSales | Self::MeeshoReturn => Some(Operator::Meesho),
            Self::Glowroad => Some(Operator::Glowroad),
            Self::B2cOther | Self::B2bTemplate => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Platform {
    type Err = GstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|p| p.key() == wanted || p.tag().to_lowercase() == wanted)
            .ok_or_else(|| GstError::Config(format!("unknown platform: '{s}'")))
    }
}

/// Normalise an HSN code: trim and drop a trailing `".0"` left behind by
/// spreadsheets that stored the code as a float.
pub fn normalize_hsn(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_suffix(".0")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// B2CS aggregate: taxable value per destination state and rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct B2csRow {
    pub state: PlaceOfSupply,
    pub rate: i32,
    pub taxable_value: Decimal,
}

/// HSN summary of B2C supplies for one source batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsnRow {
    pub hsn: String,
    pub rate: i32,
    pub quantity: Decimal,
    pub invoice_amount: Decimal,
    pub taxable_value: Decimal,
    pub igst: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
    pub source: Platform,
}

impl HsnRow {
    /// The same row with every amount sign-flipped (credit notes).
    pub fn negated(mut self) -> Self {
        self.quantity = -self.quantity;
        self.invoice_amount = -self.invoice_amount;
        self.taxable_value = -self.taxable_value;
        self.igst = -self.igst;
        self.cgst = -self.cgst;
        self.sgst = -self.sgst;
        self
    }
}

/// One line of the B2B invoice register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct B2bInvoiceRow {
    pub recipient_gstin: String,
    pub receiver_name: String,
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub invoice_value: Decimal,
    pub place_of_supply: PlaceOfSupply,
    pub reverse_charge: String,
    pub applicable_tax_rate: String,
    /// `"Regular"` for the B2B template, `"Regular B2B"` for Amazon.
    pub invoice_type: String,
    pub ecommerce_gstin: String,
    pub rate: i32,
    pub taxable_value: Decimal,
    pub cess_amount: Decimal,
    pub source: Platform,
}

/// HSN summary of B2B supplies, in GSTR-1 column terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsnB2bRow {
    pub hsn: String,
    pub description: String,
    pub uqc: String,
    pub total_quantity: Decimal,
    pub total_value: Decimal,
    pub taxable_value: Decimal,
    pub integrated_tax: Decimal,
    pub central_tax: Decimal,
    pub state_tax: Decimal,
    pub cess_amount: Decimal,
    pub rate: i32,
    pub source: Platform,
}
