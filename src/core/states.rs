//! Indian GST state codes and place-of-supply canonicalisation.
//!
//! Marketplace exports spell destination states in many ways
//! ("Chattisgarh", "CHHATTISGARH ", "Pondicherry", ...). GSTR-1 wants the
//! two-digit state code prefix form, e.g. `"22-Chhattisgarh"`. Names that
//! cannot be resolved are kept as [`PlaceOfSupply::Unmapped`] so that their
//! values still show up as a distinct group downstream.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// GST state / union territory code as used on the GST portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StateCode {
    JammuAndKashmir,
    HimachalPradesh,
    Punjab,
    Chandigarh,
    Uttarakhand,
    Haryana,
    Delhi,
    Rajasthan,
    UttarPradesh,
    Bihar,
    Sikkim,
    ArunachalPradesh,
    Nagaland,
    Manipur,
    Mizoram,
    Tripura,
    Meghalaya,
    Assam,
    WestBengal,
    Jharkhand,
    Odisha,
    Chhattisgarh,
    MadhyaPradesh,
    Gujarat,
    DamanAndDiu,
    DadraAndNagarHaveli,
    Maharashtra,
    Karnataka,
    Goa,
    Lakshadweep,
    Kerala,
    TamilNadu,
    Puducherry,
    AndamanAndNicobarIslands,
    Telangana,
    AndhraPradesh,
    Ladakh,
    ForeignCountry,
    OtherTerritory,
}

impl StateCode {
    /// Every code in the table, ordered by numeric code.
    pub const ALL: [StateCode; 39] = [
        Self::JammuAndKashmir,
        Self::HimachalPradesh,
        Self::Punjab,
        Self::Chandigarh,
        Self::Uttarakhand,
        Self::Haryana,
        Self::Delhi,
        Self::Rajasthan,
        Self::UttarPradesh,
        Self::Bihar,
        Self::Sikkim,
        Self::ArunachalPradesh,
        Self::Nagaland,
        Self::Manipur,
        Self::Mizoram,
        Self::Tripura,
        Self::Meghalaya,
        Self::Assam,
        Self::WestBengal,
        Self::Jharkhand,
        Self::Odisha,
        Self::Chhattisgarh,
        Self::MadhyaPradesh,
        Self::Gujarat,
        Self::DamanAndDiu,
        Self::DadraAndNagarHaveli,
        Self::Maharashtra,
        Self::Karnataka,
        Self::Goa,
        Self::Lakshadweep,
        Self::Kerala,
        Self::TamilNadu,
        Self::Puducherry,
        Self::AndamanAndNicobarIslands,
        Self::Telangana,
        Self::AndhraPradesh,
        Self::Ladakh,
        Self::ForeignCountry,
        Self::OtherTerritory,
    ];

    /// The 37 states and territories a registered business can be located in.
    pub const HOME_STATES: [StateCode; 37] = [
        Self::AndamanAndNicobarIslands,
        Self::AndhraPradesh,
        Self::ArunachalPradesh,
        Self::Assam,
        Self::Bihar,
        Self::Chandigarh,
        Self::Chhattisgarh,
        Self::DadraAndNagarHaveli,
        Self::Delhi,
        Self::Goa,
        Self::Gujarat,
        Self::Haryana,
        Self::HimachalPradesh,
        Self::JammuAndKashmir,
        Self::Jharkhand,
        Self::Karnataka,
        Self::Kerala,
        Self::Ladakh,
        Self::Lakshadweep,
        Self::MadhyaPradesh,
        Self::Maharashtra,
        Self::Manipur,
        Self::Meghalaya,
        Self::Mizoram,
        Self::Nagaland,
        Self::Odisha,
        Self::OtherTerritory,
        Self::Puducherry,
        Self::Punjab,
        Self::Rajasthan,
        Self::Sikkim,
        Self::TamilNadu,
        Self::Telangana,
        Self::Tripura,
        Self::UttarPradesh,
        Self::Uttarakhand,
        Self::WestBengal,
    ];

    /// Two-digit GST state code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::JammuAndKashmir => "01",
            Self::HimachalPradesh => "02",
            Self::Punjab => "03",
            Self::Chandigarh => "04",
            Self::Uttarakhand => "05",
            Self::Haryana => "06",
            Self::Delhi => "07",
            Self::Rajasthan => "08",
            Self::UttarPradesh => "09",
            Self::Bihar => "10",
            Self::Sikkim => "11",
            Self::ArunachalPradesh => "12",
            Self::Nagaland => "13",
            Self::Manipur => "14",
            Self::Mizoram => "15",
            Self::Tripura => "16",
            Self::Meghalaya => "17",
            Self::Assam => "18",
            Self::WestBengal => "19",
            Self::Jharkhand => "20",
            Self::Odisha => "21",
            Self::Chhattisgarh => "22",
            Self::MadhyaPradesh => "23",
            Self::Gujarat => "24",
            Self::DamanAndDiu => "25",
            Self::DadraAndNagarHaveli => "26",
            Self::Maharashtra => "27",
            Self::Karnataka => "29",
            Self::Goa => "30",
            Self::Lakshadweep => "31",
            Self::Kerala => "32",
            Self::TamilNadu => "33",
            Self::Puducherry => "34",
            Self::AndamanAndNicobarIslands => "35",
            Self::Telangana => "36",
            Self::AndhraPradesh => "37",
            Self::Ladakh => "38",
            Self::ForeignCountry => "96",
            Self::OtherTerritory => "97",
        }
    }

    /// State name as printed on the GST portal (including its spellings).
    pub fn name(&self) -> &'static str {
        match self {
            Self::JammuAndKashmir => "Jammu & Kashmir",
            Self::HimachalPradesh => "Himachal Pradesh",
            Self::Punjab => "Punjab",
            Self::Chandigarh => "Chandigarh",
            Self::Uttarakhand => "Uttarakhand",
            Self::Haryana => "Haryana",
            Self::Delhi => "Delhi",
            Self::Rajasthan => "Rajasthan",
            Self::UttarPradesh => "Uttar Pradesh",
            Self::Bihar => "Bihar",
            Self::Sikkim => "Sikkim",
            Self::ArunachalPradesh => "Arunachal Pradesh",
            Self::Nagaland => "Nagaland",
            Self::Manipur => "Manipur",
            Self::Mizoram => "Mizoram",
            Self::Tripura => "Tripura",
            Self::Meghalaya => "Meghalaya",
            Self::Assam => "Assam",
            Self::WestBengal => "West Bengal",
            Self::Jharkhand => "Jharkhand",
            Self::Odisha => "Odisha",
            Self::Chhattisgarh => "Chhattisgarh",
            Self::MadhyaPradesh => "Madhya Pradesh",
            Self::Gujarat => "Gujarat",
            Self::DamanAndDiu => "Daman & Diu",
            Self::DadraAndNagarHaveli => "Dadra & Nagar Haveli",
            Self::Maharashtra => "Maharashtra",
            Self::Karnataka => "Karnataka",
            Self::Goa => "Goa",
            Self::Lakshadweep => "Lakshdweep",
            Self::Kerala => "Kerala",
            Self::TamilNadu => "Tamil Nadu",
            Self::Puducherry => "Puducherry",
            Self::AndamanAndNicobarIslands => "Andaman & Nicobar Islands",
            Self::Telangana => "Telangana",
            Self::AndhraPradesh => "Andhra Pradesh",
            Self::Ladakh => "Ladakh",
            Self::ForeignCountry => "Foreign Country",
            Self::OtherTerritory => "Other Territory",
        }
    }

    /// Canonical `"NN-Name"` label, e.g. `"27-Maharashtra"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.code(), self.name())
    }

    /// Resolve a free-form state name (any case, surrounding whitespace,
    /// known alternate spellings, or an `"NN-Name"` label).
    pub fn lookup(name: &str) -> Option<StateCode> {
        let titled = title_case(name.trim());
        if let Some(state) = lookup_titled(&titled) {
            return Some(state);
        }
        Self::ALL.iter().copied().find(|s| s.label() == titled)
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.code(), self.name())
    }
}

impl FromStr for StateCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| format!("unknown Indian state or territory: '{}'", s.trim()))
    }
}

impl TryFrom<String> for StateCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StateCode> for String {
    fn from(state: StateCode) -> Self {
        state.name().to_string()
    }
}

/// Spelling variants seen in marketplace exports, keyed by their
/// title-cased form.
static STATE_NAMES: &[(&str, StateCode)] = &[
    ("Andaman & Nicobar Islands", StateCode::AndamanAndNicobarIslands),
    ("Andaman And Nicobar Islands", StateCode::AndamanAndNicobarIslands),
    ("Andhra Pradesh", StateCode::AndhraPradesh),
    ("Arunachal Pradesh", StateCode::ArunachalPradesh),
    ("Assam", StateCode::Assam),
    ("Bihar", StateCode::Bihar),
    ("Chandigarh", StateCode::Chandigarh),
    ("Chattisgarh", StateCode::Chhattisgarh),
    ("Chhattisgarh", StateCode::Chhattisgarh),
    ("Dadra & Nagar Haveli", StateCode::DadraAndNagarHaveli),
    ("Dadra And Nagar Haveli", StateCode::DadraAndNagarHaveli),
    ("Dadra And Nagar Haveli And Daman And Diu", StateCode::DadraAndNagarHaveli),
    ("Daman & Diu", StateCode::DamanAndDiu),
    ("Daman And Diu", StateCode::DamanAndDiu),
    ("Delhi", StateCode::Delhi),
    ("Foreign Country", StateCode::ForeignCountry),
    ("Goa", StateCode::Goa),
    ("Gujarat", StateCode::Gujarat),
    ("Haryana", StateCode::Haryana),
    ("Himachal Pradesh", StateCode::HimachalPradesh),
    ("Jammu & Kashmir", StateCode::JammuAndKashmir),
    ("Jammu And Kashmir", StateCode::JammuAndKashmir),
    ("Jharkhand", StateCode::Jharkhand),
    ("Karnataka", StateCode::Karnataka),
    ("Kerala", StateCode::Kerala),
    ("Ladakh", StateCode::Ladakh),
    ("Lakshadweep", StateCode::Lakshadweep),
    ("Lakshdweep", StateCode::Lakshadweep),
    ("Madhya Pradesh", StateCode::MadhyaPradesh),
    ("Maharashtra", StateCode::Maharashtra),
    ("Manipur", StateCode::Manipur),
    ("Meghalaya", StateCode::Meghalaya),
    ("Mizoram", StateCode::Mizoram),
    ("Nagaland", StateCode::Nagaland),
    ("New Delhi", StateCode::Delhi),
    ("Odisha", StateCode::Odisha),
    ("Orissa", StateCode::Odisha),
    ("Other Territory", StateCode::OtherTerritory),
    ("Pondicherry", StateCode::Puducherry),
    ("Puducherry", StateCode::Puducherry),
    ("Punjab", StateCode::Punjab),
    ("Rajasthan", StateCode::Rajasthan),
    ("Sikkim", StateCode::Sikkim),
    ("Tamil Nadu", StateCode::TamilNadu),
    ("Telangana", StateCode::Telangana),
    ("The Dadra And Nagar Haveli", StateCode::DadraAndNagarHaveli),
    ("Tripura", StateCode::Tripura),
    ("Uttar Pradesh", StateCode::UttarPradesh),
    ("Uttarakhand", StateCode::Uttarakhand),
    ("Uttaranchal", StateCode::Uttarakhand),
    ("West Bengal", StateCode::WestBengal),
];

fn lookup_titled(titled: &str) -> Option<StateCode> {
    STATE_NAMES
        .binary_search_by(|(name, _)| (*name).cmp(titled))
        .ok()
        .map(|i| STATE_NAMES[i].1)
}

const UNMAPPED_PREFIX: &str = "Unmapped:";

/// Destination of a supply after canonicalisation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceOfSupply {
    /// Resolved to a GST state code.
    Known(StateCode),
    /// Could not be resolved; holds the title-cased input.
    Unmapped(String),
}

impl PlaceOfSupply {
    /// The resolved state, if any.
    pub fn state(&self) -> Option<StateCode> {
        match self {
            Self::Known(s) => Some(*s),
            Self::Unmapped(_) => None,
        }
    }

    pub fn is_unmapped(&self) -> bool {
        matches!(self, Self::Unmapped(_))
    }
}

impl fmt::Display for PlaceOfSupply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(s) => write!(f, "{s}"),
            Self::Unmapped(raw) => write!(f, "{UNMAPPED_PREFIX} {raw}"),
        }
    }
}

impl Ord for PlaceOfSupply {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_string().cmp(&other.to_string())
    }
}

impl PartialOrd for PlaceOfSupply {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Canonicalise a free-form state name.
///
/// Trims, title-cases, and maps known spellings to their state code.
/// Already-canonical input (`"27-Maharashtra"`, `"Unmapped: Mars"`) is
/// returned unchanged, so the operation is idempotent.
///
/// ```
/// use gstify::core::{canonicalize_state, PlaceOfSupply, StateCode};
///
/// assert_eq!(canonicalize_state("chhattisgarh "), PlaceOfSupply::Known(StateCode::Chhattisgarh));
/// assert_eq!(canonicalize_state("Mars").to_string(), "Unmapped: Mars");
/// ```
pub fn canonicalize_state(name: &str) -> PlaceOfSupply {
    let titled = title_case(name.trim());
    if let Some(raw) = titled.strip_prefix(UNMAPPED_PREFIX) {
        return PlaceOfSupply::Unmapped(raw.trim_start().to_string());
    }
    match StateCode::lookup(&titled) {
        Some(state) => PlaceOfSupply::Known(state),
        None => PlaceOfSupply::Unmapped(titled),
    }
}

/// Title-case a string: the first letter of every run of letters is
/// upper-cased, the remaining letters lower-cased.
///
/// `"jammu & KASHMIR"` becomes `"Jammu & Kashmir"`, `"27-maharashtra"`
/// becomes `"27-Maharashtra"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_table_is_sorted() {
        for window in STATE_NAMES.windows(2) {
            assert!(
                window[0].0 < window[1].0,
                "state names not sorted: {} >= {}",
                window[0].0,
                window[1].0
            );
        }
    }

    #[test]
    fn every_canonical_name_resolves() {
        for state in StateCode::ALL {
            assert_eq!(StateCode::lookup(state.name()), Some(state), "{state:?}");
            assert_eq!(StateCode::lookup(&state.label()), Some(state), "{state:?}");
        }
    }

    #[test]
    fn home_states_are_distinct() {
        let mut codes: Vec<&str> = StateCode::HOME_STATES.iter().map(|s| s.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 37);
    }

    #[test]
    fn alternate_spellings() {
        assert_eq!(StateCode::lookup("CHATTISGARH"), Some(StateCode::Chhattisgarh));
        assert_eq!(StateCode::lookup("pondicherry"), Some(StateCode::Puducherry));
        assert_eq!(StateCode::lookup("new delhi"), Some(StateCode::Delhi));
        assert_eq!(
            StateCode::lookup("andaman and nicobar islands"),
            Some(StateCode::AndamanAndNicobarIslands)
        );
        assert_eq!(
            StateCode::lookup("Dadra and Nagar Haveli and Daman and Diu"),
            Some(StateCode::DadraAndNagarHaveli)
        );
    }

    #[test]
    fn canonicalize_round_trip() {
        let a = canonicalize_state("chhattisgarh ");
        let b = canonicalize_state("CHATTISGARH");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "22-Chhattisgarh");
    }

    #[test]
    fn unmapped_is_tagged() {
        assert_eq!(
            canonicalize_state("  mars "),
            PlaceOfSupply::Unmapped("Mars".into())
        );
        assert_eq!(canonicalize_state("Mars").to_string(), "Unmapped: Mars");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        for raw in ["maharashtra", "Mars", "", "27-Maharashtra", "jammu & kashmir"] {
            let once = canonicalize_state(raw);
            let twice = canonicalize_state(&once.to_string());
            assert_eq!(once, twice, "{raw:?}");
        }
    }

    #[test]
    fn title_case_rules() {
        assert_eq!(title_case("jammu & KASHMIR"), "Jammu & Kashmir");
        assert_eq!(title_case("27-maharashtra"), "27-Maharashtra");
        assert_eq!(title_case("tamil  nadu"), "Tamil  Nadu");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn serde_uses_state_name() {
        let json = serde_json::to_string(&StateCode::TamilNadu).unwrap();
        assert_eq!(json, "\"Tamil Nadu\"");
        let back: StateCode = serde_json::from_str("\"tamil nadu\"").unwrap();
        assert_eq!(back, StateCode::TamilNadu);
        assert!(serde_json::from_str::<StateCode>("\"Atlantis\"").is_err());
    }
}
