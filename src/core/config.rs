//! Business settings read by every adapter and by the TCS summary.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GstError;
use super::split::TaxSplitter;
use super::states::StateCode;

/// E-commerce operators that collect TCS under section 52.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    Amazon,
    Flipkart,
    Jiomart,
    Meesho,
    Glowroad,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Self::Amazon,
        Self::Flipkart,
        Self::Jiomart,
        Self::Meesho,
        Self::Glowroad,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Amazon => "Amazon",
            Self::Flipkart => "Flipkart",
            Self::Jiomart => "Jiomart",
            Self::Meesho => "Meesho",
            Self::Glowroad => "Glowroad",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = GstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GstError::Config(format!("unknown e-commerce operator: '{s}'")))
    }
}

/// How tax on B2B invoice lines is apportioned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum B2bTaxMode {
    /// All tax is reported as IGST, whatever the place of supply.
    #[default]
    IgstOnly,
    /// Split by place of supply against the home state, like B2C sales.
    StateAware,
}

/// User-supplied business configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    /// State the business is registered in. `None` disables the
    /// intra-state split (everything becomes IGST).
    pub home_state: Option<StateCode>,
    /// GSTIN of each e-commerce operator, as printed on the TCS summary.
    pub operator_gstins: BTreeMap<Operator, String>,
    pub b2b_tax_mode: B2bTaxMode,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            home_state: Some(StateCode::MadhyaPradesh),
            operator_gstins: Operator::ALL
                .into_iter()
                .map(|op| (op, String::new()))
                .collect(),
            b2b_tax_mode: B2bTaxMode::IgstOnly,
        }
    }
}

impl BusinessConfig {
    /// Configured GSTIN for `operator`, trimmed; empty if unset.
    pub fn gstin(&self, operator: Operator) -> &str {
        self.operator_gstins
            .get(&operator)
            .map(|g| g.trim())
            .unwrap_or("")
    }

    pub fn splitter(&self) -> TaxSplitter {
        TaxSplitter::new(self.home_state)
    }

    /// Check that the home state is one a business can be registered in.
    pub fn validate(&self) -> Result<(), GstError> {
        if let Some(state) = self.home_state {
            if !StateCode::HOME_STATES.contains(&state) {
                return Err(GstError::Config(format!(
                    "'{}' cannot be selected as the business state",
                    state.label()
                )));
            }
        }
        Ok(())
    }

    /// Load from JSON and validate.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, GstError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, GstError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for [`BusinessConfig`].
///
/// ```
/// use gstify::core::{BusinessConfigBuilder, Operator, StateCode};
///
/// let config = BusinessConfigBuilder::new(StateCode::Maharashtra)
///     .gstin(Operator::Amazon, "27AAICA3918J1CT")
///     .build()
///     .unwrap();
/// assert_eq!(config.gstin(Operator::Amazon), "27AAICA3918J1CT");
/// ```
pub struct BusinessConfigBuilder {
    config: BusinessConfig,
}

impl BusinessConfigBuilder {
    pub fn new(home_state: StateCode) -> Self {
        Self {
            config: BusinessConfig {
                home_state: Some(home_state),
                ..Default::default()
            },
        }
    }

    /// Start without a home state; every supply is treated as inter-state.
    pub fn without_home_state() -> Self {
        Self {
            config: BusinessConfig {
                home_state: None,
                ..Default::default()
            },
        }
    }

    pub fn gstin(mut self, operator: Operator, gstin: impl Into<String>) -> Self {
        self.config.operator_gstins.insert(operator, gstin.into());
        self
    }

    pub fn b2b_tax_mode(mut self, mode: B2bTaxMode) -> Self {
        self.config.b2b_tax_mode = mode;
        self
    }

    pub fn build(self) -> Result<BusinessConfig, GstError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
