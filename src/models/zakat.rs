use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalType {
    #[default]
    Gold,
    Silver,
}

impl MetalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetalType::Gold => "gold",
            MetalType::Silver => "silver",
        }
    }
}

impl FromStr for MetalType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gold" => Ok(MetalType::Gold),
            "silver" => Ok(MetalType::Silver),
            _ => Err(anyhow::anyhow!("Unknown metal: {} (use gold or silver)", s)),
        }
    }
}

/// How the metal holding is entered: by weight, or already as a currency value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalUnit {
    #[default]
    Grams,
    Currency,
}

impl MetalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetalUnit::Grams => "grams",
            MetalUnit::Currency => "currency",
        }
    }
}

impl FromStr for MetalUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "grams" | "gram" | "g" => Ok(MetalUnit::Grams),
            "currency" | "bdt" | "value" => Ok(MetalUnit::Currency),
            _ => Err(anyhow::anyhow!("Unknown unit: {} (use grams or currency)", s)),
        }
    }
}

/// Raw calculator form. Amounts stay as the text the user typed; they are
/// coerced to numbers only when a result is computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZakatInputs {
    pub cash: String,
    pub metal: String,
    pub metal_type: MetalType,
    pub metal_unit: MetalUnit,
    pub investments: String,
    pub loans_given: String,
    pub stocks: String,
    pub rental_income: String,
    pub agriculture: String,
    pub savings: String,
    pub liabilities: String,
}

impl ZakatInputs {
    pub fn reset(&mut self) {
        *self = ZakatInputs::default();
    }

    /// Switch between grams and currency entry. The metal amount is cleared
    /// because a weight is meaningless as a currency value and vice versa.
    pub fn toggle_unit(&mut self) {
        self.metal_unit = match self.metal_unit {
            MetalUnit::Grams => MetalUnit::Currency,
            MetalUnit::Currency => MetalUnit::Grams,
        };
        self.metal.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZakatResult {
    pub metal_value: f64,
    pub total_zakatable_assets: f64,
    pub nisab_value: f64,
    pub is_eligible: bool,
    pub zakat_amount: f64,
}
