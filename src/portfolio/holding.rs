//! Individual holdings and payout frequencies

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LoadError;

/// How often a security pays its dividend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividendFrequency {
    Monthly,
    Quarterly,
    #[serde(alias = "semi-annual")]
    SemiAnnual,
    Annual,
}

impl DividendFrequency {
    /// Payments per year
    pub fn multiplier(&self) -> f64 {
        match self {
            DividendFrequency::Monthly => 12.0,
            DividendFrequency::Quarterly => 4.0,
            DividendFrequency::SemiAnnual => 2.0,
            DividendFrequency::Annual => 1.0,
        }
    }
}

impl FromStr for DividendFrequency {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(DividendFrequency::Monthly),
            "quarterly" => Ok(DividendFrequency::Quarterly),
            "semiannual" | "semi-annual" => Ok(DividendFrequency::SemiAnnual),
            "annual" | "yearly" => Ok(DividendFrequency::Annual),
            other => Err(LoadError::UnknownFrequency(other.to_string())),
        }
    }
}

/// A position in one security
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockHolding {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub shares: f64,
    pub price: f64,
    /// Annual dividend yield in percent
    pub dividend_yield: f64,
    pub frequency: DividendFrequency,
    /// Per-payment dividend for the whole position; overrides the yield when set
    #[serde(default)]
    pub manual_dividend: Option<f64>,
}

impl StockHolding {
    /// Market value of the position
    pub fn value(&self) -> f64 {
        self.shares * self.price
    }

    pub fn annual_dividend(&self) -> f64 {
        match self.manual_dividend {
            Some(per_payment) => per_payment * self.frequency.multiplier(),
            None => self.value() * self.dividend_yield / 100.0,
        }
    }
}
