//! Security lookup for building holdings
//!
//! The lookup is an injected, read-only capability so projections and their
//! tests never depend on a market data service.

mod catalog;

pub use catalog::{LocalCatalog, DEFAULT_CATALOG_PATH, MAX_SEARCH_RESULTS, MIN_QUERY_LEN};

use serde::{Deserialize, Serialize};

use crate::portfolio::{DividendFrequency, StockHolding};

/// A security offered as a search match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSecurity {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    /// Annual dividend yield in percent
    pub dividend_yield: f64,
    pub is_etf: bool,
    #[serde(default)]
    pub country: Option<String>,
}

impl CandidateSecurity {
    /// Turn a search pick into a holding
    pub fn to_holding(&self, id: &str, shares: f64, frequency: DividendFrequency) -> StockHolding {
        StockHolding {
            id: id.to_string(),
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            shares,
            price: self.price,
            dividend_yield: self.dividend_yield,
            frequency,
            manual_dividend: None,
        }
    }
}

/// Source of candidate securities for a free-text query
pub trait SecurityLookup {
    fn lookup(&self, query: &str) -> Vec<CandidateSecurity>;
}
