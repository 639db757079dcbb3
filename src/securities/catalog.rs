//! In-memory security catalog

use log::debug;
use std::cmp::Ordering;
use std::fs::File;
use std::path::Path;

use super::{CandidateSecurity, SecurityLookup};
use crate::error::LoadError;

/// Default path to the catalog CSV
pub const DEFAULT_CATALOG_PATH: &str = "data/securities.csv";

/// Queries shorter than this return nothing
pub const MIN_QUERY_LEN: usize = 2;

/// Matches kept per query, taken in catalog order before ranking
pub const MAX_SEARCH_RESULTS: usize = 10;

/// Raw CSV row: symbol,name,price,dividend_yield,is_etf,country
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    symbol: String,
    name: String,
    price: f64,
    dividend_yield: f64,
    is_etf: bool,
    #[serde(default)]
    country: Option<String>,
}

impl From<CsvRow> for CandidateSecurity {
    fn from(row: CsvRow) -> Self {
        Self {
            symbol: row.symbol,
            name: row.name,
            price: row.price,
            dividend_yield: row.dividend_yield,
            is_etf: row.is_etf,
            country: row.country.filter(|c| !c.is_empty()),
        }
    }
}

/// Catalog searched by substring on symbol or name
#[derive(Debug, Clone, Default)]
pub struct LocalCatalog {
    securities: Vec<CandidateSecurity>,
}

impl LocalCatalog {
    pub fn new(securities: Vec<CandidateSecurity>) -> Self {
        Self { securities }
    }

    /// Small built-in list of common dividend payers
    pub fn builtin() -> Self {
        let rows: [(&str, &str, f64, f64, bool, &str); 16] = [
            ("AAPL", "Apple Inc.", 175.50, 0.50, false, "US"),
            ("MSFT", "Microsoft Corporation", 335.20, 0.72, false, "US"),
            ("KO", "The Coca-Cola Company", 58.90, 3.15, false, "US"),
            ("JNJ", "Johnson & Johnson", 160.80, 2.98, false, "US"),
            ("PG", "Procter & Gamble Co.", 152.30, 2.45, false, "US"),
            ("O", "Realty Income Corporation", 58.40, 5.80, false, "US"),
            ("JEPI", "JPMorgan Equity Premium Income ETF", 58.40, 7.72, true, "US"),
            ("JEPQ", "JPMorgan Nasdaq Equity Premium Income ETF", 52.80, 9.35, true, "US"),
            ("QYLD", "Global X NASDAQ 100 Covered Call ETF", 17.45, 12.08, true, "US"),
            ("XYLD", "Global X S&P 500 Covered Call ETF", 45.20, 10.15, true, "US"),
            ("SCHD", "Schwab US Dividend Equity ETF", 78.50, 3.47, true, "US"),
            ("VYM", "Vanguard High Dividend Yield ETF", 112.30, 2.91, true, "US"),
            ("HDV", "iShares Core High Dividend ETF", 108.60, 3.15, true, "US"),
            ("DGRO", "iShares Core Dividend Growth ETF", 52.40, 2.08, true, "US"),
            ("VNQ", "Vanguard Real Estate Index Fund ETF", 87.20, 3.68, true, "US"),
            ("005930", "Samsung Electronics", 71_000.0, 2.10, false, "KR"),
        ];

        let securities = rows
            .into_iter()
            .map(|(symbol, name, price, dividend_yield, is_etf, country)| CandidateSecurity {
                symbol: symbol.to_string(),
                name: name.to_string(),
                price,
                dividend_yield,
                is_etf,
                country: Some(country.to_string()),
            })
            .collect();

        Self::new(securities)
    }

    /// Load a catalog from a CSV file with columns
    /// `symbol,name,price,dividend_yield,is_etf,country`
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = File::open(path.as_ref())?;
        let catalog = Self::from_reader(file)?;
        debug!("loaded {} securities from {}", catalog.len(), path.as_ref().display());
        Ok(catalog)
    }

    /// Load a catalog from any reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut securities = Vec::new();
        for result in csv_reader.deserialize() {
            let row: CsvRow = result?;
            securities.push(CandidateSecurity::from(row));
        }

        Ok(Self::new(securities))
    }

    pub fn len(&self) -> usize {
        self.securities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }
}

/// ETFs first, then higher yield first
fn rank(a: &CandidateSecurity, b: &CandidateSecurity) -> Ordering {
    b.is_etf
        .cmp(&a.is_etf)
        .then_with(|| b.dividend_yield.total_cmp(&a.dividend_yield))
}

impl SecurityLookup for LocalCatalog {
    fn lookup(&self, query: &str) -> Vec<CandidateSecurity> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        let mut matches: Vec<CandidateSecurity> = self
            .securities
            .iter()
            .filter(|s| {
                s.symbol.to_lowercase().contains(&query) || s.name.to_lowercase().contains(&query)
            })
            .take(MAX_SEARCH_RESULTS)
            .cloned()
            .collect();

        matches.sort_by(rank);
        matches
    }
}
