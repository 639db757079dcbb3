//! Load holdings from CSV

use csv::{Reader, Trim};
use log::debug;
use std::fs::File;
use std::path::Path;

use super::holding::{DividendFrequency, StockHolding};
use crate::error::LoadError;

/// Raw CSV row: symbol,name,shares,price,dividend_yield,frequency,manual_dividend
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    symbol: String,
    name: String,
    shares: f64,
    price: f64,
    dividend_yield: f64,
    frequency: String,
    #[serde(default)]
    manual_dividend: Option<f64>,
}

impl CsvRow {
    fn into_holding(self, index: usize) -> Result<StockHolding, LoadError> {
        let checks = [
            ("shares", self.shares),
            ("price", self.price),
            ("dividend_yield", self.dividend_yield),
            ("manual_dividend", self.manual_dividend.unwrap_or(0.0)),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(LoadError::InvalidField {
                    symbol: self.symbol,
                    field,
                    value,
                });
            }
        }

        let frequency: DividendFrequency = self.frequency.parse()?;

        Ok(StockHolding {
            id: format!("h{}", index + 1),
            symbol: self.symbol,
            name: self.name,
            shares: self.shares,
            price: self.price,
            dividend_yield: self.dividend_yield,
            frequency,
            manual_dividend: self.manual_dividend,
        })
    }
}

/// Load holdings from a CSV file
pub fn load_holdings<P: AsRef<Path>>(path: P) -> Result<Vec<StockHolding>, LoadError> {
    let file = File::open(path.as_ref())?;
    let holdings = load_holdings_from_reader(file)?;
    debug!("loaded {} holdings from {}", holdings.len(), path.as_ref().display());
    Ok(holdings)
}

/// Load holdings from any reader (e.g., string buffer, request body)
pub fn load_holdings_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<StockHolding>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_rows(&mut csv_reader)
}

fn read_rows<R: std::io::Read>(reader: &mut Reader<R>) -> Result<Vec<StockHolding>, LoadError> {
    let mut holdings = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        holdings.push(row.into_holding(index)?);
    }

    Ok(holdings)
}
