//! Portfolio holdings and the dividend income they generate

mod holding;
pub mod loader;

pub use holding::{DividendFrequency, StockHolding};
pub use loader::{load_holdings, load_holdings_from_reader};

use serde::{Deserialize, Serialize};

use crate::scenario::SimulationInputs;

/// A set of holdings whose combined value and income seed a projection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    pub holdings: Vec<StockHolding>,
}

impl Portfolio {
    pub fn new(holdings: Vec<StockHolding>) -> Self {
        Self { holdings }
    }

    pub fn add(&mut self, holding: StockHolding) {
        self.holdings.push(holding);
    }

    /// Remove a holding by id, returning it if present
    pub fn remove(&mut self, id: &str) -> Option<StockHolding> {
        let idx = self.holdings.iter().position(|h| h.id == id)?;
        Some(self.holdings.remove(idx))
    }

    /// Market value of all holdings
    pub fn total_value(&self) -> f64 {
        self.holdings.iter().map(|h| h.value()).sum()
    }

    /// Expected dividend income per year
    pub fn total_annual_dividend(&self) -> f64 {
        self.holdings.iter().map(|h| h.annual_dividend()).sum()
    }

    pub fn monthly_dividend(&self) -> f64 {
        self.total_annual_dividend() / 12.0
    }

    /// Income as a percentage of market value (0 for an empty portfolio)
    pub fn dividend_yield_pct(&self) -> f64 {
        let value = self.total_value();
        if value <= 0.0 {
            0.0
        } else {
            self.total_annual_dividend() / value * 100.0
        }
    }

    /// Projection inputs seeded from the current holdings
    pub fn simulation_inputs(&self, target_amount: f64) -> SimulationInputs {
        SimulationInputs {
            initial_capital: self.total_value(),
            monthly_dividend: self.monthly_dividend(),
            target_amount,
        }
    }
}
