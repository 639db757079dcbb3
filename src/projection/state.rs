//! Running state of a single projection

use super::history::{round_currency, HistoryPoint};

/// Capital and income at a point in time during projection.
///
/// Values are kept unrounded; rounding happens only in [`ProjectionState::snapshot`].
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Months simulated so far (0 before the first step)
    pub months_elapsed: u32,

    /// Current principal
    pub capital: f64,

    /// Dividend income paid out in the current month
    pub monthly_dividend: f64,

    /// Annualized dividend income as a fraction of capital, fixed at start
    pub annual_dividend_yield: f64,
}

impl ProjectionState {
    /// Initialize state at projection start.
    ///
    /// Callers must ensure `initial_capital > 0`.
    pub fn new(initial_capital: f64, monthly_dividend: f64) -> Self {
        Self {
            months_elapsed: 0,
            capital: initial_capital,
            monthly_dividend,
            annual_dividend_yield: monthly_dividend * 12.0 / initial_capital,
        }
    }

    /// Advance one month: reinvest part of this month's dividend and
    /// re-derive income from capital on recalculation months
    pub fn advance_month(&mut self, reinvestment_rate: f64, recalc_interval_months: u32) {
        self.months_elapsed += 1;

        let reinvest_amount = self.monthly_dividend * (reinvestment_rate / 100.0);
        self.capital += reinvest_amount;

        if recalc_interval_months > 0 && self.months_elapsed % recalc_interval_months == 0 {
            self.monthly_dividend = self.capital * (self.annual_dividend_yield / 12.0);
        }
    }

    /// Whether capital and income are both finite
    pub fn is_finite(&self) -> bool {
        self.capital.is_finite() && self.monthly_dividend.is_finite()
    }

    /// Rounded snapshot of the current month
    pub fn snapshot(&self) -> HistoryPoint {
        HistoryPoint {
            month: self.months_elapsed,
            capital: round_currency(self.capital),
            monthly_dividend: round_currency(self.monthly_dividend),
        }
    }
}
