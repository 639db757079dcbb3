//! Projection output structures

use serde::{Deserialize, Serialize};

/// Round a currency amount to the nearest whole unit, halves toward +inf.
///
/// Out-of-range values saturate at the `i64` bounds.
pub fn round_currency(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// One recorded month of a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    /// Projection month (1-indexed)
    pub month: u32,
    /// Capital after this month's reinvestment, rounded
    pub capital: i64,
    /// Monthly dividend income in effect after this month, rounded
    pub monthly_dividend: i64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Months simulated until the target was reached or the ceiling hit
    pub months: u32,

    /// Unrounded capital at termination
    pub final_capital: f64,

    /// One snapshot per simulated month, in order
    pub history: Vec<HistoryPoint>,
}

impl ProjectionResult {
    /// Result for a projection that performs no steps
    pub fn no_progress(initial_capital: f64) -> Self {
        Self {
            months: 0,
            final_capital: initial_capital,
            history: Vec::new(),
        }
    }

    /// Record a month
    pub fn add_point(&mut self, point: HistoryPoint) {
        self.months = point.month;
        self.history.push(point);
    }

    /// Whether the run ended at or above `target_amount`
    pub fn target_reached(&self, target_amount: f64) -> bool {
        self.final_capital >= target_amount
    }

    /// Whole years and leftover months of the elapsed duration
    pub fn duration(&self) -> (u32, u32) {
        (self.months / 12, self.months % 12)
    }

    /// Get summary statistics
    pub fn summary(&self, initial_capital: f64) -> ProjectionSummary {
        let final_monthly_dividend = self
            .history
            .last()
            .map(|p| p.monthly_dividend)
            .unwrap_or(0);

        ProjectionSummary {
            total_months: self.months,
            final_capital: self.final_capital,
            final_monthly_dividend,
            total_growth: self.final_capital - initial_capital,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub final_capital: f64,
    pub final_monthly_dividend: i64,
    pub total_growth: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_currency_halves_up() {
        assert_eq!(round_currency(10.5), 11);
        assert_eq!(round_currency(10.49), 10);
        assert_eq!(round_currency(-2.5), -2);
        assert_eq!(round_currency(-2.51), -3);
        assert_eq!(round_currency(0.0), 0);
    }

    #[test]
    fn test_add_point_tracks_months() {
        let mut result = ProjectionResult::no_progress(1_000.0);
        result.add_point(HistoryPoint { month: 1, capital: 1_010, monthly_dividend: 10 });
        result.add_point(HistoryPoint { month: 2, capital: 1_020, monthly_dividend: 10 });

        assert_eq!(result.months, 2);
        assert_eq!(result.history.len(), 2);
        assert_eq!(result.duration(), (0, 2));
    }

    #[test]
    fn test_summary() {
        let mut result = ProjectionResult::no_progress(1_000.0);
        result.add_point(HistoryPoint { month: 1, capital: 1_010, monthly_dividend: 10 });
        result.final_capital = 1_010.4;

        let summary = result.summary(1_000.0);
        assert_eq!(summary.total_months, 1);
        assert_eq!(summary.final_monthly_dividend, 10);
        assert!((summary.total_growth - 10.4).abs() < 1e-9);
    }

    #[test]
    fn test_serializes_camel_case() {
        let point = HistoryPoint { month: 3, capital: 1_030, monthly_dividend: 11 };
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"month":3,"capital":1030,"monthlyDividend":11}"#);
    }
}
