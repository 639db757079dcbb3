//! Core projection engine for monthly reinvestment projections

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use super::history::ProjectionResult;
use super::state::ProjectionState;

/// Hard ceiling on simulated months (50 years)
pub const MAX_PROJECTION_MONTHS: u32 = 600;

/// Months between re-deriving dividend income from capital
pub const DIVIDEND_RECALC_INTERVAL_MONTHS: u32 = 3;

/// Scalar inputs to a single projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    /// Starting principal
    pub initial_capital: f64,

    /// Starting monthly dividend income
    pub monthly_dividend: f64,

    /// Percent of each month's dividend added to principal (nominally 0-100)
    pub reinvestment_rate: f64,

    /// Capital that ends the projection
    pub target_amount: f64,
}

impl ProjectionInput {
    pub fn new(
        initial_capital: f64,
        monthly_dividend: f64,
        reinvestment_rate: f64,
        target_amount: f64,
    ) -> Self {
        Self {
            initial_capital,
            monthly_dividend,
            reinvestment_rate,
            target_amount,
        }
    }

    /// Check that the inputs define a yield ratio.
    ///
    /// Rates outside 0-100 and non-positive targets are accepted.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let fields = [
            ("initial_capital", self.initial_capital),
            ("monthly_dividend", self.monthly_dividend),
            ("reinvestment_rate", self.reinvestment_rate),
            ("target_amount", self.target_amount),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ProjectionError::NonFiniteInput { field, value });
            }
        }

        if self.initial_capital <= 0.0 {
            return Err(ProjectionError::InvalidInput {
                field: "initial_capital",
                value: self.initial_capital,
                reason: "must be positive to derive a dividend yield",
            });
        }

        Ok(())
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionConfig {
    /// Maximum number of months to project
    pub max_months: u32,

    /// Dividend income is re-derived from capital every this many months
    pub recalc_interval_months: u32,
}

impl ProjectionConfig {
    /// Bring overrides back inside the hard limits
    pub fn clamped(self) -> Self {
        let mut config = self;
        if config.max_months > MAX_PROJECTION_MONTHS {
            warn!(
                "max_months {} exceeds the {}-month ceiling, clamping",
                config.max_months, MAX_PROJECTION_MONTHS
            );
            config.max_months = MAX_PROJECTION_MONTHS;
        }
        if config.recalc_interval_months == 0 {
            warn!(
                "recalc_interval_months of 0 ignored, using {}",
                DIVIDEND_RECALC_INTERVAL_MONTHS
            );
            config.recalc_interval_months = DIVIDEND_RECALC_INTERVAL_MONTHS;
        }
        config
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_months: MAX_PROJECTION_MONTHS,
            recalc_interval_months: DIVIDEND_RECALC_INTERVAL_MONTHS,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config.
    ///
    /// `max_months` is capped at [`MAX_PROJECTION_MONTHS`] and a zero
    /// recalculation interval falls back to [`DIVIDEND_RECALC_INTERVAL_MONTHS`].
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            config: config.clamped(),
        }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run a projection.
    ///
    /// Degenerate inputs (non-positive or non-finite capital, any non-finite
    /// value) yield a zero-month result at the initial capital.
    pub fn project(&self, input: &ProjectionInput) -> ProjectionResult {
        match input.validate() {
            Ok(()) => self.run(input),
            Err(err) => {
                warn!("projection skipped: {}", err);
                let capital = if input.initial_capital.is_finite() {
                    input.initial_capital
                } else {
                    0.0
                };
                ProjectionResult::no_progress(capital)
            }
        }
    }

    /// Run a projection, rejecting degenerate inputs instead of
    /// returning a zero-month result
    pub fn try_project(&self, input: &ProjectionInput) -> Result<ProjectionResult, ProjectionError> {
        input.validate()?;
        Ok(self.run(input))
    }

    fn run(&self, input: &ProjectionInput) -> ProjectionResult {
        let mut result = ProjectionResult::no_progress(input.initial_capital);
        let mut state = ProjectionState::new(input.initial_capital, input.monthly_dividend);

        while state.capital < input.target_amount && state.months_elapsed < self.config.max_months {
            let mut next = state.clone();
            next.advance_month(input.reinvestment_rate, self.config.recalc_interval_months);

            // Stop at the last month whose values are still representable
            if !next.is_finite() {
                warn!(
                    "projection overflowed at month {}, stopping at month {}",
                    next.months_elapsed, state.months_elapsed
                );
                break;
            }

            state = next;
            result.add_point(state.snapshot());
        }

        result.final_capital = state.capital;

        debug!(
            "projection finished after {} months: capital {:.2}, target {:.2} {}",
            result.months,
            result.final_capital,
            input.target_amount,
            if result.target_reached(input.target_amount) { "reached" } else { "not reached" },
        );

        result
    }
}

/// Project with the default configuration
pub fn project(
    initial_capital: f64,
    monthly_dividend: f64,
    reinvestment_rate: f64,
    target_amount: f64,
) -> ProjectionResult {
    ProjectionEngine::default().project(&ProjectionInput::new(
        initial_capital,
        monthly_dividend,
        reinvestment_rate,
        target_amount,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_target_already_met() {
        let result = project(1_000.0, 100.0, 50.0, 500.0);

        assert_eq!(result.months, 0);
        assert_eq!(result.final_capital, 1_000.0);
        assert!(result.history.is_empty());
    }

    #[test]
    fn test_non_positive_target_is_met() {
        let result = project(1_000.0, 100.0, 50.0, -5.0);
        assert_eq!(result.months, 0);
        assert_eq!(result.final_capital, 1_000.0);
    }

    #[test]
    fn test_zero_capital_is_degenerate() {
        let result = project(0.0, 100.0, 50.0, 1_000.0);

        assert_eq!(result.months, 0);
        assert_eq!(result.final_capital, 0.0);
        assert!(result.history.is_empty());
    }

    #[test]
    fn test_negative_capital_is_degenerate() {
        let result = project(-500.0, 100.0, 50.0, 1_000.0);
        assert_eq!(result.months, 0);
        assert_eq!(result.final_capital, -500.0);
    }

    #[test]
    fn test_non_finite_inputs_never_reach_history() {
        let result = project(f64::NAN, 100.0, 50.0, 1_000.0);
        assert_eq!(result.months, 0);
        assert!(result.final_capital.is_finite());

        let result = project(1_000.0, f64::INFINITY, 50.0, 2_000.0);
        assert_eq!(result.months, 0);
        assert_eq!(result.final_capital, 1_000.0);
    }

    #[test]
    fn test_try_project_rejects_degenerate_inputs() {
        let engine = ProjectionEngine::default();

        let err = engine
            .try_project(&ProjectionInput::new(0.0, 100.0, 50.0, 1_000.0))
            .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidInput { field: "initial_capital", .. }));

        let err = engine
            .try_project(&ProjectionInput::new(1_000.0, 100.0, f64::NAN, 2_000.0))
            .unwrap_err();
        assert!(matches!(err, ProjectionError::NonFiniteInput { field: "reinvestment_rate", .. }));
    }

    #[test]
    fn test_ceiling_when_no_growth() {
        let result = project(10_000.0, 0.0, 0.0, 20_000.0);

        assert_eq!(result.months, MAX_PROJECTION_MONTHS);
        assert_eq!(result.history.len(), 600);
        assert_eq!(result.final_capital, 10_000.0);
        assert!(!result.target_reached(20_000.0));
    }

    #[test]
    fn test_zero_rate_never_grows() {
        let result = project(10_000.0, 100.0, 0.0, 20_000.0);

        assert_eq!(result.months, 600);
        assert!(result.history.iter().all(|p| p.capital == 10_000 && p.monthly_dividend == 100));
    }

    #[test]
    fn test_quarterly_recalculation() {
        let result = project(1_000_000.0, 10_000.0, 100.0, 2_000_000.0);
        let h = &result.history;

        // Months 1-2 pay the starting dividend
        assert_eq!(h[0].monthly_dividend, 10_000);
        assert_eq!(h[1].monthly_dividend, 10_000);
        // Month 3 re-derives income from 1,030,000 at 12% a year
        assert_eq!(h[2].capital, 1_030_000);
        assert_eq!(h[2].monthly_dividend, 10_300);
        // Held through months 4-5
        assert_eq!(h[3].monthly_dividend, 10_300);
        assert_eq!(h[4].monthly_dividend, 10_300);
        assert_eq!(h[4].capital, 1_050_600);
        // Month 6 recalculates again
        assert_eq!(h[5].capital, 1_060_900);
        assert_eq!(h[5].monthly_dividend, 10_609);
    }

    #[test]
    fn test_reaches_target_and_stops() {
        let target = 2_000_000.0;
        let result = project(1_000_000.0, 10_000.0, 100.0, target);

        assert!(result.target_reached(target));
        assert!(result.months < MAX_PROJECTION_MONTHS);
        // The month before termination was still below target
        let before_last = &result.history[result.history.len() - 2];
        assert!((before_last.capital as f64) <= target);
    }

    #[test]
    fn test_history_invariants() {
        let result = project(50_000.0, 300.0, 70.0, 120_000.0);

        assert_eq!(result.history.len(), result.months as usize);
        for (i, point) in result.history.iter().enumerate() {
            assert_eq!(point.month, i as u32 + 1);
        }
        assert!(result.final_capital >= 50_000.0);
    }

    #[test]
    fn test_capital_monotonic_for_non_negative_rates() {
        for rate in [0.0, 20.0, 50.0, 100.0, 150.0] {
            let result = project(25_000.0, 200.0, rate, 100_000.0);
            for pair in result.history.windows(2) {
                assert!(pair[0].capital <= pair[1].capital, "rate {rate}");
            }
        }
    }

    #[test]
    fn test_negative_rate_withdraws_capital() {
        let result = project(10_000.0, 100.0, -50.0, 20_000.0);

        assert_eq!(result.months, 600);
        assert!(result.final_capital < 10_000.0);
        assert_eq!(result.history[0].capital, 9_950);
    }

    #[test]
    fn test_rounding_does_not_feed_back() {
        let result = project(1_000.0, 3.333, 100.0, 1_010.0);

        // Month 3 is recorded as 1,010 but the unrounded 1,009.999 keeps the run going
        assert_eq!(result.history[2].capital, 1_010);
        assert_eq!(result.months, 4);
        assert_relative_eq!(result.final_capital, 1_009.999 + 1_009.999 * 0.039996 / 12.0, max_relative = 1e-12);
    }

    #[test]
    fn test_reproducible() {
        let a = project(37_500.0, 412.5, 65.0, 90_000.0);
        let b = project(37_500.0, 412.5, 65.0, 90_000.0);

        assert_eq!(a, b);
        assert_eq!(a.final_capital.to_bits(), b.final_capital.to_bits());
    }

    #[test]
    fn test_overflow_stops_at_last_finite_month() {
        // Month 3 re-derives income as roughly 3e600, which overflows
        let result = project(1.0, 1e300, 100.0, 1e308);

        assert_eq!(result.months, 2);
        assert_eq!(result.history.len(), 2);
        assert_relative_eq!(result.final_capital, 2e300, max_relative = 1e-12);
        assert!(!result.target_reached(1e308));
        // Out-of-range snapshots saturate
        assert_eq!(result.history[1].capital, i64::MAX);

        let result = project(1.0, 1e300, -100.0, 1e308);
        assert_eq!(result.months, 2);
        assert!(result.final_capital.is_finite());
        assert_eq!(result.history[1].capital, i64::MIN);
    }

    #[test]
    fn test_config_clamped_to_hard_limits() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            max_months: 4_000_000_000,
            recalc_interval_months: 0,
        });
        assert_eq!(engine.config().max_months, MAX_PROJECTION_MONTHS);
        assert_eq!(engine.config().recalc_interval_months, DIVIDEND_RECALC_INTERVAL_MONTHS);

        let result = engine.project(&ProjectionInput::new(10_000.0, 0.0, 100.0, 20_000.0));
        assert_eq!(result.months, MAX_PROJECTION_MONTHS);
        assert_eq!(result.history.len(), 600);
    }

    #[test]
    fn test_custom_config_ceiling() {
        let engine = ProjectionEngine::new(ProjectionConfig {
            max_months: 24,
            ..Default::default()
        });
        let result = engine.project(&ProjectionInput::new(1_000.0, 0.0, 100.0, 2_000.0));

        assert_eq!(result.months, 24);
        assert_eq!(result.history.len(), 24);
    }
}
