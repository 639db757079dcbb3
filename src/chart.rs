//! Sampling projection history for charts

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::projection::HistoryPoint;
use crate::scenario::ScenarioResult;

/// Most points drawn per series
pub const MAX_CHART_POINTS: usize = 20;

/// Chart granularity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Monthly,
    #[default]
    Quarterly,
    HalfYearly,
    Yearly,
}

impl ViewMode {
    /// Months between plotted points
    pub fn step(&self) -> usize {
        match self {
            ViewMode::Monthly => 1,
            ViewMode::Quarterly => 3,
            ViewMode::HalfYearly => 6,
            ViewMode::Yearly => 12,
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" => Ok(ViewMode::Monthly),
            "quarterly" => Ok(ViewMode::Quarterly),
            "halfyearly" | "half-yearly" => Ok(ViewMode::HalfYearly),
            "yearly" => Ok(ViewMode::Yearly),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

/// Every `step`-th snapshot starting from the first, capped at [`MAX_CHART_POINTS`]
pub fn sample_history(history: &[HistoryPoint], mode: ViewMode) -> Vec<HistoryPoint> {
    history
        .iter()
        .step_by(mode.step())
        .take(MAX_CHART_POINTS)
        .copied()
        .collect()
}

/// Calendar label `YY.MM` for the month `months_from_now` after `start`
pub fn period_label(start: NaiveDate, months_from_now: u32) -> String {
    let target = start
        .checked_add_months(Months::new(months_from_now))
        .unwrap_or(NaiveDate::MAX);
    format!("{:02}.{:02}", target.year().rem_euclid(100), target.month())
}

/// One plotted point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub month: u32,
    pub label: String,
    pub capital: i64,
    pub monthly_dividend: i64,
}

/// Sampled series for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub scenario_id: String,
    pub name: String,
    pub color: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn from_result(result: &ScenarioResult, mode: ViewMode, start: NaiveDate) -> Self {
        let points = sample_history(&result.history, mode)
            .into_iter()
            .map(|p| ChartPoint {
                month: p.month,
                label: period_label(start, p.month),
                capital: p.capital,
                monthly_dividend: p.monthly_dividend,
            })
            .collect();

        Self {
            scenario_id: result.scenario.id.clone(),
            name: result.scenario.name.clone(),
            color: result.scenario.color.clone(),
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use crate::scenario::{default_scenarios, ScenarioRunner, SimulationInputs};

    fn history(months: u32) -> Vec<HistoryPoint> {
        (1..=months)
            .map(|m| HistoryPoint { month: m, capital: m as i64 * 100, monthly_dividend: 1 })
            .collect()
    }

    #[test]
    fn test_sample_quarterly() {
        let sampled = sample_history(&history(10), ViewMode::Quarterly);
        let months: Vec<_> = sampled.iter().map(|p| p.month).collect();
        assert_eq!(months, vec![1, 4, 7, 10]);
    }

    #[test]
    fn test_sample_capped() {
        assert_eq!(sample_history(&history(600), ViewMode::Monthly).len(), MAX_CHART_POINTS);
        let yearly = sample_history(&history(600), ViewMode::Yearly);
        assert_eq!(yearly.len(), MAX_CHART_POINTS);
        assert_eq!(yearly[1].month, 13);
    }

    #[test]
    fn test_sample_empty() {
        let result = project(1_000.0, 10.0, 50.0, 500.0);
        assert!(sample_history(&result.history, ViewMode::HalfYearly).is_empty());
    }

    #[test]
    fn test_period_label() {
        let start = NaiveDate::from_ymd_opt(2025, 11, 15).unwrap();
        assert_eq!(period_label(start, 0), "25.11");
        assert_eq!(period_label(start, 2), "26.01");
        assert_eq!(period_label(start, 120), "35.11");
    }

    #[test]
    fn test_parse_view_mode() {
        assert_eq!("Yearly".parse::<ViewMode>(), Ok(ViewMode::Yearly));
        assert_eq!("half-yearly".parse::<ViewMode>(), Ok(ViewMode::HalfYearly));
        assert!("weekly".parse::<ViewMode>().is_err());
    }

    #[test]
    fn test_series_from_result() {
        let inputs = SimulationInputs {
            initial_capital: 10_000.0,
            monthly_dividend: 80.0,
            target_amount: 12_000.0,
        };
        let scenario = &default_scenarios()[0];
        let result = ScenarioRunner::new().run(&inputs, scenario);
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let series = ChartSeries::from_result(&result, ViewMode::Quarterly, start);

        assert_eq!(series.scenario_id, "A");
        assert_eq!(series.color, "#ff6600");
        assert_eq!(series.points[0].month, 1);
        assert_eq!(series.points[0].label, "26.02");
        assert_eq!(series.points[1].month, 4);
    }
}
