//! Scenario runner for side-by-side reinvestment comparisons
//!
//! Every active scenario shares the same capital, income and target; only the
//! reinvestment rate differs. Projections are independent, so they run in
//! parallel and are collected back in the order the scenarios were supplied.

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::projection::{HistoryPoint, ProjectionConfig, ProjectionEngine, ProjectionInput};

/// Inputs shared by every scenario in a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationInputs {
    pub initial_capital: f64,
    pub monthly_dividend: f64,
    pub target_amount: f64,
}

impl SimulationInputs {
    /// All three amounts are positive, so results are worth presenting
    pub fn is_valid(&self) -> bool {
        self.initial_capital > 0.0 && self.monthly_dividend > 0.0 && self.target_amount > 0.0
    }

    fn with_rate(&self, reinvestment_rate: f64) -> ProjectionInput {
        ProjectionInput::new(
            self.initial_capital,
            self.monthly_dividend,
            reinvestment_rate,
            self.target_amount,
        )
    }
}

/// A named reinvestment-rate configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    /// Reinvestment rate in percent
    pub rate: f64,
    /// Display colour, e.g. "#ff6600"
    pub color: String,
    pub active: bool,
}

impl Scenario {
    pub fn new(id: &str, name: &str, rate: f64, color: &str, active: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            rate,
            color: color.to_string(),
            active,
        }
    }
}

/// The four comparison scenarios offered out of the box
pub fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario::new("A", "A", 80.0, "#ff6600", true),
        Scenario::new("B", "B", 50.0, "#4a90e2", true),
        Scenario::new("C", "C", 30.0, "#50c878", false),
        Scenario::new("D", "D", 20.0, "#9b59b6", false),
    ]
}

/// Projection outcome for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    #[serde(flatten)]
    pub scenario: Scenario,
    pub months: u32,
    pub years: u32,
    pub remaining_months: u32,
    pub final_capital: f64,
    pub target_reached: bool,
    pub history: Vec<HistoryPoint>,
    pub display_text: String,
}

/// Human-readable duration, e.g. "12y 4m"
pub fn format_duration(years: u32, months: u32) -> String {
    format!("{}y {}m", years, months)
}

/// Results for all active scenarios, in supplied order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioResults(pub Vec<ScenarioResult>);

impl ScenarioResults {
    /// Look up a result by scenario id
    pub fn get(&self, id: &str) -> Option<&ScenarioResult> {
        self.0.iter().find(|r| r.scenario.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioResult> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Scenario that reaches its target soonest
    pub fn fastest(&self) -> Option<&ScenarioResult> {
        self.0
            .iter()
            .filter(|r| r.target_reached)
            .min_by_key(|r| r.months)
    }
}

impl IntoIterator for ScenarioResults {
    type Item = ScenarioResult;
    type IntoIter = std::vec::IntoIter<ScenarioResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Runs the projection engine across a set of scenarios
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with default projection settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a custom projection config
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single scenario regardless of its active flag
    pub fn run(&self, inputs: &SimulationInputs, scenario: &Scenario) -> ScenarioResult {
        let result = self.engine.project(&inputs.with_rate(scenario.rate));
        let (years, remaining_months) = result.duration();

        ScenarioResult {
            scenario: scenario.clone(),
            months: result.months,
            years,
            remaining_months,
            final_capital: result.final_capital,
            target_reached: result.target_reached(inputs.target_amount),
            history: result.history,
            display_text: format_duration(years, remaining_months),
        }
    }

    /// Run every active scenario, preserving supplied order
    pub fn run_scenarios(&self, inputs: &SimulationInputs, scenarios: &[Scenario]) -> ScenarioResults {
        let active = scenarios.iter().filter(|s| s.active).count();
        info!(
            "running {} of {} scenarios (capital {:.0}, dividend {:.0}, target {:.0})",
            active,
            scenarios.len(),
            inputs.initial_capital,
            inputs.monthly_dividend,
            inputs.target_amount,
        );

        let results = scenarios
            .par_iter()
            .filter(|s| s.active)
            .map(|s| self.run(inputs, s))
            .collect();

        ScenarioResults(results)
    }
}
