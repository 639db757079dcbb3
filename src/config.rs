//! Simulation configuration loaded from JSON
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```json
//! { "initialCapital": 50000000, "monthlyDividend": 250000, "targetAmount": 100000000 }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::chart::ViewMode;
use crate::error::LoadError;
use crate::projection::ProjectionConfig;
use crate::scenario::{default_scenarios, Scenario, SimulationInputs};

/// Inputs, scenarios and presentation settings for a comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,

    #[serde(default = "default_monthly_dividend")]
    pub monthly_dividend: f64,

    #[serde(default = "default_target_amount")]
    pub target_amount: f64,

    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<Scenario>,

    #[serde(default)]
    pub view_mode: ViewMode,

    /// Ceiling and recalculation cadence overrides.
    ///
    /// The engine clamps these to the 600-month ceiling and a non-zero cadence.
    #[serde(default)]
    pub projection: ProjectionConfig,
}

fn default_initial_capital() -> f64 { 100_000_000.0 }
fn default_monthly_dividend() -> f64 { 500_000.0 }
fn default_target_amount() -> f64 { 300_000_000.0 }

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_capital: default_initial_capital(),
            monthly_dividend: default_monthly_dividend(),
            target_amount: default_target_amount(),
            scenarios: default_scenarios(),
            view_mode: ViewMode::default(),
            projection: ProjectionConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load a config from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        debug!(
            "loaded config from {} with {} scenarios",
            path.as_ref().display(),
            config.scenarios.len()
        );
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn inputs(&self) -> SimulationInputs {
        SimulationInputs {
            initial_capital: self.initial_capital,
            monthly_dividend: self.monthly_dividend,
            target_amount: self.target_amount,
        }
    }
}
