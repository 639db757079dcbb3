//! Dividend Projection - reinvestment compounding projections
//!
//! This library provides:
//! - A monthly projection of capital and dividend income until a target is reached
//! - Side-by-side comparison of reinvestment-rate scenarios
//! - Portfolio holdings as a source of starting capital and income
//! - Security lookup through an injected catalog
//! - History sampling for charts

pub mod error;
pub mod projection;
pub mod scenario;
pub mod portfolio;
pub mod securities;
pub mod chart;
pub mod config;

// Re-export commonly used types
pub use error::{LoadError, ProjectionError};
pub use projection::{project, ProjectionEngine, ProjectionConfig, ProjectionInput, ProjectionResult, HistoryPoint};
pub use scenario::{Scenario, ScenarioResult, ScenarioResults, ScenarioRunner, SimulationInputs};
pub use portfolio::{Portfolio, StockHolding, DividendFrequency};
pub use securities::{CandidateSecurity, LocalCatalog, SecurityLookup};
pub use chart::{ChartSeries, ViewMode};
pub use config::SimulationConfig;
