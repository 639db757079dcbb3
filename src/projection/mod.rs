//! Projection engine for dividend reinvestment compounding

mod state;
mod engine;
mod history;

pub use state::ProjectionState;
pub use engine::{
    project, ProjectionConfig, ProjectionEngine, ProjectionInput,
    DIVIDEND_RECALC_INTERVAL_MONTHS, MAX_PROJECTION_MONTHS,
};
pub use history::{round_currency, HistoryPoint, ProjectionResult, ProjectionSummary};
