// In crates/analytics/src/lib.rs

pub mod portfolio;
pub mod types;
pub mod valuation;

pub use portfolio::{buy, estimate_fee, sell, summarize_portfolio};
pub use types::{
    HoldingValuation, OutcomeValuation, PortfolioSummary, PositionSnapshot, Purchase, Sale,
};
pub use valuation::{calculate_profit, value_at_mean_outcome, value_simulated_outcomes};
