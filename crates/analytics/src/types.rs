// In crates/analytics/src/types.rs

use core_types::{Holding, Transaction};
use serde::{Deserialize, Serialize};

/// Market value and profit of one holding at a given price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HoldingValuation {
    pub market_value: f64,
    pub profit: f64,
    /// Profit over cost basis in percent; `0.0` when the cost basis is not positive.
    pub profit_percent: f64,
}

/// A holding together with its latest known price, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub holding: Holding,
    pub current_price: Option<f64>,
}

impl PositionSnapshot {
    /// The price if it is usable for valuation (known and above zero).
    pub fn usable_price(&self) -> Option<f64> {
        self.current_price.filter(|p| *p > 0.0)
    }
}

/// Valuation of a holding at the end of one simulated path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeValuation {
    pub label: String,
    pub ending_price: f64,
    pub valuation: HoldingValuation,
}

/// Result of opening a new lot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Purchase {
    pub holding: Holding,
    /// Cash spent, fee included.
    pub total_cost: f64,
    pub transaction: Transaction,
}

/// Result of selling part or all of a holding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sale {
    pub transaction: Transaction,
    /// Cash received, fee deducted.
    pub revenue: f64,
    /// What is left of the holding; `None` when everything was sold.
    pub remaining: Option<Holding>,
}

/// Aggregate figures for the whole portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PortfolioSummary {
    /// Sum of `price * shares`, with unknown prices counted as zero.
    pub total_market_value: f64,
    /// Unrealized profit over holdings that have a usable price only.
    pub unrealized_profit: f64,
    pub realized_profit: f64,
    pub total_profit: f64,
    pub cash: f64,
    pub net_worth: f64,
}
