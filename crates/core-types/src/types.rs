// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The parameters of a single Monte Carlo run.
///
/// The engine does not clamp or check these values on its own; `validate` is the
/// opt-in boundary for callers that want bad input rejected instead of flowing
/// through the arithmetic as NaN or infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Price at step 0.
    pub start_price: f64,
    /// Annualized volatility, e.g. `0.30` for 30%.
    pub volatility: f64,
    /// Number of daily steps simulated after step 0.
    pub horizon_days: u32,
    /// Number of independent paths to generate.
    pub path_count: u32,
}

impl SimulationRequest {
    pub fn new(start_price: f64, volatility: f64, horizon_days: u32, path_count: u32) -> Self {
        Self {
            start_price,
            volatility,
            horizon_days,
            path_count,
        }
    }

    /// Rejects non-finite or non-positive start prices and non-finite or negative volatility.
    pub fn validate(&self) -> Result<()> {
        if !self.start_price.is_finite() || self.start_price <= 0.0 {
            return Err(Error::invalid(
                "start_price",
                format!("must be a finite number greater than zero, got {}", self.start_price),
            ));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(Error::invalid(
                "volatility",
                format!("must be a finite number >= 0, got {}", self.volatility),
            ));
        }
        Ok(())
    }

    /// Total number of simulated steps across all paths.
    pub fn workload(&self) -> u64 {
        self.path_count as u64 * self.horizon_days as u64
    }
}

/// A single point on a simulated path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub step: u32,
    pub price: f64,
}

/// One simulated price trajectory, from step 0 to the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationPath {
    /// Presentational label, e.g. "Sim 3".
    pub label: String,
    pub points: Vec<PricePoint>,
}

impl SimulationPath {
    /// Label for the path at the given zero-based generation index.
    pub fn label_for(index: usize) -> String {
        format!("Sim {}", index + 1)
    }

    pub fn start_price(&self) -> Option<f64> {
        self.points.first().map(|p| p.price)
    }

    pub fn ending_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }

    /// Number of steps beyond step 0.
    pub fn horizon_days(&self) -> u32 {
        self.points.len().saturating_sub(1) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A position held in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    /// Company name; falls back to the symbol when unknown.
    #[serde(default)]
    pub name: String,
    pub shares: f64,
    /// Average cost per share, fees included.
    pub avg_cost: f64,
}

impl Holding {
    pub fn cost_basis(&self) -> f64 {
        self.avg_cost * self.shares
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.symbol } else { &self.name }
    }
}

/// A completed buy or sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub side: TradeSide,
    pub shares: f64,
    pub price: f64,
    #[serde(default)]
    pub fee: f64,
    pub date: DateTime<Utc>,
    /// Realized profit; zero for buys.
    #[serde(default)]
    pub realized_pl: f64,
    /// Realized return in percent; zero for buys.
    #[serde(default)]
    pub return_rate: f64,
}
