// In crates/app-config/src/types.rs

use core_types::{Holding, Transaction};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Defaults for simulation requests issued from the command line.
    #[serde(default)]
    pub simulation: SimulationSettings,
    /// Fee rate and cash balance used by the portfolio commands.
    #[serde(default)]
    pub trading: TradingSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Size of the rayon pool; 0 keeps rayon's own default.
    #[serde(default)]
    pub worker_threads: u32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default = "default_path_count")]
    pub path_count: u32,
    /// Fixed seed for reproducible runs; `None` draws one from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Reject invalid requests instead of letting NaN propagate.
    #[serde(default)]
    pub strict: bool,
    /// Requests with `path_count * horizon_days` at or above this run on the rayon pool.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            path_count: default_path_count(),
            seed: None,
            strict: false,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TradingSettings {
    /// Broker fee in percent of the trade amount.
    #[serde(default = "default_fee_rate_percent")]
    pub fee_rate_percent: f64,
    #[serde(default = "default_cash")]
    pub cash: f64,
}

impl Default for TradingSettings {
    fn default() -> Self {
        Self {
            fee_rate_percent: default_fee_rate_percent(),
            cash: default_cash(),
        }
    }
}

// --- Structs for the holdings file ---

/// Holdings and past sales read by the `portfolio` command.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PortfolioFile {
    #[serde(default)]
    pub holdings: Vec<HoldingEntry>,
    #[serde(default)]
    pub realized: Vec<Transaction>,
    /// Overrides `trading.cash` when present.
    pub cash: Option<f64>,
}

/// A holding plus the last known quote for it.
#[derive(Deserialize, Debug, Clone)]
pub struct HoldingEntry {
    #[serde(flatten)]
    pub holding: Holding,
    pub price: Option<f64>,
}

/// Helper functions for serde defaults
fn default_log_level() -> String { "info".into() }
fn default_horizon_days() -> u32 { 126 } // ~6 months of trading days
fn default_path_count() -> u32 { 50 }
fn default_parallel_threshold() -> u64 { 10_000 }
fn default_fee_rate_percent() -> f64 { 0.1425 }
fn default_cash() -> f64 { 100_000.0 }
