// In crates/simulator/src/lib.rs

pub mod engine;
pub mod normal;
pub mod summary;

// Re-export the most important types for easy access.
pub use core_types::{Error, Result};
pub use engine::{
    ANNUAL_DRIFT, MonteCarloSimulator, TRADING_DAYS_PER_YEAR, path_seed, run_monte_carlo_simulation,
    run_parallel,
};
pub use normal::{NormalGenerator, UniformSource};
pub use summary::{SimulationSummary, mean_by_step};
