// In app/src/simulation.rs

use app_config::SimulationSettings;
use core_types::{SimulationPath, SimulationRequest};
use simulator::{MonteCarloSimulator, run_parallel};

/// A fully resolved simulation: request, seed and which runner to use.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub request: SimulationRequest,
    pub seed: u64,
    pub parallel: bool,
    pub strict: bool,
}

/// Command-line overrides for a simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub days: Option<u32>,
    pub paths: Option<u32>,
    pub seed: Option<u64>,
}

/// Merges command-line values over the configured defaults.
///
/// Seed precedence is command line, then settings, then a fresh random seed.
pub fn plan(
    settings: &SimulationSettings,
    start_price: f64,
    volatility: f64,
    overrides: Overrides,
) -> RunPlan {
    let request = SimulationRequest::new(
        start_price,
        volatility,
        overrides.days.unwrap_or(settings.horizon_days),
        overrides.paths.unwrap_or(settings.path_count),
    );
    let seed = overrides
        .seed
        .or(settings.seed)
        .unwrap_or_else(rand::random::<u64>);

    RunPlan {
        request,
        seed,
        parallel: request.workload() >= settings.parallel_threshold,
        strict: settings.strict,
    }
}

pub fn execute(plan: &RunPlan) -> core_types::Result<Vec<SimulationPath>> {
    tracing::info!(
        seed = plan.seed,
        parallel = plan.parallel,
        strict = plan.strict,
        paths = plan.request.path_count,
        days = plan.request.horizon_days,
        "Starting simulation."
    );

    if plan.strict {
        if let Err(e) = plan.request.validate() {
            tracing::warn!(error = %e, "Simulation request rejected.");
            return Err(e);
        }
    }

    let paths = if plan.parallel {
        run_parallel(&plan.request, plan.seed)
    } else {
        MonteCarloSimulator::seeded(plan.seed).run(&plan.request)
    };
    Ok(paths)
}
