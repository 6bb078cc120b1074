// In crates/simulator/src/engine.rs

use core_types::{PricePoint, Result, SimulationPath, SimulationRequest};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;

use crate::normal::{NormalGenerator, UniformSource};

/// Trading days in one year; one step is `1 / TRADING_DAYS_PER_YEAR` years.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Assumed annual market drift (8%). Fixed, not derived from the request.
pub const ANNUAL_DRIFT: f64 = 0.08;

/// Geometric Brownian motion price-path simulator.
///
/// The simulator owns its random source, so a seeded source makes a run fully
/// reproducible. Nothing is cached between runs: two calls on the same simulator
/// continue the source's stream and therefore yield different paths.
#[derive(Debug, Clone)]
pub struct MonteCarloSimulator<U> {
    normal: NormalGenerator<U>,
}

impl MonteCarloSimulator<Xoshiro256PlusPlus> {
    /// Creates a reproducible simulator from a 64-bit seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    /// Creates a simulator seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(Xoshiro256PlusPlus::from_entropy())
    }
}

impl<U: UniformSource> MonteCarloSimulator<U> {
    pub fn new(source: U) -> Self {
        Self {
            normal: NormalGenerator::new(source),
        }
    }

    /// Generates `path_count` paths of `horizon_days + 1` points each.
    ///
    /// Inputs are not checked. A negative volatility or a non-finite price flows
    /// through `exp` and shows up as NaN or infinity in the output.
    pub fn run(&mut self, request: &SimulationRequest) -> Vec<SimulationPath> {
        tracing::debug!(
            start_price = request.start_price,
            volatility = request.volatility,
            horizon_days = request.horizon_days,
            path_count = request.path_count,
            "Running Monte Carlo simulation."
        );

        (0..request.path_count as usize)
            .map(|index| simulate_path(&mut self.normal, request, index))
            .collect()
    }

    /// Same as `run`, but rejects invalid requests with `Error::InvalidParameter`.
    pub fn run_checked(&mut self, request: &SimulationRequest) -> Result<Vec<SimulationPath>> {
        request.validate()?;
        Ok(self.run(request))
    }

    pub fn into_source(self) -> U {
        self.normal.into_inner()
    }
}

/// Convenience entry point taking the four raw parameters.
pub fn run_monte_carlo_simulation<U: UniformSource>(
    source: U,
    start_price: f64,
    volatility: f64,
    horizon_days: u32,
    path_count: u32,
) -> Vec<SimulationPath> {
    let request = SimulationRequest::new(start_price, volatility, horizon_days, path_count);
    MonteCarloSimulator::new(source).run(&request)
}

/// Seed of the generator used for path `index` by `run_parallel`.
pub fn path_seed(seed: u64, index: u64) -> u64 {
    seed.wrapping_add(index.wrapping_mul(0x9e37_79b9_7f4a_7c15))
}

/// Generates the paths on the rayon pool, one independently seeded generator per path.
///
/// Path `i` is exactly what `MonteCarloSimulator::seeded(path_seed(seed, i))` would
/// produce for a single-path request, so the output does not depend on the number
/// of worker threads. Ordering and labels match `MonteCarloSimulator::run`.
pub fn run_parallel(request: &SimulationRequest, seed: u64) -> Vec<SimulationPath> {
    tracing::debug!(
        horizon_days = request.horizon_days,
        path_count = request.path_count,
        threads = rayon::current_num_threads(),
        "Running Monte Carlo simulation in parallel."
    );

    (0..request.path_count as usize)
        .into_par_iter()
        .map(|index| {
            let rng = Xoshiro256PlusPlus::seed_from_u64(path_seed(seed, index as u64));
            let mut normal = NormalGenerator::new(rng);
            simulate_path(&mut normal, request, index)
        })
        .collect()
}

fn simulate_path<U: UniformSource>(
    normal: &mut NormalGenerator<U>,
    request: &SimulationRequest,
    index: usize,
) -> SimulationPath {
    let dt = 1.0 / TRADING_DAYS_PER_YEAR;
    let sigma = request.volatility;
    // Exact GBM discretization; the -sigma^2/2 term keeps the mean unbiased.
    let drift_term = (ANNUAL_DRIFT - 0.5 * sigma.powi(2)) * dt;
    let vol_term = sigma * dt.sqrt();

    let mut points = Vec::with_capacity(request.horizon_days as usize + 1);
    let mut price = request.start_price;
    points.push(PricePoint { step: 0, price });

    // Zero volatility still draws every shock so the random stream advances uniformly.
    for day in 1..=request.horizon_days {
        let shock = vol_term * normal.sample();
        price *= (drift_term + shock).exp();
        points.push(PricePoint { step: day, price });
    }

    SimulationPath {
        label: SimulationPath::label_for(index),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Error;

    #[test]
    fn shapes_follow_the_request() {
        let mut simulator = MonteCarloSimulator::seeded(1);
        let paths = simulator.run(&SimulationRequest::new(50.0, 0.25, 126, 50));

        assert_eq!(paths.len(), 50);
        for (i, path) in paths.iter().enumerate() {
            assert_eq!(path.label, format!("Sim {}", i + 1));
            assert_eq!(path.points.len(), 127);
            assert_eq!(path.points[0], PricePoint { step: 0, price: 50.0 });
            assert!(path.points.iter().enumerate().all(|(k, p)| p.step == k as u32));
            assert!(path.points.iter().all(|p| p.price > 0.0));
        }
    }

    #[test]
    fn zero_paths_and_zero_days() {
        let mut simulator = MonteCarloSimulator::seeded(1);
        assert!(simulator.run(&SimulationRequest::new(10.0, 0.2, 30, 0)).is_empty());

        let paths = simulator.run(&SimulationRequest::new(10.0, 0.2, 0, 3));
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.points == vec![PricePoint { step: 0, price: 10.0 }]));
    }

    #[test]
    fn zero_volatility_is_pure_drift() {
        let start = 100.0;
        let mut simulator = MonteCarloSimulator::seeded(99);
        let paths = simulator.run(&SimulationRequest::new(start, 0.0, 252, 4));

        for path in &paths {
            assert_eq!(path.points, paths[0].points);
            for point in &path.points {
                let expected = start * (ANNUAL_DRIFT * (point.step as f64 / TRADING_DAYS_PER_YEAR)).exp();
                assert!(
                    ((point.price - expected) / expected).abs() < 1e-12,
                    "step {} got {} expected {}",
                    point.step,
                    point.price,
                    expected
                );
            }
        }
    }

    #[test]
    fn zero_volatility_still_consumes_draws() {
        let mut simulator = MonteCarloSimulator::seeded(5);
        simulator.run(&SimulationRequest::new(10.0, 0.0, 3, 1));
        let mut after_run = simulator.into_source();

        let mut reference = Xoshiro256PlusPlus::seed_from_u64(5);
        let mut normal = NormalGenerator::new(&mut reference);
        for _ in 0..3 {
            normal.sample();
        }
        assert_eq!(after_run.next_uniform().to_bits(), reference.next_uniform().to_bits());
    }

    #[test]
    fn same_seed_reproduces_paths() {
        let request = SimulationRequest::new(42.0, 0.4, 20, 5);
        let a = MonteCarloSimulator::seeded(2024).run(&request);
        let b = MonteCarloSimulator::seeded(2024).run(&request);
        let c = MonteCarloSimulator::seeded(2025).run(&request);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn entropy_seeded_runs_have_the_requested_shape() {
        let paths = MonteCarloSimulator::from_entropy().run(&SimulationRequest::new(5.0, 0.5, 3, 2));
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.points.len() == 4 && p.points[0].price == 5.0));
    }

    #[test]
    fn consecutive_runs_are_fresh() {
        let request = SimulationRequest::new(42.0, 0.4, 20, 2);
        let mut simulator = MonteCarloSimulator::seeded(3);
        let first = simulator.run(&request);
        let second = simulator.run(&request);
        assert_ne!(first, second);
    }

    #[test]
    fn invalid_input_propagates_unless_checked() {
        let request = SimulationRequest::new(f64::NAN, 0.2, 2, 1);
        let paths = MonteCarloSimulator::seeded(0).run(&request);
        assert!(paths[0].points.iter().all(|p| p.price.is_nan()));

        let err = MonteCarloSimulator::seeded(0).run_checked(&request).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "start_price", .. }));

        let ok = MonteCarloSimulator::seeded(0)
            .run_checked(&SimulationRequest::new(10.0, 0.2, 2, 1))
            .unwrap();
        assert_eq!(ok.len(), 1);
    }

    #[test]
    fn raw_parameter_entry_point() {
        let paths = run_monte_carlo_simulation(Xoshiro256PlusPlus::seed_from_u64(8), 20.0, 0.3, 5, 2);
        let expected = MonteCarloSimulator::seeded(8).run(&SimulationRequest::new(20.0, 0.3, 5, 2));
        assert_eq!(paths, expected);
    }

    #[test]
    fn parallel_paths_match_per_path_seeding() {
        let request = SimulationRequest::new(75.0, 0.35, 30, 16);
        let parallel = run_parallel(&request, 11);
        assert_eq!(parallel.len(), 16);

        for (index, path) in parallel.iter().enumerate() {
            let single = SimulationRequest { path_count: 1, ..request };
            let expected = MonteCarloSimulator::seeded(path_seed(11, index as u64)).run(&single);
            assert_eq!(path.points, expected[0].points);
            assert_eq!(path.label, SimulationPath::label_for(index));
        }
        assert_eq!(parallel, run_parallel(&request, 11));
    }
}
