use core_types::SimulationRequest;
use simulator::{ANNUAL_DRIFT, MonteCarloSimulator, SimulationSummary, run_parallel};

fn log_return_moments(start: f64, ending: &[f64]) -> (f64, f64) {
    let logs: Vec<f64> = ending.iter().map(|p| (p / start).ln()).collect();
    let n = logs.len() as f64;
    let mean = logs.iter().sum::<f64>() / n;
    let variance = logs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance)
}

#[test]
fn one_year_log_return_has_corrected_drift() {
    let sigma = 0.3;
    let start = 100.0;
    let n_paths = 10_000;
    let request = SimulationRequest::new(start, sigma, 252, n_paths);

    let paths = MonteCarloSimulator::seeded(42).run(&request);
    let ending: Vec<f64> = paths.iter().filter_map(|p| p.ending_price()).collect();
    let (mean, variance) = log_return_moments(start, &ending);

    // Over 252 steps of 1/252 years the horizon is exactly one year.
    let expected_mean = ANNUAL_DRIFT - 0.5 * sigma * sigma;
    let standard_error = sigma / (n_paths as f64).sqrt();
    assert!(
        (mean - expected_mean).abs() < 4.0 * standard_error,
        "mean log return {mean}, expected {expected_mean}"
    );
    // A first-order scheme without the correction would land near ANNUAL_DRIFT.
    assert!((mean - ANNUAL_DRIFT).abs() > 4.0 * standard_error);
    assert!((variance - sigma * sigma).abs() < 0.01, "variance {variance}");
}

#[test]
fn parallel_runner_has_the_same_distribution() {
    let sigma = 0.2;
    let start = 50.0;
    let n_paths = 10_000;
    let request = SimulationRequest::new(start, sigma, 252, n_paths);

    let paths = run_parallel(&request, 7);
    assert_eq!(paths.len(), n_paths as usize);
    let ending: Vec<f64> = paths.iter().filter_map(|p| p.ending_price()).collect();
    let (mean, _) = log_return_moments(start, &ending);

    let expected_mean = ANNUAL_DRIFT - 0.5 * sigma * sigma;
    assert!((mean - expected_mean).abs() < 4.0 * sigma / (n_paths as f64).sqrt());
}

#[test]
fn summary_of_a_positive_drift_run() {
    let request = SimulationRequest::new(100.0, 0.25, 126, 5_000);
    let paths = MonteCarloSimulator::seeded(2026).run(&request);
    let summary = SimulationSummary::from_paths(&paths).unwrap();

    assert_eq!(summary.path_count, 5_000);
    assert_eq!(summary.horizon_days, 126);
    assert_eq!(summary.start_price, 100.0);
    assert!(summary.p5_end_price < summary.median_end_price);
    assert!(summary.median_end_price < summary.p95_end_price);
    assert!(summary.min_end_price <= summary.p5_end_price);
    assert!(summary.p95_end_price <= summary.max_end_price);

    // E[S_T] = S_0 * exp(mu * T) with T = 0.5 years.
    let expected_mean = 100.0 * (ANNUAL_DRIFT * 0.5).exp();
    assert!((summary.mean_end_price - expected_mean).abs() < 1.5, "{}", summary.mean_end_price);
    assert!(summary.is_positive());
    assert!(summary.probability_of_gain > 0.5 && summary.probability_of_gain < 0.7);

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json.get("mean_end_price").is_some());
    assert!(json.get("probability_of_gain").is_some());
}
