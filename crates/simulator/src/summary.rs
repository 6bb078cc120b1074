// In crates/simulator/src/summary.rs

use core_types::{PricePoint, SimulationPath};
use serde::Serialize;

/// Distribution of ending prices across a set of simulated paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub path_count: usize,
    pub horizon_days: u32,
    pub start_price: f64,
    pub mean_end_price: f64,
    pub median_end_price: f64,
    pub p5_end_price: f64,
    pub p95_end_price: f64,
    pub min_end_price: f64,
    pub max_end_price: f64,
    /// Fraction of paths (0..=1) that end above the start price.
    pub probability_of_gain: f64,
    /// Return of the mean ending price over the start price, in percent.
    pub expected_return_percent: f64,
}

impl SimulationSummary {
    /// Summarizes the ending prices. Returns `None` for an empty path set.
    pub fn from_paths(paths: &[SimulationPath]) -> Option<Self> {
        let first = paths.first()?;
        let start_price = first.start_price()?;

        let mut ending: Vec<f64> = paths.iter().filter_map(SimulationPath::ending_price).collect();
        if ending.is_empty() {
            return None;
        }
        ending.sort_by(f64::total_cmp);

        let n = ending.len() as f64;
        let mean_end_price = ending.iter().sum::<f64>() / n;
        let gains = ending.iter().filter(|p| **p > start_price).count();
        let expected_return_percent = if start_price != 0.0 {
            (mean_end_price / start_price - 1.0) * 100.0
        } else {
            0.0
        };

        Some(Self {
            path_count: paths.len(),
            horizon_days: first.horizon_days(),
            start_price,
            mean_end_price,
            median_end_price: percentile(&ending, 0.5),
            p5_end_price: percentile(&ending, 0.05),
            p95_end_price: percentile(&ending, 0.95),
            min_end_price: ending[0],
            max_end_price: ending[ending.len() - 1],
            probability_of_gain: gains as f64 / n,
            expected_return_percent,
        })
    }

    /// Whether the average outcome ends above where it started.
    pub fn is_positive(&self) -> bool {
        self.mean_end_price > self.start_price
    }
}

/// Mean price at every step across the paths, for plotting an average trajectory.
///
/// Paths of unequal length are truncated to the shortest one.
pub fn mean_by_step(paths: &[SimulationPath]) -> Vec<PricePoint> {
    let Some(len) = paths.iter().map(|p| p.points.len()).min() else {
        return Vec::new();
    };
    let n = paths.len() as f64;

    (0..len)
        .map(|i| PricePoint {
            step: paths[0].points[i].step,
            price: paths.iter().map(|p| p.points[i].price).sum::<f64>() / n,
        })
        .collect()
}

// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(index: usize, prices: &[f64]) -> SimulationPath {
        SimulationPath {
            label: SimulationPath::label_for(index),
            points: prices
                .iter()
                .enumerate()
                .map(|(step, &price)| PricePoint { step: step as u32, price })
                .collect(),
        }
    }

    #[test]
    fn empty_set_has_no_summary() {
        assert!(SimulationSummary::from_paths(&[]).is_none());
        assert!(mean_by_step(&[]).is_empty());
    }

    #[test]
    fn summarizes_ending_prices() {
        let paths = vec![
            path(0, &[100.0, 90.0]),
            path(1, &[100.0, 110.0]),
            path(2, &[100.0, 130.0]),
            path(3, &[100.0, 70.0]),
            path(4, &[100.0, 100.0]),
        ];
        let summary = SimulationSummary::from_paths(&paths).unwrap();

        assert_eq!(summary.path_count, 5);
        assert_eq!(summary.horizon_days, 1);
        assert_eq!(summary.mean_end_price, 100.0);
        assert_eq!(summary.median_end_price, 100.0);
        assert_eq!(summary.min_end_price, 70.0);
        assert_eq!(summary.max_end_price, 130.0);
        // Ending at exactly the start price is not a gain.
        assert_eq!(summary.probability_of_gain, 0.4);
        assert_eq!(summary.expected_return_percent, 0.0);
        assert!(!summary.is_positive());
        // rank 0.2 between 70 and 90, rank 3.8 between 110 and 130
        assert!((summary.p5_end_price - 74.0).abs() < 1e-9);
        assert!((summary.p95_end_price - 126.0).abs() < 1e-9);
    }

    #[test]
    fn single_point_paths() {
        let paths = vec![path(0, &[10.0]), path(1, &[10.0])];
        let summary = SimulationSummary::from_paths(&paths).unwrap();
        assert_eq!(summary.horizon_days, 0);
        assert_eq!(summary.mean_end_price, 10.0);
        assert_eq!(summary.probability_of_gain, 0.0);
    }

    #[test]
    fn mean_by_step_averages_each_step() {
        let paths = vec![path(0, &[10.0, 12.0, 14.0]), path(1, &[10.0, 8.0])];
        let mean = mean_by_step(&paths);
        assert_eq!(
            mean,
            vec![PricePoint { step: 0, price: 10.0 }, PricePoint { step: 1, price: 10.0 }]
        );
    }
}
