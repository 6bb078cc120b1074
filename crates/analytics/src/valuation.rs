// In crates/analytics/src/valuation.rs

use core_types::SimulationPath;

use crate::types::{HoldingValuation, OutcomeValuation};

/// Computes market value, profit and percentage return for one holding.
///
/// A cost basis of zero or less yields `profit_percent == 0.0` rather than NaN,
/// so display code always receives a finite percentage for finite input.
pub fn calculate_profit(current_price: f64, avg_cost: f64, shares: f64) -> HoldingValuation {
    let market_value = current_price * shares;
    let cost_basis = avg_cost * shares;
    let profit = market_value - cost_basis;
    let profit_percent = if cost_basis > 0.0 {
        profit / cost_basis * 100.0
    } else {
        0.0
    };

    HoldingValuation {
        market_value,
        profit,
        profit_percent,
    }
}

/// Values the holding at the ending price of every path, in path order.
pub fn value_simulated_outcomes(
    paths: &[SimulationPath],
    avg_cost: f64,
    shares: f64,
) -> Vec<OutcomeValuation> {
    paths
        .iter()
        .filter_map(|path| {
            let ending_price = path.ending_price()?;
            Some(OutcomeValuation {
                label: path.label.clone(),
                ending_price,
                valuation: calculate_profit(ending_price, avg_cost, shares),
            })
        })
        .collect()
}

/// Values the holding at the average ending price of the paths.
pub fn value_at_mean_outcome(
    paths: &[SimulationPath],
    avg_cost: f64,
    shares: f64,
) -> Option<HoldingValuation> {
    let ending: Vec<f64> = paths.iter().filter_map(SimulationPath::ending_price).collect();
    if ending.is_empty() {
        return None;
    }
    let mean = ending.iter().sum::<f64>() / ending.len() as f64;
    Some(calculate_profit(mean, avg_cost, shares))
}
