// In crates/analytics/src/portfolio.rs

use chrono::{DateTime, Utc};
use core_types::{Error, Holding, Result, TradeSide, Transaction};

use crate::types::{PortfolioSummary, PositionSnapshot, Purchase, Sale};

/// Estimated broker fee for a trade amount, rounded to the nearest whole unit.
///
/// `fee_rate_percent` is a percentage, e.g. `0.1425` for 0.1425%.
pub fn estimate_fee(amount: f64, fee_rate_percent: f64) -> f64 {
    (amount * (fee_rate_percent / 100.0)).round()
}

/// Opens a new lot. The fee is folded into the average cost.
pub fn buy(
    symbol: &str,
    name: &str,
    shares: f64,
    price: f64,
    fee: f64,
    at: DateTime<Utc>,
) -> Result<Purchase> {
    if !(shares.is_finite() && shares > 0.0) {
        return Err(Error::invalid("shares", format!("must be greater than zero, got {shares}")));
    }

    let symbol = symbol.to_uppercase();
    let total_cost = price * shares + fee;
    let holding = Holding {
        symbol: symbol.clone(),
        name: name.to_string(),
        shares,
        avg_cost: total_cost / shares,
    };
    let transaction = Transaction {
        symbol,
        name: name.to_string(),
        side: TradeSide::Buy,
        shares,
        price,
        fee,
        date: at,
        realized_pl: 0.0,
        return_rate: 0.0,
    };

    Ok(Purchase {
        holding,
        total_cost,
        transaction,
    })
}

/// Sells `shares` of a holding and realizes the profit against its average cost.
pub fn sell(holding: &Holding, shares: f64, price: f64, fee: f64, at: DateTime<Utc>) -> Result<Sale> {
    if !(shares > 0.0 && shares <= holding.shares) {
        return Err(Error::invalid(
            "shares",
            format!("cannot sell {shares} of {} shares held in {}", holding.shares, holding.symbol),
        ));
    }

    let revenue = price * shares - fee;
    let cost = holding.avg_cost * shares;
    let realized_pl = revenue - cost;
    let return_rate = if cost > 0.0 { realized_pl / cost * 100.0 } else { 0.0 };

    let remaining = if shares == holding.shares {
        None
    } else {
        Some(Holding {
            shares: holding.shares - shares,
            ..holding.clone()
        })
    };

    Ok(Sale {
        transaction: Transaction {
            symbol: holding.symbol.clone(),
            name: holding.name.clone(),
            side: TradeSide::Sell,
            shares,
            price,
            fee,
            date: at,
            realized_pl,
            return_rate,
        },
        revenue,
        remaining,
    })
}

/// Aggregates unrealized, realized and total profit plus net worth.
///
/// Holdings without a usable price are left out of the unrealized figure entirely
/// (both value and cost), so a missing quote never shows up as a full loss.
pub fn summarize_portfolio(
    positions: &[PositionSnapshot],
    transactions: &[Transaction],
    cash: f64,
) -> PortfolioSummary {
    let mut priced_value = 0.0;
    let mut priced_cost = 0.0;
    for position in positions {
        if let Some(price) = position.usable_price() {
            priced_value += price * position.holding.shares;
            priced_cost += position.holding.cost_basis();
        }
    }
    let unrealized_profit = priced_value - priced_cost;

    let total_market_value: f64 = positions
        .iter()
        .map(|p| p.current_price.unwrap_or(0.0) * p.holding.shares)
        .sum();

    let realized_profit: f64 = transactions.iter().map(|t| t.realized_pl).sum();

    PortfolioSummary {
        total_market_value,
        unrealized_profit,
        realized_profit,
        total_profit: unrealized_profit + realized_profit,
        cash,
        net_worth: total_market_value + cash,
    }
}
