// In app/src/report.rs

use analytics::{HoldingValuation, PortfolioSummary, Purchase, Sale};
use simulator::SimulationSummary;

fn signed(value: f64) -> String {
    if value >= 0.0 { format!("+{value:.2}") } else { format!("{value:.2}") }
}

pub fn print_simulation_summary(summary: &SimulationSummary) {
    println!("\n--- Monte Carlo Projection ---");
    println!(
        "  Paths: {} | Horizon: {} trading days (~{:.1} months)",
        summary.path_count,
        summary.horizon_days,
        summary.horizon_days as f64 / 21.0
    );
    println!("  Start price:        {:.2}", summary.start_price);
    println!(
        "  Average end price:  {:.2} ({}%) {}",
        summary.mean_end_price,
        signed(summary.expected_return_percent),
        if summary.is_positive() { "▲" } else { "▼" }
    );
    println!("  Median end price:   {:.2}", summary.median_end_price);
    println!(
        "  5% - 95% range:     {:.2} - {:.2}",
        summary.p5_end_price, summary.p95_end_price
    );
    println!("  Min / Max:          {:.2} / {:.2}", summary.min_end_price, summary.max_end_price);
    println!("  Chance of gain:     {:.1}%", summary.probability_of_gain * 100.0);
}

pub fn print_valuation(label: &str, price: f64, valuation: &HoldingValuation) {
    println!(
        "  {label:<12} @ {price:>10.2} | Value: {:>14.2} | P/L: {:>14} ({}%)",
        valuation.market_value,
        signed(valuation.profit),
        signed(valuation.profit_percent)
    );
}

pub fn print_portfolio_summary(summary: &PortfolioSummary) {
    println!("\n--- Portfolio ---");
    println!("  Net worth:          {:.2}", summary.net_worth);
    println!("  Market value:       {:.2}", summary.total_market_value);
    println!("  Cash:               {:.2}", summary.cash);
    println!("  Unrealized P/L:     {}", signed(summary.unrealized_profit));
    println!("  Realized P/L:       {}", signed(summary.realized_profit));
    println!("  Total P/L:          {}", signed(summary.total_profit));
}

pub fn print_purchase(purchase: &Purchase, cash_before: f64) {
    let holding = &purchase.holding;
    println!("\n--- Buy Preview: {} ---", holding.symbol);
    println!("  Shares:             {}", holding.shares);
    println!("  Fee:                {:.2}", purchase.transaction.fee);
    println!("  Total cost:         {:.2}", purchase.total_cost);
    println!("  Average cost:       {:.4}", holding.avg_cost);
    println!("  Cash after:         {:.2}", cash_before - purchase.total_cost);
}

pub fn print_sale(sale: &Sale) {
    let tx = &sale.transaction;
    println!("\n--- Sell Preview: {} ---", tx.symbol);
    println!("  Shares:             {} @ {:.2}", tx.shares, tx.price);
    println!("  Fee:                {:.2}", tx.fee);
    println!("  Revenue:            {:.2}", sale.revenue);
    println!("  Realized P/L:       {} ({}%)", signed(tx.realized_pl), signed(tx.return_rate));
    match &sale.remaining {
        Some(h) => println!("  Remaining:          {} shares @ {:.4}", h.shares, h.avg_cost),
        None => println!("  Remaining:          position closed"),
    }
}
