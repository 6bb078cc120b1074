// In app/src/main.rs

use analytics::{PositionSnapshot, calculate_profit, estimate_fee, summarize_portfolio};
use anyhow::{Context, Result};
use app_config::{PortfolioFile, Settings};
use clap::{Parser, Subcommand};
use serde_json::json;
use simulator::SimulationSummary;
use std::path::{Path, PathBuf};
use tracing_subscriber::prelude::*;

mod report;
mod simulation;

use crate::simulation::Overrides;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Monte Carlo price projection and portfolio valuation.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulates future price paths and prints their distribution.
    Simulate {
        /// Current price (step 0 of every path).
        #[arg(short, long)]
        price: f64,

        /// Annualized volatility, e.g. 0.3 for 30%.
        #[arg(short, long)]
        volatility: f64,

        /// Trading days to simulate. Defaults to `simulation.horizon_days`.
        #[arg(short, long)]
        days: Option<u32>,

        /// Number of paths. Defaults to `simulation.path_count`.
        #[arg(short = 'n', long)]
        paths: Option<u32>,

        /// Seed for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the summary and every path as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Values a single holding at a given price.
    Value {
        #[arg(short, long)]
        price: f64,

        /// Average cost per share, fees included.
        #[arg(short, long)]
        avg_cost: f64,

        #[arg(short, long)]
        shares: f64,
    },

    /// Simulates a holding's price and values it at the projected outcomes.
    Project {
        #[arg(short, long)]
        price: f64,

        #[arg(short, long)]
        volatility: f64,

        #[arg(short, long)]
        avg_cost: f64,

        #[arg(short, long)]
        shares: f64,

        #[arg(short, long)]
        days: Option<u32>,

        #[arg(short = 'n', long)]
        paths: Option<u32>,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Values every holding in a holdings file and prints portfolio totals.
    Portfolio {
        #[arg(short, long, default_value = "config/portfolio.toml")]
        file: PathBuf,
    },

    /// Previews opening a new lot.
    Buy {
        #[arg(long)]
        symbol: String,

        #[arg(short, long)]
        shares: f64,

        #[arg(short, long)]
        price: f64,

        /// Broker fee. Estimated from `trading.fee_rate_percent` when omitted.
        #[arg(long)]
        fee: Option<f64>,
    },

    /// Previews selling from a holding in the holdings file.
    Sell {
        #[arg(long)]
        symbol: String,

        #[arg(short, long)]
        shares: f64,

        #[arg(short, long)]
        price: f64,

        #[arg(long)]
        fee: Option<f64>,

        #[arg(short, long, default_value = "config/portfolio.toml")]
        file: PathBuf,
    },
}

// --- Main Application Entry Point ---

fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings().context("Failed to load settings from config/")?;

    let level = settings
        .app
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();

    if settings.app.worker_threads > 0 {
        tracing::info!(threads = settings.app.worker_threads, "Configuring Rayon thread pool.");
        rayon::ThreadPoolBuilder::new()
            .num_threads(settings.app.worker_threads as usize)
            .build_global()
            .context("Failed to build Rayon thread pool")?;
    }

    tracing::info!(environment = %settings.app.environment, "Starting Prophet");

    match cli.command {
        Commands::Simulate {
            price,
            volatility,
            days,
            paths,
            seed,
            json,
        } => {
            handle_simulate(&settings, price, volatility, Overrides { days, paths, seed }, json)?;
        }
        Commands::Value {
            price,
            avg_cost,
            shares,
        } => {
            let valuation = calculate_profit(price, avg_cost, shares);
            println!("\n--- Valuation ---");
            report::print_valuation("Holding", price, &valuation);
        }
        Commands::Project {
            price,
            volatility,
            avg_cost,
            shares,
            days,
            paths,
            seed,
        } => {
            handle_project(&settings, price, volatility, avg_cost, shares, Overrides { days, paths, seed })?;
        }
        Commands::Portfolio { file } => {
            handle_portfolio(&settings, &file)?;
        }
        Commands::Buy {
            symbol,
            shares,
            price,
            fee,
        } => {
            let fee = fee.unwrap_or_else(|| estimate_fee(price * shares, settings.trading.fee_rate_percent));
            let purchase = analytics::buy(&symbol, &symbol, shares, price, fee, chrono::Utc::now())?;
            report::print_purchase(&purchase, settings.trading.cash);
        }
        Commands::Sell {
            symbol,
            shares,
            price,
            fee,
            file,
        } => {
            handle_sell(&settings, &symbol, shares, price, fee, &file)?;
        }
    }

    tracing::info!("Prophet has finished successfully.");

    Ok(())
}

/// Handles the logic for the `simulate` subcommand.
fn handle_simulate(
    settings: &Settings,
    price: f64,
    volatility: f64,
    overrides: Overrides,
    as_json: bool,
) -> Result<()> {
    let plan = simulation::plan(&settings.simulation, price, volatility, overrides);
    let paths = simulation::execute(&plan)?;
    let summary = SimulationSummary::from_paths(&paths);

    if as_json {
        let output = json!({
            "seed": plan.seed,
            "request": plan.request,
            "summary": summary,
            "paths": paths,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match summary {
        Some(summary) => report::print_simulation_summary(&summary),
        None => println!("No paths were simulated."),
    }
    Ok(())
}

/// Handles the logic for the `project` subcommand.
fn handle_project(
    settings: &Settings,
    price: f64,
    volatility: f64,
    avg_cost: f64,
    shares: f64,
    overrides: Overrides,
) -> Result<()> {
    let plan = simulation::plan(&settings.simulation, price, volatility, overrides);
    let paths = simulation::execute(&plan)?;
    let Some(summary) = SimulationSummary::from_paths(&paths) else {
        anyhow::bail!("Cannot project: the request produced no paths.");
    };

    report::print_simulation_summary(&summary);

    println!("\n--- Holding Outcomes ---");
    report::print_valuation("Today", price, &calculate_profit(price, avg_cost, shares));
    for (label, outcome) in [
        ("Pessimistic", summary.p5_end_price),
        ("Median", summary.median_end_price),
        ("Average", summary.mean_end_price),
        ("Optimistic", summary.p95_end_price),
    ] {
        report::print_valuation(label, outcome, &calculate_profit(outcome, avg_cost, shares));
    }

    let outcomes = analytics::value_simulated_outcomes(&paths, avg_cost, shares);
    let losing = outcomes.iter().filter(|o| o.valuation.profit < 0.0).count();
    println!(
        "\n  {} of {} paths end below cost basis.",
        losing,
        outcomes.len()
    );
    Ok(())
}

fn load_positions(file: &Path) -> Result<PortfolioFile> {
    app_config::load_portfolio(file)
        .with_context(|| format!("Failed to load holdings from {}", file.display()))
}

/// Handles the logic for the `portfolio` subcommand.
fn handle_portfolio(settings: &Settings, file: &Path) -> Result<()> {
    let portfolio = load_positions(file)?;
    tracing::info!(holdings = portfolio.holdings.len(), "Loaded holdings file.");

    let positions: Vec<PositionSnapshot> = portfolio
        .holdings
        .into_iter()
        .map(|entry| PositionSnapshot {
            holding: entry.holding,
            current_price: entry.price,
        })
        .collect();

    println!("\n--- Holdings ---");
    for position in &positions {
        let holding = &position.holding;
        match position.usable_price() {
            Some(price) => {
                let valuation = calculate_profit(price, holding.avg_cost, holding.shares);
                report::print_valuation(holding.display_name(), price, &valuation);
                let exit_fee = estimate_fee(valuation.market_value, settings.trading.fee_rate_percent);
                println!("  {:<12}   est. exit fee {:.0}", "", exit_fee);
            }
            None => println!("  {:<12} no quote available", holding.display_name()),
        }
    }

    let cash = portfolio.cash.unwrap_or(settings.trading.cash);
    let summary = summarize_portfolio(&positions, &portfolio.realized, cash);
    report::print_portfolio_summary(&summary);
    Ok(())
}

/// Handles the logic for the `sell` subcommand.
fn handle_sell(
    settings: &Settings,
    symbol: &str,
    shares: f64,
    price: f64,
    fee: Option<f64>,
    file: &Path,
) -> Result<()> {
    let portfolio = load_positions(file)?;
    let holding = portfolio
        .holdings
        .iter()
        .map(|entry| &entry.holding)
        .find(|h| h.symbol.eq_ignore_ascii_case(symbol))
        .ok_or_else(|| anyhow::anyhow!("No holding for '{}' in {}", symbol, file.display()))?;

    let fee = fee.unwrap_or_else(|| estimate_fee(price * shares, settings.trading.fee_rate_percent));
    let sale = analytics::sell(holding, shares, price, fee, chrono::Utc::now()).inspect_err(|e| {
        tracing::warn!(error = %e, "Sell preview refused.");
    })?;
    report::print_sale(&sale);
    Ok(())
}
