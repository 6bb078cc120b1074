// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{PortfolioFile, Settings, SimulationSettings, TradingSettings};

/// Loads the application settings from the `config/` directory.
///
/// The environment name comes from `APP_ENVIRONMENT` and defaults to "development".
pub fn load_settings() -> Result<Settings> {
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// Loads settings from an explicit directory.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables (e.g., `APP__SIMULATION__PATH_COUNT=200`).
pub fn load_settings_from(config_dir: &Path, environment: &str) -> Result<Settings> {
    let base = config_dir.join("base");
    let env_file = config_dir.join(environment);

    let settings = Config::builder()
        .add_source(File::with_name(&base.to_string_lossy()))
        .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

/// Loads the holdings file used by the `portfolio` command.
pub fn load_portfolio(path: &Path) -> Result<PortfolioFile> {
    let content = std::fs::read_to_string(path)?;
    parse_portfolio(&content)
}

pub fn parse_portfolio(content: &str) -> Result<PortfolioFile> {
    let portfolio: PortfolioFile = toml::from_str(content)?;
    Ok(portfolio)
}
