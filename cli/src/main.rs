//! Pricing Core CLI
//!
//! Loads a pricing table from the configuration file and quotes parking fees.
//!
//! ```sh
//! # Run with default config (~/.config/pricing-core/config.toml)
//! pricing-cli --hours 5
//!
//! # Custom config path
//! pricing-cli --config /etc/pricing-core/config.toml --minutes 95
//!
//! # Validate config without quoting
//! pricing-cli --check
//! ```

use std::path::PathBuf;

use chrono::Duration;
use clap::Parser;
use tracing::{error, info};

use pricing_core::{init_tracing, AppConfig, PricingTable};

/// Pricing Core: time-based parking fee calculator.
#[derive(Parser, Debug)]
#[command(
    name = "pricing-cli",
    version,
    about = "Inspect pricing tables and quote parking fees",
    long_about = "Pricing Core CLI: loads a tiered pricing table from a TOML \
                  config file and prices parking stays.\n\n\
                  Default config: ~/.config/pricing-core/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PRICING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file, print the table and exit.
    #[arg(long)]
    check: bool,

    /// Length of the stay in hours.
    #[arg(long, conflicts_with = "minutes")]
    hours: Option<i64>,

    /// Length of the stay in minutes.
    #[arg(long)]
    minutes: Option<i64>,

    /// Print the quote as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(pricing_core::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    let table = match config.pricing_table() {
        Ok(table) => table,
        Err(e) => {
            error!("Invalid pricing table: {}", e);
            return Err(e.into());
        }
    };

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file     : {}", config_path.display());
        print_table(&table);
        return Ok(());
    }

    let stay = match stay_length(cli.hours, cli.minutes)? {
        Some(stay) => stay,
        None => {
            print_table(&table);
            return Ok(());
        }
    };

    // ── Quote ──────────────────────────────────────────────────
    let fee = table.calculate_fee(stay)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&fee)?);
    } else {
        println!("Stay            : {} min", stay.num_minutes());
        println!("Full days       : {} ({})", fee.days, fee.days_cost);
        println!(
            "Remaining hours : {} ({})",
            fee.remaining_hours, fee.remaining_cost
        );
        println!("Total           : {}", fee.total);
    }

    Ok(())
}

/// Stay requested on the command line, if any
fn stay_length(hours: Option<i64>, minutes: Option<i64>) -> Result<Option<Duration>, String> {
    match (hours, minutes) {
        (Some(h), _) => Duration::try_hours(h)
            .map(Some)
            .ok_or_else(|| format!("--hours {} is out of range", h)),
        (None, Some(m)) => Duration::try_minutes(m)
            .map(Some)
            .ok_or_else(|| format!("--minutes {} is out of range", m)),
        (None, None) => Ok(None),
    }
}

fn print_table(table: &PricingTable) {
    for tier in table.tiers() {
        println!("   Tier            : {}", tier);
    }
    match table.max_daily_price() {
        Some(price) => println!("   Max daily price : {} (configured)", price),
        None => println!(
            "   Max daily price : {} (highest tier)",
            table.get_max_daily_price()
        ),
    }
}
