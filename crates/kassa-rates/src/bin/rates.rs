//! # Rate Table Inspector
//!
//! Loads the currency config the dashboard would load, seeds a converter
//! from it, and prints what report pages will see.
//!
//! ## Usage
//! ```bash
//! # Show seeded rates and a price sheet for $100
//! cargo run -p kassa-rates --bin rates
//!
//! # Price sheet for a custom amount and source currency
//! cargo run -p kassa-rates --bin rates -- --amount 2500 --from KSH
//!
//! # Use a specific config file
//! cargo run -p kassa-rates --bin rates -- --config ./currency.toml
//!
//! # More logging
//! RUST_LOG=kassa_core=debug cargo run -p kassa-rates --bin rates
//! ```

use std::env;
use std::path::PathBuf;

use kassa_core::format::format_large_currency;
use kassa_core::validation::{validate_amount, validate_currency_code};
use kassa_core::Currency;
use kassa_rates::{price_sheet, CurrencyState, RatesConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_AMOUNT: f64 = 100.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut amount = DEFAULT_AMOUNT;
    let mut from: Option<Currency> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--amount" | "-a" => {
                if i + 1 < args.len() {
                    amount = validate_amount(args[i + 1].as_str())?;
                    i += 1;
                }
            }
            "--from" | "-f" => {
                if i + 1 < args.len() {
                    from = Some(validate_currency_code(&args[i + 1])?);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kassa POS Rate Table Inspector");
                println!();
                println!("Usage: rates [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -a, --amount <N>     Amount to price (default: 100)");
                println!("  -f, --from <CODE>    Source currency (default: configured base)");
                println!("  -c, --config <PATH>  Currency config file (default: user config dir)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = match RatesConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            if e.is_io_error() {
                eprintln!("⚠ Could not read currency config: {}", e);
            } else {
                eprintln!("⚠ Currency config rejected: {}", e);
            }
            eprintln!("  Falling back to defaults.");
            RatesConfig::default()
        }
    };

    let from = from.unwrap_or_else(|| config.base_currency());

    println!("💱 Kassa POS Exchange Rates");
    println!("===========================");
    println!("Base currency:    {}", config.base_currency());
    println!("Display currency: {}", config.display_currency());
    let mock = if config.seed.mock_rates { "on" } else { "off" };
    println!("Mock rates:       {}", mock);
    println!();

    let state = CurrencyState::new(config);
    let converter = state.converter();

    // Rate table
    let rates = converter.rates();
    if rates.is_empty() {
        println!("⚠ No exchange rates loaded");
    } else {
        println!("Rates ({}):", rates.len());
        for rate in &rates {
            println!("  {} → {}  {}", rate.from, rate.to, rate.rate);
        }
    }

    if let Some(updated) = converter.last_updated() {
        println!("Last updated: {}", updated.to_rfc3339());
    }
    if converter.are_rates_stale() {
        println!("⚠ Rates are stale");
    } else {
        println!("✓ Rates are fresh");
    }

    // Price sheet
    println!();
    println!(
        "Price sheet for {} ({}):",
        format_large_currency(amount, from.code()),
        from.name()
    );

    for price in price_sheet(&converter, amount, from) {
        let marker = if price.converted { "✓" } else { "✗" };
        println!("  {} {}  {:>16}", marker, price.currency, price.formatted);
    }

    if from == state.config().base_currency() {
        let display = state.display_price(amount);
        println!();
        println!("Dashboard shows: {}", display.formatted);
    }

    Ok(())
}

/// Installs the fmt subscriber, honoring `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,kassa_rates=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
