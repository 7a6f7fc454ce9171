//! Command-line interface parsing
//!
//! Startup flags let the user override the persisted selection for one run:
//! `cambio --from USD --to JPY --amount 250`. Currency codes are validated
//! against the static catalog before the TUI starts.

use clap::Parser;
use thiserror::Error;

use crate::data::{get_currency_by_code, Currency};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified currency code is not in the catalog
    #[error("Unknown currency: '{0}'. Supported: USD, EUR, GBP, JPY, RUB, CNY, CHF, CAD, AUD")]
    UnknownCurrency(String),
}

/// cambio - terminal currency converter
#[derive(Parser, Debug)]
#[command(name = "cambio")]
#[command(about = "Convert currencies with live exchange rates")]
#[command(version)]
pub struct Cli {
    /// Source currency code (overrides the saved selection)
    #[arg(long, value_name = "CODE")]
    pub from: Option<String>,

    /// Target currency code (overrides the saved selection)
    #[arg(long, value_name = "CODE")]
    pub to: Option<String>,

    /// Initial amount (overrides the saved amount)
    #[arg(long, value_name = "AMOUNT")]
    pub amount: Option<String>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Override for the source currency
    pub from: Option<&'static Currency>,
    /// Override for the target currency
    pub to: Option<&'static Currency>,
    /// Override for the amount text
    pub amount: Option<String>,
}

/// Resolves a CLI currency code against the catalog, case-insensitively
pub fn parse_currency_arg(code: &str) -> Result<&'static Currency, CliError> {
    get_currency_by_code(&code.to_uppercase())
        .ok_or_else(|| CliError::UnknownCurrency(code.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with validated overrides
    /// * `Err(CliError)` if a currency code is not in the catalog
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let from = cli.from.as_deref().map(parse_currency_arg).transpose()?;
        let to = cli.to.as_deref().map(parse_currency_arg).transpose()?;
        Ok(StartupConfig {
            from,
            to,
            amount: cli.amount.clone(),
        })
    }
}
