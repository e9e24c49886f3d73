//! Tally CLI - settle shared expenses from your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{balances, check, settle, Input, InputFormat};

/// Tally - split shared expenses and settle them with few payments
#[derive(Parser)]
#[command(name = "tally", version, about, long_about = None)]
struct Cli {
    /// How input events are written
    #[arg(long, global = true, value_enum, default_value_t = InputFormat::Json)]
    input: InputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest payments that settle every balance
    Settle {
        /// Read events from file; defaults to stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Settle only this currency
        #[arg(short, long)]
        currency: Option<String>,
        /// Output format
        #[arg(long, default_value = "table", value_parser = ["table", "lines", "json", "csv"])]
        format: String,
        /// Output as JSON (shorthand for --format json)
        #[arg(long)]
        json: bool,
        /// Print definitions while reading events
        #[arg(long)]
        echo: bool,
    },

    /// Show net balances per person and currency
    Balances {
        /// Read events from file; defaults to stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Show only this currency
        #[arg(short, long)]
        currency: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate events and summarize the ledger
    Check {
        /// Read events from file; defaults to stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match commands::load_config() {
        Ok(config) => tally_core::services::logging::init(&config.log_level),
        Err(_) => tally_core::services::logging::init(tally_core::services::logging::DEFAULT_LOG_LEVEL),
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let format = cli.input;
    match cli.command {
        Commands::Settle { file, currency, format: output, json, echo } => {
            let fmt = if json { "json".to_string() } else { output };
            settle::run(&Input { file, format }, currency.as_deref(), &fmt, echo)
        }
        Commands::Balances { file, currency, json } => {
            balances::run(&Input { file, format }, currency.as_deref(), json)
        }
        Commands::Check { file, json } => check::run(&Input { file, format }, json),
    }
}
