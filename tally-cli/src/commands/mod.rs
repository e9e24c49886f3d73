//! CLI command implementations

pub mod balances;
pub mod check;
pub mod settle;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tally_core::{Config, Event, EventSource, JsonLinesSource, Ledger, LineSource};

/// How input events are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One JSON object per line, tagged by `type`
    Json,
    /// Plain-text lines such as `alice paid 30usd for bob`
    Lines,
}

/// Where events are read from
#[derive(Debug, Clone)]
pub struct Input {
    pub file: Option<PathBuf>,
    pub format: InputFormat,
}

/// Get the tally directory from environment or default
pub fn get_tally_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("TALLY_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .map(|home| home.join(".tally"))
            .unwrap_or_else(|| PathBuf::from(".tally"))
    }
}

/// Load configuration for this run
pub fn load_config() -> Result<Config> {
    let tally_dir = get_tally_dir();
    Config::load(&tally_dir)
        .with_context(|| format!("Failed to load settings from {:?}", tally_dir))
}

/// Open the event input: a file if given, otherwise piped stdin
pub fn open_source(input: &Input) -> Result<Box<dyn EventSource>> {
    let reader: Box<dyn BufRead> = if let Some(path) = input.file.as_deref() {
        let file = File::open(path)
            .with_context(|| format!("Failed to open event file: {:?}", path))?;
        Box::new(BufReader::new(file))
    } else if atty::isnt(atty::Stream::Stdin) {
        Box::new(io::stdin().lock())
    } else {
        anyhow::bail!("No events provided. Use --file or pipe events on stdin.");
    };

    Ok(match input.format {
        InputFormat::Json => Box::new(JsonLinesSource::new(reader)),
        InputFormat::Lines => Box::new(LineSource::new(reader)),
    })
}

/// Fold the whole input into a ledger
///
/// With `echo`, person/group/currency definitions are printed as they are
/// read.
pub fn build_ledger(input: &Input, echo: bool) -> Result<Ledger> {
    let mut source = open_source(input)?;
    let name = source.name().to_string();
    let ledger = Ledger::from_source_with(source.as_mut(), |event: &Event| {
        if echo && event.is_definition() {
            println!("{}", event);
        }
    })
    .with_context(|| format!("Failed to process {} input", name))?;

    if echo {
        println!();
    }
    Ok(ledger)
}
