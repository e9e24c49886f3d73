//! Plain-text event source
//!
//! Events are written one per line as whitespace-separated words, the same
//! form `Display` produces for them:
//!
//! ```text
//! # comments start with a hash
//! def person alice al
//! def group flat alice bob
//! def currency usd
//! alice paid 30usd for flat carol
//! convert 10usd to 8eur
//! ```
//!
//! A value is a single word whose digits, `.` and `,` make up the amount and
//! whose remaining characters make up the currency name.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::result::{Error, Result};
use crate::domain::{
    CurrencyConversion, CurrencyDefinition, Event, GroupDefinition, PersonDefinition, Transaction,
};
use crate::ports::EventSource;

/// Parse a single non-comment line into an event
pub fn parse_line(line: &str) -> std::result::Result<Event, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [] => Err("empty line".to_string()),
        ["def", "person", name, aliases @ ..] => {
            Ok(PersonDefinition::new(*name).with_aliases(aliases.iter().copied()).into())
        }
        ["def", "group", name, members @ ..] => {
            Ok(GroupDefinition::new(*name, members.iter().copied()).into())
        }
        ["def", "currency", name] => Ok(CurrencyDefinition::new(*name).into()),
        ["def", "currency", _, _, ..] => {
            Err("currency definition takes exactly one name".to_string())
        }
        ["def", kind, _, ..] if !matches!(*kind, "person" | "group" | "currency") => {
            Err(format!("unknown definition \"{}\"", kind))
        }
        ["def", ..] => Err("definition is missing a name".to_string()),
        ["convert", from, "to", to] => {
            let (source_amount, source_currency) = parse_value(from)?;
            let (target_amount, target_currency) = parse_value(to)?;
            Ok(CurrencyConversion::new(source_amount, source_currency, target_amount, target_currency).into())
        }
        _ => parse_transaction(&tokens),
    }
}

fn parse_transaction(tokens: &[&str]) -> std::result::Result<Event, String> {
    let paid = tokens
        .iter()
        .position(|t| *t == "paid")
        .ok_or("transaction is missing the \"paid\" keyword")?;
    let (payers, rest) = tokens.split_at(paid);
    if payers.is_empty() {
        return Err("transaction has no payers".to_string());
    }

    match rest {
        ["paid", value, "for", payees @ ..] if !payees.is_empty() => {
            let (amount, currency) = parse_value(value)?;
            Ok(Transaction::new(payers.iter().copied(), amount, currency, payees.iter().copied()).into())
        }
        _ => Err("expected \"<payers> paid <amount><currency> for <payees>\"".to_string()),
    }
}

fn parse_value(token: &str) -> std::result::Result<(f64, String), String> {
    let (amount, currency): (String, String) = token
        .chars()
        .partition(|c| c.is_ascii_digit() || *c == '.' || *c == ',');
    if amount.is_empty() || currency.is_empty() {
        return Err(format!("invalid value \"{}\"", token));
    }
    let amount = amount
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| format!("invalid amount in \"{}\"", token))?;
    Ok((amount, currency))
}

/// Streams events written in the plain-text line form
pub struct LineSource<R> {
    reader: R,
    buffer: String,
    line: usize,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line: 0,
        }
    }

    /// Number of input lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl LineSource<BufReader<File>> {
    /// Open a file for streaming
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> EventSource for LineSource<R> {
    fn name(&self) -> &str {
        "line-format"
    }

    fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = self.buffer.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let line = self.line;
            return parse_line(trimmed)
                .map(Some)
                .map_err(|message| Error::parse(line, message));
        }
    }
}
