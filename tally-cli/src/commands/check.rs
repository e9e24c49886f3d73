//! Check command - validate an event stream without settling it

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::{build_ledger, load_config, Input};
use crate::output::{create_table, success};

#[derive(Debug, Serialize)]
struct CheckSummary {
    persons: usize,
    groups: usize,
    currencies: usize,
    conversions: usize,
}

pub fn run(input: &Input, json: bool) -> Result<()> {
    let config = load_config()?;
    let ledger = build_ledger(input, !json && config.echo_definitions)?;

    let summary = CheckSummary {
        persons: ledger.registry().person_count(),
        groups: ledger.registry().group_count(),
        currencies: ledger.state().currency_count(),
        conversions: ledger.state().conversion_count(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Ledger Summary".bold());
    println!();

    let mut table = create_table();
    table.add_row(vec!["Persons", &summary.persons.to_string()]);
    table.add_row(vec!["Groups", &summary.groups.to_string()]);
    table.add_row(vec!["Currencies", &summary.currencies.to_string()]);
    table.add_row(vec!["Conversions", &summary.conversions.to_string()]);
    println!("{}", table);
    println!();

    success("All events applied cleanly");
    Ok(())
}
