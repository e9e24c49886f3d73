//! Balances command - show each person's net position per currency

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;
use tally_core::Ledger;

use super::{build_ledger, load_config, Input};
use crate::output::{colored_balance, create_table, rounded_f64, warning};

#[derive(Debug, Serialize)]
struct PersonBalances {
    id: usize,
    person: String,
    balances: BTreeMap<String, f64>,
}

pub fn run(input: &Input, currency: Option<&str>, json: bool) -> Result<()> {
    let config = load_config()?;
    let ledger = build_ledger(input, !json && config.echo_definitions)?;

    let currencies: Vec<&str> = match currency {
        Some(name) => {
            if ledger.debts(name).is_none() {
                anyhow::bail!("Currency \"{}\" is not defined", name);
            }
            vec![name]
        }
        None => ledger.state().currency_names().collect(),
    };

    if json {
        let rows = collect_balances(&ledger, &currencies, config.precision);
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if ledger.person_count() == 0 || currencies.is_empty() {
        warning("No balances to show.");
        return Ok(());
    }

    for (source, rule) in ledger.state().conversions() {
        println!("{} is converted into {} at {}", source, rule.target, rule.rate);
    }

    let mut header = vec!["Person".to_string()];
    header.extend(currencies.iter().map(|c| c.to_string()));

    let mut table = create_table();
    table.set_header(header);
    for (id, name) in ledger.registry().canonical_names().enumerate() {
        let mut row = vec![name.to_string()];
        for currency in &currencies {
            let amount = ledger.debts(currency).map(|d| d[id]).unwrap_or(0.0);
            row.push(colored_balance(amount, config.precision));
        }
        table.add_row(row);
    }
    println!("{}", table);

    Ok(())
}

fn collect_balances(ledger: &Ledger, currencies: &[&str], precision: u32) -> Vec<PersonBalances> {
    ledger
        .registry()
        .canonical_names()
        .enumerate()
        .map(|(id, name)| PersonBalances {
            id,
            person: name.to_string(),
            balances: currencies
                .iter()
                .filter_map(|c| {
                    ledger
                        .debts(c)
                        .map(|d| (c.to_string(), rounded_f64(d[id], precision)))
                })
                .collect(),
        })
        .collect()
}
