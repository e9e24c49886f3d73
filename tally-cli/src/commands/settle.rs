//! Settle command - suggest payments that zero out every balance

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use tally_core::{CurrencySettlement, EntityRegistry};

use super::{build_ledger, load_config, Input};
use crate::output::{create_table, format_amount, rounded_f64, success};

/// One rendered payment
///
/// Recording "`paid_by` paid `amount` for `paid_for`" brings both
/// balances to zero.
#[derive(Debug, Serialize)]
struct SettlementRow {
    currency: String,
    paid_by: String,
    amount: String,
    paid_for: String,
}

pub fn run(input: &Input, currency: Option<&str>, format: &str, echo: bool) -> Result<()> {
    let config = load_config()?;
    let echo = (echo || config.echo_definitions) && matches!(format, "table" | "lines");
    let mut ledger = build_ledger(input, echo)?;

    let (registry, settlements) = match currency {
        Some(name) => {
            let instructions = ledger
                .settle_currency(name)
                .with_context(|| format!("Failed to settle {}", name))?;
            let (registry, _) = ledger.into_parts();
            let settlement = CurrencySettlement {
                currency: name.to_string(),
                instructions,
            };
            (registry, vec![settlement])
        }
        None => ledger.settle_all()?,
    };
    let registry = &registry;

    match format {
        "lines" => print_lines(registry, &settlements, config.precision),
        "json" => {
            let rows = to_rows(registry, &settlements, config.precision)?;
            println!("{}", serde_json::to_string_pretty(&rows)?);
            Ok(())
        }
        "csv" => {
            let rows = to_rows(registry, &settlements, config.precision)?;
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
            Ok(())
        }
        _ => print_table(registry, &settlements, config.precision),
    }
}

fn to_rows(
    registry: &EntityRegistry,
    settlements: &[CurrencySettlement],
    precision: u32,
) -> Result<Vec<SettlementRow>> {
    let mut rows = Vec::new();
    for settlement in settlements {
        for instruction in &settlement.instructions {
            let tx = instruction.to_transaction(registry, &settlement.currency)?;
            rows.push(SettlementRow {
                currency: settlement.currency.clone(),
                paid_by: tx.payers.join(" "),
                amount: format_amount(tx.amount, precision),
                paid_for: tx.payees.join(" "),
            });
        }
    }
    Ok(rows)
}

/// Print payments in the ledger's own line form
fn print_lines(
    registry: &EntityRegistry,
    settlements: &[CurrencySettlement],
    precision: u32,
) -> Result<()> {
    for settlement in settlements {
        for instruction in &settlement.instructions {
            let mut tx = instruction.to_transaction(registry, &settlement.currency)?;
            tx.amount = rounded_f64(tx.amount, precision);
            println!("{}", tx);
        }
    }
    Ok(())
}

fn print_table(
    registry: &EntityRegistry,
    settlements: &[CurrencySettlement],
    precision: u32,
) -> Result<()> {
    for settlement in settlements {
        println!("{}", settlement.currency.bold());

        if settlement.instructions.is_empty() {
            success("  Already settled");
            println!();
            continue;
        }

        let mut table = create_table();
        table.set_header(vec!["Paid by", "Amount", "Paid for"]);
        for row in to_rows(registry, std::slice::from_ref(settlement), precision)? {
            table.add_row(vec![row.paid_by, row.amount, row.paid_for]);
        }
        println!("{}", table);
        println!(
            "{} payment(s) settle {}",
            settlement.instructions.len(),
            settlement.currency
        );
        println!();
    }
    Ok(())
}
