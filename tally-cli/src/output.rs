//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{}", msg.yellow());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Round half away from zero, never producing a negative zero
pub fn round_amount(amount: f64, precision: u32) -> Option<Decimal> {
    let rounded = Decimal::from_f64(amount)?
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Some(Decimal::ZERO)
    } else {
        Some(rounded)
    }
}

/// Format an amount with a fixed number of decimal places
pub fn format_amount(amount: f64, precision: u32) -> String {
    match round_amount(amount, precision) {
        Some(value) => format!("{:.*}", precision as usize, value),
        None => amount.to_string(),
    }
}

/// Round an amount for re-use as a plain number
pub fn rounded_f64(amount: f64, precision: u32) -> f64 {
    round_amount(amount, precision)
        .and_then(|d| d.to_f64())
        .unwrap_or(amount)
}

/// Color a balance by sign (owed money green, owing money red)
pub fn colored_balance(amount: f64, precision: u32) -> String {
    let text = format_amount(amount, precision);
    match round_amount(amount, precision) {
        Some(d) if d.is_sign_positive() && !d.is_zero() => text.green().to_string(),
        Some(d) if d.is_sign_negative() => text.red().to_string(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_pads_and_rounds() {
        assert_eq!(format_amount(10.0, 2), "10.00");
        assert_eq!(format_amount(10.0 / 3.0, 2), "3.33");
        assert_eq!(format_amount(2.675, 1), "2.7");
        assert_eq!(format_amount(-0.0001, 2), "0.00");
    }

    #[test]
    fn test_rounded_f64() {
        assert_eq!(rounded_f64(16.000000000000004, 2), 16.0);
        assert!(rounded_f64(f64::NAN, 2).is_nan());
    }
}
