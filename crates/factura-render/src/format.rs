//! # Display Formatting
//!
//! The ONLY place amounts are rounded. The pricing engine returns
//! full-precision values; these helpers clip them to two decimals for
//! human eyes. Nothing formatted here ever flows back into arithmetic.

use chrono::NaiveDate;

/// Formats an amount with two decimals ("100.00").
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Formats an amount with the euro sign ("100.00 €").
pub fn format_eur(value: f64) -> String {
    format!("{:.2} €", value)
}

/// Formats a date as dd/mm/YYYY ("05/03/2024").
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
