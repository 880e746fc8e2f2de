//! Monetary rounding and formatting helpers.
//!
//! All monetary values in Prestito are `rust_decimal::Decimal`. Output values
//! always carry exactly two fractional digits, rounded half-up
//! (midpoint away from zero). Formatting follows Italian conventions:
//! `.` groups thousands, `,` separates decimals.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round a monetary value to two decimal places, half-up.
///
/// The result is rescaled so it always displays two fractional digits
/// (`100` becomes `100.00`).
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Format a monetary value as euros: `€ 1.234,56`.
pub fn format_eur(amount: Decimal) -> String {
    let rounded = round_currency(amount);
    let text = rounded.abs().to_string();
    let (euros, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(euros.len() + euros.len() / 3);
    for (i, ch) in euros.chars().enumerate() {
        if i > 0 && (euros.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("€ {sign}{grouped},{cents}")
}

/// Format a percentage with a decimal comma: `7,86%`.
pub fn format_percent(rate: Decimal) -> String {
    let mut rounded = rate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{}%", rounded.to_string().replace('.', ","))
}
