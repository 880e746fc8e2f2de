//! Locale-tolerant parsing of free-text user input.
//!
//! Users type amounts the way they write them: with a euro sign, with
//! spaces, with either `,` or `.` as the decimal separator, sometimes with
//! thousands grouping. These functions normalize all of that before
//! parsing.
//!
//! Strictness is deliberately uneven: amounts and durations fail with a
//! typed error (the conversation re-prompts), while percentages silently
//! fall back to the configured default on malformed input.

use prestito_types::error::ParseError;
use prestito_types::money::round_currency;
use rust_decimal::{Decimal, RoundingStrategy};

use std::str::FromStr;

/// Strip currency symbols and whitespace, then reduce `,`/`.` usage to a
/// single canonical decimal point.
///
/// Rules:
/// - only one kind of separator, appearing once: it is the decimal point;
/// - only one kind, appearing more than once: thousands grouping, dropped;
/// - both kinds present: the rightmost one is the decimal point, the other
///   is grouping.
fn normalize_numeric(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '€')
        .collect();

    let commas = cleaned.matches(',').count();
    let dots = cleaned.matches('.').count();

    match (commas, dots) {
        (0, 0) | (0, 1) => cleaned,
        (1, 0) => cleaned.replace(',', "."),
        (0, _) => cleaned.replace('.', ""),
        (_, 0) => cleaned.replace(',', ""),
        _ => {
            if cleaned.rfind(',') > cleaned.rfind('.') {
                cleaned.replace('.', "").replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
    }
}

/// Parse a monetary amount.
///
/// Accepts `"100"`, `"100,50"`, `"€ 100,50"`, `" 100.50 "`, `"1.234,56"`,
/// `"1,234.56"`. Rejects empty, non-numeric, and negative input with
/// [`ParseError::InvalidAmount`]. The result carries exactly two fractional
/// digits, rounded half-up.
pub fn parse_currency(raw: &str) -> Result<Decimal, ParseError> {
    let normalized = normalize_numeric(raw);
    if normalized.is_empty() {
        return Err(ParseError::InvalidAmount(raw.trim().to_string()));
    }

    let value = Decimal::from_str(&normalized)
        .map_err(|_| ParseError::InvalidAmount(raw.trim().to_string()))?;

    if value.is_sign_negative() {
        return Err(ParseError::InvalidAmount(raw.trim().to_string()));
    }

    Ok(round_currency(value))
}

/// Parse a loan term as a whole number of months, at least one.
pub fn parse_term(raw: &str) -> Result<u32, ParseError> {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(months) if months >= 1 => Ok(months),
        _ => Err(ParseError::InvalidDuration(trimmed.to_string())),
    }
}

/// Parse an optional percentage, falling back to `default`.
///
/// Empty input means "use the default". Malformed or negative input also
/// yields the default instead of an error -- the optional-rate prompts are
/// deliberately lenient, unlike amount and duration.
pub fn parse_rate_or_default(raw: &str, default: Decimal) -> Decimal {
    let without_percent = raw.replace('%', "");
    let normalized = normalize_numeric(&without_percent);
    if normalized.is_empty() {
        return default;
    }

    match Decimal::from_str(&normalized) {
        Ok(value) if !value.is_sign_negative() => {
            value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        }
        _ => default,
    }
}
