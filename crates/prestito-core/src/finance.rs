//! Monthly payment computation.
//!
//! Fixed French amortization formula: with monthly rate
//! `r = TAN / 12 / 100`, the payment over `n` months is
//! `P * r / (1 - (1 + r)^-n)`; when `r` is zero the payment degenerates to
//! `P / n`. Results carry exactly two fractional digits, rounded half-up.

use prestito_types::error::FinanceError;
use prestito_types::money::round_currency;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Compute the monthly payment for a loan.
///
/// `nominal_rate` is the annual nominal rate (TAN) as a percentage, e.g.
/// `7.86`. Callers must have validated `term_months >= 1` upstream; a zero
/// term is rejected here as [`FinanceError::ZeroTerm`] rather than dividing
/// by zero.
pub fn monthly_payment(
    principal: Decimal,
    term_months: u32,
    nominal_rate: Decimal,
) -> Result<Decimal, FinanceError> {
    if term_months == 0 {
        return Err(FinanceError::ZeroTerm);
    }

    if nominal_rate.is_zero() {
        return Ok(round_currency(principal / Decimal::from(term_months)));
    }

    let principal_f = principal.to_f64().ok_or(FinanceError::OutOfRange)?;
    let rate_f = nominal_rate.to_f64().ok_or(FinanceError::OutOfRange)?;

    let monthly_rate = rate_f / 12.0 / 100.0;
    let payment =
        principal_f * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-(term_months as i32)));

    // NaN and infinities fall out of from_f64 as None.
    let value = Decimal::from_f64(payment).ok_or(FinanceError::OutOfRange)?;
    Ok(round_currency(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reference_payment() {
        // 10_000 over 36 months at TAN 7.86%
        let payment = monthly_payment(dec("10000"), 36, dec("7.86")).unwrap();
        assert_eq!(payment, dec("312.72"));
    }

    #[test]
    fn test_half_principal_half_payment() {
        let payment = monthly_payment(dec("5000"), 36, dec("7.86")).unwrap();
        assert_eq!(payment, dec("156.36"));
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        assert_eq!(
            monthly_payment(dec("10000"), 36, Decimal::ZERO).unwrap(),
            dec("277.78")
        );
        assert_eq!(
            monthly_payment(dec("1000"), 10, Decimal::ZERO).unwrap(),
            dec("100.00")
        );
    }

    #[test]
    fn test_zero_term_is_an_error() {
        assert!(matches!(
            monthly_payment(dec("10000"), 0, dec("7.86")),
            Err(FinanceError::ZeroTerm)
        ));
    }

    #[test]
    fn test_single_month_repays_principal_plus_interest() {
        // One installment: P * (1 + r) with r = 12 / 12 / 100 = 0.01
        let payment = monthly_payment(dec("1000"), 1, dec("12")).unwrap();
        assert_eq!(payment, dec("1010.00"));
    }

    #[test]
    fn test_output_always_two_decimals() {
        let payment = monthly_payment(dec("9999.99"), 12, dec("5")).unwrap();
        assert_eq!(payment, dec("856.07"));
        assert_eq!(payment.scale(), 2);
    }
}
