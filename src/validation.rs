//! Shared data-validation helpers.
//!
//! These helpers are used by the models, the pay calculator and the CSV
//! importers so that every entry path rejects the same inputs with the
//! same messages.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{PayrollError, PayrollResult};

/// Number of decimal places carried by monetary output.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary amount to cents, half away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::validation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let salary_period = Decimal::from(75000) / Decimal::from(26);
/// assert_eq!(round_money(salary_period), Decimal::from_str("2884.62").unwrap());
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()), Decimal::from_str("0.13").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Adds monetary amounts, failing with a computation error on overflow.
///
/// `what` names the total in the error message.
pub fn checked_sum(what: &str, amounts: impl IntoIterator<Item = Decimal>) -> PayrollResult<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .ok_or_else(|| PayrollError::Computation {
                message: format!("{} overflowed", what),
            })
    })
}

/// Fails with a validation error if `value` is negative.
pub fn ensure_non_negative(field: &str, value: Decimal) -> PayrollResult<Decimal> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PayrollError::validation(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(value)
}

/// Fails with a validation error unless `0 <= value <= 1`.
pub fn ensure_fraction(field: &str, value: Decimal) -> PayrollResult<Decimal> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(PayrollError::validation(
            field,
            format!("must be between 0 and 1 (got {})", value),
        ));
    }
    Ok(value)
}

/// Fails with a validation error if the period ends before it starts.
pub fn ensure_period(start: NaiveDate, end: NaiveDate) -> PayrollResult<()> {
    if start > end {
        return Err(PayrollError::validation(
            "pay_period_end",
            format!("period ends ({}) before it starts ({})", end, start),
        ));
    }
    Ok(())
}

/// Fails with a validation error if a required text field is blank.
pub fn ensure_present<'a>(field: &str, value: &'a str) -> PayrollResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PayrollError::validation(field, "is required"));
    }
    Ok(trimmed)
}

/// Parses a decimal amount from user-supplied text.
///
/// Blank text is a missing field; anything that is not a plain decimal
/// number (including `NaN` and `inf`) is rejected.
pub fn parse_decimal(field: &str, raw: &str) -> PayrollResult<Decimal> {
    let text = ensure_present(field, raw)?;
    text.parse::<Decimal>()
        .map_err(|_| PayrollError::validation(field, format!("'{}' is not a number", text)))
}

/// Parses an ISO `YYYY-MM-DD` date from user-supplied text.
pub fn parse_date(field: &str, raw: &str) -> PayrollResult<NaiveDate> {
    let text = ensure_present(field, raw)?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
        PayrollError::validation(field, format!("'{}' is not a YYYY-MM-DD date", text))
    })
}
