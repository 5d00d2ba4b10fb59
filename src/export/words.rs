//! Check amounts written out in words.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{PayrollError, PayrollResult};
use crate::validation::round_money;

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [&str; 5] = ["", "thousand", "million", "billion", "trillion"];

/// Writes a dollar amount the way it appears on a check.
///
/// The amount is rounded to cents first. Cents are written out only when
/// non-zero.
///
/// # Errors
///
/// Returns a validation error for negative amounts or amounts of a
/// quadrillion dollars or more.
///
/// # Example
///
/// ```
/// use payroll_engine::export::amount_in_words;
/// use rust_decimal::Decimal;
///
/// assert_eq!(
///     amount_in_words(Decimal::new(216347, 2)).unwrap(),
///     "Two thousand one hundred and sixty-three dollars and forty-seven cents"
/// );
/// ```
pub fn amount_in_words(amount: Decimal) -> PayrollResult<String> {
    let amount = round_money(amount);
    if amount < Decimal::ZERO {
        return Err(PayrollError::validation(
            "amount",
            "cannot write a negative amount on a check",
        ));
    }

    let too_large = || PayrollError::validation("amount", "too large to write out");
    let dollars = amount.trunc().to_u64().ok_or_else(too_large)?;
    let cents = ((amount - amount.trunc()) * Decimal::ONE_HUNDRED)
        .to_u64()
        .ok_or_else(too_large)?;

    let mut text = dollars_in_words(dollars).ok_or_else(too_large)?;
    text.push_str(if dollars == 1 { " dollar" } else { " dollars" });
    if cents > 0 {
        text.push_str(" and ");
        text.push_str(&below_hundred(cents));
        text.push_str(if cents == 1 { " cent" } else { " cents" });
    }

    Ok(capitalize(&text))
}

fn dollars_in_words(dollars: u64) -> Option<String> {
    if dollars == 0 {
        return Some(ONES[0].to_string());
    }

    // Split into groups of three digits, lowest first.
    let mut groups = Vec::new();
    let mut rest = dollars;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }
    if groups.len() > SCALES.len() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        let is_last_group = scale == 0;
        let hundreds = group / 100;
        let remainder = group % 100;

        if hundreds > 0 {
            parts.push(format!("{} hundred", ONES[hundreds as usize]));
        }
        if remainder > 0 {
            if is_last_group && !parts.is_empty() {
                parts.push("and".to_string());
            }
            parts.push(below_hundred(remainder));
        }
        if !is_last_group {
            parts.push(SCALES[scale].to_string());
        }
    }
    Some(parts.join(" "))
}

fn below_hundred(n: u64) -> String {
    match n {
        0..=19 => ONES[n as usize].to_string(),
        _ if n % 10 == 0 => TENS[(n / 10) as usize].to_string(),
        _ => format!("{}-{}", TENS[(n / 10) as usize], ONES[(n % 10) as usize]),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn words(s: &str) -> String {
        amount_in_words(Decimal::from_str(s).unwrap()).unwrap()
    }

    #[test]
    fn test_worked_example_amounts() {
        assert_eq!(words("3350"), "Three thousand three hundred and fifty dollars");
        assert_eq!(words("2479"), "Two thousand four hundred and seventy-nine dollars");
    }

    #[test]
    fn test_small_amounts() {
        assert_eq!(words("0"), "Zero dollars");
        assert_eq!(words("0.5"), "Zero dollars and fifty cents");
        assert_eq!(words("1.01"), "One dollar and one cent");
        assert_eq!(words("12"), "Twelve dollars");
        assert_eq!(words("40"), "Forty dollars");
    }

    #[test]
    fn test_and_only_before_final_tens() {
        assert_eq!(words("1050"), "One thousand and fifty dollars");
        assert_eq!(words("700"), "Seven hundred dollars");
        assert_eq!(words("2000000"), "Two million dollars");
        assert_eq!(
            words("1234567.89"),
            "One million two hundred thirty-four thousand five hundred and sixty-seven dollars and eighty-nine cents"
        );
    }

    #[test]
    fn test_rounds_to_cents() {
        assert_eq!(words("99.999"), "One hundred dollars");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(amount_in_words(Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_too_large_rejected() {
        assert!(amount_in_words(Decimal::from(1_000_000_000_000_000u64)).is_err());
    }
}
