//! Pay period input model.
//!
//! This module contains the [`PayPeriodInput`] type: the hours and tips an
//! employee reports for one pay period, as supplied by a form or a CSV row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;
use crate::error::PayrollResult;
use crate::validation::{ensure_non_negative, ensure_period};

/// The hours and tips reported for one pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriodInput;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = PayPeriodInput {
///     pay_period_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     pay_period_end: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
///     regular_hours: Decimal::from(80),
///     overtime_hours: Decimal::from(5),
///     reported_tips: Decimal::ZERO,
/// };
///
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriodInput {
    /// The first day of the pay period (inclusive).
    pub pay_period_start: NaiveDate,
    /// The last day of the pay period (inclusive).
    pub pay_period_end: NaiveDate,
    /// Regular hours worked.
    #[serde(default)]
    pub regular_hours: Decimal,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Tips reported for the period.
    #[serde(default, alias = "tips")]
    pub reported_tips: Decimal,
}

impl PayPeriodInput {
    /// Checks the period is ordered and no amount is negative.
    pub fn validate(&self) -> PayrollResult<()> {
        ensure_period(self.pay_period_start, self.pay_period_end)?;
        ensure_non_negative("regular_hours", self.regular_hours)?;
        ensure_non_negative("overtime_hours", self.overtime_hours)?;
        ensure_non_negative("reported_tips", self.reported_tips)?;
        Ok(())
    }
}

/// A pay period submitted for a specific employee.
///
/// The period fields are flattened, so a submission reads as the period
/// object with an extra `employee_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriodSubmission {
    /// The employee the period belongs to.
    pub employee_id: EmployeeId,
    /// Hours and tips for the period.
    #[serde(flatten)]
    pub period: PayPeriodInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayrollError;

    fn create_test_input() -> PayPeriodInput {
        PayPeriodInput {
            pay_period_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            pay_period_end: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            regular_hours: Decimal::from(75),
            overtime_hours: Decimal::from(10),
            reported_tips: Decimal::from(200),
        }
    }

    #[test]
    fn test_deserialize_with_tips_alias_and_defaults() {
        let json = r#"{
            "pay_period_start": "2024-03-01",
            "pay_period_end": "2024-03-15",
            "regular_hours": "80",
            "tips": "12.50"
        }"#;

        let input: PayPeriodInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.regular_hours, Decimal::from(80));
        assert_eq!(input.overtime_hours, Decimal::ZERO);
        assert_eq!(input.reported_tips, Decimal::new(1250, 2));
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(create_test_input().validate().is_ok());
    }

    #[test]
    fn test_negative_overtime_rejected() {
        let mut input = create_test_input();
        input.overtime_hours = Decimal::from(-2);
        match input.validate() {
            Err(PayrollError::Validation { field, .. }) => assert_eq!(field, "overtime_hours"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_tips_rejected() {
        let mut input = create_test_input();
        input.reported_tips = Decimal::new(-1, 2);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_reversed_period_rejected() {
        let mut input = create_test_input();
        input.pay_period_end = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_submission_reads_flattened_period() {
        let json = r#"{
            "employee_id": 4,
            "pay_period_start": "2024-03-01",
            "pay_period_end": "2024-03-15",
            "regular_hours": "75"
        }"#;

        let submission: PayPeriodSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.employee_id, 4);
        assert_eq!(submission.period.regular_hours, Decimal::from(75));
        assert_eq!(submission.period.reported_tips, Decimal::ZERO);
    }
}
