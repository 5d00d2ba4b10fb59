//! The pay calculator.
//!
//! [`calculate_pay`] turns a compensation profile and the hours and tips
//! reported for a pay period into gross pay, deductions and net pay. It is a
//! pure function: no I/O, no clock, identical inputs give identical output.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayPolicy;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    AuditStep, CompensationProfile, Deductions, EmployeeId, PayBreakdown, PayPeriodInput,
    PayrollRecord, RecordId, RecordStatus,
};
use crate::validation::round_money;

use super::overtime_pay::calculate_overtime_pay;
use super::regular_pay::calculate_regular_pay;
use super::withholding::{calculate_retirement, calculate_withholding};

/// Calculates gross pay, deductions and net pay for one pay period.
///
/// Gross pay is regular pay plus overtime pay plus tips, rounded to cents.
/// Tax and retirement are each rounded to cents from that gross figure,
/// other deductions are zero, and net pay is the exact remainder, so
/// `net_pay == gross_pay - deductions.total()` always holds.
///
/// # Errors
///
/// Returns [`PayrollError::Validation`] when any hours or tips are negative,
/// the pay period is reversed, the pay rate is negative or the retirement
/// rate is outside `[0, 1]`. Returns [`PayrollError::Computation`] if the
/// arithmetic overflows.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_pay;
/// use payroll_engine::config::PayPolicy;
/// use payroll_engine::models::{CompensationProfile, FilingStatus, PayPeriodInput, PayType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let profile = CompensationProfile {
///     pay_type: PayType::Hourly,
///     pay_rate: Decimal::from(35),
///     retirement_rate: Decimal::from_str("0.06").unwrap(),
///     filing_status: FilingStatus::Single,
/// };
/// let input = PayPeriodInput {
///     pay_period_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     pay_period_end: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
///     regular_hours: Decimal::from(75),
///     overtime_hours: Decimal::from(10),
///     reported_tips: Decimal::from(200),
/// };
///
/// let pay = calculate_pay(&profile, &input, &PayPolicy::default()).unwrap();
/// assert_eq!(pay.gross_pay, Decimal::from(3350));
/// assert_eq!(pay.deductions.tax, Decimal::from(670));
/// assert_eq!(pay.deductions.retirement, Decimal::from(201));
/// assert_eq!(pay.net_pay, Decimal::from(2479));
/// ```
pub fn calculate_pay(
    profile: &CompensationProfile,
    input: &PayPeriodInput,
    policy: &PayPolicy,
) -> PayrollResult<PayBreakdown> {
    profile.validate()?;
    input.validate()?;

    let mut audit_steps: Vec<AuditStep> = Vec::with_capacity(5);
    let mut step_number: u32 = 1;

    let regular = calculate_regular_pay(profile, input.regular_hours, policy, step_number)?;
    audit_steps.push(regular.audit_step);
    step_number += 1;

    let overtime = calculate_overtime_pay(profile, input.overtime_hours, policy, step_number)?;
    audit_steps.push(overtime.audit_step);
    step_number += 1;

    let tips = input.reported_tips;
    let gross_pay = regular
        .amount
        .checked_add(overtime.amount)
        .and_then(|sum| sum.checked_add(tips))
        .map(round_money)
        .ok_or_else(|| PayrollError::Computation {
            message: "gross pay overflowed".to_string(),
        })?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "regular_pay": regular.amount.to_string(),
            "overtime_pay": overtime.amount.to_string(),
            "tips": tips.to_string(),
        }),
        output: serde_json::json!({ "gross_pay": gross_pay.to_string() }),
        reasoning: format!(
            "Regular ${} + overtime ${} + tips ${} = ${}",
            round_money(regular.amount),
            round_money(overtime.amount),
            tips,
            gross_pay
        ),
    });
    step_number += 1;

    let tax = calculate_withholding(gross_pay, policy, step_number)?;
    audit_steps.push(tax.audit_step);
    step_number += 1;

    let retirement = calculate_retirement(gross_pay, profile, step_number)?;
    audit_steps.push(retirement.audit_step);

    let deductions = Deductions {
        tax: tax.amount,
        retirement: retirement.amount,
        other: Decimal::ZERO,
    };
    let net_pay = gross_pay - deductions.total()?;

    debug!(
        pay_type = %profile.pay_type,
        gross_pay = %gross_pay,
        net_pay = %net_pay,
        "Calculated pay"
    );

    Ok(PayBreakdown {
        regular_pay: round_money(regular.amount),
        overtime_pay: round_money(overtime.amount),
        tips,
        gross_pay,
        deductions,
        net_pay,
        audit_steps,
    })
}

/// Builds a pending payroll record from a calculated breakdown.
pub fn build_record(
    id: RecordId,
    employee_id: EmployeeId,
    input: &PayPeriodInput,
    breakdown: &PayBreakdown,
    created_at: DateTime<Utc>,
) -> PayrollRecord {
    PayrollRecord {
        id,
        employee_id,
        pay_period_start: input.pay_period_start,
        pay_period_end: input.pay_period_end,
        regular_hours: input.regular_hours,
        overtime_hours: input.overtime_hours,
        tips: input.reported_tips,
        gross_pay: breakdown.gross_pay,
        net_pay: breakdown.net_pay,
        deductions: breakdown.deductions,
        status: RecordStatus::Pending,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilingStatus, PayType};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn profile(pay_type: PayType, rate: &str, retirement: &str) -> CompensationProfile {
        CompensationProfile {
            pay_type,
            pay_rate: dec(rate),
            retirement_rate: dec(retirement),
            filing_status: FilingStatus::Single,
        }
    }

    fn input(regular: &str, overtime: &str, tips: &str) -> PayPeriodInput {
        PayPeriodInput {
            pay_period_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            pay_period_end: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            regular_hours: dec(regular),
            overtime_hours: dec(overtime),
            reported_tips: dec(tips),
        }
    }

    #[test]
    fn test_hourly_worked_example() {
        let pay = calculate_pay(
            &profile(PayType::Hourly, "35", "0.06"),
            &input("75", "10", "200"),
            &PayPolicy::default(),
        )
        .unwrap();

        assert_eq!(pay.regular_pay, dec("2625"));
        assert_eq!(pay.overtime_pay, dec("525"));
        assert_eq!(pay.gross_pay, dec("3350"));
        assert_eq!(pay.deductions.tax, dec("670"));
        assert_eq!(pay.deductions.retirement, dec("201"));
        assert_eq!(pay.deductions.other, Decimal::ZERO);
        assert_eq!(pay.net_pay, dec("2479"));
    }

    #[test]
    fn test_salary_worked_example() {
        let pay = calculate_pay(
            &profile(PayType::Salary, "75000", "0.05"),
            &input("80", "6", "0"),
            &PayPolicy::default(),
        )
        .unwrap();

        assert_eq!(pay.gross_pay, dec("2884.62"));
        assert_eq!(pay.overtime_pay, Decimal::ZERO);
        assert_eq!(pay.deductions.tax, dec("576.92"));
        assert_eq!(pay.deductions.retirement, dec("144.23"));
        assert_eq!(pay.net_pay, dec("2163.47"));
    }

    #[test]
    fn test_salary_with_only_tips_keeps_salary_component() {
        let pay = calculate_pay(
            &profile(PayType::Salary, "65000", "0.04"),
            &input("0", "0", "150"),
            &PayPolicy::default(),
        )
        .unwrap();
        assert_eq!(pay.regular_pay, dec("2500"));
        assert_eq!(pay.gross_pay, dec("2650"));
    }

    #[test]
    fn test_hourly_zero_hours_tips_flow_through() {
        let pay = calculate_pay(
            &profile(PayType::Hourly, "28", "0.05"),
            &input("0", "0", "80"),
            &PayPolicy::default(),
        )
        .unwrap();
        assert_eq!(pay.regular_pay, Decimal::ZERO);
        assert_eq!(pay.overtime_pay, Decimal::ZERO);
        assert_eq!(pay.gross_pay, dec("80"));
        assert_eq!(pay.deductions.tax, dec("16"));
        assert_eq!(pay.net_pay, dec("60"));
    }

    #[test]
    fn test_net_equals_gross_minus_deductions() {
        let pay = calculate_pay(
            &profile(PayType::Hourly, "17.33", "0.07"),
            &input("41.5", "3.25", "12.99"),
            &PayPolicy::default(),
        )
        .unwrap();
        assert_eq!(pay.net_pay, pay.gross_pay - pay.deductions.total().unwrap());
        assert_eq!(pay.gross_pay.scale(), 2);
    }

    #[test]
    fn test_negative_hours_rejected() {
        let result = calculate_pay(
            &profile(PayType::Hourly, "35", "0.06"),
            &input("-1", "0", "0"),
            &PayPolicy::default(),
        );
        assert!(matches!(result, Err(PayrollError::Validation { .. })));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = calculate_pay(
            &profile(PayType::Hourly, "-35", "0.06"),
            &input("10", "0", "0"),
            &PayPolicy::default(),
        );
        match result {
            Err(PayrollError::Validation { field, .. }) => assert_eq!(field, "pay_rate"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_amounts_are_computation_errors() {
        let mut huge = profile(PayType::Hourly, "1", "1");
        huge.pay_rate = Decimal::MAX;
        let result = calculate_pay(&huge, &input("1", "0", "0"), &PayPolicy::default());
        assert!(matches!(result, Err(PayrollError::Computation { .. })));
    }

    #[test]
    fn test_audit_trace_lists_every_rule_in_order() {
        let pay = calculate_pay(
            &profile(PayType::Hourly, "35", "0.06"),
            &input("75", "10", "200"),
            &PayPolicy::default(),
        )
        .unwrap();
        let rules: Vec<&str> = pay.audit_steps.iter().map(|s| s.rule_id.as_str()).collect();
        assert_eq!(
            rules,
            vec![
                "regular_pay",
                "overtime_pay",
                "gross_pay",
                "flat_withholding",
                "retirement_contribution"
            ]
        );
        let numbers: Vec<u32> = pay.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let p = profile(PayType::Salary, "55000", "0.04");
        let i = input("80", "0", "25");
        let policy = PayPolicy::default();
        assert_eq!(
            calculate_pay(&p, &i, &policy).unwrap(),
            calculate_pay(&p, &i, &policy).unwrap()
        );
    }

    #[test]
    fn test_build_record_is_pending_and_consistent() {
        let i = input("75", "10", "200");
        let pay = calculate_pay(&profile(PayType::Hourly, "35", "0.06"), &i, &PayPolicy::default())
            .unwrap();
        let record = build_record(9, 2, &i, &pay, Utc::now());

        assert_eq!(record.id, 9);
        assert_eq!(record.employee_id, 2);
        assert_eq!(record.status, RecordStatus::Pending);
        assert_eq!(record.tips, dec("200"));
        assert!(record.verify_integrity().is_ok());
    }
}
