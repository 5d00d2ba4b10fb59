//! Regular pay calculation.
//!
//! Hourly employees are paid `regular_hours × pay_rate`. Salaried employees
//! receive their annual salary divided by the number of pay periods in a
//! year, whatever hours they report.

use rust_decimal::Decimal;

use crate::config::PayPolicy;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{AuditStep, CompensationProfile, PayType};

/// The result of a regular pay calculation, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct RegularPayResult {
    /// Pay for the period before overtime and tips (unrounded).
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates regular pay for one pay period.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_regular_pay;
/// use payroll_engine::config::PayPolicy;
/// use payroll_engine::models::{CompensationProfile, FilingStatus, PayType};
/// use rust_decimal::Decimal;
///
/// let profile = CompensationProfile {
///     pay_type: PayType::Hourly,
///     pay_rate: Decimal::from(35),
///     retirement_rate: Decimal::ZERO,
///     filing_status: FilingStatus::Single,
/// };
///
/// let result = calculate_regular_pay(&profile, Decimal::from(75), &PayPolicy::default(), 1).unwrap();
/// assert_eq!(result.amount, Decimal::from(2625));
/// ```
pub fn calculate_regular_pay(
    profile: &CompensationProfile,
    regular_hours: Decimal,
    policy: &PayPolicy,
    step_number: u32,
) -> PayrollResult<RegularPayResult> {
    let (amount, reasoning) = match profile.pay_type {
        PayType::Hourly => {
            let amount = regular_hours
                .checked_mul(profile.pay_rate)
                .ok_or_else(|| PayrollError::Computation {
                    message: format!(
                        "regular pay overflowed: {} hours at {}",
                        regular_hours, profile.pay_rate
                    ),
                })?;
            (
                amount,
                format!(
                    "{} regular hours at hourly rate ${} = ${}",
                    regular_hours.normalize(),
                    profile.pay_rate.normalize(),
                    amount.normalize()
                ),
            )
        }
        PayType::Salary => {
            let periods = Decimal::from(policy.salary_periods_per_year);
            let amount = profile
                .pay_rate
                .checked_div(periods)
                .ok_or_else(|| PayrollError::Computation {
                    message: format!(
                        "salary {} cannot be divided into {} periods",
                        profile.pay_rate, periods
                    ),
                })?;
            (
                amount,
                format!(
                    "Annual salary ${} / {} pay periods; reported hours are not used",
                    profile.pay_rate.normalize(),
                    periods
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "regular_pay".to_string(),
        rule_name: "Regular Pay".to_string(),
        input: serde_json::json!({
            "pay_type": profile.pay_type.to_string(),
            "pay_rate": profile.pay_rate.to_string(),
            "regular_hours": regular_hours.to_string(),
        }),
        output: serde_json::json!({
            "regular_pay": amount.to_string(),
        }),
        reasoning,
    };

    Ok(RegularPayResult { amount, audit_step })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilingStatus;
    use crate::validation::round_money;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn profile(pay_type: PayType, rate: &str) -> CompensationProfile {
        CompensationProfile {
            pay_type,
            pay_rate: dec(rate),
            retirement_rate: dec("0.05"),
            filing_status: FilingStatus::Single,
        }
    }

    #[test]
    fn test_hourly_regular_pay() {
        let result =
            calculate_regular_pay(&profile(PayType::Hourly, "35"), dec("75"), &PayPolicy::default(), 1)
                .unwrap();
        assert_eq!(result.amount, dec("2625"));
        assert_eq!(result.audit_step.rule_id, "regular_pay");
    }

    #[test]
    fn test_hourly_zero_hours_is_zero() {
        let result =
            calculate_regular_pay(&profile(PayType::Hourly, "28"), Decimal::ZERO, &PayPolicy::default(), 1)
                .unwrap();
        assert_eq!(result.amount, Decimal::ZERO);
    }

    #[test]
    fn test_salary_divides_by_26() {
        let result = calculate_regular_pay(
            &profile(PayType::Salary, "75000"),
            dec("80"),
            &PayPolicy::default(),
            1,
        )
        .unwrap();
        assert_eq!(round_money(result.amount), dec("2884.62"));
    }

    #[test]
    fn test_salary_ignores_hours() {
        let policy = PayPolicy::default();
        let salaried = profile(PayType::Salary, "65000");
        let none = calculate_regular_pay(&salaried, Decimal::ZERO, &policy, 1).unwrap();
        let many = calculate_regular_pay(&salaried, dec("120"), &policy, 1).unwrap();
        assert_eq!(none.amount, many.amount);
        assert_eq!(round_money(none.amount), dec("2500.00"));
    }

    #[test]
    fn test_salary_uses_policy_divisor() {
        let policy = PayPolicy {
            salary_periods_per_year: 52,
            ..PayPolicy::default()
        };
        let result = calculate_regular_pay(&profile(PayType::Salary, "52000"), Decimal::ZERO, &policy, 1)
            .unwrap();
        assert_eq!(result.amount, dec("1000"));
    }

    #[test]
    fn test_audit_step_records_step_number_and_reasoning() {
        let result =
            calculate_regular_pay(&profile(PayType::Salary, "75000"), Decimal::ZERO, &PayPolicy::default(), 4)
                .unwrap();
        assert_eq!(result.audit_step.step_number, 4);
        assert!(result.audit_step.reasoning.contains("75000"));
        assert_eq!(result.audit_step.input["pay_type"], "salary");
    }
}
