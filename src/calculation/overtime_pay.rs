//! Overtime pay calculation.
//!
//! Hourly employees earn the overtime multiplier (time and a half by
//! default) for every overtime hour. Salaried employees are not paid
//! overtime.

use rust_decimal::Decimal;

use crate::config::PayPolicy;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{AuditStep, CompensationProfile, PayType};

/// The result of an overtime pay calculation.
#[derive(Debug, Clone)]
pub struct OvertimePayResult {
    /// The rate paid per overtime hour (zero for salaried employees).
    pub overtime_rate: Decimal,
    /// Overtime pay for the period.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates overtime pay for one pay period.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_overtime_pay;
/// use payroll_engine::config::PayPolicy;
/// use payroll_engine::models::{CompensationProfile, FilingStatus, PayType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let profile = CompensationProfile {
///     pay_type: PayType::Hourly,
///     pay_rate: Decimal::from(35),
///     retirement_rate: Decimal::ZERO,
///     filing_status: FilingStatus::Single,
/// };
///
/// let result = calculate_overtime_pay(&profile, Decimal::from(10), &PayPolicy::default(), 2).unwrap();
/// assert_eq!(result.overtime_rate, Decimal::from_str("52.5").unwrap());
/// assert_eq!(result.amount, Decimal::from(525));
/// ```
pub fn calculate_overtime_pay(
    profile: &CompensationProfile,
    overtime_hours: Decimal,
    policy: &PayPolicy,
    step_number: u32,
) -> PayrollResult<OvertimePayResult> {
    let overflow = || PayrollError::Computation {
        message: format!(
            "overtime pay overflowed: {} hours at {} x {}",
            overtime_hours, profile.pay_rate, policy.overtime_multiplier
        ),
    };

    let (overtime_rate, amount, reasoning) = match profile.pay_type {
        PayType::Hourly => {
            let rate = profile
                .pay_rate
                .checked_mul(policy.overtime_multiplier)
                .ok_or_else(overflow)?;
            let amount = overtime_hours.checked_mul(rate).ok_or_else(overflow)?;
            (
                rate,
                amount,
                format!(
                    "{} overtime hours at ${} x {} = ${}",
                    overtime_hours.normalize(),
                    profile.pay_rate.normalize(),
                    policy.overtime_multiplier.normalize(),
                    amount.normalize()
                ),
            )
        }
        PayType::Salary => (
            Decimal::ZERO,
            Decimal::ZERO,
            format!(
                "Salaried employees are not paid overtime; {} overtime hours ignored",
                overtime_hours.normalize()
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "pay_type": profile.pay_type.to_string(),
            "overtime_hours": overtime_hours.to_string(),
            "multiplier": policy.overtime_multiplier.to_string(),
        }),
        output: serde_json::json!({
            "overtime_rate": overtime_rate.to_string(),
            "overtime_pay": amount.to_string(),
        }),
        reasoning,
    };

    Ok(OvertimePayResult {
        overtime_rate,
        amount,
        audit_step,
    })
}
