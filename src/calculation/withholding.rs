//! Tax withholding and retirement contribution.
//!
//! Withholding is a flat share of gross pay; filing status is carried on
//! the profile but not consulted. Retirement is the employee's contribution
//! fraction of gross pay. Both are rounded to cents.

use rust_decimal::Decimal;

use crate::config::PayPolicy;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{AuditStep, CompensationProfile};
use crate::validation::round_money;

/// The result of a deduction calculation.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// The deduction, rounded to cents.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

/// Calculates tax withheld from `gross_pay` at the policy's flat rate.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_withholding;
/// use payroll_engine::config::PayPolicy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_withholding(Decimal::from(3350), &PayPolicy::default(), 4).unwrap();
/// assert_eq!(result.amount, Decimal::from(670));
/// ```
pub fn calculate_withholding(
    gross_pay: Decimal,
    policy: &PayPolicy,
    step_number: u32,
) -> PayrollResult<DeductionResult> {
    let amount = gross_pay
        .checked_mul(policy.tax_rate)
        .map(round_money)
        .ok_or_else(|| PayrollError::Computation {
            message: format!("withholding overflowed on gross pay {}", gross_pay),
        })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "flat_withholding".to_string(),
        rule_name: "Flat Tax Withholding".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "tax_rate": policy.tax_rate.to_string(),
        }),
        output: serde_json::json!({
            "tax": amount.to_string(),
        }),
        reasoning: format!(
            "{}% flat withholding on gross ${} = ${}",
            percent(policy.tax_rate),
            gross_pay,
            amount
        ),
    };

    Ok(DeductionResult { amount, audit_step })
}

/// Calculates the retirement contribution taken from `gross_pay`.
pub fn calculate_retirement(
    gross_pay: Decimal,
    profile: &CompensationProfile,
    step_number: u32,
) -> PayrollResult<DeductionResult> {
    let amount = gross_pay
        .checked_mul(profile.retirement_rate)
        .map(round_money)
        .ok_or_else(|| PayrollError::Computation {
            message: format!("retirement overflowed on gross pay {}", gross_pay),
        })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "retirement_contribution".to_string(),
        rule_name: "Retirement Contribution".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "retirement_rate": profile.retirement_rate.to_string(),
        }),
        output: serde_json::json!({
            "retirement": amount.to_string(),
        }),
        reasoning: format!(
            "{}% of gross ${} = ${}",
            percent(profile.retirement_rate),
            gross_pay,
            amount
        ),
    };

    Ok(DeductionResult { amount, audit_step })
}
