//! Pay calculation result models.
//!
//! This module contains the [`PayBreakdown`] produced by the pay calculator
//! and the [`AuditStep`] entries recording each rule it applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Deductions;

/// A single step in the calculation trace.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Gross pay and its decomposition into deductions and net pay.
///
/// Invariant: `net_pay` is `gross_pay` less the deduction total, exactly.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Deductions, PayBreakdown};
/// use rust_decimal::Decimal;
///
/// let breakdown = PayBreakdown {
///     regular_pay: Decimal::from(2625),
///     overtime_pay: Decimal::from(525),
///     tips: Decimal::from(200),
///     gross_pay: Decimal::from(3350),
///     deductions: Deductions {
///         tax: Decimal::from(670),
///         retirement: Decimal::from(201),
///         other: Decimal::ZERO,
///     },
///     net_pay: Decimal::from(2479),
///     audit_steps: vec![],
/// };
/// assert_eq!(breakdown.gross_pay - breakdown.deductions.total().unwrap(), breakdown.net_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Pay for regular hours, or the period's share of salary.
    pub regular_pay: Decimal,
    /// Pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Tips passed through to gross pay.
    pub tips: Decimal,
    /// Total earnings before deductions.
    pub gross_pay: Decimal,
    /// Deductions taken from gross pay.
    pub deductions: Deductions,
    /// Earnings after deductions.
    pub net_pay: Decimal,
    /// Every rule applied, in order.
    #[serde(default)]
    pub audit_steps: Vec<AuditStep>,
}
