//! Pay check layout.
//!
//! A [`CheckStub`] holds everything printed on a pay check and its stub:
//! payee, amount in figures and words, pay date, memo, and the earnings and
//! deductions behind the amount. Earnings lines are recomputed with the pay
//! rules so the stub shows the rate each line was paid at.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{calculate_overtime_pay, calculate_regular_pay};
use crate::config::PayPolicy;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Company, Employee, PayType, PayrollRecord};
use crate::validation::round_money;

use super::words::amount_in_words;

/// One earnings line on a check stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsLine {
    /// "Regular", "Overtime" or "Tips".
    pub label: String,
    /// Hours paid, when the line is hourly.
    pub hours: Option<Decimal>,
    /// Rate per hour, when the line is hourly.
    pub rate: Option<Decimal>,
    /// Amount earned, in cents precision.
    pub amount: Decimal,
}

/// One deduction line on a check stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// What was deducted.
    pub label: String,
    /// Amount deducted.
    pub amount: Decimal,
}

/// A pay check and its stub for one payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStub {
    /// Paying company.
    pub company_name: String,
    /// Employee's full name.
    pub payee: String,
    /// Net pay.
    pub amount: Decimal,
    /// Net pay written out.
    pub amount_in_words: String,
    /// Check date: the end of the pay period.
    pub date: NaiveDate,
    /// Memo line naming the pay period.
    pub memo: String,
    /// Earnings making up gross pay.
    pub earnings: Vec<EarningsLine>,
    /// Deductions taken from gross pay.
    pub deductions: Vec<DeductionLine>,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
}

impl CheckStub {
    /// Lays out the check for `record`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the record belongs to another employee
    /// or its net pay is negative.
    pub fn new(
        company: &Company,
        employee: &Employee,
        record: &PayrollRecord,
        policy: &PayPolicy,
    ) -> PayrollResult<Self> {
        if record.employee_id != employee.id {
            return Err(PayrollError::validation(
                "employee_id",
                format!(
                    "record {} belongs to employee {}, not {}",
                    record.id, record.employee_id, employee.id
                ),
            ));
        }

        let profile = employee.profile();
        let mut earnings = Vec::new();

        let regular = calculate_regular_pay(&profile, record.regular_hours, policy, 1)?;
        match profile.pay_type {
            PayType::Hourly if record.regular_hours > Decimal::ZERO => earnings.push(EarningsLine {
                label: "Regular".to_string(),
                hours: Some(record.regular_hours),
                rate: Some(profile.pay_rate),
                amount: round_money(regular.amount),
            }),
            PayType::Salary => earnings.push(EarningsLine {
                label: "Regular".to_string(),
                hours: None,
                rate: None,
                amount: round_money(regular.amount),
            }),
            PayType::Hourly => {}
        }

        let overtime = calculate_overtime_pay(&profile, record.overtime_hours, policy, 2)?;
        if overtime.amount > Decimal::ZERO {
            earnings.push(EarningsLine {
                label: "Overtime".to_string(),
                hours: Some(record.overtime_hours),
                rate: Some(round_money(overtime.overtime_rate)),
                amount: round_money(overtime.amount),
            });
        }

        if record.tips > Decimal::ZERO {
            earnings.push(EarningsLine {
                label: "Tips".to_string(),
                hours: None,
                rate: None,
                amount: record.tips,
            });
        }

        let mut deductions = vec![
            DeductionLine {
                label: "Federal Tax".to_string(),
                amount: record.deductions.tax,
            },
            DeductionLine {
                label: "Retirement".to_string(),
                amount: record.deductions.retirement,
            },
        ];
        if record.deductions.other > Decimal::ZERO {
            deductions.push(DeductionLine {
                label: "Other".to_string(),
                amount: record.deductions.other,
            });
        }

        Ok(Self {
            company_name: company.name.clone(),
            payee: employee.full_name(),
            amount: record.net_pay,
            amount_in_words: amount_in_words(record.net_pay)?,
            date: record.pay_period_end,
            memo: format!(
                "Pay Period: {} - {}",
                record.pay_period_start.format("%m/%d/%Y"),
                record.pay_period_end.format("%m/%d/%Y")
            ),
            earnings,
            deductions,
            gross_pay: record.gross_pay,
            net_pay: record.net_pay,
        })
    }
}

impl fmt::Display for CheckStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<48}{}", self.company_name, self.date.format("%m/%d/%Y"))?;
        writeln!(f, "Pay to the order of:")?;
        writeln!(f, "{:<48}${:.2}", self.payee, self.amount)?;
        writeln!(f, "{}", self.amount_in_words)?;
        writeln!(f, "{}", self.memo)?;
        writeln!(f, "{}", "-".repeat(60))?;
        writeln!(f, "{:<12}{:>10}{:>12}{:>14}", "Earnings", "Hours", "Rate", "Amount")?;
        for line in &self.earnings {
            let hours = line.hours.map(|h| h.to_string()).unwrap_or_default();
            let rate = line.rate.map(|r| format!("${:.2}", r)).unwrap_or_default();
            writeln!(
                f,
                "{:<12}{:>10}{:>12}{:>14}",
                line.label,
                hours,
                rate,
                format!("${:.2}", line.amount)
            )?;
        }
        writeln!(f, "Deductions")?;
        for line in &self.deductions {
            writeln!(f, "  {}: ${:.2}", line.label, line.amount)?;
        }
        writeln!(f, "Gross Pay: ${:.2}", self.gross_pay)?;
        write!(f, "Net Pay: ${:.2}", self.net_pay)
    }
}
