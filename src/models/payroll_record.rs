//! Payroll record models.
//!
//! A [`PayrollRecord`] is the stored outcome of one pay period for one
//! employee. Records are created by the pay calculator, or accepted from a
//! backend that computed them ([`ServerComputedRecord`]), and afterwards
//! only their [`RecordStatus`] changes.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, RecordId};
use crate::error::{PayrollError, PayrollResult};
use crate::validation::{checked_sum, round_money};

/// Processing state of a payroll record.
///
/// Status only ever moves forward: pending, then processed, then paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Entered but not yet processed.
    Pending,
    /// Processed by payroll, awaiting payment.
    Processed,
    /// Paid out.
    Paid,
}

impl RecordStatus {
    /// Returns true if a record in this status may move to `next`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::RecordStatus;
    ///
    /// assert!(RecordStatus::Pending.can_advance_to(RecordStatus::Paid));
    /// assert!(!RecordStatus::Paid.can_advance_to(RecordStatus::Pending));
    /// ```
    pub fn can_advance_to(self, next: RecordStatus) -> bool {
        next > self
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Processed => "processed",
            RecordStatus::Paid => "paid",
        };
        f.write_str(label)
    }
}

/// The deductions taken from gross pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Tax withheld.
    pub tax: Decimal,
    /// Retirement contributions.
    pub retirement: Decimal,
    /// Everything else.
    pub other: Decimal,
}

impl Deductions {
    /// Sum of all deductions.
    ///
    /// # Errors
    ///
    /// Returns a computation error if the sum overflows.
    pub fn total(&self) -> PayrollResult<Decimal> {
        checked_sum("total deductions", [self.tax, self.retirement, self.other])
    }
}

/// The stored result of one pay period for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier, never reused.
    pub id: RecordId,
    /// The employee paid.
    pub employee_id: EmployeeId,
    /// The first day of the pay period.
    pub pay_period_start: NaiveDate,
    /// The last day of the pay period.
    pub pay_period_end: NaiveDate,
    /// Regular hours worked.
    pub regular_hours: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Tips reported.
    pub tips: Decimal,
    /// Total earnings before deductions.
    pub gross_pay: Decimal,
    /// Earnings after deductions.
    pub net_pay: Decimal,
    /// Deduction breakdown.
    pub deductions: Deductions,
    /// Processing state.
    pub status: RecordStatus,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Checks the record's figures agree with each other.
    ///
    /// Gross pay and every deduction must be non-negative, and net pay must
    /// equal gross pay less total deductions.
    pub fn verify_integrity(&self) -> PayrollResult<()> {
        let fail = |message: String| PayrollError::DataIntegrity {
            record_id: Some(self.id),
            message,
        };

        if self.gross_pay < Decimal::ZERO {
            return Err(fail(format!("gross pay {} is negative", self.gross_pay)));
        }
        for (name, amount) in [
            ("tax", self.deductions.tax),
            ("retirement", self.deductions.retirement),
            ("other", self.deductions.other),
        ] {
            if amount < Decimal::ZERO {
                return Err(fail(format!("{} deduction {} is negative", name, amount)));
            }
        }
        let total = self
            .deductions
            .total()
            .map_err(|_| fail("deductions overflow".to_string()))?;
        if self.net_pay != self.gross_pay - total {
            return Err(fail(format!(
                "net pay {} does not equal gross {} less deductions {}",
                self.net_pay, self.gross_pay, total
            )));
        }
        Ok(())
    }
}

/// A payroll record as returned by a backend that computes pay itself.
///
/// The backend reports retirement split into regular and Roth payments and
/// only a total for all deductions; "other" is whatever remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerComputedRecord {
    /// Backend-assigned identifier.
    pub id: RecordId,
    /// The employee paid.
    pub employee_id: EmployeeId,
    /// The first day of the pay period.
    pub pay_period_start: NaiveDate,
    /// The last day of the pay period.
    pub pay_period_end: NaiveDate,
    /// Regular hours worked.
    pub regular_hours: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Tips reported.
    pub reported_tips: Decimal,
    /// Total earnings before deductions.
    pub gross_pay: Decimal,
    /// Earnings after deductions.
    pub net_pay: Decimal,
    /// Tax withheld.
    pub withholding_tax: Decimal,
    /// Pre-tax retirement contribution.
    pub retirement_payment: Decimal,
    /// Roth retirement contribution.
    #[serde(default)]
    pub roth_retirement_payment: Decimal,
    /// Sum of every deduction.
    pub total_deductions: Decimal,
    /// Processing state.
    pub status: RecordStatus,
    /// When the backend created the record.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ServerComputedRecord> for PayrollRecord {
    type Error = PayrollError;

    fn try_from(server: ServerComputedRecord) -> Result<Self, Self::Error> {
        let record_id = server.id;
        let overflow = |what: &str| PayrollError::DataIntegrity {
            record_id: Some(record_id),
            message: format!("{} overflowed", what),
        };

        let retirement = server
            .retirement_payment
            .checked_add(server.roth_retirement_payment)
            .ok_or_else(|| overflow("retirement"))?;
        let other = server
            .withholding_tax
            .checked_add(retirement)
            .and_then(|withheld| server.total_deductions.checked_sub(withheld))
            .map(round_money)
            .ok_or_else(|| overflow("other deductions"))?;
        if other < Decimal::ZERO {
            return Err(PayrollError::DataIntegrity {
                record_id: Some(server.id),
                message: format!(
                    "total deductions {} are less than tax {} plus retirement {}",
                    server.total_deductions, server.withholding_tax, retirement
                ),
            });
        }

        let record = PayrollRecord {
            id: server.id,
            employee_id: server.employee_id,
            pay_period_start: server.pay_period_start,
            pay_period_end: server.pay_period_end,
            regular_hours: server.regular_hours,
            overtime_hours: server.overtime_hours,
            tips: server.reported_tips,
            gross_pay: server.gross_pay,
            net_pay: server.net_pay,
            deductions: Deductions {
                tax: server.withholding_tax,
                retirement,
                other,
            },
            status: server.status,
            created_at: server.created_at,
        };
        record.verify_integrity()?;
        Ok(record)
    }
}
