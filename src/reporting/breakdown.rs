//! Dashboard breakdowns over a record set.
//!
//! These back the console's charts: gross pay per department, where the
//! money went (net pay against each deduction), and the most recent pay
//! periods for trend lines.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PayrollResult;
use crate::models::{Department, DepartmentId, Employee, PayrollRecord};
use crate::validation::checked_sum;

use super::filter::EmployeeIndex;
use super::summary::total_of;

/// Gross pay attributed to one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTotal {
    /// The department.
    pub department_id: DepartmentId,
    /// The department's name.
    pub name: String,
    /// Sum of gross pay over records of the department's employees.
    pub total_gross_pay: Decimal,
}

/// Net pay and deductions totals over a record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    /// Sum of net pay.
    pub net_pay: Decimal,
    /// Sum of tax withheld.
    pub taxes: Decimal,
    /// Sum of retirement contributions.
    pub retirement: Decimal,
    /// Sum of other deductions.
    pub other_deductions: Decimal,
}

/// Gross pay per department, one entry per department in the given order.
///
/// Departments with no records report zero. Records whose employee is
/// unknown are not attributed to any department.
///
/// # Errors
///
/// Returns a computation error if a department's total overflows.
pub fn department_totals(
    records: &[PayrollRecord],
    employees: &[Employee],
    departments: &[Department],
) -> PayrollResult<Vec<DepartmentTotal>> {
    let index = EmployeeIndex::new(employees);
    let mut by_department: HashMap<DepartmentId, Decimal> = HashMap::new();

    for record in records {
        if let Some(employee) = index.get(record.employee_id) {
            let total = by_department.entry(employee.department_id).or_default();
            *total = checked_sum("department gross pay", [*total, record.gross_pay])?;
        }
    }

    Ok(departments
        .iter()
        .map(|d| DepartmentTotal {
            department_id: d.id,
            name: d.name.clone(),
            total_gross_pay: by_department.get(&d.id).copied().unwrap_or_default(),
        })
        .collect())
}

/// Totals of net pay and each kind of deduction.
pub fn earnings_breakdown(records: &[PayrollRecord]) -> PayrollResult<EarningsBreakdown> {
    Ok(EarningsBreakdown {
        net_pay: total_of(records, "net pay", |r| r.net_pay)?,
        taxes: total_of(records, "taxes", |r| r.deductions.tax)?,
        retirement: total_of(records, "retirement", |r| r.deductions.retirement)?,
        other_deductions: total_of(records, "other deductions", |r| r.deductions.other)?,
    })
}

/// The `count` records with the latest pay period end, oldest first.
pub fn recent_periods(records: &[PayrollRecord], count: usize) -> Vec<PayrollRecord> {
    let mut sorted: Vec<&PayrollRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.pay_period_end
            .cmp(&a.pay_period_end)
            .then_with(|| b.id.cmp(&a.id))
    });
    let mut recent: Vec<PayrollRecord> = sorted.into_iter().take(count).cloned().collect();
    recent.reverse();
    recent
}
