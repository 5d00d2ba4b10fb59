//! Report filter predicate.
//!
//! A record is in a report when its pay period ends within the report's
//! date range (inclusive at both ends), it belongs to the requested
//! employee if one is given, and its employee belongs to the requested
//! department if one is given. Records whose employee cannot be found are
//! left out of department reports.

use std::collections::HashMap;

use crate::models::{Employee, EmployeeId, PayrollRecord, ReportFilters};

/// Lookup of employees by id.
#[derive(Debug, Clone, Default)]
pub struct EmployeeIndex<'a> {
    by_id: HashMap<EmployeeId, &'a Employee>,
}

impl<'a> EmployeeIndex<'a> {
    /// Indexes the given employees by id.
    pub fn new(employees: &'a [Employee]) -> Self {
        Self {
            by_id: employees.iter().map(|e| (e.id, e)).collect(),
        }
    }

    /// Returns the employee with `id`, if known.
    pub fn get(&self, id: EmployeeId) -> Option<&'a Employee> {
        self.by_id.get(&id).copied()
    }
}

/// Returns true if `record` belongs in a report built with `filters`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Deductions, PayrollRecord, RecordStatus, ReportFilters, ReportType};
/// use payroll_engine::reporting::{EmployeeIndex, record_matches};
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
///
/// let record = PayrollRecord {
///     id: 1,
///     employee_id: 1,
///     pay_period_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     pay_period_end: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
///     regular_hours: Decimal::from(80),
///     overtime_hours: Decimal::ZERO,
///     tips: Decimal::ZERO,
///     gross_pay: Decimal::from(1000),
///     net_pay: Decimal::from(800),
///     deductions: Deductions { tax: Decimal::from(200), ..Default::default() },
///     status: RecordStatus::Paid,
///     created_at: Utc::now(),
/// };
/// let filters = ReportFilters::between(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
///     ReportType::Monthly,
/// );
///
/// assert!(record_matches(&record, &EmployeeIndex::default(), &filters));
/// ```
pub fn record_matches(
    record: &PayrollRecord,
    employees: &EmployeeIndex<'_>,
    filters: &ReportFilters,
) -> bool {
    if !filters.date_range().contains(record.pay_period_end) {
        return false;
    }

    if filters
        .employee_id
        .is_some_and(|employee_id| record.employee_id != employee_id)
    {
        return false;
    }

    if let Some(department_id) = filters.department_id {
        match employees.get(record.employee_id) {
            Some(employee) if employee.department_id == department_id => {}
            _ => return false,
        }
    }

    true
}
