//! Report request and summary models.
//!
//! [`ReportFilters`] describes which records a report covers and
//! [`ReportSummary`] holds the aggregated totals.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DepartmentId, EmployeeId};
use crate::error::{PayrollError, PayrollResult};
use crate::validation::{ensure_period, round_money};

/// The kind of report requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Year to date.
    #[default]
    Ytd,
    /// A single calendar month.
    Monthly,
    /// Per-department view.
    Department,
}

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Returns true if `date` falls within the range, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Which records a report covers.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ReportFilters, ReportType};
/// use chrono::NaiveDate;
///
/// let filters = ReportFilters::monthly(2024, 2).unwrap();
/// assert_eq!(filters.report_type, ReportType::Monthly);
/// assert_eq!(filters.end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilters {
    /// First pay-period end date included.
    pub start_date: NaiveDate,
    /// Last pay-period end date included.
    pub end_date: NaiveDate,
    /// Restrict to employees of this department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    /// Restrict to this employee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<EmployeeId>,
    /// The kind of report.
    #[serde(default, rename = "type")]
    pub report_type: ReportType,
}

impl ReportFilters {
    /// A filter over `[start_date, end_date]` with no department or employee restriction.
    pub fn between(start_date: NaiveDate, end_date: NaiveDate, report_type: ReportType) -> Self {
        Self {
            start_date,
            end_date,
            department_id: None,
            employee_id: None,
            report_type,
        }
    }

    /// January 1st of `as_of`'s year through `as_of`.
    pub fn year_to_date(as_of: NaiveDate) -> Self {
        // January 1st always exists
        let start = as_of.with_ordinal(1).unwrap_or(as_of);
        Self::between(start, as_of, ReportType::Ytd)
    }

    /// The whole of one calendar month.
    pub fn monthly(year: i32, month: u32) -> PayrollResult<Self> {
        let invalid = || PayrollError::validation("month", format!("{}-{} is not a month", year, month));
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or_else(invalid)?;
        let end = next_month.pred_opt().ok_or_else(invalid)?;
        Ok(Self::between(start, end, ReportType::Monthly))
    }

    /// Restricts the report to one department.
    pub fn with_department(mut self, department_id: DepartmentId) -> Self {
        self.department_id = Some(department_id);
        self
    }

    /// Restricts the report to one employee.
    pub fn with_employee(mut self, employee_id: EmployeeId) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    /// Checks the range is ordered.
    pub fn validate(&self) -> PayrollResult<()> {
        ensure_period(self.start_date, self.end_date)
    }

    /// The covered date range.
    pub fn date_range(&self) -> DateRange {
        DateRange {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Aggregated totals over a filtered set of payroll records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Sum of gross pay.
    pub total_gross_pay: Decimal,
    /// Sum of net pay.
    pub total_net_pay: Decimal,
    /// Sum of tax withheld.
    pub total_taxes: Decimal,
    /// Sum of all deductions (tax, retirement, other).
    pub total_deductions: Decimal,
    /// Number of distinct employees with at least one included record.
    pub employee_count: usize,
    /// Number of included records.
    pub record_count: usize,
}

impl ReportSummary {
    /// Average gross pay per employee, or `None` when no employee is represented.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::ReportSummary;
    ///
    /// assert_eq!(ReportSummary::default().average_gross_pay(), None);
    /// ```
    pub fn average_gross_pay(&self) -> Option<Decimal> {
        if self.employee_count == 0 {
            return None;
        }
        Some(round_money(
            self.total_gross_pay / Decimal::from(self.employee_count as u64),
        ))
    }

    /// Returns true if no record matched the filters.
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_filters_with_type_field() {
        let json = r#"{
            "start_date": "2024-01-01",
            "end_date": "2024-03-31",
            "department_id": 2,
            "type": "department"
        }"#;

        let filters: ReportFilters = serde_json::from_str(json).unwrap();
        assert_eq!(filters.report_type, ReportType::Department);
        assert_eq!(filters.department_id, Some(2));
        assert_eq!(filters.employee_id, None);
    }

    #[test]
    fn test_year_to_date_starts_january_first() {
        let filters = ReportFilters::year_to_date(date(2024, 8, 17));
        assert_eq!(filters.start_date, date(2024, 1, 1));
        assert_eq!(filters.end_date, date(2024, 8, 17));
        assert_eq!(filters.report_type, ReportType::Ytd);
    }

    #[test]
    fn test_monthly_covers_whole_month() {
        let filters = ReportFilters::monthly(2024, 12).unwrap();
        assert_eq!(filters.start_date, date(2024, 12, 1));
        assert_eq!(filters.end_date, date(2024, 12, 31));

        let feb = ReportFilters::monthly(2023, 2).unwrap();
        assert_eq!(feb.end_date, date(2023, 2, 28));
    }

    #[test]
    fn test_monthly_rejects_month_thirteen() {
        assert!(ReportFilters::monthly(2024, 13).is_err());
    }

    #[test]
    fn test_reversed_range_fails_validation() {
        let filters = ReportFilters::between(date(2024, 3, 31), date(2024, 3, 1), ReportType::Monthly);
        assert!(filters.validate().is_err());
    }

    #[test]
    fn test_date_range_contains_bounds() {
        let range = DateRange {
            start_date: date(2024, 3, 1),
            end_date: date(2024, 3, 15),
        };
        assert!(range.contains(date(2024, 3, 1)));
        assert!(range.contains(date(2024, 3, 15)));
        assert!(!range.contains(date(2024, 3, 16)));
    }

    #[test]
    fn test_average_gross_pay() {
        let summary = ReportSummary {
            total_gross_pay: Decimal::from(9000),
            employee_count: 2,
            record_count: 3,
            ..Default::default()
        };
        assert_eq!(summary.average_gross_pay(), Some(Decimal::from(4500)));
    }

    #[test]
    fn test_average_gross_pay_guards_zero_employees() {
        let summary = ReportSummary::default();
        assert!(summary.is_empty());
        assert_eq!(summary.average_gross_pay(), None);
    }
}
