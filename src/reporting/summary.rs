//! Report summary generation.
//!
//! [`generate_report`] filters a record set with [`record_matches`] and
//! reduces what remains to a [`ReportSummary`] in a single pass.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::PayrollResult;
use crate::models::{Employee, PayrollRecord, ReportFilters, ReportSummary};
use crate::validation::checked_sum;

use super::filter::{EmployeeIndex, record_matches};

/// Builds the summary of every record matching `filters`.
///
/// `employee_count` counts distinct employees with at least one matching
/// record. An empty match yields an all-zero summary.
///
/// # Errors
///
/// Returns a computation error if a total overflows.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ReportFilters, ReportType};
/// use payroll_engine::reporting::generate_report;
/// use chrono::NaiveDate;
///
/// let filters = ReportFilters::between(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
///     ReportType::Ytd,
/// );
/// let summary = generate_report(&[], &[], &filters).unwrap();
///
/// assert_eq!(summary.record_count, 0);
/// assert_eq!(summary.employee_count, 0);
/// assert_eq!(summary.average_gross_pay(), None);
/// ```
pub fn generate_report(
    records: &[PayrollRecord],
    employees: &[Employee],
    filters: &ReportFilters,
) -> PayrollResult<ReportSummary> {
    let index = EmployeeIndex::new(employees);
    let matching: Vec<&PayrollRecord> = records
        .iter()
        .filter(|r| record_matches(r, &index, filters))
        .collect();

    let mut deductions = Vec::with_capacity(matching.len());
    for record in &matching {
        deductions.push(record.deductions.total()?);
    }
    let employee_ids: HashSet<_> = matching.iter().map(|r| r.employee_id).collect();

    let summary = ReportSummary {
        total_gross_pay: checked_sum("total gross pay", matching.iter().map(|r| r.gross_pay))?,
        total_net_pay: checked_sum("total net pay", matching.iter().map(|r| r.net_pay))?,
        total_taxes: checked_sum("total taxes", matching.iter().map(|r| r.deductions.tax))?,
        total_deductions: checked_sum("total deductions", deductions)?,
        employee_count: employee_ids.len(),
        record_count: matching.len(),
    };

    debug!(
        report_type = ?filters.report_type,
        records = summary.record_count,
        employees = summary.employee_count,
        "Generated report summary"
    );

    Ok(summary)
}

/// Sums `value` over `records`, naming the total `what` on overflow.
pub(crate) fn total_of(
    records: &[PayrollRecord],
    what: &str,
    value: impl Fn(&PayrollRecord) -> Decimal,
) -> PayrollResult<Decimal> {
    checked_sum(what, records.iter().map(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayrollError;
    use crate::models::{Deductions, EmployeeId, FilingStatus, PayType, RecordStatus, ReportType};
    use chrono::{NaiveDate, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: EmployeeId, department_id: u64) -> Employee {
        Employee {
            id,
            department_id,
            first_name: "Test".to_string(),
            last_name: format!("Employee{}", id),
            employee_number: format!("EMP{:03}", id),
            pay_type: PayType::Hourly,
            pay_rate: dec("20"),
            filing_status: FilingStatus::Single,
            retirement_rate: dec("0.05"),
        }
    }

    fn record(id: u64, employee_id: EmployeeId, end: NaiveDate, gross: &str) -> PayrollRecord {
        let gross = dec(gross);
        let deductions = Deductions {
            tax: gross * dec("0.2"),
            retirement: gross * dec("0.05"),
            other: dec("10"),
        };
        PayrollRecord {
            id,
            employee_id,
            pay_period_start: end - chrono::Duration::days(14),
            pay_period_end: end,
            regular_hours: dec("80"),
            overtime_hours: Decimal::ZERO,
            tips: Decimal::ZERO,
            gross_pay: gross,
            net_pay: gross - deductions.total().unwrap(),
            deductions,
            status: RecordStatus::Paid,
            created_at: Utc::now(),
        }
    }

    fn q1() -> ReportFilters {
        ReportFilters::between(date(2024, 1, 1), date(2024, 3, 31), ReportType::Ytd)
    }

    #[test]
    fn test_empty_filter_result_is_all_zero() {
        let records = vec![record(1, 1, date(2024, 6, 15), "1000")];
        let summary = generate_report(&records, &[], &q1()).unwrap();
        assert_eq!(summary, ReportSummary::default());
    }

    #[test]
    fn test_employee_count_is_distinct() {
        let records = vec![
            record(1, 1, date(2024, 1, 15), "1000"),
            record(2, 1, date(2024, 1, 31), "1000"),
            record(3, 2, date(2024, 1, 31), "2000"),
        ];
        let summary = generate_report(&records, &[], &q1()).unwrap();
        assert_eq!(summary.record_count, 3);
        assert_eq!(summary.employee_count, 2);
    }

    #[test]
    fn test_totals() {
        let records = vec![
            record(1, 1, date(2024, 1, 15), "1000"),
            record(2, 2, date(2024, 2, 15), "2000"),
        ];
        let summary = generate_report(&records, &[], &q1()).unwrap();
        assert_eq!(summary.total_gross_pay, dec("3000"));
        assert_eq!(summary.total_taxes, dec("600"));
        // tax 600 + retirement 150 + other 20
        assert_eq!(summary.total_deductions, dec("770"));
        assert_eq!(summary.total_net_pay, dec("2230"));
        assert_eq!(summary.average_gross_pay(), Some(dec("1500")));
    }

    #[test]
    fn test_record_ending_on_end_date_is_included() {
        let records = vec![record(1, 1, date(2024, 3, 31), "500")];
        let summary = generate_report(&records, &[], &q1()).unwrap();
        assert_eq!(summary.record_count, 1);
    }

    #[test]
    fn test_department_report_excludes_other_and_unknown_employees() {
        let employees = vec![employee(1, 1), employee(2, 2)];
        let records = vec![
            record(1, 1, date(2024, 1, 15), "1000"),
            record(2, 2, date(2024, 1, 15), "2000"),
            record(3, 42, date(2024, 1, 15), "4000"),
        ];
        let summary = generate_report(&records, &employees, &q1().with_department(1)).unwrap();
        assert_eq!(summary.record_count, 1);
        assert_eq!(summary.total_gross_pay, dec("1000"));
    }

    #[test]
    fn test_employee_report() {
        let records = vec![
            record(1, 1, date(2024, 1, 15), "1000"),
            record(2, 2, date(2024, 1, 15), "2000"),
        ];
        let summary = generate_report(&records, &[], &q1().with_employee(2)).unwrap();
        assert_eq!(summary.employee_count, 1);
        assert_eq!(summary.total_gross_pay, dec("2000"));
    }

    #[test]
    fn test_total_of() {
        let records = vec![
            record(1, 1, date(2024, 1, 15), "1000"),
            record(2, 2, date(2024, 1, 15), "2000"),
        ];
        assert_eq!(total_of(&records, "other", |r| r.deductions.other).unwrap(), dec("20"));
    }

    #[test]
    fn test_overflowing_totals_are_computation_errors() {
        let records = vec![
            record(1, 1, date(2024, 1, 15), "50000000000000000000000000000"),
            record(2, 2, date(2024, 2, 15), "50000000000000000000000000000"),
        ];
        match generate_report(&records, &[], &q1()) {
            Err(PayrollError::Computation { message }) => assert!(message.contains("overflowed")),
            other => panic!("Expected Computation, got {:?}", other),
        }
    }
}
