//! Record lookup by period and employee.

use chrono::NaiveDate;

use crate::models::{Employee, PayrollRecord};

use super::filter::EmployeeIndex;

/// Finds records by pay period bounds and an employee search term.
///
/// Unlike report filtering, the bounds here are containment bounds: `start`
/// applies to the period start and `end` to the period end. The term matches
/// the employee's full name or employee number, ignoring case. An empty term
/// matches every record; a non-empty term never matches a record whose
/// employee is unknown.
pub fn search_records<'r>(
    records: &'r [PayrollRecord],
    employees: &[Employee],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    term: &str,
) -> Vec<&'r PayrollRecord> {
    let index = EmployeeIndex::new(employees);
    let term = term.trim();

    records
        .iter()
        .filter(|r| start.is_none_or(|start| r.pay_period_start >= start))
        .filter(|r| end.is_none_or(|end| r.pay_period_end <= end))
        .filter(|r| {
            term.is_empty()
                || index
                    .get(r.employee_id)
                    .is_some_and(|employee| employee.matches_search(term))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Deductions, EmployeeId, FilingStatus, PayType, RecordStatus};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn employee(id: EmployeeId, first: &str, last: &str, number: &str) -> Employee {
        Employee {
            id,
            department_id: 1,
            first_name: first.to_string(),
            last_name: last.to_string(),
            employee_number: number.to_string(),
            pay_type: PayType::Hourly,
            pay_rate: Decimal::from(30),
            filing_status: FilingStatus::Single,
            retirement_rate: Decimal::ZERO,
        }
    }

    fn record(id: u64, employee_id: EmployeeId, start: NaiveDate, end: NaiveDate) -> PayrollRecord {
        PayrollRecord {
            id,
            employee_id,
            pay_period_start: start,
            pay_period_end: end,
            regular_hours: Decimal::from(80),
            overtime_hours: Decimal::ZERO,
            tips: Decimal::ZERO,
            gross_pay: Decimal::from(2400),
            net_pay: Decimal::from(1920),
            deductions: Deductions {
                tax: Decimal::from(480),
                ..Default::default()
            },
            status: RecordStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn fixture() -> (Vec<Employee>, Vec<PayrollRecord>) {
        let employees = vec![
            employee(1, "John", "Doe", "EMP001"),
            employee(2, "Jane", "Smith", "EMP002"),
        ];
        let records = vec![
            record(1, 1, date(3, 1), date(3, 15)),
            record(2, 2, date(3, 1), date(3, 15)),
            record(3, 1, date(3, 16), date(3, 31)),
            record(4, 7, date(3, 16), date(3, 31)),
        ];
        (employees, records)
    }

    fn ids(found: &[&PayrollRecord]) -> Vec<u64> {
        found.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_no_criteria_returns_everything() {
        let (employees, records) = fixture();
        assert_eq!(search_records(&records, &employees, None, None, "").len(), 4);
    }

    #[test]
    fn test_search_by_name_ignores_case() {
        let (employees, records) = fixture();
        let found = search_records(&records, &employees, None, None, "jOhN d");
        assert_eq!(ids(&found), vec![1, 3]);
    }

    #[test]
    fn test_search_by_employee_number() {
        let (employees, records) = fixture();
        let found = search_records(&records, &employees, None, None, "emp002");
        assert_eq!(ids(&found), vec![2]);
    }

    #[test]
    fn test_bounds_are_containment() {
        let (employees, records) = fixture();
        let found = search_records(&records, &employees, Some(date(3, 10)), None, "");
        assert_eq!(ids(&found), vec![3, 4]);

        let found = search_records(&records, &employees, None, Some(date(3, 20)), "");
        assert_eq!(ids(&found), vec![1, 2]);
    }

    #[test]
    fn test_unknown_employee_never_matches_term() {
        let (employees, records) = fixture();
        let found = search_records(&records, &employees, Some(date(3, 16)), None, "EMP");
        assert_eq!(ids(&found), vec![3]);
    }
}
