//! Employee import into a department.
//!
//! Columns: first name, last name, employee number, payroll type, pay rate,
//! filing status, retirement rate.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::PayrollResult;
use crate::models::{DepartmentId, FilingStatus, NewEmployee, PayType};
use crate::repository::PayrollRepository;
use crate::validation::parse_decimal;

use super::{ImportResult, Row, for_each_row};

/// Imports employees from CSV text into `department_id`.
///
/// Rows without a first name, last name or employee number fail with
/// `Missing required fields: <row>`. Other rejected rows carry the
/// validation or lookup message, e.g. for a duplicate employee number.
pub fn import_employees<R>(repository: &R, department_id: DepartmentId, text: &str) -> ImportResult
where
    R: PayrollRepository + ?Sized,
{
    let mut result = ImportResult::default();

    for_each_row(text, &mut result, |row, result| {
        if row.field(0).is_empty() || row.field(1).is_empty() || row.field(2).is_empty() {
            result.record_failure(row.line, format!("Missing required fields: {}", row.raw()));
            return;
        }

        match parse_employee(&row, department_id).and_then(|e| repository.add_employee(e)) {
            Ok(_) => result.record_success(),
            Err(e) => result.record_failure(row.line, e.to_string()),
        }
    });

    info!(
        department_id,
        succeeded = result.succeeded,
        failed = result.failed,
        "Employee import finished"
    );
    result
}

fn parse_employee(row: &Row, department_id: DepartmentId) -> PayrollResult<NewEmployee> {
    let retirement_rate = match row.field(6) {
        "" => Decimal::ZERO,
        raw => parse_decimal("retirement_rate", raw)?,
    };

    Ok(NewEmployee {
        department_id,
        first_name: row.field(0).to_string(),
        last_name: row.field(1).to_string(),
        employee_number: row.field(2).to_string(),
        pay_type: row.field(3).parse::<PayType>()?,
        pay_rate: parse_decimal("pay_rate", row.field(4))?,
        filing_status: row.field(5).parse::<FilingStatus>()?,
        retirement_rate,
    })
}
