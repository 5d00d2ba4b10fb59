//! Pay period import.
//!
//! Columns: employee number, pay period start, pay period end, regular
//! hours, overtime hours, tips. Dates are `YYYY-MM-DD`; blank hours and
//! tips count as zero.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::PayrollResult;
use crate::models::PayPeriodInput;
use crate::repository::PayrollRepository;
use crate::validation::{ensure_present, parse_date, parse_decimal};

use super::{ImportResult, Row, for_each_row};

/// Imports pay periods from CSV text, storing a record per valid row.
///
/// Rows without an employee number fail with `Missing required fields: <row>`.
/// Rows naming an unknown employee fail with `Employee not found: <number>`.
/// Rows with unreadable dates or amounts, or amounts the calculator
/// rejects, fail with the validation message.
pub fn import_payroll<R>(repository: &R, text: &str) -> ImportResult
where
    R: PayrollRepository + ?Sized,
{
    let mut result = ImportResult::default();

    for_each_row(text, &mut result, |row, result| {
        let employee_number = match ensure_present("employee_number", row.field(0)) {
            Ok(number) => number,
            Err(_) => {
                result.record_failure(row.line, format!("Missing required fields: {}", row.raw()));
                return;
            }
        };
        let employee = match repository.find_employee_by_number(employee_number) {
            Ok(employee) => employee,
            Err(_) => {
                result.record_failure(row.line, format!("Employee not found: {}", employee_number));
                return;
            }
        };

        let stored = parse_period(&row)
            .and_then(|input| repository.submit_pay_period(employee.id, &input));
        match stored {
            Ok(record) => {
                debug!(line = row.line, record_id = record.id, "Imported pay period");
                result.record_success();
            }
            Err(e) => result.record_failure(row.line, e.to_string()),
        }
    });

    info!(
        succeeded = result.succeeded,
        failed = result.failed,
        "Payroll import finished"
    );
    result
}

fn parse_period(row: &Row) -> PayrollResult<PayPeriodInput> {
    Ok(PayPeriodInput {
        pay_period_start: parse_date("pay_period_start", row.field(1))?,
        pay_period_end: parse_date("pay_period_end", row.field(2))?,
        regular_hours: amount_or_zero("regular_hours", row.field(3))?,
        overtime_hours: amount_or_zero("overtime_hours", row.field(4))?,
        reported_tips: amount_or_zero("tips", row.field(5))?,
    })
}

fn amount_or_zero(field: &str, raw: &str) -> PayrollResult<Decimal> {
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_decimal(field, raw)
}
