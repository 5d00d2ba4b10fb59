//! CSV import of pay periods and employees.
//!
//! Both importers read a header row followed by one entity per row. Each
//! row succeeds or fails on its own: a bad row is counted and described in
//! the [`ImportResult`], never aborting the rows after it. Blank lines are
//! ignored.

mod employees;
mod payroll;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

pub use employees::import_employees;
pub use payroll::import_payroll;

/// Example pay period import file.
pub const PAYROLL_TEMPLATE: &str = "Employee Number,Pay Period Start,Pay Period End,Regular Hours,Overtime Hours,Tips\n\
EMP001,2024-03-01,2024-03-15,80,5,100\n";

/// Example employee import file.
pub const EMPLOYEE_TEMPLATE: &str = "First Name,Last Name,Employee Number,Payroll Type,Pay Rate,Filing Status,Retirement Rate\n\
John,Doe,EMP001,hourly,25.00,single,0.05\n";

/// A row that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based line number in the file, counting the header.
    pub line: u64,
    /// Why the row was rejected.
    pub message: String,
}

/// How an import went overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportOutcome {
    /// Every row was imported.
    Complete,
    /// Some rows were imported and some failed.
    Partial,
    /// Rows were present but none were imported.
    Failed,
    /// The file held no data rows.
    Empty,
}

/// Counts and errors from one import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Rows imported.
    pub succeeded: usize,
    /// Rows rejected.
    pub failed: usize,
    /// One entry per rejected row, in file order.
    pub errors: Vec<RowError>,
}

impl ImportResult {
    /// Classifies the import so partial success is told apart from failure.
    pub fn outcome(&self) -> ImportOutcome {
        match (self.succeeded, self.failed) {
            (0, 0) => ImportOutcome::Empty,
            (_, 0) => ImportOutcome::Complete,
            (0, _) => ImportOutcome::Failed,
            _ => ImportOutcome::Partial,
        }
    }

    fn record_success(&mut self) {
        self.succeeded += 1;
    }

    fn record_failure(&mut self, line: u64, message: impl Into<String>) {
        self.failed += 1;
        self.errors.push(RowError {
            line,
            message: message.into(),
        });
    }
}

/// A data row with its line number.
struct Row {
    line: u64,
    fields: StringRecord,
}

impl Row {
    /// The trimmed field at `index`, empty when the row is short.
    fn field(&self, index: usize) -> &str {
        self.fields.get(index).unwrap_or("")
    }

    fn raw(&self) -> String {
        self.fields.iter().collect::<Vec<_>>().join(",")
    }
}

/// Reads the data rows of `text`, calling `on_row` for each readable one.
///
/// Rows the CSV reader cannot decode are recorded as failures directly.
fn for_each_row(text: &str, result: &mut ImportResult, mut on_row: impl FnMut(Row, &mut ImportResult)) {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    for (index, record) in reader.records().enumerate() {
        match record {
            Ok(fields) => {
                if fields.iter().all(str::is_empty) {
                    continue;
                }
                let line = fields
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(index as u64 + 2);
                on_row(Row { line, fields }, result);
            }
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(index as u64 + 2);
                result.record_failure(line, format!("Invalid row format: {}", e));
            }
        }
    }
}
