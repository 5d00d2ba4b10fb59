//! Export of reports, records and pay checks.
//!
//! An [`ExportSink`] turns a report summary or a set of records into a
//! downloadable [`ExportArtifact`]. [`CsvExporter`] is the CSV
//! implementation; [`CheckStub`] lays out a single pay check.

mod check;
mod csv_export;
mod words;

use serde::{Deserialize, Serialize};

use crate::error::PayrollResult;
use crate::models::{DateRange, Employee, PayrollRecord, ReportSummary};

pub use check::{CheckStub, DeductionLine, EarningsLine};
pub use csv_export::CsvExporter;
pub use words::amount_in_words;

/// A rendered export, ready to be sent as a download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    /// Suggested download name, e.g. `payroll_records_2024-03-31.csv`.
    pub file_name: String,
    /// MIME type of `body`.
    pub content_type: String,
    /// The file contents.
    pub body: String,
}

/// Destination format for exports.
pub trait ExportSink {
    /// Renders a report summary for the given period.
    fn export_summary(
        &self,
        summary: &ReportSummary,
        period: &DateRange,
    ) -> PayrollResult<ExportArtifact>;

    /// Renders payroll records, naming each record's employee.
    ///
    /// Records whose employee is not in `employees` are still exported.
    fn export_records(
        &self,
        records: &[PayrollRecord],
        employees: &[Employee],
    ) -> PayrollResult<ExportArtifact>;
}
