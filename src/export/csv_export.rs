//! CSV exports.

use chrono::{NaiveDate, Utc};
use csv::Writer;
use tracing::debug;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{DateRange, Employee, PayrollRecord, ReportSummary};
use crate::reporting::EmployeeIndex;

use super::{ExportArtifact, ExportSink};

const CONTENT_TYPE: &str = "text/csv;charset=utf-8";

const RECORD_HEADERS: [&str; 13] = [
    "Employee Name",
    "Employee ID",
    "Pay Period Start",
    "Pay Period End",
    "Regular Hours",
    "Overtime Hours",
    "Tips",
    "Gross Pay",
    "Net Pay",
    "Tax Deductions",
    "Retirement Deductions",
    "Other Deductions",
    "Status",
];

/// Writes exports as CSV files named after the export date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExporter {
    export_date: NaiveDate,
}

impl CsvExporter {
    /// An exporter stamping file names with `export_date`.
    pub fn new(export_date: NaiveDate) -> Self {
        Self { export_date }
    }

    /// An exporter stamping file names with today's UTC date.
    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    fn file_name(&self, stem: &str) -> String {
        format!("{}_{}.csv", stem, self.export_date.format("%Y-%m-%d"))
    }

    fn artifact(&self, stem: &str, writer: Writer<Vec<u8>>) -> PayrollResult<ExportArtifact> {
        let bytes = writer.into_inner().map_err(|e| export_error(e.error()))?;
        let body = String::from_utf8(bytes).map_err(export_error)?;
        let file_name = self.file_name(stem);
        debug!(file_name = %file_name, bytes = body.len(), "Rendered CSV export");
        Ok(ExportArtifact {
            file_name,
            content_type: CONTENT_TYPE.to_string(),
            body,
        })
    }
}

fn export_error(e: impl std::fmt::Display) -> PayrollError {
    PayrollError::Export {
        message: e.to_string(),
    }
}

fn us_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

impl ExportSink for CsvExporter {
    fn export_summary(
        &self,
        summary: &ReportSummary,
        period: &DateRange,
    ) -> PayrollResult<ExportArtifact> {
        let mut rows = vec![
            (
                "Period".to_string(),
                format!("{} - {}", us_date(period.start_date), us_date(period.end_date)),
            ),
            ("Total Gross Pay".to_string(), format!("{:.2}", summary.total_gross_pay)),
            ("Total Net Pay".to_string(), format!("{:.2}", summary.total_net_pay)),
            ("Total Taxes".to_string(), format!("{:.2}", summary.total_taxes)),
            ("Total Deductions".to_string(), format!("{:.2}", summary.total_deductions)),
            ("Employee Count".to_string(), summary.employee_count.to_string()),
            ("Record Count".to_string(), summary.record_count.to_string()),
        ];
        if let Some(average) = summary.average_gross_pay() {
            rows.push(("Average Gross Pay".to_string(), format!("{:.2}", average)));
        }

        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(["Metric", "Value"]).map_err(export_error)?;
        for (label, value) in &rows {
            writer.write_record([label, value]).map_err(export_error)?;
        }
        self.artifact("payroll_report", writer)
    }

    fn export_records(
        &self,
        records: &[PayrollRecord],
        employees: &[Employee],
    ) -> PayrollResult<ExportArtifact> {
        let index = EmployeeIndex::new(employees);
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(RECORD_HEADERS).map_err(export_error)?;

        for record in records {
            let employee = index.get(record.employee_id);
            let row = [
                employee.map_or_else(|| "Unknown".to_string(), Employee::full_name),
                employee.map(|e| e.employee_number.clone()).unwrap_or_default(),
                us_date(record.pay_period_start),
                us_date(record.pay_period_end),
                record.regular_hours.to_string(),
                record.overtime_hours.to_string(),
                record.tips.to_string(),
                record.gross_pay.to_string(),
                record.net_pay.to_string(),
                record.deductions.tax.to_string(),
                record.deductions.retirement.to_string(),
                record.deductions.other.to_string(),
                record.status.to_string(),
            ];
            writer.write_record(&row).map_err(export_error)?;
        }
        self.artifact("payroll_records", writer)
    }
}
