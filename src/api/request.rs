//! Request types for the payroll engine API.
//!
//! This module defines the JSON bodies and query strings the endpoints
//! accept.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    CompanyId, CompensationProfile, DepartmentId, EmployeeId, PayPeriodInput,
    PayPeriodSubmission, RecordStatus, ReportFilters, ReportType,
};

/// Request body for the `/calculate` endpoint.
///
/// Calculates pay without storing anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee's compensation terms.
    pub profile: CompensationProfile,
    /// Hours and tips for the pay period.
    pub period: PayPeriodInput,
}

/// Request body for the `/reports` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The company to report on.
    pub company_id: CompanyId,
    /// Which records to include.
    pub filters: ReportFilters,
}

/// Query string for `GET /reports`.
///
/// `type=ytd` covers January 1st through `as_of` (today when absent).
/// `type=monthly` covers the calendar month given by `year` and `month`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodReportQuery {
    /// The company to report on.
    pub company_id: CompanyId,
    /// The kind of report.
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// Last day of a year-to-date report.
    pub as_of: Option<NaiveDate>,
    /// Year of a monthly report.
    pub year: Option<i32>,
    /// Month (1-12) of a monthly report.
    pub month: Option<u32>,
    /// Restrict to employees of this department.
    pub department_id: Option<DepartmentId>,
    /// Restrict to this employee.
    pub employee_id: Option<EmployeeId>,
}

impl PeriodReportQuery {
    /// Report filters for the period the query names.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a monthly report lacks its year or
    /// month, names an impossible month, or the type has no fixed period.
    pub fn filters(&self, today: NaiveDate) -> PayrollResult<ReportFilters> {
        let mut filters = match self.report_type {
            ReportType::Ytd => ReportFilters::year_to_date(self.as_of.unwrap_or(today)),
            ReportType::Monthly => match (self.year, self.month) {
                (Some(year), Some(month)) => ReportFilters::monthly(year, month)?,
                _ => {
                    return Err(PayrollError::validation(
                        "month",
                        "monthly reports need a year and a month",
                    ));
                }
            },
            ReportType::Department => {
                return Err(PayrollError::validation(
                    "type",
                    "department reports need explicit dates",
                ));
            }
        };
        filters.department_id = self.department_id;
        filters.employee_id = self.employee_id;
        Ok(filters)
    }
}

/// Request body for `POST /records/bulk`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkRequest {
    /// The pay periods to submit, processed in order.
    pub records: Vec<PayPeriodSubmission>,
}

/// Request body for `PUT /records/:id/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    /// The status to move the record to.
    pub status: RecordStatus,
}

/// Request body for `POST /companies`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRequest {
    /// Company name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// City/state.
    #[serde(default)]
    pub location: String,
}

/// Request body for `POST /companies/:id/departments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentRequest {
    /// Department name.
    pub name: String,
}

/// Query string for record listing and export endpoints.
///
/// Date bounds follow report semantics: a record is included when its pay
/// period ends within them. A missing bound is open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordsQuery {
    /// The company whose records to list.
    pub company_id: CompanyId,
    /// Earliest pay period end to include.
    pub start_date: Option<NaiveDate>,
    /// Latest pay period end to include.
    pub end_date: Option<NaiveDate>,
    /// Only records of this department's employees.
    pub department_id: Option<DepartmentId>,
    /// Only records of this employee.
    pub employee_id: Option<EmployeeId>,
    /// Employee name or number to search for.
    pub search: Option<String>,
}

impl RecordsQuery {
    /// Report filters equivalent to the query's bounds and ids.
    pub fn filters(&self) -> ReportFilters {
        let mut filters = ReportFilters::between(
            self.start_date.unwrap_or(NaiveDate::MIN),
            self.end_date.unwrap_or(NaiveDate::MAX),
            ReportType::default(),
        );
        filters.department_id = self.department_id;
        filters.employee_id = self.employee_id;
        filters
    }
}

/// Query string for `GET /employees`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeesQuery {
    /// Employee name or number to search for.
    pub search: Option<String>,
}
