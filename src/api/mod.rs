//! HTTP API for the payroll engine.
//!
//! This module provides the REST endpoints for calculating pay, storing
//! payroll records, reporting, company set-up and CSV import and export.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BulkRequest, CalculationRequest, CompanyRequest, DepartmentRequest, EmployeesQuery,
    PeriodReportQuery, RecordsQuery, ReportRequest, StatusUpdateRequest,
};
pub use response::{
    ApiError, ApiErrorResponse, BulkEntryError, BulkResponse, DashboardResponse, ImportResponse,
    ReportResponse,
};
pub use state::AppState;
