//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod custom_column;
mod employee;
mod pay_breakdown;
mod pay_period;
mod payroll_record;
mod report;

pub use custom_column::{ColumnType, CustomColumn, NewCustomColumn};
pub use employee::{
    Company, CompensationProfile, Department, Employee, FilingStatus, NewEmployee, PayType,
};
pub use pay_breakdown::{AuditStep, PayBreakdown};
pub use pay_period::{PayPeriodInput, PayPeriodSubmission};
pub use payroll_record::{Deductions, PayrollRecord, RecordStatus, ServerComputedRecord};
pub use report::{DateRange, ReportFilters, ReportSummary, ReportType};

/// Identifier of a company.
pub type CompanyId = u64;
/// Identifier of a custom column.
pub type CustomColumnId = u64;
/// Identifier of a department.
pub type DepartmentId = u64;
/// Identifier of an employee.
pub type EmployeeId = u64;
/// Identifier of a payroll record.
pub type RecordId = u64;
