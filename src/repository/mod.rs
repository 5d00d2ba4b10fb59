//! Persistence seam for companies, employees and payroll records.
//!
//! The engine's pure parts (calculator, aggregator) never reach for storage
//! themselves. Callers hold a [`PayrollRepository`] and pass its data in.
//! [`InMemoryRepository`] is the implementation the HTTP server runs on.

mod memory;

use chrono::NaiveDate;
use tracing::info;

use crate::error::PayrollResult;
use crate::models::{
    Company, CompanyId, CompensationProfile, CustomColumn, CustomColumnId, Department, Employee,
    EmployeeId, NewCustomColumn, NewEmployee, PayPeriodInput, PayPeriodSubmission, PayrollRecord, RecordId, RecordStatus,
    ReportFilters, ServerComputedRecord,
};

pub use memory::InMemoryRepository;

/// Storage for payroll data.
///
/// Methods are synchronous; implementations must not block for long, since
/// the HTTP layer calls them from async handlers.
pub trait PayrollRepository: Send + Sync {
    /// Returns the compensation terms of an employee.
    ///
    /// # Errors
    ///
    /// [`PayrollError::NotFound`](crate::error::PayrollError::NotFound) when
    /// the employee is unknown.
    fn compensation_profile(&self, employee_id: EmployeeId) -> PayrollResult<CompensationProfile>;

    /// Lists a company's records, optionally narrowed by report filters.
    fn list_records(
        &self,
        company_id: CompanyId,
        filters: Option<&ReportFilters>,
    ) -> PayrollResult<Vec<PayrollRecord>>;

    /// Calculates and stores a pending record for one pay period.
    fn submit_pay_period(
        &self,
        employee_id: EmployeeId,
        input: &PayPeriodInput,
    ) -> PayrollResult<PayrollRecord>;

    /// Submits several pay periods, one result per entry in input order.
    ///
    /// A failing entry does not stop the ones after it.
    fn submit_bulk(&self, entries: &[PayPeriodSubmission]) -> Vec<PayrollResult<PayrollRecord>> {
        let results: Vec<_> = entries
            .iter()
            .map(|entry| self.submit_pay_period(entry.employee_id, &entry.period))
            .collect();
        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        info!(
            submitted = entries.len(),
            succeeded,
            failed = entries.len() - succeeded,
            "Bulk pay period submission finished"
        );
        results
    }

    /// Stores a record computed elsewhere, after an integrity check.
    fn accept_computed(&self, record: ServerComputedRecord) -> PayrollResult<PayrollRecord>;

    /// Moves a record forward to `status`.
    ///
    /// # Errors
    ///
    /// Validation error when `status` is not after the current status.
    fn update_status(&self, record_id: RecordId, status: RecordStatus)
    -> PayrollResult<PayrollRecord>;

    /// Adds a company.
    fn add_company(&self, name: &str, address: &str, location: &str) -> PayrollResult<Company>;

    /// Adds a department to an existing company.
    fn add_department(&self, company_id: CompanyId, name: &str) -> PayrollResult<Department>;

    /// Adds an employee to an existing department.
    ///
    /// Employee numbers are unique; a duplicate is a validation error.
    fn add_employee(&self, employee: NewEmployee) -> PayrollResult<Employee>;

    /// The custom columns a company defines, ordered by id.
    fn custom_columns(&self, company_id: CompanyId) -> PayrollResult<Vec<CustomColumn>>;

    /// Adds a custom column to an existing company.
    ///
    /// Column names are unique within a company, ignoring case.
    fn add_custom_column(
        &self,
        company_id: CompanyId,
        column: NewCustomColumn,
    ) -> PayrollResult<CustomColumn>;

    /// Replaces the definition of one of a company's columns.
    ///
    /// # Errors
    ///
    /// [`PayrollError::NotFound`](crate::error::PayrollError::NotFound) when
    /// the column does not exist or belongs to another company.
    fn update_custom_column(
        &self,
        company_id: CompanyId,
        column_id: CustomColumnId,
        column: NewCustomColumn,
    ) -> PayrollResult<CustomColumn>;

    /// Removes one of a company's columns, returning it.
    fn delete_custom_column(
        &self,
        company_id: CompanyId,
        column_id: CustomColumnId,
    ) -> PayrollResult<CustomColumn>;

    /// Looks up a record by id.
    fn record(&self, record_id: RecordId) -> PayrollResult<PayrollRecord>;

    /// Looks up an employee by id.
    fn employee(&self, employee_id: EmployeeId) -> PayrollResult<Employee>;

    /// The company an employee works for, through their department.
    fn employer(&self, employee_id: EmployeeId) -> PayrollResult<Company>;

    /// All employees, ordered by id.
    fn employees(&self) -> PayrollResult<Vec<Employee>>;

    /// The departments of a company, ordered by id.
    fn departments(&self, company_id: CompanyId) -> PayrollResult<Vec<Department>>;

    /// All companies, ordered by id.
    fn companies(&self) -> PayrollResult<Vec<Company>>;

    /// Looks up an employee by employee number.
    fn find_employee_by_number(&self, employee_number: &str) -> PayrollResult<Employee>;

    /// The records of one employee, ordered by id.
    fn employee_records(&self, employee_id: EmployeeId) -> PayrollResult<Vec<PayrollRecord>>;

    /// Records whose whole pay period lies within `[start, end]`.
    fn records_in_range(&self, start: NaiveDate, end: NaiveDate)
    -> PayrollResult<Vec<PayrollRecord>>;
}
