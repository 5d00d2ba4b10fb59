//! In-memory repository.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::calculation::{build_record, calculate_pay};
use crate::config::{PayPolicy, SeedData};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    Company, CompanyId, CompensationProfile, CustomColumn, CustomColumnId, Department,
    DepartmentId, Employee, EmployeeId, NewCustomColumn, NewEmployee, PayPeriodInput, PayrollRecord, RecordId, RecordStatus, ReportFilters,
    ServerComputedRecord,
};
use crate::reporting::{EmployeeIndex, record_matches};
use crate::validation::ensure_present;

use super::PayrollRepository;

/// Next id to hand out per table. Ids are never reused.
#[derive(Debug)]
struct Counters {
    company: u64,
    department: u64,
    employee: u64,
    record: u64,
    custom_column: u64,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            company: 1,
            department: 1,
            employee: 1,
            record: 1,
            custom_column: 1,
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    companies: BTreeMap<CompanyId, Company>,
    departments: BTreeMap<DepartmentId, Department>,
    employees: BTreeMap<EmployeeId, Employee>,
    records: BTreeMap<RecordId, PayrollRecord>,
    custom_columns: BTreeMap<CustomColumnId, CustomColumn>,
    next: Counters,
}

impl Tables {
    fn employee(&self, id: EmployeeId) -> PayrollResult<&Employee> {
        self.employees
            .get(&id)
            .ok_or_else(|| PayrollError::not_found("Employee", id))
    }

    fn company_of(&self, employee: &Employee) -> Option<CompanyId> {
        self.departments
            .get(&employee.department_id)
            .map(|d| d.company_id)
    }

    fn company(&self, id: CompanyId) -> PayrollResult<&Company> {
        self.companies
            .get(&id)
            .ok_or_else(|| PayrollError::not_found("Company", id))
    }

    /// A company's column, or not found if it belongs to someone else.
    fn custom_column(
        &self,
        company_id: CompanyId,
        column_id: CustomColumnId,
    ) -> PayrollResult<&CustomColumn> {
        self.company(company_id)?;
        self.custom_columns
            .get(&column_id)
            .filter(|c| c.company_id == company_id)
            .ok_or_else(|| PayrollError::not_found("Custom column", column_id))
    }
}

/// Fails if `id` is already a key of a seeded table.
fn ensure_unseeded<V>(table: &BTreeMap<u64, V>, entity: &str, id: u64) -> PayrollResult<()> {
    if table.contains_key(&id) {
        return Err(PayrollError::validation(
            "id",
            format!("duplicate {} id {} in seed data", entity, id),
        ));
    }
    Ok(())
}

/// Takes the next id from `counter`, advancing it.
fn take_id(counter: &mut u64, table: &str) -> PayrollResult<u64> {
    let id = *counter;
    *counter = counter.checked_add(1).ok_or_else(|| PayrollError::Repository {
        message: format!("{} ids exhausted", table),
    })?;
    Ok(id)
}

/// Moves `counter` past `id` so a later [`take_id`] never returns it.
fn reserve_id(counter: &mut u64, id: u64) {
    if id >= *counter {
        *counter = id.saturating_add(1);
    }
}

/// A [`PayrollRepository`] holding everything in process memory.
///
/// Records submitted through [`PayrollRepository::submit_pay_period`] are
/// calculated with the repository's [`PayPolicy`].
#[derive(Debug)]
pub struct InMemoryRepository {
    policy: PayPolicy,
    tables: RwLock<Tables>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new(PayPolicy::default())
    }
}

impl InMemoryRepository {
    /// Creates an empty repository calculating with `policy`.
    pub fn new(policy: PayPolicy) -> Self {
        Self {
            policy,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Creates a repository pre-populated with seed data.
    ///
    /// Seed entities keep their ids; generated ids continue after the
    /// largest seeded one.
    ///
    /// # Errors
    ///
    /// Returns an error if an id repeats within a table, a department or
    /// column names an unknown company, an employee names an unknown
    /// department, an employee's compensation or a column definition is
    /// invalid, or an employee number or a company's column name repeats.
    pub fn from_seed(policy: PayPolicy, seed: &SeedData) -> PayrollResult<Self> {
        let repository = Self::new(policy);
        {
            let mut tables = repository.tables.write();

            for company in &seed.companies {
                ensure_unseeded(&tables.companies, "company", company.id)?;
                reserve_id(&mut tables.next.company, company.id);
                tables.companies.insert(company.id, company.clone());
            }

            for department in &seed.departments {
                ensure_unseeded(&tables.departments, "department", department.id)?;
                tables.company(department.company_id)?;
                reserve_id(&mut tables.next.department, department.id);
                tables.departments.insert(department.id, department.clone());
            }

            for employee in &seed.employees {
                ensure_unseeded(&tables.employees, "employee", employee.id)?;
                check_new_employee(&tables, employee.department_id, &employee.employee_number)?;
                employee.profile().validate()?;
                reserve_id(&mut tables.next.employee, employee.id);
                tables.employees.insert(employee.id, employee.clone());
            }

            for column in &seed.custom_columns {
                ensure_unseeded(&tables.custom_columns, "custom column", column.id)?;
                let definition = NewCustomColumn::from(column);
                check_new_column(&tables, column.company_id, &definition, None)?;
                reserve_id(&mut tables.next.custom_column, column.id);
                tables
                    .custom_columns
                    .insert(column.id, definition.with_id(column.id, column.company_id));
            }

            info!(
                companies = tables.companies.len(),
                departments = tables.departments.len(),
                employees = tables.employees.len(),
                custom_columns = tables.custom_columns.len(),
                "Seeded repository"
            );
        }
        Ok(repository)
    }

    /// The policy records are calculated with.
    pub fn policy(&self) -> &PayPolicy {
        &self.policy
    }
}

/// Checks a new employee's department exists and number is unused.
fn check_new_employee(
    tables: &Tables,
    department_id: DepartmentId,
    employee_number: &str,
) -> PayrollResult<()> {
    ensure_present("employee_number", employee_number)?;
    if !tables.departments.contains_key(&department_id) {
        return Err(PayrollError::not_found("Department", department_id));
    }
    if tables
        .employees
        .values()
        .any(|e| e.employee_number.eq_ignore_ascii_case(employee_number.trim()))
    {
        return Err(PayrollError::validation(
            "employee_number",
            format!("employee number {} already exists", employee_number.trim()),
        ));
    }
    Ok(())
}

/// Checks a column definition is valid and its name is free within the
/// company, ignoring the column being replaced.
fn check_new_column(
    tables: &Tables,
    company_id: CompanyId,
    column: &NewCustomColumn,
    replacing: Option<CustomColumnId>,
) -> PayrollResult<()> {
    column.validate()?;
    tables.company(company_id)?;
    let name = column.name.trim();
    if tables.custom_columns.values().any(|c| {
        c.company_id == company_id
            && Some(c.id) != replacing
            && c.name.eq_ignore_ascii_case(name)
    }) {
        return Err(PayrollError::validation(
            "name",
            format!("column {} already exists", name),
        ));
    }
    Ok(())
}

impl PayrollRepository for InMemoryRepository {
    fn compensation_profile(&self, employee_id: EmployeeId) -> PayrollResult<CompensationProfile> {
        let tables = self.tables.read();
        Ok(tables.employee(employee_id)?.profile())
    }

    fn list_records(
        &self,
        company_id: CompanyId,
        filters: Option<&ReportFilters>,
    ) -> PayrollResult<Vec<PayrollRecord>> {
        if let Some(filters) = filters {
            filters.validate()?;
        }

        let tables = self.tables.read();
        if !tables.companies.contains_key(&company_id) {
            return Err(PayrollError::not_found("Company", company_id));
        }

        let employees: Vec<Employee> = tables
            .employees
            .values()
            .filter(|e| tables.company_of(e) == Some(company_id))
            .cloned()
            .collect();
        let index = EmployeeIndex::new(&employees);

        let records = tables
            .records
            .values()
            .filter(|r| index.get(r.employee_id).is_some())
            .filter(|r| filters.is_none_or(|f| record_matches(r, &index, f)))
            .cloned()
            .collect();
        Ok(records)
    }

    fn submit_pay_period(
        &self,
        employee_id: EmployeeId,
        input: &PayPeriodInput,
    ) -> PayrollResult<PayrollRecord> {
        let mut tables = self.tables.write();
        let profile = tables.employee(employee_id)?.profile();
        let breakdown = calculate_pay(&profile, input, &self.policy)?;

        let id = take_id(&mut tables.next.record, "record")?;
        let record = build_record(id, employee_id, input, &breakdown, Utc::now());
        tables.records.insert(id, record.clone());

        info!(
            record_id = id,
            employee_id,
            gross_pay = %record.gross_pay,
            net_pay = %record.net_pay,
            "Stored payroll record"
        );
        Ok(record)
    }

    fn accept_computed(&self, record: ServerComputedRecord) -> PayrollResult<PayrollRecord> {
        let record = PayrollRecord::try_from(record).inspect_err(|e| {
            warn!(error = %e, "Rejected computed payroll record");
        })?;

        let mut tables = self.tables.write();
        tables.employee(record.employee_id)?;
        if tables.records.contains_key(&record.id) {
            return Err(PayrollError::Repository {
                message: format!("record {} already exists", record.id),
            });
        }
        reserve_id(&mut tables.next.record, record.id);
        tables.records.insert(record.id, record.clone());

        info!(
            record_id = record.id,
            employee_id = record.employee_id,
            "Accepted computed payroll record"
        );
        Ok(record)
    }

    fn update_status(
        &self,
        record_id: RecordId,
        status: RecordStatus,
    ) -> PayrollResult<PayrollRecord> {
        let mut tables = self.tables.write();
        let record = tables
            .records
            .get_mut(&record_id)
            .ok_or_else(|| PayrollError::not_found("Payroll record", record_id))?;

        if !record.status.can_advance_to(status) {
            return Err(PayrollError::validation(
                "status",
                format!("cannot move record from {} to {}", record.status, status),
            ));
        }
        let previous = record.status;
        record.status = status;

        info!(record_id, from = %previous, to = %status, "Updated record status");
        Ok(record.clone())
    }

    fn add_company(&self, name: &str, address: &str, location: &str) -> PayrollResult<Company> {
        let name = ensure_present("name", name)?;
        let mut tables = self.tables.write();
        let id = take_id(&mut tables.next.company, "company")?;
        let company = Company {
            id,
            name: name.to_string(),
            address: address.trim().to_string(),
            location: location.trim().to_string(),
        };
        tables.companies.insert(id, company.clone());

        info!(company_id = id, name = %company.name, "Added company");
        Ok(company)
    }

    fn add_department(&self, company_id: CompanyId, name: &str) -> PayrollResult<Department> {
        let name = ensure_present("name", name)?;
        let mut tables = self.tables.write();
        if !tables.companies.contains_key(&company_id) {
            return Err(PayrollError::not_found("Company", company_id));
        }
        let id = take_id(&mut tables.next.department, "department")?;
        let department = Department {
            id,
            company_id,
            name: name.to_string(),
        };
        tables.departments.insert(id, department.clone());

        info!(department_id = id, company_id, "Added department");
        Ok(department)
    }

    fn add_employee(&self, employee: NewEmployee) -> PayrollResult<Employee> {
        ensure_present("first_name", &employee.first_name)?;
        ensure_present("last_name", &employee.last_name)?;

        let mut tables = self.tables.write();
        check_new_employee(&tables, employee.department_id, &employee.employee_number)?;
        let mut employee = employee.with_id(0);
        employee.profile().validate()?;
        employee.employee_number = employee.employee_number.trim().to_string();
        let id = take_id(&mut tables.next.employee, "employee")?;
        employee.id = id;
        tables.employees.insert(id, employee.clone());

        info!(
            employee_id = id,
            employee_number = %employee.employee_number,
            department_id = employee.department_id,
            "Added employee"
        );
        Ok(employee)
    }

    fn custom_columns(&self, company_id: CompanyId) -> PayrollResult<Vec<CustomColumn>> {
        let tables = self.tables.read();
        tables.company(company_id)?;
        Ok(tables
            .custom_columns
            .values()
            .filter(|c| c.company_id == company_id)
            .cloned()
            .collect())
    }

    fn add_custom_column(
        &self,
        company_id: CompanyId,
        column: NewCustomColumn,
    ) -> PayrollResult<CustomColumn> {
        let mut tables = self.tables.write();
        check_new_column(&tables, company_id, &column, None)?;
        let id = take_id(&mut tables.next.custom_column, "custom column")?;
        let column = column.with_id(id, company_id);
        tables.custom_columns.insert(id, column.clone());

        info!(column_id = id, company_id, name = %column.name, "Added custom column");
        Ok(column)
    }

    fn update_custom_column(
        &self,
        company_id: CompanyId,
        column_id: CustomColumnId,
        column: NewCustomColumn,
    ) -> PayrollResult<CustomColumn> {
        let mut tables = self.tables.write();
        tables.custom_column(company_id, column_id)?;
        check_new_column(&tables, company_id, &column, Some(column_id))?;
        let column = column.with_id(column_id, company_id);
        tables.custom_columns.insert(column_id, column.clone());

        info!(column_id, company_id, "Updated custom column");
        Ok(column)
    }

    fn delete_custom_column(
        &self,
        company_id: CompanyId,
        column_id: CustomColumnId,
    ) -> PayrollResult<CustomColumn> {
        let mut tables = self.tables.write();
        tables.custom_column(company_id, column_id)?;
        let column = tables
            .custom_columns
            .remove(&column_id)
            .ok_or_else(|| PayrollError::not_found("Custom column", column_id))?;

        info!(column_id, company_id, "Deleted custom column");
        Ok(column)
    }

    fn record(&self, record_id: RecordId) -> PayrollResult<PayrollRecord> {
        self.tables
            .read()
            .records
            .get(&record_id)
            .cloned()
            .ok_or_else(|| PayrollError::not_found("Payroll record", record_id))
    }

    fn employee(&self, employee_id: EmployeeId) -> PayrollResult<Employee> {
        self.tables.read().employee(employee_id).cloned()
    }

    fn employer(&self, employee_id: EmployeeId) -> PayrollResult<Company> {
        let tables = self.tables.read();
        let employee = tables.employee(employee_id)?;
        tables
            .company_of(employee)
            .and_then(|id| tables.companies.get(&id))
            .cloned()
            .ok_or_else(|| PayrollError::DataIntegrity {
                record_id: None,
                message: format!("employee {} has no company", employee_id),
            })
    }

    fn employees(&self) -> PayrollResult<Vec<Employee>> {
        Ok(self.tables.read().employees.values().cloned().collect())
    }

    fn departments(&self, company_id: CompanyId) -> PayrollResult<Vec<Department>> {
        let tables = self.tables.read();
        if !tables.companies.contains_key(&company_id) {
            return Err(PayrollError::not_found("Company", company_id));
        }
        Ok(tables
            .departments
            .values()
            .filter(|d| d.company_id == company_id)
            .cloned()
            .collect())
    }

    fn companies(&self) -> PayrollResult<Vec<Company>> {
        Ok(self.tables.read().companies.values().cloned().collect())
    }

    fn find_employee_by_number(&self, employee_number: &str) -> PayrollResult<Employee> {
        let number = employee_number.trim();
        let tables = self.tables.read();
        tables
            .employees
            .values()
            .find(|e| e.employee_number.eq_ignore_ascii_case(number))
            .cloned()
            .ok_or_else(|| PayrollError::not_found("Employee", number))
    }

    fn employee_records(&self, employee_id: EmployeeId) -> PayrollResult<Vec<PayrollRecord>> {
        let tables = self.tables.read();
        tables.employee(employee_id)?;
        Ok(tables
            .records
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect())
    }

    fn records_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PayrollResult<Vec<PayrollRecord>> {
        crate::validation::ensure_period(start, end)?;
        let records: Vec<PayrollRecord> = self
            .tables
            .read()
            .records
            .values()
            .filter(|r| r.pay_period_start >= start && r.pay_period_end <= end)
            .cloned()
            .collect();
        debug!(%start, %end, count = records.len(), "Listed records in range");
        Ok(records)
    }
}
