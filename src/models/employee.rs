//! Company, department and employee models.
//!
//! This module defines the organisational records the console manages and
//! the [`CompensationProfile`] subset the pay calculator works from.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CompanyId, DepartmentId, EmployeeId};
use crate::error::{PayrollError, PayrollResult};
use crate::validation::{ensure_fraction, ensure_non_negative};

/// How an employee's pay rate is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayType {
    /// `pay_rate` is an hourly rate.
    Hourly,
    /// `pay_rate` is an annual salary.
    Salary,
}

impl FromStr for PayType {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "salary" | "salaried" => Ok(Self::Salary),
            other => Err(PayrollError::validation(
                "payroll_type",
                format!("unknown payroll type '{}'", other),
            )),
        }
    }
}

impl fmt::Display for PayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hourly => write!(f, "hourly"),
            Self::Salary => write!(f, "salary"),
        }
    }
}

/// Tax filing status carried on the employee record.
///
/// Withholding is currently a flat rate, so the status does not change the
/// calculated tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Single filer.
    Single,
    /// Married, filing a joint return.
    #[serde(alias = "married")]
    MarriedFilingJointly,
    /// Married, filing separately.
    MarriedFilingSeparately,
    /// Head of household.
    HeadOfHousehold,
}

impl FromStr for FilingStatus {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "single" => Ok(Self::Single),
            "married" | "married_filing_jointly" => Ok(Self::MarriedFilingJointly),
            "married_filing_separately" => Ok(Self::MarriedFilingSeparately),
            "head_of_household" => Ok(Self::HeadOfHousehold),
            other => Err(PayrollError::validation(
                "filing_status",
                format!("unknown filing status '{}'", other),
            )),
        }
    }
}

/// The compensation terms the pay calculator needs for one pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CompensationProfile, FilingStatus, PayType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let profile = CompensationProfile {
///     pay_type: PayType::Hourly,
///     pay_rate: Decimal::from(35),
///     retirement_rate: Decimal::from_str("0.06").unwrap(),
///     filing_status: FilingStatus::Single,
/// };
/// assert!(profile.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationProfile {
    /// Whether the rate is hourly or an annual salary.
    pub pay_type: PayType,
    /// Hourly rate or annual salary, never negative.
    pub pay_rate: Decimal,
    /// Fraction of gross pay contributed to retirement.
    pub retirement_rate: Decimal,
    /// Tax filing status.
    pub filing_status: FilingStatus,
}

impl CompensationProfile {
    /// Checks the rate and retirement fraction are in range.
    pub fn validate(&self) -> PayrollResult<()> {
        ensure_non_negative("pay_rate", self.pay_rate)?;
        ensure_fraction("retirement_rate", self.retirement_rate)?;
        Ok(())
    }
}

/// A company whose payroll is administered by the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier.
    pub id: CompanyId,
    /// Company name.
    pub name: String,
    /// Street address.
    #[serde(default)]
    pub address: String,
    /// City/state.
    #[serde(default)]
    pub location: String,
}

/// A department within a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier.
    pub id: DepartmentId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Department name.
    pub name: String,
}

/// An employee on a company's payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier.
    pub id: EmployeeId,
    /// The department the employee belongs to.
    pub department_id: DepartmentId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Human-facing employee number (e.g. "EMP001"), unique.
    pub employee_number: String,
    /// Hourly or salaried.
    pub pay_type: PayType,
    /// Hourly rate or annual salary.
    pub pay_rate: Decimal,
    /// Tax filing status.
    pub filing_status: FilingStatus,
    /// Fraction of gross pay contributed to retirement.
    pub retirement_rate: Decimal,
}

impl Employee {
    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Extracts the compensation terms used by the pay calculator.
    pub fn profile(&self) -> CompensationProfile {
        CompensationProfile {
            pay_type: self.pay_type,
            pay_rate: self.pay_rate,
            retirement_rate: self.retirement_rate,
            filing_status: self.filing_status,
        }
    }

    /// Returns true if `term` (case-insensitive) occurs in the employee's
    /// full name or employee number.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.full_name().to_lowercase().contains(&term)
            || self.employee_number.to_lowercase().contains(&term)
    }
}

/// Details for a new employee; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// The department the employee joins.
    pub department_id: DepartmentId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Human-facing employee number.
    pub employee_number: String,
    /// Hourly or salaried.
    pub pay_type: PayType,
    /// Hourly rate or annual salary.
    pub pay_rate: Decimal,
    /// Tax filing status.
    pub filing_status: FilingStatus,
    /// Fraction of gross pay contributed to retirement.
    pub retirement_rate: Decimal,
}

impl NewEmployee {
    /// Attaches an id, producing the stored employee.
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            department_id: self.department_id,
            first_name: self.first_name,
            last_name: self.last_name,
            employee_number: self.employee_number,
            pay_type: self.pay_type,
            pay_rate: self.pay_rate,
            filing_status: self.filing_status,
            retirement_rate: self.retirement_rate,
        }
    }
}
