//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{FLAT_TAX_RATE, OVERTIME_MULTIPLIER, SALARY_PERIODS_PER_YEAR};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{Company, CustomColumn, Department, Employee};

/// The pay rules applied by the calculator.
///
/// The default policy is a flat 20% withholding, time-and-a-half overtime
/// and a bi-weekly salary divisor of 26.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPolicy {
    /// Flat withholding rate applied to gross pay.
    pub tax_rate: Decimal,
    /// Multiplier on the hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
    /// Pay periods per year; annual salary is divided by this.
    pub salary_periods_per_year: u32,
}

impl Default for PayPolicy {
    fn default() -> Self {
        Self {
            tax_rate: FLAT_TAX_RATE,
            overtime_multiplier: OVERTIME_MULTIPLIER,
            salary_periods_per_year: SALARY_PERIODS_PER_YEAR,
        }
    }
}

impl PayPolicy {
    /// Checks the policy values are usable by the calculator.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE {
            return Err(PayrollError::validation(
                "tax_rate",
                format!("must be between 0 and 1 (got {})", self.tax_rate),
            ));
        }
        if self.overtime_multiplier < Decimal::ONE {
            return Err(PayrollError::validation(
                "overtime_multiplier",
                format!("must be at least 1 (got {})", self.overtime_multiplier),
            ));
        }
        if self.salary_periods_per_year == 0 {
            return Err(PayrollError::validation(
                "salary_periods_per_year",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address the API binds to.
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Structure of `policy.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Pay rules.
    pub policy: PayPolicy,
    /// Server settings.
    #[serde(default)]
    pub server: ServerSettings,
}

/// Structure of `seed.yaml`: the organisation data loaded at start-up.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Companies.
    #[serde(default)]
    pub companies: Vec<Company>,
    /// Departments.
    #[serde(default)]
    pub departments: Vec<Department>,
    /// Employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Company-defined payroll columns.
    #[serde(default)]
    pub custom_columns: Vec<CustomColumn>,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone, Default)]
pub struct PayrollConfig {
    policy: PayPolicy,
    server: ServerSettings,
    seed: SeedData,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(policy: PayPolicy, server: ServerSettings, seed: SeedData) -> Self {
        Self {
            policy,
            server,
            seed,
        }
    }

    /// Returns the pay policy.
    pub fn policy(&self) -> &PayPolicy {
        &self.policy
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerSettings {
        &self.server
    }

    /// Returns the seed data.
    pub fn seed(&self) -> &SeedData {
        &self.seed
    }
}
