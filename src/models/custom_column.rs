//! Company-defined payroll columns.
//!
//! A company can add its own columns to payroll entry, such as a bonus or a
//! health-insurance deduction. The engine stores the definitions; amounts
//! entered against them are not part of pay calculation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CompanyId, CustomColumnId};
use crate::error::{PayrollError, PayrollResult};
use crate::validation::ensure_present;

/// What a custom column holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// A dollar amount.
    #[default]
    Number,
    /// A percentage of pay.
    Percentage,
    /// Free text.
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnType::Number => "number",
            ColumnType::Percentage => "percentage",
            ColumnType::Text => "text",
        };
        f.write_str(label)
    }
}

/// A stored column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomColumn {
    /// Unique identifier.
    pub id: CustomColumnId,
    /// The company the column belongs to.
    pub company_id: CompanyId,
    /// Column heading.
    pub name: String,
    /// What the column holds.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// The amount is deducted from pay rather than added.
    pub is_deduction: bool,
    /// The column takes part in payroll runs.
    pub include_in_payroll: bool,
    /// The amount is excluded from withholding.
    pub not_subject_to_withholding: bool,
}

/// A column definition that has not been stored yet.
///
/// Omitted flags default the way a new column is offered for entry: a
/// payroll-included number that is neither a deduction nor exempt from
/// withholding.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ColumnType, NewCustomColumn};
///
/// let column: NewCustomColumn = serde_json::from_str(r#"{"name": "Parking", "is_deduction": true}"#).unwrap();
/// assert_eq!(column.column_type, ColumnType::Number);
/// assert!(column.include_in_payroll);
/// assert!(column.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomColumn {
    /// Column heading.
    pub name: String,
    /// What the column holds.
    #[serde(default, rename = "type")]
    pub column_type: ColumnType,
    /// The amount is deducted from pay rather than added.
    #[serde(default)]
    pub is_deduction: bool,
    /// The column takes part in payroll runs.
    #[serde(default = "included_by_default")]
    pub include_in_payroll: bool,
    /// The amount is excluded from withholding.
    #[serde(default)]
    pub not_subject_to_withholding: bool,
}

fn included_by_default() -> bool {
    true
}

impl NewCustomColumn {
    /// Checks the column has a name and a text column carries no money.
    pub fn validate(&self) -> PayrollResult<()> {
        ensure_present("name", &self.name)?;
        if self.column_type == ColumnType::Text && (self.is_deduction || self.not_subject_to_withholding) {
            return Err(PayrollError::validation(
                "type",
                "text columns cannot be deductions or withholding-exempt amounts",
            ));
        }
        Ok(())
    }

    /// Attaches an id and owner, producing the stored column.
    pub fn with_id(self, id: CustomColumnId, company_id: CompanyId) -> CustomColumn {
        CustomColumn {
            id,
            company_id,
            name: self.name.trim().to_string(),
            column_type: self.column_type,
            is_deduction: self.is_deduction,
            include_in_payroll: self.include_in_payroll,
            not_subject_to_withholding: self.not_subject_to_withholding,
        }
    }
}

impl From<&CustomColumn> for NewCustomColumn {
    fn from(column: &CustomColumn) -> Self {
        NewCustomColumn {
            name: column.name.clone(),
            column_type: column.column_type,
            is_deduction: column.is_deduction,
            include_in_payroll: column.include_in_payroll,
            not_subject_to_withholding: column.not_subject_to_withholding,
        }
    }
}
