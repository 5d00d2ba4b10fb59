//! Calculation logic for the payroll engine.
//!
//! This module contains the pay calculator and the individual rules it
//! applies: regular pay (hourly or salaried), overtime pay, flat tax
//! withholding and retirement contributions.

mod overtime_pay;
mod pay_calculator;
mod regular_pay;
mod withholding;

use rust_decimal::Decimal;

pub use overtime_pay::{OvertimePayResult, calculate_overtime_pay};
pub use pay_calculator::{build_record, calculate_pay};
pub use regular_pay::{RegularPayResult, calculate_regular_pay};
pub use withholding::{DeductionResult, calculate_retirement, calculate_withholding};

/// Flat withholding rate applied to gross pay (20%).
pub const FLAT_TAX_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Overtime pay multiplier (time and a half).
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Bi-weekly pay periods per year; annual salary is divided by this.
pub const SALARY_PERIODS_PER_YEAR: u32 = 26;
