//! Aggregation of payroll records into reports.
//!
//! Everything here is a pure function over record and employee slices; the
//! caller decides where the records come from.

mod breakdown;
mod filter;
mod lookup;
mod summary;

pub use breakdown::{
    DepartmentTotal, EarningsBreakdown, department_totals, earnings_breakdown, recent_periods,
};
pub use filter::{EmployeeIndex, record_matches};
pub use lookup::search_records;
pub use summary::generate_report;
