//! Payroll calculation and reporting engine
//!
//! This crate calculates gross pay, withholding, retirement contributions and
//! net pay for hourly and salaried employees, stores the resulting payroll
//! records, and aggregates them into filtered reports. CSV import and export,
//! check printing and an HTTP API are built on the same core.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod reporting;
pub mod repository;
pub mod validation;
