//! Configuration loading and management for the payroll engine.
//!
//! This module loads the pay policy (withholding rate, overtime multiplier,
//! salary divisor), server settings and seed organisation data from YAML
//! files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Overtime multiplier: {}", config.policy().overtime_multiplier);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PayPolicy, PayrollConfig, PolicyFile, SeedData, ServerSettings};
