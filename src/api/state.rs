//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PayPolicy};
use crate::error::PayrollResult;
use crate::repository::{InMemoryRepository, PayrollRepository};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration and the payroll repository.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
    /// Where companies, employees and records live.
    repository: Arc<dyn PayrollRepository>,
}

impl AppState {
    /// Creates a new application state from a configuration and repository.
    pub fn new(config: ConfigLoader, repository: impl PayrollRepository + 'static) -> Self {
        Self {
            config: Arc::new(config),
            repository: Arc::new(repository),
        }
    }

    /// Creates state backed by an in-memory repository holding the
    /// configuration's seed data.
    pub fn seeded(config: ConfigLoader) -> PayrollResult<Self> {
        let repository = InMemoryRepository::from_seed(config.policy().clone(), config.seed())?;
        Ok(Self::new(config, repository))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// The pay policy calculations use.
    pub fn policy(&self) -> &PayPolicy {
        self.config.policy()
    }

    /// Returns the payroll repository.
    pub fn repository(&self) -> &dyn PayrollRepository {
        self.repository.as_ref()
    }
}
