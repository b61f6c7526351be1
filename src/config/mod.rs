//! Configuration module for budget-view
//!
//! This module provides configuration management including:
//! - Path resolution for settings and logs
//! - User settings persistence
//! - Base URL validation

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::Settings;
