//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service API.

pub mod budget;

pub use budget::{handle_budget_command, run_budget_command, BudgetCommands};
