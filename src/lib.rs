//! budget-view - terminal client for a remote budget service
//!
//! The service owns the budget records; this crate lists them and adds new
//! ones, either through an interactive view or one-shot commands.
//!
//! # Architecture
//!
//! - `api`: `BudgetApi` trait and its reqwest implementation
//! - `models`: budget records and request payloads
//! - `tui`: the interactive budget view
//! - `cli`: one-shot commands over the same API
//! - `display`: plain-text formatting for CLI output
//! - `config`: paths and settings
//! - `error`: custom error types
//! - `logging`: tracing setup
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_view::api::{BudgetApi, HttpBudgetApi};
//! use budget_view::config::Settings;
//!
//! let api = HttpBudgetApi::from_settings(&Settings::default())?;
//! let budgets = api.list_budgets().await?;
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod tui;

pub use error::BudgetError;
