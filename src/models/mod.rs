//! Core data models for budget-view
//!
//! This module contains the records exchanged with the budget service.

pub mod budget;

pub use budget::{dedupe_by_id, BudgetRecord, CreatedBudget, NewBudget, SuccessOutcome};
