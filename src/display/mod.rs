//! Display formatting for CLI output

pub mod budget;

pub use budget::{format_budget_details, format_budget_list};
