//! Terminal User Interface module
//!
//! The budget view: a list of budgets fetched from the service and an input
//! for adding one, built on ratatui. Requests run as tokio tasks and report
//! back through the same channel as terminal input.

pub mod app;
pub mod event;
pub mod handler;
pub mod tasks;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
