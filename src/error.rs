//! Custom error types for budget-view
//!
//! This module defines the error hierarchy for the client using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for budget-view operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Retrieving budgets returned a non-success status
    #[error("Response status: {status}")]
    Fetch { status: u16 },

    /// Creating or deleting a budget returned a non-success status
    #[error("Send status: {status}")]
    Send { status: u16 },

    /// The request never produced a response (connection refused, timeout, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body did not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl BudgetError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status } | Self::Send { status } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a retrieval failure
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// Check if this is a creation/deletion failure
    pub fn is_send(&self) -> bool {
        matches!(self, Self::Send { .. })
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for BudgetError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Result type alias for budget-view operations
pub type BudgetResult<T> = Result<T, BudgetError>;
