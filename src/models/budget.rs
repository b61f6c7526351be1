//! Budget record model
//!
//! Mirrors the records served by the budget service. Records are created and
//! timestamped remotely; the client never edits them in place.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A budget record as returned by `GET /v1/budgets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    /// Unique identifier assigned by the service
    pub id: String,

    /// Budget amount
    pub budget: f64,

    /// When the record was created
    pub created_at: String,

    /// When the record was last modified, if ever
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl BudgetRecord {
    /// Amount as shown in lists
    pub fn amount_label(&self) -> String {
        self.budget.to_string()
    }

    /// Creation time as shown in lists
    pub fn created_label(&self) -> String {
        format_timestamp(&self.created_at)
    }

    /// Modification time as shown in lists, empty if never modified
    pub fn updated_label(&self) -> String {
        self.updated_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_default()
    }
}

impl fmt::Display for BudgetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.amount_label(), self.id)
    }
}

/// Body of `POST /v1/budgets` and `PATCH /v1/budgets/{id}`
///
/// The amount travels as the raw draft text. The service coerces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBudget {
    pub budget: String,
}

impl NewBudget {
    pub fn new(budget: impl Into<String>) -> Self {
        Self {
            budget: budget.into(),
        }
    }
}

/// Response of `POST /v1/budgets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBudget {
    pub id: String,
}

/// Response of `PATCH` and `DELETE` on `/v1/budgets/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessOutcome {
    pub success: bool,
}

/// Drop records whose id was already seen, keeping the first occurrence.
///
/// Returns the kept records in their original order and the number dropped.
pub fn dedupe_by_id(records: Vec<BudgetRecord>) -> (Vec<BudgetRecord>, usize) {
    let mut seen = HashSet::with_capacity(records.len());
    let total = records.len();
    let kept: Vec<BudgetRecord> = records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect();
    let dropped = total - kept.len();
    (kept, dropped)
}

/// Format a service timestamp as `YYYY-MM-DD HH:MM`.
///
/// Accepts RFC 3339 and naive ISO-8601 values; anything else is returned as is.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }

    raw.to_string()
}
