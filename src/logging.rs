//! Tracing setup
//!
//! Log output goes to a file next to the settings. The terminal belongs to
//! the TUI, so nothing is ever written to stdout or stderr from here.

use std::fs::OpenOptions;
use std::sync::{Arc, Once};

use tracing_subscriber::EnvFilter;

use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "budget_view=info";

/// Initialize the global tracing subscriber, appending to the log file.
///
/// Calling this more than once is harmless; only the first call installs a
/// subscriber.
pub fn init_logging(paths: &BudgetPaths) -> BudgetResult<()> {
    paths.ensure_directories()?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
        .map_err(|e| BudgetError::Io(format!("Failed to open log file: {}", e)))?;

    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Arc::new(log_file))
            .try_init();
    });

    Ok(())
}
