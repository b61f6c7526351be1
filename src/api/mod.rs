//! Budget service API
//!
//! A trait-based abstraction over the remote budget service, with a reqwest
//! implementation for the real thing. The TUI and the CLI only ever talk to
//! `dyn BudgetApi`, which keeps both testable without a network.

mod client;
#[cfg(test)]
pub(crate) mod stub;

pub use client::HttpBudgetApi;

use async_trait::async_trait;

use crate::error::BudgetResult;
use crate::models::{BudgetRecord, CreatedBudget};

/// Path of the budgets collection on the service
pub const BUDGETS_PATH: &str = "/v1/budgets";

/// Operations offered by the budget service.
#[async_trait]
pub trait BudgetApi: Send + Sync {
    /// `GET /v1/budgets`
    ///
    /// Non-success statuses fail with `BudgetError::Fetch`.
    async fn list_budgets(&self) -> BudgetResult<Vec<BudgetRecord>>;

    /// `POST /v1/budgets` with `{"budget": amount}`
    ///
    /// `amount` is sent verbatim as a JSON string. Non-success statuses fail
    /// with `BudgetError::Send`. The created id is returned when the service
    /// reports one.
    async fn create_budget(&self, amount: &str) -> BudgetResult<Option<CreatedBudget>>;

    /// `GET /v1/budgets/{id}`
    async fn get_budget(&self, id: &str) -> BudgetResult<BudgetRecord>;

    /// `DELETE /v1/budgets/{id}`
    async fn delete_budget(&self, id: &str) -> BudgetResult<()>;

    /// `PATCH /v1/budgets/{id}` with `{"budget": amount}`
    ///
    /// Same body and error mapping as [`BudgetApi::create_budget`].
    async fn update_budget(&self, id: &str, amount: &str) -> BudgetResult<()>;
}
