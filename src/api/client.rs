//! reqwest implementation of [`BudgetApi`]

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use tracing::{debug, info, warn};

use super::{BudgetApi, BUDGETS_PATH};
use crate::config::settings::{normalize_base_url, Settings};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetRecord, CreatedBudget, NewBudget, SuccessOutcome};

/// HTTP client for the budget service
#[derive(Debug, Clone)]
pub struct HttpBudgetApi {
    client: Client,
    base_url: String,
}

impl HttpBudgetApi {
    /// Build a client from settings (base URL and timeout)
    pub fn from_settings(settings: &Settings) -> BudgetResult<Self> {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;

        Self::with_client(client, &settings.api_base_url)
    }

    /// Build a client around an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> BudgetResult<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, BUDGETS_PATH)
    }

    fn record_url(&self, id: &str) -> BudgetResult<Url> {
        let mut url = Url::parse(&self.collection_url())
            .map_err(|e| BudgetError::Config(format!("Invalid API base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| BudgetError::Config("API base URL cannot have a path".into()))?
            .pop_if_empty()
            .push(id);

        Ok(url)
    }
}

/// Map a non-success status to the given error, passing successes through
fn check_status(
    response: Response,
    method: &str,
    into_error: fn(u16) -> BudgetError,
) -> BudgetResult<Response> {
    let status = response.status();
    if status.is_success() {
        debug!(method, url = %response.url(), status = status.as_u16(), "request succeeded");
        Ok(response)
    } else {
        warn!(method, url = %response.url(), status = status.as_u16(), "request failed");
        Err(into_error(status.as_u16()))
    }
}

/// Reject a success status whose body still reports `"success": false`
async fn check_outcome(response: Response, action: &str, id: &str) -> BudgetResult<()> {
    let body = response.bytes().await?;
    match serde_json::from_slice::<SuccessOutcome>(&body) {
        Ok(outcome) if !outcome.success => Err(BudgetError::Decode(format!(
            "service reported failure to {} budget {}",
            action, id
        ))),
        _ => Ok(()),
    }
}

fn fetch_error(status: u16) -> BudgetError {
    BudgetError::Fetch { status }
}

fn send_error(status: u16) -> BudgetError {
    BudgetError::Send { status }
}

#[async_trait]
impl BudgetApi for HttpBudgetApi {
    async fn list_budgets(&self) -> BudgetResult<Vec<BudgetRecord>> {
        let response = self.client.get(self.collection_url()).send().await?;
        let response = check_status(response, "GET", fetch_error)?;

        let records: Vec<BudgetRecord> = response.json().await?;
        info!(count = records.len(), "fetched budgets");
        Ok(records)
    }

    async fn create_budget(&self, amount: &str) -> BudgetResult<Option<CreatedBudget>> {
        let response = self
            .client
            .post(self.collection_url())
            .json(&NewBudget::new(amount))
            .send()
            .await?;
        let response = check_status(response, "POST", send_error)?;

        // The body is informational only; a success status is what counts.
        let body = response.bytes().await?;
        let created = serde_json::from_slice::<CreatedBudget>(&body).ok();
        info!(id = created.as_ref().map(|c| c.id.as_str()), "created budget");
        Ok(created)
    }

    async fn get_budget(&self, id: &str) -> BudgetResult<BudgetRecord> {
        let response = self.client.get(self.record_url(id)?).send().await?;
        let response = check_status(response, "GET", fetch_error)?;
        Ok(response.json().await?)
    }

    async fn delete_budget(&self, id: &str) -> BudgetResult<()> {
        let response = self.client.delete(self.record_url(id)?).send().await?;
        let response = check_status(response, "DELETE", send_error)?;

        check_outcome(response, "delete", id).await?;
        info!(id, "deleted budget");
        Ok(())
    }

    async fn update_budget(&self, id: &str, amount: &str) -> BudgetResult<()> {
        let response = self
            .client
            .patch(self.record_url(id)?)
            .json(&NewBudget::new(amount))
            .send()
            .await?;
        let response = check_status(response, "PATCH", send_error)?;

        check_outcome(response, "update", id).await?;
        info!(id, "updated budget");
        Ok(())
    }
}
