//! In-memory [`BudgetApi`] for unit tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::BudgetApi;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetRecord, CreatedBudget};

/// Canned responses plus a record of every call made
pub struct StubApi {
    list: Mutex<Result<Vec<BudgetRecord>, u16>>,
    create_failure: Mutex<Option<u16>>,
    delay: Duration,
    list_calls: AtomicUsize,
    created: Mutex<Vec<String>>,
}

impl StubApi {
    pub fn new(records: Vec<BudgetRecord>) -> Self {
        Self {
            list: Mutex::new(Ok(records)),
            create_failure: Mutex::new(None),
            delay: Duration::ZERO,
            list_calls: AtomicUsize::new(0),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_list(status: u16) -> Self {
        let stub = Self::new(Vec::new());
        stub.fail_list(status);
        stub
    }

    pub fn fail_list(&self, status: u16) {
        *self.list.lock().unwrap() = Err(status);
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_list(&self, records: Vec<BudgetRecord>) {
        *self.list.lock().unwrap() = Ok(records);
    }

    pub fn fail_creates(&self, status: u16) {
        *self.create_failure.lock().unwrap() = Some(status);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl BudgetApi for StubApi {
    async fn list_budgets(&self) -> BudgetResult<Vec<BudgetRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.list
            .lock()
            .unwrap()
            .clone()
            .map_err(|status| BudgetError::Fetch { status })
    }

    async fn create_budget(&self, amount: &str) -> BudgetResult<Option<CreatedBudget>> {
        self.created.lock().unwrap().push(amount.to_string());
        if let Some(status) = *self.create_failure.lock().unwrap() {
            return Err(BudgetError::Send { status });
        }
        Ok(Some(CreatedBudget {
            id: format!("new-{}", self.created.lock().unwrap().len()),
        }))
    }

    async fn get_budget(&self, id: &str) -> BudgetResult<BudgetRecord> {
        let records = self
            .list
            .lock()
            .unwrap()
            .clone()
            .map_err(|status| BudgetError::Fetch { status })?;
        records
            .into_iter()
            .find(|record| record.id == id)
            .ok_or(BudgetError::Fetch { status: 404 })
    }

    async fn delete_budget(&self, id: &str) -> BudgetResult<()> {
        let mut list = self.list.lock().unwrap();
        match list.as_mut() {
            Ok(records) => {
                let before = records.len();
                records.retain(|record| record.id != id);
                if records.len() == before {
                    Err(BudgetError::Send { status: 404 })
                } else {
                    Ok(())
                }
            }
            Err(status) => Err(BudgetError::Send { status: *status }),
        }
    }

    async fn update_budget(&self, id: &str, amount: &str) -> BudgetResult<()> {
        let budget = amount
            .parse::<f64>()
            .map_err(|_| BudgetError::Send { status: 422 })?;
        let mut list = self.list.lock().unwrap();
        let records = list
            .as_mut()
            .map_err(|status| BudgetError::Send { status: *status })?;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(BudgetError::Send { status: 404 })?;
        record.budget = budget;
        record.updated_at = Some("2024-11-08T09:30:00".into());
        Ok(())
    }
}
