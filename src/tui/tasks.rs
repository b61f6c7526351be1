//! Background requests for the budget view
//!
//! Each request runs in its own tokio task and reports through the event
//! channel. Handles are kept so that tearing the view down aborts whatever is
//! still in flight.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::BudgetApi;

use super::event::{ApiEvent, Event};

/// Spawns and tracks the view's network tasks
pub struct Dispatcher {
    api: Arc<dyn BudgetApi>,
    sender: UnboundedSender<Event>,
    handles: Vec<JoinHandle<()>>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn BudgetApi>, sender: UnboundedSender<Event>) -> Self {
        Self {
            api,
            sender,
            handles: Vec::new(),
        }
    }

    /// Start `GET /v1/budgets`, tagged with the load sequence number
    pub fn spawn_load(&mut self, seq: u64) {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();

        self.track(tokio::spawn(async move {
            let result = api.list_budgets().await;
            if sender.send(Event::Api(ApiEvent::Loaded { seq, result })).is_err() {
                debug!(seq, "event loop gone, dropping load result");
            }
        }));
    }

    /// Start `POST /v1/budgets` for the given draft text
    pub fn spawn_add(&mut self, draft: String) {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();

        self.track(tokio::spawn(async move {
            let result = api.create_budget(&draft).await;
            if sender.send(Event::Api(ApiEvent::Added { draft, result })).is_err() {
                debug!("event loop gone, dropping add result");
            }
        }));
    }

    /// Number of tasks that have not finished yet
    pub fn in_flight(&mut self) -> usize {
        self.handles.retain(|handle| !handle.is_finished());
        self.handles.len()
    }

    /// Abort every outstanding task
    pub fn abort_all(&mut self) {
        let pending = self.in_flight();
        if pending > 0 {
            debug!(pending, "aborting outstanding requests");
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }

    fn track(&mut self, handle: JoinHandle<()>) {
        self.handles.retain(|existing| !existing.is_finished());
        self.handles.push(handle);
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.abort_all();
    }
}
