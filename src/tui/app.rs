//! Application state for the budget view
//!
//! `App` owns the fetched budget list and the draft amount. It is the only
//! thing allowed to change them, and it only does so on the event loop, in
//! response to key presses or to request results delivered as events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::api::BudgetApi;
use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{dedupe_by_id, BudgetRecord, CreatedBudget};

use super::event::{ApiEvent, Event};
use super::tasks::Dispatcher;
use super::widgets::{Notification, NotificationQueue, TextInput};

/// Progress of the budget list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// Outcome of the most recent add
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Errored(String),
}

/// Mode of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// View behavior taken from settings
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Shown in the status bar
    pub base_url: String,
    /// Clear the draft and reload after a successful add
    pub refresh_after_add: bool,
    /// How long notifications stay up
    pub notification_duration: Duration,
}

impl ViewOptions {
    pub fn from_settings(settings: &Settings) -> BudgetResult<Self> {
        Ok(Self {
            base_url: settings.base_url()?,
            refresh_after_add: settings.refresh_after_add,
            notification_duration: Duration::from_secs(settings.notification_secs),
        })
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            base_url: crate::config::settings::DEFAULT_API_BASE_URL.to_string(),
            refresh_after_add: true,
            notification_duration: Duration::from_secs(4),
        }
    }
}

/// Main application state
pub struct App {
    /// Records in the order the service returned them
    budgets: Vec<BudgetRecord>,

    /// Unsubmitted amount
    pub draft: TextInput,

    pub load_state: LoadState,
    pub submit_state: SubmitState,

    /// Adds that have been sent but not answered
    pub pending_adds: usize,

    pub input_mode: InputMode,

    /// Id of the highlighted record
    pub selected_id: Option<String>,

    pub show_help: bool,
    pub notifications: NotificationQueue,
    pub should_quit: bool,

    options: ViewOptions,
    load_seq: u64,
    disposed: bool,
    dispatcher: Dispatcher,
}

impl App {
    /// Create a new App instance
    pub fn new(api: Arc<dyn BudgetApi>, sender: UnboundedSender<Event>, options: ViewOptions) -> Self {
        Self {
            budgets: Vec::new(),
            draft: TextInput::new().label("Amount").placeholder("0").numeric(),
            load_state: LoadState::default(),
            submit_state: SubmitState::default(),
            pending_adds: 0,
            input_mode: InputMode::default(),
            selected_id: None,
            show_help: false,
            notifications: NotificationQueue::new(),
            should_quit: false,
            options,
            load_seq: 0,
            disposed: false,
            dispatcher: Dispatcher::new(api, sender),
        }
    }

    /// Records in fetch order
    pub fn budgets(&self) -> &[BudgetRecord] {
        &self.budgets
    }

    /// Records in display order: the reverse of fetch order
    pub fn display_order(&self) -> impl Iterator<Item = &BudgetRecord> + '_ {
        self.budgets.iter().rev()
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Number of requests still running
    pub fn in_flight(&mut self) -> usize {
        self.dispatcher.in_flight()
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Fetch the budget list
    pub fn load(&mut self) {
        if self.disposed {
            return;
        }
        self.load_seq += 1;
        self.load_state = LoadState::Loading;
        debug!(seq = self.load_seq, "loading budgets");
        self.dispatcher.spawn_load(self.load_seq);
    }

    /// Fetch the budget list again at the user's request
    pub fn reload(&mut self) {
        if self.disposed {
            return;
        }
        self.notify(Notification::info("Reloading budgets..."));
        self.load();
    }

    /// Send the current draft as a new budget
    ///
    /// The draft is sent as typed, even when empty.
    pub fn submit_draft(&mut self) {
        if self.disposed {
            return;
        }
        let draft = self.draft.value().to_string();
        self.pending_adds += 1;
        self.submit_state = SubmitState::Submitting;
        debug!(draft = %draft, "adding budget");
        self.dispatcher.spawn_add(draft);
    }

    /// Apply a finished request
    pub fn apply(&mut self, event: ApiEvent) {
        if self.disposed {
            debug!("view disposed, discarding request result");
            return;
        }

        match event {
            ApiEvent::Loaded { seq, result } => self.apply_load(seq, result),
            ApiEvent::Added { draft, result } => self.apply_add(draft, result),
        }
    }

    fn apply_load(&mut self, seq: u64, result: BudgetResult<Vec<BudgetRecord>>) {
        if seq != self.load_seq {
            debug!(seq, latest = self.load_seq, "discarding stale load");
            return;
        }

        match result {
            Ok(records) => {
                let (records, dropped) = dedupe_by_id(records);
                if dropped > 0 {
                    warn!(dropped, "service returned duplicate budget ids");
                }
                info!(count = records.len(), "budgets loaded");
                self.budgets = records;
                self.load_state = LoadState::Loaded;
                self.sync_selection();
            }
            Err(e) => {
                error!(error = %e, "failed to load budgets");
                self.budgets.clear();
                self.selected_id = None;
                self.load_state = LoadState::Errored(e.to_string());
                self.notify(Notification::error(describe(&e, "load budgets")));
            }
        }
    }

    fn apply_add(&mut self, draft: String, result: BudgetResult<Option<CreatedBudget>>) {
        self.pending_adds = self.pending_adds.saturating_sub(1);

        match result {
            Ok(created) => {
                info!(id = created.as_ref().map(|c| c.id.as_str()), "budget added");
                self.submit_state = SubmitState::Submitted;
                let label = if draft.is_empty() { "(empty)" } else { draft.as_str() };
                self.notify(Notification::success(format!("Added budget {}", label)));

                if self.options.refresh_after_add {
                    // Keep anything typed while the request was in flight.
                    if self.draft.value() == draft {
                        self.draft.clear();
                    }
                    self.load();
                }
            }
            Err(e) => {
                error!(error = %e, "failed to add budget");
                self.submit_state = SubmitState::Errored(e.to_string());
                self.notify(Notification::error(describe(&e, "add budget")));
            }
        }

        if self.pending_adds > 0 {
            self.submit_state = SubmitState::Submitting;
        }
    }

    /// Tear the view down: abort requests and ignore anything still arriving
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.dispatcher.abort_all();
        }
    }

    /// Periodic housekeeping
    pub fn tick(&mut self) {
        self.notifications.remove_expired();
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications
            .push(notification.with_duration(self.options.notification_duration));
    }

    /// Enter or leave draft editing
    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.draft.focused = mode == InputMode::Editing;
    }

    /// Index of the highlighted record in display order
    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id.as_deref()?;
        self.display_order().position(|record| record.id == id)
    }

    /// Move the highlight up in display order
    pub fn move_up(&mut self) {
        if let Some(index) = self.selected_index() {
            self.select_index(index.saturating_sub(1));
        }
    }

    /// Move the highlight down in display order
    pub fn move_down(&mut self) {
        match self.selected_index() {
            Some(index) => self.select_index((index + 1).min(self.budgets.len().saturating_sub(1))),
            None => self.select_index(0),
        }
    }

    pub fn select_first(&mut self) {
        self.select_index(0);
    }

    pub fn select_last(&mut self) {
        self.select_index(self.budgets.len().saturating_sub(1));
    }

    fn select_index(&mut self, index: usize) {
        let id = self.display_order().nth(index).map(|record| record.id.clone());
        self.selected_id = id;
    }

    /// Keep the highlight on the same record, or fall back to the top
    fn sync_selection(&mut self) {
        if self.selected_index().is_none() {
            self.select_first();
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn describe(err: &BudgetError, action: &str) -> String {
    match err.status() {
        Some(status) => format!("Could not {} (HTTP {})", action, status),
        None => format!("Could not {}: {}", action, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubApi;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn record(id: &str, budget: f64, created_at: &str) -> BudgetRecord {
        BudgetRecord {
            id: id.into(),
            budget,
            created_at: created_at.into(),
            updated_at: None,
        }
    }

    fn sample() -> Vec<BudgetRecord> {
        vec![record("1", 5.0, "t1"), record("2", 10.0, "t2")]
    }

    fn setup(stub: StubApi, options: ViewOptions) -> (App, Arc<StubApi>, UnboundedReceiver<Event>) {
        let stub = Arc::new(stub);
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(stub.clone(), tx, options);
        (app, stub, rx)
    }

    async fn next_api(rx: &mut UnboundedReceiver<Event>) -> ApiEvent {
        match rx.recv().await {
            Some(Event::Api(event)) => event,
            other => panic!("expected api event, got {:?}", other),
        }
    }

    fn amounts(app: &App) -> Vec<String> {
        app.display_order().map(|r| r.amount_label()).collect()
    }

    #[tokio::test]
    async fn test_initial_load_issues_single_get() {
        let (mut app, stub, mut rx) = setup(StubApi::new(sample()), ViewOptions::default());

        app.load();
        assert_eq!(app.load_state, LoadState::Loading);
        let event = next_api(&mut rx).await;
        app.apply(event);

        assert_eq!(stub.list_calls(), 1);
        assert!(stub.created().is_empty());
        assert_eq!(app.load_state, LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_list_is_reversed() {
        let (mut app, _stub, mut rx) = setup(StubApi::new(sample()), ViewOptions::default());

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);

        assert_eq!(amounts(&app), vec!["10", "5"]);
        assert_eq!(app.budgets()[0].id, "1");
        assert_eq!(app.selected_id.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_empty_response() {
        let (mut app, _stub, mut rx) = setup(StubApi::new(Vec::new()), ViewOptions::default());

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);

        assert!(app.budgets().is_empty());
        assert_eq!(app.selected_id, None);
        assert_eq!(app.load_state, LoadState::Loaded);
    }

    #[tokio::test]
    async fn test_failed_load_leaves_list_empty() {
        let (mut app, _stub, mut rx) = setup(StubApi::failing_list(500), ViewOptions::default());

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);

        assert!(app.budgets().is_empty());
        assert_eq!(
            app.load_state,
            LoadState::Errored("Response status: 500".into())
        );
        assert_eq!(
            app.notifications.current().unwrap().message,
            "Could not load budgets (HTTP 500)"
        );
    }

    #[tokio::test]
    async fn test_failed_reload_clears_previous_list() {
        let (mut app, stub, mut rx) = setup(StubApi::new(sample()), ViewOptions::default());

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);
        assert_eq!(app.budgets().len(), 2);

        stub.fail_list(502);
        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);

        assert!(app.budgets().is_empty());
        assert_eq!(app.selected_id, None);
    }

    #[tokio::test]
    async fn test_add_posts_draft_text() {
        let options = ViewOptions {
            refresh_after_add: false,
            ..ViewOptions::default()
        };
        let (mut app, stub, mut rx) = setup(StubApi::new(sample()), options);

        for c in "42".chars() {
            app.draft.insert(c);
        }
        app.submit_draft();
        assert_eq!(app.submit_state, SubmitState::Submitting);

        let event = next_api(&mut rx).await;
        app.apply(event);

        assert_eq!(stub.created(), vec!["42".to_string()]);
        assert_eq!(stub.list_calls(), 0);
        assert_eq!(app.submit_state, SubmitState::Submitted);
        // faithful mode: nothing else changes
        assert_eq!(app.draft.value(), "42");
        assert!(app.budgets().is_empty());
    }

    #[tokio::test]
    async fn test_add_then_refresh() {
        let (mut app, stub, mut rx) = setup(StubApi::new(Vec::new()), ViewOptions::default());

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);

        app.draft.insert('7');
        app.submit_draft();
        stub.set_list(vec![record("9", 7.0, "t9")]);
        let added = next_api(&mut rx).await;
        app.apply(added);

        assert_eq!(app.draft.value(), "");
        assert_eq!(app.load_state, LoadState::Loading);

        let reloaded = next_api(&mut rx).await;
        app.apply(reloaded);
        assert_eq!(amounts(&app), vec!["7"]);
        assert_eq!(stub.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_keeps_newer_typing() {
        let (mut app, _stub, mut rx) = setup(StubApi::new(Vec::new()), ViewOptions::default());

        app.draft.insert('1');
        app.submit_draft();
        app.draft.insert('2');

        let added = next_api(&mut rx).await;
        app.apply(added);

        assert_eq!(app.draft.value(), "12");
    }

    #[tokio::test]
    async fn test_failed_add_keeps_state() {
        let (mut app, stub, mut rx) = setup(StubApi::new(sample()), ViewOptions::default());
        stub.fail_creates(422);

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);

        app.draft.insert('3');
        app.submit_draft();
        let event = next_api(&mut rx).await;
        app.apply(event);

        assert_eq!(app.draft.value(), "3");
        assert_eq!(amounts(&app), vec!["10", "5"]);
        assert_eq!(app.submit_state, SubmitState::Errored("Send status: 422".into()));
        assert_eq!(stub.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_draft_is_still_sent() {
        let options = ViewOptions {
            refresh_after_add: false,
            ..ViewOptions::default()
        };
        let (mut app, stub, mut rx) = setup(StubApi::new(Vec::new()), options);

        app.submit_draft();
        let event = next_api(&mut rx).await;
        app.apply(event);

        assert_eq!(stub.created(), vec![String::new()]);
        let toast = app.notifications.current().unwrap();
        assert_eq!(toast.message, "Added budget (empty)");
    }

    #[tokio::test]
    async fn test_navigation_walks_display_order() {
        let stub = StubApi::new(vec![
            record("1", 5.0, "t1"),
            record("2", 10.0, "t2"),
            record("3", 15.0, "t3"),
        ]);
        let (mut app, _stub, mut rx) = setup(stub, ViewOptions::default());

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);
        assert_eq!(app.selected_id.as_deref(), Some("3"));

        app.move_down();
        assert_eq!(app.selected_id.as_deref(), Some("2"));
        app.select_last();
        assert_eq!(app.selected_id.as_deref(), Some("1"));
        app.move_down();
        assert_eq!(app.selected_id.as_deref(), Some("1"));
        app.move_up();
        assert_eq!(app.selected_index(), Some(1));
        app.select_first();
        assert_eq!(app.selected_id.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_independent() {
        let options = ViewOptions {
            refresh_after_add: false,
            ..ViewOptions::default()
        };
        let (mut app, stub, mut rx) = setup(StubApi::new(Vec::new()), options);

        app.draft.insert('1');
        app.submit_draft();
        app.submit_draft();
        assert_eq!(app.pending_adds, 2);

        let first = next_api(&mut rx).await;
        app.apply(first);
        assert_eq!(app.submit_state, SubmitState::Submitting);

        let second = next_api(&mut rx).await;
        app.apply(second);
        assert_eq!(app.submit_state, SubmitState::Submitted);
        assert_eq!(stub.created().len(), 2);
    }

    #[tokio::test]
    async fn test_stale_load_is_discarded() {
        let (mut app, _stub, mut rx) = setup(StubApi::new(sample()), ViewOptions::default());

        app.load();
        app.load();
        app.apply(ApiEvent::Loaded {
            seq: 1,
            result: Ok(vec![record("x", 1.0, "t")]),
        });
        assert!(app.budgets().is_empty());
        assert_eq!(app.load_state, LoadState::Loading);

        for _ in 0..2 {
            let event = next_api(&mut rx).await;
            app.apply(event);
        }
        assert_eq!(amounts(&app), vec!["10", "5"]);
    }

    #[tokio::test]
    async fn test_repeated_loads_are_idempotent() {
        let (mut app, _stub, mut rx) = setup(StubApi::new(sample()), ViewOptions::default());

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);
        let first = amounts(&app);

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);

        assert_eq!(amounts(&app), first);
    }

    #[tokio::test]
    async fn test_selection_follows_id_across_reloads() {
        let (mut app, stub, mut rx) = setup(StubApi::new(sample()), ViewOptions::default());

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);
        app.move_down();
        assert_eq!(app.selected_id.as_deref(), Some("1"));

        stub.set_list(vec![
            record("1", 5.0, "t1"),
            record("2", 10.0, "t2"),
            record("3", 15.0, "t3"),
        ]);
        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);

        assert_eq!(app.selected_id.as_deref(), Some("1"));
        assert_eq!(app.selected_index(), Some(2));
    }

    #[tokio::test]
    async fn test_results_after_dispose_are_discarded() {
        let (mut app, _stub, _rx) = setup(StubApi::new(sample()), ViewOptions::default());

        app.load();
        app.dispose();
        app.apply(ApiEvent::Loaded {
            seq: 1,
            result: Ok(sample()),
        });

        assert!(app.is_disposed());
        assert!(app.budgets().is_empty());
    }

    #[tokio::test]
    async fn test_dispose_aborts_in_flight_requests() {
        let stub = StubApi::new(sample()).with_delay(Duration::from_millis(200));
        let (mut app, _stub, mut rx) = setup(stub, ViewOptions::default());

        app.load();
        assert_eq!(app.in_flight(), 1);
        drop(app);

        // every sender is gone once the task is aborted, so the channel closes
        // without ever delivering the load result
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_ids_keep_first() {
        let stub = StubApi::new(vec![
            record("1", 5.0, "t1"),
            record("1", 6.0, "t1"),
            record("2", 10.0, "t2"),
        ]);
        let (mut app, _stub, mut rx) = setup(stub, ViewOptions::default());

        app.load();
        let event = next_api(&mut rx).await;
        app.apply(event);

        assert_eq!(amounts(&app), vec!["10", "5"]);
    }
}
