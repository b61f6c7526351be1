//! Event handling for the TUI
//!
//! Terminal input (key presses, mouse, resize) is read on a dedicated thread
//! with crossterm's blocking poll. Results of network requests arrive from
//! tokio tasks. Both feed the same channel so the event loop has a single
//! place to wait on.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::error;

use crate::error::BudgetResult;
use crate::models::{BudgetRecord, CreatedBudget};

/// Events consumed by the TUI event loop
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
    /// A network request finished
    Api(ApiEvent),
}

/// Completion of a request started by the view
#[derive(Debug)]
pub enum ApiEvent {
    /// `GET /v1/budgets` finished; `seq` identifies which load it answers
    Loaded {
        seq: u64,
        result: BudgetResult<Vec<BudgetRecord>>,
    },
    /// `POST /v1/budgets` finished for the given draft text
    Added {
        draft: String,
        result: BudgetResult<Option<CreatedBudget>>,
    },
}

/// Event source for the TUI
pub struct EventHandler {
    sender: UnboundedSender<Event>,
    receiver: UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler reading the terminal with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let input_sender = sender.clone();
        thread::spawn(move || read_terminal(input_sender, tick_rate));

        Self { sender, receiver }
    }

    /// A sender for tasks that report back to the event loop
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Wait for the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

/// Blocking loop forwarding crossterm events until the receiver goes away
fn read_terminal(sender: UnboundedSender<Event>, tick_rate: Duration) {
    let mut last_tick = Instant::now();
    loop {
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        let ready = match event::poll(timeout) {
            Ok(ready) => ready,
            Err(e) => {
                error!(error = %e, "failed to poll terminal events");
                return;
            }
        };

        if ready {
            let forwarded = match event::read() {
                Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
                Ok(CrosstermEvent::Mouse(mouse)) => Some(Event::Mouse(mouse)),
                Ok(CrosstermEvent::Resize(width, height)) => Some(Event::Resize(width, height)),
                Ok(_) => None,
                Err(e) => {
                    error!(error = %e, "failed to read terminal event");
                    return;
                }
            };

            if let Some(event) = forwarded {
                if sender.send(event).is_err() {
                    return;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if sender.send(Event::Tick).is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }
}
