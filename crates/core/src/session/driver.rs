//! The single task that owns a [`SearchMachine`].

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::discovery::DiscoveryOrchestrator;
use crate::metrics;
use crate::presentation::SearchView;

use super::machine::{ControllerEvent, Effect, SearchMachine};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Search session is closed")]
    Closed,
}

/// Events a client can send.
#[derive(Debug)]
enum Command {
    Input(String),
    Focus,
    Dismiss,
}

impl From<Command> for ControllerEvent {
    fn from(command: Command) -> Self {
        match command {
            Command::Input(text) => ControllerEvent::InputChanged(text),
            Command::Focus => ControllerEvent::Focus,
            Command::Dismiss => ControllerEvent::Dismiss,
        }
    }
}

/// A running search box.
///
/// Spawning starts the trending run. Input is debounced; only the result of
/// the latest generation is ever published. Dropping the session cancels it:
/// the timer is dropped and late completions are never posted back.
pub struct SearchSession {
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<SearchView>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SearchSession {
    /// Spawn a session with the debounce interval from the orchestrator's config.
    pub fn spawn(orchestrator: Arc<DiscoveryOrchestrator>) -> Self {
        let debounce = Duration::from_millis(orchestrator.config().debounce_ms);
        Self::with_debounce(orchestrator, debounce)
    }

    pub fn with_debounce(orchestrator: Arc<DiscoveryOrchestrator>, debounce: Duration) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let machine = SearchMachine::new();
        let (view_tx, view) = watch::channel(SearchView::of(&machine));
        let cancel = CancellationToken::new();

        let driver = Driver {
            machine,
            orchestrator,
            debounce,
            cancel: cancel.clone(),
            view: view_tx,
        };
        let task = tokio::spawn(driver.run(command_rx));

        Self {
            commands,
            view,
            cancel,
            task: Some(task),
        }
    }

    /// The input text changed.
    pub fn input(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.send(Command::Input(text.into()))
    }

    /// Reopen the dropdown without re-querying.
    pub fn focus(&self) -> Result<(), SessionError> {
        self.send(Command::Focus)
    }

    /// Close the dropdown without touching query state.
    pub fn dismiss(&self) -> Result<(), SessionError> {
        self.send(Command::Dismiss)
    }

    /// Current view snapshot.
    pub fn view(&self) -> SearchView {
        self.view.borrow().clone()
    }

    /// Receiver notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.clone()
    }

    /// Cancel the session and wait for its task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn send(&self, command: Command) -> Result<(), SessionError> {
        if self.cancel.is_cancelled() {
            return Err(SessionError::Closed);
        }
        self.commands.send(command).map_err(|_| SessionError::Closed)
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Driver {
    machine: SearchMachine,
    orchestrator: Arc<DiscoveryOrchestrator>,
    debounce: Duration,
    cancel: CancellationToken,
    view: watch::Sender<SearchView>,
}

impl Driver {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let (settled_tx, mut settled_rx) = mpsc::unbounded_channel::<ControllerEvent>();
        let mut deadline: Option<Instant> = None;

        self.spawn_trending(settled_tx.clone());
        debug!("Search session started");

        loop {
            let event = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                command = commands.recv() => match command {
                    Some(command) => ControllerEvent::from(command),
                    None => break,
                },
                Some(event) = settled_rx.recv() => event,
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    ControllerEvent::TimerFired
                }
            };

            for effect in self.machine.handle(event) {
                match effect {
                    Effect::ArmTimer => deadline = Some(Instant::now() + self.debounce),
                    Effect::CancelTimer => deadline = None,
                    Effect::RunSearch { generation, query } => {
                        self.spawn_search(generation, query, settled_tx.clone());
                    }
                    Effect::StaleDiscarded { generation } => {
                        metrics::STALE_RESULTS_DISCARDED.inc();
                        debug!(
                            generation,
                            current = self.machine.generation(),
                            "Discarded stale search result"
                        );
                    }
                }
            }

            self.publish();
        }

        info!("Search session closed");
    }

    fn publish(&self) {
        let next = SearchView::of(&self.machine);
        self.view.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }

    fn spawn_search(
        &self,
        generation: u64,
        query: String,
        settled: mpsc::UnboundedSender<ControllerEvent>,
    ) {
        debug!(generation, query = %query, "Starting search");

        let orchestrator = self.orchestrator.clone();
        let token = self.cancel.child_token();
        tokio::spawn(async move {
            let outcome = orchestrator.search(&query).await;
            if token.is_cancelled() {
                return;
            }
            let _ = settled.send(ControllerEvent::ResultSettled {
                generation,
                outcome,
            });
        });
    }

    fn spawn_trending(&self, settled: mpsc::UnboundedSender<ControllerEvent>) {
        let orchestrator = self.orchestrator.clone();
        let token = self.cancel.child_token();
        tokio::spawn(async move {
            let outcome = orchestrator.trending().await;
            if token.is_cancelled() {
                return;
            }
            let _ = settled.send(ControllerEvent::TrendingSettled(outcome));
        });
    }
}
