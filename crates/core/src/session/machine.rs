//! The debounce/staleness state machine.
//!
//! Pure and synchronous: [`SearchMachine::handle`] applies one event and
//! returns the effects the driver must perform. Timers and orchestration
//! runs live in the driver.

use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    /// Input empty.
    #[default]
    Idle,
    /// Debounce timer armed, nothing sent.
    Pending,
    /// Orchestration running for the authoritative generation.
    InFlight,
    /// Last search committed.
    Settled,
}

impl ControllerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Idle => "idle",
            ControllerState::Pending => "pending",
            ControllerState::InFlight => "in_flight",
            ControllerState::Settled => "settled",
        }
    }

    /// Whether a search is pending or running.
    pub fn is_busy(&self) -> bool {
        matches!(self, ControllerState::Pending | ControllerState::InFlight)
    }
}

#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// The input text changed.
    InputChanged(String),
    /// The debounce interval elapsed.
    TimerFired,
    /// An orchestration run for `generation` completed.
    ResultSettled {
        generation: u64,
        outcome: DiscoveryOutcome,
    },
    /// The mount-time trending run completed.
    TrendingSettled(DiscoveryOutcome),
    /// The input regained focus.
    Focus,
    /// Interaction outside the dropdown.
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)start the debounce timer.
    ArmTimer,
    CancelTimer,
    /// Start an orchestration run.
    RunSearch { generation: u64, query: String },
    /// A superseded result was dropped.
    StaleDiscarded { generation: u64 },
}

/// Query state plus the two independent display slots.
#[derive(Debug, Clone, Default)]
pub struct SearchMachine {
    state: ControllerState,
    input: String,
    generation: u64,
    open: bool,
    search: Option<DiscoveryOutcome>,
    trending: Option<DiscoveryOutcome>,
}

impl SearchMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The authoritative generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the dropdown is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Last committed active-search result.
    pub fn search(&self) -> Option<&DiscoveryOutcome> {
        self.search.as_ref()
    }

    pub fn trending(&self) -> Option<&DiscoveryOutcome> {
        self.trending.as_ref()
    }

    pub fn handle(&mut self, event: ControllerEvent) -> Vec<Effect> {
        match event {
            ControllerEvent::InputChanged(text) => self.on_input(text),
            ControllerEvent::TimerFired => self.on_timer(),
            ControllerEvent::ResultSettled {
                generation,
                outcome,
            } => self.on_result(generation, outcome),
            ControllerEvent::TrendingSettled(outcome) => {
                self.trending = Some(outcome);
                Vec::new()
            }
            ControllerEvent::Focus => {
                self.open = true;
                Vec::new()
            }
            ControllerEvent::Dismiss => {
                self.open = false;
                Vec::new()
            }
        }
    }

    fn on_input(&mut self, text: String) -> Vec<Effect> {
        self.input = text;
        self.open = true;

        if self.input.trim().is_empty() {
            // Any in-flight run is now stale: its result arrives while Idle.
            self.search = None;
            self.state = ControllerState::Idle;
            return vec![Effect::CancelTimer];
        }

        self.state = ControllerState::Pending;
        vec![Effect::ArmTimer]
    }

    fn on_timer(&mut self) -> Vec<Effect> {
        if self.state != ControllerState::Pending {
            return Vec::new();
        }

        self.generation += 1;
        self.state = ControllerState::InFlight;
        vec![Effect::RunSearch {
            generation: self.generation,
            query: self.input.trim().to_string(),
        }]
    }

    fn on_result(&mut self, generation: u64, outcome: DiscoveryOutcome) -> Vec<Effect> {
        if self.state != ControllerState::InFlight || generation != self.generation {
            return vec![Effect::StaleDiscarded { generation }];
        }

        self.search = Some(outcome);
        self.state = ControllerState::Settled;
        Vec::new()
    }
}
