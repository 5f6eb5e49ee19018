//! Debounce/staleness controller for one search box.
//!
//! [`SearchMachine`] is the explicit state machine; [`SearchSession`] runs it
//! on a single task, arms the debounce timer, spawns orchestration runs and
//! publishes [`SearchView`](crate::presentation::SearchView) snapshots.

mod driver;
mod machine;

pub use driver::{SearchSession, SessionError};
pub use machine::{ControllerEvent, ControllerState, Effect, SearchMachine};
