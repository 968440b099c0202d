//! Reducer trait for MVI architecture.

use super::event::Event;
use super::state::UiState;

/// Reducer transforms state based on events.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Event) -> State
pub trait Reducer: Send + 'static {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The event type this reducer handles.
    type Event: Event;

    /// Process an event and return the new state.
    ///
    /// This should be a pure function with no side effects. Events that do
    /// not apply to the current status must return the state unchanged.
    fn reduce(state: Self::State, event: Self::Event) -> Self::State;
}
