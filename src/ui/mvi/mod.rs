//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the traits and the loop runtime used by every
//! screen in the crate.
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────── Feedback (gated effects) ◀───┐
//!            ▼                                          │
//! Event ──→ Reducer ──→ State ──→ View                  │
//!    ▲                    └─────────────────────────────┘
//!    └── user intents (send)
//! ```
//!
//! - **State**: Immutable snapshot of a screen
//! - **Event**: Effect results or user intents
//! - **Reducer**: Pure function that folds an event into the next state
//! - **Feedback**: State-gated asynchronous effect that emits events
//! - **System**: Serial event loop wiring the above together

mod error;
mod event;
mod feedback;
mod reducer;
mod state;
mod system;

pub use error::{LoopError, StatusMismatch};
pub use event::Event;
pub use feedback::{EventSink, EventStream, Feedback};
pub use reducer::Reducer;
pub use state::UiState;
pub use system::{LoopHandle, System};
