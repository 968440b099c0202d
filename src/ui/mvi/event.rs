//! Base trait for events in MVI architecture.

use std::fmt::Debug;

/// Marker trait for event objects.
///
/// Events represent:
/// - User intents (taps, appearance changes)
/// - Effect results (API responses, cache writes)
///
/// Events are processed by reducers to produce new states.
pub trait Event: Debug + Send + 'static {}
