//! The feedback loop runtime.
//!
//! [`System::start`] spawns a driver task that owns the current state. The
//! driver pulls events one at a time from a single queue, reduces, publishes
//! the new snapshot and re-drives every feedback in declaration order.
//! Effects run concurrently on the tokio runtime but their events are
//! serialized through the same queue, so the reducer is never re-entered.

use std::marker::PhantomData;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::error::LoopError;
use super::feedback::{EventSink, Feedback};
use super::reducer::Reducer;

/// Builder for feedback loops driven by the reducer `R`.
pub struct System<R>(PhantomData<R>);

impl<R: Reducer> System<R> {
    /// Start a loop from `initial`, evaluating `feedbacks` against every state.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        name: &'static str,
        initial: R::State,
        feedbacks: Vec<Feedback<R::State, R::Event>>,
    ) -> LoopHandle<R::State, R::Event> {
        let (state_tx, state_rx) = watch::channel(initial.clone());
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let sink = EventSink::new(event_tx.clone());

        tracing::info!(
            target: "photoloop::loop",
            loop_name = name,
            feedbacks = feedbacks.len(),
            "starting loop"
        );
        let task = tokio::spawn(drive::<R>(name, initial, feedbacks, sink, event_rx, state_tx));

        LoopHandle {
            name,
            state: state_rx,
            events: event_tx,
            task,
        }
    }
}

async fn drive<R: Reducer>(
    name: &'static str,
    mut state: R::State,
    mut feedbacks: Vec<Feedback<R::State, R::Event>>,
    sink: EventSink<R::Event>,
    mut events: mpsc::UnboundedReceiver<R::Event>,
    publisher: watch::Sender<R::State>,
) {
    for feedback in feedbacks.iter_mut() {
        feedback.drive(&state, &sink);
    }

    while let Some(event) = events.recv().await {
        tracing::trace!(target: "photoloop::loop", loop_name = name, ?event, "reducing");
        state = R::reduce(state, event);
        publisher.send_replace(state.clone());

        for feedback in feedbacks.iter_mut() {
            feedback.drive(&state, &sink);
        }
    }
}

/// Owner of a running loop.
///
/// Dropping the handle tears the loop down: the driver task is aborted and
/// every feedback's in-flight effect is aborted with it.
pub struct LoopHandle<S, E> {
    name: &'static str,
    state: watch::Receiver<S>,
    events: mpsc::UnboundedSender<E>,
    task: JoinHandle<()>,
}

impl<S, E> LoopHandle<S, E>
where
    S: Clone,
{
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Latest published state.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.clone()
    }

    /// Queue an event directly, bypassing the feedbacks.
    pub fn send(&self, event: E) -> Result<(), LoopError> {
        self.events
            .send(event)
            .map_err(|_| LoopError::Closed { name: self.name })
    }

    /// Wait until a published state satisfies `predicate` and return it.
    ///
    /// Checks the current state first.
    pub async fn wait_for(&self, mut predicate: impl FnMut(&S) -> bool) -> Result<S, LoopError> {
        let mut receiver = self.state.clone();
        let state = receiver
            .wait_for(|state| predicate(state))
            .await
            .map_err(|_| LoopError::Closed { name: self.name })?;
        Ok(state.clone())
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the loop and wait for the driver task to wind down.
    pub async fn shutdown(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
        tracing::info!(target: "photoloop::loop", loop_name = self.name, "loop shut down");
    }
}

impl<S, E> Drop for LoopHandle<S, E> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
