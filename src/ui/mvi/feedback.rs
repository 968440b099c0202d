//! State-gated effect sources.
//!
//! A [`Feedback`] is re-evaluated by the loop after every reduction. Its
//! query decides whether the current state calls for an effect:
//!
//! - `None`: not applicable, an in-flight effect is cancelled
//! - `Some(q)` equal to the previous query: the running (or finished)
//!   effect is left alone
//! - `Some(q)` different from the previous query: the in-flight effect is
//!   cancelled and a new one is started for `q`

use std::future::Future;
use std::pin::Pin;

use futures::future;
use futures::stream::{self, StreamExt};
use futures_core::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Boxed stream of events produced by one effect.
pub type EventStream<E> = Pin<Box<dyn Stream<Item = E> + Send + 'static>>;

/// Entry point of the loop's event queue.
///
/// Cloned into every spawned effect. Emitting after the loop is gone is
/// not an error; the event is dropped.
pub struct EventSink<E> {
    tx: mpsc::UnboundedSender<E>,
}

impl<E> Clone for EventSink<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E> EventSink<E> {
    pub(crate) fn new(tx: mpsc::UnboundedSender<E>) -> Self {
        Self { tx }
    }

    /// Queue an event. Returns `false` if the loop has shut down.
    pub fn emit(&self, event: E) -> bool {
        self.tx.send(event).is_ok()
    }
}

trait Drive<S, E>: Send {
    fn drive(&mut self, state: &S, sink: &EventSink<E>);
}

/// One asynchronous side-effect source of a loop.
pub struct Feedback<S, E> {
    name: &'static str,
    inner: Box<dyn Drive<S, E>>,
}

impl<S, E> Feedback<S, E>
where
    S: 'static,
    E: Send + 'static,
{
    /// Gated effect producing exactly one event per qualifying query.
    pub fn when<Q, F, Fut>(
        name: &'static str,
        query: impl Fn(&S) -> Option<Q> + Send + 'static,
        effect: F,
    ) -> Self
    where
        Q: PartialEq + Clone + Send + 'static,
        F: Fn(Q) -> Fut + Send + 'static,
        Fut: Future<Output = E> + Send + 'static,
    {
        Self::when_stream(name, query, move |q| stream::once(effect(q)).boxed())
    }

    /// Gated effect producing at most one event.
    ///
    /// Used for effects whose failure is logged and swallowed rather than
    /// folded into state.
    pub fn when_optional<Q, F, Fut>(
        name: &'static str,
        query: impl Fn(&S) -> Option<Q> + Send + 'static,
        effect: F,
    ) -> Self
    where
        Q: PartialEq + Clone + Send + 'static,
        F: Fn(Q) -> Fut + Send + 'static,
        Fut: Future<Output = Option<E>> + Send + 'static,
    {
        Self::when_stream(name, query, move |q| {
            stream::once(effect(q)).filter_map(future::ready).boxed()
        })
    }

    /// Gated effect producing any number of events.
    pub fn when_stream<Q, F>(
        name: &'static str,
        query: impl Fn(&S) -> Option<Q> + Send + 'static,
        effect: F,
    ) -> Self
    where
        Q: PartialEq + Clone + Send + 'static,
        F: Fn(Q) -> EventStream<E> + Send + 'static,
    {
        Self {
            name,
            inner: Box::new(Gated {
                name,
                query: Box::new(query),
                effect: Box::new(effect),
                current: None,
            }),
        }
    }

    /// Ungated pass-through of an input channel.
    ///
    /// Forwarding starts on the first evaluation and runs for the loop's
    /// lifetime regardless of state.
    pub fn input<I>(
        name: &'static str,
        receiver: mpsc::UnboundedReceiver<I>,
        map: fn(I) -> E,
    ) -> Self
    where
        I: Send + 'static,
    {
        let events = stream::unfold(receiver, |mut receiver| async move {
            receiver.recv().await.map(|item| (item, receiver))
        })
        .map(map)
        .boxed();

        Self {
            name,
            inner: Box::new(Input {
                name,
                pending: Some(events),
                forwarder: None,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn drive(&mut self, state: &S, sink: &EventSink<E>) {
        self.inner.drive(state, sink);
    }
}

type Query<S, Q> = Box<dyn Fn(&S) -> Option<Q> + Send>;
type Effect<Q, E> = Box<dyn Fn(Q) -> EventStream<E> + Send>;

struct Gated<S, E, Q> {
    name: &'static str,
    query: Query<S, Q>,
    effect: Effect<Q, E>,
    current: Option<(Q, JoinHandle<()>)>,
}

impl<S, E, Q> Drive<S, E> for Gated<S, E, Q>
where
    E: Send + 'static,
    Q: PartialEq + Clone + Send + 'static,
{
    fn drive(&mut self, state: &S, sink: &EventSink<E>) {
        let Some(query) = (self.query)(state) else {
            if let Some((_, handle)) = self.current.take() {
                if !handle.is_finished() {
                    tracing::debug!(feedback = self.name, "gate closed, cancelling effect");
                }
                handle.abort();
            }
            return;
        };

        if matches!(&self.current, Some((previous, _)) if *previous == query) {
            return;
        }

        if let Some((_, handle)) = self.current.take() {
            tracing::debug!(feedback = self.name, "gate changed, restarting effect");
            handle.abort();
        }

        tracing::debug!(feedback = self.name, "starting effect");
        let mut events = (self.effect)(query.clone());
        let sink = sink.clone();
        let name = self.name;
        let handle = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if !sink.emit(event) {
                    tracing::trace!(feedback = name, "event dropped (loop gone)");
                    break;
                }
            }
        });
        self.current = Some((query, handle));
    }
}

impl<S, E, Q> Drop for Gated<S, E, Q> {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.current.take() {
            handle.abort();
        }
    }
}

struct Input<E> {
    name: &'static str,
    pending: Option<EventStream<E>>,
    forwarder: Option<JoinHandle<()>>,
}

impl<S, E> Drive<S, E> for Input<E>
where
    E: Send + 'static,
{
    fn drive(&mut self, _state: &S, sink: &EventSink<E>) {
        let Some(mut events) = self.pending.take() else {
            return;
        };

        let sink = sink.clone();
        let name = self.name;
        self.forwarder = Some(tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if !sink.emit(event) {
                    tracing::trace!(feedback = name, "input dropped (loop gone)");
                    break;
                }
            }
        }));
    }
}

impl<E> Drop for Input<E> {
    fn drop(&mut self) {
        if let Some(handle) = self.forwarder.take() {
            handle.abort();
        }
    }
}
