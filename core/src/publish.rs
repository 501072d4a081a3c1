//! Single-shot delivery of an [`Outcome`] to one consumer.
//!
//! # Design
//! The publishing half is consumed by [`Publisher::publish`], so an outcome
//! can be delivered at most once. The receiving half turns "the publisher
//! went away" and "nothing arrived in time" into transport failures so a
//! consumer always ends with exactly one outcome.

use std::time::Duration;

use tokio::sync::oneshot;

use crate::outcome::{Outcome, TransportError, TransportErrorKind};

/// Lifecycle of a single request attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Built,
    Sent,
    Responded,
    Decoded,
    TransportFailed,
    Published,
}

impl RequestState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (self, next),
            (Built, Sent)
                | (Built, Published)
                | (Sent, Responded)
                | (Sent, TransportFailed)
                | (Responded, Decoded)
                | (Decoded, Published)
                | (TransportFailed, Published)
        )
    }
}

/// Records and traces state transitions for one request.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    endpoint: &'static str,
    state: RequestState,
}

impl Lifecycle {
    pub(crate) fn new(endpoint: &'static str) -> Self {
        tracing::trace!(endpoint, state = ?RequestState::Built, "request state");
        Self {
            endpoint,
            state: RequestState::Built,
        }
    }

    pub(crate) fn advance(&mut self, next: RequestState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            self.state,
            next
        );
        tracing::trace!(endpoint = self.endpoint, from = ?self.state, to = ?next, "request state");
        self.state = next;
    }
}

pub struct Publisher<T> {
    tx: oneshot::Sender<Outcome<T>>,
}

impl<T> Publisher<T> {
    /// Deliver the outcome. A consumer that has already gone away is not an
    /// error; the outcome is dropped.
    pub fn publish(self, outcome: Outcome<T>) {
        if self.tx.send(outcome).is_err() {
            tracing::debug!("outcome consumer dropped before delivery");
        }
    }
}

pub struct OutcomeReceiver<T> {
    rx: oneshot::Receiver<Outcome<T>>,
}

impl<T> OutcomeReceiver<T> {
    pub async fn recv(self) -> Outcome<T> {
        match self.rx.await {
            Ok(outcome) => outcome,
            Err(_) => Outcome::TransportFailed(TransportError::new(
                TransportErrorKind::Abandoned,
                "request ended without an outcome",
            )),
        }
    }

    /// Like [`recv`](Self::recv) but gives up after `deadline`.
    pub async fn recv_within(self, deadline: Duration) -> Outcome<T> {
        match tokio::time::timeout(deadline, self.recv()).await {
            Ok(outcome) => outcome,
            Err(_) => Outcome::TransportFailed(TransportError::new(
                TransportErrorKind::Timeout,
                format!("no outcome within {deadline:?}"),
            )),
        }
    }
}

pub fn outcome_channel<T>() -> (Publisher<T>, OutcomeReceiver<T>) {
    let (tx, rx) = oneshot::channel();
    (Publisher { tx }, OutcomeReceiver { rx })
}
