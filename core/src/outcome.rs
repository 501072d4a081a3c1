//! Terminal results of a request attempt.
//!
//! # Design
//! Every request produces exactly one [`Outcome`]. Failures are values, not
//! errors, so callers match on the variant instead of unwinding a `Result`
//! chain. The presentation layer gets the server-supplied `message` verbatim
//! and formats everything else itself.

use std::fmt;

/// Why a request never produced a usable response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The deadline elapsed before a response arrived.
    Timeout,
    /// DNS resolution, TCP connect or TLS handshake failed.
    Connect,
    /// The connection broke while sending or receiving.
    Io,
    /// The server answered with a status code outside the known classes.
    UnrecognizedStatus(u16),
    /// The request task ended without publishing an outcome.
    Abandoned,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "network failure ({:?}): {}", self.kind, self.message)
    }
}

impl std::error::Error for TransportError {}

/// The single terminal result of one request attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),

    /// A 4xx response, or a request refused before sending (`status: None`),
    /// e.g. because no credential was available.
    ClientRejected { status: Option<u16>, message: String },

    /// A 500 response, or a 2xx response whose envelope says `isSuccess: false`.
    ServerFailed { status: u16, message: String },

    TransportFailed(TransportError),

    /// The payload did not match the expected envelope shape.
    DecodeFailed(String),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// The server-supplied message for rejection variants. Empty messages
    /// are `None` so the presentation layer falls back to its own text.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Outcome::ClientRejected { message, .. } | Outcome::ServerFailed { message, .. }
                if !message.is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::ClientRejected { status, message } => Outcome::ClientRejected { status, message },
            Outcome::ServerFailed { status, message } => Outcome::ServerFailed { status, message },
            Outcome::TransportFailed(err) => Outcome::TransportFailed(err),
            Outcome::DecodeFailed(cause) => Outcome::DecodeFailed(cause),
        }
    }

    /// Split into the value and everything else.
    pub fn into_result(self) -> Result<T, Outcome<T>> {
        match self {
            Outcome::Success(value) => Ok(value),
            other => Err(other),
        }
    }

    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::ClientRejected { .. } => "client_rejected",
            Outcome::ServerFailed { .. } => "server_failed",
            Outcome::TransportFailed(_) => "transport_failed",
            Outcome::DecodeFailed(_) => "decode_failed",
        }
    }
}

/// What a list screen should show for a list-valued outcome.
///
/// An empty success is "nothing here yet", never a load failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState<T> {
    Empty,
    Loaded(Vec<T>),
    /// Carries the server message when there is one.
    Failed { message: Option<String> },
}

impl<T> From<Outcome<Vec<T>>> for ListState<T> {
    fn from(outcome: Outcome<Vec<T>>) -> Self {
        match outcome {
            Outcome::Success(items) if items.is_empty() => ListState::Empty,
            Outcome::Success(items) => ListState::Loaded(items),
            other => ListState::Failed {
                message: other.server_message().map(str::to_string),
            },
        }
    }
}
