//! Configuration errors for the board API client.
//!
//! # Design
//! `ConfigError` is the only `Err` type the crate returns. It covers mistakes
//! made while describing a request or loading settings, which are programmer
//! or deployment errors. Everything that can go wrong once a request is on the
//! wire is reported as an [`Outcome`](crate::Outcome) variant instead.

use thiserror::Error;

/// Errors raised while building a request or loading client configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The endpoint path was empty.
    #[error("endpoint path is empty")]
    EmptyPath,

    /// The endpoint path does not start with `/` or contains whitespace.
    #[error("malformed endpoint path: {0:?}")]
    MalformedPath(String),

    /// A base URL is not an absolute `http`/`https` URL.
    #[error("malformed base url: {0:?}")]
    MalformedBaseUrl(String),

    /// A required environment variable is not set.
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    /// An environment variable is set but cannot be parsed.
    #[error("invalid value {value:?} for environment variable {name}")]
    InvalidEnv { name: &'static str, value: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A `spawn_*` call was made outside a Tokio runtime.
    #[error("no tokio runtime is running")]
    NoRuntime,
}
