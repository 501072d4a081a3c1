//! Typed client core for the community board and user-profile API.
//!
//! # Overview
//! Builds request descriptors, sends them through a pluggable transport,
//! classifies the status code, decodes the `{isSuccess, message, result}`
//! envelope and delivers exactly one [`Outcome`] per request.
//!
//! # Design
//! - `BoardClient` is stateless: `build_*` produces a request, `parse_*`
//!   consumes a response, so hosts that do their own I/O can stop there.
//! - `BoardService` adds the async round-trip: credential read, deadline,
//!   transport, decode and single-shot publication.
//! - Runtime failures are `Outcome` variants; `ConfigError` is reserved for
//!   malformed requests and settings.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod classify;
pub mod client;
pub mod config;
pub mod credential;
pub mod decode;
pub mod error;
pub mod http;
pub mod outcome;
pub mod publish;
pub mod service;
pub mod transport;
pub mod types;

pub use classify::{classify, StatusClass};
pub use client::BoardClient;
pub use config::{ClientConfig, PasswordAuth};
pub use credential::{read_access_token, Credential, CredentialProvider, StaticCredentials};
pub use decode::decode_response;
pub use error::ConfigError;
pub use http::{HttpMethod, HttpResponse, RequestBuilder, RequestDescriptor};
pub use outcome::{ListState, Outcome, TransportError, TransportErrorKind};
pub use publish::{outcome_channel, OutcomeReceiver, Publisher, RequestState};
pub use service::{BoardService, MISSING_CREDENTIAL};
pub use transport::{Transport, UreqTransport};
pub use types::{ChangePassword, PasswordChanged, PostSummary, ResponseEnvelope, SearchHit, SearchQuery};
