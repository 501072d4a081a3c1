//! Async orchestration of one request attempt per call.
//!
//! # Design
//! `BoardService` is constructed explicitly by the host and shares nothing
//! mutable between calls. A call reads the credential once, builds the
//! request, sends it under the configured deadline, decodes the response and
//! yields exactly one [`Outcome`]. The `spawn_*` variants run the same flow
//! on a tokio task and deliver the outcome through an [`OutcomeReceiver`].

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::client::BoardClient;
use crate::config::ClientConfig;
use crate::credential::{read_access_token, CredentialProvider};
use crate::decode::decode_response;
use crate::error::ConfigError;
use crate::http::RequestDescriptor;
use crate::outcome::{Outcome, TransportError, TransportErrorKind};
use crate::publish::{outcome_channel, Lifecycle, OutcomeReceiver, RequestState};
use crate::transport::{Transport, UreqTransport};
use crate::types::{ChangePassword, PasswordChanged, PostSummary, SearchHit, SearchQuery};

/// Message carried by `ClientRejected` when no access token is stored.
pub const MISSING_CREDENTIAL: &str = "missing credential";

/// A request ready to send, or `None` when it was refused for lack of a
/// credential.
type Prepared = Option<RequestDescriptor>;

pub struct BoardService<T> {
    client: BoardClient,
    transport: Arc<T>,
    credentials: Arc<dyn CredentialProvider>,
}

impl<T> Clone for BoardService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
            credentials: Arc::clone(&self.credentials),
        }
    }
}

impl BoardService<UreqTransport> {
    /// A service backed by `ureq`, with the transport deadline taken from the
    /// configuration.
    pub fn with_ureq(config: ClientConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        let transport = UreqTransport::new(Some(config.timeout));
        Self::new(config, transport, credentials)
    }
}

impl<T: Transport + 'static> BoardService<T> {
    pub fn new(config: ClientConfig, transport: T, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client: BoardClient::new(config),
            transport: Arc::new(transport),
            credentials,
        }
    }

    pub fn client(&self) -> &BoardClient {
        &self.client
    }

    /// Posts written by the signed-in user.
    pub async fn post_list(&self) -> Result<Outcome<Vec<PostSummary>>, ConfigError> {
        let request = self.prepare_post_list()?;
        Ok(self.dispatch("post-list", request).await)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Outcome<Vec<SearchHit>>, ConfigError> {
        let request = self.prepare_search(query)?;
        Ok(self.dispatch("search", request).await)
    }

    pub async fn change_password(&self, input: &ChangePassword) -> Result<Outcome<PasswordChanged>, ConfigError> {
        let request = self.prepare_change_password(input)?;
        Ok(self.dispatch("password", request).await)
    }

    /// Runs [`post_list`](Self::post_list) on the current Tokio runtime.
    ///
    /// Returns [`ConfigError::NoRuntime`] when called outside one.
    pub fn spawn_post_list(&self) -> Result<OutcomeReceiver<Vec<PostSummary>>, ConfigError> {
        let request = self.prepare_post_list()?;
        self.spawn("post-list", request)
    }

    pub fn spawn_search(&self, query: &SearchQuery) -> Result<OutcomeReceiver<Vec<SearchHit>>, ConfigError> {
        let request = self.prepare_search(query)?;
        self.spawn("search", request)
    }

    pub fn spawn_change_password(
        &self,
        input: &ChangePassword,
    ) -> Result<OutcomeReceiver<PasswordChanged>, ConfigError> {
        let request = self.prepare_change_password(input)?;
        self.spawn("password", request)
    }

    fn prepare_post_list(&self) -> Result<Prepared, ConfigError> {
        let Some(credential) = read_access_token(self.credentials.as_ref()) else {
            return Ok(None);
        };
        self.client.build_post_list(Some(&credential)).map(Some)
    }

    fn prepare_search(&self, query: &SearchQuery) -> Result<Prepared, ConfigError> {
        let Some(credential) = read_access_token(self.credentials.as_ref()) else {
            return Ok(None);
        };
        self.client.build_search(query, Some(&credential)).map(Some)
    }

    fn prepare_change_password(&self, input: &ChangePassword) -> Result<Prepared, ConfigError> {
        if !self.client.password_needs_token() {
            return self.client.build_change_password(input, None).map(Some);
        }
        let Some(credential) = read_access_token(self.credentials.as_ref()) else {
            return Ok(None);
        };
        self.client.build_change_password(input, Some(&credential)).map(Some)
    }

    async fn dispatch<R: DeserializeOwned>(&self, endpoint: &'static str, request: Prepared) -> Outcome<R> {
        run(self.transport.as_ref(), self.client.config().timeout, endpoint, request).await
    }

    fn spawn<R>(&self, endpoint: &'static str, request: Prepared) -> Result<OutcomeReceiver<R>, ConfigError>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;
        let (publisher, receiver) = outcome_channel();
        let transport = Arc::clone(&self.transport);
        let timeout = self.client.config().timeout;
        runtime.spawn(async move {
            let outcome = run(transport.as_ref(), timeout, endpoint, request).await;
            publisher.publish(outcome);
        });
        Ok(receiver)
    }
}

async fn run<T, R>(transport: &T, timeout: Duration, endpoint: &'static str, request: Prepared) -> Outcome<R>
where
    T: Transport,
    R: DeserializeOwned,
{
    let mut lifecycle = Lifecycle::new(endpoint);

    let Some(request) = request else {
        tracing::debug!(endpoint, "no access token, request not sent");
        lifecycle.advance(RequestState::Published);
        return Outcome::ClientRejected {
            status: None,
            message: MISSING_CREDENTIAL.to_string(),
        };
    };

    tracing::debug!(endpoint, method = request.method.as_str(), url = %request.url, "sending request");
    lifecycle.advance(RequestState::Sent);

    let outcome = match tokio::time::timeout(timeout, transport.send(request)).await {
        Ok(Ok(response)) => {
            lifecycle.advance(RequestState::Responded);
            let outcome = decode_response(&response);
            lifecycle.advance(RequestState::Decoded);
            outcome
        }
        Ok(Err(err)) => {
            tracing::warn!(endpoint, error = %err, "transport failed");
            lifecycle.advance(RequestState::TransportFailed);
            Outcome::TransportFailed(err)
        }
        Err(_) => {
            tracing::warn!(endpoint, ?timeout, "request deadline elapsed");
            lifecycle.advance(RequestState::TransportFailed);
            Outcome::TransportFailed(TransportError::new(
                TransportErrorKind::Timeout,
                format!("no response within {timeout:?}"),
            ))
        }
    };

    lifecycle.advance(RequestState::Published);
    tracing::debug!(endpoint, outcome = outcome.variant_name(), "request finished");
    outcome
}
