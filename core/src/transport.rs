//! Executing a [`RequestDescriptor`] against the network.
//!
//! # Design
//! [`Transport`] is the only async seam in the crate. It performs exactly one
//! round-trip per call and never retries; retry policy belongs to callers.
//! Status codes are returned as data so the classifier, not the HTTP library,
//! decides what a `404` or `503` means.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::DEFAULT_TIMEOUT;
use crate::http::{HttpMethod, HttpResponse, RequestDescriptor};
use crate::outcome::{TransportError, TransportErrorKind};

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestDescriptor) -> Result<HttpResponse, TransportError>;
}

/// Blocking `ureq` agent driven from tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Option<Duration>,
}

impl UreqTransport {
    /// `timeout` bounds the whole round-trip inside ureq. Callers still wrap
    /// `send` in their own deadline.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Bounded by [`DEFAULT_TIMEOUT`], the same deadline `ClientConfig` uses.
impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Some(DEFAULT_TIMEOUT))
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute(&agent, &request))
            .await
            .map_err(|e| TransportError::new(TransportErrorKind::Abandoned, e.to_string()))?
    }
}

fn execute(agent: &ureq::Agent, request: &RequestDescriptor) -> Result<HttpResponse, TransportError> {
    let body = request.body.as_deref();
    let result = match request.method {
        HttpMethod::Get => decorate(agent.get(&request.url), request).call(),
        HttpMethod::Delete => decorate(agent.delete(&request.url), request).call(),
        HttpMethod::Post => match body {
            Some(bytes) => decorate(agent.post(&request.url), request).send(bytes),
            None => decorate(agent.post(&request.url), request).send_empty(),
        },
        HttpMethod::Put => match body {
            Some(bytes) => decorate(agent.put(&request.url), request).send(bytes),
            None => decorate(agent.put(&request.url), request).send_empty(),
        },
    };

    let mut response = result.map_err(map_ureq_error)?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_vec().map_err(map_ureq_error)?;

    Ok(HttpResponse { status, headers, body })
}

fn decorate<B>(mut builder: ureq::RequestBuilder<B>, request: &RequestDescriptor) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (name, value) in &request.query {
        builder = builder.query(name, value);
    }
    builder
}

fn map_ureq_error(err: ureq::Error) -> TransportError {
    let kind = match &err {
        ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => TransportErrorKind::Connect,
        ureq::Error::Io(_) => TransportErrorKind::Io,
        _ => TransportErrorKind::Other,
    };
    TransportError::new(kind, err.to_string())
}
