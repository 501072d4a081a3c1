//! HTTP request and response descriptions for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. [`RequestBuilder`] assembles a
//! [`RequestDescriptor`] from typed input; a [`Transport`](crate::Transport)
//! executes it and hands back an [`HttpResponse`]. Nothing in this module
//! touches the network, so request construction stays deterministic.
//!
//! Headers and query parameters are ordered lists with unique keys. Setting a
//! key that is already present replaces the value in place, keeping the
//! original position. Header keys compare case-insensitively.

use serde::Serialize;

use crate::credential::Credential;
use crate::error::ConfigError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A fully described request, immutable once built.
///
/// One descriptor is built per request attempt and consumed by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Look up a query parameter by exact name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the descriptor carries an `Authorization` header at all.
    pub fn is_authenticated(&self) -> bool {
        self.header("authorization").is_some()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }
}

/// Step-by-step construction of a [`RequestDescriptor`].
///
/// `Content-Type: application/json` and `Accept: application/json` are always
/// present. Errors from `json_body` are held until [`build`](Self::build) so
/// the chain reads top to bottom.
#[derive(Debug)]
pub struct RequestBuilder {
    method: HttpMethod,
    base: String,
    path: String,
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    error: Option<ConfigError>,
}

impl RequestBuilder {
    pub fn new(method: HttpMethod, base: &str, path: &str) -> Self {
        let mut builder = Self {
            method,
            base: base.trim_end_matches('/').to_string(),
            path: path.to_string(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            error: None,
        };
        builder.set_header("Content-Type", "application/json");
        builder.set_header("Accept", "application/json");
        builder
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn query(mut self, name: &str, value: &str) -> Self {
        match self.query.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.query.push((name.to_string(), value.to_string())),
        }
        self
    }

    pub fn json_body<B: Serialize>(mut self, body: &B) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => self.body = Some(bytes),
            Err(e) => self.error = Some(ConfigError::Serialization(e.to_string())),
        }
        self
    }

    /// Attach `Authorization: Bearer <token>`, or leave the request
    /// unauthenticated when no credential is available.
    pub fn bearer(mut self, credential: Option<&Credential>) -> Self {
        if let Some(credential) = credential {
            let value = format!("Bearer {}", credential.token());
            self.set_header("Authorization", &value);
        }
        self
    }

    /// Attach an `Authorization` header with a fixed value.
    pub fn literal_authorization(mut self, value: &str) -> Self {
        self.set_header("Authorization", value);
        self
    }

    pub fn build(self) -> Result<RequestDescriptor, ConfigError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        validate_base_url(&self.base)?;
        validate_path(&self.path)?;
        Ok(RequestDescriptor {
            method: self.method,
            url: format!("{}{}", self.base, self.path),
            headers: self.headers,
            query: self.query,
            body: self.body,
        })
    }

    fn set_header(&mut self, name: &str, value: &str) {
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }
}

/// Accept only absolute `http`/`https` URLs with a host and no whitespace.
pub(crate) fn validate_base_url(base: &str) -> Result<(), ConfigError> {
    let rest = base
        .strip_prefix("https://")
        .or_else(|| base.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') && !base.contains(char::is_whitespace) => {
            Ok(())
        }
        _ => Err(ConfigError::MalformedBaseUrl(base.to_string())),
    }
}

fn validate_path(path: &str) -> Result<(), ConfigError> {
    if path.is_empty() {
        return Err(ConfigError::EmptyPath);
    }
    if !path.starts_with('/') || path.contains(char::is_whitespace) || path.contains(['?', '#']) {
        return Err(ConfigError::MalformedPath(path.to_string()));
    }
    Ok(())
}
