//! Access to the bearer token held by the host's secure storage.
//!
//! The client never stores a token itself. It asks a [`CredentialProvider`]
//! once per request attempt and treats absence as "not authenticated".

use std::collections::HashMap;
use std::fmt;

/// Keychain service under which the access token is stored.
pub const ACCESS_TOKEN_SERVICE: &str = "access-token";

/// Keychain account under which the access token is stored.
pub const ACCESS_TOKEN_ACCOUNT: &str = "user";

/// An opaque bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Secure storage owned by the host application.
///
/// Implementations are expected to be synchronized externally; the client
/// only ever reads from them.
pub trait CredentialProvider: Send + Sync {
    fn read(&self, service: &str, account: &str) -> Option<Vec<u8>>;
}

/// Read the access token, returning `None` when it is absent, empty, or not
/// valid UTF-8.
pub fn read_access_token(provider: &dyn CredentialProvider) -> Option<Credential> {
    let bytes = provider.read(ACCESS_TOKEN_SERVICE, ACCESS_TOKEN_ACCOUNT)?;
    let token = String::from_utf8(bytes).ok()?;
    if token.is_empty() {
        return None;
    }
    Some(Credential(token))
}

/// In-memory credential store keyed by `(service, account)`.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    entries: HashMap<(String, String), Vec<u8>>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding only the access token.
    pub fn with_access_token(token: &str) -> Self {
        let mut store = Self::new();
        store.insert(ACCESS_TOKEN_SERVICE, ACCESS_TOKEN_ACCOUNT, token.as_bytes().to_vec());
        store
    }

    pub fn insert(&mut self, service: &str, account: &str, value: Vec<u8>) {
        self.entries
            .insert((service.to_string(), account.to_string()), value);
    }
}

impl CredentialProvider for StaticCredentials {
    fn read(&self, service: &str, account: &str) -> Option<Vec<u8>> {
        self.entries
            .get(&(service.to_string(), account.to_string()))
            .cloned()
    }
}
