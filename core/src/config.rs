//! Client settings: backend base URLs, deadline and password-endpoint auth.

use std::time::Duration;

use crate::error::ConfigError;
use crate::http::validate_base_url;

pub const ENV_COMMUNITY_URL: &str = "BOARD_COMMUNITY_URL";
pub const ENV_USER_URL: &str = "BOARD_USER_URL";
pub const ENV_TIMEOUT_SECS: &str = "BOARD_TIMEOUT_SECS";
pub const ENV_PASSWORD_AUTH: &str = "BOARD_PASSWORD_AUTH";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How the password-change request fills its `Authorization` header.
///
/// The deployed backend contract sends the bare value `Bearer` with no token.
/// That looks like a missing interpolation, but it is what existing servers
/// receive today, so it stays the default until the contract is clarified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordAuth {
    #[default]
    LiteralBearer,
    AccessToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    community_base: String,
    user_base: String,
    pub timeout: Duration,
    pub password_auth: PasswordAuth,
}

impl ClientConfig {
    pub fn new(community_base: &str, user_base: &str) -> Result<Self, ConfigError> {
        let community_base = community_base.trim_end_matches('/').to_string();
        let user_base = user_base.trim_end_matches('/').to_string();
        validate_base_url(&community_base)?;
        validate_base_url(&user_base)?;
        Ok(Self {
            community_base,
            user_base,
            timeout: DEFAULT_TIMEOUT,
            password_auth: PasswordAuth::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_password_auth(mut self, password_auth: PasswordAuth) -> Self {
        self.password_auth = password_auth;
        self
    }

    pub fn community_base(&self) -> &str {
        &self.community_base
    }

    pub fn user_base(&self) -> &str {
        &self.user_base
    }

    /// Load from `BOARD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let community = lookup(ENV_COMMUNITY_URL).ok_or(ConfigError::MissingEnv(ENV_COMMUNITY_URL))?;
        let user = lookup(ENV_USER_URL).ok_or(ConfigError::MissingEnv(ENV_USER_URL))?;
        let mut config = Self::new(&community, &user)?;

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidEnv {
                    name: ENV_TIMEOUT_SECS,
                    value: raw,
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_PASSWORD_AUTH) {
            config.password_auth = match raw.trim() {
                "literal" => PasswordAuth::LiteralBearer,
                "token" => PasswordAuth::AccessToken,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: ENV_PASSWORD_AUTH,
                        value: raw,
                    })
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn new_strips_trailing_slashes() {
        let config = ClientConfig::new("http://api.test/community/", "http://api.test/user").unwrap();
        assert_eq!(config.community_base(), "http://api.test/community");
        assert_eq!(config.user_base(), "http://api.test/user");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.password_auth, PasswordAuth::LiteralBearer);
    }

    #[test]
    fn new_rejects_relative_base() {
        let err = ClientConfig::new("/community", "http://api.test/user").unwrap_err();
        assert!(matches!(err, ConfigError::MalformedBaseUrl(_)));
    }

    #[test]
    fn env_requires_both_bases() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_COMMUNITY_URL, "http://a.test")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnv(ENV_USER_URL));
    }

    #[test]
    fn env_reads_optional_settings() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_COMMUNITY_URL, "http://a.test/community"),
            (ENV_USER_URL, "http://a.test/user"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_PASSWORD_AUTH, "token"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.password_auth, PasswordAuth::AccessToken);
    }

    #[test]
    fn env_rejects_bad_values() {
        for (name, value) in [
            (ENV_TIMEOUT_SECS, "soon"),
            (ENV_TIMEOUT_SECS, "0"),
            (ENV_PASSWORD_AUTH, "cookie"),
        ] {
            let err = ClientConfig::from_lookup(lookup(&[
                (ENV_COMMUNITY_URL, "http://a.test"),
                (ENV_USER_URL, "http://a.test"),
                (name, value),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEnv { .. }), "{name}={value}");
        }
    }
}
