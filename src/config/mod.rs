//
//  listmonk-ops
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module resolves the connection settings used by the listmonk client.
//! Settings come from three layers which are merged once, at client
//! construction, into an immutable [`Config`].
//!
//! ## Precedence
//!
//! Highest first:
//!
//! 1. **Explicit overrides**: [`ConfigOverrides`], usually built from CLI flags
//! 2. **Environment**: `LISTMONK_*` variables, read in [`env`]
//! 3. **Built-in defaults**: see the table below
//!
//! Scalar fields take the first non-empty source as a whole value. Header maps
//! are merged key by key across all three layers, overrides winning.
//!
//! ## Defaults
//!
//! | Field | Default |
//! |-------|---------|
//! | `base_url` | `http://localhost:9000/api` |
//! | `auth.username` | `api-admin` |
//! | `auth.token` | *(empty, must be provided)* |
//! | `timeout` | 30000 ms |
//! | `retries` | 3 |
//! | `headers` | *(none)* |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use listmonk_ops::config::{Config, ConfigOverrides};
//!
//! let config = Config::resolve(ConfigOverrides {
//!     token: Some("secret".to_string()),
//!     ..Default::default()
//! })?;
//! config.validate()?;
//! # Ok::<(), listmonk_ops::config::ConfigError>(())
//! ```

pub mod env;

pub use env::EnvSource;

use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default API root of a local listmonk install.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000/api";

/// Default API user name created by listmonk's installer.
pub const DEFAULT_USERNAME: &str = "api-admin";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Default retry count. Carried for consumers; the client never retries.
pub const DEFAULT_RETRIES: u32 = 3;

/// Errors raised while resolving or validating a [`Config`].
///
/// Every variant names the field (or environment variable) at fault so the
/// message can be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `base_url` resolved to an empty string.
    #[error("base URL is required (set {} or pass --url)", env::ENV_BASE_URL)]
    MissingBaseUrl,

    /// `auth.username` resolved to an empty string.
    #[error("auth username is required (set {} or pass --username)", env::ENV_USERNAME)]
    MissingUsername,

    /// `auth.token` resolved to an empty string.
    #[error("auth token is required (set {} or pass --token)", env::ENV_TOKEN)]
    MissingToken,

    /// `base_url` is not an absolute URL.
    #[error("base URL '{url}' is not a valid absolute URL: {reason}")]
    InvalidBaseUrl {
        /// The rejected value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A numeric environment variable did not hold an integer.
    #[error("{var} must be an integer, got '{value}'")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// Extra headers could not be parsed or are not valid HTTP headers.
    #[error("invalid headers in {source_name}: {reason}")]
    InvalidHeaders {
        /// Where the headers came from
        source_name: String,
        /// Parse failure
        reason: String,
    },
}

/// API credentials, sent as `Authorization: token {username}:{token}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API user name.
    pub username: String,
    /// API access token.
    pub token: String,
}

/// Fully resolved client configuration.
///
/// Built once by [`Config::resolve`] and never mutated afterwards; the client
/// keeps its own copy.
///
/// # Example
///
/// ```rust
/// use listmonk_ops::config::Config;
///
/// let config = Config::new("https://lists.example.com/api", "ops", "s3cret");
/// assert!(config.validate().is_ok());
/// assert_eq!(config.timeout.as_millis(), 30_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root, e.g. `http://localhost:9000/api`.
    pub base_url: String,

    /// API credentials.
    pub auth: Credentials,

    /// Request timeout, enforced by the HTTP transport.
    pub timeout: Duration,

    /// Retry budget. Not applied by the client.
    pub retries: u32,

    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,
}

/// Partial configuration supplied by the caller.
///
/// `None` and empty strings mean "not set here" and fall through to the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
    pub timeout_ms: Option<u64>,
    pub retries: Option<u32>,
    pub headers: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth: Credentials {
                username: DEFAULT_USERNAME.to_string(),
                token: String::new(),
            },
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retries: DEFAULT_RETRIES,
            headers: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Creates a configuration with explicit connection details and default
    /// timeout, retries and headers.
    pub fn new(base_url: &str, username: &str, token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            auth: Credentials {
                username: username.to_string(),
                token: token.to_string(),
            },
            ..Default::default()
        }
    }

    /// Resolves a configuration from overrides, the process environment and
    /// the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidNumber`] or [`ConfigError::InvalidHeaders`]
    /// when a `LISTMONK_*` variable cannot be parsed. The result is not
    /// validated; call [`Config::validate`] before use.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, &EnvSource::from_process())
    }

    /// Same as [`Config::resolve`] with an explicit environment.
    pub fn resolve_with(overrides: ConfigOverrides, env: &EnvSource) -> Result<Self, ConfigError> {
        let from_env = env::read(env)?;
        let defaults = Self::default();

        let base_url = first_non_empty([overrides.base_url, from_env.base_url])
            .unwrap_or(defaults.base_url);
        let username = first_non_empty([overrides.username, from_env.username])
            .unwrap_or(defaults.auth.username);
        let token =
            first_non_empty([overrides.token, from_env.token]).unwrap_or(defaults.auth.token);

        let timeout = overrides
            .timeout_ms
            .or(from_env.timeout_ms)
            .map(Duration::from_millis)
            .unwrap_or(defaults.timeout);
        let retries = overrides
            .retries
            .or(from_env.retries)
            .unwrap_or(defaults.retries);

        let mut headers = defaults.headers;
        merge_headers(&mut headers, from_env.headers);
        merge_headers(&mut headers, overrides.headers);

        Ok(Self {
            base_url,
            auth: Credentials { username, token },
            timeout,
            retries,
            headers,
        })
    }

    /// Checks the invariants the client relies on.
    ///
    /// # Errors
    ///
    /// One distinct [`ConfigError`] per failing field, checked in the order
    /// base URL presence, username, token, base URL syntax.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if self.auth.username.trim().is_empty() {
            return Err(ConfigError::MissingUsername);
        }
        if self.auth.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        let parsed = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !parsed.has_host() {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "missing scheme or host".to_string(),
            });
        }

        Ok(())
    }

    /// Parsed form of [`Config::base_url`].
    pub fn base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }

    /// Headers sent with every request.
    ///
    /// Starts from `Content-Type: application/json` and the token
    /// `Authorization` header; custom headers are applied last and replace a
    /// default with the same name regardless of case.
    pub fn to_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(
            "Authorization".to_string(),
            format!("token {}:{}", self.auth.username, self.auth.token),
        );

        merge_headers(&mut headers, self.headers.clone());
        headers
    }
}

/// Inserts `layer` into `headers`, dropping any existing entry whose name
/// matches case-insensitively so one header never appears under two
/// spellings.
pub fn merge_headers<I>(headers: &mut BTreeMap<String, String>, layer: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (name, value) in layer {
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        headers.insert(name, value);
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvSource {
        EnvSource::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::resolve_with(ConfigOverrides::default(), &env(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.auth.username, DEFAULT_USERNAME);
        assert_eq!(config.auth.token, "");
        assert_eq!(config.timeout, Duration::from_millis(30_000));
        assert_eq!(config.retries, 3);
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_base_url_precedence() {
        let source = env(&[(env::ENV_BASE_URL, "http://env.example.com/api")]);
        let from_env = Config::resolve_with(ConfigOverrides::default(), &source).unwrap();
        assert_eq!(from_env.base_url, "http://env.example.com/api");

        let overridden = Config::resolve_with(
            ConfigOverrides {
                base_url: Some("http://override.example.com/api".to_string()),
                ..Default::default()
            },
            &source,
        )
        .unwrap();
        assert_eq!(overridden.base_url, "http://override.example.com/api");
    }

    #[test]
    fn test_credentials_precedence() {
        let source = env(&[(env::ENV_USERNAME, "env-user"), (env::ENV_TOKEN, "env-token")]);
        let from_env = Config::resolve_with(ConfigOverrides::default(), &source).unwrap();
        assert_eq!(from_env.auth.username, "env-user");
        assert_eq!(from_env.auth.token, "env-token");

        let overridden = Config::resolve_with(
            ConfigOverrides {
                username: Some("cli-user".to_string()),
                token: Some("cli-token".to_string()),
                ..Default::default()
            },
            &source,
        )
        .unwrap();
        assert_eq!(overridden.auth.username, "cli-user");
        assert_eq!(overridden.auth.token, "cli-token");
    }

    #[test]
    fn test_empty_override_falls_through_to_env() {
        let source = env(&[(env::ENV_TOKEN, "env-token")]);
        let config = Config::resolve_with(
            ConfigOverrides {
                token: Some(String::new()),
                ..Default::default()
            },
            &source,
        )
        .unwrap();
        assert_eq!(config.auth.token, "env-token");
    }

    #[test]
    fn test_timeout_and_retries_precedence() {
        let source = env(&[(env::ENV_TIMEOUT, "5000"), (env::ENV_RETRIES, "7")]);
        let from_env = Config::resolve_with(ConfigOverrides::default(), &source).unwrap();
        assert_eq!(from_env.timeout, Duration::from_millis(5000));
        assert_eq!(from_env.retries, 7);

        let overridden = Config::resolve_with(
            ConfigOverrides {
                timeout_ms: Some(1000),
                retries: Some(0),
                ..Default::default()
            },
            &source,
        )
        .unwrap();
        assert_eq!(overridden.timeout, Duration::from_millis(1000));
        assert_eq!(overridden.retries, 0);
    }

    #[test]
    fn test_headers_merge_across_sources() {
        let source = env(&[(env::ENV_HEADERS, r#"{"X-Env": "1", "X-Shared": "env"}"#)]);
        let mut headers = BTreeMap::new();
        headers.insert("X-Shared".to_string(), "override".to_string());
        headers.insert("X-Cli".to_string(), "2".to_string());

        let config = Config::resolve_with(
            ConfigOverrides {
                headers,
                ..Default::default()
            },
            &source,
        )
        .unwrap();

        assert_eq!(config.headers.len(), 3);
        assert_eq!(config.headers["X-Env"], "1");
        assert_eq!(config.headers["X-Cli"], "2");
        assert_eq!(config.headers["X-Shared"], "override");
    }

    #[test]
    fn test_override_header_wins_regardless_of_case() {
        let source = env(&[(env::ENV_HEADERS, r#"{"x-tenant": "from-env"}"#)]);
        let mut headers = BTreeMap::new();
        headers.insert("X-Tenant".to_string(), "from-override".to_string());

        let config = Config::resolve_with(
            ConfigOverrides {
                headers,
                token: Some("secret".to_string()),
                ..Default::default()
            },
            &source,
        )
        .unwrap();

        assert_eq!(config.headers.len(), 1);
        assert_eq!(config.headers["X-Tenant"], "from-override");

        let sent = config.to_headers();
        let tenant: Vec<_> = sent
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("x-tenant"))
            .collect();
        assert_eq!(tenant, vec![(&"X-Tenant".to_string(), &"from-override".to_string())]);
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        let config = Config::new("http://localhost:9000/api", "api-admin", "token");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_each_field() {
        let mut config = Config::new("", "user", "token");
        assert_eq!(config.validate(), Err(ConfigError::MissingBaseUrl));

        config = Config::new("http://localhost:9000/api", "", "token");
        assert_eq!(config.validate(), Err(ConfigError::MissingUsername));

        config = Config::new("http://localhost:9000/api", "user", "");
        assert_eq!(config.validate(), Err(ConfigError::MissingToken));

        config = Config::new("not a url", "user", "token");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_validation_messages_name_the_field() {
        assert!(ConfigError::MissingBaseUrl.to_string().contains("base URL"));
        assert!(ConfigError::MissingUsername.to_string().contains("username"));
        assert!(ConfigError::MissingToken.to_string().contains("token"));
    }

    #[test]
    fn test_headers_include_auth_and_content_type() {
        let config = Config::new("http://localhost:9000/api", "api-admin", "abc");
        let headers = config.to_headers();
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Authorization"], "token api-admin:abc");
    }

    #[test]
    fn test_custom_headers_override_defaults() {
        let mut config = Config::new("http://localhost:9000/api", "api-admin", "abc");
        config
            .headers
            .insert("authorization".to_string(), "Bearer xyz".to_string());
        config
            .headers
            .insert("X-Trace".to_string(), "on".to_string());

        let headers = config.to_headers();
        assert_eq!(headers.get("Authorization"), None);
        assert_eq!(headers["authorization"], "Bearer xyz");
        assert_eq!(headers["X-Trace"], "on");
        assert_eq!(headers["Content-Type"], "application/json");
    }
}
