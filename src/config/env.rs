//
//  listmonk-ops
//  config/env.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Environment boundary for configuration.
//!
//! This is the only place that reads `LISTMONK_*` variables. Everything else
//! receives an already-parsed [`super::Config`].

use std::collections::{BTreeMap, HashMap};

use super::ConfigError;

/// API root URL.
pub const ENV_BASE_URL: &str = "LISTMONK_API_URL";
/// API user name.
pub const ENV_USERNAME: &str = "LISTMONK_USERNAME";
/// API token.
pub const ENV_TOKEN: &str = "LISTMONK_API_TOKEN";
/// Timeout in milliseconds.
pub const ENV_TIMEOUT: &str = "LISTMONK_TIMEOUT";
/// Retry count.
pub const ENV_RETRIES: &str = "LISTMONK_RETRIES";
/// Extra headers as a JSON object of strings.
pub const ENV_HEADERS: &str = "LISTMONK_HEADERS";

const PREFIX: &str = "LISTMONK_";

/// A snapshot of the environment variables relevant to configuration.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    vars: HashMap<String, String>,
}

impl EnvSource {
    /// Captures the `LISTMONK_*` variables of the current process.
    pub fn from_process() -> Self {
        Self::from_pairs(std::env::vars().filter(|(key, _)| key.starts_with(PREFIX)))
    }

    /// Builds a snapshot from explicit pairs.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            vars: pairs.into_iter().collect(),
        }
    }

    /// Returns the variable when it is set to something other than blanks.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }
}

/// The configuration layer contributed by the environment.
#[derive(Debug, Default)]
pub(crate) struct EnvLayer {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub token: Option<String>,
    pub timeout_ms: Option<u64>,
    pub retries: Option<u32>,
    pub headers: BTreeMap<String, String>,
}

pub(crate) fn read(env: &EnvSource) -> Result<EnvLayer, ConfigError> {
    Ok(EnvLayer {
        base_url: env.get(ENV_BASE_URL).map(str::to_string),
        username: env.get(ENV_USERNAME).map(str::to_string),
        token: env.get(ENV_TOKEN).map(str::to_string),
        timeout_ms: parse_number(env, ENV_TIMEOUT)?,
        retries: parse_number(env, ENV_RETRIES)?,
        headers: match env.get(ENV_HEADERS) {
            Some(raw) => parse_headers(raw)?,
            None => BTreeMap::new(),
        },
    })
}

fn parse_number<T: std::str::FromStr>(
    env: &EnvSource,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    env.get(var)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidNumber {
                var,
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn parse_headers(raw: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidHeaders {
        source_name: ENV_HEADERS.to_string(),
        reason,
    };

    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| invalid("expected a JSON object".to_string()))?;

    object
        .iter()
        .map(|(name, value)| match value.as_str() {
            Some(s) => Ok((name.clone(), s.to_string())),
            None => Err(invalid(format!("header '{name}' must be a string"))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pairs: &[(&str, &str)]) -> EnvSource {
        EnvSource::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    #[test]
    fn test_blank_values_are_unset() {
        let env = source(&[(ENV_TOKEN, "   ")]);
        assert_eq!(env.get(ENV_TOKEN), None);
    }

    #[test]
    fn test_non_integer_timeout_is_rejected() {
        let err = read(&source(&[(ENV_TIMEOUT, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: ENV_TIMEOUT,
                value: "soon".to_string()
            }
        );
    }

    #[test]
    fn test_headers_must_be_string_object() {
        assert!(read(&source(&[(ENV_HEADERS, "[1,2]")])).is_err());
        assert!(read(&source(&[(ENV_HEADERS, r#"{"X-A": 1}"#)])).is_err());

        let layer = read(&source(&[(ENV_HEADERS, r#"{"X-A": "1"}"#)])).unwrap();
        assert_eq!(layer.headers["X-A"], "1");
    }
}
