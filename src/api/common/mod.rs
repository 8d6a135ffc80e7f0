//
//  listmonk-ops
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! This module provides the response shapes and the error taxonomy shared by
//! every namespace of the client.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`Envelope`] - The one canonical successful result shape
//! - [`CrudResult`] - Result of single-entity fetch and update calls, where an
//!   upstream rejection is data rather than an error
//! - Pagination types (re-exported from the [`pagination`] submodule)
//!
//! # Two error channels
//!
//! `get_by_id` and `update` return [`CrudResult::Rejected`] when listmonk
//! answers with a non-2xx status. Every other operation, and every transport
//! or configuration failure, surfaces as an [`ApiError`].
//!
//! ```rust
//! use listmonk_ops::api::common::{ApiError, CrudResult};
//!
//! fn describe<T>(result: Result<CrudResult<T>, ApiError>) -> &'static str {
//!     match result {
//!         Ok(CrudResult::Found(_)) => "found",
//!         Ok(CrudResult::Rejected(_)) => "rejected by the server",
//!         Err(ApiError::Network(_)) => "server unreachable",
//!         Err(_) => "failed",
//!     }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::ConfigError;

mod pagination;

pub use pagination::*;

/// Field name to validation messages, as reported on HTTP 400.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Unified error type for all listmonk API operations.
///
/// The HTTP variants are ordered by specificity and built by
/// [`ApiError::from_response`]:
///
/// | Variant | HTTP Status |
/// |---------|-------------|
/// | `Authentication` | 401 |
/// | `Validation` | 400 |
/// | `NotFound` | 404 |
/// | `RateLimit` | 429 |
/// | `Server` | 5xx |
/// | `Http` | anything else |
///
/// Each HTTP variant keeps the raw response payload for diagnostics.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The credentials were rejected (401).
    #[error("{message}")]
    Authentication {
        message: String,
        response: Option<Value>,
    },

    /// The request was rejected as invalid (400).
    #[error("{message}")]
    Validation {
        message: String,
        /// Per-field messages, when the server reports them.
        fields: Option<FieldErrors>,
        response: Option<Value>,
    },

    /// The resource does not exist (404).
    #[error("{message}")]
    NotFound {
        message: String,
        response: Option<Value>,
    },

    /// Too many requests (429).
    #[error("{message}")]
    RateLimit {
        message: String,
        response: Option<Value>,
    },

    /// The server failed (5xx).
    #[error("{message}")]
    Server {
        status: u16,
        message: String,
        response: Option<Value>,
    },

    /// Any other non-success status.
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        response: Option<Value>,
    },

    /// Connection, TLS or timeout failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response body did not match the expected model.
    #[error("Could not decode the response of {operation}: {source}")]
    Decode {
        operation: String,
        source: serde_json::Error,
    },

    /// The client configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A resource or bespoke operation is not present in the operation table.
    #[error("Operation '{operation}' is missing from the operation table")]
    MissingOperation { operation: String },

    /// A path template placeholder has no value.
    #[error("Operation '{operation}' requires path parameter '{param}'")]
    MissingPathParam { operation: String, param: String },

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Validation,
    NotFound,
    RateLimit,
    Server,
    Http,
    Network,
    Decode,
    Config,
    Contract,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authentication => "authentication",
            Self::Validation => "validation",
            Self::NotFound => "not found",
            Self::RateLimit => "rate limit",
            Self::Server => "server",
            Self::Http => "http",
            Self::Network => "network",
            Self::Decode => "decode",
            Self::Config => "configuration",
            Self::Contract => "contract",
        };
        f.write_str(name)
    }
}

impl ApiError {
    /// Builds the error matching an HTTP failure.
    ///
    /// `message` defaults to `"HTTP {status}: {status_text}"`. The payload is
    /// attached as-is; for 400 responses an `errors` (or `fields`) object is
    /// read into the `fields` map of [`ApiError::Validation`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use listmonk_ops::api::common::{ApiError, ResponseInfo};
    ///
    /// let err = ApiError::from_response(&ResponseInfo::new(404, "Not Found"), None, None);
    /// assert!(matches!(err, ApiError::NotFound { .. }));
    /// assert_eq!(err.to_string(), "HTTP 404: Not Found");
    /// ```
    pub fn from_response(
        response: &ResponseInfo,
        message: Option<String>,
        data: Option<Value>,
    ) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {}: {}", response.status, response.status_text));

        match response.status {
            400 => Self::Validation {
                message,
                fields: data.as_ref().and_then(field_errors),
                response: data,
            },
            401 => Self::Authentication {
                message,
                response: data,
            },
            404 => Self::NotFound {
                message,
                response: data,
            },
            429 => Self::RateLimit {
                message,
                response: data,
            },
            500..=599 => Self::Server {
                status: response.status,
                message,
                response: data,
            },
            status => Self::Http {
                status,
                message,
                response: data,
            },
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::RateLimit { .. } => ErrorKind::RateLimit,
            Self::Server { .. } => ErrorKind::Server,
            Self::Http { .. } => ErrorKind::Http,
            Self::Network(_) => ErrorKind::Network,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Config(_) => ErrorKind::Config,
            Self::MissingOperation { .. }
            | Self::MissingPathParam { .. }
            | Self::InvalidRequest(_) => ErrorKind::Contract,
        }
    }

    /// HTTP status code, for errors built from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::Validation { .. } => Some(400),
            Self::NotFound { .. } => Some(404),
            Self::RateLimit { .. } => Some(429),
            Self::Server { status, .. } | Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response payload, for errors built from a response.
    pub fn response_data(&self) -> Option<&Value> {
        match self {
            Self::Authentication { response, .. }
            | Self::Validation { response, .. }
            | Self::NotFound { response, .. }
            | Self::RateLimit { response, .. }
            | Self::Server { response, .. }
            | Self::Http { response, .. } => response.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if `err`, or any error in its source chain, is an
    /// [`ApiError`].
    ///
    /// ```rust
    /// use listmonk_ops::api::common::ApiError;
    ///
    /// let err = anyhow::Error::new(ApiError::InvalidRequest("bad".into())).context("while listing");
    /// assert!(ApiError::is_api_error(&*err));
    ///
    /// let io = std::io::Error::other("disk");
    /// assert!(!ApiError::is_api_error(&io));
    /// ```
    pub fn is_api_error(err: &(dyn std::error::Error + 'static)) -> bool {
        Self::find(err).is_some()
    }

    /// [`ApiError::is_api_error`] for `anyhow` errors, checking every context
    /// layer.
    pub fn is_api_error_anyhow(err: &anyhow::Error) -> bool {
        err.chain().any(|e| e.downcast_ref::<ApiError>().is_some())
    }

    /// Finds the first [`ApiError`] in the source chain of `err`.
    fn find<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a ApiError> {
        std::iter::successors(Some(err), |e| e.source()).find_map(|e| e.downcast_ref::<ApiError>())
    }
}

/// Extracts a human readable message from a listmonk error body.
///
/// listmonk answers failures with `{"message": "..."}`; proxies in front of
/// it sometimes use `{"error": "..."}` or `{"error": {"message": "..."}}`.
pub fn error_message(body: &Value) -> Option<String> {
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    match body.get("error") {
        Some(Value::String(message)) => Some(message.clone()),
        Some(error) => error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        None => body.as_str().map(str::to_string).filter(|s| !s.is_empty()),
    }
}

fn field_errors(body: &Value) -> Option<FieldErrors> {
    let object = body
        .get("errors")
        .or_else(|| body.get("fields"))?
        .as_object()?;

    let fields: FieldErrors = object
        .iter()
        .map(|(field, messages)| {
            let messages = match messages {
                Value::Array(items) => items
                    .iter()
                    .map(|m| m.as_str().map_or_else(|| m.to_string(), str::to_string))
                    .collect(),
                Value::String(message) => vec![message.clone()],
                other => vec![other.to_string()],
            };
            (field.clone(), messages)
        })
        .collect();

    (!fields.is_empty()).then_some(fields)
}

/// Diagnostics about the request behind a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestInfo {
    /// Operation table name, e.g. `getListById`.
    pub operation: String,
    pub method: String,
    pub url: String,
}

/// Diagnostics about the HTTP response behind a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseInfo {
    pub status: u16,
    pub status_text: String,
}

impl ResponseInfo {
    pub fn new(status: u16, status_text: &str) -> Self {
        Self {
            status,
            status_text: status_text.to_string(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<StatusCode> for ResponseInfo {
    fn from(status: StatusCode) -> Self {
        Self::new(status.as_u16(), status.canonical_reason().unwrap_or(""))
    }
}

/// The canonical successful result of every façade call.
///
/// `data` is the payload after normalization. Keys that sat next to `data` in
/// the upstream envelope (typically `message`) are kept in `meta`.
/// `request` and `response` are for diagnostics only.
///
/// # Example
///
/// ```rust,no_run
/// use listmonk_ops::{Config, ListmonkClient};
///
/// # async fn example() -> Result<(), listmonk_ops::ApiError> {
/// let client = ListmonkClient::new(Config::new("http://localhost:9000/api", "api-admin", "token"))?;
/// let page = client.lists().list(None).await?;
/// println!("{} lists (HTTP {})", page.data.total, page.response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    /// Normalized payload.
    pub data: T,

    /// Sibling keys hoisted by normalization.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,

    pub request: RequestInfo,
    pub response: ResponseInfo,
}

impl<T> Envelope<T> {
    /// Transforms the payload, keeping diagnostics.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Envelope<U> {
        Envelope {
            data: f(self.data),
            meta: self.meta,
            request: self.request,
            response: self.response,
        }
    }

    /// The `message` hoisted from the upstream envelope, if any.
    pub fn message(&self) -> Option<&str> {
        self.meta.get("message").and_then(Value::as_str)
    }
}

impl Envelope<Value> {
    /// Deserializes the payload into a typed model.
    ///
    /// # Errors
    ///
    /// [`ApiError::Decode`] naming the operation when the payload does not
    /// match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Envelope<T>, ApiError> {
        let Envelope {
            data,
            meta,
            request,
            response,
        } = self;

        let data = serde_json::from_value(data).map_err(|source| ApiError::Decode {
            operation: request.operation.clone(),
            source,
        })?;

        Ok(Envelope {
            data,
            meta,
            request,
            response,
        })
    }
}

/// An upstream refusal returned as data by `get_by_id` and `update`.
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    /// Upstream HTTP status.
    pub status: u16,
    pub message: String,
    /// Raw error payload.
    pub error: Value,
    pub request: RequestInfo,
    pub response: ResponseInfo,
}

impl Rejection {
    /// Whether the server reported the entity as missing.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Converts the rejection into the matching [`ApiError`].
    pub fn into_error(self) -> ApiError {
        ApiError::from_response(&self.response, Some(self.message), Some(self.error))
    }
}

/// Result of a single-entity fetch or update.
///
/// "Not found" and other upstream refusals are a first-class outcome here:
/// callers match on the variant instead of handling an error.
#[derive(Debug, Clone)]
pub enum CrudResult<T> {
    /// The server returned the entity.
    Found(Envelope<T>),
    /// The server refused the request.
    Rejected(Rejection),
}

impl<T> CrudResult<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The envelope, discarding a rejection.
    pub fn found(self) -> Option<Envelope<T>> {
        match self {
            Self::Found(envelope) => Some(envelope),
            Self::Rejected(_) => None,
        }
    }

    /// Folds a rejection into the error channel.
    pub fn into_result(self) -> Result<Envelope<T>, ApiError> {
        match self {
            Self::Found(envelope) => Ok(envelope),
            Self::Rejected(rejection) => Err(rejection.into_error()),
        }
    }
}

impl CrudResult<Value> {
    /// Deserializes a found payload into a typed model.
    pub fn decode<T: DeserializeOwned>(self) -> Result<CrudResult<T>, ApiError> {
        match self {
            Self::Found(envelope) => envelope.decode().map(CrudResult::Found),
            Self::Rejected(rejection) => Ok(CrudResult::Rejected(rejection)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(code: u16) -> ResponseInfo {
        let text = StatusCode::from_u16(code)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("");
        ResponseInfo::new(code, text)
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ApiError::from_response(&status(401), None, None),
            ApiError::Authentication { .. }
        ));
        assert!(matches!(
            ApiError::from_response(&status(400), None, None),
            ApiError::Validation { .. }
        ));
        assert!(matches!(
            ApiError::from_response(&status(404), None, None),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            ApiError::from_response(&status(429), None, None),
            ApiError::RateLimit { .. }
        ));
        assert!(matches!(
            ApiError::from_response(&status(418), None, None),
            ApiError::Http { status: 418, .. }
        ));
    }

    #[test]
    fn test_server_errors_keep_status() {
        for code in [500, 502] {
            let err = ApiError::from_response(&status(code), None, None);
            assert!(matches!(err, ApiError::Server { status, .. } if status == code));
            assert_eq!(err.status(), Some(code));
            assert_eq!(err.kind(), ErrorKind::Server);
        }
    }

    #[test]
    fn test_default_message_uses_status_text() {
        let err = ApiError::from_response(&status(502), None, None);
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err = ApiError::from_response(&status(404), Some("List not found".into()), None);
        assert_eq!(err.to_string(), "List not found");
    }

    #[test]
    fn test_payload_is_attached() {
        let body = json!({"message": "nope"});
        let err = ApiError::from_response(&status(418), None, Some(body.clone()));
        assert_eq!(err.response_data(), Some(&body));
    }

    #[test]
    fn test_validation_fields_are_parsed() {
        let body = json!({
            "message": "invalid fields",
            "errors": {"email": ["is required", "must be valid"], "name": "too long"}
        });
        let err = ApiError::from_response(&status(400), error_message(&body), Some(body));
        match err {
            ApiError::Validation { fields: Some(fields), message, .. } => {
                assert_eq!(message, "invalid fields");
                assert_eq!(fields["email"], vec!["is required", "must be valid"]);
                assert_eq!(fields["name"], vec!["too long"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_message_formats() {
        assert_eq!(error_message(&json!({"message": "a"})), Some("a".into()));
        assert_eq!(error_message(&json!({"error": "b"})), Some("b".into()));
        assert_eq!(
            error_message(&json!({"error": {"message": "c"}})),
            Some("c".into())
        );
        assert_eq!(error_message(&json!("plain text")), Some("plain text".into()));
        assert_eq!(error_message(&json!({"data": 1})), None);
    }

    #[test]
    fn test_is_api_error_predicate() {
        let err = ApiError::MissingOperation {
            operation: "getLists".into(),
        };
        assert!(ApiError::is_api_error(&err));

        let wrapped = anyhow::Error::new(err).context("building client");
        assert!(ApiError::is_api_error(&*wrapped));
        assert!(ApiError::is_api_error_anyhow(&wrapped));

        let other = anyhow::anyhow!("unrelated");
        assert!(!ApiError::is_api_error(&*other));
        assert!(!ApiError::is_api_error_anyhow(&other));
    }

    #[test]
    fn test_rejection_converts_to_typed_error() {
        let rejection = Rejection {
            status: 404,
            message: "Subscriber not found".into(),
            error: json!({"message": "Subscriber not found"}),
            request: RequestInfo {
                operation: "getSubscriberById".into(),
                method: "GET".into(),
                url: "http://localhost:9000/api/subscribers/9".into(),
            },
            response: status(404),
        };
        assert!(rejection.is_not_found());
        let err = CrudResult::<Value>::Rejected(rejection).into_result().unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
