//
//  listmonk-ops
//  api/dispatch.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Call Dispatch
//!
//! [`Dispatcher`] is shared by every namespace of the client. For each call it:
//!
//! 1. merges the base [`CallOptions`] with the caller's options,
//! 2. expands the operation's path template and query into a URL,
//! 3. sends the request through the [`Transport`],
//! 4. normalizes the body with [`flatten`] into an [`Envelope`].
//!
//! Status handling depends on the operation kind: [`Dispatcher::envelope`]
//! turns a non-2xx answer into an [`ApiError`], [`Dispatcher::crud`] returns it
//! as [`CrudResult::Rejected`].

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use super::common::{error_message, ApiError, CrudResult, Envelope, Rejection, RequestInfo, ResponseInfo};
use super::normalize::flatten;
use super::operations::{Operation, OperationTable};
use super::options::CallOptions;
use super::transport::{ApiRequest, RawResponse, Transport};

/// Shared, immutable call machinery. Cloning is cheap.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

struct Inner {
    base_url: Url,
    table: OperationTable,
    transport: Arc<dyn Transport>,
    base: CallOptions,
}

/// A sent request and its raw answer.
struct Exchange {
    request: RequestInfo,
    response: ResponseInfo,
    body: Value,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.inner.base_url.as_str())
            .field("operations", &self.inner.table.len())
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(
        base_url: Url,
        table: OperationTable,
        transport: Arc<dyn Transport>,
        base: CallOptions,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                base_url,
                table,
                transport,
                base,
            }),
        }
    }

    /// Resolves an operation by name.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingOperation`] when the table has no such entry.
    pub fn bind(&self, name: &str) -> Result<Operation, ApiError> {
        self.inner.table.resolve(name)
    }

    /// Builds the request for `operation` without sending it.
    pub fn prepare(&self, operation: &Operation, options: CallOptions) -> Result<ApiRequest, ApiError> {
        let options = self.inner.base.merged(options);
        let url = build_url(&self.inner.base_url, operation, &options)?;

        Ok(ApiRequest {
            operation: operation.name,
            method: operation.method,
            url,
            headers: options.headers,
            body: options.body,
        })
    }

    /// Calls an operation whose failures are errors.
    ///
    /// # Errors
    ///
    /// The [`ApiError`] matching the status for non-2xx answers, plus
    /// transport and request-building errors.
    pub async fn envelope(
        &self,
        operation: &Operation,
        options: CallOptions,
    ) -> Result<Envelope<Value>, ApiError> {
        let exchange = self.exchange(operation, options).await?;

        if !exchange.response.is_success() {
            warn!(
                operation = operation.name,
                status = exchange.response.status,
                "request failed"
            );
            let message = error_message(&exchange.body);
            return Err(ApiError::from_response(
                &exchange.response,
                message,
                Some(exchange.body),
            ));
        }

        Ok(exchange.into_envelope())
    }

    /// [`Dispatcher::envelope`] followed by decoding into `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        operation: &Operation,
        options: CallOptions,
    ) -> Result<Envelope<T>, ApiError> {
        self.envelope(operation, options).await?.decode()
    }

    /// Calls a single-entity operation whose refusals are data.
    ///
    /// # Errors
    ///
    /// Only transport and request-building errors; non-2xx answers become
    /// [`CrudResult::Rejected`].
    pub async fn crud(
        &self,
        operation: &Operation,
        options: CallOptions,
    ) -> Result<CrudResult<Value>, ApiError> {
        let exchange = self.exchange(operation, options).await?;

        if !exchange.response.is_success() {
            debug!(
                operation = operation.name,
                status = exchange.response.status,
                "request rejected"
            );
            let message = error_message(&exchange.body).unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    exchange.response.status, exchange.response.status_text
                )
            });
            return Ok(CrudResult::Rejected(Rejection {
                status: exchange.response.status,
                message,
                error: exchange.body,
                request: exchange.request,
                response: exchange.response,
            }));
        }

        Ok(CrudResult::Found(exchange.into_envelope()))
    }

    async fn exchange(&self, operation: &Operation, options: CallOptions) -> Result<Exchange, ApiError> {
        let request = self.prepare(operation, options)?;
        let info = RequestInfo {
            operation: request.operation.to_string(),
            method: request.method.to_string(),
            url: request.url.to_string(),
        };

        let RawResponse {
            status,
            status_text,
            body,
        } = self.inner.transport.send(request).await?;

        Ok(Exchange {
            request: info,
            response: ResponseInfo {
                status,
                status_text,
            },
            body,
        })
    }
}

impl Exchange {
    fn into_envelope(self) -> Envelope<Value> {
        let mut wrapped = Map::new();
        wrapped.insert("data".to_string(), self.body);

        let mut meta = match flatten(&Value::Object(wrapped)) {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        let data = meta.remove("data").unwrap_or(Value::Null);

        Envelope {
            data,
            meta,
            request: self.request,
            response: self.response,
        }
    }
}

fn build_url(base: &Url, operation: &Operation, options: &CallOptions) -> Result<Url, ApiError> {
    let mut url = base.clone();

    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            ApiError::InvalidRequest(format!("base URL '{base}' cannot carry a path"))
        })?;
        segments.pop_if_empty();

        for segment in operation.path.trim_start_matches('/').split('/') {
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(param) => {
                    let value = options
                        .path
                        .get(param)
                        .and_then(scalar)
                        .ok_or_else(|| ApiError::MissingPathParam {
                            operation: operation.name.to_string(),
                            param: param.to_string(),
                        })?;
                    segments.push(&value);
                }
                None => {
                    segments.push(segment);
                }
            }
        }
    }

    let pairs: Vec<(&str, String)> = options
        .query
        .iter()
        .flat_map(|(name, value)| match value {
            Value::Array(items) => items
                .iter()
                .filter_map(scalar)
                .map(|v| (name.as_str(), v))
                .collect::<Vec<_>>(),
            other => scalar(other)
                .map(|v| vec![(name.as_str(), v)])
                .unwrap_or_default(),
        })
        .collect();

    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(url)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operations::HttpMethod;
    use serde_json::json;

    fn op(path: &'static str) -> Operation {
        Operation::new("testOperation", HttpMethod::Get, path)
    }

    fn base() -> Url {
        Url::parse("http://localhost:9000/api").unwrap()
    }

    #[test]
    fn test_build_url_expands_path() {
        let url = build_url(&base(), &op("/lists/{id}"), &CallOptions::new().id(42)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/lists/42");
    }

    #[test]
    fn test_build_url_handles_trailing_slash() {
        let base = Url::parse("http://localhost:9000/api/").unwrap();
        let url = build_url(&base, &op("/lists"), &CallOptions::new()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/lists");
    }

    #[test]
    fn test_build_url_encodes_path_values() {
        let options = CallOptions::new().path("type", "a/b c");
        let url = build_url(&base(), &op("/campaigns/analytics/{type}"), &options).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/campaigns/analytics/a%2Fb%20c");
    }

    #[test]
    fn test_build_url_query() {
        let options = CallOptions::new()
            .query("id", json!([1, 2]))
            .query("page", 3)
            .query("skip", Value::Null);
        let url = build_url(&base(), &op("/bounces"), &options).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/bounces?id=1&id=2&page=3");
    }

    #[test]
    fn test_build_url_missing_param() {
        let err = build_url(&base(), &op("/lists/{id}"), &CallOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingPathParam { ref param, .. } if param == "id"
        ));
    }

    #[test]
    fn test_envelope_hoists_siblings() {
        let exchange = Exchange {
            request: RequestInfo {
                operation: "getListById".into(),
                method: "GET".into(),
                url: "http://localhost:9000/api/lists/1".into(),
            },
            response: ResponseInfo::new(200, "OK"),
            body: json!({"data": {"id": 1}, "message": "ok"}),
        };
        let envelope = exchange.into_envelope();
        assert_eq!(envelope.data, json!({"id": 1}));
        assert_eq!(envelope.message(), Some("ok"));
    }
}
