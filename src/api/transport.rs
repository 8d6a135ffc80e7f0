//
//  listmonk-ops
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The only part of the client that performs I/O. The dispatcher hands a
//! fully built [`ApiRequest`] to a [`Transport`] and gets a [`RawResponse`]
//! back; status interpretation happens afterwards, in the dispatcher.
//!
//! ## Features
//!
//! - Authentication and custom headers applied once, as client defaults
//! - Request timeout taken from [`Config::timeout`]
//! - JSON and multipart request bodies
//! - Non-JSON response bodies kept as strings
//!
//! Non-2xx statuses are *not* errors at this layer. Only connection-level
//! failures return `Err`.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use super::common::ApiError;
use super::operations::HttpMethod;
use crate::config::{Config, ConfigError};

/// A file attached to a multipart request.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name, e.g. `file`.
    pub field: String,
    pub file_name: String,
    /// MIME type; guessed by the server when absent.
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Reads a file from disk into a `file` form field.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            ApiError::InvalidRequest(format!("cannot read {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self {
            field: "file".to_string(),
            file_name,
            mime: None,
            bytes,
        })
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// A multipart form: text fields plus one file.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    pub fields: BTreeMap<String, String>,
    pub file: FilePart,
}

impl MultipartBody {
    pub fn new(file: FilePart) -> Self {
        Self {
            fields: BTreeMap::new(),
            file,
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// Request payload.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Value),
    Multipart(MultipartBody),
}

/// A request ready to be sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Name of the operation being called.
    pub operation: &'static str,
    pub method: HttpMethod,
    pub url: Url,
    /// Per-call headers, on top of the transport defaults.
    pub headers: BTreeMap<String, String>,
    pub body: Option<RequestBody>,
}

/// What came back, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    /// Decoded JSON body; a string for non-JSON bodies, `null` when empty.
    pub body: Value,
}

impl RawResponse {
    pub fn new(status: u16, body: Value) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
            .to_string();
        Self {
            status,
            status_text,
            body,
        }
    }
}

/// Sends requests to the server.
///
/// Implementations must be stateless per call so one transport can serve
/// concurrent callers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one HTTP exchange.
    ///
    /// # Errors
    ///
    /// Only for failures where no response was received.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Builds a transport from a validated configuration.
    ///
    /// The headers from [`Config::to_headers`] become client defaults and
    /// [`Config::timeout`] becomes the request timeout.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("lmk/{}", crate::VERSION))
            .timeout(config.timeout)
            .default_headers(header_map(&config.to_headers())?)
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        debug!(
            operation = request.operation,
            method = %request.method,
            url = %request.url,
            "sending request"
        );

        let mut builder = self
            .http
            .request(request.method.into(), request.url)
            .headers(header_map(&request.headers)?);

        builder = match request.body {
            Some(RequestBody::Json(body)) => builder.json(&body),
            Some(RequestBody::Multipart(body)) => builder.multipart(multipart_form(body)?),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        trace!(status = status.as_u16(), bytes = text.len(), "received response");

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body: parse_body(&text),
        })
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn multipart_form(body: MultipartBody) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, value) in body.fields {
        form = form.text(name, value);
    }

    let mut part = Part::bytes(body.file.bytes).file_name(body.file.file_name);
    if let Some(mime) = &body.file.mime {
        part = part
            .mime_str(mime)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid MIME type '{mime}': {e}")))?;
    }

    Ok(form.part(body.file.field, part))
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, ApiError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let invalid = |reason: String| {
            ApiError::Config(ConfigError::InvalidHeaders {
                source_name: format!("header '{name}'"),
                reason,
            })
        };
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
        map.insert(name, value);
    }
    Ok(map)
}
