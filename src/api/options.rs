//
//  listmonk-ops
//  api/options.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Per-call options.
//!
//! [`CallOptions`] is what callers pass to every façade operation: path
//! parameters, query parameters, a body and extra headers. Transport wiring
//! (base URL, authentication, timeout) never appears here.
//!
//! ```rust
//! use listmonk_ops::api::options::CallOptions;
//! use serde_json::json;
//!
//! let options = CallOptions::new()
//!     .id(3)
//!     .query("per_page", 50)
//!     .json(json!({"name": "Weekly"}));
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::transport::{MultipartBody, RequestBody};
use crate::config::merge_headers;

/// Path, query, body and headers for one call.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Values for `{param}` placeholders in the path template.
    pub path: Map<String, Value>,
    /// Query parameters. Arrays become repeated keys; `null` is skipped.
    pub query: Map<String, Value>,
    pub body: Option<RequestBody>,
    pub headers: BTreeMap<String, String>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `{id}` path parameter.
    pub fn id(self, id: impl Into<Value>) -> Self {
        self.path("id", id)
    }

    pub fn path(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Sets a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Sets a multipart body.
    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = Some(RequestBody::Multipart(body));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        merge_headers(&mut self.headers, [(name.into(), value.into())]);
        self
    }

    /// Layers `caller` on top of these base options.
    ///
    /// Path, query and header maps merge key by key with the caller winning.
    /// Two JSON object bodies merge the same way; any other caller body
    /// replaces the base body.
    pub fn merged(&self, caller: CallOptions) -> CallOptions {
        let mut merged = self.clone();
        merged.path.extend(caller.path);
        merged.query.extend(caller.query);
        merge_headers(&mut merged.headers, caller.headers);

        merged.body = match (merged.body.take(), caller.body) {
            (Some(RequestBody::Json(Value::Object(mut base))), Some(RequestBody::Json(Value::Object(over)))) => {
                base.extend(over);
                Some(RequestBody::Json(Value::Object(base)))
            }
            (base, None) => base,
            (_, over) => over,
        };

        merged
    }
}
