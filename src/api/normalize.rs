//
//  listmonk-ops
//  api/normalize.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Normalization
//!
//! listmonk wraps every payload in `{"data": ...}`, and the client wraps the
//! decoded body in its own envelope again. Some endpoints add a third layer.
//! [`flatten`] collapses any depth of `data.data` nesting into one envelope.
//!
//! ## Algorithm
//!
//! While the value is an object whose `data` is an object that itself has a
//! `data` key:
//!
//! 1. Copy the outer object.
//! 2. Replace `data` with the inner `data.data`.
//! 3. Take the inner `message` whenever the key is present, null included.
//! 4. Copy every other inner key over the outer keys.
//!
//! Inner keys win on conflict: the innermost envelope is the real payload.
//!
//! ## Example
//!
//! ```rust
//! use listmonk_ops::api::normalize::flatten;
//! use serde_json::json;
//!
//! let wrapped = json!({"data": {"data": {"id": 1}, "message": "ok"}});
//! assert_eq!(flatten(&wrapped), json!({"data": {"id": 1}, "message": "ok"}));
//! ```

use serde_json::{Map, Value};

/// Collapses nested `data.data` envelopes.
///
/// Non-objects (null, booleans, numbers, strings and arrays) are returned
/// unchanged and arrays are never descended into. The input is not modified
/// and `flatten(&flatten(x)) == flatten(x)`.
pub fn flatten(value: &Value) -> Value {
    let mut current = match flatten_once(value) {
        Some(next) => next,
        None => return value.clone(),
    };

    while let Some(next) = flatten_once(&current) {
        current = next;
    }

    current
}

/// Returns `true` when `value` still contains a `data.data` layer.
pub fn is_nested(value: &Value) -> bool {
    nested_parts(value).is_some()
}

fn nested_parts(value: &Value) -> Option<(&Map<String, Value>, &Map<String, Value>)> {
    let outer = value.as_object()?;
    let inner = outer.get("data")?.as_object()?;
    inner.contains_key("data").then_some((outer, inner))
}

fn flatten_once(value: &Value) -> Option<Value> {
    let (outer, inner) = nested_parts(value)?;

    let mut merged = outer.clone();
    for (key, inner_value) in inner {
        merged.insert(key.clone(), inner_value.clone());
    }

    Some(Value::Object(merged))
}
