//
//  listmonk-ops
//  cli/args.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Argument groups shared by several commands.
//!
//! Request bodies are assembled from `-F key=value` (typed), `-f key=value`
//! (always a string) and `--input FILE` (a JSON document, `-` for stdin).
//! Dotted keys build nested objects:
//!
//! ```text
//! lmk subscribers create -F email=ada@example.com -F name=Ada \
//!     -F 'lists=[1,2]' -F attribs.city=Harare
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::{Map, Value};

use crate::api::options::CallOptions;

/// Body built from fields and/or a JSON file.
#[derive(Args, Debug, Clone, Default)]
pub struct BodyArgs {
    /// Typed field as KEY=VALUE (true/false/null/numbers/JSON are parsed)
    #[arg(long = "field", short = 'F', value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// String field as KEY=VALUE
    #[arg(long = "raw-field", short = 'f', value_name = "KEY=VALUE")]
    pub raw_fields: Vec<String>,

    /// JSON body file; `-` reads stdin. Fields are applied on top.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

impl BodyArgs {
    /// The assembled body, or `None` when nothing was given.
    pub fn body(&self) -> Result<Option<Value>> {
        let mut body = match &self.input {
            Some(path) => Some(read_json(path)?),
            None => None,
        };

        if self.fields.is_empty() && self.raw_fields.is_empty() {
            return Ok(body);
        }

        let mut object = match body.take() {
            Some(Value::Object(map)) => map,
            Some(_) => bail!("--input must hold a JSON object when combined with fields"),
            None => Map::new(),
        };
        for field in &self.fields {
            let (key, value) = parse_field(field)?;
            set_nested_value(&mut object, &key, value);
        }
        for field in &self.raw_fields {
            let (key, value) = parse_raw_field(field)?;
            set_nested_value(&mut object, &key, Value::String(value));
        }

        Ok(Some(Value::Object(object)))
    }

    /// Like [`BodyArgs::body`], failing when nothing was given.
    pub fn require(&self) -> Result<Value> {
        self.body()?
            .context("A request body is required: pass -F KEY=VALUE fields or --input FILE")
    }
}

/// Pagination and filter arguments of list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Page number
    #[arg(long, short = 'p')]
    pub page: Option<u64>,

    /// Results per page; `all` for every record
    #[arg(long)]
    pub per_page: Option<String>,

    /// Extra query parameter as KEY=VALUE (repeatable)
    #[arg(long = "param", short = 'P', value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

impl PageArgs {
    pub fn options(&self) -> Result<CallOptions> {
        let mut options = CallOptions::new();
        for param in &self.params {
            let (key, value) = parse_field(param)?;
            options = options.query(key, value);
        }
        if let Some(page) = self.page {
            options = options.query("page", page);
        }
        if let Some(per_page) = &self.per_page {
            let value = per_page
                .parse::<u64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(per_page.clone()));
            options = options.query("per_page", value);
        }
        Ok(options)
    }
}

/// Parses `KEY=VALUE`, reading the value as JSON where it looks like JSON.
pub fn parse_field(field: &str) -> Result<(String, Value)> {
    let (key, value_str) = parse_raw_field(field)?;

    let value = if value_str == "true" {
        Value::Bool(true)
    } else if value_str == "false" {
        Value::Bool(false)
    } else if value_str == "null" {
        Value::Null
    } else if let Ok(n) = value_str.parse::<i64>() {
        Value::Number(n.into())
    } else if let Ok(n) = value_str.parse::<f64>() {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(value_str.clone()))
    } else if value_str.starts_with('[') || value_str.starts_with('{') {
        serde_json::from_str(&value_str).unwrap_or_else(|_| Value::String(value_str.clone()))
    } else {
        Value::String(value_str)
    };

    Ok((key, value))
}

/// Splits `KEY=VALUE` at the first `=`.
pub fn parse_raw_field(field: &str) -> Result<(String, String)> {
    match field.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => bail!("Invalid field format: {}. Expected key=value", field),
    }
}

/// Inserts `value` at a dotted `key`, creating intermediate objects.
pub fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}

fn read_json(path: &PathBuf) -> Result<Value> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        text
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}
