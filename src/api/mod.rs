//
//  listmonk-ops
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # listmonk API Façade
//!
//! This module turns listmonk's flat, inconsistently shaped endpoint list
//! into a resource-oriented client with one canonical response shape.
//!
//! ## Architecture
//!
//! ```text
//! ListmonkClient ──► namespaces (lists, subscribers, ..., system)
//!                        │
//!                        ▼
//!                    Dispatcher ──► OperationTable (name → method + path)
//!                        │
//!                        ├──► Transport (reqwest)
//!                        │
//!                        └──► normalize::flatten ──► Envelope<T>
//! ```
//!
//! ## Modules
//!
//! - [`client`]: The [`ListmonkClient`] assembler and its builder
//! - [`resource`]: Generic create/list/get/update/delete binding
//! - [`resources`]: Lists, subscribers, campaigns, templates and media
//! - [`services`]: Import, bounces, transactional, settings, dashboard, system
//! - [`operations`]: The static operation table
//! - [`options`]: Per-call options
//! - [`normalize`]: Response envelope flattening
//! - [`transport`]: HTTP transport
//! - [`common`]: Envelopes, pagination and errors
//!
//! ## Error Handling
//!
//! Failures are [`ApiError`] variants mapped from HTTP status codes:
//!
//! - `Authentication`: 401 Unauthorized
//! - `Validation`: 400 Bad Request
//! - `NotFound`: 404 Not Found
//! - `RateLimit`: 429 Too Many Requests
//! - `Server`: 5xx Server Errors
//! - `Http`: any other non-2xx status
//!
//! `get_by_id` and `update` are the exception: they report an upstream
//! refusal as [`common::CrudResult::Rejected`].

/// Client assembly.
pub mod client;

/// Shared response and error types.
pub mod common;

/// Per-call dispatch: URL building, sending and normalization.
pub mod dispatch;

/// Response envelope flattening.
pub mod normalize;

/// The listmonk operation table.
pub mod operations;

/// Per-call options.
pub mod options;

/// Generic resource operations.
pub mod resource;

/// Resource namespaces.
pub mod resources;

/// Non-resource namespaces.
pub mod services;

/// HTTP transport.
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ClientBuilder, ListmonkClient};
pub use common::{ApiError, CrudResult, Envelope, ErrorKind, Page, PagedEnvelope};
pub use options::CallOptions;
pub use resource::Resource;
