//
//  listmonk-ops
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # listmonk-ops
//!
//! A resource-oriented client for the [listmonk](https://listmonk.app) REST
//! API, and the `lmk` command-line tool built on it.
//!
//! ## Overview
//!
//! The client turns listmonk's operation table into namespaces. Each entity
//! namespace (lists, subscribers, campaigns, templates, media) gets the same
//! five operations (`create`, `list`, `get_by_id`, `update`, `delete`);
//! bespoke operations such as `campaigns().update_status()` or
//! `subscribers().blocklist()` sit next to them. Service namespaces
//! (import, bounces, transactional, settings, dashboard, system) only carry
//! bespoke operations.
//!
//! Every call returns an [`Envelope`](api::common::Envelope): the payload
//! with listmonk's `{"data": ...}` wrapper removed, plus request and
//! response diagnostics. Single-entity reads and updates return a
//! [`CrudResult`](api::common::CrudResult) so "not found" can be handled as
//! data.
//!
//! ## Module Structure
//!
//! - [`api`]: Client, operation table, dispatch, namespaces and errors
//! - [`config`]: Connection settings from arguments and `LISTMONK_*` variables
//! - [`cli`]: The `lmk` command definitions
//! - [`output`]: JSON and table rendering for the CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use listmonk_ops::{Config, ListmonkClient};
//!
//! # async fn example() -> Result<(), listmonk_ops::ApiError> {
//! let client = ListmonkClient::new(Config::new(
//!     "http://localhost:9000/api",
//!     "api-admin",
//!     "secret-token",
//! ))?;
//!
//! let lists = client.lists().list(None).await?;
//! for list in &lists.data.results {
//!     println!("{} {}", list.id, list.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `LISTMONK_API_URL` | API root, e.g. `http://localhost:9000/api` |
//! | `LISTMONK_USERNAME` | API user name |
//! | `LISTMONK_API_TOKEN` | API token |
//! | `LISTMONK_TIMEOUT` | Request timeout in milliseconds |
//! | `LISTMONK_RETRIES` | Retry count, carried in the configuration |
//! | `LISTMONK_HEADERS` | Extra headers as a JSON object |

/// HTTP client, operation table and resource namespaces.
pub mod api;

/// `lmk` command definitions.
pub mod cli;

/// Client configuration.
pub mod config;

/// Output formatting for the CLI.
pub mod output;

pub use api::{ApiError, ListmonkClient};
pub use cli::Cli;
pub use config::Config;

/// Binary name, used in completion scripts and `lmk version`.
pub const APP_NAME: &str = "lmk";

/// Crate version, sent in the `User-Agent` header.
///
/// ```rust
/// use listmonk_ops::VERSION;
///
/// println!("lmk version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes of the `lmk` binary.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication issues
/// - `8-15`: Resource issues
/// - `32+`: Server throttling
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments; reported by clap.
    pub const USAGE: i32 = 2;

    /// The server rejected the credentials (HTTP 401).
    pub const AUTH_ERROR: i32 = 4;

    /// The requested entity does not exist (HTTP 404).
    pub const NOT_FOUND: i32 = 8;

    /// The server is throttling requests (HTTP 429).
    pub const RATE_LIMIT: i32 = 32;
}
