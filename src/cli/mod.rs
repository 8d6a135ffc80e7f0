//
//  listmonk-ops
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod args;
mod bounces;
mod campaigns;
mod completion;
mod crud;
mod dashboard;
mod import;
mod lists;
mod media;
mod settings;
mod subscribers;
mod system;
mod templates;
mod tx;

pub use bounces::BouncesCommand;
pub use campaigns::CampaignsCommand;
pub use completion::CompletionCommand;
pub use dashboard::DashboardCommand;
pub use import::ImportCommand;
pub use lists::ListsCommand;
pub use media::MediaCommand;
pub use settings::SettingsCommand;
pub use subscribers::SubscribersCommand;
pub use system::SystemCommand;
pub use templates::TemplatesCommand;
pub use tx::TxCommand;

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::common::{ApiError, ErrorKind};
use crate::api::ListmonkClient;
use crate::config::{Config, ConfigOverrides};
use crate::exit_codes;
use crate::output::{OutputFormat, OutputWriter};

/// lmk - Operate a listmonk server from the command line
#[derive(Parser, Debug)]
#[command(
    name = "lmk",
    version,
    about = "Operate a listmonk server from the command line",
    long_about = "lmk manages lists, subscribers, campaigns, templates, media and the rest of a \
                  listmonk server through its REST API.\n\n\
                  Connection settings come from flags, then LISTMONK_* environment variables, \
                  then built-in defaults.",
    propagate_version = true,
    after_help = "Use 'lmk <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// API root URL, e.g. http://localhost:9000/api [env: LISTMONK_API_URL]
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API user name [env: LISTMONK_USERNAME]
    #[arg(long, short = 'u', global = true)]
    pub username: Option<String>,

    /// API token [env: LISTMONK_API_TOKEN]
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in milliseconds [env: LISTMONK_TIMEOUT]
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Extra request header as NAME=VALUE (repeatable)
    #[arg(long = "header", short = 'H', global = true, value_name = "NAME=VALUE")]
    pub headers: Vec<String>,

    /// Render lists as tables instead of JSON
    #[arg(long, global = true)]
    pub table: bool,

    /// Print the whole response envelope (payload, request and response)
    #[arg(long, global = true, conflicts_with = "table")]
    pub envelope: bool,
}

impl GlobalOptions {
    /// Configuration overrides from the flags that were given.
    pub fn overrides(&self) -> Result<ConfigOverrides> {
        let mut headers = BTreeMap::new();
        for header in &self.headers {
            let (name, value) = args::parse_raw_field(header)
                .with_context(|| format!("Invalid --header '{header}'"))?;
            headers.insert(name, value);
        }

        Ok(ConfigOverrides {
            base_url: self.url.clone(),
            username: self.username.clone(),
            token: self.token.clone(),
            timeout_ms: self.timeout,
            retries: None,
            headers,
        })
    }

    /// Resolves the configuration and builds a client.
    pub fn client(&self) -> Result<ListmonkClient> {
        let config = Config::resolve(self.overrides()?).map_err(ApiError::from)?;
        debug!(base_url = %config.base_url, user = %config.auth.username, "resolved configuration");
        Ok(ListmonkClient::new(config)?)
    }

    pub fn writer(&self) -> OutputWriter {
        let format = if self.table {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        };
        OutputWriter::new(format).with_envelope(self.envelope)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage mailing lists
    #[command(visible_alias = "l")]
    Lists(ListsCommand),

    /// Manage subscribers
    #[command(visible_alias = "subs")]
    Subscribers(SubscribersCommand),

    /// Manage campaigns
    #[command(visible_alias = "c")]
    Campaigns(CampaignsCommand),

    /// Manage templates
    Templates(TemplatesCommand),

    /// Manage the media library
    Media(MediaCommand),

    /// Manage bounce records
    Bounces(BouncesCommand),

    /// Import subscribers from CSV
    Import(ImportCommand),

    /// Send transactional messages
    Tx(TxCommand),

    /// View and change server settings
    Settings(SettingsCommand),

    /// Dashboard statistics
    Dashboard(DashboardCommand),

    /// Server configuration, logs, reload and health
    System(SystemCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// Maps an error to the process exit code.
///
/// The first [`ApiError`] in the chain decides; anything else is
/// [`exit_codes::ERROR`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let api_error = err.chain().find_map(|e| e.downcast_ref::<ApiError>());
    match api_error.map(ApiError::kind) {
        Some(ErrorKind::Authentication) => exit_codes::AUTH_ERROR,
        Some(ErrorKind::NotFound) => exit_codes::NOT_FOUND,
        Some(ErrorKind::RateLimit) => exit_codes::RATE_LIMIT,
        _ => exit_codes::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ResponseInfo;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::parse_from([
            "lmk",
            "--url",
            "https://mail.example.com/api",
            "--token",
            "t0k",
            "-H",
            "X-Tenant=acme",
            "lists",
            "list",
        ]);
        let overrides = cli.global.overrides().unwrap();
        assert_eq!(overrides.base_url.as_deref(), Some("https://mail.example.com/api"));
        assert_eq!(overrides.token.as_deref(), Some("t0k"));
        assert_eq!(overrides.headers["X-Tenant"], "acme");
        assert!(overrides.username.is_none());
    }

    #[test]
    fn test_malformed_header_flag() {
        let global = GlobalOptions {
            headers: vec!["no-separator".into()],
            ..Default::default()
        };
        assert!(global.overrides().is_err());
    }

    #[test]
    fn test_exit_codes_follow_error_kind() {
        let not_found = anyhow::Error::new(ApiError::from_response(
            &ResponseInfo::new(404, "Not Found"),
            None,
            None,
        ))
        .context("fetching list 9");
        assert_eq!(exit_code(&not_found), exit_codes::NOT_FOUND);

        let unauthorized = anyhow::Error::new(ApiError::from_response(
            &ResponseInfo::new(401, "Unauthorized"),
            None,
            None,
        ));
        assert_eq!(exit_code(&unauthorized), exit_codes::AUTH_ERROR);

        let limited = anyhow::Error::new(ApiError::from_response(
            &ResponseInfo::new(429, "Too Many Requests"),
            None,
            None,
        ));
        assert_eq!(exit_code(&limited), exit_codes::RATE_LIMIT);

        assert_eq!(exit_code(&anyhow::anyhow!("disk full")), exit_codes::ERROR);
    }
}
