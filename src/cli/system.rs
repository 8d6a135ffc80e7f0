//
//  listmonk-ops
//  cli/system.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server-level commands

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use super::GlobalOptions;

/// Server configuration, logs, reload and health
#[derive(Args, Debug)]
pub struct SystemCommand {
    #[command(subcommand)]
    pub command: SystemSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SystemSubcommand {
    /// Public server configuration (version, languages, messengers)
    Config,

    /// Recent server log lines
    Logs {
        /// Only the last N lines
        #[arg(long, short = 'n')]
        tail: Option<usize>,
    },

    /// Reload the server, applying settings
    Reload,

    /// Check that the server and its database are up
    Health,
}

impl SystemCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let system = client.system();
        let writer = global.writer();

        match &self.command {
            SystemSubcommand::Config => writer.write_value(&system.config().await?)?,

            SystemSubcommand::Logs { tail } => {
                let envelope = system.logs().await?;
                let envelope = envelope.map(|lines| {
                    let skip = tail.map_or(0, |n| lines.len().saturating_sub(n));
                    lines[skip..].join("\n")
                });
                writer.write_text(&envelope)?;
            }

            SystemSubcommand::Reload => {
                writer.write_value(&system.reload().await?)?;
                writer.write_success("Reload requested");
            }

            SystemSubcommand::Health => {
                let envelope = system.health().await?;
                if !envelope.data {
                    bail!("Server reported itself unhealthy");
                }
                writer.write_value(&envelope)?;
                writer.write_success("Server is healthy");
            }
        }

        Ok(())
    }
}
