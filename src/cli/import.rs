//
//  listmonk-ops
//  cli/import.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Subscriber import commands
//!
//! Only one import runs at a time on a server. `start` returns at once;
//! follow progress with `status` and `logs`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use super::GlobalOptions;
use crate::api::services::{ImportMode, ImportParams};
use crate::api::transport::FilePart;

/// Import subscribers from CSV
#[derive(Args, Debug)]
pub struct ImportCommand {
    #[command(subcommand)]
    pub command: ImportSubcommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Subscribe,
    Blocklist,
}

impl From<ModeArg> for ImportMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Subscribe => ImportMode::Subscribe,
            ModeArg::Blocklist => ImportMode::Blocklist,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ImportSubcommand {
    /// Start importing a CSV (or ZIP of one CSV) file
    Start {
        /// File to import
        file: PathBuf,

        /// Subscribe the rows to lists, or blocklist them
        #[arg(long, value_enum, default_value_t = ModeArg::Subscribe)]
        mode: ModeArg,

        /// Subscription status: confirmed, unconfirmed or unsubscribed
        #[arg(long, default_value = "unconfirmed")]
        status: String,

        /// Column delimiter
        #[arg(long, default_value = ",")]
        delim: String,

        /// Target list IDs
        #[arg(long, value_delimiter = ',')]
        lists: Vec<u64>,

        /// Overwrite name and attributes of existing subscribers
        #[arg(long)]
        overwrite: bool,
    },

    /// Stop the running import
    Stop,

    /// Show the state of the current import
    Status,

    /// Print the import log
    Logs,
}

impl ImportSubcommand {
    fn params(&self) -> Option<ImportParams> {
        match self {
            Self::Start {
                mode,
                status,
                delim,
                lists,
                overwrite,
                ..
            } => Some(ImportParams {
                mode: (*mode).into(),
                subscription_status: status.clone(),
                delim: delim.clone(),
                lists: lists.clone(),
                overwrite: *overwrite,
            }),
            _ => None,
        }
    }
}

impl ImportCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let import = client.import();
        let writer = global.writer();

        match &self.command {
            ImportSubcommand::Start { file, .. } => {
                let params = self.command.params().unwrap_or_default();
                let part = FilePart::from_path(file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let envelope = import.start(&params, part).await?;
                writer.write_value(&envelope)?;
                writer.write_success(&format!("Import of {} started", file.display()));
            }
            ImportSubcommand::Stop => {
                writer.write_value(&import.stop().await?)?;
            }
            ImportSubcommand::Status => {
                writer.write_value(&import.status().await?)?;
            }
            ImportSubcommand::Logs => {
                writer.write_text(&import.logs().await?)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_start_defaults_match_import_params() {
        let cli = Cli::try_parse_from(["lmk", "import", "start", "people.csv"]).unwrap();
        let Commands::Import(cmd) = cli.command else {
            panic!("expected import command");
        };
        assert_eq!(cmd.command.params(), Some(ImportParams::default()));
    }

    #[test]
    fn test_start_options() {
        let cli = Cli::try_parse_from([
            "lmk", "import", "start", "spam.csv", "--mode", "blocklist", "--lists", "1,2", "--overwrite",
        ])
        .unwrap();
        let Commands::Import(cmd) = cli.command else {
            panic!("expected import command");
        };
        let params = cmd.command.params().unwrap();
        assert_eq!(params.mode, ImportMode::Blocklist);
        assert_eq!(params.lists, vec![1, 2]);
        assert!(params.overwrite);
    }
}
