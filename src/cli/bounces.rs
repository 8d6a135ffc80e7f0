//
//  listmonk-ops
//  cli/bounces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bounce commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use super::args::PageArgs;
use super::GlobalOptions;
use crate::api::services::{Bounce, BounceSelection};
use crate::output::{print_field, print_header, TableOutput, TableRow};

/// Manage bounce records
#[derive(Args, Debug)]
pub struct BouncesCommand {
    #[command(subcommand)]
    pub command: BouncesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BouncesSubcommand {
    /// List bounces
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        page: PageArgs,

        /// Only bounces of this campaign
        #[arg(long)]
        campaign: Option<u64>,

        /// Only bounces from this source (api, ses, sendgrid, ...)
        #[arg(long)]
        source: Option<String>,
    },

    /// Show one bounce
    Get {
        /// Bounce ID
        id: u64,
    },

    /// Delete bounces by ID, or all of them with --all
    #[command(visible_alias = "rm")]
    Delete {
        /// Bounce IDs
        #[arg(value_delimiter = ',', required_unless_present = "all", conflicts_with = "all")]
        ids: Vec<u64>,

        /// Delete every bounce record
        #[arg(long)]
        all: bool,
    },
}

impl BouncesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let bounces = client.bounces();
        let writer = global.writer();

        match &self.command {
            BouncesSubcommand::List { page, campaign, source } => {
                let mut options = page.options()?;
                if let Some(campaign) = campaign {
                    options = options.query("campaign_id", *campaign);
                }
                if let Some(source) = source {
                    options = options.query("source", source.as_str());
                }
                writer.write_page(&bounces.list(Some(options)).await?)?;
            }

            BouncesSubcommand::Get { id } => {
                writer.write(&bounces.get(*id).await?)?;
            }

            BouncesSubcommand::Delete { ids, all } => {
                let envelope = match (ids.as_slice(), *all) {
                    (_, true) => bounces.delete(BounceSelection::All).await?,
                    ([id], false) => bounces.delete_by_id(*id).await?,
                    (ids, false) => bounces.delete(BounceSelection::Ids(ids.to_vec())).await?,
                };
                writer.write_value(&envelope)?;
                writer.write_success("Bounces deleted");
            }
        }

        Ok(())
    }
}

fn campaign_name(bounce: &Bounce) -> String {
    bounce
        .campaign
        .as_ref()
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("-")
        .to_string()
}

impl TableRow for Bounce {
    const HEADERS: &'static [&'static str] = &["ID", "Email", "Type", "Source", "Campaign", "Created"];

    fn cells(&self, color: bool) -> Vec<String> {
        let kind = match self.bounce_type.as_str() {
            "hard" | "complaint" if color => style(&self.bounce_type).red().to_string(),
            _ => self.bounce_type.clone(),
        };
        vec![
            self.id.to_string(),
            self.email.clone(),
            kind,
            self.source.clone(),
            campaign_name(self),
            self.created_at.clone().unwrap_or_default(),
        ]
    }
}

impl TableOutput for Bounce {
    fn print_table(&self, color: bool) {
        print_header(&format!("Bounce {}", self.id));
        print_field("Email", &self.email, color);
        print_field("Type", &self.bounce_type, color);
        print_field("Source", &self.source, color);
        print_field("Campaign", &campaign_name(self), color);
        if let Some(meta) = &self.meta {
            print_field("Meta", &meta.to_string(), color);
        }
        if let Some(created) = &self.created_at {
            print_field("Created", created, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use serde_json::json;

    #[test]
    fn test_delete_needs_ids_or_all() {
        assert!(Cli::try_parse_from(["lmk", "bounces", "delete"]).is_err());
        assert!(Cli::try_parse_from(["lmk", "bounces", "delete", "1", "--all"]).is_err());

        match Cli::try_parse_from(["lmk", "bounces", "rm", "--all"]).unwrap().command {
            Commands::Bounces(BouncesCommand {
                command: BouncesSubcommand::Delete { ids, all },
            }) => {
                assert!(ids.is_empty());
                assert!(all);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_bounce_row() {
        let bounce = Bounce {
            id: 1,
            email: "gone@example.com".into(),
            bounce_type: "hard".into(),
            source: "api".into(),
            campaign: Some(json!({"id": 2, "name": "Launch"})),
            ..Default::default()
        };
        let cells = bounce.cells(false);
        assert_eq!(cells[2], "hard");
        assert_eq!(cells[4], "Launch");
    }
}
