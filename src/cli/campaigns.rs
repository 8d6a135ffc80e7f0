//
//  listmonk-ops
//  cli/campaigns.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Campaign commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde_json::{json, Value};

use super::args::BodyArgs;
use super::crud::{self, CrudSubcommand};
use super::GlobalOptions;
use crate::api::options::CallOptions;
use crate::api::resources::{AnalyticsKind, Campaign, CampaignStatus};
use crate::output::{format_status, print_field, print_header, truncate, TableOutput, TableRow};

/// Manage campaigns
#[derive(Args, Debug)]
pub struct CampaignsCommand {
    #[command(subcommand)]
    pub command: CampaignsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CampaignsSubcommand {
    #[command(flatten)]
    Crud(CrudSubcommand),

    /// Render a campaign as HTML, or as plain text with --text
    ///
    /// Without a body the stored campaign is rendered; with one the given
    /// content (template_id, content_type, body) is rendered instead.
    Preview {
        /// Campaign ID
        id: u64,

        /// Render the plain-text alternative
        #[arg(long)]
        text: bool,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// Start, pause, cancel or schedule a campaign
    Status {
        /// Campaign ID
        id: u64,

        /// draft, scheduled, running, paused or cancelled
        status: CampaignStatus,
    },

    /// Change public archive settings
    Archive {
        /// Campaign ID
        id: u64,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// Replace a campaign's content
    Content {
        /// Campaign ID
        id: u64,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// Send a test to the given addresses
    Test {
        /// Campaign ID
        id: u64,

        /// Recipient e-mail addresses (must be existing subscribers)
        #[arg(long = "to", value_delimiter = ',', required = true)]
        recipients: Vec<String>,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// Progress of running campaigns
    Stats {
        /// Campaign IDs; all running campaigns when omitted
        #[arg(value_delimiter = ',')]
        ids: Vec<u64>,
    },

    /// View, click, bounce or link counts
    Analytics {
        /// views, clicks, bounces or links
        kind: AnalyticsKind,

        /// Campaign IDs
        #[arg(value_delimiter = ',', required = true)]
        ids: Vec<u64>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}

impl CampaignsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let campaigns = client.campaigns();
        let writer = global.writer();

        match &self.command {
            CampaignsSubcommand::Crud(command) => {
                return crud::run(&**campaigns, command, &writer).await;
            }

            CampaignsSubcommand::Preview { id, text, body } => {
                let envelope = match (body.body()?, *text) {
                    (Some(body), true) => campaigns.preview_text(*id, body).await?,
                    (Some(body), false) => campaigns.render_preview(*id, body).await?,
                    (None, true) => {
                        let stored = campaigns
                            .get_by_id(CallOptions::new().id(*id))
                            .await?
                            .into_result()
                            .with_context(|| format!("Failed to get campaign {id}"))?;
                        let campaign = &stored.data;
                        let content = json!({
                            "template_id": campaign.template_id,
                            "content_type": campaign.content_type,
                            "body": campaign.body,
                        });
                        campaigns.preview_text(*id, content).await?
                    }
                    (None, false) => campaigns.preview(*id).await?,
                };
                writer.write_text(&envelope)?;
            }

            CampaignsSubcommand::Status { id, status } => {
                let envelope = campaigns.update_status(*id, *status).await?;
                writer.write(&envelope)?;
                writer.write_success(&format!("Campaign {id} is now {status}"));
            }

            CampaignsSubcommand::Archive { id, body } => {
                writer.write_value(&campaigns.update_archive(*id, body.require()?).await?)?;
            }

            CampaignsSubcommand::Content { id, body } => {
                writer.write_value(&campaigns.update_content(*id, body.require()?).await?)?;
            }

            CampaignsSubcommand::Test { id, recipients, body } => {
                let campaign = body.body()?.unwrap_or(Value::Null);
                let envelope = campaigns.test_send(*id, campaign, recipients).await?;
                writer.write_value(&envelope)?;
                writer.write_success(&format!("Test of campaign {id} sent to {}", recipients.join(", ")));
            }

            CampaignsSubcommand::Stats { ids } => {
                writer.write_value(&campaigns.running_stats(ids).await?)?;
            }

            CampaignsSubcommand::Analytics { kind, ids, from, to } => {
                let envelope = campaigns
                    .analytics(*kind, ids, from.as_deref(), to.as_deref())
                    .await?;
                writer.write_value(&envelope)?;
            }
        }

        Ok(())
    }
}

fn status_label(status: Option<CampaignStatus>) -> &'static str {
    status.map(CampaignStatus::as_str).unwrap_or("-")
}

impl TableRow for Campaign {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Status", "Sent", "Views", "Clicks"];

    fn cells(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.name, 40),
            format_status(status_label(self.status), color),
            format!("{}/{}", self.sent, self.to_send),
            self.views.to_string(),
            self.clicks.to_string(),
        ]
    }
}

impl TableOutput for Campaign {
    fn print_table(&self, color: bool) {
        print_header(&format!("Campaign {}: {}", self.id, self.name));
        print_field("Subject", &self.subject, color);
        print_field("From", &self.from_email, color);
        print_field("Status", &format_status(status_label(self.status), color), color);
        print_field("Type", &self.campaign_type, color);
        print_field("Content type", &self.content_type, color);

        let lists: Vec<String> = self
            .lists
            .iter()
            .filter_map(|list| list.get("name").and_then(|n| n.as_str()))
            .map(str::to_string)
            .collect();
        if !lists.is_empty() {
            print_field("Lists", &lists.join(", "), color);
        }

        print_field("Sent", &format!("{} of {}", self.sent, self.to_send), color);
        print_field("Views", &self.views.to_string(), color);
        print_field("Clicks", &self.clicks.to_string(), color);
        if let Some(send_at) = &self.send_at {
            print_field("Send at", send_at, color);
        }
    }
}
