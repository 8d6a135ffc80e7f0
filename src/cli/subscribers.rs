//
//  listmonk-ops
//  cli/subscribers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Subscriber commands
//!
//! Bulk commands take either IDs (`1,2,3` or space separated) or a
//! `--query` SQL expression evaluated by the server against the
//! `subscribers` table:
//!
//! ```text
//! lmk subscribers blocklist --query "subscribers.email LIKE '%@spam.test'"
//! lmk subscribers lists add 4 5 --to 2 --status confirmed
//! ```

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use super::crud::{self, CrudSubcommand};
use super::GlobalOptions;
use crate::api::resources::{ListMembership, MembershipAction, Subscriber, SubscriberQuery};
use crate::output::{format_status, print_field, print_header, truncate, TableOutput, TableRow};

/// Manage subscribers
#[derive(Args, Debug)]
pub struct SubscribersCommand {
    #[command(subcommand)]
    pub command: SubscribersSubcommand,
}

/// Selects subscribers by ID or by query.
#[derive(Args, Debug, Clone)]
pub struct Selection {
    /// Subscriber IDs
    #[arg(value_delimiter = ',', required_unless_present = "query", conflicts_with = "query")]
    pub ids: Vec<u64>,

    /// SQL expression selecting subscribers
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Restrict --query to these lists
    #[arg(long = "in-list", value_delimiter = ',', requires = "query")]
    pub in_lists: Vec<u64>,
}

impl Selection {
    fn query(&self) -> Option<SubscriberQuery> {
        self.query
            .as_ref()
            .map(|q| SubscriberQuery::new(q.clone()).in_lists(self.in_lists.clone()))
    }
}

#[derive(Subcommand, Debug)]
pub enum SubscribersSubcommand {
    #[command(flatten)]
    Crud(CrudSubcommand),

    /// Add, remove or unsubscribe subscribers from lists
    Lists {
        /// add, remove or unsubscribe
        action: MembershipAction,

        #[command(flatten)]
        selection: Selection,

        /// Target list IDs
        #[arg(long = "to", value_delimiter = ',', required = true)]
        target_lists: Vec<u64>,

        /// Subscription status for `add`: confirmed, unconfirmed or unsubscribed
        #[arg(long)]
        status: Option<String>,
    },

    /// Blocklist subscribers
    Blocklist {
        #[command(flatten)]
        selection: Selection,
    },

    /// Delete several subscribers at once
    DeleteMany {
        #[command(flatten)]
        selection: Selection,
    },

    /// Export everything stored about a subscriber
    Export {
        /// Subscriber ID
        id: u64,
    },

    /// Send an opt-in confirmation e-mail
    Optin {
        /// Subscriber ID
        id: u64,
    },

    /// Show, or with --delete remove, a subscriber's bounces
    Bounces {
        /// Subscriber ID
        id: u64,

        #[arg(long)]
        delete: bool,
    },
}

impl SubscribersCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let subscribers = client.subscribers();
        let writer = global.writer();

        match &self.command {
            SubscribersSubcommand::Crud(command) => {
                return crud::run(&**subscribers, command, &writer).await;
            }

            SubscribersSubcommand::Lists {
                action,
                selection,
                target_lists,
                status,
            } => {
                if status.is_some() && *action != MembershipAction::Add {
                    bail!("--status only applies to 'add'");
                }
                let envelope = match selection.query() {
                    Some(query) => {
                        subscribers
                            .manage_lists_by_query(&query, *action, target_lists, status.as_deref())
                            .await?
                    }
                    None => {
                        let mut change =
                            ListMembership::new(*action, selection.ids.clone(), target_lists.clone());
                        if let Some(status) = status {
                            change = change.with_status(status.clone());
                        }
                        subscribers.manage_lists(&change).await?
                    }
                };
                writer.write_value(&envelope)?;
                writer.write_success(&format!("Applied '{action}' to lists {target_lists:?}"));
            }

            SubscribersSubcommand::Blocklist { selection } => {
                let envelope = match (selection.query(), selection.ids.as_slice()) {
                    (Some(query), _) => subscribers.blocklist_by_query(&query).await?,
                    (None, [id]) => subscribers.blocklist_by_id(*id).await?,
                    (None, ids) => subscribers.blocklist(ids).await?,
                };
                writer.write_value(&envelope)?;
                writer.write_success("Subscribers blocklisted");
            }

            SubscribersSubcommand::DeleteMany { selection } => {
                let envelope = match selection.query() {
                    Some(query) => subscribers.delete_by_query(&query).await?,
                    None => subscribers.delete_many(&selection.ids).await?,
                };
                writer.write_value(&envelope)?;
                writer.write_success("Subscribers deleted");
            }

            SubscribersSubcommand::Export { id } => {
                writer.write_value(&subscribers.export_data(*id).await?)?;
            }

            SubscribersSubcommand::Optin { id } => {
                let envelope = subscribers.send_optin(*id).await?;
                writer.write_value(&envelope)?;
                writer.write_success(&format!("Opt-in e-mail sent to subscriber {id}"));
            }

            SubscribersSubcommand::Bounces { id, delete } => {
                if *delete {
                    writer.write_value(&subscribers.delete_bounces(*id).await?)?;
                    writer.write_success(&format!("Deleted bounces of subscriber {id}"));
                } else {
                    writer.write_value(&subscribers.bounces(*id).await?)?;
                }
            }
        }

        Ok(())
    }
}

impl TableRow for Subscriber {
    const HEADERS: &'static [&'static str] = &["ID", "Email", "Name", "Status", "Lists"];

    fn cells(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.email.clone(),
            truncate(&self.name, 30),
            format_status(&self.status, color),
            self.lists.len().to_string(),
        ]
    }
}

impl TableOutput for Subscriber {
    fn print_table(&self, color: bool) {
        print_header(&format!("Subscriber {}: {}", self.id, self.email));
        print_field("Name", &self.name, color);
        print_field("Status", &format_status(&self.status, color), color);
        print_field("UUID", &self.uuid, color);

        if !self.lists.is_empty() {
            println!();
            println!("Lists:");
            for list in &self.lists {
                let subscription = list
                    .extra
                    .get("subscription_status")
                    .and_then(|s| s.as_str())
                    .unwrap_or("-");
                println!("  {} {} ({})", list.id, list.name, format_status(subscription, color));
            }
        }

        if !self.attribs.is_empty() {
            println!();
            println!("Attributes:");
            for (key, value) in &self.attribs {
                print_field(&format!("  {key}"), &value.to_string(), color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    fn parse(args: &[&str]) -> SubscribersSubcommand {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Subscribers(cmd) => cmd.command,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_generic_subcommands_are_flattened() {
        match parse(&["lmk", "subscribers", "get", "12"]) {
            SubscribersSubcommand::Crud(CrudSubcommand::Get { id }) => assert_eq!(id, 12),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_lists_with_ids() {
        match parse(&["lmk", "subscribers", "lists", "add", "1,2", "--to", "7", "--status", "confirmed"]) {
            SubscribersSubcommand::Lists {
                action,
                selection,
                target_lists,
                status,
            } => {
                assert_eq!(action, MembershipAction::Add);
                assert_eq!(selection.ids, vec![1, 2]);
                assert_eq!(target_lists, vec![7]);
                assert_eq!(status.as_deref(), Some("confirmed"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_selection_needs_ids_or_query() {
        assert!(Cli::try_parse_from(["lmk", "subscribers", "blocklist"]).is_err());
        assert!(Cli::try_parse_from(["lmk", "subscribers", "blocklist", "3", "--query", "x"]).is_err());

        match parse(&["lmk", "subscribers", "delete-many", "-q", "subscribers.status = 'blocklisted'"]) {
            SubscribersSubcommand::DeleteMany { selection } => {
                let query = selection.query().unwrap();
                assert_eq!(query.query, "subscribers.status = 'blocklisted'");
                assert!(selection.ids.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
