//
//  listmonk-ops
//  cli/lists.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Mailing list commands

use anyhow::Result;
use clap::Args;

use super::crud::{self, CrudSubcommand};
use super::GlobalOptions;
use crate::api::resources::MailingList;
use crate::output::{format_status, print_field, print_header, truncate, TableOutput, TableRow};

/// Manage mailing lists
#[derive(Args, Debug)]
pub struct ListsCommand {
    #[command(subcommand)]
    pub command: CrudSubcommand,
}

impl ListsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        crud::run(&**client.lists(), &self.command, &global.writer()).await
    }
}

impl TableRow for MailingList {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Type", "Opt-in", "Subscribers", "Tags"];

    fn cells(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.name, 40),
            format_status(&self.list_type, color),
            self.optin.clone(),
            self.subscriber_count.to_string(),
            self.tags.join(", "),
        ]
    }
}

impl TableOutput for MailingList {
    fn print_table(&self, color: bool) {
        print_header(&format!("List {}: {}", self.id, self.name));
        print_field("UUID", &self.uuid, color);
        print_field("Type", &self.list_type, color);
        print_field("Opt-in", &self.optin, color);
        print_field("Subscribers", &self.subscriber_count.to_string(), color);
        for (status, count) in &self.subscriber_statuses {
            print_field(&format!("  {status}"), &count.to_string(), color);
        }
        if !self.tags.is_empty() {
            print_field("Tags", &self.tags.join(", "), color);
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            print_field("Description", description, color);
        }
        if let Some(created) = &self.created_at {
            print_field("Created", created, color);
        }
    }
}
