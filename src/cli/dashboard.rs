//
//  listmonk-ops
//  cli/dashboard.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Dashboard commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::GlobalOptions;

/// Dashboard statistics
#[derive(Args, Debug)]
pub struct DashboardCommand {
    #[command(subcommand)]
    pub command: DashboardSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DashboardSubcommand {
    /// Subscriber, list and campaign totals
    Counts,

    /// Views and clicks over the last 30 days
    Charts,
}

impl DashboardCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let writer = global.writer();

        let envelope = match self.command {
            DashboardSubcommand::Counts => client.dashboard().counts().await?,
            DashboardSubcommand::Charts => client.dashboard().charts().await?,
        };
        writer.write_value(&envelope)
    }
}
