//
//  listmonk-ops
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use listmonk_ops::cli::{exit_code, Cli, Commands};
use listmonk_ops::exit_codes;

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let writer = cli.global.writer();

    let code = match run(cli).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            writer.write_error(&format!("{e:#}"));
            exit_code(&e)
        }
    };
    process::exit(code);
}

/// Logging goes to stderr, filtered by `LMK_DEBUG` (e.g. `LMK_DEBUG=debug`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("LMK_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Lists(cmd) => cmd.run(&cli.global).await,
        Commands::Subscribers(cmd) => cmd.run(&cli.global).await,
        Commands::Campaigns(cmd) => cmd.run(&cli.global).await,
        Commands::Templates(cmd) => cmd.run(&cli.global).await,
        Commands::Media(cmd) => cmd.run(&cli.global).await,
        Commands::Bounces(cmd) => cmd.run(&cli.global).await,
        Commands::Import(cmd) => cmd.run(&cli.global).await,
        Commands::Tx(cmd) => cmd.run(&cli.global).await,
        Commands::Settings(cmd) => cmd.run(&cli.global).await,
        Commands::Dashboard(cmd) => cmd.run(&cli.global).await,
        Commands::System(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", listmonk_ops::APP_NAME, listmonk_ops::VERSION);
            Ok(())
        }
    }
}
