//
//  listmonk-ops
//  cli/tx.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Transactional message commands
//!
//! ```text
//! lmk tx send --to ada@example.com --template 4 -F order.id=1207 -F order.total=42.5
//! ```
//!
//! Fields become the template's `.Tx.Data`.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::args::{parse_raw_field, BodyArgs};
use super::GlobalOptions;
use crate::api::services::TxMessage;

/// Send transactional messages
#[derive(Args, Debug)]
pub struct TxCommand {
    #[command(subcommand)]
    pub command: TxSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TxSubcommand {
    /// Send a message rendered from a transactional template
    Send(SendArgs),
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Recipient e-mail address
    #[arg(long, required_unless_present = "subscriber", conflicts_with = "subscriber")]
    pub to: Option<String>,

    /// Recipient subscriber ID
    #[arg(long)]
    pub subscriber: Option<u64>,

    /// Transactional template ID
    #[arg(long, short = 't')]
    pub template: u64,

    /// Sender address; the server default when omitted
    #[arg(long)]
    pub from: Option<String>,

    /// Messenger to send through (default: email)
    #[arg(long)]
    pub messenger: Option<String>,

    /// html, markdown or plain
    #[arg(long)]
    pub content_type: Option<String>,

    /// Extra e-mail header as NAME=VALUE (repeatable)
    #[arg(long = "mail-header", value_name = "NAME=VALUE")]
    pub mail_headers: Vec<String>,

    #[command(flatten)]
    pub data: BodyArgs,
}

impl SendArgs {
    fn message(&self) -> Result<TxMessage> {
        let mut message = match (&self.to, self.subscriber) {
            (Some(email), _) => TxMessage::to_email(email.clone(), self.template),
            (None, Some(id)) => TxMessage::to_subscriber(id, self.template),
            (None, None) => anyhow::bail!("Pass --to or --subscriber"),
        };

        if let Some(data) = self.data.body()? {
            message = message.with_data(data);
        }
        for header in &self.mail_headers {
            let (name, value) = parse_raw_field(header)?;
            message.headers.insert(name, value);
        }
        message.from_email = self.from.clone();
        message.messenger = self.messenger.clone();
        message.content_type = self.content_type.clone();

        Ok(message)
    }
}

impl TxCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            TxSubcommand::Send(args) => {
                let message = args.message()?;
                let client = global.client()?;
                let writer = global.writer();

                let envelope = client.transactional().send(&message).await?;
                writer.write_value(&envelope)?;
                let recipient = message
                    .subscriber_email
                    .clone()
                    .or_else(|| message.subscriber_id.map(|id| format!("subscriber {id}")))
                    .unwrap_or_default();
                writer.write_success(&format!("Message sent to {recipient}"));
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
    use serde_json::json;

    fn send_args(args: &[&str]) -> SendArgs {
        match Cli::try_parse_from(args).unwrap().command {
            Commands::Tx(TxCommand {
                command: TxSubcommand::Send(send),
            }) => send,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_message_from_flags() {
        let args = send_args(&[
            "lmk",
            "tx",
            "send",
            "--to",
            "ada@example.com",
            "-t",
            "4",
            "-F",
            "order.id=1207",
            "--mail-header",
            "X-Priority=1",
        ]);
        let message = args.message().unwrap();

        assert_eq!(message.subscriber_email.as_deref(), Some("ada@example.com"));
        assert_eq!(message.template_id, 4);
        assert_eq!(message.data, json!({"order": {"id": 1207}}));
        assert_eq!(message.headers["X-Priority"], "1");
    }

    #[test]
    fn test_recipient_is_required() {
        assert!(Cli::try_parse_from(["lmk", "tx", "send", "-t", "4"]).is_err());
        assert!(Cli::try_parse_from(["lmk", "tx", "send", "-t", "4", "--to", "a@b.c", "--subscriber", "3"]).is_err());

        let message = send_args(&["lmk", "tx", "send", "-t", "4", "--subscriber", "3"])
            .message()
            .unwrap();
        assert_eq!(message.subscriber_id, Some(3));
        assert!(message.subscriber_email.is_none());
    }
}
