//
//  listmonk-ops
//  cli/settings.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Settings commands
//!
//! Setting names contain dots (`app.root_url`), so `-F` keys are applied
//! literally here rather than as nested paths. `update` reads the current
//! settings, applies the fields and writes the whole document back.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::{Map, Value};
use tracing::debug;

use super::args::{parse_field, parse_raw_field, BodyArgs};
use super::GlobalOptions;

/// View and change server settings
#[derive(Args, Debug)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SettingsSubcommand {
    /// Print the settings, or a single one
    Get {
        /// Setting name, e.g. app.root_url
        key: Option<String>,
    },

    /// Change settings (the server restarts afterwards)
    Update(BodyArgs),

    /// Send a test e-mail through an SMTP block
    TestSmtp(BodyArgs),
}

/// Applies `args` on top of `current`. An `--input` document replaces
/// `current` first.
fn apply(current: Value, args: &BodyArgs) -> Result<Value> {
    let base = match &args.input {
        Some(_) => {
            let input_only = BodyArgs {
                input: args.input.clone(),
                ..Default::default()
            };
            input_only.body()?.unwrap_or(Value::Null)
        }
        None => current,
    };
    let Value::Object(mut settings) = base else {
        bail!("Settings must be a JSON object");
    };

    for field in &args.fields {
        let (key, value) = parse_field(field)?;
        settings.insert(key, value);
    }
    for field in &args.raw_fields {
        let (key, value) = parse_raw_field(field)?;
        settings.insert(key, Value::String(value));
    }

    Ok(Value::Object(settings))
}

impl SettingsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let settings = client.settings();
        let writer = global.writer();

        match &self.command {
            SettingsSubcommand::Get { key } => {
                let envelope = settings.get().await?;
                match key {
                    Some(key) => {
                        let value = envelope.data.get(key).cloned();
                        let Some(value) = value else {
                            bail!("Unknown setting '{key}'");
                        };
                        writer.write_value(&envelope.map(|_| value))?;
                    }
                    None => writer.write_value(&envelope)?,
                }
            }

            SettingsSubcommand::Update(args) => {
                if args.fields.is_empty() && args.raw_fields.is_empty() && args.input.is_none() {
                    bail!("Nothing to update: pass -F NAME=VALUE fields or --input FILE");
                }
                let current = settings.get().await?.data;
                let updated = apply(current, args)?;
                debug!(keys = ?updated.as_object().map(Map::len), "writing settings");

                let envelope = settings.update(updated).await?;
                writer.write_value(&envelope)?;
                writer.write_success("Settings updated");
                writer.write_warning("The server restarts to apply the new settings");
            }

            SettingsSubcommand::TestSmtp(args) => {
                writer.write_value(&settings.test_smtp(args.require()?).await?)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dotted_keys_are_literal() {
        let args = BodyArgs {
            fields: vec!["app.concurrency=20".into()],
            raw_fields: vec!["app.root_url=https://mail.example.com".into()],
            input: None,
        };
        let updated = apply(json!({"app.concurrency": 10, "app.site_name": "News"}), &args).unwrap();

        assert_eq!(
            updated,
            json!({
                "app.concurrency": 20,
                "app.root_url": "https://mail.example.com",
                "app.site_name": "News"
            })
        );
    }

    #[test]
    fn test_settings_must_be_an_object() {
        let args = BodyArgs {
            fields: vec!["a=1".into()],
            ..Default::default()
        };
        assert!(apply(json!([1, 2]), &args).is_err());
    }
}
