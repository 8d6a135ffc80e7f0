//
//  listmonk-ops
//  cli/templates.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Template commands

use anyhow::Result;
use clap::{Args, Subcommand};

use super::args::BodyArgs;
use super::crud::{self, CrudSubcommand};
use super::GlobalOptions;
use crate::api::resources::Template;
use crate::output::{format_bool, print_field, print_header, truncate, TableOutput, TableRow};

/// Manage templates
#[derive(Args, Debug)]
pub struct TemplatesCommand {
    #[command(subcommand)]
    pub command: TemplatesSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TemplatesSubcommand {
    #[command(flatten)]
    Crud(CrudSubcommand),

    /// Make a template the default for new campaigns
    SetDefault {
        /// Template ID
        id: u64,
    },

    /// Render a stored template, or an unsaved one given as a body
    Preview {
        /// Template ID; omit when passing a body
        #[arg(required_unless_present_any = ["fields", "raw_fields", "input"])]
        id: Option<u64>,

        #[command(flatten)]
        body: BodyArgs,
    },
}

impl TemplatesCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let templates = client.templates();
        let writer = global.writer();

        match &self.command {
            TemplatesSubcommand::Crud(command) => {
                return crud::run(&**templates, command, &writer).await;
            }

            TemplatesSubcommand::SetDefault { id } => {
                let envelope = templates.set_default(*id).await?;
                writer.write_value(&envelope)?;
                writer.write_success(&format!("Template {id} is now the default"));
            }

            TemplatesSubcommand::Preview { id, body } => {
                let envelope = match (body.body()?, id) {
                    (Some(body), _) => templates.render_preview(body).await?,
                    (None, Some(id)) => templates.preview(*id).await?,
                    (None, None) => anyhow::bail!("Pass a template ID or a body to render"),
                };
                writer.write_text(&envelope)?;
            }
        }

        Ok(())
    }
}

impl TableRow for Template {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Type", "Default"];

    fn cells(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.name, 40),
            self.template_type.clone(),
            format_bool(self.is_default, color),
        ]
    }
}

impl TableOutput for Template {
    fn print_table(&self, color: bool) {
        print_header(&format!("Template {}: {}", self.id, self.name));
        print_field("Type", &self.template_type, color);
        print_field("Default", &format_bool(self.is_default, color), color);
        if let Some(subject) = &self.subject {
            print_field("Subject", subject, color);
        }
        print_field("Body", &format!("{} characters", self.body.chars().count()), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_preview_takes_id_or_body() {
        let parsed = Cli::try_parse_from(["lmk", "templates", "preview", "-F", "type=campaign"]).unwrap();
        match parsed.command {
            Commands::Templates(TemplatesCommand {
                command: TemplatesSubcommand::Preview { id, body },
            }) => {
                assert!(id.is_none());
                assert_eq!(body.fields, vec!["type=campaign"]);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(Cli::try_parse_from(["lmk", "templates", "preview"]).is_err());
    }
}
