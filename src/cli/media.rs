//
//  listmonk-ops
//  cli/media.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Media library commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::crud::{self, CrudSubcommand};
use super::GlobalOptions;
use crate::api::resources::Media;
use crate::api::transport::FilePart;
use crate::output::{print_field, print_header, truncate, TableOutput, TableRow};

/// Manage the media library
#[derive(Args, Debug)]
pub struct MediaCommand {
    #[command(subcommand)]
    pub command: MediaSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum MediaSubcommand {
    #[command(flatten)]
    Crud(CrudSubcommand),

    /// Upload a file
    Upload {
        /// File to upload
        file: PathBuf,

        /// MIME type; guessed by the server when omitted
        #[arg(long)]
        mime: Option<String>,
    },
}

impl MediaCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let media = client.media();
        let writer = global.writer();

        match &self.command {
            MediaSubcommand::Crud(command) => crud::run(&**media, command, &writer).await,

            MediaSubcommand::Upload { file, mime } => {
                let mut part = FilePart::from_path(file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                if let Some(mime) = mime {
                    part = part.with_mime(mime.clone());
                }
                let envelope = media.upload(part).await?;
                writer.write(&envelope)?;
                writer.write_success(&format!("Uploaded {}", envelope.data.filename));
                Ok(())
            }
        }
    }
}

impl TableRow for Media {
    const HEADERS: &'static [&'static str] = &["ID", "Filename", "Type", "URL"];

    fn cells(&self, _color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.filename, 40),
            self.content_type.clone(),
            self.url.clone(),
        ]
    }
}

impl TableOutput for Media {
    fn print_table(&self, color: bool) {
        print_header(&format!("Media {}: {}", self.id, self.filename));
        print_field("Type", &self.content_type, color);
        print_field("URL", &self.url, color);
        if let Some(thumb) = &self.thumb_url {
            print_field("Thumbnail", thumb, color);
        }
        print_field("Provider", &self.provider, color);
    }
}
