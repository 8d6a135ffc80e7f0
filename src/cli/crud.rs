//
//  listmonk-ops
//  cli/crud.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! The five generic subcommands shared by every resource command.
//!
//! | Subcommand | Operation   | Notes                                   |
//! |------------|-------------|-----------------------------------------|
//! | `list`     | `list`      | `--page`, `--per-page`, `-P key=value`  |
//! | `get`      | `get_by_id` | A refusal (404 etc.) becomes an error   |
//! | `create`   | `create`    | Body from `-F`, `-f` and `--input`      |
//! | `update`   | `update`    | Same body flags as `create`             |
//! | `delete`   | `delete`    |                                         |

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::args::{BodyArgs, PageArgs};
use crate::api::common::CrudResult;
use crate::api::options::CallOptions;
use crate::api::resource::ResourceOps;
use crate::output::{OutputFormat, OutputWriter, TableOutput, TableRow};

#[derive(Subcommand, Debug, Clone)]
pub enum CrudSubcommand {
    /// List records, one page at a time
    #[command(visible_alias = "ls")]
    List(PageArgs),

    /// Show one record
    Get {
        /// Record ID
        id: u64,
    },

    /// Create a record
    Create(BodyArgs),

    /// Update a record
    Update {
        /// Record ID
        id: u64,

        #[command(flatten)]
        body: BodyArgs,
    },

    /// Delete a record
    #[command(visible_alias = "rm")]
    Delete {
        /// Record ID
        id: u64,
    },
}

/// Runs a generic subcommand against `ops`.
pub async fn run<T>(ops: &ResourceOps<T>, command: &CrudSubcommand, writer: &OutputWriter) -> Result<()>
where
    T: DeserializeOwned + Serialize + TableRow + TableOutput,
{
    let resource = ops.resource();
    debug!(%resource, ?command, "running generic command");

    match command {
        CrudSubcommand::List(page) => {
            let envelope = ops.list(Some(page.options()?)).await?;
            writer.write_page(&envelope)?;
        }

        CrudSubcommand::Get { id } => {
            let result = ops.get_by_id(CallOptions::new().id(*id)).await?;
            let envelope = result
                .into_result()
                .with_context(|| format!("Failed to get {} {id}", resource.name().to_lowercase()))?;
            writer.write(&envelope)?;
        }

        CrudSubcommand::Create(body) => {
            let envelope = ops.create(CallOptions::new().json(body.require()?)).await?;
            writer.write(&envelope)?;
        }

        CrudSubcommand::Update { id, body } => {
            let options = CallOptions::new().id(*id).json(body.require()?);
            match ops.update(options).await? {
                CrudResult::Found(envelope) => writer.write(&envelope)?,
                CrudResult::Rejected(rejection) => {
                    return Err(rejection.into_error()).with_context(|| {
                        format!("Failed to update {} {id}", resource.name().to_lowercase())
                    });
                }
            }
        }

        CrudSubcommand::Delete { id } => {
            let envelope = ops.delete(CallOptions::new().id(*id)).await?;
            if writer.format() == OutputFormat::Json {
                writer.write_value(&envelope)?;
            }
            writer.write_success(&format!("Deleted {} {id}", resource.name().to_lowercase()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resource::Resource;
    use crate::api::testing::{dispatcher, RecordingTransport};
    use crate::output::print_field;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        id: u64,
    }

    impl TableRow for Row {
        const HEADERS: &'static [&'static str] = &["ID"];

        fn cells(&self, _color: bool) -> Vec<String> {
            vec![self.id.to_string()]
        }
    }

    impl TableOutput for Row {
        fn print_table(&self, color: bool) {
            print_field("ID", &self.id.to_string(), color);
        }
    }

    #[tokio::test]
    async fn test_get_rejection_becomes_not_found_error() {
        let transport = RecordingTransport::new();
        transport.respond(404, json!({"message": "List not found"}));
        let ops: ResourceOps<Row> = ResourceOps::bind(Resource::List, dispatcher(transport)).unwrap();

        let err = run(&ops, &CrudSubcommand::Get { id: 9 }, &OutputWriter::json())
            .await
            .unwrap_err();

        assert_eq!(super::super::exit_code(&err), crate::exit_codes::NOT_FOUND);
        assert!(format!("{err:#}").contains("List not found"));
    }

    #[tokio::test]
    async fn test_create_requires_body() {
        let transport = RecordingTransport::new();
        let ops: ResourceOps<Row> =
            ResourceOps::bind(Resource::List, dispatcher(transport.clone())).unwrap();

        let result = run(&ops, &CrudSubcommand::Create(BodyArgs::default()), &OutputWriter::json()).await;

        assert!(result.is_err());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_sends_page_query() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"data": {"results": [{"id": 1}], "total": 1, "page": 2, "per_page": 5}}));
        let ops: ResourceOps<Row> =
            ResourceOps::bind(Resource::List, dispatcher(transport.clone())).unwrap();
        let page = PageArgs {
            page: Some(2),
            per_page: Some("5".into()),
            params: vec![],
        };

        run(&ops, &CrudSubcommand::List(page), &OutputWriter::json()).await.unwrap();

        let url = transport.last().url;
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("page".into(), "2".into())));
        assert!(pairs.contains(&("per_page".into(), "5".into())));
    }
}
