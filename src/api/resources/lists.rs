//
//  listmonk-ops
//  api/resources/lists.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Mailing lists.
//!
//! Lists only have the five generic operations; [`Lists`] exists so every
//! resource is reached the same way from the client.
//!
//! # Example
//!
//! ```rust,no_run
//! use listmonk_ops::api::options::CallOptions;
//! use listmonk_ops::{Config, ListmonkClient};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), listmonk_ops::ApiError> {
//! let client = ListmonkClient::new(Config::new("http://localhost:9000/api", "api-admin", "token"))?;
//! let created = client
//!     .lists()
//!     .create(CallOptions::new().json(json!({
//!         "name": "Weekly digest",
//!         "type": "public",
//!         "optin": "double",
//!     })))
//!     .await?;
//! println!("created list {}", created.data.id);
//! # Ok(())
//! # }
//! ```

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::common::ApiError;
use crate::api::dispatch::Dispatcher;
use crate::api::resource::{Resource, ResourceOps};

/// A mailing list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MailingList {
    pub id: u64,
    pub uuid: String,
    pub name: String,

    /// `public` or `private`.
    #[serde(rename = "type")]
    pub list_type: String,

    /// `single` or `double`.
    pub optin: String,

    #[serde(deserialize_with = "super::nullable")]
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub subscriber_count: u64,

    /// Subscriber counts keyed by subscription status.
    #[serde(deserialize_with = "super::nullable")]
    pub subscriber_statuses: Map<String, Value>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    /// Fields not modeled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `lists` namespace.
#[derive(Debug, Clone)]
pub struct Lists {
    ops: ResourceOps<MailingList>,
}

impl Lists {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            ops: ResourceOps::bind(Resource::List, dispatcher)?,
        })
    }
}

impl Deref for Lists {
    type Target = ResourceOps<MailingList>;

    fn deref(&self) -> &Self::Target {
        &self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_tolerates_missing_and_unknown_fields() {
        let list: MailingList = serde_json::from_value(json!({
            "id": 3,
            "name": "Beta testers",
            "type": "private",
            "tags": null,
            "subscriber_statuses": {"confirmed": 10},
            "entity_version": 7
        }))
        .unwrap();

        assert_eq!(list.id, 3);
        assert_eq!(list.list_type, "private");
        assert!(list.tags.is_empty());
        assert_eq!(list.subscriber_statuses["confirmed"], json!(10));
        assert_eq!(list.extra["entity_version"], json!(7));
    }
}
