//
//  listmonk-ops
//  api/services/bounces.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bounce records.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::api::common::{ApiError, Envelope, PagedEnvelope};
use crate::api::dispatch::Dispatcher;
use crate::api::operations::Operation;
use crate::api::options::CallOptions;

/// A recorded bounce.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounce {
    pub id: u64,

    /// `soft`, `hard` or `complaint`.
    #[serde(rename = "type")]
    pub bounce_type: String,

    /// `api`, `ses`, `sendgrid`, `postmark` or a mailbox name.
    pub source: String,
    pub email: String,
    pub subscriber_id: Option<u64>,
    pub subscriber_uuid: Option<String>,
    pub campaign: Option<Value>,
    pub meta: Option<Value>,
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Which bounces [`Bounces::delete`] removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BounceSelection {
    All,
    Ids(Vec<u64>),
}

/// The `bounces` namespace.
#[derive(Debug, Clone)]
pub struct Bounces {
    dispatcher: Dispatcher,
    list: Operation,
    get: Operation,
    delete: Operation,
    delete_by_id: Operation,
}

impl Bounces {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            list: dispatcher.bind("getBounces")?,
            get: dispatcher.bind("getBounceById")?,
            delete: dispatcher.bind("deleteBounces")?,
            delete_by_id: dispatcher.bind("deleteBounceById")?,
            dispatcher,
        })
    }

    /// Lists bounces; `options` may carry `campaign_id`, `source`, `page`,
    /// `per_page`, `order_by` and `order`.
    pub async fn list(&self, options: Option<CallOptions>) -> Result<PagedEnvelope<Bounce>, ApiError> {
        self.dispatcher
            .call(&self.list, options.unwrap_or_default())
            .await
    }

    pub async fn get(&self, id: u64) -> Result<Envelope<Bounce>, ApiError> {
        self.dispatcher.call(&self.get, CallOptions::new().id(id)).await
    }

    pub async fn delete(&self, selection: BounceSelection) -> Result<Envelope<bool>, ApiError> {
        let options = match selection {
            BounceSelection::All => CallOptions::new().query("all", true),
            BounceSelection::Ids(ids) if ids.is_empty() => {
                return Err(ApiError::InvalidRequest(
                    "no bounce IDs given; use BounceSelection::All to delete every bounce".into(),
                ))
            }
            BounceSelection::Ids(ids) => CallOptions::new().query("id", json!(ids)),
        };
        self.dispatcher.call(&self.delete, options).await
    }

    pub async fn delete_by_id(&self, id: u64) -> Result<Envelope<bool>, ApiError> {
        self.dispatcher
            .call(&self.delete_by_id, CallOptions::new().id(id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{dispatcher, RecordingTransport};

    #[tokio::test]
    async fn test_delete_selection_query() {
        let transport = RecordingTransport::new();
        let bounces = Bounces::bind(dispatcher(transport.clone())).unwrap();

        bounces.delete(BounceSelection::All).await.unwrap();
        assert_eq!(transport.last().url.query(), Some("all=true"));

        bounces.delete(BounceSelection::Ids(vec![3, 4])).await.unwrap();
        assert_eq!(transport.last().url.query(), Some("id=3&id=4"));

        let err = bounces.delete(BounceSelection::Ids(vec![])).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_list_decodes_page() {
        let transport = RecordingTransport::new();
        transport.respond(
            200,
            json!({"data": {
                "results": [{"id": 1, "type": "hard", "source": "ses", "email": "x@example.com"}],
                "total": 1, "page": 1, "per_page": 20
            }}),
        );
        let bounces = Bounces::bind(dispatcher(transport)).unwrap();

        let page = bounces.list(None).await.unwrap();
        assert_eq!(page.data.results.len(), 1);
        assert_eq!(page.data.results[0].bounce_type, "hard");
    }
}
