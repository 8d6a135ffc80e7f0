//
//  listmonk-ops
//  api/resources/subscribers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Subscribers and their list memberships.
//!
//! Besides the generic five, subscribers have bulk operations that select
//! their targets either by ID or by an SQL expression evaluated by the
//! server:
//!
//! | Operation | By IDs | By query |
//! |-----------|--------|----------|
//! | Change list membership | [`Subscribers::manage_lists`] | [`Subscribers::manage_lists_by_query`] |
//! | Blocklist | [`Subscribers::blocklist`] | [`Subscribers::blocklist_by_query`] |
//! | Delete | [`Subscribers::delete_many`] | [`Subscribers::delete_by_query`] |
//!
//! # Example
//!
//! ```rust,no_run
//! use listmonk_ops::api::resources::{ListMembership, MembershipAction};
//! use listmonk_ops::{Config, ListmonkClient};
//!
//! # async fn example() -> Result<(), listmonk_ops::ApiError> {
//! let client = ListmonkClient::new(Config::new("http://localhost:9000/api", "api-admin", "token"))?;
//! client
//!     .subscribers()
//!     .manage_lists(&ListMembership::new(MembershipAction::Add, vec![1, 2], vec![7]))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::api::common::{ApiError, Envelope};
use crate::api::dispatch::Dispatcher;
use crate::api::operations::Operation;
use crate::api::options::CallOptions;
use crate::api::resource::{Resource, ResourceOps};

use super::lists::MailingList;

/// A subscriber.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Subscriber {
    pub id: u64,
    pub uuid: String,
    pub email: String,
    pub name: String,

    /// `enabled` or `blocklisted`.
    pub status: String,

    /// Free-form attributes.
    #[serde(deserialize_with = "super::nullable")]
    pub attribs: Map<String, Value>,

    /// Lists the subscriber belongs to, with the subscription status in
    /// `extra["subscription_status"]`.
    #[serde(deserialize_with = "super::nullable")]
    pub lists: Vec<MailingList>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What a membership change does to the target lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipAction {
    Add,
    Remove,
    Unsubscribe,
}

impl MembershipAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Unsubscribe => "unsubscribe",
        }
    }
}

impl fmt::Display for MembershipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "unsubscribe" => Ok(Self::Unsubscribe),
            other => Err(format!(
                "unknown action '{other}' (expected add, remove or unsubscribe)"
            )),
        }
    }
}

/// A list membership change for explicit subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListMembership {
    pub ids: Vec<u64>,
    pub action: MembershipAction,
    pub target_list_ids: Vec<u64>,

    /// Subscription status for `add`: `confirmed`, `unconfirmed` or
    /// `unsubscribed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ListMembership {
    pub fn new(action: MembershipAction, ids: Vec<u64>, target_list_ids: Vec<u64>) -> Self {
        Self {
            ids,
            action,
            target_list_ids,
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Subscribers selected by an SQL expression, optionally within lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubscriberQuery {
    /// SQL expression on the `subscribers` table, e.g.
    /// `subscribers.attribs->>'city' = 'Harare'`.
    pub query: String,

    /// Restricts the query to these lists; all lists when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub list_ids: Vec<u64>,
}

impl SubscriberQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            list_ids: Vec::new(),
        }
    }

    pub fn in_lists(mut self, list_ids: Vec<u64>) -> Self {
        self.list_ids = list_ids;
        self
    }
}

/// The `subscribers` namespace.
#[derive(Debug, Clone)]
pub struct Subscribers {
    ops: ResourceOps<Subscriber>,
    dispatcher: Dispatcher,
    manage_lists: Operation,
    manage_lists_by_query: Operation,
    blocklist: Operation,
    blocklist_by_id: Operation,
    blocklist_by_query: Operation,
    delete_many: Operation,
    delete_by_query: Operation,
    export_data: Operation,
    send_optin: Operation,
    bounces: Operation,
    delete_bounces: Operation,
}

impl Subscribers {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            ops: ResourceOps::bind(Resource::Subscriber, dispatcher.clone())?,
            manage_lists: dispatcher.bind("manageSubscriberLists")?,
            manage_lists_by_query: dispatcher.bind("manageSubscriberListsByQuery")?,
            blocklist: dispatcher.bind("blocklistSubscribers")?,
            blocklist_by_id: dispatcher.bind("blocklistSubscriberById")?,
            blocklist_by_query: dispatcher.bind("blocklistSubscribersByQuery")?,
            delete_many: dispatcher.bind("deleteSubscribers")?,
            delete_by_query: dispatcher.bind("deleteSubscribersByQuery")?,
            export_data: dispatcher.bind("exportSubscriberDataById")?,
            send_optin: dispatcher.bind("subscriberSendOptinById")?,
            bounces: dispatcher.bind("getSubscriberBouncesById")?,
            delete_bounces: dispatcher.bind("deleteSubscriberBouncesById")?,
            dispatcher,
        })
    }

    /// Adds, removes or unsubscribes subscribers from lists.
    pub async fn manage_lists(&self, change: &ListMembership) -> Result<Envelope<bool>, ApiError> {
        let options = CallOptions::new().json(to_body(change)?);
        self.dispatcher.call(&self.manage_lists, options).await
    }

    /// [`Subscribers::manage_lists`] for the subscribers matching `query`.
    pub async fn manage_lists_by_query(
        &self,
        query: &SubscriberQuery,
        action: MembershipAction,
        target_list_ids: &[u64],
        status: Option<&str>,
    ) -> Result<Envelope<bool>, ApiError> {
        let mut body = to_body(query)?;
        body["action"] = json!(action);
        body["target_list_ids"] = json!(target_list_ids);
        if let Some(status) = status {
            body["status"] = json!(status);
        }
        self.dispatcher
            .call(&self.manage_lists_by_query, CallOptions::new().json(body))
            .await
    }

    /// Blocklists subscribers by ID.
    pub async fn blocklist(&self, ids: &[u64]) -> Result<Envelope<bool>, ApiError> {
        let options = CallOptions::new().json(json!({ "ids": ids }));
        self.dispatcher.call(&self.blocklist, options).await
    }

    pub async fn blocklist_by_id(&self, id: u64) -> Result<Envelope<bool>, ApiError> {
        self.dispatcher
            .call(&self.blocklist_by_id, CallOptions::new().id(id))
            .await
    }

    pub async fn blocklist_by_query(&self, query: &SubscriberQuery) -> Result<Envelope<bool>, ApiError> {
        let options = CallOptions::new().json(to_body(query)?);
        self.dispatcher.call(&self.blocklist_by_query, options).await
    }

    /// Deletes subscribers by ID.
    pub async fn delete_many(&self, ids: &[u64]) -> Result<Envelope<bool>, ApiError> {
        let options = CallOptions::new().query("id", json!(ids));
        self.dispatcher.call(&self.delete_many, options).await
    }

    pub async fn delete_by_query(&self, query: &SubscriberQuery) -> Result<Envelope<bool>, ApiError> {
        let options = CallOptions::new().json(to_body(query)?);
        self.dispatcher.call(&self.delete_by_query, options).await
    }

    /// Everything stored about one subscriber: profile, subscriptions,
    /// campaign views and link clicks.
    pub async fn export_data(&self, id: u64) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher
            .call(&self.export_data, CallOptions::new().id(id))
            .await
    }

    /// Sends the double opt-in confirmation e-mail.
    pub async fn send_optin(&self, id: u64) -> Result<Envelope<bool>, ApiError> {
        self.dispatcher
            .call(&self.send_optin, CallOptions::new().id(id))
            .await
    }

    pub async fn bounces(&self, id: u64) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher
            .call(&self.bounces, CallOptions::new().id(id))
            .await
    }

    pub async fn delete_bounces(&self, id: u64) -> Result<Envelope<bool>, ApiError> {
        self.dispatcher
            .call(&self.delete_bounces, CallOptions::new().id(id))
            .await
    }
}

impl Deref for Subscribers {
    type Target = ResourceOps<Subscriber>;

    fn deref(&self) -> &Self::Target {
        &self.ops
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}
