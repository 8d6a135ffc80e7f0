//
//  listmonk-ops
//  api/resources/campaigns.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Campaigns.
//!
//! # Lifecycle
//!
//! ```text
//! draft ──► scheduled ──► running ──► finished
//!   │           │            │
//!   │           ▼            ▼
//!   └──────► running      paused ──► running
//!                            │
//!                            ▼
//!                        cancelled
//! ```
//!
//! Status changes go through [`Campaigns::update_status`]; the server
//! enforces the allowed transitions.
//!
//! # Previews
//!
//! [`Campaigns::preview`] renders a stored campaign. [`Campaigns::render_preview`]
//! and [`Campaigns::preview_text`] render an ad-hoc body against the
//! campaign's template without saving it. All three return the rendered
//! document as a string.

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

/// A campaign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Campaign {
    pub id: u64,
    pub uuid: String,
    pub name: String,
    pub subject: String,
    pub from_email: String,
    pub status: Option<CampaignStatus>,

    /// `regular` or `optin`.
    #[serde(rename = "type")]
    pub campaign_type: String,

    /// `richtext`, `html`, `markdown`, `plain` or `visual`.
    pub content_type: String,
    pub body: String,
    pub template_id: Option<u64>,

    /// Target lists as `{id, name}` pairs.
    #[serde(deserialize_with = "super::nullable")]
    pub lists: Vec<Map<String, Value>>,

    #[serde(deserialize_with = "super::nullable")]
    pub tags: Vec<String>,

    pub send_at: Option<String>,
    pub started_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub to_send: u64,
    pub sent: u64,
    pub views: u64,
    pub clicks: u64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Campaign status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Running,
    Paused,
    Finished,
    Cancelled,
}

impl CampaignStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "running" => Ok(Self::Running),
            "paused" => Ok(Self::Paused),
            "finished" => Ok(Self::Finished),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            other => Err(format!("unknown campaign status '{other}'")),
        }
    }
}

/// Series reported by [`Campaigns::analytics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsKind {
    Views,
    Clicks,
    Bounces,
    Links,
}

impl AnalyticsKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Clicks => "clicks",
            Self::Bounces => "bounces",
            Self::Links => "links",
        }
    }
}

impl FromStr for AnalyticsKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "views" => Ok(Self::Views),
            "clicks" => Ok(Self::Clicks),
            "bounces" => Ok(Self::Bounces),
            "links" => Ok(Self::Links),
            other => Err(format!(
                "unknown analytics type '{other}' (expected views, clicks, bounces or links)"
            )),
        }
    }
}

/// The `campaigns` namespace.
#[derive(Debug, Clone)]
pub struct Campaigns {
    ops: ResourceOps<Campaign>,
    dispatcher: Dispatcher,
    preview: Operation,
    render_preview: Operation,
    preview_text: Operation,
    update_status: Operation,
    update_archive: Operation,
    update_content: Operation,
    test_send: Operation,
    running_stats: Operation,
    analytics: Operation,
}

impl Campaigns {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            ops: ResourceOps::bind(Resource::Campaign, dispatcher.clone())?,
            preview: dispatcher.bind("getCampaignPreviewById")?,
            render_preview: dispatcher.bind("previewCampaignById")?,
            preview_text: dispatcher.bind("previewCampaignTextById")?,
            update_status: dispatcher.bind("updateCampaignStatusById")?,
            update_archive: dispatcher.bind("updateCampaignArchiveById")?,
            update_content: dispatcher.bind("updateCampaignContentById")?,
            test_send: dispatcher.bind("testCampaignById")?,
            running_stats: dispatcher.bind("getRunningCampaignStats")?,
            analytics: dispatcher.bind("getCampaignAnalytics")?,
            dispatcher,
        })
    }

    /// Renders the stored campaign.
    pub async fn preview(&self, id: u64) -> Result<Envelope<String>, ApiError> {
        self.dispatcher
            .call(&self.preview, CallOptions::new().id(id))
            .await
    }

    /// Renders `body` (`{"body", "content_type", "template_id"}`) in place of
    /// the stored content.
    pub async fn render_preview(&self, id: u64, body: Value) -> Result<Envelope<String>, ApiError> {
        self.dispatcher
            .call(&self.render_preview, CallOptions::new().id(id).json(body))
            .await
    }

    /// Plain-text rendering of `body`.
    pub async fn preview_text(&self, id: u64, body: Value) -> Result<Envelope<String>, ApiError> {
        self.dispatcher
            .call(&self.preview_text, CallOptions::new().id(id).json(body))
            .await
    }

    pub async fn update_status(
        &self,
        id: u64,
        status: CampaignStatus,
    ) -> Result<Envelope<Campaign>, ApiError> {
        let options = CallOptions::new().id(id).json(json!({ "status": status }));
        self.dispatcher.call(&self.update_status, options).await
    }

    /// Publishes or hides the campaign in the public archive.
    pub async fn update_archive(&self, id: u64, archive: Value) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher
            .call(&self.update_archive, CallOptions::new().id(id).json(archive))
            .await
    }

    /// Replaces the body and content type.
    pub async fn update_content(&self, id: u64, content: Value) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher
            .call(&self.update_content, CallOptions::new().id(id).json(content))
            .await
    }

    /// Sends the campaign to the given addresses only.
    ///
    /// `campaign` carries the campaign fields to render with; the server
    /// requires them even for a stored campaign. `subscribers` is added to it.
    pub async fn test_send(
        &self,
        id: u64,
        campaign: Value,
        subscribers: &[String],
    ) -> Result<Envelope<bool>, ApiError> {
        let mut body = match campaign {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(ApiError::InvalidRequest(format!(
                    "test campaign body must be an object, got {other}"
                )))
            }
        };
        body.insert("subscribers".to_string(), json!(subscribers));

        let options = CallOptions::new().id(id).json(Value::Object(body));
        self.dispatcher.call(&self.test_send, options).await
    }

    /// Progress of running campaigns; all running campaigns when `ids` is
    /// empty.
    pub async fn running_stats(&self, ids: &[u64]) -> Result<Envelope<Value>, ApiError> {
        let mut options = CallOptions::new();
        if !ids.is_empty() {
            options = options.query("campaign_id", json!(ids));
        }
        self.dispatcher.call(&self.running_stats, options).await
    }

    /// View, click, bounce or link counts for campaigns between two dates
    /// (`YYYY-MM-DD`).
    pub async fn analytics(
        &self,
        kind: AnalyticsKind,
        ids: &[u64],
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Envelope<Value>, ApiError> {
        let mut options = CallOptions::new()
            .path("type", kind.as_str())
            .query("id", json!(ids));
        if let Some(from) = from {
            options = options.query("from", from);
        }
        if let Some(to) = to {
            options = options.query("to", to);
        }
        self.dispatcher.call(&self.analytics, options).await
    }
}

impl Deref for Campaigns {
    type Target = ResourceOps<Campaign>;

    fn deref(&self) -> &Self::Target {
        &self.ops
    }
}
