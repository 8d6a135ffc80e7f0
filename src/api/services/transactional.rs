//
//  listmonk-ops
//  api/services/transactional.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Transactional messages.
//!
//! A transactional message renders a `tx` template for one subscriber (by
//! e-mail or ID) with arbitrary `data` and sends it immediately.
//!
//! ```rust,no_run
//! use listmonk_ops::api::services::TxMessage;
//! use listmonk_ops::{Config, ListmonkClient};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), listmonk_ops::ApiError> {
//! let client = ListmonkClient::new(Config::new("http://localhost:9000/api", "api-admin", "token"))?;
//! let message = TxMessage::to_email("ada@example.com", 4).with_data(json!({"order": "A-1029"}));
//! client.transactional().send(&message).await?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::api::common::{ApiError, Envelope};
use crate::api::dispatch::Dispatcher;
use crate::api::operations::Operation;
use crate::api::options::CallOptions;

/// A transactional message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TxMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<u64>,

    pub template_id: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,

    /// Template variables, available as `.Tx.Data`.
    #[serde(skip_serializing_if = "Value::is_null")]
    pub data: Value,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub messenger: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl TxMessage {
    pub fn to_email(email: impl Into<String>, template_id: u64) -> Self {
        Self {
            subscriber_email: Some(email.into()),
            template_id,
            ..Default::default()
        }
    }

    pub fn to_subscriber(id: u64, template_id: u64) -> Self {
        Self {
            subscriber_id: Some(id),
            template_id,
            ..Default::default()
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

/// The `transactional` namespace.
#[derive(Debug, Clone)]
pub struct Transactional {
    dispatcher: Dispatcher,
    send: Operation,
}

impl Transactional {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            send: dispatcher.bind("transactWithSubscriber")?,
            dispatcher,
        })
    }

    /// Sends `message`.
    ///
    /// # Errors
    ///
    /// [`ApiError::InvalidRequest`] when the message names no recipient,
    /// before anything is sent.
    pub async fn send(&self, message: &TxMessage) -> Result<Envelope<bool>, ApiError> {
        if message.subscriber_email.is_none() && message.subscriber_id.is_none() {
            return Err(ApiError::InvalidRequest(
                "a transactional message needs a subscriber e-mail or ID".into(),
            ));
        }

        let body =
            serde_json::to_value(message).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.dispatcher
            .call(&self.send, CallOptions::new().json(body))
            .await
    }
}
