//
//  listmonk-ops
//  api/services/settings.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server settings.
//!
//! Settings are one large document keyed by dotted names (`app.root_url`,
//! `smtp`, `privacy.allow_export`, ...). They are passed through as JSON;
//! [`Settings::update`] replaces the whole document, so read, modify and
//! write it back.
//!
//! Updating settings makes the server restart itself. Passwords come back
//! masked and are left unchanged when written back masked.

use serde_json::Value;

use crate::api::common::{ApiError, Envelope};
use crate::api::dispatch::Dispatcher;
use crate::api::operations::Operation;
use crate::api::options::CallOptions;

/// The `settings` namespace.
#[derive(Debug, Clone)]
pub struct Settings {
    dispatcher: Dispatcher,
    get: Operation,
    update: Operation,
    test_smtp: Operation,
}

impl Settings {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            get: dispatcher.bind("getSettings")?,
            update: dispatcher.bind("updateSettings")?,
            test_smtp: dispatcher.bind("testSmtpSettings")?,
            dispatcher,
        })
    }

    pub async fn get(&self) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher.call(&self.get, CallOptions::new()).await
    }

    /// Replaces the settings document.
    pub async fn update(&self, settings: Value) -> Result<Envelope<bool>, ApiError> {
        self.dispatcher
            .call(&self.update, CallOptions::new().json(settings))
            .await
    }

    /// Sends a test e-mail through an SMTP server block, which must include
    /// an `email` recipient.
    pub async fn test_smtp(&self, smtp: Value) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher
            .call(&self.test_smtp, CallOptions::new().json(smtp))
            .await
    }
}
