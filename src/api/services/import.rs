//
//  listmonk-ops
//  api/services/import.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bulk subscriber import.
//!
//! The server runs one import at a time. [`Import::start`] uploads a CSV (or
//! a ZIP holding one) together with the import parameters;
//! [`Import::status`] and [`Import::logs`] follow its progress and
//! [`Import::stop`] cancels it or clears a finished one.

use serde::Serialize;
use serde_json::Value;

use crate::api::common::{ApiError, Envelope};
use crate::api::dispatch::Dispatcher;
use crate::api::operations::Operation;
use crate::api::options::CallOptions;
use crate::api::transport::{FilePart, MultipartBody};

/// What the import does with each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    #[default]
    Subscribe,
    Blocklist,
}

/// Parameters sent in the `params` form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportParams {
    pub mode: ImportMode,

    /// Status given to new subscriptions: `confirmed`, `unconfirmed` or
    /// `unsubscribed`.
    pub subscription_status: String,

    /// CSV delimiter.
    pub delim: String,

    /// Lists the imported subscribers are added to.
    pub lists: Vec<u64>,

    /// Overwrite name and attributes of existing subscribers.
    pub overwrite: bool,
}

impl Default for ImportParams {
    fn default() -> Self {
        Self {
            mode: ImportMode::Subscribe,
            subscription_status: "unconfirmed".to_string(),
            delim: ",".to_string(),
            lists: Vec::new(),
            overwrite: false,
        }
    }
}

/// The `import` namespace.
#[derive(Debug, Clone)]
pub struct Import {
    dispatcher: Dispatcher,
    start: Operation,
    stop: Operation,
    status: Operation,
    logs: Operation,
}

impl Import {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            start: dispatcher.bind("importSubscribers")?,
            stop: dispatcher.bind("stopImportSubscribers")?,
            status: dispatcher.bind("getImportSubscribers")?,
            logs: dispatcher.bind("getImportSubscriberLogs")?,
            dispatcher,
        })
    }

    /// Starts an import of `file`.
    pub async fn start(&self, params: &ImportParams, file: FilePart) -> Result<Envelope<Value>, ApiError> {
        let params =
            serde_json::to_string(params).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let body = MultipartBody::new(file).field("params", params);
        self.dispatcher
            .call(&self.start, CallOptions::new().multipart(body))
            .await
    }

    pub async fn stop(&self) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher.call(&self.stop, CallOptions::new()).await
    }

    /// Name, total, imported count and status of the current import.
    pub async fn status(&self) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher.call(&self.status, CallOptions::new()).await
    }

    /// The import log as text.
    pub async fn logs(&self) -> Result<Envelope<String>, ApiError> {
        self.dispatcher.call(&self.logs, CallOptions::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operations::HttpMethod;
    use crate::api::testing::{dispatcher, RecordingTransport};
    use crate::api::transport::RequestBody;
    use serde_json::json;

    #[tokio::test]
    async fn test_start_sends_params_field() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"data": {"status": "importing"}}));
        let import = Import::bind(dispatcher(transport.clone())).unwrap();

        let params = ImportParams {
            lists: vec![1, 2],
            overwrite: true,
            ..Default::default()
        };
        let file = FilePart {
            field: "file".into(),
            file_name: "subscribers.csv".into(),
            mime: Some("text/csv".into()),
            bytes: b"email,name\na@example.com,A\n".to_vec(),
        };
        let started = import.start(&params, file).await.unwrap();
        assert_eq!(started.data["status"], "importing");

        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url.path(), "/api/import/subscribers");
        let Some(RequestBody::Multipart(body)) = request.body else {
            panic!("expected multipart body");
        };
        let sent: Value = serde_json::from_str(&body.fields["params"]).unwrap();
        assert_eq!(
            sent,
            json!({
                "mode": "subscribe",
                "subscription_status": "unconfirmed",
                "delim": ",",
                "lists": [1, 2],
                "overwrite": true
            })
        );
    }

    #[tokio::test]
    async fn test_stop_uses_delete() {
        let transport = RecordingTransport::new();
        let import = Import::bind(dispatcher(transport.clone())).unwrap();
        import.stop().await.unwrap();
        assert_eq!(transport.last().method, HttpMethod::Delete);
    }
}
