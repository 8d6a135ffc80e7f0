//
//  listmonk-ops
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use super::common::ApiError;
use super::dispatch::Dispatcher;
use super::operations::OperationTable;
use super::options::CallOptions;
use super::transport::{ApiRequest, RawResponse, RequestBody, Transport};

/// Records every request and answers with queued responses, falling back to
/// `200 {"data": true}`.
#[derive(Default)]
pub(crate) struct RecordingTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn respond(&self, status: u16, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .push_back(RawResponse::new(status, body));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RawResponse::new(200, json!({"data": true})));
        Ok(response)
    }
}

pub(crate) fn dispatcher(transport: Arc<RecordingTransport>) -> Dispatcher {
    Dispatcher::new(
        Url::parse("http://localhost:9000/api").unwrap(),
        OperationTable::listmonk(),
        transport,
        CallOptions::default(),
    )
}

/// The JSON body of a recorded request.
pub(crate) fn json_body(request: &ApiRequest) -> Value {
    match &request.body {
        Some(RequestBody::Json(body)) => body.clone(),
        other => panic!("expected a JSON body, got {other:?}"),
    }
}
