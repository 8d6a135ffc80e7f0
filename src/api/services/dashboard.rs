//
//  listmonk-ops
//  api/services/dashboard.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Dashboard aggregates.

use serde_json::Value;

use crate::api::common::{ApiError, Envelope};
use crate::api::dispatch::Dispatcher;
use crate::api::operations::Operation;
use crate::api::options::CallOptions;

/// The `dashboard` namespace.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dispatcher: Dispatcher,
    charts: Operation,
    counts: Operation,
}

impl Dashboard {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            charts: dispatcher.bind("getDashboardCharts")?,
            counts: dispatcher.bind("getDashboardCounts")?,
            dispatcher,
        })
    }

    /// Daily campaign views and link clicks for the last 30 days.
    pub async fn charts(&self) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher.call(&self.charts, CallOptions::new()).await
    }

    /// Subscriber, list, campaign and message totals.
    pub async fn counts(&self) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher.call(&self.counts, CallOptions::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{dispatcher, RecordingTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_counts() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"data": {"subscribers": {"total": 12}, "lists": {"total": 2}}}));
        let dashboard = Dashboard::bind(dispatcher(transport.clone())).unwrap();

        let counts = dashboard.counts().await.unwrap();
        assert_eq!(counts.data["subscribers"]["total"], 12);
        assert_eq!(transport.last().url.path(), "/api/dashboard/counts");
    }
}
