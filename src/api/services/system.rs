//
//  listmonk-ops
//  api/services/system.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Server configuration, logs, reload and health.

use serde_json::Value;

use crate::api::common::{ApiError, Envelope};
use crate::api::dispatch::Dispatcher;
use crate::api::operations::Operation;
use crate::api::options::CallOptions;

/// The `system` namespace.
#[derive(Debug, Clone)]
pub struct System {
    dispatcher: Dispatcher,
    config: Operation,
    logs: Operation,
    reload: Operation,
    health: Operation,
}

impl System {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            config: dispatcher.bind("getServerConfig")?,
            logs: dispatcher.bind("getLogs")?,
            reload: dispatcher.bind("reloadApp")?,
            health: dispatcher.bind("getHealthCheck")?,
            dispatcher,
        })
    }

    /// Public server configuration: root URL, languages, messengers and
    /// version.
    pub async fn config(&self) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher.call(&self.config, CallOptions::new()).await
    }

    /// Recent server log lines.
    pub async fn logs(&self) -> Result<Envelope<Vec<String>>, ApiError> {
        self.dispatcher.call(&self.logs, CallOptions::new()).await
    }

    /// Restarts the application, reloading settings.
    pub async fn reload(&self) -> Result<Envelope<bool>, ApiError> {
        self.dispatcher.call(&self.reload, CallOptions::new()).await
    }

    pub async fn health(&self) -> Result<Envelope<bool>, ApiError> {
        self.dispatcher.call(&self.health, CallOptions::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operations::HttpMethod;
    use crate::api::testing::{dispatcher, RecordingTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_logs_and_reload() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"data": ["line one", "line two"]}));
        let system = System::bind(dispatcher(transport.clone())).unwrap();

        let logs = system.logs().await.unwrap();
        assert_eq!(logs.data, vec!["line one", "line two"]);

        assert!(system.reload().await.unwrap().data);
        let request = transport.last();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url.path(), "/api/admin/reload");
    }

    #[tokio::test]
    async fn test_health_failure_is_typed() {
        let transport = RecordingTransport::new();
        transport.respond(503, json!({"message": "database unavailable"}));
        let system = System::bind(dispatcher(transport)).unwrap();

        let err = system.health().await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 503, .. }));
        assert_eq!(err.to_string(), "database unavailable");
    }
}
