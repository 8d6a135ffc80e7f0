//
//  listmonk-ops
//  api/resources/templates.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! E-mail templates.

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::common::{ApiError, Envelope};
use crate::api::dispatch::Dispatcher;
use crate::api::operations::Operation;
use crate::api::options::CallOptions;
use crate::api::resource::{Resource, ResourceOps};

/// A campaign, transactional or visual template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Template {
    pub id: u64,
    pub name: String,

    /// `campaign`, `campaign_visual` or `tx`.
    #[serde(rename = "type")]
    pub template_type: String,

    /// Subject line; transactional templates only.
    pub subject: Option<String>,
    pub body: String,
    pub is_default: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `templates` namespace.
#[derive(Debug, Clone)]
pub struct Templates {
    ops: ResourceOps<Template>,
    dispatcher: Dispatcher,
    set_default: Operation,
    preview: Operation,
    render_preview: Operation,
}

impl Templates {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            ops: ResourceOps::bind(Resource::Template, dispatcher.clone())?,
            set_default: dispatcher.bind("updateTemplateDefaultById")?,
            preview: dispatcher.bind("getTemplatePreviewById")?,
            render_preview: dispatcher.bind("previewTemplate")?,
            dispatcher,
        })
    }

    /// Makes the template the default for new campaigns.
    pub async fn set_default(&self, id: u64) -> Result<Envelope<Value>, ApiError> {
        self.dispatcher
            .call(&self.set_default, CallOptions::new().id(id))
            .await
    }

    /// Renders a stored template with dummy content.
    pub async fn preview(&self, id: u64) -> Result<Envelope<String>, ApiError> {
        self.dispatcher
            .call(&self.preview, CallOptions::new().id(id))
            .await
    }

    /// Renders an unsaved template body (`{"type", "body"}`).
    pub async fn render_preview(&self, template: Value) -> Result<Envelope<String>, ApiError> {
        self.dispatcher
            .call(&self.render_preview, CallOptions::new().json(template))
            .await
    }
}

impl Deref for Templates {
    type Target = ResourceOps<Template>;

    fn deref(&self) -> &Self::Target {
        &self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::operations::HttpMethod;
    use crate::api::testing::{dispatcher, json_body, RecordingTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_bespoke_template_operations() {
        let transport = RecordingTransport::new();
        transport.respond(200, json!({"data": [{"id": 3, "is_default": true}]}));
        transport.respond(200, json!("<html>preview</html>"));
        let templates = Templates::bind(dispatcher(transport.clone())).unwrap();

        templates.set_default(3).await.unwrap();
        let rendered = templates
            .render_preview(json!({"type": "campaign", "body": "{{ template \"content\" . }}"}))
            .await
            .unwrap();
        assert_eq!(rendered.data, "<html>preview</html>");

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[0].url.path(), "/api/templates/3/default");
        assert_eq!(requests[1].url.path(), "/api/templates/preview");
        assert_eq!(json_body(&requests[1])["type"], "campaign");
    }

    #[test]
    fn test_template_model() {
        let template: Template = serde_json::from_value(json!({
            "id": 1,
            "name": "Default",
            "type": "campaign",
            "is_default": true
        }))
        .unwrap();
        assert_eq!(template.template_type, "campaign");
        assert!(template.is_default);
        assert!(template.subject.is_none());
    }
}
