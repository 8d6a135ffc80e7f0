//
//  listmonk-ops
//  api/resources/media.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Media library.
//!
//! Files are added with [`MediaLibrary::upload`], which sends a multipart
//! form with the file in the `file` field.
//!
//! ```rust,no_run
//! use listmonk_ops::api::transport::FilePart;
//! use listmonk_ops::{Config, ListmonkClient};
//!
//! # async fn example() -> Result<(), listmonk_ops::ApiError> {
//! let client = ListmonkClient::new(Config::new("http://localhost:9000/api", "api-admin", "token"))?;
//! let uploaded = client.media().upload(FilePart::from_path("banner.png")?).await?;
//! println!("{}", uploaded.data.url);
//! # Ok(())
//! # }
//! ```

use std::ops::Deref;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::common::{ApiError, Envelope};
use crate::api::dispatch::Dispatcher;
use crate::api::operations::Operation;
use crate::api::options::CallOptions;
use crate::api::resource::{Resource, ResourceOps};
use crate::api::transport::{FilePart, MultipartBody};

/// An uploaded file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub id: u64,
    pub uuid: String,
    pub filename: String,
    pub content_type: String,

    /// Public URL of the file.
    pub url: String,
    pub thumb_url: Option<String>,
    pub provider: String,
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `media` namespace.
#[derive(Debug, Clone)]
pub struct MediaLibrary {
    ops: ResourceOps<Media>,
    dispatcher: Dispatcher,
    upload: Operation,
}

impl MediaLibrary {
    pub(crate) fn bind(dispatcher: Dispatcher) -> Result<Self, ApiError> {
        Ok(Self {
            ops: ResourceOps::bind(Resource::Media, dispatcher.clone())?,
            upload: dispatcher.bind("uploadMedia")?,
            dispatcher,
        })
    }

    /// Uploads a file.
    pub async fn upload(&self, file: FilePart) -> Result<Envelope<Media>, ApiError> {
        let options = CallOptions::new().multipart(MultipartBody::new(file));
        self.dispatcher.call(&self.upload, options).await
    }
}

impl Deref for MediaLibrary {
    type Target = ResourceOps<Media>;

    fn deref(&self) -> &Self::Target {
        &self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{dispatcher, RecordingTransport};
    use crate::api::transport::RequestBody;
    use serde_json::json;

    #[tokio::test]
    async fn test_upload_sends_multipart() {
        let transport = RecordingTransport::new();
        transport.respond(
            200,
            json!({"data": {"id": 9, "filename": "logo.png", "url": "http://localhost:9000/uploads/logo.png"}}),
        );
        let media = MediaLibrary::bind(dispatcher(transport.clone())).unwrap();

        let file = FilePart {
            field: "file".into(),
            file_name: "logo.png".into(),
            mime: Some("image/png".into()),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        };
        let uploaded = media.upload(file).await.unwrap();
        assert_eq!(uploaded.data.id, 9);
        assert_eq!(uploaded.data.filename, "logo.png");

        let request = transport.last();
        assert_eq!(request.operation, "uploadMedia");
        match request.body {
            Some(RequestBody::Multipart(body)) => {
                assert_eq!(body.file.field, "file");
                assert_eq!(body.file.bytes.len(), 4);
            }
            other => panic!("expected multipart, got {other:?}"),
        }
    }
}
