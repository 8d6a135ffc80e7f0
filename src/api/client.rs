//
//  listmonk-ops
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # listmonk Client
//!
//! [`ListmonkClient`] assembles every namespace of the API into one value:
//! the five CRUD resources plus the bespoke namespaces.
//!
//! ## Construction
//!
//! Construction validates the configuration and resolves every operation the
//! namespaces use. It performs no I/O; the first request is sent by the
//! first call.
//!
//! | Constructor | Configuration | Transport |
//! |-------------|---------------|-----------|
//! | [`ListmonkClient::new`] | given | `reqwest` |
//! | [`ListmonkClient::from_env`] | `LISTMONK_*` variables | `reqwest` |
//! | [`ListmonkClient::builder`] | given | any [`Transport`] |
//!
//! ## Sharing
//!
//! The client is `Clone + Send + Sync` and holds only shared immutable
//! state, so clones can be handed to concurrent tasks.
//!
//! ## Example
//!
//! ```rust,no_run
//! use listmonk_ops::{Config, ListmonkClient};
//!
//! # async fn example() -> Result<(), listmonk_ops::ApiError> {
//! let client = ListmonkClient::new(Config::new("http://localhost:9000/api", "api-admin", "token"))?;
//!
//! let counts = client.dashboard().counts().await?;
//! println!("{}", counts.data);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::debug;

use super::common::ApiError;
use super::dispatch::Dispatcher;
use super::operations::OperationTable;
use super::options::CallOptions;
use super::resources::{Campaigns, Lists, MediaLibrary, Subscribers, Templates};
use super::services::{Bounces, Dashboard, Import, Settings, System, Transactional};
use super::transport::{HttpTransport, Transport};
use crate::config::{Config, ConfigOverrides};

/// Resource-oriented listmonk client.
#[derive(Debug, Clone)]
pub struct ListmonkClient {
    config: Arc<Config>,
    lists: Lists,
    subscribers: Subscribers,
    campaigns: Campaigns,
    templates: Templates,
    media: MediaLibrary,
    import: Import,
    bounces: Bounces,
    transactional: Transactional,
    settings: Settings,
    dashboard: Dashboard,
    system: System,
}

impl ListmonkClient {
    /// Builds a client using the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Config`] if the configuration fails validation
    /// - [`ApiError::MissingOperation`] if a namespace operation is missing
    ///   from the operation table
    /// - [`ApiError::Network`] if the HTTP client cannot be built
    pub fn new(config: Config) -> Result<Self, ApiError> {
        Self::builder(config).build()
    }

    /// Builds a client from the `LISTMONK_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(Config::resolve(ConfigOverrides::default())?)
    }

    /// Starts a builder for custom transports, operation tables or base
    /// call options.
    pub fn builder(config: Config) -> ClientBuilder {
        ClientBuilder {
            config,
            transport: None,
            operations: OperationTable::listmonk(),
            base: CallOptions::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn lists(&self) -> &Lists {
        &self.lists
    }

    pub fn subscribers(&self) -> &Subscribers {
        &self.subscribers
    }

    pub fn campaigns(&self) -> &Campaigns {
        &self.campaigns
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    pub fn media(&self) -> &MediaLibrary {
        &self.media
    }

    pub fn import(&self) -> &Import {
        &self.import
    }

    pub fn bounces(&self) -> &Bounces {
        &self.bounces
    }

    pub fn transactional(&self) -> &Transactional {
        &self.transactional
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn system(&self) -> &System {
        &self.system
    }
}

/// Builder for [`ListmonkClient`].
///
/// # Example
///
/// ```rust,no_run
/// use listmonk_ops::api::options::CallOptions;
/// use listmonk_ops::{Config, ListmonkClient};
///
/// let client = ListmonkClient::builder(Config::new("http://localhost:9000/api", "api-admin", "token"))
///     .base_options(CallOptions::new().query("per_page", 100))
///     .build()?;
/// # Ok::<(), listmonk_ops::ApiError>(())
/// ```
pub struct ClientBuilder {
    config: Config,
    transport: Option<Arc<dyn Transport>>,
    operations: OperationTable,
    base: CallOptions,
}

impl ClientBuilder {
    /// Replaces the `reqwest` transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replaces the operation table.
    pub fn operations(mut self, operations: OperationTable) -> Self {
        self.operations = operations;
        self
    }

    /// Options merged under the caller's options on every call.
    pub fn base_options(mut self, base: CallOptions) -> Self {
        self.base = base;
        self
    }

    pub fn build(self) -> Result<ListmonkClient, ApiError> {
        self.config.validate()?;
        let base_url = self.config.base()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };

        debug!(
            base_url = %base_url,
            operations = self.operations.len(),
            "building listmonk client"
        );
        let dispatcher = Dispatcher::new(base_url, self.operations, transport, self.base);

        Ok(ListmonkClient {
            config: Arc::new(self.config),
            lists: Lists::bind(dispatcher.clone())?,
            subscribers: Subscribers::bind(dispatcher.clone())?,
            campaigns: Campaigns::bind(dispatcher.clone())?,
            templates: Templates::bind(dispatcher.clone())?,
            media: MediaLibrary::bind(dispatcher.clone())?,
            import: Import::bind(dispatcher.clone())?,
            bounces: Bounces::bind(dispatcher.clone())?,
            transactional: Transactional::bind(dispatcher.clone())?,
            settings: Settings::bind(dispatcher.clone())?,
            dashboard: Dashboard::bind(dispatcher.clone())?,
            system: System::bind(dispatcher)?,
        })
    }
}
