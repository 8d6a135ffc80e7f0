//
//  listmonk-ops
//  api/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Generic Resource Operations
//!
//! listmonk exposes five resources through the same five conventional
//! operations. This module maps each [`Resource`] to its operation names at
//! compile time ([`ResourceDescriptor`]) and binds them into a typed
//! [`ResourceOps`] set when the client is built.
//!
//! | Resource | create | list | get | update | delete |
//! |----------|--------|------|-----|--------|--------|
//! | List | `createList` | `getLists` | `getListById` | `updateListById` | `deleteListById` |
//! | Subscriber | `createSubscriber` | `getSubscribers` | `getSubscriberById` | `updateSubscriberById` | `deleteSubscriberById` |
//! | Campaign | `createCampaign` | `getCampaigns` | `getCampaignById` | `updateCampaignById` | `deleteCampaignById` |
//! | Template | `createTemplate` | `getTemplates` | `getTemplateById` | `updateTemplateById` | `deleteTemplateById` |
//! | Media | `createMedia` | `getMedia` | `getMediaById` | `updateMediaById` | `deleteMediaById` |
//!
//! Binding fails with [`ApiError::MissingOperation`] if any of the five names
//! is absent from the operation table.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::common::{ApiError, CrudResult, Envelope, PagedEnvelope};
use super::dispatch::Dispatcher;
use super::operations::Operation;
use super::options::CallOptions;

/// The resources exposed through the five conventional operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    List,
    Subscriber,
    Campaign,
    Template,
    Media,
}

/// Operation names of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub create: &'static str,
    pub list: &'static str,
    pub get_by_id: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

impl ResourceDescriptor {
    /// All five names, in create/list/get/update/delete order.
    pub fn names(&self) -> [&'static str; 5] {
        [self.create, self.list, self.get_by_id, self.update, self.delete]
    }
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::List,
        Resource::Subscriber,
        Resource::Campaign,
        Resource::Template,
        Resource::Media,
    ];

    /// Singular name used in operation names.
    pub fn name(self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Subscriber => "Subscriber",
            Self::Campaign => "Campaign",
            Self::Template => "Template",
            Self::Media => "Media",
        }
    }

    /// Plural name used by the list operation.
    pub fn plural(self) -> &'static str {
        match self {
            Self::List => "Lists",
            Self::Subscriber => "Subscribers",
            Self::Campaign => "Campaigns",
            Self::Template => "Templates",
            Self::Media => "Media",
        }
    }

    pub const fn descriptor(self) -> ResourceDescriptor {
        match self {
            Self::List => ResourceDescriptor {
                create: "createList",
                list: "getLists",
                get_by_id: "getListById",
                update: "updateListById",
                delete: "deleteListById",
            },
            Self::Subscriber => ResourceDescriptor {
                create: "createSubscriber",
                list: "getSubscribers",
                get_by_id: "getSubscriberById",
                update: "updateSubscriberById",
                delete: "deleteSubscriberById",
            },
            Self::Campaign => ResourceDescriptor {
                create: "createCampaign",
                list: "getCampaigns",
                get_by_id: "getCampaignById",
                update: "updateCampaignById",
                delete: "deleteCampaignById",
            },
            Self::Template => ResourceDescriptor {
                create: "createTemplate",
                list: "getTemplates",
                get_by_id: "getTemplateById",
                update: "updateTemplateById",
                delete: "deleteTemplateById",
            },
            Self::Media => ResourceDescriptor {
                create: "createMedia",
                list: "getMedia",
                get_by_id: "getMediaById",
                update: "updateMediaById",
                delete: "deleteMediaById",
            },
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The five conventional operations of one resource, bound and typed.
///
/// Every call merges the dispatcher's base options with the caller's,
/// invokes the bound operation and normalizes the response.
///
/// # Example
///
/// ```rust,no_run
/// use listmonk_ops::api::options::CallOptions;
/// use listmonk_ops::api::common::CrudResult;
/// use listmonk_ops::{Config, ListmonkClient};
///
/// # async fn example() -> Result<(), listmonk_ops::ApiError> {
/// let client = ListmonkClient::new(Config::new("http://localhost:9000/api", "api-admin", "token"))?;
/// match client.lists().get_by_id(CallOptions::new().id(1)).await? {
///     CrudResult::Found(list) => println!("{}", list.data.name),
///     CrudResult::Rejected(rejection) => println!("{}", rejection.message),
/// }
/// # Ok(())
/// # }
/// ```
pub struct ResourceOps<T> {
    resource: Resource,
    create: Operation,
    list: Operation,
    get_by_id: Operation,
    update: Operation,
    delete: Operation,
    dispatcher: Dispatcher,
    model: PhantomData<fn() -> T>,
}

impl<T> Clone for ResourceOps<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource,
            create: self.create,
            list: self.list,
            get_by_id: self.get_by_id,
            update: self.update,
            delete: self.delete,
            dispatcher: self.dispatcher.clone(),
            model: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResourceOps<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceOps")
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> ResourceOps<T> {
    /// Binds the five operations of `resource`.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingOperation`] naming the first absent operation.
    pub fn bind(resource: Resource, dispatcher: Dispatcher) -> Result<Self, ApiError> {
        let names = resource.descriptor();

        Ok(Self {
            resource,
            create: dispatcher.bind(names.create)?,
            list: dispatcher.bind(names.list)?,
            get_by_id: dispatcher.bind(names.get_by_id)?,
            update: dispatcher.bind(names.update)?,
            delete: dispatcher.bind(names.delete)?,
            dispatcher,
            model: PhantomData,
        })
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    /// Creates an entity from the body in `options`.
    pub async fn create(&self, options: CallOptions) -> Result<Envelope<T>, ApiError> {
        self.dispatcher.envelope(&self.create, options).await?.decode()
    }

    /// Lists entities; `options` may carry `page`, `per_page` and filters.
    pub async fn list(&self, options: Option<CallOptions>) -> Result<PagedEnvelope<T>, ApiError> {
        self.dispatcher
            .envelope(&self.list, options.unwrap_or_default())
            .await?
            .decode()
    }

    /// Fetches one entity by the `id` path parameter.
    pub async fn get_by_id(&self, options: CallOptions) -> Result<CrudResult<T>, ApiError> {
        self.dispatcher.crud(&self.get_by_id, options).await?.decode()
    }

    /// Updates one entity by the `id` path parameter.
    pub async fn update(&self, options: CallOptions) -> Result<CrudResult<T>, ApiError> {
        self.dispatcher.crud(&self.update, options).await?.decode()
    }

    /// Deletes one entity by the `id` path parameter.
    pub async fn delete(&self, options: CallOptions) -> Result<Envelope<bool>, ApiError> {
        self.dispatcher.envelope(&self.delete, options).await?.decode()
    }
}
