//
//  listmonk-ops
//  api/operations.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Operation Table
//!
//! Every listmonk endpoint the client can call, keyed by the operation name
//! used in listmonk's OpenAPI description (`getLists`, `createList`,
//! `getListById`, ...).
//!
//! The façade never builds URLs by hand: resources and bespoke operations
//! look their endpoints up here by name when the client is constructed, so a
//! name missing from the table is reported before any request is sent.
//!
//! Path templates use `{param}` placeholders filled from
//! [`CallOptions::path`](super::options::CallOptions::path).

use std::collections::HashMap;
use std::fmt;

use super::common::ApiError;

/// HTTP verbs used by the listmonk API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One endpoint of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation name, e.g. `getListById`.
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path relative to the API root, e.g. `/lists/{id}`.
    pub path: &'static str,
}

impl Operation {
    pub const fn new(name: &'static str, method: HttpMethod, path: &'static str) -> Self {
        Self { name, method, path }
    }

    /// Names of the `{param}` placeholders in the path template.
    pub fn path_params(&self) -> impl Iterator<Item = &'static str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
    }
}

use HttpMethod::{Delete, Get, Post, Put};

/// The listmonk endpoints known to this client.
pub static LISTMONK_OPERATIONS: &[Operation] = &[
    // Lists
    Operation::new("getLists", Get, "/lists"),
    Operation::new("createList", Post, "/lists"),
    Operation::new("getListById", Get, "/lists/{id}"),
    Operation::new("updateListById", Put, "/lists/{id}"),
    Operation::new("deleteListById", Delete, "/lists/{id}"),
    // Subscribers
    Operation::new("getSubscribers", Get, "/subscribers"),
    Operation::new("createSubscriber", Post, "/subscribers"),
    Operation::new("getSubscriberById", Get, "/subscribers/{id}"),
    Operation::new("updateSubscriberById", Put, "/subscribers/{id}"),
    Operation::new("deleteSubscriberById", Delete, "/subscribers/{id}"),
    Operation::new("deleteSubscribers", Delete, "/subscribers"),
    Operation::new("deleteSubscribersByQuery", Post, "/subscribers/query/delete"),
    Operation::new("manageSubscriberLists", Put, "/subscribers/lists"),
    Operation::new("manageSubscriberListsByQuery", Put, "/subscribers/query/lists"),
    Operation::new("blocklistSubscribers", Put, "/subscribers/blocklist"),
    Operation::new("blocklistSubscriberById", Put, "/subscribers/{id}/blocklist"),
    Operation::new("blocklistSubscribersByQuery", Put, "/subscribers/query/blocklist"),
    Operation::new("exportSubscriberDataById", Get, "/subscribers/{id}/export"),
    Operation::new("subscriberSendOptinById", Post, "/subscribers/{id}/optin"),
    Operation::new("getSubscriberBouncesById", Get, "/subscribers/{id}/bounces"),
    Operation::new("deleteSubscriberBouncesById", Delete, "/subscribers/{id}/bounces"),
    // Campaigns
    Operation::new("getCampaigns", Get, "/campaigns"),
    Operation::new("createCampaign", Post, "/campaigns"),
    Operation::new("getCampaignById", Get, "/campaigns/{id}"),
    Operation::new("updateCampaignById", Put, "/campaigns/{id}"),
    Operation::new("deleteCampaignById", Delete, "/campaigns/{id}"),
    Operation::new("getCampaignPreviewById", Get, "/campaigns/{id}/preview"),
    Operation::new("previewCampaignById", Post, "/campaigns/{id}/preview"),
    Operation::new("previewCampaignTextById", Post, "/campaigns/{id}/text"),
    Operation::new("updateCampaignStatusById", Put, "/campaigns/{id}/status"),
    Operation::new("updateCampaignArchiveById", Put, "/campaigns/{id}/archive"),
    Operation::new("updateCampaignContentById", Put, "/campaigns/{id}/content"),
    Operation::new("testCampaignById", Post, "/campaigns/{id}/test"),
    Operation::new("getRunningCampaignStats", Get, "/campaigns/running/stats"),
    Operation::new("getCampaignAnalytics", Get, "/campaigns/analytics/{type}"),
    // Templates
    Operation::new("getTemplates", Get, "/templates"),
    Operation::new("createTemplate", Post, "/templates"),
    Operation::new("getTemplateById", Get, "/templates/{id}"),
    Operation::new("updateTemplateById", Put, "/templates/{id}"),
    Operation::new("deleteTemplateById", Delete, "/templates/{id}"),
    Operation::new("updateTemplateDefaultById", Put, "/templates/{id}/default"),
    Operation::new("getTemplatePreviewById", Get, "/templates/{id}/preview"),
    Operation::new("previewTemplate", Post, "/templates/preview"),
    // Media
    Operation::new("getMedia", Get, "/media"),
    Operation::new("createMedia", Post, "/media"),
    Operation::new("getMediaById", Get, "/media/{id}"),
    Operation::new("updateMediaById", Put, "/media/{id}"),
    Operation::new("deleteMediaById", Delete, "/media/{id}"),
    Operation::new("uploadMedia", Post, "/media"),
    // Import
    Operation::new("importSubscribers", Post, "/import/subscribers"),
    Operation::new("stopImportSubscribers", Delete, "/import/subscribers"),
    Operation::new("getImportSubscribers", Get, "/import/subscribers"),
    Operation::new("getImportSubscriberLogs", Get, "/import/subscribers/logs"),
    // Bounces
    Operation::new("getBounces", Get, "/bounces"),
    Operation::new("getBounceById", Get, "/bounces/{id}"),
    Operation::new("deleteBounces", Delete, "/bounces"),
    Operation::new("deleteBounceById", Delete, "/bounces/{id}"),
    // Transactional
    Operation::new("transactWithSubscriber", Post, "/tx"),
    // Settings
    Operation::new("getSettings", Get, "/settings"),
    Operation::new("updateSettings", Put, "/settings"),
    Operation::new("testSmtpSettings", Post, "/settings/smtp/test"),
    // Dashboard
    Operation::new("getDashboardCharts", Get, "/dashboard/charts"),
    Operation::new("getDashboardCounts", Get, "/dashboard/counts"),
    // System
    Operation::new("getServerConfig", Get, "/config"),
    Operation::new("getLogs", Get, "/logs"),
    Operation::new("reloadApp", Post, "/admin/reload"),
    Operation::new("getHealthCheck", Get, "/health"),
];

/// Name-indexed view over a set of operations.
///
/// # Example
///
/// ```rust
/// use listmonk_ops::api::operations::OperationTable;
///
/// let table = OperationTable::listmonk();
/// assert_eq!(table.resolve("getListById").unwrap().path, "/lists/{id}");
///
/// let trimmed = table.without("getListById");
/// assert!(trimmed.resolve("getListById").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct OperationTable {
    operations: HashMap<&'static str, Operation>,
}

impl OperationTable {
    /// The full listmonk table.
    pub fn listmonk() -> Self {
        Self::from_operations(LISTMONK_OPERATIONS.iter().copied())
    }

    /// Builds a table from explicit operations; later entries replace earlier
    /// ones with the same name.
    pub fn from_operations<I>(operations: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        Self {
            operations: operations.into_iter().map(|op| (op.name, op)).collect(),
        }
    }

    /// Returns the table without `name`.
    pub fn without(mut self, name: &str) -> Self {
        self.operations.remove(name);
        self
    }

    /// Returns the table with `operation` added or replaced.
    pub fn with(mut self, operation: Operation) -> Self {
        self.operations.insert(operation.name, operation);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    /// Looks an operation up by name.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingOperation`] naming `name` when it is absent.
    pub fn resolve(&self, name: &str) -> Result<Operation, ApiError> {
        self.get(name)
            .copied()
            .ok_or_else(|| ApiError::MissingOperation {
                operation: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_operation_names_are_unique() {
        let names: HashSet<_> = LISTMONK_OPERATIONS.iter().map(|op| op.name).collect();
        assert_eq!(names.len(), LISTMONK_OPERATIONS.len());
        assert_eq!(OperationTable::listmonk().len(), LISTMONK_OPERATIONS.len());
    }

    #[test]
    fn test_path_params() {
        let op = Operation::new("getCampaignAnalytics", Get, "/campaigns/analytics/{type}");
        assert_eq!(op.path_params().collect::<Vec<_>>(), vec!["type"]);

        let op = Operation::new("getLists", Get, "/lists");
        assert_eq!(op.path_params().count(), 0);
    }

    #[test]
    fn test_missing_operation_is_named() {
        let err = OperationTable::default().resolve("getLists").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation 'getLists' is missing from the operation table"
        );
    }
}
