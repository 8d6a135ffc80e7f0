//
//  listmonk-ops
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resource namespaces of the listmonk API.
//!
//! Each namespace wraps a [`ResourceOps`](super::resource::ResourceOps) set
//! for its resource and adds the bespoke operations that only that resource
//! has. The generic five (`create`, `list`, `get_by_id`, `update`, `delete`)
//! are reached through `Deref`:
//!
//! ```rust,no_run
//! use listmonk_ops::{Config, ListmonkClient};
//!
//! # async fn example() -> Result<(), listmonk_ops::ApiError> {
//! let client = ListmonkClient::new(Config::new("http://localhost:9000/api", "api-admin", "token"))?;
//!
//! // Generic
//! let page = client.subscribers().list(None).await?;
//!
//! // Bespoke
//! let ids: Vec<u64> = page.data.results.iter().map(|s| s.id).collect();
//! client.subscribers().blocklist(&ids).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Models
//!
//! The models keep the fields this crate reads as typed fields. Everything
//! else the server sends lands in an `extra` map, so a newer server never
//! breaks decoding.

/// Campaign model and namespace.
pub mod campaigns;

/// Mailing list model and namespace.
pub mod lists;

/// Media model and namespace.
pub mod media;

/// Subscriber model, list membership helpers and namespace.
pub mod subscribers;

/// Template model and namespace.
pub mod templates;

pub use campaigns::{AnalyticsKind, Campaign, CampaignStatus, Campaigns};
pub use lists::{Lists, MailingList};
pub use media::{Media, MediaLibrary};
pub use subscribers::{ListMembership, MembershipAction, Subscriber, SubscriberQuery, Subscribers};
pub use templates::{Template, Templates};

use serde::{Deserialize, Deserializer};

/// Reads `null` as the type's default. listmonk sends `null` for empty
/// arrays and objects.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
