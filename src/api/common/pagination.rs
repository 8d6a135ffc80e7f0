//
//  listmonk-ops
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for listmonk List Responses
//!
//! listmonk paginates with `page` and `per_page` query parameters and answers
//! every list endpoint with the same shape:
//!
//! ```json
//! {"results": [...], "total": 42, "page": 1, "per_page": 20}
//! ```
//!
//! `per_page` may also come back as the string `"all"` when the caller asked
//! for every record; it is read as `0` and [`Page::total_pages`] then reports
//! a single page.
//!
//! # Notes
//!
//! - Result order is server defined and not stable across calls
//! - Pages are 1-indexed

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Envelope;

/// One page of a listmonk list endpoint.
///
/// # Example
///
/// ```rust
/// use listmonk_ops::api::common::Page;
///
/// let json = r#"{"results": [1, 2], "total": 5, "page": 1, "per_page": 2}"#;
/// let page: Page<u32> = serde_json::from_str(json).unwrap();
///
/// assert_eq!(page.total_pages(), 3);
/// assert!(!page.is_last_page());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Items of the current page. Empty when the query matched nothing.
    #[serde(default = "Vec::new", deserialize_with = "nullable_vec")]
    pub results: Vec<T>,

    /// Total number of matching items across all pages.
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: u64,

    /// Current page number (1-indexed).
    #[serde(default, deserialize_with = "lenient_count")]
    pub page: u64,

    /// Page size; `0` when every record was requested.
    #[serde(default, deserialize_with = "lenient_count")]
    pub per_page: u64,
}

/// An [`Envelope`] around a [`Page`]; the result of every `list` call.
pub type PagedEnvelope<T> = Envelope<Page<T>>;

impl<T> Page<T> {
    /// Number of pages for the reported total and page size.
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(self.per_page).max(1)
    }

    /// Whether this is the final page.
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages()
    }

    /// Next page number, if there is one.
    pub fn next_page(&self) -> Option<u64> {
        (!self.is_last_page()).then(|| self.page + 1)
    }
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    })
}
