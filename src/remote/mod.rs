//! Remote catalog gateway.
//!
//! The catalog collection endpoint takes the flat query parameters of a
//! [`CatalogQuery`](crate::query::CatalogQuery) and answers with an envelope:
//! `{ success, data: { courses, pagination } }` on success, or
//! `{ success: false, message }` on failure. Everything that can go wrong on
//! the way (transport failures, non-2xx statuses, `success: false`
//! envelopes) is normalized here into a single user-displayable
//! [`FetchError`] so no raw error object ever reaches rendering.

pub mod http;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SyllabusError;
use crate::query::{CatalogQuery, PAGE_SIZE};
use crate::types::CourseSummary;

pub use http::HttpCatalogProvider;

/// Shown when neither the server nor the transport produced a usable message.
pub const GENERIC_FETCH_ERROR: &str = "unable to load courses, please try again";

/// Server-reported pagination. Read-only from the client's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_courses: u64,
    #[serde(default = "default_page_limit")]
    pub limit: u32,
}

fn default_page_limit() -> u32 {
    PAGE_SIZE
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursePage {
    #[serde(default)]
    pub courses: Vec<CourseSummary>,
    pub pagination: Pagination,
}

/// A fetch failure carrying the message to put in front of the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self {
                message: GENERIC_FETCH_ERROR.to_string(),
            }
        } else {
            Self { message }
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<FetchError> for SyllabusError {
    fn from(error: FetchError) -> Self {
        SyllabusError::Api(error.message)
    }
}

pub type FetchResult = std::result::Result<CoursePage, FetchError>;

/// Common interface for catalog backends. The bundled implementation is
/// [`HttpCatalogProvider`]; tests script their own.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch one page of courses for the given query state.
    ///
    /// Safe to call concurrently; callers are responsible for discarding
    /// stale results (the session does this with a sequence counter).
    async fn fetch_page(&self, query: &CatalogQuery) -> FetchResult;
}

/// Build the flat request parameter list for a query state.
///
/// Pagination and sort are always present; filters only when non-empty. The
/// search key carries the committed term, never the transient input text.
pub fn request_params(query: &CatalogQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", query.page.to_string()),
        ("limit", query.limit.to_string()),
        ("sortBy", query.sort_by.clone()),
        ("sortOrder", query.sort_order.to_string()),
    ];

    if !query.search.is_empty() {
        params.push(("search", query.search.clone()));
    }
    if !query.category.is_empty() {
        params.push(("category", query.category.clone()));
    }
    if !query.specialty.is_empty() {
        params.push(("specialty", query.specialty.clone()));
    }
    if let Some(status) = query.status {
        params.push(("status", status.to_string()));
    }
    if query.featured {
        params.push(("featured", "true".to_string()));
    }
    if let Some(difficulty) = query.difficulty {
        params.push(("difficulty", difficulty.to_string()));
    }
    if let Some(certificate) = query.certificate {
        params.push(("certificate", certificate.to_string()));
    }
    if !query.min_price.is_empty() {
        params.push(("minPrice", query.min_price.clone()));
    }
    if !query.max_price.is_empty() {
        params.push(("maxPrice", query.max_price.clone()));
    }
    if !query.language.is_empty() {
        params.push(("language", query.language.clone()));
    }

    params
}
