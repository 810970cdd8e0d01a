//! Catalog query state.
//!
//! `CatalogQuery` is the single bundle of search text, filters, sort order,
//! and pagination that drives every catalog fetch. All mutation goes through
//! [`CatalogQuery::apply`] (plus the two search-specific entry points), which
//! enforces the page-reset rule: changing anything except the page itself
//! sends the user back to page 1.

use crate::types::{CourseStatus, Difficulty, SortOrder};

pub mod querystring;

pub use querystring::{from_query_string, to_query_string};

/// Fixed page size for catalog listings.
pub const PAGE_SIZE: u32 = 12;

/// Sort key applied when the user has not chosen one.
pub const DEFAULT_SORT_KEY: &str = "createdAt";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    /// Raw text as typed into the search box. Not part of the active query
    /// until committed (debounce elapse or Enter).
    pub search_input: String,
    /// Committed search term, the one actually sent to the API.
    pub search: String,
    pub category: String,
    pub specialty: String,
    /// `None` means no status filter at all; the default is the published
    /// baseline, which stays explicit on the wire.
    pub status: Option<CourseStatus>,
    pub featured: bool,
    pub difficulty: Option<Difficulty>,
    pub certificate: Option<bool>,
    /// Price bounds travel as numeric strings, exactly as entered.
    pub min_price: String,
    pub max_price: String,
    pub language: String,
    pub sort_by: String,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search_input: String::new(),
            search: String::new(),
            category: String::new(),
            specialty: String::new(),
            status: Some(CourseStatus::Published),
            featured: false,
            difficulty: None,
            certificate: None,
            min_price: String::new(),
            max_price: String::new(),
            language: String::new(),
            sort_by: DEFAULT_SORT_KEY.to_string(),
            sort_order: SortOrder::Desc,
            page: 1,
            limit: PAGE_SIZE,
        }
    }
}

/// A single field mutation. Search text is deliberately absent: it routes
/// through the debounce controller and [`CatalogQuery::commit_search`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryChange {
    Category(String),
    Specialty(String),
    Status(Option<CourseStatus>),
    Featured(bool),
    Difficulty(Option<Difficulty>),
    Certificate(Option<bool>),
    MinPrice(String),
    MaxPrice(String),
    Language(String),
    SortBy(String),
    SortOrder(SortOrder),
    Page(u32),
}

impl CatalogQuery {
    /// Apply a field change. Every change except `Page` resets the page to 1.
    pub fn apply(&mut self, change: QueryChange) {
        match change {
            QueryChange::Page(page) => {
                self.page = page.max(1);
                return;
            }
            QueryChange::Category(value) => self.category = value,
            QueryChange::Specialty(value) => self.specialty = value,
            QueryChange::Status(value) => self.status = value,
            QueryChange::Featured(value) => self.featured = value,
            QueryChange::Difficulty(value) => self.difficulty = value,
            QueryChange::Certificate(value) => self.certificate = value,
            QueryChange::MinPrice(value) => self.min_price = value,
            QueryChange::MaxPrice(value) => self.max_price = value,
            QueryChange::Language(value) => self.language = value,
            QueryChange::SortBy(value) => self.sort_by = value,
            QueryChange::SortOrder(value) => self.sort_order = value,
        }
        self.page = 1;
    }

    /// Update the provisional search text only. Keeps the input box
    /// responsive without touching the active query or the page.
    pub fn set_search_input(&mut self, text: impl Into<String>) {
        self.search_input = text.into();
    }

    /// Commit a search term into the active query. Resets the page.
    pub fn commit_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.search_input = term.clone();
        self.search = term;
        self.page = 1;
    }

    /// Restore the default state (empty search, published baseline, sort by
    /// creation date descending, page 1).
    pub fn reset(&mut self) {
        *self = CatalogQuery::default();
    }
}
