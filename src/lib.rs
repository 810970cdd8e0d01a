pub mod commands;
pub mod config;
pub mod debounce;
pub mod display;
pub mod error;
pub mod facets;
pub mod query;
pub mod remote;
pub mod session;
pub mod types;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use error::{Result, SyllabusError};
pub use facets::{CatalogFacets, CatalogStats, extract_facets};
pub use query::{
    CatalogQuery, DEFAULT_SORT_KEY, PAGE_SIZE, QueryChange, from_query_string, to_query_string,
};
pub use remote::{
    CatalogProvider, CoursePage, FetchError, FetchResult, HttpCatalogProvider, Pagination,
    request_params,
};
pub use session::{CatalogSession, FetchPhase, LoadIndicator};
pub use types::{CourseStatus, CourseSummary, Difficulty, SortOrder};
