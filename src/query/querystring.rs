//! Query-string projection of the catalog state.
//!
//! The query string is the only persisted form of a catalog view: it is what
//! gets shared, bookmarked, and hydrated on the next visit. Serialization
//! follows strict omission rules so equivalent states always produce the
//! same string; hydration is lenient because the string may be hand-edited.
//!
//! Omission rules:
//! - empty string fields are omitted
//! - `page` is omitted when 1
//! - `sortBy` is omitted when it is the creation-date default
//! - `sortOrder` is omitted when descending
//! - `status=published` is NOT omitted, it is the explicit baseline filter
//! - `limit` is fixed and never serialized
//! - the transient (pre-commit) search text is never serialized

use url::form_urlencoded;

use super::{CatalogQuery, DEFAULT_SORT_KEY};
use crate::types::SortOrder;

/// Serialize the committed query state as a canonical query string.
pub fn to_query_string(query: &CatalogQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if !query.search.is_empty() {
        serializer.append_pair("search", &query.search);
    }
    if !query.category.is_empty() {
        serializer.append_pair("category", &query.category);
    }
    if !query.specialty.is_empty() {
        serializer.append_pair("specialty", &query.specialty);
    }
    if let Some(status) = query.status {
        serializer.append_pair("status", &status.to_string());
    }
    if query.featured {
        serializer.append_pair("featured", "true");
    }
    if let Some(difficulty) = query.difficulty {
        serializer.append_pair("difficulty", &difficulty.to_string());
    }
    if let Some(certificate) = query.certificate {
        serializer.append_pair("certificate", if certificate { "true" } else { "false" });
    }
    if !query.min_price.is_empty() {
        serializer.append_pair("minPrice", &query.min_price);
    }
    if !query.max_price.is_empty() {
        serializer.append_pair("maxPrice", &query.max_price);
    }
    if !query.language.is_empty() {
        serializer.append_pair("language", &query.language);
    }
    if query.sort_by != DEFAULT_SORT_KEY {
        serializer.append_pair("sortBy", &query.sort_by);
    }
    if query.sort_order != SortOrder::Desc {
        serializer.append_pair("sortOrder", &query.sort_order.to_string());
    }
    if query.page > 1 {
        serializer.append_pair("page", &query.page.to_string());
    }

    serializer.finish()
}

/// Hydrate a query state from a query string (initial mount).
///
/// Absent keys take their defaults. Unknown keys and unparseable values are
/// ignored rather than failing the whole page; the address bar is user
/// territory. A leading `?` is tolerated.
pub fn from_query_string(input: &str) -> CatalogQuery {
    let input = input.trim().trim_start_matches('?');
    let mut query = CatalogQuery::default();

    for (key, value) in form_urlencoded::parse(input.as_bytes()) {
        match key.as_ref() {
            "search" => {
                query.search = value.into_owned();
                query.search_input = query.search.clone();
            }
            "category" => query.category = value.into_owned(),
            "specialty" => query.specialty = value.into_owned(),
            "status" => {
                if let Ok(status) = value.parse() {
                    query.status = Some(status);
                }
            }
            "featured" => query.featured = value == "true",
            "difficulty" => query.difficulty = value.parse().ok(),
            "certificate" => {
                query.certificate = match value.as_ref() {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                }
            }
            "minPrice" => query.min_price = value.into_owned(),
            "maxPrice" => query.max_price = value.into_owned(),
            "language" => query.language = value.into_owned(),
            "sortBy" => {
                if !value.is_empty() {
                    query.sort_by = value.into_owned();
                }
            }
            "sortOrder" => {
                if let Ok(order) = value.parse() {
                    query.sort_order = order;
                }
            }
            "page" => {
                query.page = value.parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1);
            }
            _ => {}
        }
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryChange;
    use crate::types::{CourseStatus, Difficulty};

    #[test]
    fn test_default_state_serializes_baseline_only() {
        let query = CatalogQuery::default();
        assert_eq!(to_query_string(&query), "status=published");
    }

    #[test]
    fn test_omission_rules() {
        let mut query = CatalogQuery::default();
        query.apply(QueryChange::Category("Design".to_string()));
        query.apply(QueryChange::Page(3));
        assert_eq!(
            to_query_string(&query),
            "category=Design&status=published&page=3"
        );

        query.apply(QueryChange::Page(1));
        assert_eq!(to_query_string(&query), "category=Design&status=published");
    }

    #[test]
    fn test_cleared_status_is_omitted() {
        let mut query = CatalogQuery::default();
        query.apply(QueryChange::Status(None));
        assert_eq!(to_query_string(&query), "");
    }

    #[test]
    fn test_sort_defaults_are_omitted() {
        let mut query = CatalogQuery::default();
        query.apply(QueryChange::SortBy("price".to_string()));
        query.apply(QueryChange::SortOrder(crate::types::SortOrder::Asc));
        let serialized = to_query_string(&query);
        assert!(serialized.contains("sortBy=price"));
        assert!(serialized.contains("sortOrder=asc"));

        query.apply(QueryChange::SortBy(DEFAULT_SORT_KEY.to_string()));
        query.apply(QueryChange::SortOrder(crate::types::SortOrder::Desc));
        assert_eq!(to_query_string(&query), "status=published");
    }

    #[test]
    fn test_transient_search_input_not_serialized() {
        let mut query = CatalogQuery::default();
        query.set_search_input("rus");
        assert_eq!(to_query_string(&query), "status=published");

        query.commit_search("rust");
        assert_eq!(to_query_string(&query), "search=rust&status=published");
    }

    #[test]
    fn test_certificate_false_is_a_value() {
        let mut query = CatalogQuery::default();
        query.apply(QueryChange::Certificate(Some(false)));
        assert_eq!(
            to_query_string(&query),
            "status=published&certificate=false"
        );
    }

    #[test]
    fn test_roundtrip_equivalence() {
        let mut query = CatalogQuery::default();
        query.commit_search("data science");
        query.apply(QueryChange::Category("Data Science".to_string()));
        query.apply(QueryChange::Specialty("ML".to_string()));
        query.apply(QueryChange::Status(Some(CourseStatus::Draft)));
        query.apply(QueryChange::Featured(true));
        query.apply(QueryChange::Difficulty(Some(Difficulty::Advanced)));
        query.apply(QueryChange::Certificate(Some(true)));
        query.apply(QueryChange::MinPrice("9.99".to_string()));
        query.apply(QueryChange::MaxPrice("199".to_string()));
        query.apply(QueryChange::Language("en".to_string()));
        query.apply(QueryChange::SortBy("price".to_string()));
        query.apply(QueryChange::SortOrder(crate::types::SortOrder::Asc));
        query.apply(QueryChange::Page(5));

        let hydrated = from_query_string(&to_query_string(&query));
        assert_eq!(hydrated, query);
    }

    #[test]
    fn test_hydration_tolerates_leading_question_mark() {
        let query = from_query_string("?category=Design&page=2");
        assert_eq!(query.category, "Design");
        assert_eq!(query.page, 2);
    }

    #[test]
    fn test_hydration_defaults_and_garbage() {
        let query = from_query_string("difficulty=impossible&page=zero&bogus=1");
        assert_eq!(query.difficulty, None);
        assert_eq!(query.page, 1);
        assert_eq!(query.status, Some(CourseStatus::Published));
    }

    #[test]
    fn test_hydration_decodes_encoded_values() {
        let query = from_query_string("search=web+development&category=Data%20Science");
        assert_eq!(query.search, "web development");
        assert_eq!(query.search_input, "web development");
        assert_eq!(query.category, "Data Science");
    }
}
