//! Facets and summary counters derived from the current result page.
//!
//! The counters are intentionally page-local: featured and category counts
//! cover only the courses on screen, never a server-wide aggregate, and the
//! sets are rebuilt from scratch on every fetch rather than merged across
//! pages.

use std::collections::BTreeSet;

use crate::types::CourseSummary;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFacets {
    pub categories: BTreeSet<String>,
    pub specialties: BTreeSet<String>,
    pub stats: CatalogStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    /// Courses on the current page.
    pub total: usize,
    /// Featured courses on the current page.
    pub featured_on_page: usize,
    /// Distinct categories on the current page.
    pub category_count: usize,
}

/// Extract facet sets and counters from one page of courses.
pub fn extract_facets(courses: &[CourseSummary]) -> CatalogFacets {
    let mut categories = BTreeSet::new();
    let mut specialties = BTreeSet::new();
    let mut featured_on_page = 0;

    for course in courses {
        let category = course.category.trim();
        if !category.is_empty() {
            categories.insert(category.to_string());
        }
        let specialty = course.specialty.trim();
        if !specialty.is_empty() {
            specialties.insert(specialty.to_string());
        }
        if course.is_featured {
            featured_on_page += 1;
        }
    }

    let stats = CatalogStats {
        total: courses.len(),
        featured_on_page,
        category_count: categories.len(),
    };

    CatalogFacets {
        categories,
        specialties,
        stats,
    }
}
