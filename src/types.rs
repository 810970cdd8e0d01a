use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SyllabusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    #[default]
    Published,
    Draft,
    Archived,
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseStatus::Published => write!(f, "published"),
            CourseStatus::Draft => write!(f, "draft"),
            CourseStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for CourseStatus {
    type Err = SyllabusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "published" => Ok(CourseStatus::Published),
            "draft" => Ok(CourseStatus::Draft),
            "archived" => Ok(CourseStatus::Archived),
            _ => Err(SyllabusError::InvalidStatus(s.to_string())),
        }
    }
}

pub const VALID_STATUSES: &[&str] = &["published", "draft", "archived"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
            Difficulty::Expert => write!(f, "expert"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = SyllabusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(SyllabusError::InvalidDifficulty(s.to_string())),
        }
    }
}

pub const VALID_DIFFICULTIES: &[&str] = &["beginner", "intermediate", "advanced", "expert"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = SyllabusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(SyllabusError::InvalidSortOrder(s.to_string())),
        }
    }
}

/// One course as returned by the catalog collection endpoint.
///
/// Every field defaults when absent: the API omits fields freely and a
/// missing field must never fail a whole page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub specialty: String,

    #[serde(default)]
    pub status: CourseStatus,

    #[serde(default)]
    pub difficulty: Option<Difficulty>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub price: Option<f64>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub certificate: bool,

    #[serde(default)]
    pub instructor: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in VALID_STATUSES {
            let parsed: CourseStatus = s.parse().unwrap();
            assert_eq!(parsed.to_string(), *s);
        }
        assert!("unknown".parse::<CourseStatus>().is_err());
    }

    #[test]
    fn test_status_case_insensitive() {
        assert_eq!(
            "Published".parse::<CourseStatus>().unwrap(),
            CourseStatus::Published
        );
    }

    #[test]
    fn test_difficulty_roundtrip() {
        for s in VALID_DIFFICULTIES {
            let parsed: Difficulty = s.parse().unwrap();
            assert_eq!(parsed.to_string(), *s);
        }
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_sort_order_default_is_desc() {
        assert_eq!(SortOrder::default(), SortOrder::Desc);
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
    }

    #[test]
    fn test_course_summary_tolerates_missing_fields() {
        let course: CourseSummary = serde_json::from_str(r#"{"title": "Rust 101"}"#).unwrap();
        assert_eq!(course.title, "Rust 101");
        assert_eq!(course.status, CourseStatus::Published);
        assert!(!course.is_featured);
        assert!(course.price.is_none());
    }

    #[test]
    fn test_course_summary_wire_names() {
        let course: CourseSummary = serde_json::from_str(
            r#"{"id": "c1", "title": "Design Basics", "isFeatured": true, "createdAt": "2026-01-05"}"#,
        )
        .unwrap();
        assert!(course.is_featured);
        assert_eq!(course.created_at.as_deref(), Some("2026-01-05"));
    }
}
