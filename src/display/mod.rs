use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::facets::CatalogFacets;
use crate::remote::Pagination;
use crate::types::{CourseStatus, CourseSummary};

/// Format a course for single-line display with colors
pub fn format_course_line(course: &CourseSummary) -> String {
    let id = if course.id.is_empty() {
        "???".to_string()
    } else {
        course.id.clone()
    };
    let id_padded = format!("{:10}", id);

    let status_str = format!("[{}]", course.status);
    let colored_status = match course.status {
        CourseStatus::Published => status_str.green().to_string(),
        CourseStatus::Draft => status_str.yellow().to_string(),
        CourseStatus::Archived => status_str.dimmed().to_string(),
    };

    let featured = if course.is_featured { " *" } else { "" };

    let mut suffix = String::new();
    if !course.category.is_empty() {
        suffix.push_str(&format!(" ({})", course.category));
    }
    if let Some(difficulty) = course.difficulty {
        suffix.push_str(&format!(" [{}]", difficulty));
    }
    suffix.push_str(&format!(" {}", format_price(course.price)));

    format!(
        "{} {}{} - {}{}",
        id_padded.cyan(),
        colored_status,
        featured,
        course.title,
        suffix
    )
}

fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p == 0.0 => "free".to_string(),
        Some(p) => format!("${:.2}", p),
        None => "-".to_string(),
    }
}

#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format courses as a table (for interactive terminals).
pub fn render_course_table(courses: &[CourseSummary]) -> String {
    let rows: Vec<CourseRow> = courses
        .iter()
        .map(|course| CourseRow {
            id: course.id.clone(),
            title: if course.is_featured {
                format!("* {}", course.title)
            } else {
                course.title.clone()
            },
            category: course.category.clone(),
            difficulty: course
                .difficulty
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string()),
            price: format_price(course.price),
            status: course.status.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Render a course list: table on a TTY, plain lines otherwise.
pub fn render_course_list(courses: &[CourseSummary]) -> String {
    if atty::is(atty::Stream::Stdout) {
        render_course_table(courses)
    } else {
        courses
            .iter()
            .map(format_course_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn format_pagination(pagination: &Pagination) -> String {
    format!(
        "page {} of {} ({} courses)",
        pagination.current_page, pagination.total_pages, pagination.total_courses
    )
}

pub fn format_facets(facets: &CatalogFacets) -> String {
    let categories: Vec<&str> = facets.categories.iter().map(String::as_str).collect();
    let specialties: Vec<&str> = facets.specialties.iter().map(String::as_str).collect();

    format!(
        "categories ({}): {}\nspecialties ({}): {}\non this page: {} courses, {} featured",
        facets.stats.category_count,
        if categories.is_empty() {
            "-".to_string()
        } else {
            categories.join(", ")
        },
        specialties.len(),
        if specialties.is_empty() {
            "-".to_string()
        } else {
            specialties.join(", ")
        },
        facets.stats.total,
        facets.stats.featured_on_page,
    )
}
