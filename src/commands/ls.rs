use serde_json::json;

use crate::commands::FilterArgs;
use crate::config::Config;
use crate::display::{format_facets, format_pagination, render_course_list};
use crate::error::Result;
use crate::facets::extract_facets;
use crate::remote::{CatalogProvider, HttpCatalogProvider};

/// List one page of courses matching the given filters
pub async fn cmd_ls(filters: FilterArgs, from_url: Option<&str>, output_json: bool) -> Result<()> {
    let query = filters.into_query(from_url)?;
    let config = Config::load()?;
    let provider = HttpCatalogProvider::from_config(&config)?;

    let page = provider.fetch_page(&query).await?;

    if output_json {
        let payload = json!({
            "courses": page.courses,
            "pagination": page.pagination,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if page.courses.is_empty() {
        println!("No courses match the current filters.");
        return Ok(());
    }

    println!("{}", render_course_list(&page.courses));
    println!("{}", format_pagination(&page.pagination));

    Ok(())
}

/// Show facet sets and counters derived from the first matching page
pub async fn cmd_facets(filters: FilterArgs, from_url: Option<&str>) -> Result<()> {
    let query = filters.into_query(from_url)?;
    let config = Config::load()?;
    let provider = HttpCatalogProvider::from_config(&config)?;

    let page = provider.fetch_page(&query).await?;
    let facets = extract_facets(&page.courses);

    println!("{}", format_facets(&facets));
    println!("{}", format_pagination(&page.pagination));

    Ok(())
}
