mod browse;
mod config;
mod ls;
mod url;

pub use browse::cmd_browse;
pub use config::{cmd_config_set, cmd_config_show};
pub use ls::{cmd_facets, cmd_ls};
pub use url::cmd_url;

use clap::Args;

use crate::error::{Result, SyllabusError};
use crate::query::{CatalogQuery, QueryChange, from_query_string};
use crate::types::SortOrder;

/// Filter, sort, and pagination flags shared by the catalog commands.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Free-text search term
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by specialty
    #[arg(long)]
    pub specialty: Option<String>,

    /// Course status: published, draft, archived, or any (default: published)
    #[arg(long)]
    pub status: Option<String>,

    /// Only featured courses
    #[arg(long)]
    pub featured: bool,

    /// Difficulty: beginner, intermediate, advanced, expert
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Certificate availability (true or false)
    #[arg(long)]
    pub certificate: Option<bool>,

    /// Minimum price
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<String>,

    /// Course language
    #[arg(long)]
    pub language: Option<String>,

    /// Sort key (default: createdAt)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long)]
    pub order: Option<String>,

    /// Page number
    #[arg(long)]
    pub page: Option<u32>,
}

impl FilterArgs {
    /// Build a query state from the flags, optionally seeded from a
    /// shareable query string. Flags win over the seed; an explicit page
    /// flag wins over the page reset the other changes trigger.
    pub fn into_query(self, from_url: Option<&str>) -> Result<CatalogQuery> {
        let mut query = match from_url {
            Some(qs) => from_query_string(qs),
            None => CatalogQuery::default(),
        };

        if let Some(category) = self.category {
            query.apply(QueryChange::Category(category));
        }
        if let Some(specialty) = self.specialty {
            query.apply(QueryChange::Specialty(specialty));
        }
        if let Some(status) = self.status {
            let status = if status.eq_ignore_ascii_case("any") {
                None
            } else {
                Some(status.parse()?)
            };
            query.apply(QueryChange::Status(status));
        }
        if self.featured {
            query.apply(QueryChange::Featured(true));
        }
        if let Some(difficulty) = self.difficulty {
            query.apply(QueryChange::Difficulty(Some(difficulty.parse()?)));
        }
        if let Some(certificate) = self.certificate {
            query.apply(QueryChange::Certificate(Some(certificate)));
        }
        if let Some(min_price) = self.min_price {
            validate_price(&min_price)?;
            query.apply(QueryChange::MinPrice(min_price));
        }
        if let Some(max_price) = self.max_price {
            validate_price(&max_price)?;
            query.apply(QueryChange::MaxPrice(max_price));
        }
        if let Some(language) = self.language {
            query.apply(QueryChange::Language(language));
        }
        if let Some(sort_by) = self.sort_by {
            query.apply(QueryChange::SortBy(sort_by));
        }
        if let Some(order) = self.order {
            let order: SortOrder = order.parse()?;
            query.apply(QueryChange::SortOrder(order));
        }
        if let Some(search) = self.search {
            query.commit_search(search);
        }
        if let Some(page) = self.page {
            query.apply(QueryChange::Page(page));
        }

        Ok(query)
    }
}

fn validate_price(value: &str) -> Result<()> {
    value
        .parse::<f64>()
        .map_err(|_| SyllabusError::InvalidPrice(value.to_string()))?;
    Ok(())
}
