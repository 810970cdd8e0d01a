use crate::commands::FilterArgs;
use crate::error::Result;
use crate::query::to_query_string;

/// Print the canonical query string for a filter state.
///
/// With `--from`, the given string is hydrated first and the flags applied
/// on top, so this doubles as a normalizer for hand-written addresses.
pub fn cmd_url(filters: FilterArgs, from: Option<&str>) -> Result<()> {
    let query = filters.into_query(from)?;
    println!("{}", to_query_string(&query));
    Ok(())
}
