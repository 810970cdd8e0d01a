//! Interactive catalog browsing on stdin/stdout.
//!
//! Each input line is one user action. Plain text is search input committed
//! on Enter; `:commands` drive the structured filters. The live
//! [`CatalogSession`] underneath is the same engine the tests exercise.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::display::{format_facets, format_pagination, render_course_list};
use crate::error::Result;
use crate::query::QueryChange;
use crate::remote::HttpCatalogProvider;
use crate::session::{CatalogSession, FetchPhase, LoadIndicator};
use crate::types::SortOrder;

const HELP: &str = "\
type text to search (Enter commits), or:
  :cat <name>         filter by category        :spec <name>   filter by specialty
  :status <s|any>     published/draft/archived  :lang <code>   filter by language
  :difficulty <d|any> beginner..expert          :featured      toggle featured-only
  :certificate <true|false|any>                 :price <min> <max>   ('-' clears a bound)
  :sort <key> [asc|desc]                        :page <n> | :next | :prev
  :reset  :retry  :url  :help  :q";

pub async fn cmd_browse(from_url: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let provider = Arc::new(HttpCatalogProvider::from_config(&config)?);

    let mut session = match from_url {
        Some(qs) => CatalogSession::hydrate(provider, qs),
        None => CatalogSession::new(provider),
    };

    session.pump().await;
    render(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if matches!(line, ":q" | ":quit") {
            break;
        }
        if line == ":help" {
            println!("{HELP}");
            prompt()?;
            continue;
        }

        if let Err(e) = handle_line(&mut session, line) {
            eprintln!("{e}");
            prompt()?;
            continue;
        }

        session.pump().await;
        render(&session);
        prompt()?;
    }

    Ok(())
}

fn handle_line(session: &mut CatalogSession, line: &str) -> Result<()> {
    if !line.starts_with(':') {
        // Line input means the user already pressed Enter: reflect the text,
        // then commit immediately.
        session.search_input(line);
        session.submit_search();
        return Ok(());
    }

    let mut parts = line.splitn(2, ' ');
    let command = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or("").trim();

    match command {
        ":cat" | ":category" => session.apply(QueryChange::Category(rest.to_string())),
        ":spec" | ":specialty" => session.apply(QueryChange::Specialty(rest.to_string())),
        ":status" => {
            let status = if rest.eq_ignore_ascii_case("any") {
                None
            } else {
                Some(rest.parse()?)
            };
            session.apply(QueryChange::Status(status));
        }
        ":difficulty" => {
            let difficulty = if rest.eq_ignore_ascii_case("any") {
                None
            } else {
                Some(rest.parse()?)
            };
            session.apply(QueryChange::Difficulty(difficulty));
        }
        ":featured" => {
            let featured = !session.query().featured;
            session.apply(QueryChange::Featured(featured));
        }
        ":certificate" => {
            let certificate = match rest {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            };
            session.apply(QueryChange::Certificate(certificate));
        }
        ":lang" | ":language" => session.apply(QueryChange::Language(rest.to_string())),
        ":price" => {
            let mut bounds = rest.split_whitespace();
            let min = bounds.next().unwrap_or("-");
            let max = bounds.next().unwrap_or("-");
            session.apply(QueryChange::MinPrice(clear_dash(min)));
            session.apply(QueryChange::MaxPrice(clear_dash(max)));
        }
        ":sort" => {
            let mut args = rest.split_whitespace();
            if let Some(key) = args.next() {
                session.apply(QueryChange::SortBy(key.to_string()));
            }
            if let Some(order) = args.next() {
                let order: SortOrder = order.parse()?;
                session.apply(QueryChange::SortOrder(order));
            }
        }
        ":page" => {
            let page: u32 = rest.parse().unwrap_or(1);
            session.apply(QueryChange::Page(page));
        }
        ":next" => {
            let page = session.query().page + 1;
            session.apply(QueryChange::Page(page));
        }
        ":prev" => {
            let page = session.query().page.saturating_sub(1).max(1);
            session.apply(QueryChange::Page(page));
        }
        ":reset" => session.reset(),
        ":retry" => session.retry(),
        ":url" => println!("?{}", session.share_query_string()),
        _ => println!("unknown command '{command}' (:help for commands)"),
    }

    Ok(())
}

fn clear_dash(value: &str) -> String {
    if value == "-" {
        String::new()
    } else {
        value.to_string()
    }
}

fn render(session: &CatalogSession) {
    match session.indicator() {
        Some(LoadIndicator::FullPage) => {
            println!("loading catalog...");
            return;
        }
        Some(LoadIndicator::Inline) => println!("searching..."),
        None => {}
    }

    if session.phase() == FetchPhase::Error {
        if let Some(message) = session.error_message() {
            eprintln!("Error: {message} (:retry to try again)");
        }
        return;
    }

    if session.courses().is_empty() {
        println!("No courses match the current filters.");
    } else {
        println!("{}", render_course_list(session.courses()));
        if let Some(pagination) = session.pagination() {
            println!("{}", format_pagination(pagination));
        }
        println!("{}", format_facets(session.facets()));
    }
    println!("view: ?{}", session.share_query_string());
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}
