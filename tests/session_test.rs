//! Session-level tests for the discovery engine: debounce, page reset,
//! stale-response protection, and error handling, driven on the paused
//! tokio clock against a scripted provider.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use syllabus::{
    CatalogProvider, CatalogQuery, CatalogSession, CoursePage, CourseSummary, FetchError,
    FetchPhase, FetchResult, LoadIndicator, Pagination, QueryChange,
};

type Responder = Box<dyn Fn(&CatalogQuery) -> (Duration, FetchResult) + Send + Sync>;

/// Provider whose responses (and latencies) are scripted per request.
/// Records every query it is asked for.
struct ScriptedProvider {
    responder: Responder,
    log: Mutex<Vec<CatalogQuery>>,
}

impl ScriptedProvider {
    fn new(
        responder: impl Fn(&CatalogQuery) -> (Duration, FetchResult) + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            log: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<CatalogQuery> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogProvider for ScriptedProvider {
    async fn fetch_page(&self, query: &CatalogQuery) -> FetchResult {
        self.log.lock().unwrap().push(query.clone());
        let (delay, result) = (self.responder)(query);
        tokio::time::sleep(delay).await;
        result
    }
}

fn course(title: &str) -> CourseSummary {
    CourseSummary {
        id: title.to_string(),
        title: title.to_string(),
        category: title.to_string(),
        ..Default::default()
    }
}

fn page_for(tag: &str, current_page: u32) -> CoursePage {
    CoursePage {
        courses: vec![course(tag)],
        pagination: Pagination {
            current_page,
            total_pages: 3,
            total_courses: 30,
            limit: 12,
        },
    }
}

fn echo_provider() -> Arc<ScriptedProvider> {
    ScriptedProvider::new(|query| {
        let tag = if query.search.is_empty() {
            query.category.clone()
        } else {
            query.search.clone()
        };
        (Duration::from_millis(10), Ok(page_for(&tag, query.page)))
    })
}

#[tokio::test(start_paused = true)]
async fn test_rapid_typing_commits_once_with_last_value() {
    let provider = echo_provider();
    let mut session = CatalogSession::new(provider.clone());
    session.pump().await;

    session.search_input("java");
    session.search_input("javascript");
    session.pump().await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 2, "initial fetch plus one committed search");
    assert_eq!(requests[1].search, "javascript");
    assert_eq!(session.query().search, "javascript");
    assert_eq!(session.query().search_input, "javascript");
    assert_eq!(session.query().page, 1);
    assert_eq!(session.courses()[0].title, "javascript");
}

#[tokio::test(start_paused = true)]
async fn test_enter_commits_immediately() {
    let provider = echo_provider();
    let mut session = CatalogSession::new(provider.clone());
    session.pump().await;

    session.search_input("rust");
    session.submit_search();
    session.pump().await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].search, "rust");
}

#[tokio::test(start_paused = true)]
async fn test_filter_change_resets_page_and_refetches() {
    let provider = echo_provider();
    let mut session = CatalogSession::hydrate(provider.clone(), "category=Design&page=3");
    session.pump().await;

    let requests = provider.requests();
    assert_eq!(requests[0].category, "Design");
    assert_eq!(requests[0].page, 3);

    session.apply(QueryChange::Category("Marketing".to_string()));
    session.pump().await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].category, "Marketing");
    assert_eq!(requests[1].page, 1);
    assert_eq!(
        session.share_query_string(),
        "category=Marketing&status=published"
    );
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    let provider = ScriptedProvider::new(|query| {
        let delay = if query.category == "slow" {
            Duration::from_millis(300)
        } else {
            Duration::from_millis(10)
        };
        (delay, Ok(page_for(&query.category, query.page)))
    });
    let mut session = CatalogSession::new(provider.clone());
    session.pump().await;

    // Two fetches in flight at once; the older one resolves last.
    session.apply(QueryChange::Category("slow".to_string()));
    session.apply(QueryChange::Category("fast".to_string()));
    session.pump().await;

    assert_eq!(provider.requests().len(), 3);
    assert_eq!(session.courses()[0].title, "fast");
    assert_eq!(session.phase(), FetchPhase::Idle);
    assert_eq!(session.query().category, "fast");
}

#[tokio::test(start_paused = true)]
async fn test_server_failure_surfaces_message_and_preserves_filters() {
    let provider = ScriptedProvider::new(|_query| {
        (
            Duration::from_millis(5),
            Err(FetchError::new("Server error")),
        )
    });
    let mut session = CatalogSession::hydrate(provider.clone(), "category=Design");
    session.pump().await;

    assert_eq!(session.phase(), FetchPhase::Error);
    assert_eq!(session.error_message(), Some("Server error"));
    assert_eq!(session.query().category, "Design");
    assert_eq!(
        session.share_query_string(),
        "category=Design&status=published"
    );

    session.retry();
    session.pump().await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], requests[1], "retry reuses the filters unchanged");
}

#[tokio::test(start_paused = true)]
async fn test_success_after_failure_clears_error() {
    let failed_once = Arc::new(AtomicBool::new(false));
    let flag = failed_once.clone();
    let provider = ScriptedProvider::new(move |query| {
        if !flag.swap(true, Ordering::SeqCst) {
            (
                Duration::from_millis(5),
                Err(FetchError::new("Server error")),
            )
        } else {
            (
                Duration::from_millis(5),
                Ok(page_for("recovered", query.page)),
            )
        }
    });
    let mut session = CatalogSession::new(provider.clone());
    session.pump().await;
    assert_eq!(session.phase(), FetchPhase::Error);

    session.retry();
    session.pump().await;

    assert_eq!(session.phase(), FetchPhase::Idle);
    assert_eq!(session.error_message(), None);
    assert_eq!(session.courses()[0].title, "recovered");
}

#[tokio::test(start_paused = true)]
async fn test_indicator_policy() {
    let provider = echo_provider();
    let mut session = CatalogSession::new(provider.clone());
    assert_eq!(session.indicator(), Some(LoadIndicator::FullPage));

    session.pump().await;
    assert_eq!(session.indicator(), None);

    session.apply(QueryChange::Featured(true));
    assert_eq!(session.indicator(), Some(LoadIndicator::Inline));

    session.pump().await;
    assert_eq!(session.indicator(), None);
}

#[tokio::test(start_paused = true)]
async fn test_pages_replace_results_not_accumulate() {
    let provider = ScriptedProvider::new(|query| {
        (
            Duration::from_millis(5),
            Ok(page_for(&format!("page-{}", query.page), query.page)),
        )
    });
    let mut session = CatalogSession::new(provider.clone());
    session.pump().await;
    assert_eq!(session.courses().len(), 1);

    session.apply(QueryChange::Page(2));
    session.pump().await;

    assert_eq!(session.courses().len(), 1);
    assert_eq!(session.courses()[0].title, "page-2");
}

#[tokio::test(start_paused = true)]
async fn test_page_reconciles_with_server_clamp() {
    let provider = ScriptedProvider::new(|query| {
        let clamped = query.page.min(3);
        (Duration::from_millis(5), Ok(page_for("x", clamped)))
    });
    let mut session = CatalogSession::new(provider.clone());
    session.pump().await;

    session.apply(QueryChange::Page(99));
    session.pump().await;

    assert_eq!(session.query().page, 3);
    assert_eq!(session.share_query_string(), "status=published&page=3");
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_pending_search() {
    let provider = echo_provider();
    let mut session = CatalogSession::new(provider.clone());
    session.pump().await;

    session.search_input("abandoned");
    session.reset();
    session.pump().await;

    let requests = provider.requests();
    assert_eq!(requests.len(), 2, "initial fetch plus the reset refetch");
    assert!(requests.iter().all(|r| r.search != "abandoned"));
    assert_eq!(*session.query(), CatalogQuery::default());
}

#[tokio::test(start_paused = true)]
async fn test_facets_follow_latest_page() {
    let provider = echo_provider();
    let mut session = CatalogSession::new(provider.clone());
    session.pump().await;

    session.apply(QueryChange::Category("Design".to_string()));
    session.pump().await;
    assert!(session.facets().categories.contains("Design"));
    assert_eq!(session.facets().stats.total, 1);

    session.apply(QueryChange::Category("Marketing".to_string()));
    session.pump().await;
    assert!(!session.facets().categories.contains("Design"));
    assert!(session.facets().categories.contains("Marketing"));
}
