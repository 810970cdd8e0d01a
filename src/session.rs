//! The catalog browsing session.
//!
//! `CatalogSession` is the owning component of the discovery engine: it holds
//! the one mutable [`CatalogQuery`], routes search keystrokes through the
//! debounce controller, mirrors every committed change into a shareable
//! query string, issues fetches against a [`CatalogProvider`], and guards
//! against stale responses with a monotonically increasing sequence number.
//!
//! Fetches run as spawned tasks and report back over an internal channel;
//! [`CatalogSession::pump`] drains that channel (and the debounce deadline)
//! until the session is quiescent. Responses are applied strictly in issue
//! order: a response whose sequence number does not exceed the highest one
//! already applied is discarded, so a slow early request can never overwrite
//! a faster later one. Dropping the session drops the receiver and the
//! pending debounce; in-flight tasks may still resolve, but their results
//! go nowhere.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::facets::{CatalogFacets, extract_facets};
use crate::query::{CatalogQuery, QueryChange, from_query_string, to_query_string};
use crate::remote::{CatalogProvider, FetchResult, Pagination};
use crate::types::CourseSummary;

/// Fetch state machine: `Idle -> Loading -> {Idle, Error}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Idle,
    Loading,
    Error,
}

/// What kind of progress indicator the frontend should show while loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadIndicator {
    /// Nothing fetched yet: block the page with a spinner.
    FullPage,
    /// Data is on screen and filters are being refined: keep it, show a
    /// lightweight "searching" hint instead.
    Inline,
}

struct FetchOutcome {
    seq: u64,
    result: FetchResult,
}

enum PumpEvent {
    Outcome(Option<FetchOutcome>),
    DebounceElapsed,
}

pub struct CatalogSession {
    provider: Arc<dyn CatalogProvider>,
    query: CatalogQuery,
    debounce: Debouncer,
    phase: FetchPhase,
    courses: Vec<CourseSummary>,
    pagination: Option<Pagination>,
    facets: CatalogFacets,
    error: Option<String>,
    share_url: String,
    loaded_once: bool,
    last_applied_failed: bool,
    next_seq: u64,
    applied_seq: u64,
    in_flight: usize,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl CatalogSession {
    /// Start a session with the default query state and issue the initial
    /// fetch.
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self::with_query(provider, CatalogQuery::default())
    }

    /// Start a session hydrated from a shareable query string.
    pub fn hydrate(provider: Arc<dyn CatalogProvider>, query_string: &str) -> Self {
        Self::with_query(provider, from_query_string(query_string))
    }

    fn with_query(provider: Arc<dyn CatalogProvider>, query: CatalogQuery) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let share_url = to_query_string(&query);
        let mut session = Self {
            provider,
            query,
            debounce: Debouncer::new(SEARCH_DEBOUNCE),
            phase: FetchPhase::Idle,
            courses: Vec::new(),
            pagination: None,
            facets: CatalogFacets::default(),
            error: None,
            share_url,
            loaded_once: false,
            last_applied_failed: false,
            next_seq: 1,
            applied_seq: 0,
            in_flight: 0,
            tx,
            rx,
        };
        session.issue_fetch();
        session
    }

    /// A search keystroke: reflect it in the input immediately, schedule the
    /// debounced commit.
    pub fn search_input(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.query.set_search_input(text.clone());
        self.debounce.schedule(text);
    }

    /// Enter key: commit the search immediately, cancelling the timer.
    pub fn submit_search(&mut self) {
        let term = self
            .debounce
            .commit_now()
            .unwrap_or_else(|| self.query.search_input.clone());
        self.commit_search_term(term);
    }

    /// Apply a non-search filter, sort, or page change and refetch.
    pub fn apply(&mut self, change: QueryChange) {
        self.query.apply(change);
        self.sync_share_url();
        self.issue_fetch();
    }

    /// Back to defaults: cancels any pending search commit, restores the
    /// default query, and refetches. Calling it twice is the same as once.
    pub fn reset(&mut self) {
        self.debounce.cancel();
        self.query.reset();
        self.sync_share_url();
        self.issue_fetch();
    }

    /// Refetch with the current filters, unchanged. A previous failure does
    /// not invalidate any of them.
    pub fn retry(&mut self) {
        self.issue_fetch();
    }

    /// Drive the internal event loop (debounce deadlines and fetch
    /// completions) until nothing is pending.
    pub async fn pump(&mut self) {
        loop {
            if self.in_flight == 0 && !self.debounce.is_pending() {
                return;
            }

            let deadline = self.debounce.deadline();
            let sleep_target =
                deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(86_400));

            let event = tokio::select! {
                outcome = self.rx.recv() => PumpEvent::Outcome(outcome),
                _ = tokio::time::sleep_until(sleep_target), if deadline.is_some() => {
                    PumpEvent::DebounceElapsed
                }
            };

            match event {
                PumpEvent::Outcome(Some(outcome)) => self.absorb(outcome),
                PumpEvent::Outcome(None) => return,
                PumpEvent::DebounceElapsed => {
                    if let Some(term) = self.debounce.take_elapsed(Instant::now()) {
                        self.commit_search_term(term);
                    }
                }
            }
        }
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub fn courses(&self) -> &[CourseSummary] {
        &self.courses
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    pub fn facets(&self) -> &CatalogFacets {
        &self.facets
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The shareable address of the current view. Replaced in place on every
    /// committed change, never a history of past states.
    pub fn share_query_string(&self) -> &str {
        &self.share_url
    }

    pub fn indicator(&self) -> Option<LoadIndicator> {
        if self.phase != FetchPhase::Loading {
            return None;
        }
        if self.loaded_once {
            Some(LoadIndicator::Inline)
        } else {
            Some(LoadIndicator::FullPage)
        }
    }

    fn commit_search_term(&mut self, term: String) {
        if term == self.query.search {
            return;
        }
        self.query.commit_search(term);
        self.sync_share_url();
        self.issue_fetch();
    }

    fn sync_share_url(&mut self) {
        self.share_url = to_query_string(&self.query);
    }

    fn issue_fetch(&mut self) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight += 1;
        self.phase = FetchPhase::Loading;

        let provider = Arc::clone(&self.provider);
        let query = self.query.clone();
        let tx = self.tx.clone();
        tracing::debug!(seq, page = query.page, "issuing catalog fetch");
        tokio::spawn(async move {
            let result = provider.fetch_page(&query).await;
            let _ = tx.send(FetchOutcome { seq, result });
        });
    }

    fn newest_issued(&self) -> u64 {
        self.next_seq - 1
    }

    fn absorb(&mut self, outcome: FetchOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);

        if outcome.seq <= self.applied_seq {
            tracing::debug!(seq = outcome.seq, "discarding stale catalog response");
        } else {
            self.applied_seq = outcome.seq;
            match outcome.result {
                Ok(page) => {
                    // Adopt the server's idea of the current page (it clamps
                    // out-of-range requests), but only when nothing newer is
                    // pending.
                    if outcome.seq == self.newest_issued()
                        && page.pagination.current_page >= 1
                        && page.pagination.current_page != self.query.page
                    {
                        self.query.page = page.pagination.current_page;
                        self.sync_share_url();
                    }
                    self.facets = extract_facets(&page.courses);
                    self.courses = page.courses;
                    self.pagination = Some(page.pagination);
                    self.error = None;
                    self.loaded_once = true;
                    self.last_applied_failed = false;
                }
                Err(error) => {
                    self.error = Some(error.message().to_string());
                    self.last_applied_failed = true;
                }
            }
        }

        self.phase = if self.newest_issued() > self.applied_seq {
            FetchPhase::Loading
        } else if self.last_applied_failed {
            FetchPhase::Error
        } else {
            FetchPhase::Idle
        };
    }
}
