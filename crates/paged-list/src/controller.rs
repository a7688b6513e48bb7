//! List Controller
//!
//! Synchronous state machine behind a paginated list. It never performs I/O:
//! every `begin_*` call returns a [`PageTicket`] describing the fetch to run,
//! and the caller hands the outcome back through [`ListController::complete`].
//! Only the most recently issued ticket can change state; anything older is
//! dropped as stale.

use std::time::Duration;

use log::{debug, warn};

use crate::debounce::{DebounceToken, Debouncer, DEFAULT_SEARCH_DEBOUNCE};
use crate::error::FetchError;
use crate::request::{Filters, PageRequest, PageResult};
use crate::state::{Activity, ListState, LoadKind};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Tunables for one list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    pub page_size: u32,
    pub search_debounce: Duration,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce: DEFAULT_SEARCH_DEBOUNCE,
        }
    }
}

/// An issued fetch. Tagged with a sequence number so late responses can be
/// recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTicket {
    seq: u64,
    kind: LoadKind,
    request: PageRequest,
}

impl PageTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn kind(&self) -> LoadKind {
        self.kind
    }

    pub fn request(&self) -> &PageRequest {
        &self.request
    }
}

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Outcome written into the state
    Applied,
    /// A newer request was issued after this one; outcome dropped
    Stale,
    /// Controller was disposed while the fetch was in flight
    Disposed,
    /// No fetch was issued (load-more at the end, nothing to retry, ...)
    Skipped,
}

#[derive(Debug)]
pub struct ListController<T> {
    state: ListState<T>,
    page_size: u32,
    next_seq: u64,
    /// Sequence of the only in-flight request allowed to land
    latest: Option<u64>,
    /// Last failed request, for `retry`
    failed: Option<(LoadKind, PageRequest)>,
    /// Last page came back empty; stops load-more loops on pagination drift
    exhausted: bool,
    debounce: Debouncer,
    disposed: bool,
}

impl<T> ListController<T> {
    pub fn new(config: ListConfig) -> Self {
        Self {
            state: ListState::default(),
            page_size: config.page_size.max(1),
            next_seq: 0,
            latest: None,
            failed: None,
            exhausted: false,
            debounce: Debouncer::new(config.search_debounce),
            disposed: false,
        }
    }

    pub fn state(&self) -> &ListState<T> {
        &self.state
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search_delay(&self) -> Duration {
        self.debounce.delay()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether `retry` would issue anything
    pub fn can_retry(&self) -> bool {
        !self.disposed && self.failed.is_some() && self.state.activity == Activity::Idle
    }

    /// Reset to page 1 with the given query and fetch it
    pub fn begin_initialize(&mut self, filters: Filters, search: impl Into<String>) -> Option<PageTicket> {
        self.state.filters = filters;
        self.state.search = search.into();
        self.debounce.cancel();
        self.restart(LoadKind::Initial)
    }

    /// Fetch `current_page + 1`. No-op while any fetch runs, before the first
    /// successful fetch, or once every remote item is loaded.
    pub fn begin_load_more(&mut self) -> Option<PageTicket> {
        if self.state.activity != Activity::Idle {
            return None;
        }
        if !self.state.loaded || self.exhausted || self.state.is_exhausted() {
            return None;
        }
        let request = PageRequest::new(
            self.state.filters.clone(),
            self.state.current_page + 1,
            self.page_size,
            self.state.search.clone(),
        );
        self.issue(LoadKind::More, request)
    }

    /// Page 1 again with the current query
    pub fn begin_refresh(&mut self) -> Option<PageTicket> {
        self.restart(LoadKind::Refresh)
    }

    pub fn begin_apply_filters(&mut self, filters: Filters) -> Option<PageTicket> {
        self.state.filters = filters;
        // The fetch below already carries the latest search text
        self.debounce.cancel();
        self.restart(LoadKind::Initial)
    }

    /// Record new search text and start the quiet-period timer. The fetch is
    /// issued by [`ListController::settle_search`] once the timer fires.
    pub fn set_search(&mut self, text: impl Into<String>) -> DebounceToken {
        self.state.search = text.into();
        self.debounce.schedule()
    }

    /// Timer for `token` fired. Issues a page-1 fetch if no newer keystroke
    /// (or filter change) arrived in between.
    pub fn settle_search(&mut self, token: DebounceToken) -> Option<PageTicket> {
        if self.disposed || !self.debounce.fire(token) {
            return None;
        }
        self.restart(LoadKind::Initial)
    }

    /// Re-issue the last failed request unchanged
    pub fn begin_retry(&mut self) -> Option<PageTicket> {
        if !self.can_retry() {
            return None;
        }
        let (kind, request) = self.failed.clone()?;
        self.issue(kind, request)
    }

    /// Apply the outcome of `ticket`
    pub fn complete(&mut self, ticket: &PageTicket, outcome: Result<PageResult<T>, FetchError>) -> Completion {
        if self.disposed {
            debug!("[paged-list] dropping response #{} after dispose", ticket.seq);
            return Completion::Disposed;
        }
        if self.latest != Some(ticket.seq) {
            debug!("[paged-list] dropping stale response #{} (latest {:?})", ticket.seq, self.latest);
            return Completion::Stale;
        }

        self.latest = None;
        self.state.activity = Activity::Idle;

        match outcome {
            Ok(page) => {
                debug!(
                    "[paged-list] #{} page {} -> {} items of {}",
                    ticket.seq,
                    ticket.request.page_number,
                    page.items.len(),
                    page.total_count
                );
                self.failed = None;
                self.state.error = None;
                self.state.loaded = true;
                self.state.total_count = page.total_count;
                self.exhausted = page.items.is_empty();
                if ticket.kind.replaces_items() {
                    self.state.items = page.items;
                    self.state.current_page = 1;
                } else {
                    // Server order is kept as-is, duplicates included
                    self.state.items.extend(page.items);
                    self.state.current_page = ticket.request.page_number;
                }
            }
            Err(err) => {
                warn!("[paged-list] #{} {:?} fetch failed: {}", ticket.seq, ticket.kind, err);
                self.state.error = Some(err.user_message());
                self.failed = Some((ticket.kind, ticket.request.clone()));
                if ticket.kind.replaces_items() {
                    self.state.items.clear();
                    self.state.total_count = 0;
                    self.state.current_page = 1;
                }
            }
        }
        Completion::Applied
    }

    /// Stop accepting responses. Used when the owning screen goes away.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.latest = None;
        self.debounce.cancel();
        self.state.activity = Activity::Idle;
    }

    fn restart(&mut self, kind: LoadKind) -> Option<PageTicket> {
        let request = PageRequest::new(
            self.state.filters.clone(),
            1,
            self.page_size,
            self.state.search.clone(),
        );
        self.issue(kind, request)
    }

    fn issue(&mut self, kind: LoadKind, request: PageRequest) -> Option<PageTicket> {
        if self.disposed {
            return None;
        }
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest = Some(seq);
        self.state.activity = kind.activity();
        self.state.error = None;
        debug!("[paged-list] issue #{} {:?} page {}", seq, kind, request.page_number);
        Some(PageTicket { seq, kind, request })
    }
}

impl<T> Default for ListController<T> {
    fn default() -> Self {
        Self::new(ListConfig::default())
    }
}
