//! Observable list state

use crate::request::Filters;

/// Which fetch is running. A single enum, so two loading flags can never be
/// true at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    /// Full-screen load (initialize, filter or search change)
    Loading,
    /// Next page
    LoadingMore,
    /// Pull-to-refresh
    Refreshing,
}

/// Kind of fetch a ticket was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Initial,
    More,
    Refresh,
}

impl LoadKind {
    pub fn activity(self) -> Activity {
        match self {
            LoadKind::Initial => Activity::Loading,
            LoadKind::More => Activity::LoadingMore,
            LoadKind::Refresh => Activity::Refreshing,
        }
    }

    /// Page-1 fetches replace the item list, load-more appends
    pub fn replaces_items(self) -> bool {
        !matches!(self, LoadKind::More)
    }
}

/// Snapshot of a list controller
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_count: usize,
    pub activity: Activity,
    pub error: Option<String>,
    pub filters: Filters,
    pub search: String,
    /// Set once any fetch has succeeded
    pub loaded: bool,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            total_count: 0,
            activity: Activity::Idle,
            error: None,
            filters: Filters::new(),
            search: String::new(),
            loaded: false,
        }
    }
}

impl<T> ListState<T> {
    pub fn is_loading(&self) -> bool {
        self.activity == Activity::Loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.activity == Activity::LoadingMore
    }

    pub fn is_refreshing(&self) -> bool {
        self.activity == Activity::Refreshing
    }

    /// True when every remote item is already in `items`
    pub fn is_exhausted(&self) -> bool {
        self.loaded && self.items.len() >= self.total_count
    }

    /// Nothing loaded and the last page-1 fetch failed
    pub fn is_failed_empty(&self) -> bool {
        self.error.is_some() && self.items.is_empty()
    }
}
