//! Paged list glue
//!
//! Binds a [`PagedList`] to the component that owns it: state is mirrored
//! into a signal, search text is debounced with a gloo timer, and the list
//! is disposed when the owner is cleaned up.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use paged_list::{Completion, Filters, ListConfig, ListState, PageFetcher, PagedList};

type DynList<T> = PagedList<T, Box<dyn PageFetcher<T>>>;

/// What the list body should render
#[derive(Debug, Clone, PartialEq)]
pub enum ListPhase {
    /// First page in flight, nothing to show yet
    InitialLoading,
    /// Nothing loaded and the last fetch failed: full-screen error + retry
    FailedEmpty(String),
    Empty,
    Ready,
}

/// What the row below the last item should render
#[derive(Debug, Clone, PartialEq)]
pub enum FooterStatus {
    Hidden,
    LoadingMore,
    /// Inline retry; earlier rows stay visible
    Failed(String),
    End,
}

pub fn list_phase<T>(state: &ListState<T>) -> ListPhase {
    if state.items.is_empty() {
        if let Some(error) = &state.error {
            if !state.is_loading() && !state.is_refreshing() {
                return ListPhase::FailedEmpty(error.clone());
            }
        }
        if !state.loaded || state.is_loading() {
            return ListPhase::InitialLoading;
        }
        return ListPhase::Empty;
    }
    ListPhase::Ready
}

pub fn footer_status<T>(state: &ListState<T>) -> FooterStatus {
    if state.items.is_empty() {
        return FooterStatus::Hidden;
    }
    if state.is_loading_more() {
        return FooterStatus::LoadingMore;
    }
    if let Some(error) = &state.error {
        return FooterStatus::Failed(error.clone());
    }
    if state.is_exhausted() {
        return FooterStatus::End;
    }
    FooterStatus::Hidden
}

/// Row identity for keyed rendering: position plus record id
pub type RowKey = (usize, u32);

/// Pair each loaded item with a unique key. Ids repeated across pages are
/// kept as separate rows.
pub fn keyed_rows<T>(items: Vec<T>, id: impl Fn(&T) -> u32) -> Vec<(RowKey, T)> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| ((index, id(&item)), item))
        .collect()
}

/// Reactive handle to one paged list, owned by the creating component
pub struct ListHandle<T: 'static> {
    list: StoredValue<Rc<DynList<T>>, LocalStorage>,
    state: RwSignal<ListState<T>>,
}

impl<T> Clone for ListHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListHandle<T> {}

/// Create a list bound to `fetcher` and load its first page
pub fn use_paged_list<T, F>(fetcher: F, config: ListConfig, filters: Filters) -> ListHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: PageFetcher<T> + 'static,
{
    let fetcher: Box<dyn PageFetcher<T>> = Box::new(fetcher);
    let list = Rc::new(PagedList::new(fetcher, config));
    let state = RwSignal::new(list.snapshot());
    list.subscribe(move |s| {
        // Signal is gone once the owner is disposed
        let _ = state.try_set(s.clone());
    });

    let handle = ListHandle {
        list: StoredValue::new_local(list),
        state,
    };
    handle.initialize(filters);
    on_cleanup(move || handle.dispose());
    handle
}

impl<T> ListHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn with<R>(&self, f: impl FnOnce(&ListState<T>) -> R) -> R {
        self.state.with(f)
    }

    pub fn items(&self) -> Vec<T> {
        self.state.with(|s| s.items.clone())
    }

    pub fn phase(&self) -> ListPhase {
        self.state.with(list_phase)
    }

    pub fn footer(&self) -> FooterStatus {
        self.state.with(footer_status)
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.with(|s| s.is_refreshing())
    }

    pub fn search(&self) -> String {
        self.state.with(|s| s.search.clone())
    }

    pub fn filters(&self) -> Filters {
        self.state.with(|s| s.filters.clone())
    }

    pub fn initialize(&self, filters: Filters) {
        self.spawn("initialize", move |list| async move { list.initialize(filters, "").await });
    }

    pub fn load_more(&self) {
        self.spawn("load_more", |list| async move { list.load_more().await });
    }

    pub fn refresh(&self) {
        self.spawn("refresh", |list| async move { list.refresh().await });
    }

    pub fn apply_filters(&self, filters: Filters) {
        self.spawn("apply_filters", move |list| async move { list.apply_filters(filters).await });
    }

    pub fn retry(&self) {
        self.spawn("retry", |list| async move { list.retry().await });
    }

    /// Echo the text now, fetch once typing pauses
    pub fn set_search(&self, text: String) {
        let Some(list) = self.list.try_get_value() else {
            return;
        };
        let token = list.set_search(text);
        let delay_ms = list.search_delay().as_millis() as u32;
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            let completion = list.settle_search(token).await;
            log::debug!("[list] settle_search -> {:?}", completion);
        });
    }

    pub fn dispose(&self) {
        self.list.try_with_value(|list| list.dispose());
    }

    fn spawn<Fut>(&self, action: &'static str, run: impl FnOnce(Rc<DynList<T>>) -> Fut)
    where
        Fut: std::future::Future<Output = Completion> + 'static,
    {
        let Some(list) = self.list.try_get_value() else {
            return;
        };
        let fut = run(list);
        spawn_local(async move {
            let completion = fut.await;
            log::debug!("[list] {} -> {:?}", action, completion);
        });
    }
}
