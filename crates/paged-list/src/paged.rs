//! Paged List - async driver over a [`ListController`]
//!
//! Owns the controller and the injected fetcher, runs each issued ticket
//! through the fetcher and feeds the outcome back. Observers are notified
//! after every observable transition (fetch started, fetch applied, search
//! text changed).
//!
//! Observers must not call back into the list synchronously.

use std::cell::RefCell;
use std::time::Duration;

use crate::controller::{Completion, ListConfig, ListController, PageTicket};
use crate::debounce::DebounceToken;
use crate::fetcher::PageFetcher;
use crate::request::Filters;
use crate::state::ListState;

type Observer<T> = Box<dyn Fn(&ListState<T>)>;

pub struct PagedList<T, F> {
    controller: RefCell<ListController<T>>,
    fetcher: F,
    observer: RefCell<Option<Observer<T>>>,
}

impl<T, F> PagedList<T, F>
where
    T: Clone,
    F: PageFetcher<T>,
{
    pub fn new(fetcher: F, config: ListConfig) -> Self {
        Self {
            controller: RefCell::new(ListController::new(config)),
            fetcher,
            observer: RefCell::new(None),
        }
    }

    /// Replace the state observer
    pub fn subscribe(&self, observer: impl Fn(&ListState<T>) + 'static) {
        *self.observer.borrow_mut() = Some(Box::new(observer));
    }

    pub fn snapshot(&self) -> ListState<T> {
        self.controller.borrow().state().clone()
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&ListState<T>) -> R) -> R {
        f(self.controller.borrow().state())
    }

    pub fn search_delay(&self) -> Duration {
        self.controller.borrow().search_delay()
    }

    pub fn can_retry(&self) -> bool {
        self.controller.borrow().can_retry()
    }

    pub async fn initialize(&self, filters: Filters, search: impl Into<String>) -> Completion {
        let ticket = self.controller.borrow_mut().begin_initialize(filters, search);
        self.run(ticket).await
    }

    pub async fn load_more(&self) -> Completion {
        let ticket = self.controller.borrow_mut().begin_load_more();
        self.run(ticket).await
    }

    pub async fn refresh(&self) -> Completion {
        let ticket = self.controller.borrow_mut().begin_refresh();
        self.run(ticket).await
    }

    pub async fn apply_filters(&self, filters: Filters) -> Completion {
        let ticket = self.controller.borrow_mut().begin_apply_filters(filters);
        self.run(ticket).await
    }

    /// Store the search text and return the token the caller should settle
    /// after [`PagedList::search_delay`].
    pub fn set_search(&self, text: impl Into<String>) -> DebounceToken {
        let token = self.controller.borrow_mut().set_search(text);
        self.notify();
        token
    }

    pub async fn settle_search(&self, token: DebounceToken) -> Completion {
        let ticket = self.controller.borrow_mut().settle_search(token);
        self.run(ticket).await
    }

    pub async fn retry(&self) -> Completion {
        let ticket = self.controller.borrow_mut().begin_retry();
        self.run(ticket).await
    }

    /// Detach from the screen; in-flight responses are ignored from now on
    pub fn dispose(&self) {
        self.controller.borrow_mut().dispose();
        self.observer.borrow_mut().take();
    }

    async fn run(&self, ticket: Option<PageTicket>) -> Completion {
        let Some(ticket) = ticket else {
            return Completion::Skipped;
        };
        self.notify();

        let outcome = self.fetcher.fetch_page(ticket.request().clone()).await;

        let completion = self.controller.borrow_mut().complete(&ticket, outcome);
        if completion == Completion::Applied {
            self.notify();
        }
        completion
    }

    fn notify(&self) {
        let observer = self.observer.borrow();
        if let Some(observer) = observer.as_ref() {
            observer(self.controller.borrow().state());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::request::{PageRequest, PageResult};
    use crate::state::Activity;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::rc::Rc;
    use tokio::sync::oneshot;

    /// Serves numbered items `0..total` in pages, or a scripted failure
    struct RangeFetcher {
        total: u32,
        fail_pages: RefCell<Vec<u32>>,
        requests: RefCell<Vec<PageRequest>>,
    }

    impl RangeFetcher {
        fn new(total: u32) -> Self {
            Self {
                total,
                fail_pages: RefCell::new(Vec::new()),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl PageFetcher<u32> for RangeFetcher {
        async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<u32>, FetchError> {
            self.requests.borrow_mut().push(request.clone());
            let mut fail_pages = self.fail_pages.borrow_mut();
            if let Some(pos) = fail_pages.iter().position(|p| *p == request.page_number) {
                fail_pages.remove(pos);
                return Err(FetchError::new(503, "unavailable"));
            }
            let start = (request.page_number - 1) * request.page_size;
            let end = (start + request.page_size).min(self.total);
            Ok(PageResult::new((start..end).collect(), self.total as usize))
        }
    }

    /// Holds each response until the test releases it; keyed by search text
    struct GatedFetcher {
        gates: RefCell<HashMap<String, oneshot::Receiver<PageResult<u32>>>>,
    }

    #[async_trait(?Send)]
    impl PageFetcher<u32> for GatedFetcher {
        async fn fetch_page(&self, request: PageRequest) -> Result<PageResult<u32>, FetchError> {
            let gate = self.gates.borrow_mut().remove(&request.search);
            match gate {
                Some(rx) => rx.await.map_err(|e| FetchError::transport(e.to_string())),
                None => Err(FetchError::transport("no gate")),
            }
        }
    }

    #[tokio::test]
    async fn test_scenario_three_pages() {
        let list = PagedList::new(RangeFetcher::new(25), ListConfig::default());

        assert_eq!(list.initialize(Filters::new(), "").await, Completion::Applied);
        assert_eq!(list.snapshot().items.len(), 10);

        list.load_more().await;
        assert_eq!(list.snapshot().items.len(), 20);

        list.load_more().await;
        assert_eq!(list.snapshot().items.len(), 25);

        assert_eq!(list.load_more().await, Completion::Skipped);
        assert_eq!(list.snapshot().items, (0..25).collect::<Vec<_>>());
        assert_eq!(list.fetcher.requests.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_observer_never_sees_two_flags() {
        let list = PagedList::new(RangeFetcher::new(40), ListConfig::default());
        let seen: Rc<RefCell<Vec<Activity>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        list.subscribe(move |state| {
            let flags = [state.is_loading(), state.is_loading_more(), state.is_refreshing()];
            assert!(flags.iter().filter(|f| **f).count() <= 1);
            sink.borrow_mut().push(state.activity);
        });

        list.initialize(Filters::new(), "").await;
        list.load_more().await;
        list.refresh().await;

        assert_eq!(
            *seen.borrow(),
            vec![
                Activity::Loading,
                Activity::Idle,
                Activity::LoadingMore,
                Activity::Idle,
                Activity::Refreshing,
                Activity::Idle,
            ]
        );
        assert_eq!(list.snapshot().items.len(), 10);
    }

    #[tokio::test]
    async fn test_retry_after_failed_load_more() {
        let fetcher = RangeFetcher::new(25);
        fetcher.fail_pages.borrow_mut().push(2);
        let list = PagedList::new(fetcher, ListConfig::default());

        list.initialize(Filters::new(), "").await;
        list.load_more().await;
        let state = list.snapshot();
        assert_eq!(state.items.len(), 10);
        assert!(state.error.is_some());
        assert!(list.can_retry());

        assert_eq!(list.retry().await, Completion::Applied);
        let state = list.snapshot();
        assert_eq!(state.items.len(), 20);
        assert!(state.error.is_none());

        let requests = list.fetcher.requests.borrow();
        assert_eq!(requests[1], requests[2]);
    }

    #[tokio::test]
    async fn test_settle_search_fetches_once() {
        let list = PagedList::new(RangeFetcher::new(5), ListConfig::default());
        list.initialize(Filters::new(), "").await;

        let tokens: Vec<_> = ["m", "ma", "mat"].iter().map(|t| list.set_search(*t)).collect();
        let mut completions = Vec::new();
        for token in tokens {
            completions.push(list.settle_search(token).await);
        }

        assert_eq!(completions, vec![Completion::Skipped, Completion::Skipped, Completion::Applied]);
        let requests = list.fetcher.requests.borrow();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].search, "mat");
    }

    #[tokio::test]
    async fn test_slow_old_response_loses_to_newer_one() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let (tx_a, rx_a) = oneshot::channel();
                let (tx_b, rx_b) = oneshot::channel();
                let mut gates = HashMap::new();
                gates.insert("a".to_string(), rx_a);
                gates.insert("b".to_string(), rx_b);
                let list = Rc::new(PagedList::new(
                    GatedFetcher { gates: RefCell::new(gates) },
                    ListConfig::default(),
                ));

                let first = list.clone();
                let a = tokio::task::spawn_local(async move { first.initialize(Filters::new(), "a").await });
                while list.fetcher.gates.borrow().contains_key("a") {
                    tokio::task::yield_now().await;
                }

                let second = list.clone();
                let b = tokio::task::spawn_local(async move { second.initialize(Filters::new(), "b").await });
                while list.fetcher.gates.borrow().contains_key("b") {
                    tokio::task::yield_now().await;
                }

                tx_b.send(PageResult::new(vec![7, 8], 2)).unwrap();
                assert_eq!(b.await.unwrap(), Completion::Applied);

                tx_a.send(PageResult::new((0..10).collect(), 50)).unwrap();
                assert_eq!(a.await.unwrap(), Completion::Stale);

                let state = list.snapshot();
                assert_eq!(state.items, vec![7, 8]);
                assert_eq!(state.search, "b");
                assert_eq!(state.activity, Activity::Idle);
            })
            .await;
    }

    #[tokio::test]
    async fn test_dispose_while_in_flight() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let (tx, rx) = oneshot::channel();
                let mut gates = HashMap::new();
                gates.insert(String::new(), rx);
                let list = Rc::new(PagedList::new(
                    GatedFetcher { gates: RefCell::new(gates) },
                    ListConfig::default(),
                ));
                let updates = Rc::new(RefCell::new(0usize));
                let counter = updates.clone();
                list.subscribe(move |_| *counter.borrow_mut() += 1);

                let pending = list.clone();
                let handle = tokio::task::spawn_local(async move { pending.initialize(Filters::new(), "").await });
                while !list.fetcher.gates.borrow().is_empty() {
                    tokio::task::yield_now().await;
                }
                assert_eq!(*updates.borrow(), 1);

                list.dispose();
                tx.send(PageResult::new(vec![1], 1)).unwrap();
                assert_eq!(handle.await.unwrap(), Completion::Disposed);
                assert!(list.snapshot().items.is_empty());
                assert_eq!(*updates.borrow(), 1);
            })
            .await;
    }
}
