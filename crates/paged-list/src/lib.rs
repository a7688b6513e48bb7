//! Paged List
//!
//! Fetch / paginate / filter / refresh state for a remote collection.
//!
//! - [`ListController`]: pure state machine issuing sequence-tagged tickets
//! - [`PagedList`]: single-threaded async driver over an injected [`PageFetcher`]
//! - [`Debouncer`]: search-input quiet period bookkeeping

mod controller;
mod debounce;
mod error;
mod fetcher;
mod paged;
mod request;
mod state;

pub use controller::{Completion, ListConfig, ListController, PageTicket, DEFAULT_PAGE_SIZE};
pub use debounce::{DebounceToken, Debouncer, DEFAULT_SEARCH_DEBOUNCE};
pub use error::FetchError;
pub use fetcher::{FnFetcher, PageFetcher};
pub use paged::PagedList;
pub use request::{Filters, PageRequest, PageResult};
pub use state::{Activity, ListState, LoadKind};
