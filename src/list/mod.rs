//! List views: query state, the fetching controller, and search debounce.

mod controller;
mod debounce;
mod query;

pub use controller::{ListController, ListState, RefreshListener};
pub use debounce::SearchDebouncer;
pub use query::{ListQuery, SortOrder};
