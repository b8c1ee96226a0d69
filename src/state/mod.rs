//! Query state machine (pure) and the data-view engine built on it.
//!
//! All state transitions are pure functions testable without a terminal.

pub mod browser;
pub mod data_view;
pub mod query_state;
pub mod reducer;

// Re-export for convenience
pub use browser::{
    BrowserState, InputMode, handle_key_action, handle_search_backspace, handle_search_char,
};
pub use data_view::{DataView, DerivedView, EmptyState, ViewOptions, ViewOutcome};
pub use query_state::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, QueryAction, QueryState};
pub use reducer::reduce;
