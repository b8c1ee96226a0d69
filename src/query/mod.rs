//! Query stages (pure).
//!
//! Filter → Sort → Paginate, recomputed in that order from the full row set,
//! plus the stats computer that reads their intermediate results.

pub mod filter;
pub mod paginate;
pub mod sort;
pub mod stats;

// Re-export for convenience
pub use filter::{filter, normalize_term, row_haystack};
pub use paginate::{Page, clamp_page_index, page_count, paginate};
pub use sort::{SortDescriptor, SortDirection, sort};
pub use stats::{ViewStats, compute_stats};
