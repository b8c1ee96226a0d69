//! Query state: the mutable tuple that drives a view.

use crate::query::{SortDescriptor, SortDirection};
use std::collections::BTreeSet;

/// Initial page size when the host does not configure one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 6] = [5, 10, 20, 30, 40, 50];

/// Search term, sort descriptors, page position and column visibility.
///
/// Only ever replaced as a whole by [`reduce`](crate::state::reduce); a
/// derived view is a pure function of rows, columns and this struct.
///
/// # Invariants
///
/// - `page_size >= 1`
/// - after any transition that can shrink the filtered set,
///   `page_index < page_count(filtered, page_size)`
/// - no two sort descriptors name the same column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_term: String,
    pub sort: Vec<SortDescriptor>,
    pub page_index: usize,
    pub page_size: usize,
    pub hidden_columns: BTreeSet<String>,
}

impl QueryState {
    /// Fresh state with the given page size (zero is raised to one).
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            sort: Vec::new(),
            page_index: 0,
            page_size: page_size.max(1),
            hidden_columns: BTreeSet::new(),
        }
    }

    /// Direction currently applied to `column_id`, if any.
    pub fn sort_direction(&self, column_id: &str) -> Option<SortDirection> {
        self.sort
            .iter()
            .find(|d| d.column_id == column_id)
            .map(|d| d.direction)
    }

    /// True when the trimmed search term is non-empty.
    pub fn has_search(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    pub fn is_hidden(&self, column_id: &str) -> bool {
        self.hidden_columns.contains(column_id)
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Legal transitions of [`QueryState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAction {
    /// Replace the search term. Always returns to the first page.
    SetSearchTerm(String),
    /// Same as `SetSearchTerm("")`.
    ClearSearch,
    /// Cycle one column through unset → asc → desc → unset.
    ToggleSort(String),
    /// Replace the whole descriptor list.
    SetSort(Vec<SortDescriptor>),
    /// Drop every sort descriptor.
    ClearSort,
    /// Jump to a page, clamped to the pages that exist.
    SetPageIndex(usize),
    /// Change page size, keeping the page index as close as possible.
    SetPageSize(usize),
    /// Flip a column between shown and hidden.
    ToggleColumnVisibility(String),
    /// Show or hide a column explicitly.
    SetColumnVisible { column_id: String, visible: bool },
}

impl QueryAction {
    /// Whether the transition replaces the search term.
    pub fn changes_search(&self) -> bool {
        matches!(self, QueryAction::SetSearchTerm(_) | QueryAction::ClearSearch)
    }
}
