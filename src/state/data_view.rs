//! The data-view engine bound to one host screen.
//!
//! A [`DataView`] owns the column registry, the host options and the
//! current [`QueryState`]. Rows are never stored: the host passes its
//! current snapshot to every call, and [`DataView::derive`] recomputes
//! Filter → Sort → Paginate → Stats from scratch.

use crate::model::{ColumnDef, ColumnRegistry};
use crate::query::{ViewStats, clamp_page_index, compute_stats, filter, paginate, sort};
use crate::state::query_state::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::state::{QueryAction, QueryState, reduce};
use std::fmt;
use tracing::debug;

/// Host-facing configuration of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// When true the host shows a placeholder instead of rows.
    pub loading: bool,
    /// Whether the search input exists. When false the term stays empty.
    pub show_search: bool,
    /// Placeholder text for the search input.
    pub search_placeholder: String,
    /// Initial page size.
    pub page_size: usize,
    /// Sizes offered by the page-size selector.
    pub page_size_options: Vec<usize>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            loading: false,
            show_search: true,
            search_placeholder: "Search...".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
        }
    }
}

/// Why a view has no rows to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// The search term filtered everything out; clearing it helps.
    NoResults { term: String },
    /// There is nothing to show even without a search.
    NoData,
}

impl EmptyState {
    /// Message shown in place of the table.
    pub fn message(&self) -> String {
        match self {
            EmptyState::NoResults { term } => format!("No results found for \"{}\"", term.trim()),
            EmptyState::NoData => "No data available".to_string(),
        }
    }

    /// Action that resolves the empty state, if any.
    pub fn recovery_action(&self) -> Option<QueryAction> {
        match self {
            EmptyState::NoResults { .. } => Some(QueryAction::ClearSearch),
            EmptyState::NoData => None,
        }
    }
}

/// Result of one recomputation. Borrowed from the host's rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a, R> {
    /// Rows that passed the filter, in sorted order.
    pub filtered_rows: Vec<&'a R>,
    /// Rows on the current page, a window of `filtered_rows`.
    pub page_rows: Vec<&'a R>,
    /// Effective page index after clamping.
    pub page_index: usize,
    /// Number of pages, at least one.
    pub page_count: usize,
    pub start_row: usize,
    pub end_row: usize,
    pub stats: ViewStats,
}

impl<R> DerivedView<'_, R> {
    pub fn can_go_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    /// Empty state for this view given the search term that produced it.
    pub fn empty_state(&self, search_term: &str) -> Option<EmptyState> {
        if !self.filtered_rows.is_empty() {
            return None;
        }
        if search_term.trim().is_empty() {
            Some(EmptyState::NoData)
        } else {
            Some(EmptyState::NoResults {
                term: search_term.to_string(),
            })
        }
    }
}

/// What the host should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewOutcome<'a, R> {
    /// Rows are still being fetched.
    Loading,
    /// Nothing to show.
    Empty(EmptyState),
    /// A page of rows.
    Rows(DerivedView<'a, R>),
}

type SearchObserver = Box<dyn FnMut(&str)>;

/// Searched, sorted, paginated view over rows of type `R`.
pub struct DataView<R, P = String> {
    columns: ColumnRegistry<R, P>,
    options: ViewOptions,
    state: QueryState,
    on_search_change: Option<SearchObserver>,
}

impl<R, P> DataView<R, P> {
    pub fn new(columns: ColumnRegistry<R, P>, options: ViewOptions) -> Self {
        let state = QueryState::new(options.page_size);
        Self {
            columns,
            options,
            state,
            on_search_change: None,
        }
    }

    /// Register an observer fired with the new term on every applied search
    /// change. It cannot affect the view.
    pub fn on_search_change<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.on_search_change = Some(Box::new(observer));
        self
    }

    pub fn columns(&self) -> &ColumnRegistry<R, P> {
        &self.columns
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    /// Columns not hidden by the query state, in declaration order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDef<R, P>> {
        self.columns
            .iter()
            .filter(|c| !self.state.is_hidden(c.id()))
    }

    /// Apply a transition against the host's current rows.
    ///
    /// Search changes are dropped when the search input is disabled. After
    /// the reducer runs, the page index is clamped against the filtered
    /// count under the new state.
    pub fn dispatch(&mut self, rows: &[R], action: QueryAction) {
        if !self.options.show_search && matches!(action, QueryAction::SetSearchTerm(_)) {
            debug!(?action, "search disabled, ignoring transition");
            return;
        }

        let changes_search = action.changes_search();
        let filtered_count = self.filtered_count(rows);
        debug!(?action, filtered_count, "dispatching query action");

        let mut next = reduce(self.state.clone(), action, &self.columns, filtered_count);

        let filtered_count = if changes_search {
            filter(rows, &self.columns, &next.search_term).len()
        } else {
            filtered_count
        };
        next.page_index = clamp_page_index(next.page_index, filtered_count, next.page_size);

        let term_changed = next.search_term != self.state.search_term;
        self.state = next;

        if changes_search {
            if let Some(observer) = self.on_search_change.as_mut() {
                observer(&self.state.search_term);
            }
        }
        if term_changed {
            debug!(
                term = %self.state.search_term,
                filtered_count,
                "search term changed"
            );
        }
    }

    /// Re-clamp the page index after the host replaced its row snapshot.
    pub fn sync_rows(&mut self, rows: &[R]) {
        let filtered_count = self.filtered_count(rows);
        let clamped = clamp_page_index(self.state.page_index, filtered_count, self.state.page_size);
        if clamped != self.state.page_index {
            debug!(
                from = self.state.page_index,
                to = clamped,
                "row snapshot shrank, clamping page"
            );
            self.state.page_index = clamped;
        }
    }

    /// Recompute the view: Filter → Sort → Paginate → Stats.
    pub fn derive<'a>(&self, rows: &'a [R]) -> DerivedView<'a, R> {
        let filtered = filter(rows, &self.columns, &self.state.search_term);
        let sorted = sort(filtered, &self.columns, &self.state.sort);
        let page = paginate(&sorted, self.state.page_index, self.state.page_size);
        let stats = compute_stats(rows.len(), sorted.len(), page.start_row, page.end_row);

        DerivedView {
            filtered_rows: sorted,
            page_rows: page.rows,
            page_index: page.page_index,
            page_count: page.page_count,
            start_row: page.start_row,
            end_row: page.end_row,
            stats,
        }
    }

    /// What the host should render for these rows.
    pub fn outcome<'a>(&self, rows: &'a [R]) -> ViewOutcome<'a, R> {
        if self.options.loading {
            return ViewOutcome::Loading;
        }
        let view = self.derive(rows);
        match view.empty_state(&self.state.search_term) {
            Some(empty) => ViewOutcome::Empty(empty),
            None => ViewOutcome::Rows(view),
        }
    }

    // ===== Pagination controls =====

    pub fn can_go_previous(&self, rows: &[R]) -> bool {
        self.effective_page_index(rows) > 0
    }

    pub fn can_go_next(&self, rows: &[R]) -> bool {
        let filtered_count = self.filtered_count(rows);
        let page_count = crate::query::page_count(filtered_count, self.state.page_size);
        self.effective_page_index(rows) + 1 < page_count
    }

    pub fn first_page(&mut self, rows: &[R]) {
        self.dispatch(rows, QueryAction::SetPageIndex(0));
    }

    pub fn last_page(&mut self, rows: &[R]) {
        self.dispatch(rows, QueryAction::SetPageIndex(usize::MAX));
    }

    pub fn next_page(&mut self, rows: &[R]) {
        let next = self.effective_page_index(rows).saturating_add(1);
        self.dispatch(rows, QueryAction::SetPageIndex(next));
    }

    pub fn previous_page(&mut self, rows: &[R]) {
        let prev = self.effective_page_index(rows).saturating_sub(1);
        self.dispatch(rows, QueryAction::SetPageIndex(prev));
    }

    pub fn set_page_size(&mut self, rows: &[R], page_size: usize) {
        self.dispatch(rows, QueryAction::SetPageSize(page_size));
    }

    /// Step to the next configured page size, wrapping around.
    ///
    /// A current size outside the options list moves to the first option.
    pub fn cycle_page_size(&mut self, rows: &[R]) {
        let options = &self.options.page_size_options;
        if options.is_empty() {
            return;
        }
        let next = options
            .iter()
            .position(|&size| size == self.state.page_size)
            .map(|i| options[(i + 1) % options.len()])
            .unwrap_or(options[0]);
        self.set_page_size(rows, next);
    }

    fn filtered_count(&self, rows: &[R]) -> usize {
        filter(rows, &self.columns, &self.state.search_term).len()
    }

    fn effective_page_index(&self, rows: &[R]) -> usize {
        clamp_page_index(
            self.state.page_index,
            self.filtered_count(rows),
            self.state.page_size,
        )
    }
}

impl<R, P> fmt::Debug for DataView<R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataView")
            .field("columns", &self.columns)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("on_search_change", &self.on_search_change.is_some())
            .finish()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "data_view_tests.rs"]
mod tests;
