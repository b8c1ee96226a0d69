//! Query state reducer (pure state transitions).
//!
//! Every transition is a total function: unknown or unsortable columns and
//! out-of-range pages leave a valid state instead of failing.

use crate::model::ColumnLookup;
use crate::query::{SortDescriptor, SortDirection, clamp_page_index};
use crate::state::{QueryAction, QueryState};

/// Apply `action` to `state`.
///
/// `filtered_count` is the number of rows that pass the filter under the
/// incoming `state`; it bounds page-index clamping for transitions that do
/// not change the search term.
pub fn reduce(
    state: QueryState,
    action: QueryAction,
    columns: &impl ColumnLookup,
    filtered_count: usize,
) -> QueryState {
    match action {
        QueryAction::SetSearchTerm(term) => set_search_term(state, term),
        QueryAction::ClearSearch => set_search_term(state, String::new()),
        QueryAction::ToggleSort(column_id) => toggle_sort(state, &column_id, columns),
        QueryAction::SetSort(descriptors) => set_sort(state, descriptors, columns),
        QueryAction::ClearSort => QueryState {
            sort: Vec::new(),
            ..state
        },
        QueryAction::SetPageIndex(index) => QueryState {
            page_index: clamp_page_index(index, filtered_count, state.page_size),
            ..state
        },
        QueryAction::SetPageSize(size) => set_page_size(state, size, filtered_count),
        QueryAction::ToggleColumnVisibility(column_id) => {
            let visible = state.is_hidden(&column_id);
            set_column_visible(state, column_id, visible, columns)
        }
        QueryAction::SetColumnVisible { column_id, visible } => {
            set_column_visible(state, column_id, visible, columns)
        }
    }
}

fn set_search_term(state: QueryState, term: String) -> QueryState {
    QueryState {
        search_term: term,
        page_index: 0,
        ..state
    }
}

/// unset → asc → desc → unset.
///
/// A column not yet in the list replaces it with a single ascending
/// descriptor; the page is left where it is.
fn toggle_sort(mut state: QueryState, column_id: &str, columns: &impl ColumnLookup) -> QueryState {
    if !columns.is_sortable(column_id) {
        return state;
    }

    match state.sort.iter().position(|d| d.column_id == column_id) {
        None => state.sort = vec![SortDescriptor::asc(column_id)],
        Some(i) => match state.sort[i].direction {
            SortDirection::Asc => state.sort[i].direction = SortDirection::Desc,
            SortDirection::Desc => {
                state.sort.remove(i);
            }
        },
    }
    state
}

fn set_sort(
    state: QueryState,
    descriptors: Vec<SortDescriptor>,
    columns: &impl ColumnLookup,
) -> QueryState {
    let mut sort: Vec<SortDescriptor> = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let duplicate = sort.iter().any(|d| d.column_id == descriptor.column_id);
        if columns.is_sortable(&descriptor.column_id) && !duplicate {
            sort.push(descriptor);
        }
    }
    QueryState { sort, ..state }
}

fn set_page_size(state: QueryState, size: usize, filtered_count: usize) -> QueryState {
    let page_size = size.max(1);
    QueryState {
        page_index: clamp_page_index(state.page_index, filtered_count, page_size),
        page_size,
        ..state
    }
}

fn set_column_visible(
    mut state: QueryState,
    column_id: String,
    visible: bool,
    columns: &impl ColumnLookup,
) -> QueryState {
    if !columns.contains(&column_id) {
        return state;
    }
    if visible {
        state.hidden_columns.remove(&column_id);
    } else {
        state.hidden_columns.insert(column_id);
    }
    state
}

// ===== Tests =====

#[cfg(test)]
#[path = "reducer_tests.rs"]
mod tests;
