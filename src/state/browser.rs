//! Interactive browser state around a [`DataView`].
//!
//! Tracks which column has focus and whether keystrokes go to the search
//! input. Handlers here are pure state transitions, the terminal shell only
//! routes key events to them.

use crate::model::{ColumnLookup, KeyAction};
use crate::state::{DataView, QueryAction};
use tracing::debug;

/// Where keystrokes are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are looked up in the key bindings.
    #[default]
    Browsing,
    /// Printable keys edit the search term.
    Searching,
}

/// Host-side state that the query engine does not own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowserState {
    pub mode: InputMode,
    /// Index into the registry, not into the visible columns, so hidden
    /// columns stay reachable for re-showing.
    pub focused_column: usize,
    /// One-line notice shown in the footer until the next key.
    pub status: Option<String>,
}

impl BrowserState {
    pub fn is_searching(&self) -> bool {
        self.mode == InputMode::Searching
    }

    /// Id of the focused column, if the registry has any columns.
    pub fn focused_column_id<'v, R, P>(&self, view: &'v DataView<R, P>) -> Option<&'v str> {
        view.columns()
            .columns()
            .get(self.focused_column)
            .map(|c| c.id())
    }
}

/// Apply a bound key action.
///
/// `Reload` and `Quit` need the terminal shell and are ignored here.
pub fn handle_key_action<R, P>(
    state: &mut BrowserState,
    view: &mut DataView<R, P>,
    rows: &[R],
    action: KeyAction,
) {
    state.status = None;
    let column_count = view.columns().len();

    match action {
        KeyAction::StartSearch => {
            if view.options().show_search {
                state.mode = InputMode::Searching;
            }
        }
        KeyAction::SubmitSearch => state.mode = InputMode::Browsing,
        KeyAction::CancelSearch => {
            state.mode = InputMode::Browsing;
            view.dispatch(rows, QueryAction::ClearSearch);
        }
        KeyAction::ClearSearch => view.dispatch(rows, QueryAction::ClearSearch),

        KeyAction::NextPage => view.next_page(rows),
        KeyAction::PrevPage => view.previous_page(rows),
        KeyAction::FirstPage => view.first_page(rows),
        KeyAction::LastPage => view.last_page(rows),
        KeyAction::CyclePageSize => view.cycle_page_size(rows),

        KeyAction::NextColumn => {
            if column_count > 0 {
                state.focused_column = (state.focused_column + 1) % column_count;
            }
        }
        KeyAction::PrevColumn => {
            if column_count > 0 {
                state.focused_column = (state.focused_column + column_count - 1) % column_count;
            }
        }
        KeyAction::ToggleSort => {
            let Some(id) = state.focused_column_id(view).map(str::to_string) else {
                return;
            };
            if view.columns().is_sortable(&id) {
                view.dispatch(rows, QueryAction::ToggleSort(id));
            } else {
                state.status = Some(format!("Column '{}' is not sortable", id));
            }
        }
        KeyAction::ClearSort => view.dispatch(rows, QueryAction::ClearSort),
        KeyAction::ToggleColumn => {
            if let Some(id) = state.focused_column_id(view).map(str::to_string) {
                view.dispatch(rows, QueryAction::ToggleColumnVisibility(id));
            }
        }

        KeyAction::Reload | KeyAction::Quit => {
            debug!(?action, "action handled by the terminal shell");
        }
    }
}

/// Append a character to the search term while searching.
pub fn handle_search_char<R, P>(
    state: &BrowserState,
    view: &mut DataView<R, P>,
    rows: &[R],
    ch: char,
) {
    if !state.is_searching() {
        return;
    }
    let mut term = view.state().search_term.clone();
    term.push(ch);
    view.dispatch(rows, QueryAction::SetSearchTerm(term));
}

/// Remove the last character of the search term while searching.
pub fn handle_search_backspace<R, P>(state: &BrowserState, view: &mut DataView<R, P>, rows: &[R]) {
    if !state.is_searching() {
        return;
    }
    let mut term = view.state().search_term.clone();
    if term.pop().is_some() {
        view.dispatch(rows, QueryAction::SetSearchTerm(term));
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
