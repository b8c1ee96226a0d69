//! Layout dimension constants and fixed strings for TUI rendering.

/// Height of the search input widget in lines (border + content).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Height of the footer in lines.
pub const FOOTER_HEIGHT: u16 = 1;

/// Spaces between table columns, shared by the TUI and print mode.
pub const COLUMN_SPACING: u16 = 2;

/// Widest a column may grow in the TUI before cells are truncated.
pub const MAX_COLUMN_WIDTH: usize = 40;

pub const SORT_ASC_INDICATOR: &str = "▲";
pub const SORT_DESC_INDICATOR: &str = "▼";

pub const LOADING_MESSAGE: &str = "Loading…";

/// Appended to the no-results message when clearing the search helps.
pub const CLEAR_SEARCH_HINT: &str = "(press Ctrl+L to clear)";
