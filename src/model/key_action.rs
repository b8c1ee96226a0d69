//! Domain-level keyboard actions independent of key bindings.

/// Actions the browser can perform, mapped from keys by `KeyBindings`.
///
/// These represent user intent, not specific keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Search
    /// Focus the search input. Default: /
    StartSearch,
    /// Leave the search input, keeping the term. Default: Enter
    SubmitSearch,
    /// Leave the search input and discard the term. Default: Esc
    CancelSearch,
    /// Clear the active search term. Default: Ctrl+l
    ClearSearch,

    // Paging
    /// Next page. Default: n/→/Page Down
    NextPage,
    /// Previous page. Default: p/←/Page Up
    PrevPage,
    /// First page. Default: g/Home
    FirstPage,
    /// Last page. Default: G/End
    LastPage,
    /// Step through the page-size options. Default: z
    CyclePageSize,

    // Columns
    /// Move column focus right. Default: l/Tab
    NextColumn,
    /// Move column focus left. Default: h/Shift+Tab
    PrevColumn,
    /// Cycle sort on the focused column: none → asc → desc → none. Default: s/Enter
    ToggleSort,
    /// Drop all sort descriptors. Default: S
    ClearSort,
    /// Hide or show the focused column. Default: v
    ToggleColumn,

    // Application
    /// Re-read the record source, keeping the current rows on failure. Default: r
    Reload,
    /// Quit. Default: q
    Quit,
}

impl KeyAction {
    /// Whether the action changes the query state of the view.
    pub fn is_query_action(self) -> bool {
        !matches!(
            self,
            KeyAction::StartSearch
                | KeyAction::SubmitSearch
                | KeyAction::NextColumn
                | KeyAction::PrevColumn
                | KeyAction::Reload
                | KeyAction::Quit
        )
    }
}
