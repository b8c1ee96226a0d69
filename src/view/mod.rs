//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod footer;
mod layout;
pub mod print;
mod search_input;
mod styles;
mod table;

pub use footer::{footer_text, stats_line};
pub use layout::{Screen, ScreenAreas, calculate_areas, render_screen};
pub use print::{print_page, render_plain};
pub use search_input::SearchInput;
pub use styles::{ColorConfig, TableStyles};
pub use table::{DataTable, MessageBox, TableText, column_widths, empty_message, header_label};

use crate::config::ResolvedConfig;
use crate::config::keybindings::KeyBindings;
use crate::model::{
    ColumnRegistry, InputError, KeyAction, Record, RegistryError, infer_column_ids, record_columns,
};
use crate::query::SortDescriptor;
use crate::source::{RecordSource, SnapshotCache};
use crate::state::{
    BrowserState, DataView, QueryAction, handle_key_action, handle_search_backspace,
    handle_search_char,
};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// Query applied once before the first frame, from CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialQuery {
    pub search: Option<String>,
    pub sort: Vec<SortDescriptor>,
    /// 1-based page number.
    pub page: Option<usize>,
}

impl InitialQuery {
    /// Dispatch the query against `rows`. Sort and search go first so the
    /// page number is clamped against the final filtered set.
    pub fn apply<R, P>(&self, view: &mut DataView<R, P>, rows: &[R]) {
        if !self.sort.is_empty() {
            view.dispatch(rows, QueryAction::SetSort(self.sort.clone()));
        }
        if let Some(term) = &self.search {
            view.dispatch(rows, QueryAction::SetSearchTerm(term.clone()));
        }
        if let Some(page) = self.page {
            view.dispatch(rows, QueryAction::SetPageIndex(page.saturating_sub(1)));
        }
    }
}

/// Build the record view for the resolved configuration.
///
/// Configured columns come first, in the configured order; remaining
/// inferred columns follow and start hidden.
///
/// # Errors
///
/// Returns `RegistryError::DuplicateColumnId` if the configured column list
/// repeats an id.
pub fn build_record_view(
    records: &[Record],
    config: &ResolvedConfig,
) -> Result<DataView<Record>, RegistryError> {
    let inferred = infer_column_ids(records);
    let (ids, hidden) = match &config.columns {
        Some(listed) => {
            let extra: Vec<String> = inferred
                .into_iter()
                .filter(|id| !listed.contains(id))
                .collect();
            let ids: Vec<String> = listed.iter().cloned().chain(extra.iter().cloned()).collect();
            (ids, extra)
        }
        None => (inferred, Vec::new()),
    };

    let columns = ColumnRegistry::new(record_columns(
        &ids,
        &config.unsortable_columns,
        &config.unsearchable_columns,
    ))?;
    debug!(columns = ?ids, hidden = ?hidden, "built record columns");

    let mut view = DataView::new(columns, config.view_options());
    for column_id in hidden {
        view.dispatch(
            records,
            QueryAction::SetColumnVisible {
                column_id,
                visible: false,
            },
        );
    }
    Ok(view)
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    view: DataView<Record>,
    browser: BrowserState,
    source: RecordSource,
    source_key: String,
    snapshots: SnapshotCache<String, Vec<Record>>,
    key_bindings: KeyBindings,
    styles: TableStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        source: RecordSource,
        records: Vec<Record>,
        view: DataView<Record>,
        styles: TableStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let terminal = undo_on_error(enter_alternate_screen(), || {
            if let Err(e) = disable_raw_mode() {
                warn!(error = %e, "failed to disable raw mode after setup error");
            }
        })?;

        Ok(Self::with_terminal(terminal, source, records, view, styles))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C)
    pub fn run(&mut self) -> Result<(), TuiError> {
        loop {
            self.draw()?;

            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                }
                _ => {}
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the app on an existing terminal. The initial records become the
    /// first cached snapshot of `source`.
    pub fn with_terminal(
        terminal: Terminal<B>,
        source: RecordSource,
        records: Vec<Record>,
        view: DataView<Record>,
        styles: TableStyles,
    ) -> Self {
        let source_key = source.name();
        let mut snapshots = SnapshotCache::new();
        snapshots.insert(source_key.clone(), records);

        Self {
            terminal,
            view,
            browser: BrowserState::default(),
            source,
            source_key,
            snapshots,
            key_bindings: KeyBindings::default(),
            styles,
        }
    }

    pub fn view(&self) -> &DataView<Record> {
        &self.view
    }

    pub fn browser(&self) -> &BrowserState {
        &self.browser
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Rows of the current snapshot.
    pub fn rows(&self) -> &[Record] {
        current_rows(&self.snapshots, &self.source_key)
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let rows = current_rows(&self.snapshots, &self.source_key);

        // The search input consumes printable keys before the bindings see them.
        if self.browser.is_searching() {
            let plain = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            let action = match key.code {
                KeyCode::Char(ch) if plain => {
                    handle_search_char(&self.browser, &mut self.view, rows, ch);
                    return false;
                }
                KeyCode::Backspace => {
                    handle_search_backspace(&self.browser, &mut self.view, rows);
                    return false;
                }
                KeyCode::Enter => Some(KeyAction::SubmitSearch),
                KeyCode::Esc => Some(KeyAction::CancelSearch),
                _ => None,
            };
            if let Some(action) = action {
                handle_key_action(&mut self.browser, &mut self.view, rows, action);
                return false;
            }
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::Reload => self.reload(),
            _ => handle_key_action(&mut self.browser, &mut self.view, rows, action),
        }
        false
    }

    /// Re-read the source and replace the snapshot.
    ///
    /// A failed read keeps the previous rows on screen. Columns stay as
    /// built at startup.
    fn reload(&mut self) {
        if !self.source.is_reloadable() {
            self.browser.status = Some(format!("{} cannot be reloaded", self.source_key));
            return;
        }

        self.view.set_loading(true);
        if let Err(e) = self.draw() {
            warn!(error = %e, "failed to draw loading frame");
        }

        let source = &mut self.source;
        let result = self
            .snapshots
            .refresh(self.source_key.clone(), || source.load().map(|l| l.records));
        self.view.set_loading(false);

        match result {
            Ok(rows) => {
                info!(records = rows.len(), "reloaded records");
                self.view.sync_rows(rows);
                self.browser.status = Some(format!("Reloaded {} records", rows.len()));
            }
            Err(e) => {
                warn!(error = %e, "reload failed, keeping previous snapshot");
                self.browser.status = Some(format!("Reload failed: {e}"));
            }
        }
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let screen = Screen {
            view: &self.view,
            rows: current_rows(&self.snapshots, &self.source_key),
            browser: &self.browser,
            styles: &self.styles,
        };
        self.terminal.draw(|frame| render_screen(frame, &screen))?;
        Ok(())
    }
}

fn current_rows<'c>(snapshots: &'c SnapshotCache<String, Vec<Record>>, key: &str) -> &'c [Record] {
    snapshots.get(key).map(Vec::as_slice).unwrap_or(&[])
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    source: RecordSource,
    records: Vec<Record>,
    view: DataView<Record>,
    styles: TableStyles,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(source, records, view, styles)?;

    let result = app.run();

    restore_terminal()?;

    result
}

fn enter_alternate_screen() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Run `undo` when `result` is an error, then pass `result` through.
fn undo_on_error<T, E>(result: Result<T, E>, undo: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        undo();
    }
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
