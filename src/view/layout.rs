//! Screen layout: search bar, table and footer.

use crate::state::{BrowserState, DataView, ViewOutcome};
use crate::view::constants::{FOOTER_HEIGHT, LOADING_MESSAGE, SEARCH_INPUT_HEIGHT};
use crate::view::footer::footer_text;
use crate::view::search_input::SearchInput;
use crate::view::styles::TableStyles;
use crate::view::table::{DataTable, MessageBox, empty_message};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
};

/// Everything one frame needs, borrowed from the app.
pub struct Screen<'a, R> {
    pub view: &'a DataView<R>,
    pub rows: &'a [R],
    pub browser: &'a BrowserState,
    pub styles: &'a TableStyles,
}

/// Areas of the screen. `search` is absent when the view has no search input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub search: Option<Rect>,
    pub table: Rect,
    pub footer: Rect,
}

pub fn calculate_areas(area: Rect, show_search: bool) -> ScreenAreas {
    if show_search {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_INPUT_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);
        ScreenAreas {
            search: Some(chunks[0]),
            table: chunks[1],
            footer: chunks[2],
        }
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(FOOTER_HEIGHT)])
            .split(area);
        ScreenAreas {
            search: None,
            table: chunks[0],
            footer: chunks[1],
        }
    }
}

pub fn render_screen<R>(frame: &mut Frame, screen: &Screen<'_, R>) {
    let Screen {
        view,
        rows,
        browser,
        styles,
    } = *screen;
    let options = view.options();
    let areas = calculate_areas(frame.area(), options.show_search);
    let focused = browser.focused_column_id(view);

    if let Some(search_area) = areas.search {
        let input = SearchInput::new(
            &view.state().search_term,
            &options.search_placeholder,
            browser.is_searching(),
            styles,
        );
        frame.render_widget(input, search_area);
    }

    let derived = match view.outcome(rows) {
        ViewOutcome::Loading => {
            frame.render_widget(MessageBox::new(LOADING_MESSAGE, styles.message), areas.table);
            view.derive(rows)
        }
        ViewOutcome::Empty(empty) => {
            let message = empty_message(&empty);
            frame.render_widget(MessageBox::new(&message, styles.message), areas.table);
            view.derive(rows)
        }
        ViewOutcome::Rows(derived) => {
            frame.render_widget(
                DataTable::new(view, &derived.page_rows, focused, styles),
                areas.table,
            );
            derived
        }
    };

    let footer = match &browser.status {
        Some(status) => Paragraph::new(Line::from(status.as_str())).style(styles.status),
        None => Paragraph::new(footer_text(view, &derived, focused)).style(styles.footer),
    };
    frame.render_widget(footer, areas.footer);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
