//! Table rendering shared by the TUI and print mode.

use crate::model::ColumnDef;
use crate::query::SortDirection;
use crate::state::{DataView, EmptyState};
use crate::view::constants::{
    CLEAR_SEARCH_HINT, COLUMN_SPACING, MAX_COLUMN_WIDTH, SORT_ASC_INDICATOR, SORT_DESC_INDICATOR,
};
use crate::view::styles::TableStyles;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::Style,
    widgets::{Cell, Paragraph, Row, Table, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

/// Header text with the sort indicator appended, e.g. `"Name ▲"`.
pub fn header_label<R, P>(column: &ColumnDef<R, P>, direction: Option<SortDirection>) -> String {
    match direction {
        Some(SortDirection::Asc) => format!("{} {}", column.header_label(), SORT_ASC_INDICATOR),
        Some(SortDirection::Desc) => format!("{} {}", column.header_label(), SORT_DESC_INDICATOR),
        None => column.header_label().to_string(),
    }
}

/// Text shown in place of the table for an empty view.
pub fn empty_message(empty: &EmptyState) -> String {
    match empty.recovery_action() {
        Some(_) => format!("{} {}", empty.message(), CLEAR_SEARCH_HINT),
        None => empty.message(),
    }
}

/// Display width of each column: the widest of its header and cells,
/// optionally capped.
pub fn column_widths(headers: &[String], cells: &[Vec<String>], cap: Option<usize>) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let widest = cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|text| text.width())
                .fold(header.width(), usize::max);
            cap.map_or(widest, |cap| widest.min(cap))
        })
        .collect()
}

/// Rendered headers and cells of the visible columns for one page.
pub struct TableText {
    pub headers: Vec<String>,
    pub cells: Vec<Vec<String>>,
}

impl TableText {
    pub fn build<R>(view: &DataView<R>, page_rows: &[&R]) -> Self {
        let columns: Vec<&ColumnDef<R>> = view.visible_columns().collect();
        let state = view.state();

        let headers = columns
            .iter()
            .map(|&c| header_label(c, state.sort_direction(c.id())))
            .collect();
        let cells = page_rows
            .iter()
            .map(|row| columns.iter().map(|c| c.render(row)).collect())
            .collect();

        Self { headers, cells }
    }
}

/// Table widget over one page of rows.
pub struct DataTable<'a, R> {
    view: &'a DataView<R>,
    page_rows: &'a [&'a R],
    focused_column: Option<&'a str>,
    styles: &'a TableStyles,
}

impl<'a, R> DataTable<'a, R> {
    pub fn new(
        view: &'a DataView<R>,
        page_rows: &'a [&'a R],
        focused_column: Option<&'a str>,
        styles: &'a TableStyles,
    ) -> Self {
        Self {
            view,
            page_rows,
            focused_column,
            styles,
        }
    }
}

impl<R> Widget for DataTable<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = TableText::build(self.view, self.page_rows);
        let focused: Vec<bool> = self
            .view
            .visible_columns()
            .map(|c| Some(c.id()) == self.focused_column)
            .collect();
        let widths = column_widths(&text.headers, &text.cells, Some(MAX_COLUMN_WIDTH));

        let pick = |is_focused: bool, focused_style: Style, style: Style| {
            if is_focused { focused_style } else { style }
        };

        let header = Row::new(text.headers.iter().zip(&focused).map(|(label, &is_focused)| {
            Cell::from(label.as_str()).style(pick(
                is_focused,
                self.styles.focused_header,
                self.styles.header,
            ))
        }));

        let body = text.cells.iter().map(|row| {
            Row::new(row.iter().zip(&focused).map(|(cell, &is_focused)| {
                Cell::from(cell.as_str()).style(pick(
                    is_focused,
                    self.styles.focused_cell,
                    self.styles.cell,
                ))
            }))
        });

        let constraints = widths
            .iter()
            .map(|&w| Constraint::Length(u16::try_from(w).unwrap_or(u16::MAX)));

        Table::new(body, constraints)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .render(area, buf);
    }
}

/// Centered one-paragraph message, used for loading and empty states.
pub struct MessageBox<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> MessageBox<'a> {
    pub fn new(text: &'a str, style: Style) -> Self {
        Self { text, style }
    }
}

impl Widget for MessageBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Leave a blank line above so the message does not hug the search bar.
        let area = Rect {
            y: area.y.saturating_add(1).min(area.bottom()),
            height: area.height.saturating_sub(1),
            ..area
        };
        Paragraph::new(self.text)
            .style(self.style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColumnRegistry;
    use crate::state::{QueryAction, ViewOptions};

    struct Item {
        name: &'static str,
        qty: u32,
    }

    fn view() -> DataView<Item> {
        let columns = ColumnRegistry::new(vec![
            ColumnDef::new("name", |i: &Item| i.name.into()).header("Name"),
            ColumnDef::new("qty", |i: &Item| i.qty.into()).header("Qty"),
        ])
        .unwrap();
        DataView::new(columns, ViewOptions::default())
    }

    #[test]
    fn header_label_appends_indicator() {
        let column: ColumnDef<Item> = ColumnDef::new("name", |i: &Item| i.name.into()).header("Name");

        assert_eq!(header_label(&column, None), "Name");
        assert_eq!(header_label(&column, Some(SortDirection::Asc)), "Name ▲");
        assert_eq!(header_label(&column, Some(SortDirection::Desc)), "Name ▼");
    }

    #[test]
    fn empty_message_hints_at_clearing_search() {
        let empty = EmptyState::NoResults {
            term: "zzz".to_string(),
        };
        insta::assert_snapshot!(
            empty_message(&empty),
            @r#"No results found for "zzz" (press Ctrl+L to clear)"#
        );
        assert_eq!(empty_message(&EmptyState::NoData), "No data available");
    }

    #[test]
    fn column_widths_use_display_width() {
        let headers = vec!["Name".to_string(), "Qty".to_string()];
        let cells = vec![
            vec!["日本語".to_string(), "1".to_string()],
            vec!["ab".to_string(), "12345".to_string()],
        ];

        assert_eq!(column_widths(&headers, &cells, None), vec![6, 5]);
        assert_eq!(column_widths(&headers, &cells, Some(5)), vec![5, 5]);
    }

    #[test]
    fn table_text_skips_hidden_columns_and_marks_sort() {
        let rows = vec![
            Item { name: "bolt", qty: 3 },
            Item { name: "nut", qty: 10 },
        ];
        let mut view = view();
        view.dispatch(&rows, QueryAction::ToggleSort("qty".to_string()));
        view.dispatch(&rows, QueryAction::ToggleColumnVisibility("name".to_string()));

        let derived = view.derive(&rows);
        let text = TableText::build(&view, &derived.page_rows);

        assert_eq!(text.headers, vec!["Qty ▲"]);
        assert_eq!(text.cells, vec![vec!["3"], vec!["10"]]);
    }
}
