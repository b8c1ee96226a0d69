//! Search input widget for rendering the search bar.

use crate::view::styles::TableStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar showing the current term, or the placeholder when empty.
///
/// While `editing`, a cursor cell trails the term.
pub struct SearchInput<'a> {
    term: &'a str,
    placeholder: &'a str,
    editing: bool,
    styles: &'a TableStyles,
}

impl<'a> SearchInput<'a> {
    pub fn new(term: &'a str, placeholder: &'a str, editing: bool, styles: &'a TableStyles) -> Self {
        Self {
            term,
            placeholder,
            editing,
            styles,
        }
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = if self.term.is_empty() && !self.editing {
            vec![Span::styled(self.placeholder, self.styles.placeholder)]
        } else {
            vec![Span::raw(self.term)]
        };

        let (title, border) = if self.editing {
            spans.push(Span::styled(" ", self.styles.cursor));
            (" Search (typing) ", self.styles.search_border_active)
        } else {
            (" Search ", self.styles.search_border)
        };

        Paragraph::new(Line::from(spans))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border),
            )
            .render(area, buf);
    }
}
