//! Footer line: range label, visibility, page position and size.

use crate::state::{DataView, DerivedView};

/// Stats line for a derived view, e.g.
/// `"11-20 of 25 (100%) | Page 2/3 | 10 per page"`.
pub fn stats_line<R, P>(view: &DataView<R, P>, derived: &DerivedView<'_, R>) -> String {
    format!(
        "{} ({}%) | Page {}/{} | {} per page",
        derived.stats.range_label(),
        derived.stats.percent_visible,
        derived.page_index + 1,
        derived.page_count,
        view.state().page_size,
    )
}

/// Stats line plus the focused column, marked when hidden.
pub fn footer_text<R, P>(
    view: &DataView<R, P>,
    derived: &DerivedView<'_, R>,
    focused_column: Option<&str>,
) -> String {
    let stats = stats_line(view, derived);
    match focused_column {
        Some(id) if view.state().is_hidden(id) => format!("{stats} | [{id}] (hidden)"),
        Some(id) => format!("{stats} | [{id}]"),
        None => stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnDef, ColumnRegistry};
    use crate::state::{QueryAction, ViewOptions};

    fn view() -> DataView<u32> {
        let columns = ColumnRegistry::new(vec![ColumnDef::new("n", |n: &u32| (*n).into())]).unwrap();
        DataView::new(columns, ViewOptions::default())
    }

    #[test]
    fn stats_line_on_second_page() {
        let rows: Vec<u32> = (1..=25).collect();
        let mut view = view();
        view.next_page(&rows);

        let derived = view.derive(&rows);

        insta::assert_snapshot!(
            stats_line(&view, &derived),
            @"11-20 of 25 (100%) | Page 2/3 | 10 per page"
        );
    }

    #[test]
    fn filtered_footer_shows_percentage() {
        let rows: Vec<u32> = (1..=20).collect();
        let mut view = view();
        view.dispatch(&rows, QueryAction::SetSearchTerm("1".to_string()));

        let derived = view.derive(&rows);

        // 1, 10..=19
        assert_eq!(
            footer_text(&view, &derived, Some("n")),
            "1-10 of 11 (55%) | Page 1/2 | 10 per page | [n]"
        );
    }

    #[test]
    fn hidden_focus_is_marked() {
        let rows: Vec<u32> = Vec::new();
        let mut view = view();
        view.dispatch(&rows, QueryAction::ToggleColumnVisibility("n".to_string()));

        let derived = view.derive(&rows);

        assert_eq!(
            footer_text(&view, &derived, Some("n")),
            "0-0 of 0 (0%) | Page 1/1 | 10 per page | [n] (hidden)"
        );
    }
}
