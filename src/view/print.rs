//! Plain-text rendering of the current page for `--print`.

use crate::state::{DataView, ViewOutcome};
use crate::view::constants::{COLUMN_SPACING, LOADING_MESSAGE};
use crate::view::footer::stats_line;
use crate::view::table::{TableText, column_widths, empty_message};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Render the current page as an aligned table followed by the stats line.
///
/// Trailing whitespace is trimmed from every line.
pub fn render_plain<R>(view: &DataView<R>, rows: &[R]) -> String {
    let mut lines = Vec::new();

    let derived = match view.outcome(rows) {
        ViewOutcome::Loading => {
            lines.push(LOADING_MESSAGE.to_string());
            view.derive(rows)
        }
        ViewOutcome::Empty(empty) => {
            lines.push(empty_message(&empty));
            view.derive(rows)
        }
        ViewOutcome::Rows(derived) => {
            let text = TableText::build(view, &derived.page_rows);
            let widths = column_widths(&text.headers, &text.cells, None);

            lines.push(format_row(&text.headers, &widths));
            let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
            lines.push(format_row(&rule, &widths));
            lines.extend(text.cells.iter().map(|row| format_row(row, &widths)));
            derived
        }
    };

    lines.push(String::new());
    lines.push(stats_line(view, &derived));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Write [`render_plain`] output to `writer`.
///
/// # Errors
///
/// Propagates write failures, e.g. a closed pipe.
pub fn print_page<R>(view: &DataView<R>, rows: &[R], writer: &mut impl Write) -> io::Result<()> {
    writer.write_all(render_plain(view, rows).as_bytes())?;
    writer.flush()
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let gap = " ".repeat(usize::from(COLUMN_SPACING));
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| {
            let fill = width.saturating_sub(cell.width());
            format!("{cell}{}", " ".repeat(fill))
        })
        .collect();
    padded.join(&gap).trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ColumnDef, ColumnRegistry};
    use crate::state::{QueryAction, ViewOptions};

    struct Employee {
        name: &'static str,
        age: Option<u32>,
    }

    fn staff() -> Vec<Employee> {
        vec![
            Employee { name: "Zoë", age: Some(41) },
            Employee { name: "adam", age: None },
            Employee { name: "Bea", age: Some(29) },
        ]
    }

    fn view(page_size: usize) -> DataView<Employee> {
        let columns = ColumnRegistry::new(vec![
            ColumnDef::new("name", |e: &Employee| e.name.into()).header("Name"),
            ColumnDef::new("age", |e: &Employee| e.age.into()).header("Age"),
        ])
        .unwrap();
        DataView::new(
            columns,
            ViewOptions {
                page_size,
                ..ViewOptions::default()
            },
        )
    }

    #[test]
    fn prints_aligned_page_with_stats() {
        let rows = staff();
        let mut view = view(2);
        view.dispatch(&rows, QueryAction::ToggleSort("age".to_string()));

        insta::assert_snapshot!(render_plain(&view, &rows), @r"
        Name  Age ▲
        ----  -----
        Bea   29
        Zoë   41

        1-2 of 3 (100%) | Page 1/2 | 2 per page
        ");
    }

    #[test]
    fn null_sorts_last_on_final_page() {
        let rows = staff();
        let mut view = view(2);
        view.dispatch(&rows, QueryAction::ToggleSort("age".to_string()));
        view.last_page(&rows);

        let out = render_plain(&view, &rows);

        assert!(out.contains("adam"));
        assert!(out.ends_with("3-3 of 3 (100%) | Page 2/2 | 2 per page\n"));
    }

    #[test]
    fn empty_search_prints_message() {
        let rows = staff();
        let mut view = view(10);
        view.dispatch(&rows, QueryAction::SetSearchTerm("nobody".to_string()));

        insta::assert_snapshot!(render_plain(&view, &rows), @r#"
        No results found for "nobody" (press Ctrl+L to clear)

        0-0 of 0 (0%) | Page 1/1 | 10 per page
        "#);
    }

    #[test]
    fn print_page_writes_to_writer() {
        let rows = staff();
        let view = view(10);
        let mut out = Vec::new();

        print_page(&view, &rows, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Name"));
        assert!(text.contains("1-3 of 3 (100%)"));
    }
}
