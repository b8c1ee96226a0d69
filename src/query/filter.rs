//! Filter stage: global case-insensitive substring search.

use crate::model::ColumnRegistry;

/// Normalize a raw search term: trimmed and lower-cased.
///
/// Returns `None` when nothing is left to search for.
pub fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Keep the rows whose searchable columns contain `term`.
///
/// Each row's searchable accessor outputs are stringified, concatenated and
/// lower-cased, then tested for the trimmed, lower-cased term. Relative
/// order is preserved. A blank term keeps every row.
pub fn filter<'a, R: 'a, P>(
    rows: impl IntoIterator<Item = &'a R>,
    columns: &ColumnRegistry<R, P>,
    term: &str,
) -> Vec<&'a R> {
    let Some(needle) = normalize_term(term) else {
        return rows.into_iter().collect();
    };

    rows.into_iter()
        .filter(|row| row_haystack(*row, columns).contains(&needle))
        .collect()
}

/// Lower-cased concatenation of a row's searchable column values.
pub fn row_haystack<R, P>(row: &R, columns: &ColumnRegistry<R, P>) -> String {
    let mut haystack = String::new();
    for column in columns.iter().filter(|c| c.is_searchable()) {
        haystack.push_str(&column.value(row).to_search_text());
    }
    haystack.to_lowercase()
}
