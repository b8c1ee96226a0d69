//! Display counters for the header/footer chrome around a view.

use serde::Serialize;

/// Counters derived from one recomputation of the view.
///
/// # Invariants
///
/// - `filtered_rows <= total_rows`
/// - `percent_visible` is in `0..=100`
/// - `start_row == 0` exactly when `filtered_rows == 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ViewStats {
    /// Rows supplied by the host, before filtering.
    pub total_rows: usize,
    /// Rows left after the filter stage.
    pub filtered_rows: usize,
    /// 1-based index of the first row on the current page (0 if none).
    pub start_row: usize,
    /// 1-based index of the last row on the current page (0 if none).
    pub end_row: usize,
    /// Share of the total that survived filtering, rounded.
    pub percent_visible: u8,
}

impl ViewStats {
    /// `"{start}-{end} of {filtered}"`, e.g. `"11-20 of 25"`.
    pub fn range_label(&self) -> String {
        format!(
            "{}-{} of {}",
            self.start_row, self.end_row, self.filtered_rows
        )
    }
}

/// Compute display counters.
pub fn compute_stats(
    total_rows: usize,
    filtered_rows: usize,
    start_row: usize,
    end_row: usize,
) -> ViewStats {
    let ratio = 100.0 * filtered_rows as f64 / total_rows.max(1) as f64;
    let percent_visible = ratio.round().clamp(0.0, 100.0) as u8;

    ViewStats {
        total_rows,
        filtered_rows,
        start_row,
        end_row,
        percent_visible,
    }
}
