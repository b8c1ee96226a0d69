//! Paginator: fixed-size windows over the sorted rows.

/// Number of pages for `len` rows. Never less than one.
///
/// A `page_size` of zero is treated as one.
pub fn page_count(len: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    len.div_ceil(size).max(1)
}

/// Clamp `page_index` into `[0, page_count - 1]`.
pub fn clamp_page_index(page_index: usize, len: usize, page_size: usize) -> usize {
    page_index.min(page_count(len, page_size) - 1)
}

/// One window of rows plus the metadata hosts display around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows in this window.
    pub rows: Vec<T>,
    /// Effective (clamped) page index.
    pub page_index: usize,
    /// Total number of pages, at least one.
    pub page_count: usize,
    /// 1-based position of the first row shown, or 0 when there are no rows.
    pub start_row: usize,
    /// 1-based position of the last row shown, or 0 when there are no rows.
    pub end_row: usize,
}

/// Slice `rows` into the window at `page_index`.
///
/// Out-of-range indices are clamped rather than rejected.
pub fn paginate<T: Clone>(rows: &[T], page_index: usize, page_size: usize) -> Page<T> {
    let size = page_size.max(1);
    let len = rows.len();
    let page_count = page_count(len, size);
    let page_index = page_index.min(page_count - 1);

    let offset = page_index * size;
    let end = (offset + size).min(len);
    let page_rows = rows.get(offset..end).map(<[T]>::to_vec).unwrap_or_default();

    let (start_row, end_row) = if len == 0 {
        (0, 0)
    } else {
        let start_row = offset + 1;
        (start_row, (start_row + size - 1).min(len))
    };

    Page {
        rows: page_rows,
        page_index,
        page_count,
        start_row,
        end_row,
    }
}
