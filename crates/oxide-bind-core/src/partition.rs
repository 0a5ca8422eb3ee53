//! Splitting batch rows across statements.

/// Splits `rows` into consecutive chunks of at most `max_rows` rows.
///
/// Order is preserved and no chunk is empty; an empty input yields no chunks.
/// A `max_rows` of zero is treated as one.
#[must_use]
pub fn partition<T>(rows: &[T], max_rows: usize) -> Vec<&[T]> {
    rows.chunks(max_rows.max(1)).collect()
}

/// Rows per multi-row `VALUES` statement.
///
/// Whichever limit is tighter wins: the row cap, or how many rows fit under
/// the parameter cap. Rows carrying no parameters are only bound by the row
/// cap. Never less than one.
#[must_use]
pub fn batch_size(params_per_row: usize, max_params: usize, max_rows: usize) -> usize {
    let by_params = max_params.checked_div(params_per_row).unwrap_or(usize::MAX);
    by_params.min(max_rows).max(1)
}
