use polars::prelude::*;

use crate::config::WindowSettings;

/// Keep rows at positions `[window.start, window.end)`.
///
/// A table shorter than the window yields only the rows that fall inside it,
/// possibly none.
pub fn select_row_window(df: &DataFrame, window: &WindowSettings) -> DataFrame {
    let start = window.start.min(df.height());
    df.slice(start as i64, window.len())
}
