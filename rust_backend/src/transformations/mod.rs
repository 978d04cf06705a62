//! Table transforms applied by the cleaning pipeline.
//!
//! Every stage takes a `&DataFrame` and returns a fresh one, leaving its
//! input untouched.
//!
//! # Modules
//!
//! - [`columns`]: header normalization
//! - [`cleaning`]: value fixes, numeric parsing, null filling, deduplication
//! - [`filtering`]: the fixed row window
//!
//! # Example
//!
//! ```no_run
//! use customer_cleaning::transformations::{clean_gender, standardize_columns};
//! use polars::prelude::*;
//!
//! # fn example(df: DataFrame) -> customer_cleaning::CleaningResult<()> {
//! let df = standardize_columns(&df)?;
//! let df = clean_gender(&df)?;
//! # Ok(())
//! # }
//! ```

pub mod cleaning;
pub mod columns;
pub mod filtering;

pub use cleaning::{
    clean_customer_lifetime_value, clean_education, clean_gender, clean_state, column_mean,
    drop_duplicates, extract_complaint_count, fill_nulls, format_number_of_open_complaints, handle_nulls,
    parse_percentage, require_column, validate_schema, NullFill,
};
pub use columns::{normalize_column_name, standardize_columns};
pub use filtering::select_row_window;
