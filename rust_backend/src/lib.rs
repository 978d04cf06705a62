//! Cleaning pipeline for the customer insurance dataset.
//!
//! [`clean_customers`] normalizes headers, fixes known data-entry
//! inconsistencies, trims the row range, fills missing values and drops
//! duplicate rows, in that order.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod preprocessing;
pub mod transformations;

pub use crate::config::CleaningConfig;
pub use crate::core::Stage;
pub use crate::error::{CleaningError, CleaningResult};
pub use crate::preprocessing::{clean_customers, CleaningPipeline, CleaningReport, PipelineOutput};
