//! CSV loading and saving around the cleaning pipeline.
//!
//! The pipeline itself never touches the filesystem; these helpers are the
//! collaborator that feeds it and persists its output.
//!
//! # Example
//!
//! ```no_run
//! use customer_cleaning::io::CustomerLoader;
//! use customer_cleaning::CleaningPipeline;
//! use std::path::Path;
//!
//! let report = CustomerLoader::clean_file(
//!     Path::new("customers.csv"),
//!     Path::new("customers_clean.csv"),
//!     &CleaningPipeline::new(),
//! )
//! .expect("Failed to clean");
//! println!("Kept {} rows", report.output_rows);
//! ```

pub mod loaders;


pub use loaders::CustomerLoader;
