use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use crate::preprocessing::{CleaningPipeline, CleaningReport};

/// Moves customer tables between CSV files and the cleaning pipeline
pub struct CustomerLoader;

impl CustomerLoader {
    /// Load a customer table from a CSV file with a header row
    pub fn load_from_csv(csv_path: &Path) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(csv_path.into()))?
            .finish()
            .with_context(|| format!("Failed to parse CSV file {}", csv_path.display()))?;

        log::debug!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            csv_path.display()
        );
        Ok(df)
    }

    /// Write a table to a CSV file with a header row
    pub fn write_csv(df: &mut DataFrame, csv_path: &Path) -> Result<()> {
        let mut file = File::create(csv_path)
            .with_context(|| format!("Failed to create {}", csv_path.display()))?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .context("Failed to write CSV")?;
        Ok(())
    }

    /// Load `input`, clean it with `pipeline` and write the result to `output`
    pub fn clean_file(
        input: &Path,
        output: &Path,
        pipeline: &CleaningPipeline,
    ) -> Result<CleaningReport> {
        let raw = Self::load_from_csv(input)?;
        let cleaned = pipeline
            .run(&raw)
            .with_context(|| format!("Failed to clean {}", input.display()))?;

        let mut df = cleaned.dataframe;
        Self::write_csv(&mut df, output)?;
        Ok(cleaned.report)
    }
}
