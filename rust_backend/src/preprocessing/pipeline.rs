use log::{debug, info, warn};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::CleaningConfig;
use crate::core::domain::{columns, Stage, REQUIRED_COLUMNS};
use crate::error::{CleaningError, CleaningResult};
use crate::transformations::{fill_nulls, require_column, validate_schema, NullFill};

/// Statistics collected while cleaning one table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub windowed_rows: usize,
    pub output_rows: usize,
    pub duplicates_removed: usize,
    /// Lifetime values that did not parse and became null
    pub unparseable_lifetime_values: usize,
    /// Complaint counts that did not parse and became null
    pub unparseable_complaint_counts: usize,
    pub gender_nulls_filled: usize,
    pub lifetime_value_nulls_filled: usize,
    pub lifetime_value_mean: Option<f64>,
    pub stages: Vec<Stage>,
}

impl CleaningReport {
    fn new(input_rows: usize) -> Self {
        Self {
            input_rows,
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub dataframe: DataFrame,
    pub report: CleaningReport,
}

/// Runs the nine cleaning stages over a customer table.
///
/// Stages run strictly in [`Stage::ALL`] order. The first failure aborts the
/// run; nothing is retried and no partial table is returned.
pub struct CleaningPipeline {
    config: CleaningConfig,
}

impl CleaningPipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: CleaningConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: CleaningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Apply a single stage to `df`.
    pub fn run_stage(&self, stage: Stage, df: &DataFrame) -> CleaningResult<DataFrame> {
        stage.apply(df, &self.config)
    }

    /// Clean `df` and report what changed.
    ///
    /// # Errors
    /// * [`CleaningError::MissingColumn`] if a required column is absent after
    ///   header normalization
    /// * [`CleaningError::DuplicateColumn`] if two headers normalize to the
    ///   same name
    pub fn run(&self, df: &DataFrame) -> CleaningResult<PipelineOutput> {
        self.config.validate()?;

        let mut report = CleaningReport::new(df.height());
        let mut current = df.clone();

        for stage in Stage::ALL {
            // The null-fill stage hands back the mean it used so the report
            // records that exact value
            let (next, fill_mean) = match stage {
                Stage::HandleNulls => {
                    let NullFill {
                        dataframe,
                        lifetime_value_mean,
                    } = fill_nulls(&current, &self.config.fill.gender_sentinel)?;
                    (dataframe, lifetime_value_mean)
                }
                _ => (self.run_stage(stage, &current)?, None),
            };

            if stage == Stage::StandardizeColumns {
                Self::check_schema(&next)?;
            }

            Self::record(stage, &current, &next, fill_mean, &mut report)?;
            debug!(
                "Stage {} done: {} -> {} rows",
                stage,
                current.height(),
                next.height()
            );
            current = next;
        }

        report.output_rows = current.height();
        info!(
            "Cleaned customer table: {} input rows, {} after window, {} output rows ({} duplicates removed)",
            report.input_rows, report.windowed_rows, report.output_rows, report.duplicates_removed
        );

        Ok(PipelineOutput {
            dataframe: current,
            report,
        })
    }

    fn check_schema(df: &DataFrame) -> CleaningResult<()> {
        let (is_valid, missing) = validate_schema(df, &REQUIRED_COLUMNS);
        if is_valid {
            Ok(())
        } else {
            Err(CleaningError::MissingColumn(missing.join(", ")))
        }
    }

    fn null_count(df: &DataFrame, name: &str) -> CleaningResult<usize> {
        Ok(require_column(df, name)?.null_count())
    }

    fn record(
        stage: Stage,
        before: &DataFrame,
        after: &DataFrame,
        fill_mean: Option<f64>,
        report: &mut CleaningReport,
    ) -> CleaningResult<()> {
        match stage {
            Stage::CleanCustomerLifetimeValue => {
                let name = columns::CUSTOMER_LIFETIME_VALUE;
                let coerced = Self::null_count(after, name)?
                    .saturating_sub(Self::null_count(before, name)?);
                if coerced > 0 {
                    warn!("{} lifetime values could not be parsed and were set to null", coerced);
                }
                report.unparseable_lifetime_values = coerced;
            }
            Stage::FormatOpenComplaints => {
                let name = columns::NUMBER_OF_OPEN_COMPLAINTS;
                let coerced = Self::null_count(after, name)?
                    .saturating_sub(Self::null_count(before, name)?);
                if coerced > 0 {
                    warn!("{} complaint counts could not be parsed and were set to null", coerced);
                }
                report.unparseable_complaint_counts = coerced;
            }
            Stage::SelectRowWindow => {
                report.windowed_rows = after.height();
                if after.height() == 0 {
                    warn!("Row window selected no rows; lifetime value mean will be undefined");
                }
            }
            Stage::HandleNulls => {
                report.gender_nulls_filled = Self::null_count(before, columns::GENDER)?;
                report.lifetime_value_nulls_filled = if fill_mean.is_some() {
                    Self::null_count(before, columns::CUSTOMER_LIFETIME_VALUE)?
                } else {
                    0
                };
                report.lifetime_value_mean = fill_mean;
            }
            Stage::DropDuplicates => {
                report.duplicates_removed = before.height().saturating_sub(after.height());
            }
            _ => {}
        }

        report.stages.push(stage);
        Ok(())
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to clean a customer table with the default settings
pub fn clean_customers(df: &DataFrame) -> CleaningResult<DataFrame> {
    CleaningPipeline::new().run(df).map(|output| output.dataframe)
}
