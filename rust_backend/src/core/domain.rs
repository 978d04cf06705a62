use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::CleaningConfig;
use crate::error::CleaningResult;
use crate::transformations::{
    clean_customer_lifetime_value, clean_education, clean_gender, clean_state, drop_duplicates,
    format_number_of_open_complaints, handle_nulls, select_row_window, standardize_columns,
};

/// Normalized column names the pipeline reads or rewrites.
pub mod columns {
    pub const GENDER: &str = "gender";
    pub const STATE: &str = "state";
    pub const EDUCATION: &str = "education";
    pub const CUSTOMER_LIFETIME_VALUE: &str = "customer_lifetime_value";
    pub const NUMBER_OF_OPEN_COMPLAINTS: &str = "number_of_open_complaints";
}

/// Columns that must exist once names are normalized.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    columns::GENDER,
    columns::STATE,
    columns::EDUCATION,
    columns::CUSTOMER_LIFETIME_VALUE,
    columns::NUMBER_OF_OPEN_COMPLAINTS,
];

/// Raw header abbreviation that stands for the state column.
pub const STATE_ABBREVIATION: &str = "st";

/// Known header typo and its correction.
pub const HEADER_TYPO: (&str, &str) = ("custateomer", "customer");

/// Gender spellings, applied in order. "Femal" runs before "female", so the
/// literal "Female" ends up as "Fe".
pub const GENDER_REPLACEMENTS: [(&str, &str); 3] =
    [("Male", "M"), ("Femal", "F"), ("female", "F")];

/// State abbreviations, applied in order. "Cali" also matches inside an
/// already-correct "California", which the final rule folds back.
pub const STATE_REPLACEMENTS: [(&str, &str); 4] = [
    ("AZ", "Arizona"),
    ("Cali", "California"),
    ("WA", "Washington"),
    ("Californiafornia", "California"),
];

pub const EDUCATION_REPLACEMENTS: [(&str, &str); 1] = [("Bachelors", "Bachelor")];

/// Apply literal, case-sensitive substring replacements left to right.
pub fn apply_replacements(value: &str, rules: &[(&str, &str)]) -> String {
    rules
        .iter()
        .fold(value.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// One named transform of the cleaning pipeline.
///
/// Variants are declared in execution order; [`Stage::ALL`] lists them the
/// way the pipeline runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    StandardizeColumns,
    CleanGender,
    CleanState,
    CleanEducation,
    CleanCustomerLifetimeValue,
    FormatOpenComplaints,
    SelectRowWindow,
    HandleNulls,
    DropDuplicates,
}

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::StandardizeColumns,
        Stage::CleanGender,
        Stage::CleanState,
        Stage::CleanEducation,
        Stage::CleanCustomerLifetimeValue,
        Stage::FormatOpenComplaints,
        Stage::SelectRowWindow,
        Stage::HandleNulls,
        Stage::DropDuplicates,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::StandardizeColumns => "standardize_columns",
            Stage::CleanGender => "clean_gender",
            Stage::CleanState => "clean_state",
            Stage::CleanEducation => "clean_education",
            Stage::CleanCustomerLifetimeValue => "clean_customer_lifetime_value",
            Stage::FormatOpenComplaints => "format_number_of_open_complaints",
            Stage::SelectRowWindow => "select_row_window",
            Stage::HandleNulls => "handle_nulls",
            Stage::DropDuplicates => "drop_duplicates",
        }
    }

    /// Run this stage on `df`. Only the window and null-fill stages read
    /// `config`.
    pub fn apply(&self, df: &DataFrame, config: &CleaningConfig) -> CleaningResult<DataFrame> {
        match self {
            Stage::StandardizeColumns => standardize_columns(df),
            Stage::CleanGender => clean_gender(df),
            Stage::CleanState => clean_state(df),
            Stage::CleanEducation => clean_education(df),
            Stage::CleanCustomerLifetimeValue => clean_customer_lifetime_value(df),
            Stage::FormatOpenComplaints => format_number_of_open_complaints(df),
            Stage::SelectRowWindow => Ok(select_row_window(df, &config.window)),
            Stage::HandleNulls => handle_nulls(df, &config.fill.gender_sentinel),
            Stage::DropDuplicates => drop_duplicates(df),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
