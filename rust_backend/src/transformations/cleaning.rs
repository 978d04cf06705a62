use polars::prelude::*;

use crate::core::domain::{
    apply_replacements, columns, EDUCATION_REPLACEMENTS, GENDER_REPLACEMENTS, STATE_REPLACEMENTS,
};
use crate::error::{CleaningError, CleaningResult};

/// Look up a column, reporting absence as [`CleaningError::MissingColumn`].
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> CleaningResult<&'a Column> {
    df.column(name)
        .map_err(|e| CleaningError::from_lookup(name, e))
}

/// Column rendered as text, whatever its inferred dtype.
fn text_column(df: &DataFrame, name: &str) -> CleaningResult<Column> {
    Ok(require_column(df, name)?.cast(&DataType::String)?)
}

/// Copy of `df` with `values` stored under `name`.
fn replace_column<S: IntoSeries>(df: &DataFrame, values: S) -> CleaningResult<DataFrame> {
    let mut out = df.clone();
    out.with_column(values.into_series())?;
    Ok(out)
}

fn replace_literals(
    df: &DataFrame,
    name: &str,
    rules: &[(&str, &str)],
) -> CleaningResult<DataFrame> {
    let text = text_column(df, name)?;
    let replaced: StringChunked = text
        .str()?
        .into_iter()
        .map(|value| value.map(|v| apply_replacements(v, rules)))
        .collect();

    replace_column(df, replaced.with_name(name.into()))
}

/// Parse a trimmed decimal. NaN counts as missing.
fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// "12.34%" -> 0.1234. Anything that does not parse is `None`.
pub fn parse_percentage(value: &str) -> Option<f64> {
    parse_number(&value.replace('%', "")).map(|v| v / 100.0)
}

/// "1/5/00" -> 5, "3" -> 3. Anything that does not parse is `None`.
pub fn extract_complaint_count(value: &str) -> Option<f64> {
    let segment = value.split('/').nth(1).unwrap_or(value);
    parse_number(segment)
}

pub fn clean_gender(df: &DataFrame) -> CleaningResult<DataFrame> {
    replace_literals(df, columns::GENDER, &GENDER_REPLACEMENTS)
}

pub fn clean_state(df: &DataFrame) -> CleaningResult<DataFrame> {
    replace_literals(df, columns::STATE, &STATE_REPLACEMENTS)
}

pub fn clean_education(df: &DataFrame) -> CleaningResult<DataFrame> {
    replace_literals(df, columns::EDUCATION, &EDUCATION_REPLACEMENTS)
}

/// Convert percentage strings to fractions (Float64).
pub fn clean_customer_lifetime_value(df: &DataFrame) -> CleaningResult<DataFrame> {
    let name = columns::CUSTOMER_LIFETIME_VALUE;
    let text = text_column(df, name)?;
    let parsed: Float64Chunked = text
        .str()?
        .into_iter()
        .map(|value| value.and_then(parse_percentage))
        .collect();

    replace_column(df, parsed.with_name(name.into()))
}

/// Reduce "a/b/c" complaint codes to their middle number (Float64).
pub fn format_number_of_open_complaints(df: &DataFrame) -> CleaningResult<DataFrame> {
    let name = columns::NUMBER_OF_OPEN_COMPLAINTS;
    let text = text_column(df, name)?;
    let parsed: Float64Chunked = text
        .str()?
        .into_iter()
        .map(|value| value.and_then(extract_complaint_count))
        .collect();

    replace_column(df, parsed.with_name(name.into()))
}

/// Mean of the non-null values of a numeric column, `None` when there are none.
pub fn column_mean(df: &DataFrame, name: &str) -> CleaningResult<Option<f64>> {
    let values = require_column(df, name)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.mean())
}

/// Table with nulls filled, plus the mean used for lifetime values
#[derive(Debug, Clone)]
pub struct NullFill {
    pub dataframe: DataFrame,
    pub lifetime_value_mean: Option<f64>,
}

/// Fill gender nulls with `sentinel` and lifetime-value nulls with the
/// column mean, returning the mean alongside the table.
///
/// On an empty table the mean is `None` and lifetime-value nulls survive.
pub fn fill_nulls(df: &DataFrame, sentinel: &str) -> CleaningResult<NullFill> {
    let gender = text_column(df, columns::GENDER)?;
    let gender: StringChunked = gender
        .str()?
        .into_iter()
        .map(|value| Some(value.unwrap_or(sentinel)))
        .collect();
    let out = replace_column(df, gender.with_name(columns::GENDER.into()))?;

    let name = columns::CUSTOMER_LIFETIME_VALUE;
    let mean = column_mean(&out, name)?;
    let clv = require_column(&out, name)?.cast(&DataType::Float64)?;
    let clv: Float64Chunked = clv
        .f64()?
        .into_iter()
        .map(|value| value.or(mean))
        .collect();

    Ok(NullFill {
        dataframe: replace_column(&out, clv.with_name(name.into()))?,
        lifetime_value_mean: mean,
    })
}

/// [`fill_nulls`] without the mean.
pub fn handle_nulls(df: &DataFrame, sentinel: &str) -> CleaningResult<DataFrame> {
    fill_nulls(df, sentinel).map(|fill| fill.dataframe)
}

/// Remove fully duplicate rows, keeping the first occurrence in its
/// original position.
pub fn drop_duplicates(df: &DataFrame) -> CleaningResult<DataFrame> {
    let unique = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(unique)
}

/// Validate DataFrame schema (required columns)
///
/// Returns `(is_valid, missing_columns)`.
pub fn validate_schema(df: &DataFrame, required_columns: &[&str]) -> (bool, Vec<String>) {
    let present = df.get_column_names();
    let missing: Vec<String> = required_columns
        .iter()
        .filter(|col| !present.iter().any(|name| name.as_str() == **col))
        .map(|col| col.to_string())
        .collect();

    (missing.is_empty(), missing)
}
