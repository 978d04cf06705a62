use polars::prelude::*;
use std::collections::HashSet;

use crate::core::domain::{columns, HEADER_TYPO, STATE_ABBREVIATION};
use crate::error::{CleaningError, CleaningResult};

/// Normalize a single header: trim, lowercase, spaces and hyphens to
/// underscores, `st` to `state`, then the known typo fix.
///
/// Applying it to its own output is a no-op.
pub fn normalize_column_name(name: &str) -> String {
    let normalized = name.trim().to_lowercase().replace([' ', '-'], "_");

    // Only the exact abbreviation; "first_name" must keep its "st"
    let normalized = if normalized == STATE_ABBREVIATION {
        columns::STATE.to_string()
    } else {
        normalized
    };

    normalized.replace(HEADER_TYPO.0, HEADER_TYPO.1)
}

/// Rename every column with [`normalize_column_name`].
///
/// Fails with [`CleaningError::DuplicateColumn`] if two headers collapse to
/// the same name.
pub fn standardize_columns(df: &DataFrame) -> CleaningResult<DataFrame> {
    let mut seen: HashSet<String> = HashSet::with_capacity(df.width());
    let mut renamed: Vec<Column> = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let name = normalize_column_name(column.name());
        if !seen.insert(name.clone()) {
            return Err(CleaningError::DuplicateColumn(name));
        }
        renamed.push(column.clone().with_name(name.into()));
    }

    Ok(DataFrame::new(renamed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Customer Lifetime Value"), "customer_lifetime_value");
        assert_eq!(normalize_column_name("  Gender "), "gender");
        assert_eq!(normalize_column_name("Number-of Open-Complaints"), "number_of_open_complaints");
        assert_eq!(normalize_column_name("ST"), "state");
        assert_eq!(normalize_column_name("first_st"), "first_st");
        assert_eq!(normalize_column_name("Custateomer"), "customer");
    }

    #[test]
    fn test_standardize_columns() {
        let df = df!(
            "Customer" => &["A1", "B2"],
            "ST" => &["AZ", "WA"],
            "Total Claim-Amount" => &[1.5, 2.5],
        )
        .unwrap();

        let out = standardize_columns(&df).unwrap();
        let names: Vec<String> = out.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["customer", "state", "total_claim_amount"]);
        assert_eq!(out.height(), 2);
        // Input left untouched
        assert_eq!(df.get_column_names()[1].as_str(), "ST");
    }

    #[test]
    fn test_standardize_columns_rejects_collisions() {
        let df = df!(
            "Gender" => &["M"],
            "gender " => &["F"],
        )
        .unwrap();

        let err = standardize_columns(&df).unwrap_err();
        assert!(matches!(err, CleaningError::DuplicateColumn(name) if name == "gender"));
    }

    fn header() -> impl Strategy<Value = String> {
        prop_oneof![
            "[ A-Za-z0-9_-]{0,24}",
            Just("St".to_string()),
            Just(" st ".to_string()),
            Just("Custateomer Lifetime-Value".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn prop_normalization_is_idempotent(name in header()) {
            let once = normalize_column_name(&name);
            let twice = normalize_column_name(&once);
            prop_assert_eq!(once, twice);
        }
    }
}
