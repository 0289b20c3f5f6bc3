//! Per-column numeric coercion and dummy expansion.

use std::collections::BTreeSet;

use polars::prelude::{DataType, Series};

use dmat_model::{DataError, Result};

/// A column reduced to plain values: either numeric, or categorical text
/// awaiting dummy expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Categorical(Vec<Option<String>>),
}

/// Classifies one column and coerces it to plain values.
///
/// Numeric dtypes cast to `f64` with nulls mapped to NaN. A string column is
/// numeric when every non-null entry parses as a number and categorical when
/// none does; anything in between is an irreducible mix and fails. A
/// categorical column keeps its values as text regardless of how they look.
pub fn classify_column(series: &Series) -> Result<ColumnValues> {
    match series.dtype() {
        DataType::Boolean
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::Float32
        | DataType::Float64 => numeric_values(series),
        DataType::String => classify_strings(series),
        DataType::Categorical(..) | DataType::Enum(..) => categorical_values(series),
        other => Err(DataError::UnsupportedColumnType {
            column: series.name().to_string(),
            dtype: other.to_string(),
        }),
    }
}

fn numeric_values(series: &Series) -> Result<ColumnValues> {
    let cast = series
        .cast(&DataType::Float64)
        .map_err(|err| DataError::Backend(err.to_string()))?;
    let chunked = cast
        .f64()
        .map_err(|err| DataError::Backend(err.to_string()))?;
    let values = chunked
        .into_iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect();
    Ok(ColumnValues::Numeric(values))
}

fn classify_strings(series: &Series) -> Result<ColumnValues> {
    let chunked = series
        .str()
        .map_err(|err| DataError::Backend(err.to_string()))?;
    let mut numeric = 0usize;
    let mut non_numeric = 0usize;
    for value in chunked.iter().flatten() {
        if value.trim().parse::<f64>().is_ok() {
            numeric += 1;
        } else {
            non_numeric += 1;
        }
    }
    if numeric > 0 && non_numeric > 0 {
        return Err(DataError::MixedColumn {
            column: series.name().to_string(),
        });
    }
    if numeric > 0 {
        let values = chunked
            .iter()
            .map(|value| {
                value
                    .and_then(|text| text.trim().parse::<f64>().ok())
                    .unwrap_or(f64::NAN)
            })
            .collect();
        return Ok(ColumnValues::Numeric(values));
    }
    Ok(ColumnValues::Categorical(owned_strings(chunked.iter())))
}

fn categorical_values(series: &Series) -> Result<ColumnValues> {
    let cast = series
        .cast(&DataType::String)
        .map_err(|err| DataError::Backend(err.to_string()))?;
    let chunked = cast
        .str()
        .map_err(|err| DataError::Backend(err.to_string()))?;
    Ok(ColumnValues::Categorical(owned_strings(chunked.iter())))
}

fn owned_strings<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<Option<String>> {
    values.map(|value| value.map(str::to_string)).collect()
}

/// Distinct non-null values in lexicographic order. This is the canonical
/// category order: it decides both dummy-column order and which category
/// `drop_first` removes.
pub fn categories(values: &[Option<String>]) -> Vec<String> {
    let set: BTreeSet<&str> = values.iter().flatten().map(String::as_str).collect();
    set.into_iter().map(str::to_string).collect()
}

/// Expands a categorical column into 0/1 indicator columns.
///
/// One column per category, named `"{name}.{category}"`. With `drop_first`
/// the first category is omitted so the indicators stay linearly
/// independent. Nulls belong to no category and stay 0.0 everywhere.
pub fn expand_dummies(
    name: &str,
    values: &[Option<String>],
    drop_first: bool,
) -> Vec<(String, Vec<f64>)> {
    let skip = usize::from(drop_first);
    categories(values)
        .into_iter()
        .skip(skip)
        .map(|category| {
            let indicators = values
                .iter()
                .map(|value| match value {
                    Some(text) if *text == category => 1.0,
                    _ => 0.0,
                })
                .collect();
            (format!("{name}.{category}"), indicators)
        })
        .collect()
}

/// Category codes for a column left unexpanded: the position of each value
/// in canonical category order, nulls as NaN.
pub fn category_codes(values: &[Option<String>]) -> Vec<f64> {
    let cats = categories(values);
    values
        .iter()
        .map(|value| match value {
            Some(text) => cats
                .iter()
                .position(|category| category == text)
                .map_or(f64::NAN, |idx| idx as f64),
            None => f64::NAN,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::NamedFrom;

    fn opt(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some((*v).to_string())).collect()
    }

    #[test]
    fn integer_columns_coerce_to_floats() {
        let series = Series::new("n".into(), &[1i64, 2, 3]);
        let values = classify_column(&series).unwrap();
        assert_eq!(values, ColumnValues::Numeric(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn numeric_strings_coerce_to_floats() {
        let series = Series::new("n".into(), &["1", "2.5", "-3"]);
        let values = classify_column(&series).unwrap();
        assert_eq!(values, ColumnValues::Numeric(vec![1.0, 2.5, -3.0]));
    }

    #[test]
    fn plain_strings_classify_as_categorical() {
        let series = Series::new("cat".into(), &["a", "b", "a"]);
        let values = classify_column(&series).unwrap();
        assert_eq!(values, ColumnValues::Categorical(opt(&["a", "b", "a"])));
    }

    #[test]
    fn mixed_strings_are_rejected() {
        let series = Series::new("bad".into(), &["1", "2", "a", "-3.0"]);
        let err = classify_column(&series).unwrap_err();
        assert!(matches!(err, DataError::MixedColumn { column } if column == "bad"));
    }

    #[test]
    fn categories_sort_lexicographically() {
        let values = opt(&["banana", "apple", "banana", "cherry"]);
        assert_eq!(categories(&values), vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn drop_first_removes_the_first_category() {
        let values = opt(&["a", "b", "c", "a"]);
        let dummies = expand_dummies("cat", &values, true);
        let names: Vec<&str> = dummies.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["cat.b", "cat.c"]);
        assert_eq!(dummies[0].1, vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(dummies[1].1, vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn keep_first_emits_every_category() {
        let values = opt(&["a", "b", "c", "a"]);
        let dummies = expand_dummies("cat", &values, false);
        assert_eq!(dummies.len(), 3);
        assert_eq!(dummies[0].0, "cat.a");
        assert_eq!(dummies[0].1, vec![1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn nulls_get_no_indicator() {
        let values = vec![Some("a".to_string()), None, Some("b".to_string())];
        let dummies = expand_dummies("cat", &values, false);
        assert_eq!(dummies[0].1, vec![1.0, 0.0, 0.0]);
        assert_eq!(dummies[1].1, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn codes_follow_category_order() {
        let values = opt(&["b", "a", "c", "b"]);
        assert_eq!(category_codes(&values), vec![1.0, 0.0, 2.0, 1.0]);
    }
}
