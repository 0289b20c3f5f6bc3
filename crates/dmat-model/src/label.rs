//! Row labels and label utilities.
//!
//! Labels travel alongside the numeric matrix and never participate in
//! computation. Integer labels cover positional indexing, timestamps cover
//! time-series indexes, and text covers everything else a source may carry.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

/// A single row (or coordinate) label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RowLabel {
    Index(i64),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl fmt::Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowLabel::Index(value) => write!(f, "{value}"),
            RowLabel::Timestamp(stamp) => write!(f, "{stamp}"),
            RowLabel::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for RowLabel {
    fn from(value: i64) -> Self {
        RowLabel::Index(value)
    }
}

impl From<NaiveDateTime> for RowLabel {
    fn from(value: NaiveDateTime) -> Self {
        RowLabel::Timestamp(value)
    }
}

impl From<&str> for RowLabel {
    fn from(value: &str) -> Self {
        RowLabel::Text(value.to_string())
    }
}

impl From<String> for RowLabel {
    fn from(value: String) -> Self {
        RowLabel::Text(value)
    }
}

/// Positional labels `0..n-1`, used when a source carries no index.
pub fn integer_range(n: usize) -> Vec<RowLabel> {
    (0..n as i64).map(RowLabel::Index).collect()
}

/// Infers a regular time spacing from a label sequence.
///
/// Returns the common gap when every label is a timestamp and all
/// consecutive gaps are identical and positive; otherwise `None`.
pub fn infer_frequency(labels: &[RowLabel]) -> Option<Duration> {
    if labels.len() < 2 {
        return None;
    }
    let mut stamps = Vec::with_capacity(labels.len());
    for label in labels {
        match label {
            RowLabel::Timestamp(stamp) => stamps.push(*stamp),
            _ => return None,
        }
    }
    let step = stamps[1] - stamps[0];
    if step <= Duration::zero() {
        return None;
    }
    for pair in stamps.windows(2) {
        if pair[1] - pair[0] != step {
            return None;
        }
    }
    Some(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(offset: i64) -> RowLabel {
        let base = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        RowLabel::Timestamp(base + Duration::days(offset))
    }

    #[test]
    fn integer_range_is_positional() {
        let labels = integer_range(3);
        assert_eq!(
            labels,
            vec![RowLabel::Index(0), RowLabel::Index(1), RowLabel::Index(2)]
        );
    }

    #[test]
    fn display_renders_each_variant() {
        assert_eq!(RowLabel::Index(7).to_string(), "7");
        assert_eq!(RowLabel::Text("apple".to_string()).to_string(), "apple");
        assert_eq!(day(0).to_string(), "2017-01-01 00:00:00");
    }

    #[test]
    fn daily_index_infers_daily_frequency() {
        let labels: Vec<RowLabel> = (0..5).map(day).collect();
        assert_eq!(infer_frequency(&labels), Some(Duration::days(1)));
    }

    #[test]
    fn irregular_index_has_no_frequency() {
        let labels = vec![day(0), day(1), day(3)];
        assert_eq!(infer_frequency(&labels), None);
    }

    #[test]
    fn non_timestamp_index_has_no_frequency() {
        assert_eq!(infer_frequency(&integer_range(5)), None);
        assert_eq!(infer_frequency(&[day(0)]), None);
    }
}
