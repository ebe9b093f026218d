// Standard library
use std::collections::{BTreeMap, HashMap};

// 3rd party crates
use thiserror::Error;

// Current module imports
use super::constants::QPS_BUCKET_INTERVAL_SECS;

/// Raw QPS report grouped by timestamp bucket: `bucket key -> (zone -> rate)`.
///
/// Bucket keys are kept as opaque strings; for the fixed-width timestamps the
/// report emits, ascending string order is chronological order, which is what
/// the `BTreeMap` gives us for free.
pub type QpsBuckets = BTreeMap<String, HashMap<String, f64>>;

/// Per-zone query rates for a single bucket.
pub type QpsSnapshot = HashMap<String, f64>;

#[derive(Debug, Error)]
pub enum QpsError {
    #[error("malformed QPS report row at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("QPS report contains {0} bucket(s), at least 2 are required")]
    InsufficientData(usize),
}

/// Parses the raw CSV QPS report into a bucket map.
///
/// The first row is a header and is discarded unconditionally. Every other
/// row must be `timestamp,zone,count` with an integer count; the stored value
/// is the rate `count / 300` since the report aggregates queries over 5-minute
/// intervals. A header-only (or empty) report yields an empty map; callers
/// are expected to reject that as insufficient data rather than report zeros.
pub fn parse_qps_csv(input: &str) -> Result<QpsBuckets, QpsError> {
    let mut buckets = QpsBuckets::new();

    for (index, line) in input.lines().enumerate() {
        if index == 0 {
            // Header: Timestamp,Zone,Queries
            continue;
        }

        let row = line.trim();
        if row.is_empty() {
            continue;
        }

        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() != 3 {
            return Err(QpsError::Malformed {
                line: index + 1,
                message: format!("expected 3 fields, found {}", fields.len()),
            });
        }

        let count: i64 = fields[2].parse().map_err(|e| QpsError::Malformed {
            line: index + 1,
            message: format!("query count '{}' is not an integer: {}", fields[2], e),
        })?;

        buckets
            .entry(fields[0].to_string())
            .or_default()
            .insert(fields[1].to_string(), count as f64 / QPS_BUCKET_INTERVAL_SECS);
    }

    Ok(buckets)
}

/// Selects the second-most-recent bucket from the map.
///
/// The newest bucket covers the in-progress interval and typically holds a
/// partial count, so only the one before it is guaranteed complete. The
/// reported QPS therefore always lags by one bucket interval.
pub fn select_second_last_bucket(buckets: &QpsBuckets) -> Result<QpsSnapshot, QpsError> {
    if buckets.len() < 2 {
        return Err(QpsError::InsufficientData(buckets.len()));
    }

    buckets
        .values()
        .rev()
        .nth(1)
        .cloned()
        .ok_or_else(|| QpsError::InsufficientData(buckets.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, f64)]) -> QpsSnapshot {
        entries
            .iter()
            .map(|(zone, rate)| (zone.to_string(), *rate))
            .collect()
    }

    #[test]
    fn parses_rows_into_buckets_with_exact_rates() {
        let input = "Timestamp,Zone,Queries\n1,foo,300\n2,bar,600\n1,bar,900";
        let buckets = parse_qps_csv(input).unwrap();

        let mut expected = QpsBuckets::new();
        expected.insert("1".to_string(), snapshot(&[("foo", 1.0), ("bar", 3.0)]));
        expected.insert("2".to_string(), snapshot(&[("bar", 2.0)]));

        assert_eq!(buckets, expected);
    }

    #[test]
    fn selects_bucket_one_when_two_buckets_exist() {
        let input = "Timestamp,Zone,Queries\n1,foo,300\n2,bar,600\n1,bar,900";
        let buckets = parse_qps_csv(input).unwrap();
        let selected = select_second_last_bucket(&buckets).unwrap();

        assert_eq!(selected, snapshot(&[("foo", 1.0), ("bar", 3.0)]));
    }

    #[test]
    fn selection_ignores_row_order() {
        let ordered = parse_qps_csv("h,h,h\n100,bar,5\n200,foo,1\n200,bar,2\n300,foo,3").unwrap();
        let shuffled = parse_qps_csv("h,h,h\n300,foo,3\n200,bar,2\n100,bar,5\n200,foo,1").unwrap();

        assert_eq!(ordered, shuffled);
        assert_eq!(
            select_second_last_bucket(&ordered).unwrap(),
            snapshot(&[("foo", 1.0 / 300.0), ("bar", 2.0 / 300.0)])
        );
    }

    #[test]
    fn selects_second_last_of_three_buckets() {
        let mut buckets = QpsBuckets::new();
        buckets.insert("200".to_string(), snapshot(&[("foo", 1.0), ("bar", 2.0)]));
        buckets.insert("300".to_string(), snapshot(&[("foo", 3.0), ("bar", 4.0)]));
        buckets.insert("100".to_string(), snapshot(&[("bar", 5.0), ("baz", 6.0)]));

        let selected = select_second_last_bucket(&buckets).unwrap();
        assert_eq!(selected, snapshot(&[("foo", 1.0), ("bar", 2.0)]));
    }

    #[test]
    fn reparsing_is_idempotent() {
        let input = "Timestamp,Zone,Queries\n1,foo,300\n2,bar,600\n1,bar,900";
        assert_eq!(parse_qps_csv(input).unwrap(), parse_qps_csv(input).unwrap());
    }

    #[test]
    fn header_only_report_yields_empty_map() {
        let buckets = parse_qps_csv("Timestamp,Zone,Queries\n").unwrap();
        assert!(buckets.is_empty());

        match select_second_last_bucket(&buckets) {
            Err(QpsError::InsufficientData(0)) => {}
            other => panic!("expected InsufficientData(0), got {:?}", other),
        }
    }

    #[test]
    fn empty_report_yields_empty_map() {
        assert!(parse_qps_csv("").unwrap().is_empty());
    }

    #[test]
    fn single_bucket_is_insufficient() {
        let buckets = parse_qps_csv("h,h,h\n1,foo,300\n1,bar,600").unwrap();
        match select_second_last_bucket(&buckets) {
            Err(QpsError::InsufficientData(1)) => {}
            other => panic!("expected InsufficientData(1), got {:?}", other),
        }
    }

    #[test]
    fn non_integer_count_is_malformed() {
        let err = parse_qps_csv("h,h,h\n1,foo,lots").unwrap_err();
        match err {
            QpsError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let err = parse_qps_csv("h,h,h\n1,foo,300\n2,bar").unwrap_err();
        match err {
            QpsError::Malformed { line, .. } => assert_eq!(line, 3),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }
}
