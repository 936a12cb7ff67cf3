use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A single submitted survey response, reduced to what the engine needs for time bucketing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub respondent_id: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default = "default_completed")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

/// Widest submission window, in days, that a request may bucket into a daily series.
pub const MAX_RESPONSE_SPAN_DAYS: i64 = 3660;

/// Days between the earliest and latest submission, or `None` without records.
pub fn response_span_days(records: &[ResponseRecord]) -> Option<i64> {
    let first = records.iter().map(|r| r.submitted_at).min()?;
    let last = records.iter().map(|r| r.submitted_at).max()?;
    Some((last.date_naive() - first.date_naive()).num_days())
}

/// Bucket response submissions into one point per UTC day, filling gaps with zero.
/// Callers bound the span with [`MAX_RESPONSE_SPAN_DAYS`]; requests enforce it on validation.
pub fn daily_response_counts(records: &[ResponseRecord]) -> Vec<TimeSeriesPoint> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.submitted_at.date_naive()).or_insert(0) += 1;
    }

    let (first, last) = match (counts.keys().next(), counts.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut points = Vec::new();
    let mut day = first;
    while day <= last {
        let count = counts.get(&day).copied().unwrap_or(0);
        points.push(TimeSeriesPoint::new(
            day.and_time(NaiveTime::MIN).and_utc(),
            count as f64,
        ));
        day += Duration::days(1);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, day: u32, hour: u32) -> ResponseRecord {
        ResponseRecord {
            respondent_id: id.to_string(),
            submitted_at: Utc.with_ymd_and_hms(2024, 3, day, hour, 15, 0).unwrap(),
            completed: true,
        }
    }

    #[test]
    fn test_daily_counts_fill_gaps() {
        let records = vec![record("a", 1, 9), record("b", 1, 17), record("c", 3, 8)];
        let points = daily_response_counts(&records);

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![2.0, 0.0, 1.0]);
        assert_eq!(
            points[0].timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_response_span_days() {
        let records = vec![record("a", 3, 9), record("b", 1, 23), record("c", 2, 8)];
        assert_eq!(response_span_days(&records), Some(2));
        assert_eq!(response_span_days(&[]), None);
    }

    #[test]
    fn test_daily_counts_empty() {
        assert!(daily_response_counts(&[]).is_empty());
    }
}
