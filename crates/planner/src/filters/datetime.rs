use crate::{error::FilterError, params::SqlParams};
use chrono::{DateTime, NaiveDate, Utc};
use model::value::SqlValue;

const TEMPORAL_START: &str = "temporal_start";
const TEMPORAL_END: &str = "temporal_end";

/// Builds the datetime clause against the collection temporal extent.
///
/// A single timestamp matches collections whose extent contains it; an
/// interval matches collections whose extent overlaps it. Open-ended
/// intervals use `..` on either side, and a collection with no end date is
/// treated as ongoing. Parameters keep the caller's original spelling; only
/// validation parses them.
pub fn datetime_filter(
    input: &str,
    params: &mut SqlParams,
) -> Result<Option<String>, FilterError> {
    let input = input.trim();
    if input.is_empty() || input == "../.." {
        return Ok(None);
    }

    if !input.contains('/') {
        parse_timestamp(input)?;
        let a = params.push(SqlValue::Text(input.to_string()));
        let b = params.push(SqlValue::Text(input.to_string()));
        return Ok(Some(format!(
            "({TEMPORAL_START} <= {a} AND ({TEMPORAL_END} >= {b} OR {TEMPORAL_END} IS NULL))"
        )));
    }

    let parts: Vec<&str> = input.split('/').collect();
    let [start, end] = parts.as_slice() else {
        return Err(FilterError::InvalidDatetime(
            "an interval must contain exactly one '/'".to_string(),
        ));
    };

    match (*start, *end) {
        ("..", end) => {
            parse_timestamp(end)?;
            let a = params.push(SqlValue::Text(end.to_string()));
            Ok(Some(format!("({TEMPORAL_START} <= {a})")))
        }
        (start, "..") => {
            parse_timestamp(start)?;
            let a = params.push(SqlValue::Text(start.to_string()));
            Ok(Some(format!(
                "({TEMPORAL_END} >= {a} OR {TEMPORAL_END} IS NULL)"
            )))
        }
        (start, end) => {
            let start_ts = parse_timestamp(start)?;
            let end_ts = parse_timestamp(end)?;
            if start_ts >= end_ts {
                return Err(FilterError::IntervalOrder);
            }
            // Overlap: the collection starts before the interval ends and
            // ends after (or has no end at all).
            let a = params.push(SqlValue::Text(end.to_string()));
            let b = params.push(SqlValue::Text(start.to_string()));
            Ok(Some(format!(
                "({TEMPORAL_START} <= {a} AND ({TEMPORAL_END} >= {b} OR {TEMPORAL_END} IS NULL))"
            )))
        }
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, FilterError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = value.parse::<NaiveDate>() {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts.and_utc());
        }
    }
    Err(FilterError::InvalidDatetime(format!(
        "'{}' is not a valid timestamp",
        value
    )))
}
