//! Timestamp value generators.

use crate::registry::GeneratorState;
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use schema_core::{GenerationError, Invocation, Value};

const DEFAULT_START_YEAR: i64 = 2000;
const DEFAULT_END_YEAR: i64 = 2024;

/// Random timestamp between January 1st of `start_year` and `end_year`.
///
/// `fmt` selects the representation: `iso` (default) yields a datetime value,
/// `posix` yields integer seconds since the epoch.
pub fn timestamp(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
) -> Result<Value, GenerationError> {
    let start_year = call.get_i64("start_year")?.unwrap_or(DEFAULT_START_YEAR);
    let end_year = call.get_i64("end_year")?.unwrap_or(DEFAULT_END_YEAR);
    let posix = match call.get_str("fmt")?.unwrap_or("iso") {
        "iso" => false,
        "posix" => true,
        _ => {
            return Err(GenerationError::InvalidArgument {
                generator: call.generator().to_string(),
                argument: "fmt".to_string(),
                expected: "'iso' or 'posix'",
            })
        }
    };

    let start = new_year(call, "start_year", start_year)?;
    let end = new_year(call, "end_year", end_year)?;
    let dt = random_between(state, call, start, end)?;

    Ok(if posix {
        Value::Int(dt.timestamp())
    } else {
        Value::DateTime(dt)
    })
}

/// Random timestamp between `start` and `end`.
///
/// Both bounds accept RFC 3339 or `YYYY-MM-DD`.
pub fn timestamp_range(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
) -> Result<Value, GenerationError> {
    let start = parse_bound(call, "start")?;
    let end = parse_bound(call, "end")?;
    random_between(state, call, start, end).map(Value::DateTime)
}

fn random_between(
    state: &mut GeneratorState,
    call: &Invocation<'_>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<DateTime<Utc>, GenerationError> {
    if start > end {
        return Err(GenerationError::failed(
            call.generator(),
            format!("start {start} is after end {end}"),
        ));
    }

    let secs = state.rng.random_range(start.timestamp()..=end.timestamp());
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        GenerationError::failed(call.generator(), format!("timestamp {secs} out of range"))
    })
}

fn new_year(
    call: &Invocation<'_>,
    argument: &str,
    year: i64,
) -> Result<DateTime<Utc>, GenerationError> {
    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| GenerationError::InvalidArgument {
            generator: call.generator().to_string(),
            argument: argument.to_string(),
            expected: "a calendar year",
        })
}

fn parse_bound(call: &Invocation<'_>, argument: &str) -> Result<DateTime<Utc>, GenerationError> {
    let raw = call.require_str(argument)?;
    parse_timestamp(raw).ok_or_else(|| GenerationError::InvalidArgument {
        generator: call.generator().to_string(),
        argument: argument.to_string(),
        expected: "an RFC 3339 timestamp or YYYY-MM-DD date",
    })
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}
