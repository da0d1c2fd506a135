use chrono::{DateTime, NaiveDate, Timelike, Utc};
use thiserror::Error;

const UTC_DESIGNATOR: &str = "Z";

// ISO 8601 extended forms outside RFC 3339. `%#z` takes `Z`, `+hh`, `+hhmm`
// and `+hh:mm`.
const ISO_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimestampError {
    #[error("entry has no timestamp")]
    Missing,
    #[error("unparseable timestamp: {0:?}")]
    Unparseable(String),
}

/// Which parse attempt produced the instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Designator {
    // The raw string carried its own offset.
    Explicit,
    // The raw string had no offset and was read as UTC.
    AssumedUtc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimestamp {
    pub instant: DateTime<Utc>,
    pub designator: Designator,
}

fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let date = s.strip_suffix(UTC_DESIGNATOR)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let instant = DateTime::parse_from_rfc3339(s)
        .ok()
        .or_else(|| {
            ISO_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        })
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| parse_date(s))?;

    // Leap seconds are rejected.
    match instant.nanosecond() >= 1_000_000_000 {
        true => None,
        false => Some(instant),
    }
}

/// Parses a provider timestamp into an instant.
///
/// The raw string is first read as an ISO 8601 instant (RFC 3339, minute
/// precision, basic offsets, or a bare date with `Z`). Providers are not
/// consistent about including an offset, so a string that fails the first
/// attempt is retried with a UTC designator appended.
pub fn parse(raw: Option<&str>) -> Result<ParsedTimestamp, TimestampError> {
    let raw = raw.ok_or(TimestampError::Missing)?;

    if let Some(instant) = parse_instant(raw) {
        return Ok(ParsedTimestamp {
            instant,
            designator: Designator::Explicit,
        });
    }

    match parse_instant(&format!("{}{}", raw, UTC_DESIGNATOR)) {
        Some(instant) => Ok(ParsedTimestamp {
            instant,
            designator: Designator::AssumedUtc,
        }),
        None => Err(TimestampError::Unparseable(raw.to_string())),
    }
}
