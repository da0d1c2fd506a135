use crate::{
    sample::{RawEntry, RawGroup, Sample},
    timestamp::{self, Designator, TimestampError},
};
use log::debug;
use std::ops::AddAssign;

/// Counts of what happened to the entries of one or more groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub accepted: usize,
    pub missing_timestamp: usize,
    pub unparseable_timestamp: usize,
    pub invalid_value: usize,
    // Accepted entries whose timestamp had no offset.
    pub assumed_utc: usize,
}

impl NormalizeReport {
    pub fn dropped(&self) -> usize {
        self.missing_timestamp + self.unparseable_timestamp + self.invalid_value
    }
}

impl AddAssign for NormalizeReport {
    fn add_assign(&mut self, other: Self) {
        self.accepted += other.accepted;
        self.missing_timestamp += other.missing_timestamp;
        self.unparseable_timestamp += other.unparseable_timestamp;
        self.invalid_value += other.invalid_value;
        self.assumed_utc += other.assumed_utc;
    }
}

#[derive(Debug, Default)]
pub struct Normalized {
    pub samples: Vec<Sample>,
    pub report: NormalizeReport,
}

enum Rejection {
    Timestamp(TimestampError),
    Value(Option<f64>),
}

fn normalize_entry(entry: &RawEntry) -> Result<(Sample, Designator), Rejection> {
    let parsed = timestamp::parse(entry.timestamp.as_deref()).map_err(Rejection::Timestamp)?;
    let value = match entry.value {
        Some(v) if v.is_finite() => v,
        other => return Err(Rejection::Value(other)),
    };
    Ok((
        Sample {
            instant: parsed.instant,
            value,
        },
        parsed.designator,
    ))
}

/// Converts a group's entries into samples, in entry order. Entries that
/// cannot be normalized are dropped and counted; they never fail the group.
pub fn normalize_group(group: &RawGroup) -> Normalized {
    let mut normalized = Normalized {
        samples: Vec::with_capacity(group.data.len()),
        report: NormalizeReport::default(),
    };

    for (i, entry) in group.data.iter().enumerate() {
        match normalize_entry(entry) {
            Ok((sample, designator)) => {
                if designator == Designator::AssumedUtc {
                    normalized.report.assumed_utc += 1;
                }
                normalized.report.accepted += 1;
                normalized.samples.push(sample);
            }
            Err(Rejection::Timestamp(e)) => {
                debug!("dropping entry {}: {}", i, e);
                match e {
                    TimestampError::Missing => normalized.report.missing_timestamp += 1,
                    TimestampError::Unparseable(_) => {
                        normalized.report.unparseable_timestamp += 1
                    }
                }
            }
            Err(Rejection::Value(v)) => {
                debug!("dropping entry {}: invalid value {:?}", i, v);
                normalized.report.invalid_value += 1;
            }
        }
    }

    normalized
}
