use crate::{
    normalize::{normalize_group, NormalizeReport},
    sample::{Payload, Sample},
};
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashSet;

/// Axis label format: minute precision, always UTC.
pub const LABEL_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub const DATASET_LABEL: &str = "Glucose Readings";
pub const TIMESTAMP_TITLE: &str = "Timestamp (UTC)";
pub const VALUE_TITLE: &str = "Glucose Level (mmol/L)";

/// Shown instead of a chart when the series is empty.
pub const NO_DATA_MESSAGE: &str =
    "No data found for the selected range. Or no glucose data available.";

/// Samples ordered by instant. Samples with equal instants keep the order in
/// which they were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn from_samples(mut samples: Vec<Sample>) -> Self {
        // sort_by_key is stable.
        samples.sort_by_key(|s| s.instant);
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.samples
            .iter()
            .map(|s| s.instant.format(LABEL_FORMAT).to_string())
            .collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn chart_data(&self) -> ChartData {
        ChartData {
            dataset_label: DATASET_LABEL,
            x_title: TIMESTAMP_TITLE,
            y_title: VALUE_TITLE,
            labels: self.labels(),
            values: self.values(),
        }
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// What a line chart needs to draw the series. `labels` and `values` are
/// index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub dataset_label: &'static str,
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Default)]
pub struct Assembly {
    pub series: Series,
    pub report: NormalizeReport,
}

/// Normalizes every group of every listed provider and merges the result into
/// one series. Providers missing from the payload contribute nothing, and a
/// provider listed more than once is read only the first time.
pub fn assemble<S: AsRef<str>>(payload: &Payload, providers: &[S]) -> Assembly {
    let mut samples = vec![];
    let mut report = NormalizeReport::default();
    let mut seen = HashSet::new();

    for provider in providers {
        let provider = provider.as_ref();
        if !seen.insert(provider) {
            warn!("ignoring repeated provider {}", provider);
            continue;
        }
        let groups = payload.provider_groups(provider);
        if groups.is_empty() {
            debug!("no groups for provider {}", provider);
        }
        for group in groups {
            let mut normalized = normalize_group(group);
            samples.append(&mut normalized.samples);
            report += normalized.report;
        }
    }

    if report.dropped() > 0 {
        warn!(
            "dropped {} of {} entries (missing timestamp: {}, unparseable timestamp: {}, invalid value: {})",
            report.dropped(),
            report.dropped() + report.accepted,
            report.missing_timestamp,
            report.unparseable_timestamp,
            report.invalid_value,
        );
    } else {
        debug!("normalized {} entries", report.accepted);
    }

    Assembly {
        series: Series::from_samples(samples),
        report,
    }
}
