use crate::{sample::Sample, series::Series};
use serde::{Deserialize, Serialize};
use std::io::{Read, Result, Write};

pub mod csv;
pub mod json;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

pub trait Encoder {
    fn encode_series(&mut self, series: &Series) -> Result<()>;
    fn bytes_written(&self) -> u64;
    fn flush(&mut self) -> Result<()>;
}

pub trait Decoder {
    fn decode_samples(&mut self) -> Result<Vec<Sample>>;
}

/// Encodes `series` into `writable`, returning the number of bytes written.
pub fn encode_series<W: Write>(
    writable: W,
    series: &Series,
    export_format: ExportFormat,
) -> Result<u64> {
    match export_format {
        ExportFormat::Csv => encode_with(csv::CsvEncoder::new(writable), series),
        ExportFormat::Json => encode_with(json::JsonEncoder::new(writable), series),
    }
}

fn encode_with<E: Encoder>(mut encoder: E, series: &Series) -> Result<u64> {
    encoder.encode_series(series)?;
    encoder.flush()?;
    Ok(encoder.bytes_written())
}

pub fn decode_samples<R: Read>(readable: R) -> Result<Vec<Sample>> {
    csv::CsvDecoder::new(readable).decode_samples()
}

#[cfg(test)]
pub mod tests {
    use chrono::{TimeZone, Utc};

    use super::{encode_series, ExportFormat};
    use crate::{sample::Sample, series::Series};

    #[test]
    fn test_encode_series_reports_bytes_written() {
        let series = Series::from_samples(vec![Sample {
            instant: Utc.with_ymd_and_hms(2024, 1, 1, 7, 30, 0).unwrap(),
            value: 4.9,
        }]);
        for export_format in [ExportFormat::Csv, ExportFormat::Json] {
            let mut buf = Vec::new();
            let written = encode_series(&mut buf, &series, export_format).unwrap();
            assert_eq!(written, buf.len() as u64);
        }
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Csv.content_type(), "text/csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Json.content_type(), "application/json");
    }
}
