use crate::{
    encode::{encode_series, ExportFormat},
    series::Series,
};
use chrono::{NaiveDate, Utc};
use log::debug;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const FILE_PREFIX: &str = "glucose_data";

/// Shown instead of starting a download when there is nothing to export.
pub const NO_EXPORT_MESSAGE: &str = "No data available for download.";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("series is empty")]
    EmptySeries,
    #[error("error encoding series")]
    Encode(#[from] io::Error),
}

/// A rendered download: file name plus contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub file_name: String,
    pub format: ExportFormat,
    pub content: Vec<u8>,
}

pub fn file_name(date: NaiveDate, export_format: ExportFormat) -> String {
    format!(
        "{}_{}.{}",
        FILE_PREFIX,
        date.format("%Y-%m-%d"),
        export_format.extension()
    )
}

impl Export {
    pub fn new(
        series: &Series,
        export_format: ExportFormat,
        date: NaiveDate,
    ) -> Result<Self, ExportError> {
        if series.is_empty() {
            return Err(ExportError::EmptySeries);
        }
        let mut content = Vec::new();
        let written = encode_series(&mut content, series, export_format)?;
        debug!(
            "encoded {} samples as {} ({} bytes)",
            series.len(),
            export_format.content_type(),
            written
        );
        Ok(Self {
            file_name: file_name(date, export_format),
            format: export_format,
            content,
        })
    }

    /// Same as [`Export::new`], named after the current UTC date.
    pub fn today(series: &Series, export_format: ExportFormat) -> Result<Self, ExportError> {
        Self::new(series, export_format, Utc::now().date_naive())
    }

    pub fn write_to_dir(&self, dir_path: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir_path)?;
        let path = dir_path.join(&self.file_name);
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}
