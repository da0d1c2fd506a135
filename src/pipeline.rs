use crate::{
    config::{Config, ConfigError},
    export::{Export, ExportError},
    sample::{Payload, PayloadError},
    series::{assemble, Assembly, Series},
};
use chrono::NaiveDate;
use std::io::Read;

/// Turns provider payloads into series and series into exports, using a
/// validated [`Config`]. Holds no state between calls.
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn assemble(&self, payload: &Payload) -> Assembly {
        assemble(payload, &self.config.providers)
    }

    pub fn assemble_reader<R: Read>(&self, readable: R) -> Result<Assembly, PayloadError> {
        Ok(self.assemble(&Payload::from_reader(readable)?))
    }

    pub fn export(&self, series: &Series, date: NaiveDate) -> Result<Export, ExportError> {
        Export::new(series, self.config.export_format, date)
    }
}

#[cfg(test)]
pub mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::Pipeline;
    use crate::{
        config::Config,
        encode::decode_samples,
        export::ExportError,
        sample::Sample,
    };

    const PAYLOAD: &str = r#"{
        "groups": {
            "abbott_libreview": [
                {
                    "data": [
                        {"timestamp": "2024-01-01T08:00:00", "value": 5.5},
                        {"timestamp": "2024-01-01T07:30:00Z", "value": 4.9}
                    ]
                }
            ]
        }
    }"#;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    #[test]
    fn test_pipeline() {
        let pipeline = Pipeline::new(Config::default()).unwrap();
        let assembly = pipeline.assemble_reader(PAYLOAD.as_bytes()).unwrap();

        assert_eq!(
            assembly.series.samples(),
            &[
                Sample {
                    instant: Utc.with_ymd_and_hms(2024, 1, 1, 7, 30, 0).unwrap(),
                    value: 4.9,
                },
                Sample {
                    instant: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap(),
                    value: 5.5,
                },
            ]
        );
        assert_eq!(assembly.report.assumed_utc, 1);

        let export = pipeline.export(&assembly.series, date()).unwrap();
        assert_eq!(export.file_name, "glucose_data_2024-01-02.csv");
        assert_eq!(
            String::from_utf8(export.content).unwrap(),
            "Timestamp (UTC),Glucose Level (mmol/L)\n\
             2024-01-01T07:30:00.000Z,4.9\n\
             2024-01-01T08:00:00.000Z,5.5\n"
        );
    }

    #[test]
    fn test_pipeline_idempotent() {
        let pipeline = Pipeline::new(Config::default()).unwrap();
        let first = pipeline.assemble_reader(PAYLOAD.as_bytes()).unwrap();
        let second = pipeline.assemble_reader(PAYLOAD.as_bytes()).unwrap();
        assert_eq!(first.series, second.series);
        assert_eq!(
            pipeline.export(&first.series, date()).unwrap(),
            pipeline.export(&second.series, date()).unwrap()
        );
    }

    #[test]
    fn test_pipeline_csv_reconstructs_series() {
        let pipeline = Pipeline::new(Config::default()).unwrap();
        let series = pipeline.assemble_reader(PAYLOAD.as_bytes()).unwrap().series;
        let export = pipeline.export(&series, date()).unwrap();
        assert_eq!(decode_samples(export.content.as_slice()).unwrap(), series.samples());
    }

    #[test]
    fn test_pipeline_empty_provider() {
        let pipeline = Pipeline::new(Config::default()).unwrap();
        let assembly = pipeline
            .assemble_reader(r#"{"groups": {"abbott_libreview": []}}"#.as_bytes())
            .unwrap();
        assert!(assembly.series.is_empty());
        let chart = assembly.series.chart_data();
        assert!(chart.labels.is_empty());
        assert!(chart.values.is_empty());
        assert!(matches!(
            pipeline.export(&assembly.series, date()),
            Err(ExportError::EmptySeries)
        ));
    }

    #[test]
    fn test_pipeline_rejects_invalid_config() {
        assert!(Pipeline::new(Config {
            providers: vec![],
            ..Default::default()
        })
        .is_err());
    }
}
