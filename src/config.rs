use crate::encode::ExportFormat;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs::File, io::BufReader, path::Path};
use thiserror::Error;

pub const DEFAULT_PROVIDER: &str = "abbott_libreview";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Provider groups to read from the payload, merged in this order.
    pub providers: Vec<String>,
    // Format used when exporting the assembled series.
    pub export_format: ExportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: vec![DEFAULT_PROVIDER.to_string()],
            export_format: ExportFormat::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("at least one provider is required")]
    NoProvidersError,
    #[error("provider name is blank")]
    BlankProviderError,
    #[error("provider {0:?} is listed more than once")]
    DuplicateProviderError(String),
    #[error("error opening config file")]
    FileError(#[from] std::io::Error),
    #[error("error unmarshaling config file")]
    UnmarshalError(#[from] serde_json::Error),
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: Config = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.providers.is_empty() {
            return Err(ConfigError::NoProvidersError);
        }
        let mut seen = HashSet::new();
        for provider in &self.providers {
            if provider.trim().is_empty() {
                return Err(ConfigError::BlankProviderError);
            }
            if !seen.insert(provider.as_str()) {
                return Err(ConfigError::DuplicateProviderError(provider.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use std::fs;

    use super::{Config, ConfigError, DEFAULT_PROVIDER};
    use crate::encode::ExportFormat;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.providers, vec![DEFAULT_PROVIDER.to_string()]);
        assert_eq!(config.export_format, ExportFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let config = Config {
            providers: vec![],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoProvidersError)));

        let config = Config {
            providers: vec!["dexcom".to_string(), " ".to_string()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::BlankProviderError)));

        let config = Config {
            providers: vec!["dexcom".to_string(), "dexcom".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateProviderError(p)) if p == "dexcom"
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: Config = serde_json::from_str(r#"{"export_format": "json"}"#).unwrap();
        assert_eq!(config.providers, vec![DEFAULT_PROVIDER.to_string()]);
        assert_eq!(config.export_format, ExportFormat::Json);
    }

    #[test]
    fn test_from_path() {
        let path = std::env::temp_dir().join(format!("glucose_config_{}.json", std::process::id()));
        fs::write(&path, r#"{"providers": ["abbott_libreview", "dexcom"]}"#).unwrap();
        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.providers, vec!["abbott_libreview", "dexcom"]);
        fs::remove_file(&path).unwrap();

        fs::write(&path, r#"{"providers": []}"#).unwrap();
        assert!(matches!(
            Config::from_path(&path),
            Err(ConfigError::NoProvidersError)
        ));
        fs::remove_file(&path).unwrap();
    }
}
