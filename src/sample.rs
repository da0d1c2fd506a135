use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{collections::HashMap, io::Read};
use thiserror::Error;

/// A normalized reading: a valid instant and a finite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub instant: DateTime<Utc>,
    pub value: f64,
}

/// A reading as the provider sent it. Either field may be missing or of the
/// wrong JSON type, in which case it deserializes to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub timestamp: Option<String>,
    pub value: Option<f64>,
}

impl RawEntry {
    pub fn new(timestamp: Option<&str>, value: f64) -> Self {
        Self {
            timestamp: timestamp.map(str::to_string),
            value: Some(value),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(fields) => RawEntry {
                timestamp: match fields.get("timestamp") {
                    Some(Value::String(s)) => Some(s.clone()),
                    _ => None,
                },
                value: fields.get("value").and_then(Value::as_f64),
            },
            _ => RawEntry::default(),
        }
    }
}

impl<'de> Deserialize<'de> for RawEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(RawEntry::from_value(&Value::deserialize(deserializer)?))
    }
}

/// One source's readings. A group that is not an object, or whose `data` is
/// not an array, deserializes as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGroup {
    pub data: Vec<RawEntry>,
}

impl RawGroup {
    fn from_value(value: &Value) -> Self {
        let data = match value.get("data") {
            Some(Value::Array(entries)) => entries.iter().map(RawEntry::from_value).collect(),
            _ => vec![],
        };
        RawGroup { data }
    }
}

impl<'de> Deserialize<'de> for RawGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(RawGroup::from_value(&Value::deserialize(deserializer)?))
    }
}

/// Grouped readings keyed by provider identifier, e.g. `groups.abbott_libreview`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Payload {
    #[serde(default, deserialize_with = "deserialize_groups")]
    pub groups: HashMap<String, Vec<RawGroup>>,
}

// A provider whose value is not an array contributes no groups, and a
// `groups` value that is not an object contributes no providers.
fn deserialize_groups<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<HashMap<String, Vec<RawGroup>>, D::Error> {
    let groups = match Value::deserialize(deserializer)? {
        Value::Object(providers) => providers
            .iter()
            .map(|(provider, groups)| {
                let groups = match groups {
                    Value::Array(groups) => groups.iter().map(RawGroup::from_value).collect(),
                    _ => vec![],
                };
                (provider.clone(), groups)
            })
            .collect(),
        _ => HashMap::new(),
    };
    Ok(groups)
}

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("error reading payload")]
    Read(#[from] std::io::Error),
    #[error("error unmarshaling payload")]
    Unmarshal(#[from] serde_json::Error),
}

impl Payload {
    pub fn from_reader<R: Read>(readable: R) -> Result<Self, PayloadError> {
        Ok(serde_json::from_reader(readable)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, PayloadError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn provider_groups(&self, provider: &str) -> &[RawGroup] {
        self.groups.get(provider).map(Vec::as_slice).unwrap_or(&[])
    }
}
