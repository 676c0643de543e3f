//! Identity configuration owned by every agent, task, and crew.
//!
//! An `IdentityConfig` holds exactly one `Fingerprint`. It can be built from
//! nothing (random identity), a seed string, an existing fingerprint, or a
//! structured record, and serializes to
//! `{"fingerprint": { ...fingerprint record... }}`.
//!
//! The config is immutable once built. To change identity, build a new one.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CrewError, Result};
use crate::security::fingerprint::Fingerprint;

const FINGERPRINT_KEY: &str = "fingerprint";

/// Accepted input shapes for [`IdentityConfig::construct`].
#[derive(Debug, Clone, Default)]
pub enum IdentityInput {
    /// No identity given; generate a random one.
    #[default]
    Absent,
    /// Seed string for deterministic derivation.
    Seed(String),
    /// A fingerprint built elsewhere, used as-is.
    Fingerprint(Fingerprint),
    /// A structured record with an optional `fingerprint` key.
    Record(Value),
}

impl From<&str> for IdentityInput {
    fn from(seed: &str) -> Self {
        Self::Seed(seed.to_string())
    }
}

impl From<String> for IdentityInput {
    fn from(seed: String) -> Self {
        Self::Seed(seed)
    }
}

impl From<Fingerprint> for IdentityInput {
    fn from(fp: Fingerprint) -> Self {
        Self::Fingerprint(fp)
    }
}

impl From<Value> for IdentityInput {
    fn from(record: Value) -> Self {
        Self::Record(record)
    }
}

impl<T: Into<IdentityInput>> From<Option<T>> for IdentityInput {
    fn from(input: Option<T>) -> Self {
        input.map(Into::into).unwrap_or_default()
    }
}

/// Security configuration carrying a component's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityConfig {
    fingerprint: Fingerprint,
}

impl IdentityConfig {
    /// Create a config with a freshly generated random fingerprint.
    pub fn new() -> Self {
        Self {
            fingerprint: Fingerprint::new(),
        }
    }

    /// Create a config whose fingerprint is derived from `seed`.
    ///
    /// # Errors
    ///
    /// Returns `CrewError::InvalidSeed` if the seed is empty or whitespace.
    pub fn from_seed(seed: &str) -> Result<Self> {
        Ok(Self {
            fingerprint: Fingerprint::from_seed(seed)?,
        })
    }

    /// Wrap an existing fingerprint.
    pub fn from_fingerprint(fingerprint: Fingerprint) -> Self {
        Self { fingerprint }
    }

    /// Build a config from any accepted input shape.
    ///
    /// For `IdentityInput::Record`, the `fingerprint` key is interpreted as:
    /// missing or null (generate), string (seed), object (fingerprint record).
    ///
    /// # Errors
    ///
    /// Returns `CrewError::InvalidSeed` for a blank seed, and
    /// `CrewError::MalformedRecord` if the record is not an object or its
    /// `fingerprint` entry has an unsupported type or invalid content.
    pub fn construct(input: impl Into<IdentityInput>) -> Result<Self> {
        match input.into() {
            IdentityInput::Absent => Ok(Self::new()),
            IdentityInput::Seed(seed) => Self::from_seed(&seed),
            IdentityInput::Fingerprint(fp) => Ok(Self::from_fingerprint(fp)),
            IdentityInput::Record(record) => {
                let fields = as_object(&record)?;
                match fields.get(FINGERPRINT_KEY) {
                    None | Some(Value::Null) => Ok(Self::new()),
                    Some(Value::String(seed)) => Self::from_seed(seed),
                    Some(nested @ Value::Object(_)) => {
                        Ok(Self::from_fingerprint(Fingerprint::from_record(nested)?))
                    }
                    Some(other) => Err(CrewError::MalformedRecord(format!(
                        "fingerprint must be a seed string or record, got {}",
                        json_type_name(other)
                    ))),
                }
            }
        }
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Convert to a structured record: `{"fingerprint": {...}}`.
    pub fn to_record(&self) -> Value {
        let mut record = serde_json::Map::new();
        record.insert(FINGERPRINT_KEY.into(), self.fingerprint.to_record());
        Value::Object(record)
    }

    /// Rebuild a config from a structured record.
    ///
    /// A missing, null, or empty `fingerprint` entry yields a freshly
    /// generated identity; other keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CrewError::MalformedRecord` if the record is not an object,
    /// or if the `fingerprint` entry is present but not a valid fingerprint
    /// record.
    pub fn from_record(record: &Value) -> Result<Self> {
        let fields = as_object(record)?;
        match fields.get(FINGERPRINT_KEY) {
            None | Some(Value::Null) => Ok(Self::new()),
            Some(Value::Object(nested)) if nested.is_empty() => Ok(Self::new()),
            Some(nested @ Value::Object(_)) => {
                Ok(Self::from_fingerprint(Fingerprint::from_record(nested)?))
            }
            Some(other) => Err(CrewError::MalformedRecord(format!(
                "fingerprint record must be an object, got {}",
                json_type_name(other)
            ))),
        }
    }
}

impl Default for IdentityConfig {
    /// Every default is a distinct identity.
    fn default() -> Self {
        Self::new()
    }
}

impl<'de> Deserialize<'de> for IdentityConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = Value::deserialize(deserializer)?;
        Self::from_record(&record).map_err(serde::de::Error::custom)
    }
}

fn as_object(record: &Value) -> Result<&serde_json::Map<String, Value>> {
    record.as_object().ok_or_else(|| {
        CrewError::MalformedRecord(format!(
            "identity config record must be an object, got {}",
            json_type_name(record)
        ))
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
