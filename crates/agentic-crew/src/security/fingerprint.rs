//! Fingerprint: the stable identity of one crew component.
//!
//! A fingerprint value is `afp_` + base58 of 16 bytes. The bytes are either
//! drawn from the OS random source or derived from a seed with HKDF-SHA256,
//! so the same seed always yields the same value.
//!
//! Record format (JSON):
//! ```json
//! {
//!     "value": "afp_...",
//!     "createdAt": "2024-03-01T12:30:00.000000Z",
//!     "metadata": { ... }
//! }
//! ```

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::crypto::{derivation, random};
use crate::error::{CrewError, Result};

/// Free-form fingerprint metadata.
pub type Metadata = BTreeMap<String, Value>;

/// Upper bound on the serialized size of a metadata map.
pub const MAX_METADATA_BYTES: usize = 10_000;

const VALUE_PREFIX: &str = "afp_";

/// Unique, stable identifier for an agent, task, or crew.
///
/// Two fingerprints are equal iff their values are equal; creation time and
/// metadata do not take part in comparison or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "FingerprintRecord", into = "FingerprintRecord")]
pub struct Fingerprint {
    value: String,
    created_at: DateTime<Utc>,
    metadata: Metadata,
}

impl Fingerprint {
    /// Generate a fresh random fingerprint.
    pub fn new() -> Self {
        Self::from_id_bytes(&random::random_bytes::<{ derivation::ID_LEN }>())
    }

    /// Derive a fingerprint deterministically from a seed.
    ///
    /// # Errors
    ///
    /// Returns `CrewError::InvalidSeed` if the seed is empty or whitespace,
    /// or `CrewError::DerivationFailed` if HKDF expansion fails.
    pub fn from_seed(seed: &str) -> Result<Self> {
        if seed.trim().is_empty() {
            return Err(CrewError::InvalidSeed);
        }
        let bytes = derivation::derive_id(seed.as_bytes(), derivation::fingerprint_context())?;
        Ok(Self::from_id_bytes(&bytes))
    }

    fn from_id_bytes(bytes: &[u8]) -> Self {
        Self {
            value: format!("{VALUE_PREFIX}{}", bs58::encode(bytes).into_string()),
            created_at: crate::time::now(),
            metadata: Metadata::new(),
        }
    }

    /// Attach initial metadata.
    ///
    /// # Errors
    ///
    /// Returns `CrewError::InvalidMetadata` if the map nests too deep or is too large.
    pub fn with_metadata(mut self, metadata: Metadata) -> Result<Self> {
        validate_metadata(&metadata)?;
        self.metadata = metadata;
        Ok(self)
    }

    /// The identifier string.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// When this fingerprint was first created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Add a metadata entry. Existing keys are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `CrewError::InvalidMetadata` if `key` is already present or the
    /// resulting map breaks the depth or size limits. The fingerprint is left
    /// unchanged on error.
    pub fn add_metadata(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        if self.metadata.contains_key(&key) {
            return Err(CrewError::InvalidMetadata(format!(
                "metadata key '{key}' is already set"
            )));
        }
        let mut next = self.metadata.clone();
        next.insert(key, value);
        validate_metadata(&next)?;
        self.metadata = next;
        Ok(())
    }

    /// Convert to a structured record.
    pub fn to_record(&self) -> Value {
        let mut record = serde_json::Map::new();
        record.insert("value".into(), Value::String(self.value.clone()));
        record.insert(
            "createdAt".into(),
            Value::String(crate::time::to_iso8601(&self.created_at)),
        );
        record.insert(
            "metadata".into(),
            Value::Object(self.metadata.clone().into_iter().collect()),
        );
        Value::Object(record)
    }

    /// Reconstruct a fingerprint from a structured record.
    ///
    /// `value` is required. `createdAt` defaults to now when absent, and
    /// `metadata` defaults to empty. The legacy keys `uuid_str` and
    /// `created_at` are accepted as aliases.
    ///
    /// # Errors
    ///
    /// Returns `CrewError::MalformedRecord` if the record is not an object,
    /// lacks a non-empty `value`, carries an unparseable timestamp, or holds
    /// invalid metadata.
    pub fn from_record(record: &Value) -> Result<Self> {
        Self::deserialize(record).map_err(|e| CrewError::MalformedRecord(e.to_string()))
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Fingerprint {}

impl Hash for Fingerprint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Check metadata against the nesting and size limits.
///
/// A value may be an object, but that object's own values may not be.
///
/// # Errors
///
/// Returns `CrewError::InvalidMetadata` describing the first violation.
pub fn validate_metadata(metadata: &Metadata) -> Result<()> {
    for (key, value) in metadata {
        if let Value::Object(nested) = value {
            if nested.values().any(Value::is_object) {
                return Err(CrewError::InvalidMetadata(format!(
                    "metadata can only be nested one level deep (key '{key}')"
                )));
            }
        }
    }

    let size = serde_json::to_vec(metadata)
        .map_err(|e| CrewError::SerializationError(e.to_string()))?
        .len();
    if size > MAX_METADATA_BYTES {
        return Err(CrewError::InvalidMetadata(format!(
            "metadata size {size} exceeds maximum of {MAX_METADATA_BYTES} bytes"
        )));
    }

    Ok(())
}

// ── Wire form ─────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FingerprintRecord {
    #[serde(alias = "uuid_str")]
    value: String,
    #[serde(default, alias = "created_at")]
    created_at: Option<String>,
    #[serde(default)]
    metadata: Option<Metadata>,
}

impl TryFrom<FingerprintRecord> for Fingerprint {
    type Error = CrewError;

    fn try_from(record: FingerprintRecord) -> Result<Self> {
        if record.value.trim().is_empty() {
            return Err(CrewError::MalformedRecord(
                "fingerprint value must be a non-empty string".to_string(),
            ));
        }

        let created_at = match record.created_at.as_deref() {
            Some(ts) => crate::time::parse_iso8601(ts)?,
            None => crate::time::now(),
        };

        let metadata = record.metadata.unwrap_or_default();
        validate_metadata(&metadata)?;

        Ok(Self {
            value: record.value,
            created_at,
            metadata,
        })
    }
}

impl From<Fingerprint> for FingerprintRecord {
    fn from(fp: Fingerprint) -> Self {
        Self {
            created_at: Some(crate::time::to_iso8601(&fp.created_at)),
            value: fp.value,
            metadata: Some(fp.metadata),
        }
    }
}
