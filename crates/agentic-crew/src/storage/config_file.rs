//! Identity config files.
//!
//! An identity config is persisted as its structured record inside a
//! small versioned envelope, so the on-disk shape matches what
//! `IdentityConfig::from_record` accepts.
//!
//! File format (JSON):
//! ```json
//! {
//!     "version": 1,
//!     "format": "acfg-v1",
//!     "config": { "fingerprint": { ... } }
//! }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CrewError, Result};
use crate::security::IdentityConfig;

// ── File format constants ─────────────────────────────────────────────────────

const CONFIG_VERSION: u32 = 1;
const CONFIG_FORMAT: &str = "acfg-v1";

// ── On-disk structure ─────────────────────────────────────────────────────────

/// Top-level structure written to disk for an identity config.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Format version number.
    pub version: u32,
    /// Format identifier string.
    pub format: String,
    /// The config's structured record.
    pub config: Value,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Save an `IdentityConfig` to `path`.
///
/// The file is written atomically: the serialized JSON goes to a sibling
/// temporary file which is then renamed over `path`.
///
/// # Errors
///
/// Returns `CrewError::SerializationError` if encoding fails, or
/// `CrewError::Io` for filesystem errors.
pub fn save_config(config: &IdentityConfig, path: &Path) -> Result<()> {
    let file = ConfigFile {
        version: CONFIG_VERSION,
        format: CONFIG_FORMAT.to_string(),
        config: config.to_record(),
    };

    let json = serde_json::to_string_pretty(&file)
        .map_err(|e| CrewError::SerializationError(e.to_string()))?;

    write_atomic(path, json.as_bytes())
}

/// Load an `IdentityConfig` from `path`.
///
/// # Errors
///
/// Returns `CrewError::InvalidFileFormat` if the envelope cannot be parsed or
/// has an unsupported version, `CrewError::MalformedRecord` if the embedded
/// record is invalid, or `CrewError::Io` for filesystem errors.
pub fn load_config(path: &Path) -> Result<IdentityConfig> {
    let bytes = std::fs::read(path)?;
    let file: ConfigFile = serde_json::from_slice(&bytes).map_err(|e| {
        CrewError::InvalidFileFormat(format!(
            "failed to parse config file {}: {e}",
            path.display()
        ))
    })?;

    if file.version != CONFIG_VERSION || file.format != CONFIG_FORMAT {
        return Err(CrewError::InvalidFileFormat(format!(
            "unsupported config file version={} format={}",
            file.version, file.format,
        )));
    }

    IdentityConfig::from_record(&file.config)
}

/// Write `data` to `path` atomically using a sibling temporary file.
///
/// Creates the parent directory if it does not exist.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);
    std::fs::write(&tmp_path, data)?;

    std::fs::rename(&tmp_path, path)?;

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
