//! Source path processing for knowledge ingestion.
//!
//! Text inputs that look like HTTP(S) URLs must pass URL validation; all
//! other text inputs are resolved against the knowledge directory and must
//! exist. Inputs that are already `PathBuf`s pass through untouched.

use std::path::{Component, Path, PathBuf};

use url::Url;

use crate::error::{CrewError, Result};

/// Raw source input as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathInput {
    /// A URL or a path relative to the knowledge directory.
    Text(String),
    /// A path used exactly as given.
    Path(PathBuf),
}

impl From<&str> for PathInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PathInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<PathBuf> for PathInput {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}

/// A validated source ready for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePath {
    Url(Url),
    Local(PathBuf),
}

impl std::fmt::Display for SourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Check that `url` is an `http`/`https` URL with a multi-label host.
pub fn validate_url(url: &str) -> bool {
    check_url(url).is_ok()
}

fn check_url(raw: &str) -> std::result::Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    let host = url.host_str().ok_or("missing host")?;
    if host.split('.').count() < 2 {
        return Err(format!("host '{host}' must include a top-level domain"));
    }
    Ok(url)
}

/// Resolve and validate every input.
///
/// # Errors
///
/// Returns `CrewError::InvalidUrl` for a URL failing validation, or
/// `CrewError::FileNotFound` for a relative path missing under
/// `knowledge_dir`. Processing stops at the first failure.
pub fn process_file_paths(knowledge_dir: &Path, inputs: &[PathInput]) -> Result<Vec<SourcePath>> {
    let mut processed = Vec::with_capacity(inputs.len());

    for input in inputs {
        match input {
            PathInput::Text(text) if text.starts_with("http://") || text.starts_with("https://") => {
                let url = check_url(text).map_err(|reason| CrewError::InvalidUrl {
                    url: text.clone(),
                    reason,
                })?;
                processed.push(SourcePath::Url(url));
            }
            PathInput::Text(text) => {
                let local = knowledge_dir.join(relative_to_root(text));
                if !local.exists() {
                    return Err(CrewError::FileNotFound(local));
                }
                processed.push(SourcePath::Local(local));
            }
            PathInput::Path(path) => processed.push(SourcePath::Local(path.clone())),
        }
    }

    Ok(processed)
}

/// Drop any root or drive prefix so the path joins under the knowledge dir.
fn relative_to_root(text: &str) -> PathBuf {
    Path::new(text)
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect()
}
