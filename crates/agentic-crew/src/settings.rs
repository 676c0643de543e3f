//! Runtime settings resolved from the environment.
//!
//! | Variable                  | Default                          |
//! |---------------------------|----------------------------------|
//! | `ACREW_HOME`              | `$HOME/.agentic-crew`            |
//! | `ACREW_KNOWLEDGE_DIR`     | `knowledge`                      |
//! | `ACREW_PROVIDER_URL`      | [`DEFAULT_PROVIDER_URL`]         |
//! | `ACREW_PROVIDER_TTL_SECS` | `86400`                          |
//! | `ACREW_HTTP_TIMEOUT_SECS` | `60`                             |

use std::path::PathBuf;
use std::time::Duration;

/// Model catalog published by LiteLLM.
pub const DEFAULT_PROVIDER_URL: &str =
    "https://raw.githubusercontent.com/BerriAI/litellm/main/model_prices_and_context_window.json";

const DEFAULT_PROVIDER_TTL: Duration = Duration::from_secs(24 * 3600);
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root for identity configs, caches, and stored chunks.
    pub home: PathBuf,
    /// Directory relative knowledge paths are resolved against.
    pub knowledge_dir: PathBuf,
    pub provider_url: String,
    pub provider_cache_ttl: Duration,
    pub http_timeout: Duration,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = lookup("ACREW_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                let user_home = lookup("HOME").unwrap_or_else(|| ".".to_string());
                PathBuf::from(user_home).join(".agentic-crew")
            });

        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            home,
            knowledge_dir: lookup("ACREW_KNOWLEDGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("knowledge")),
            provider_url: lookup("ACREW_PROVIDER_URL")
                .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string()),
            provider_cache_ttl: secs("ACREW_PROVIDER_TTL_SECS", DEFAULT_PROVIDER_TTL),
            http_timeout: secs("ACREW_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT),
        }
    }

    pub fn identity_dir(&self) -> PathBuf {
        self.home.join("identity")
    }

    /// Path of the saved identity config called `name`.
    pub fn identity_path(&self, name: &str) -> PathBuf {
        self.identity_dir().join(format!("{name}.json"))
    }

    pub fn provider_cache_file(&self) -> PathBuf {
        self.home.join("provider_cache.json")
    }

    pub fn chunk_dir(&self) -> PathBuf {
        self.home.join("knowledge")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
