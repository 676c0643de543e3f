//! Provider catalog: which LLM providers exist and which models each offers.
//!
//! Data comes from a remote JSON catalog, cached on disk. Every failure on
//! the fetch path (timeout, wrong content type, network or parse error)
//! yields `None`; callers substitute the static [`MODELS`] table.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::{Duration, SystemTime};

use serde_json::{Map, Value};

use crate::settings::Settings;

/// Providers known without any network access.
pub const PROVIDERS: &[&str] = &[
    "OpenAI",
    "Anthropic",
    "Gemini",
    "NVIDIA NIM",
    "Groq",
    "Ollama",
    "Watson",
    "Bedrock",
    "Azure",
    "Cerebras",
    "SambaNova",
];

/// Static model lists for the known providers.
pub const MODELS: &[(&str, &[&str])] = &[
    (
        "openai",
        &["gpt-4", "gpt-4o", "gpt-4o-mini", "o1-mini", "o1-preview"],
    ),
    (
        "anthropic",
        &[
            "claude-3-5-sonnet-20240620",
            "claude-3-sonnet-20240229",
            "claude-3-opus-20240229",
            "claude-3-haiku-20240307",
        ],
    ),
    (
        "gemini",
        &[
            "gemini/gemini-1.5-flash",
            "gemini/gemini-1.5-pro",
            "gemini/gemini-gemma-2-9b-it",
            "gemini/gemini-gemma-2-27b-it",
        ],
    ),
    (
        "groq",
        &[
            "groq/llama-3.1-8b-instant",
            "groq/llama-3.1-70b-versatile",
            "groq/llama-3.1-405b-reasoning",
            "groq/gemma2-9b-it",
            "groq/gemma-7b-it",
        ],
    ),
    ("ollama", &["ollama/llama3.1", "ollama/mixtral"]),
    (
        "watson",
        &[
            "watsonx/meta-llama/llama-3-1-70b-instruct",
            "watsonx/meta-llama/llama-3-1-8b-instruct",
            "watsonx/ibm/granite-3-8b-instruct",
        ],
    ),
    (
        "bedrock",
        &[
            "bedrock/anthropic.claude-3-5-sonnet-20240620-v1:0",
            "bedrock/anthropic.claude-3-haiku-20240307-v1:0",
            "bedrock/amazon.titan-text-express-v1",
            "bedrock/meta.llama3-1-70b-instruct-v1:0",
        ],
    ),
];

/// Provider name (lowercase) to model names.
pub type ProviderModels = BTreeMap<String, Vec<String>>;

/// Static models for `provider` (lowercase), empty if none are listed.
pub fn default_models(provider: &str) -> Vec<String> {
    MODELS
        .iter()
        .find(|(name, _)| *name == provider)
        .map(|(_, models)| models.iter().map(|m| m.to_string()).collect())
        .unwrap_or_default()
}

/// Fetch the catalog from `url` and cache it at `cache_file`.
///
/// Returns `None` on timeout, network error, non-success status, a content
/// type other than `application/json`, or a body that is not a JSON object.
/// A failure to write the cache is logged but does not discard the data.
pub fn fetch_provider_data(url: &str, cache_file: &Path, timeout: Duration) -> Option<Map<String, Value>> {
    match try_fetch(url, timeout) {
        Ok(data) => {
            if let Err(e) = write_cache(cache_file, &data) {
                log::warn!("failed to write provider cache {}: {e}", cache_file.display());
            }
            Some(data)
        }
        Err(reason) => {
            log::warn!("failed to fetch provider data from {url}: {reason}");
            None
        }
    }
}

fn try_fetch(url: &str, timeout: Duration) -> std::result::Result<Map<String, Value>, String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| e.to_string())?;

    let response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| {
            if e.is_timeout() {
                "request timed out".to_string()
            } else {
                e.to_string()
            }
        })?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !content_type.contains("application/json") {
        return Err(format!("unexpected content type '{content_type}'"));
    }

    match response.json::<Value>().map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(map),
        _ => Err("catalog is not a JSON object".to_string()),
    }
}

fn write_cache(cache_file: &Path, data: &Map<String, Value>) -> crate::error::Result<()> {
    let json = serde_json::to_vec(data)
        .map_err(|e| crate::error::CrewError::SerializationError(e.to_string()))?;
    crate::storage::write_atomic(cache_file, &json)
}

/// Read a cached catalog, regardless of age.
pub fn read_cache_file(cache_file: &Path) -> Option<Map<String, Value>> {
    let bytes = std::fs::read(cache_file).ok()?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Whether `cache_file` exists and was modified within `ttl`.
pub fn cache_is_fresh(cache_file: &Path, ttl: Duration) -> bool {
    std::fs::metadata(cache_file)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .map(|age| age < ttl)
        .unwrap_or(false)
}

/// Load catalog data: fresh cache, then network, then stale cache.
pub fn load_provider_data(settings: &Settings) -> Option<Map<String, Value>> {
    let cache_file = settings.provider_cache_file();

    if cache_is_fresh(&cache_file, settings.provider_cache_ttl) {
        if let Some(data) = read_cache_file(&cache_file) {
            log::debug!("using cached provider data from {}", cache_file.display());
            return Some(data);
        }
    }

    fetch_provider_data(&settings.provider_url, &cache_file, settings.http_timeout)
        .or_else(|| read_cache_file(&cache_file))
}

/// Group catalog entries by their `litellm_provider` field.
///
/// Entries with no provider, provider `other`, or a provider containing
/// `http` are skipped.
pub fn group_models_by_provider(data: &Map<String, Value>) -> ProviderModels {
    let mut grouped = ProviderModels::new();
    for (model, properties) in data {
        let provider = properties
            .get("litellm_provider")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        if provider.is_empty() || provider == "other" || provider.contains("http") {
            continue;
        }
        grouped.entry(provider).or_default().push(model.clone());
    }
    grouped
}

/// Group loaded data, or fall back to the static table when there is none.
pub fn provider_models_or_fallback(data: Option<Map<String, Value>>) -> ProviderModels {
    match data {
        Some(data) => group_models_by_provider(&data),
        None => PROVIDERS
            .iter()
            .map(|p| {
                let key = p.to_lowercase();
                let models = default_models(&key);
                (key, models)
            })
            .collect(),
    }
}

/// Provider-to-models mapping, always available.
pub fn get_provider_data(settings: &Settings) -> ProviderModels {
    provider_models_or_fallback(load_provider_data(settings))
}
