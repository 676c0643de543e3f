//! Event payloads emitted by crew components.
//!
//! Every event carries an [`EventMeta`] (timestamp plus the identity of
//! the component that emitted it) and exposes a stable type tag.

pub mod llm;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::security::Fingerprint;

pub use llm::{
    LlmCallCompleted, LlmCallFailed, LlmCallStarted, LlmCallType, LlmEvent, LlmMessages,
};

/// Fields shared by every event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMeta {
    pub timestamp: DateTime<Utc>,
    /// Fingerprint value of the emitting component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_fingerprint: Option<String>,
    /// Kind of the emitting component, e.g. `agent` or `crew`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
}

impl EventMeta {
    pub fn now() -> Self {
        Self {
            timestamp: crate::time::now(),
            source_fingerprint: None,
            source_type: None,
        }
    }

    /// Attribute the event to a component.
    pub fn from_source(fingerprint: &Fingerprint, source_type: impl Into<String>) -> Self {
        Self {
            source_fingerprint: Some(fingerprint.value().to_string()),
            source_type: Some(source_type.into()),
            ..Self::now()
        }
    }
}

impl Default for EventMeta {
    fn default() -> Self {
        Self::now()
    }
}

/// Common view over event payloads.
pub trait CrewEvent {
    /// Stable type tag, e.g. `llm_call_started`.
    fn event_type(&self) -> &'static str;

    fn meta(&self) -> &EventMeta;
}
