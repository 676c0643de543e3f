//! LLM call lifecycle events.
//!
//! Serialized form is internally tagged by `type`:
//! ```json
//! { "type": "llm_call_started", "timestamp": "...", "messages": "..." }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CrewEvent, EventMeta};

/// What kind of LLM call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmCallType {
    ToolCall,
    LlmCall,
}

/// Prompt payload: a bare string or a list of chat messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LlmMessages {
    Text(String),
    /// Each message maps keys such as `role` and `content` to strings.
    Chat(Vec<BTreeMap<String, String>>),
}

impl From<&str> for LlmMessages {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Emitted when an LLM call starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmCallStarted {
    #[serde(flatten)]
    pub meta: EventMeta,
    pub messages: LlmMessages,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    /// Callback names; callbacks themselves are not serializable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_functions: Option<Map<String, Value>>,
}

impl LlmCallStarted {
    pub fn new(meta: EventMeta, messages: impl Into<LlmMessages>) -> Self {
        Self {
            meta,
            messages: messages.into(),
            tools: None,
            callbacks: None,
            available_functions: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = Some(tools);
        self
    }
}

/// Emitted when an LLM call returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmCallCompleted {
    #[serde(flatten)]
    pub meta: EventMeta,
    pub response: Value,
    pub call_type: LlmCallType,
}

/// Emitted when an LLM call fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmCallFailed {
    #[serde(flatten)]
    pub meta: EventMeta,
    pub error: String,
}

/// Any LLM lifecycle event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LlmEvent {
    LlmCallStarted(LlmCallStarted),
    LlmCallCompleted(LlmCallCompleted),
    LlmCallFailed(LlmCallFailed),
}

impl CrewEvent for LlmCallStarted {
    fn event_type(&self) -> &'static str {
        "llm_call_started"
    }

    fn meta(&self) -> &EventMeta {
        &self.meta
    }
}

impl CrewEvent for LlmCallCompleted {
    fn event_type(&self) -> &'static str {
        "llm_call_completed"
    }

    fn meta(&self) -> &EventMeta {
        &self.meta
    }
}

impl CrewEvent for LlmCallFailed {
    fn event_type(&self) -> &'static str {
        "llm_call_failed"
    }

    fn meta(&self) -> &EventMeta {
        &self.meta
    }
}

impl CrewEvent for LlmEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::LlmCallStarted(e) => e.event_type(),
            Self::LlmCallCompleted(e) => e.event_type(),
            Self::LlmCallFailed(e) => e.event_type(),
        }
    }

    fn meta(&self) -> &EventMeta {
        match self {
            Self::LlmCallStarted(e) => e.meta(),
            Self::LlmCallCompleted(e) => e.meta(),
            Self::LlmCallFailed(e) => e.meta(),
        }
    }
}

impl From<LlmCallStarted> for LlmEvent {
    fn from(e: LlmCallStarted) -> Self {
        Self::LlmCallStarted(e)
    }
}

impl From<LlmCallCompleted> for LlmEvent {
    fn from(e: LlmCallCompleted) -> Self {
        Self::LlmCallCompleted(e)
    }
}

impl From<LlmCallFailed> for LlmEvent {
    fn from(e: LlmCallFailed) -> Self {
        Self::LlmCallFailed(e)
    }
}
