//! AgenticCrew: identity and configuration for crews of AI agents.
//!
//! Every agent, task, and crew owns an `IdentityConfig` wrapping a
//! `Fingerprint`. Around that core sit knowledge ingestion, LLM call
//! events, a provider catalog with offline fallback, and YAML binding
//! of agent and task definitions.

pub mod crypto;
pub mod error;
pub mod events;
pub mod knowledge;
pub mod project;
pub mod provider;
pub mod security;
pub mod settings;
pub mod storage;
pub mod time;

// Re-export primary types
pub use error::{CrewError, Result};
pub use security::{Fingerprint, IdentityConfig, IdentityInput, Metadata};
pub use settings::Settings;

// Re-export collaborator types
pub use events::{CrewEvent, EventMeta, LlmEvent};
pub use knowledge::{DocumentSource, DocumentSourceBuilder, KnowledgeSource, SourcePath};
pub use project::{Agent, Crew, Llm, Process, ProjectConfig, Task};
pub use provider::{get_provider_data, ProviderModels};
