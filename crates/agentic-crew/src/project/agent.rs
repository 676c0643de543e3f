//! Agents: a role, a goal, and the identity that signs their work.

use crate::security::{Fingerprint, IdentityConfig};

/// A language model reference by model name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Llm {
    pub model: String,
}

impl Llm {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

/// An agent bound from configuration.
#[derive(Debug, Clone)]
pub struct Agent {
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub llm: Option<Llm>,
    /// Model used for tool calls; falls back to `llm` when unset.
    pub function_calling_llm: Option<Llm>,
    pub allow_delegation: bool,
    pub verbose: bool,
    security_config: IdentityConfig,
}

impl Agent {
    /// Create an agent with a fresh random identity.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            llm: None,
            function_calling_llm: None,
            allow_delegation: false,
            verbose: false,
            security_config: IdentityConfig::new(),
        }
    }

    pub fn with_security_config(mut self, config: IdentityConfig) -> Self {
        self.security_config = config;
        self
    }

    pub fn security_config(&self) -> &IdentityConfig {
        &self.security_config
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        self.security_config.fingerprint()
    }

    /// The model for tool calls: `function_calling_llm`, else `llm`.
    pub fn tool_llm(&self) -> Option<&Llm> {
        self.function_calling_llm.as_ref().or(self.llm.as_ref())
    }
}
