//! Tasks assigned to agents.

use crate::security::{Fingerprint, IdentityConfig};

#[derive(Debug, Clone)]
pub struct Task {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    /// Name of the agent responsible, if assigned.
    pub agent: Option<String>,
    security_config: IdentityConfig,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            expected_output: expected_output.into(),
            agent: None,
            security_config: IdentityConfig::new(),
        }
    }

    pub fn assigned_to(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    pub fn security_config(&self) -> &IdentityConfig {
        &self.security_config
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        self.security_config.fingerprint()
    }
}
