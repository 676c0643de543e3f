//! Crews: agents and tasks run under a process.

use std::str::FromStr;

use crate::error::{CrewError, Result};
use crate::project::agent::Agent;
use crate::project::task::Task;
use crate::security::{Fingerprint, IdentityConfig};

/// How tasks are dispatched to agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Process {
    #[default]
    Sequential,
    Hierarchical,
}

impl FromStr for Process {
    type Err = CrewError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "hierarchical" => Ok(Self::Hierarchical),
            other => Err(CrewError::InvalidField {
                entry: "crew".to_string(),
                field: format!("process '{other}'"),
                expected: "'sequential' or 'hierarchical'",
            }),
        }
    }
}

impl std::fmt::Display for Process {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Hierarchical => write!(f, "hierarchical"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    pub process: Process,
    pub verbose: bool,
    security_config: IdentityConfig,
}

impl Crew {
    /// Assemble a crew.
    ///
    /// # Errors
    ///
    /// `UnknownReference` if a task is assigned to an agent not in `agents`.
    pub fn new(agents: Vec<Agent>, tasks: Vec<Task>, process: Process, verbose: bool) -> Result<Self> {
        for task in &tasks {
            if let Some(name) = &task.agent {
                if !agents.iter().any(|a| &a.name == name) {
                    return Err(CrewError::UnknownReference(format!(
                        "task '{}' is assigned to unknown agent '{name}'",
                        task.name
                    )));
                }
            }
        }

        Ok(Self {
            agents,
            tasks,
            process,
            verbose,
            security_config: IdentityConfig::new(),
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name == name)
    }

    pub fn security_config(&self) -> &IdentityConfig {
        &self.security_config
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        self.security_config.fingerprint()
    }
}
