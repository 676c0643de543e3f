//! Binding of `agents.yaml` and `tasks.yaml` into crew objects.
//!
//! Both files map an entry name to a mapping of fields:
//!
//! ```yaml
//! researcher:
//!   role: Senior Researcher
//!   goal: Uncover developments in {topic}
//!   backstory: A seasoned analyst.
//!   function_calling_llm: gpt-4o-mini
//! ```
//!
//! File order is preserved.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_yaml::{Mapping, Value as YamlValue};

use crate::error::{CrewError, Result};
use crate::project::agent::{Agent, Llm};
use crate::project::crew::{Crew, Process};
use crate::project::task::Task;
use crate::security::IdentityConfig;

/// One bound agent entry.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub llm: Option<String>,
    pub function_calling_llm: Option<String>,
    pub allow_delegation: bool,
    pub verbose: bool,
    /// Identity pinned by the entry's `fingerprint` field.
    pub identity: Option<IdentityConfig>,
}

/// One bound task entry.
#[derive(Debug, Clone)]
pub struct TaskConfig {
    pub name: String,
    pub description: String,
    pub expected_output: String,
    pub agent: Option<String>,
}

/// Agents and tasks loaded from YAML.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    pub agents: Vec<AgentConfig>,
    pub tasks: Vec<TaskConfig>,
}

impl ProjectConfig {
    /// Load and bind both YAML files.
    pub fn from_files(agents_yaml: &Path, tasks_yaml: &Path) -> Result<Self> {
        let agents_src = read_yaml_file(agents_yaml)?;
        let tasks_src = read_yaml_file(tasks_yaml)?;
        Self::from_yaml_strs(&agents_src, &tasks_src)
    }

    /// Bind already-read YAML sources.
    pub fn from_yaml_strs(agents_src: &str, tasks_src: &str) -> Result<Self> {
        let agents = parse_entries(agents_src)?
            .into_iter()
            .map(|(name, fields)| bind_agent(name, fields))
            .collect::<Result<Vec<_>>>()?;

        let tasks = parse_entries(tasks_src)?
            .into_iter()
            .map(|(name, fields)| bind_task(name, fields))
            .collect::<Result<Vec<_>>>()?;

        for task in &tasks {
            if let Some(agent) = &task.agent {
                if !agents.iter().any(|a| &a.name == agent) {
                    return Err(CrewError::UnknownReference(format!(
                        "task '{}' references unknown agent '{agent}'",
                        task.name
                    )));
                }
            }
        }

        Ok(Self { agents, tasks })
    }

    /// Build agents, tasks, and the crew.
    ///
    /// Entries without a `fingerprint` get a fresh identity on every build.
    pub fn build_crew(&self, process: Process, verbose: bool) -> Result<Crew> {
        let agents = self.agents.iter().map(AgentConfig::build).collect();
        let tasks = self
            .tasks
            .iter()
            .map(|t| {
                let task = Task::new(&t.name, &t.description, &t.expected_output);
                match &t.agent {
                    Some(agent) => task.assigned_to(agent),
                    None => task,
                }
            })
            .collect();
        Crew::new(agents, tasks, process, verbose)
    }
}

impl AgentConfig {
    pub fn build(&self) -> Agent {
        let mut agent = Agent::new(&self.name, &self.role, &self.goal, &self.backstory);
        agent.llm = self.llm.as_deref().map(Llm::new);
        agent.function_calling_llm = self.function_calling_llm.as_deref().map(Llm::new);
        agent.allow_delegation = self.allow_delegation;
        agent.verbose = self.verbose;
        match &self.identity {
            Some(identity) => agent.with_security_config(identity.clone()),
            None => agent,
        }
    }
}

fn read_yaml_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CrewError::FileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Parse a `name -> fields` document. An empty document has no entries.
fn parse_entries(src: &str) -> Result<Vec<(String, Mapping)>> {
    let doc: YamlValue = serde_yaml::from_str(src).map_err(|e| CrewError::Yaml(e.to_string()))?;
    let top = match doc {
        YamlValue::Null => return Ok(Vec::new()),
        YamlValue::Mapping(m) => m,
        _ => return Err(CrewError::Yaml("top level must be a mapping of entries".into())),
    };

    let mut entries = Vec::with_capacity(top.len());
    for (key, value) in top {
        let name = match key {
            YamlValue::String(s) => s,
            other => return Err(CrewError::Yaml(format!("entry name must be a string, got {other:?}"))),
        };
        match value {
            YamlValue::Mapping(fields) => entries.push((name, fields)),
            _ => {
                return Err(CrewError::InvalidField {
                    entry: name,
                    field: "entry".into(),
                    expected: "a mapping",
                })
            }
        }
    }
    Ok(entries)
}

/// Raw agent entry as written in YAML.
#[derive(Debug, Deserialize)]
struct AgentEntry {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    goal: Option<String>,
    #[serde(default)]
    backstory: Option<String>,
    #[serde(default)]
    llm: Option<String>,
    #[serde(default)]
    function_calling_llm: Option<String>,
    #[serde(default)]
    allow_delegation: Option<bool>,
    #[serde(default)]
    verbose: Option<bool>,
    /// Seed string or fingerprint record.
    #[serde(default)]
    fingerprint: Option<serde_json::Value>,
}

/// Raw task entry as written in YAML.
#[derive(Debug, Deserialize)]
struct TaskEntry {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    expected_output: Option<String>,
    #[serde(default)]
    agent: Option<String>,
}

fn bind_agent(name: String, fields: Mapping) -> Result<AgentConfig> {
    let entry: AgentEntry = deserialize_entry(&name, fields)?;

    let identity = match entry.fingerprint {
        None => None,
        Some(fingerprint) => Some(IdentityConfig::construct(
            serde_json::json!({ "fingerprint": fingerprint }),
        )?),
    };

    Ok(AgentConfig {
        role: required(&name, "role", entry.role)?,
        goal: required(&name, "goal", entry.goal)?,
        backstory: required(&name, "backstory", entry.backstory)?,
        llm: entry.llm,
        function_calling_llm: entry.function_calling_llm,
        allow_delegation: entry.allow_delegation.unwrap_or(false),
        verbose: entry.verbose.unwrap_or(false),
        identity,
        name,
    })
}

fn bind_task(name: String, fields: Mapping) -> Result<TaskConfig> {
    let entry: TaskEntry = deserialize_entry(&name, fields)?;
    Ok(TaskConfig {
        description: required(&name, "description", entry.description)?,
        expected_output: required(&name, "expected_output", entry.expected_output)?,
        agent: entry.agent,
        name,
    })
}

/// Deserialize one entry, naming the offending field on a type mismatch.
fn deserialize_entry<T: DeserializeOwned>(entry: &str, fields: Mapping) -> Result<T> {
    serde_path_to_error::deserialize(YamlValue::Mapping(fields)).map_err(|err| {
        let field = err
            .path()
            .iter()
            .next()
            .and_then(|segment| match segment {
                serde_path_to_error::Segment::Map { key } => Some(key.clone()),
                _ => None,
            })
            .unwrap_or_default();
        if field.is_empty() {
            return CrewError::Yaml(format!("entry '{entry}': {}", err.inner()));
        }
        CrewError::InvalidField {
            entry: entry.to_string(),
            expected: expected_type(&field),
            field,
        }
    })
}

fn expected_type(field: &str) -> &'static str {
    match field {
        "allow_delegation" | "verbose" => "a boolean",
        "fingerprint" => "a seed string or fingerprint record",
        _ => "a string",
    }
}

fn required(entry: &str, field: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| CrewError::MissingField {
        entry: entry.to_string(),
        field: field.to_string(),
    })
}
