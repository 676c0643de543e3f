//! Agents, tasks, and crews, plus their YAML binding.

pub mod agent;
pub mod crew;
pub mod loader;
pub mod task;

pub use agent::{Agent, Llm};
pub use crew::{Crew, Process};
pub use loader::{AgentConfig, ProjectConfig, TaskConfig};
pub use task::Task;
