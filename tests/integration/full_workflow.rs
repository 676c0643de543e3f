//! Integration test: YAML project -> crew -> persisted identities ->
//! events -> knowledge ingestion.

use std::collections::HashSet;

use agentic_crew::events::{CrewEvent, EventMeta, LlmCallCompleted, LlmCallStarted, LlmCallType, LlmEvent};
use agentic_crew::knowledge::KnowledgeSource;
use agentic_crew::storage::{load_config, save_config, ChunkStore, KnowledgeStorage};
use agentic_crew::{
    CrewError, DocumentSource, Fingerprint, IdentityConfig, Process, ProjectConfig, Settings,
};
use serde_json::json;

const AGENTS: &str = r#"
researcher:
  role: Senior Researcher
  goal: Uncover developments in AI agents
  backstory: A seasoned analyst.
  llm: gpt-4o
  function_calling_llm: gpt-4o-mini
  fingerprint: researcher-v1
writer:
  role: Writer
  goal: Turn findings into a report
  backstory: Clear and concise.
  verbose: true
"#;

const TASKS: &str = r#"
research:
  description: Research the topic
  expected_output: Ten bullet points
  agent: researcher
report:
  description: Write the report
  expected_output: A markdown report
  agent: writer
"#;

#[test]
fn full_workflow() {
    let home = tempfile::tempdir().unwrap();
    let settings = Settings {
        home: home.path().to_path_buf(),
        knowledge_dir: home.path().join("docs"),
        ..Settings::default()
    };

    // 1. Bind YAML and build the crew.
    let agents_path = home.path().join("agents.yaml");
    let tasks_path = home.path().join("tasks.yaml");
    std::fs::write(&agents_path, AGENTS).unwrap();
    std::fs::write(&tasks_path, TASKS).unwrap();

    let project = ProjectConfig::from_files(&agents_path, &tasks_path).unwrap();
    let crew = project.build_crew(Process::Sequential, true).unwrap();
    assert_eq!(crew.agents().len(), 2);
    assert_eq!(crew.tasks().len(), 2);

    // Every component owns a distinct identity.
    let mut values = HashSet::new();
    values.insert(crew.fingerprint().value().to_string());
    for agent in crew.agents() {
        values.insert(agent.fingerprint().value().to_string());
    }
    for task in crew.tasks() {
        values.insert(task.fingerprint().value().to_string());
    }
    assert_eq!(values.len(), 5);

    // The pinned agent derives from its seed.
    let researcher = crew.agent("researcher").unwrap();
    assert_eq!(researcher.fingerprint(), &Fingerprint::from_seed("researcher-v1").unwrap());
    assert_eq!(researcher.tool_llm().unwrap().model, "gpt-4o-mini");

    // 2. Persist and reload an identity.
    let path = settings.identity_path("researcher");
    save_config(researcher.security_config(), &path).unwrap();
    let loaded = load_config(&path).unwrap();
    assert_eq!(&loaded, researcher.security_config());
    assert_eq!(
        loaded.fingerprint().created_at().timestamp_micros(),
        researcher.fingerprint().created_at().timestamp_micros()
    );

    // 3. Emit events tagged with the agent's fingerprint.
    let started: LlmEvent = LlmCallStarted::new(
        EventMeta::from_source(researcher.fingerprint(), "agent"),
        "Find recent papers",
    )
    .into();
    let completed: LlmEvent = LlmCallCompleted {
        meta: EventMeta::from_source(researcher.fingerprint(), "agent"),
        response: json!("Three papers found"),
        call_type: LlmCallType::LlmCall,
    }
    .into();
    for event in [&started, &completed] {
        assert_eq!(
            event.meta().source_fingerprint.as_deref(),
            Some(researcher.fingerprint().value())
        );
        let wire = serde_json::to_value(event).unwrap();
        assert_eq!(wire["type"], event.event_type());
    }

    // 4. Ingest knowledge into the chunk store.
    std::fs::create_dir_all(&settings.knowledge_dir).unwrap();
    std::fs::write(
        settings.knowledge_dir.join("notes.md"),
        "# Notes\n\nAgents need identity.\n\n## Detail\n\nFingerprints are stable.\n",
    )
    .unwrap();

    let store = ChunkStore::new(settings.chunk_dir()).unwrap();
    let mut source = DocumentSource::builder(&settings.knowledge_dir)
        .file_paths(["notes.md"])
        .storage(store)
        .build()
        .unwrap();
    source.add().unwrap();
    assert_eq!(source.chunks().len(), 2);

    let reopened = ChunkStore::new(settings.chunk_dir()).unwrap();
    assert_eq!(reopened.count().unwrap(), 2);
}

#[test]
fn workflow_rebuilds_with_fresh_unpinned_identities() {
    let project = ProjectConfig::from_yaml_strs(AGENTS, TASKS).unwrap();
    let a = project.build_crew(Process::Sequential, false).unwrap();
    let b = project.build_crew(Process::Sequential, false).unwrap();

    assert_eq!(a.agent("researcher").unwrap().fingerprint(), b.agent("researcher").unwrap().fingerprint());
    assert_ne!(a.agent("writer").unwrap().fingerprint(), b.agent("writer").unwrap().fingerprint());
}

#[test]
fn workflow_identity_record_round_trip_through_construct() {
    let original = IdentityConfig::from_seed("crew-seed").unwrap();
    let record = original.to_record();
    let rebuilt = IdentityConfig::construct(record).unwrap();
    assert_eq!(rebuilt, original);

    let err = IdentityConfig::construct(json!({"fingerprint": 42})).unwrap_err();
    assert!(matches!(err, CrewError::MalformedRecord(_)));
}
