//! Integration tests for the CLI binary.
//!
//! Registered as a [[test]] in the agentic-crew-cli crate so that
//! CARGO_BIN_EXE_acrew is available. Every invocation points ACREW_HOME
//! at a temp directory.

use std::path::Path;
use std::process::{Command, Output};

/// Get a Command pointing to the `acrew` binary with an isolated home.
fn acrew(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_acrew"));
    cmd.env("ACREW_HOME", home)
        // Unroutable so `providers` never reaches the network.
        .env("ACREW_PROVIDER_URL", "http://127.0.0.1:1/catalog.json")
        .env("ACREW_HTTP_TIMEOUT_SECS", "1");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    acrew(home)
        .args(args)
        .output()
        .expect("failed to execute acrew")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn cli_responds_to_help() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["--help"]);

    assert!(
        output.status.success(),
        "acrew --help should exit with success, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let out = stdout(&output);
    assert!(out.contains("Usage"), "help should contain usage, got: {out}");
}

#[test]
fn cli_responds_to_version() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("0.1"));
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["--nonexistent-flag"]);
    assert!(!output.status.success());
}

#[test]
fn cli_seeded_fingerprint_is_deterministic() {
    let home = tempfile::tempdir().unwrap();
    let a: serde_json::Value =
        serde_json::from_slice(&run(home.path(), &["fingerprint", "--seed", "writer"]).stdout).unwrap();
    let b: serde_json::Value =
        serde_json::from_slice(&run(home.path(), &["fingerprint", "--seed", "writer"]).stdout).unwrap();

    assert_eq!(a["value"], b["value"]);
    assert!(a["value"].as_str().unwrap().starts_with("afp_"));
    assert!(a["createdAt"].is_string());
}

#[test]
fn cli_blank_seed_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["fingerprint", "--seed", "  "]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("seed"));
}

#[test]
fn cli_init_show_list_export() {
    let home = tempfile::tempdir().unwrap();

    let init = run(home.path(), &["init", "--name", "writer", "--seed", "writer-seed"]);
    assert!(init.status.success(), "init failed: {}", String::from_utf8_lossy(&init.stderr));
    assert!(home.path().join("identity/writer.json").exists());

    let again = run(home.path(), &["init", "--name", "writer"]);
    assert!(!again.status.success(), "re-init should refuse to overwrite");

    let show = run(home.path(), &["show", "writer"]);
    assert!(show.status.success());
    assert!(stdout(&show).contains("Identity: writer"));

    let list = run(home.path(), &["list"]);
    assert!(stdout(&list).contains("writer"));

    let export = run(home.path(), &["--identity", "writer", "export"]);
    assert!(export.status.success());
    let record: serde_json::Value = serde_json::from_slice(&export.stdout).unwrap();

    let fp: serde_json::Value =
        serde_json::from_slice(&run(home.path(), &["fingerprint", "--seed", "writer-seed"]).stdout).unwrap();
    assert_eq!(record["fingerprint"]["value"], fp["value"]);
}

#[test]
fn cli_show_missing_identity_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["show", "ghost"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn cli_providers_offline_fallback() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["providers", "--provider", "openai"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("gpt-4o"), "got: {out}");
}

#[test]
fn cli_crew_binds_yaml() {
    let home = tempfile::tempdir().unwrap();
    let agents = home.path().join("agents.yaml");
    let tasks = home.path().join("tasks.yaml");
    std::fs::write(&agents, "writer:\n  role: Writer\n  goal: Write\n  backstory: Prolific\n").unwrap();
    std::fs::write(
        &tasks,
        "draft:\n  description: Draft\n  expected_output: Text\n  agent: writer\n",
    )
    .unwrap();

    let output = run(
        home.path(),
        &[
            "crew",
            "--agents",
            agents.to_str().unwrap(),
            "--tasks",
            tasks.to_str().unwrap(),
            "--process",
            "hierarchical",
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let out = stdout(&output);
    assert!(out.contains("Crew (hierarchical)"));
    assert!(out.contains("-> writer"));
}

#[test]
fn cli_knowledge_ingests_local_file() {
    let home = tempfile::tempdir().unwrap();
    let docs = home.path().join("docs");
    std::fs::create_dir_all(&docs).unwrap();
    std::fs::write(docs.join("guide.md"), "# Guide\n\nStep one.\n\nStep two.\n").unwrap();

    let output = acrew(home.path())
        .env("ACREW_KNOWLEDGE_DIR", &docs)
        .args(["knowledge", "guide.md"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("2 chunk(s)"));

    let stored = std::fs::read_dir(home.path().join("knowledge")).unwrap().count();
    assert_eq!(stored, 2);
}

#[test]
fn cli_knowledge_missing_file_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = acrew(home.path())
        .env("ACREW_KNOWLEDGE_DIR", home.path())
        .args(["knowledge", "nope.md"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
}
