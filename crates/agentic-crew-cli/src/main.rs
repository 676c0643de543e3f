//! AgenticCrew CLI: the `acrew` command.
//!
//! Manages saved identity configs, prints fingerprints, lists providers,
//! binds crew YAML, and ingests knowledge documents.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use agentic_crew::knowledge::KnowledgeSource;
use agentic_crew::provider;
use agentic_crew::storage::{load_config, save_config, ChunkStore};
use agentic_crew::time::to_display;
use agentic_crew::{
    DocumentSource, Fingerprint, IdentityConfig, Process, ProjectConfig, Settings,
};

// ── CLI structure ─────────────────────────────────────────────────────────────

/// AgenticCrew CLI: identities and configuration for AI agent crews.
#[derive(Parser, Debug)]
#[command(
    name = "acrew",
    about = "AgenticCrew CLI",
    version,
    long_about = "acrew: AgenticCrew CLI\n\nCreate and inspect component identities, list LLM providers,\nbind crew definitions from YAML, and ingest knowledge documents."
)]
struct Cli {
    /// Use specific identity (default: default)
    #[arg(long, global = true, default_value = "default")]
    identity: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create and save a new identity config
    Init {
        /// Name for the identity (default: value of --identity)
        #[arg(long)]
        name: Option<String>,

        /// Derive the fingerprint deterministically from this seed
        #[arg(long)]
        seed: Option<String>,
    },

    /// Show a saved identity config
    Show {
        /// Identity name (default: value of --identity)
        identity: Option<String>,
    },

    /// List saved identity configs
    List,

    /// Export an identity config as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a fingerprint record without saving it
    Fingerprint {
        /// Derive from this seed instead of generating randomly
        #[arg(long)]
        seed: Option<String>,
    },

    /// List LLM providers and their models
    Providers {
        /// Only show this provider
        #[arg(long)]
        provider: Option<String>,
    },

    /// Bind agents and tasks from YAML and print the crew
    Crew {
        /// Path to agents.yaml
        #[arg(long)]
        agents: PathBuf,

        /// Path to tasks.yaml
        #[arg(long)]
        tasks: PathBuf,

        /// Process: sequential or hierarchical
        #[arg(long, default_value = "sequential")]
        process: String,
    },

    /// Ingest documents into the chunk store
    Knowledge {
        /// Local files (relative to the knowledge dir) or http(s) URLs
        #[arg(required = true)]
        paths: Vec<String>,

        /// Chunk store directory (default: <home>/knowledge)
        #[arg(long)]
        store: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;
    let identity_name = cli.identity.clone();
    let settings = Settings::from_env();

    let result = match cli.command {
        Commands::Init { name, seed } => {
            let name = name.unwrap_or(identity_name);
            cmd_init(&settings, &name, seed.as_deref(), verbose)
        }
        Commands::Show { identity } => {
            let name = identity.unwrap_or(identity_name);
            cmd_show(&settings, &name, verbose)
        }
        Commands::List => cmd_list(&settings),
        Commands::Export { output } => cmd_export(&settings, &identity_name, output.as_deref()),
        Commands::Fingerprint { seed } => cmd_fingerprint(seed.as_deref()),
        Commands::Providers { provider } => cmd_providers(&settings, provider.as_deref(), verbose),
        Commands::Crew {
            agents,
            tasks,
            process,
        } => cmd_crew(&agents, &tasks, &process, verbose),
        Commands::Knowledge { paths, store } => {
            cmd_knowledge(&settings, paths, store.as_deref(), verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `acrew init [--name NAME] [--seed SEED]`
fn cmd_init(settings: &Settings, name: &str, seed: Option<&str>, verbose: bool) -> Result<()> {
    let path = settings.identity_path(name);

    if path.exists() {
        return Err(anyhow!(
            "identity '{}' already exists at {}",
            name,
            path.display()
        ));
    }

    let config = match seed {
        Some(seed) => IdentityConfig::from_seed(seed).context("invalid seed")?,
        None => IdentityConfig::new(),
    };

    save_config(&config, &path).context("failed to save identity config")?;

    println!("Created identity '{name}'");
    println!("  Fingerprint: {}", config.fingerprint());
    println!("  File:        {}", path.display());

    if verbose {
        println!("  Created:     {}", to_display(&config.fingerprint().created_at()));
    }

    Ok(())
}

fn read_identity(settings: &Settings, name: &str) -> Result<IdentityConfig> {
    let path = settings.identity_path(name);
    if !path.exists() {
        return Err(anyhow!(
            "identity '{}' not found (expected at {})",
            name,
            path.display()
        ));
    }
    load_config(&path).context("failed to read identity config")
}

/// `acrew show [NAME]`
fn cmd_show(settings: &Settings, name: &str, verbose: bool) -> Result<()> {
    let config = read_identity(settings, name)?;
    let fp = config.fingerprint();

    println!("Identity: {name}");
    println!("  Fingerprint: {fp}");
    println!("  Created:     {}", to_display(&fp.created_at()));

    if fp.metadata().is_empty() {
        println!("  Metadata:    none");
    } else {
        println!("  Metadata:");
        for (key, value) in fp.metadata() {
            println!("    {key}: {value}");
        }
    }

    if verbose {
        println!("  File:        {}", settings.identity_path(name).display());
    }

    Ok(())
}

/// `acrew list`
fn cmd_list(settings: &Settings) -> Result<()> {
    let dir = settings.identity_dir();

    if !dir.exists() {
        println!(
            "No identities found (directory {} does not exist)",
            dir.display()
        );
        return Ok(());
    }

    let mut entries: Vec<(String, PathBuf)> = std::fs::read_dir(&dir)
        .context("failed to read identity directory")?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let path = e.path();
            if path.extension().map(|x| x == "json").unwrap_or(false) {
                let stem = path.file_stem()?.to_string_lossy().into_owned();
                Some((stem, path))
            } else {
                None
            }
        })
        .collect();

    entries.sort_by(|a, b| a.0.cmp(&b.0));

    if entries.is_empty() {
        println!("No identities found in {}", dir.display());
        return Ok(());
    }

    println!("{:<20} {:<30} CREATED", "NAME", "FINGERPRINT");
    println!("{}", "-".repeat(76));

    for (name, path) in &entries {
        match load_config(path) {
            Ok(config) => {
                let fp = config.fingerprint();
                println!("{:<20} {:<30} {}", name, fp.value(), to_display(&fp.created_at()));
            }
            Err(e) => println!("{:<20} (failed to read: {e})", name),
        }
    }

    Ok(())
}

/// `acrew export [-o FILE]`
fn cmd_export(settings: &Settings, name: &str, output: Option<&Path>) -> Result<()> {
    let config = read_identity(settings, name)?;
    let json = serde_json::to_string_pretty(&config.to_record())
        .context("failed to serialize identity config")?;

    if let Some(out_path) = output {
        std::fs::write(out_path, &json)
            .with_context(|| format!("failed to write to {}", out_path.display()))?;
        println!("Exported identity '{}' to {}", name, out_path.display());
    } else {
        println!("{json}");
    }

    Ok(())
}

/// `acrew fingerprint [--seed SEED]`
fn cmd_fingerprint(seed: Option<&str>) -> Result<()> {
    let fp = match seed {
        Some(seed) => Fingerprint::from_seed(seed).context("invalid seed")?,
        None => Fingerprint::new(),
    };
    let json = serde_json::to_string_pretty(&fp.to_record())
        .context("failed to serialize fingerprint")?;
    println!("{json}");
    Ok(())
}

/// `acrew providers [--provider NAME]`
fn cmd_providers(settings: &Settings, only: Option<&str>, verbose: bool) -> Result<()> {
    let models = provider::get_provider_data(settings);
    log::debug!("provider catalog has {} provider(s)", models.len());

    let selected: Vec<(&String, &Vec<String>)> = match only {
        Some(name) => {
            let key = name.to_lowercase();
            let entry = models
                .get_key_value(&key)
                .ok_or_else(|| anyhow!("unknown provider '{name}'"))?;
            vec![entry]
        }
        None => models.iter().collect(),
    };

    for (name, list) in selected {
        println!("{name} ({} model(s))", list.len());
        if verbose || only.is_some() {
            for model in list {
                println!("  {model}");
            }
        }
    }

    Ok(())
}

/// `acrew crew --agents FILE --tasks FILE [--process P]`
fn cmd_crew(agents: &Path, tasks: &Path, process: &str, verbose: bool) -> Result<()> {
    let process: Process = process.parse()?;
    let project = ProjectConfig::from_files(agents, tasks).context("failed to load crew definition")?;
    let crew = project.build_crew(process, verbose)?;

    println!("Crew ({process})");
    println!("  Fingerprint: {}", crew.fingerprint());
    println!("  Agents:");
    for agent in crew.agents() {
        println!("    {:<20} {}  {}", agent.name, agent.fingerprint(), agent.role);
        if verbose {
            if let Some(llm) = &agent.llm {
                println!("      llm: {}", llm.model);
            }
            if let Some(llm) = &agent.function_calling_llm {
                println!("      function_calling_llm: {}", llm.model);
            }
        }
    }
    println!("  Tasks:");
    for task in crew.tasks() {
        let agent = task.agent.as_deref().unwrap_or("-");
        println!("    {:<20} {}  -> {agent}", task.name, task.fingerprint());
    }

    Ok(())
}

/// `acrew knowledge PATHS... [--store DIR]`
fn cmd_knowledge(
    settings: &Settings,
    paths: Vec<String>,
    store: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let store_dir = store
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.chunk_dir());
    let chunk_store = ChunkStore::new(&store_dir).context("failed to open chunk store")?;
    log::debug!("chunk store at {}", store_dir.display());

    let mut source = DocumentSource::builder(&settings.knowledge_dir)
        .file_paths(paths)
        .storage(chunk_store)
        .build()?;

    if verbose {
        for path in source.safe_file_paths() {
            println!("  source: {path}");
        }
    }

    source.add().context("failed to store chunks")?;

    println!(
        "Ingested {} document(s) into {} chunk(s) at {}",
        source.content().len(),
        source.chunks().len(),
        store_dir.display()
    );

    Ok(())
}
