//! Storage layer for identity configs and knowledge chunks.
//!
//! # Directory layout
//!
//! By convention the default root is `~/.agentic-crew/`, with
//! sub-directories created by each store:
//!
//! ```text
//! ~/.agentic-crew/
//! ├── identity/
//! │   ├── default.json
//! │   └── {name}.json
//! ├── knowledge/
//! │   └── {chunk_hash}.json
//! └── provider_cache.json
//! ```
//!
//! # Modules
//!
//! - [`config_file`]: identity config save/load.
//! - [`chunk_store`]: `KnowledgeStorage` trait plus memory and file backends.

pub mod chunk_store;
pub mod config_file;

pub use chunk_store::{ChunkStore, KnowledgeStorage, MemoryStorage, StoredChunk};
pub use config_file::{load_config, save_config, write_atomic, ConfigFile};
