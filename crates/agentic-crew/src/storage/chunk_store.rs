//! Knowledge chunk persistence.
//!
//! Knowledge sources hand their text chunks to a `KnowledgeStorage`.
//! Chunks are keyed by the blake3 hash of their text, so saving the same
//! chunk twice stores it once.
//!
//! File format for `ChunkStore` (one file per chunk, `{id}.json`):
//! ```json
//! {
//!     "version": 1,
//!     "chunk": { "id": "...", "text": "...", "stored_at": "..." }
//! }
//! ```

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CrewError, Result};

// ── File format constants ─────────────────────────────────────────────────────

const CHUNK_FILE_VERSION: u32 = 1;

/// A stored knowledge chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChunk {
    /// Hex blake3 hash of `text`.
    pub id: String,
    pub text: String,
    pub stored_at: DateTime<Utc>,
}

impl StoredChunk {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: chunk_id(&text),
            text,
            stored_at: crate::time::now(),
        }
    }
}

/// Content-derived chunk identifier.
pub fn chunk_id(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Destination for chunks produced by a knowledge source.
pub trait KnowledgeStorage {
    /// Persist `chunks`. Chunks already present are left untouched.
    fn save(&mut self, chunks: &[String]) -> Result<()>;

    /// Number of distinct chunks held.
    fn count(&self) -> Result<usize>;
}

// ── MemoryStorage ─────────────────────────────────────────────────────────────

/// In-memory storage, mainly for tests and one-shot ingestion.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    chunks: Vec<StoredChunk>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks(&self) -> &[StoredChunk] {
        &self.chunks
    }
}

impl KnowledgeStorage for MemoryStorage {
    fn save(&mut self, chunks: &[String]) -> Result<()> {
        for text in chunks {
            let id = chunk_id(text);
            if !self.chunks.iter().any(|c| c.id == id) {
                self.chunks.push(StoredChunk::new(text.clone()));
            }
        }
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.chunks.len())
    }
}

// ── ChunkStore ────────────────────────────────────────────────────────────────

/// Wrapper written to disk for each chunk.
#[derive(Debug, Serialize, Deserialize)]
struct ChunkFile {
    version: u32,
    chunk: StoredChunk,
}

/// Filesystem-backed chunk store.
///
/// The store is safe for single-process use; concurrent writes from
/// multiple processes are not coordinated.
pub struct ChunkStore {
    base_dir: PathBuf,
}

impl ChunkStore {
    /// Create a new `ChunkStore` rooted at `base_dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `CrewError::Io` if the directory cannot be created.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Load a chunk by its ID.
    ///
    /// # Errors
    ///
    /// Returns `CrewError::StorageError` if no chunk exists for `id`, or
    /// `CrewError::InvalidFileFormat` if the file cannot be parsed.
    pub fn load(&self, id: &str) -> Result<StoredChunk> {
        let path = self.chunk_path(id);
        if !path.exists() {
            return Err(CrewError::StorageError(format!("chunk not found: {id}")));
        }

        let bytes = std::fs::read(&path)?;
        let file: ChunkFile = serde_json::from_slice(&bytes).map_err(|e| {
            CrewError::InvalidFileFormat(format!(
                "failed to parse chunk file {}: {e}",
                path.display()
            ))
        })?;

        Ok(file.chunk)
    }

    /// List the IDs of all stored chunks, in no particular order.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if let Some(stem) = name.to_string_lossy().strip_suffix(".json") {
                ids.push(stem.to_string());
            }
        }
        Ok(ids)
    }

    fn chunk_path(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{id}.json"))
    }
}

impl KnowledgeStorage for ChunkStore {
    fn save(&mut self, chunks: &[String]) -> Result<()> {
        for text in chunks {
            let chunk = StoredChunk::new(text.clone());
            let path = self.chunk_path(&chunk.id);
            if path.exists() {
                continue;
            }

            let file = ChunkFile {
                version: CHUNK_FILE_VERSION,
                chunk,
            };
            let json = serde_json::to_string_pretty(&file)
                .map_err(|e| CrewError::SerializationError(e.to_string()))?;
            crate::storage::write_atomic(&path, json.as_bytes())?;
        }
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }
}
