//! The knowledge source abstraction.

use crate::error::Result;

/// Anything that can produce text chunks for a knowledge store.
pub trait KnowledgeSource {
    /// Chunk the loaded content and hand the chunks to storage.
    fn add(&mut self) -> Result<()>;

    /// Chunks produced so far.
    fn chunks(&self) -> &[String];
}
