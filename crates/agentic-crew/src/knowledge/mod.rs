//! Knowledge ingestion: turning files and URLs into text chunks.
//!
//! Sources are validated (`paths`), converted into structured documents
//! by a `DocumentConverter` (`document`), split by a `Chunker`
//! (`chunker`), and finally handed to a `KnowledgeStorage`.
//! `DocumentSource` wires these together.

pub mod chunker;
pub mod document;
pub mod document_source;
pub mod paths;
pub mod source;

pub use chunker::{Chunk, Chunker, HierarchicalChunker};
pub use document::{DocItem, Document, DocumentConverter, TextConverter};
pub use document_source::{DocumentSource, DocumentSourceBuilder};
pub use paths::{process_file_paths, validate_url, PathInput, SourcePath};
pub use source::KnowledgeSource;
