//! Document-backed knowledge source.
//!
//! Building a `DocumentSource` validates its paths (failing fast) and then
//! converts them. Conversion failures are logged and leave the source with
//! no content rather than failing the owning component.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::knowledge::chunker::{Chunker, HierarchicalChunker};
use crate::knowledge::document::{Document, DocumentConverter, TextConverter};
use crate::knowledge::paths::{process_file_paths, PathInput, SourcePath};
use crate::knowledge::source::KnowledgeSource;
use crate::storage::KnowledgeStorage;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Builder for [`DocumentSource`].
pub struct DocumentSourceBuilder {
    knowledge_dir: PathBuf,
    file_paths: Vec<PathInput>,
    converter: Option<Box<dyn DocumentConverter>>,
    chunker: Box<dyn Chunker>,
    storage: Option<Box<dyn KnowledgeStorage>>,
}

impl DocumentSourceBuilder {
    /// Start a builder resolving relative paths against `knowledge_dir`.
    pub fn new(knowledge_dir: impl Into<PathBuf>) -> Self {
        Self {
            knowledge_dir: knowledge_dir.into(),
            file_paths: Vec::new(),
            converter: None,
            chunker: Box::new(HierarchicalChunker::new()),
            storage: None,
        }
    }

    /// Set the sources to ingest.
    pub fn file_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathInput>,
    {
        self.file_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Deprecated alias for [`file_paths`](Self::file_paths).
    #[deprecated(note = "use `file_paths` instead")]
    pub fn file_path<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathInput>,
    {
        log::warn!(
            "The 'file_path' attribute is deprecated and will be removed in a future version. Please use 'file_paths' instead."
        );
        self.file_paths(paths)
    }

    /// Use a custom converter instead of `TextConverter`.
    pub fn converter(mut self, converter: impl DocumentConverter + 'static) -> Self {
        self.converter = Some(Box::new(converter));
        self
    }

    pub fn chunker(mut self, chunker: impl Chunker + 'static) -> Self {
        self.chunker = Box::new(chunker);
        self
    }

    /// Attach storage that receives chunks on [`KnowledgeSource::add`].
    pub fn storage(mut self, storage: impl KnowledgeStorage + 'static) -> Self {
        self.storage = Some(Box::new(storage));
        self
    }

    /// Validate paths and load content.
    ///
    /// # Errors
    ///
    /// Returns `CrewError::FileNotFound` or `CrewError::InvalidUrl` if any
    /// path fails validation. Conversion errors do not fail the build.
    pub fn build(self) -> Result<DocumentSource> {
        let safe_file_paths = process_file_paths(&self.knowledge_dir, &self.file_paths)?;

        let converter: Box<dyn DocumentConverter> = match self.converter {
            Some(converter) => converter,
            None => Box::new(TextConverter::new(DEFAULT_FETCH_TIMEOUT)?),
        };

        let mut source = DocumentSource {
            safe_file_paths,
            content: Vec::new(),
            chunks: Vec::new(),
            converter,
            chunker: self.chunker,
            storage: self.storage,
        };
        source.content = source.load_content();
        Ok(source)
    }
}

/// Knowledge source reading documents through a converter.
pub struct DocumentSource {
    safe_file_paths: Vec<SourcePath>,
    content: Vec<Document>,
    chunks: Vec<String>,
    converter: Box<dyn DocumentConverter>,
    chunker: Box<dyn Chunker>,
    storage: Option<Box<dyn KnowledgeStorage>>,
}

impl DocumentSource {
    pub fn builder(knowledge_dir: impl Into<PathBuf>) -> DocumentSourceBuilder {
        DocumentSourceBuilder::new(knowledge_dir)
    }

    /// Validated sources, in input order.
    pub fn safe_file_paths(&self) -> &[SourcePath] {
        &self.safe_file_paths
    }

    /// Converted documents. Empty if conversion failed.
    pub fn content(&self) -> &[Document] {
        &self.content
    }

    /// Convert all sources, degrading to no content on failure.
    pub fn load_content(&self) -> Vec<Document> {
        match self.converter.convert_all(&self.safe_file_paths) {
            Ok(docs) => docs,
            Err(e) => {
                log::error!("Error loading content: {e}");
                Vec::new()
            }
        }
    }
}

impl KnowledgeSource for DocumentSource {
    fn add(&mut self) -> Result<()> {
        for doc in &self.content {
            self.chunks
                .extend(self.chunker.chunk(doc).map(|chunk| chunk.text));
        }

        if let Some(storage) = self.storage.as_mut() {
            storage.save(&self.chunks)?;
        }
        Ok(())
    }

    fn chunks(&self) -> &[String] {
        &self.chunks
    }
}
