//! Structured documents and the converters that produce them.
//!
//! Format conversion is a collaborator concern: anything implementing
//! `DocumentConverter` can feed a `DocumentSource`. The bundled
//! `TextConverter` only understands markdown and plain text.

use std::path::Path;
use std::time::Duration;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::error::{CrewError, Result};
use crate::knowledge::paths::SourcePath;

/// One block of a structured document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocItem {
    Heading { level: u8, text: String },
    Paragraph(String),
}

/// A converted document: a flat list of headings and paragraphs in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Where the document came from (path or URL).
    pub origin: String,
    pub items: Vec<DocItem>,
}

impl Document {
    /// Build a document from markdown text.
    ///
    /// Headings keep their level. Paragraphs, list items, and code blocks
    /// become paragraphs; soft and hard breaks collapse to a space outside
    /// code blocks.
    pub fn from_markdown(origin: impl Into<String>, text: &str) -> Self {
        let mut builder = ItemBuilder::default();

        for event in Parser::new_ext(text, Options::empty()) {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    builder.flush();
                    builder.open = Some(Block::Heading(level as u8));
                }
                Event::Start(Tag::CodeBlock(_)) => {
                    builder.flush();
                    builder.open = Some(Block::Code);
                }
                Event::Start(Tag::Item) => {
                    builder.flush();
                    builder.open = Some(Block::Paragraph);
                }
                Event::Start(Tag::Paragraph) => {
                    if builder.open.is_none() {
                        builder.open = Some(Block::Paragraph);
                    }
                }
                Event::End(
                    TagEnd::Heading(_) | TagEnd::Paragraph | TagEnd::Item | TagEnd::CodeBlock,
                ) => builder.flush(),
                Event::Text(t) | Event::Code(t) => builder.push(&t),
                Event::SoftBreak | Event::HardBreak => {
                    if builder.open == Some(Block::Code) {
                        builder.push("\n");
                    } else {
                        builder.push(" ");
                    }
                }
                _ => {}
            }
        }
        builder.flush();

        Self {
            origin: origin.into(),
            items: builder.items,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Heading(u8),
    Paragraph,
    Code,
}

/// Accumulates inline text for the block currently open.
#[derive(Default)]
struct ItemBuilder {
    open: Option<Block>,
    buf: String,
    items: Vec<DocItem>,
}

impl ItemBuilder {
    fn push(&mut self, text: &str) {
        if self.open.is_none() {
            self.open = Some(Block::Paragraph);
        }
        self.buf.push_str(text);
    }

    fn flush(&mut self) {
        let text = self.buf.trim().to_string();
        self.buf.clear();
        let Some(block) = self.open.take() else {
            return;
        };
        if text.is_empty() {
            return;
        }
        self.items.push(match block {
            Block::Heading(level) => DocItem::Heading { level, text },
            Block::Paragraph | Block::Code => DocItem::Paragraph(text),
        });
    }
}

/// Converts validated sources into structured documents.
pub trait DocumentConverter {
    /// Convert every source, in order.
    ///
    /// # Errors
    ///
    /// Implementations return `CrewError::Conversion` (or `Io`) on failure.
    fn convert_all(&self, sources: &[SourcePath]) -> Result<Vec<Document>>;
}

/// File extensions accepted by `TextConverter`.
pub const TEXT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Converter for markdown and plain-text sources.
///
/// Local files are read from disk; URLs are fetched with a blocking HTTP
/// client and their body treated as markdown.
pub struct TextConverter {
    client: reqwest::blocking::Client,
}

impl TextConverter {
    /// Create a converter whose HTTP fetches time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `CrewError::Conversion` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CrewError::Conversion(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn convert_local(&self, path: &Path) -> Result<Document> {
        let supported = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !supported {
            return Err(CrewError::Conversion(format!(
                "unsupported format: {}",
                path.display()
            )));
        }

        let text = std::fs::read_to_string(path)?;
        Ok(Document::from_markdown(path.display().to_string(), &text))
    }

    fn convert_url(&self, url: &url::Url) -> Result<Document> {
        let text = self
            .client
            .get(url.as_str())
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|e| CrewError::Conversion(format!("failed to fetch {url}: {e}")))?;
        Ok(Document::from_markdown(url.as_str(), &text))
    }
}

impl DocumentConverter for TextConverter {
    fn convert_all(&self, sources: &[SourcePath]) -> Result<Vec<Document>> {
        sources
            .iter()
            .map(|source| match source {
                SourcePath::Local(path) => self.convert_local(path),
                SourcePath::Url(url) => self.convert_url(url),
            })
            .collect()
    }
}
