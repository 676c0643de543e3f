//! Hierarchical chunking of structured documents.
//!
//! Each paragraph becomes one chunk; the chunk remembers the trail of
//! headings above it. Chunk iterators are lazy and single-pass.

use crate::knowledge::document::{DocItem, Document};

/// A chunk of text plus the heading trail it sits under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub headings: Vec<String>,
}

/// Splits a document into chunks.
pub trait Chunker {
    fn chunk<'a>(&self, doc: &'a Document) -> Box<dyn Iterator<Item = Chunk> + 'a>;
}

/// Paragraph-per-chunk chunker tracking heading levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchicalChunker;

impl HierarchicalChunker {
    pub fn new() -> Self {
        Self
    }
}

impl Chunker for HierarchicalChunker {
    fn chunk<'a>(&self, doc: &'a Document) -> Box<dyn Iterator<Item = Chunk> + 'a> {
        Box::new(HierarchicalChunks {
            items: doc.items.iter(),
            trail: Vec::new(),
        })
    }
}

/// Iterator returned by [`HierarchicalChunker`].
pub struct HierarchicalChunks<'a> {
    items: std::slice::Iter<'a, DocItem>,
    /// (level, text) of the enclosing headings, outermost first.
    trail: Vec<(u8, String)>,
}

impl Iterator for HierarchicalChunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        for item in self.items.by_ref() {
            match item {
                DocItem::Heading { level, text } => {
                    self.trail.retain(|(l, _)| l < level);
                    self.trail.push((*level, text.clone()));
                }
                DocItem::Paragraph(text) => {
                    return Some(Chunk {
                        text: text.clone(),
                        headings: self.trail.iter().map(|(_, t)| t.clone()).collect(),
                    });
                }
            }
        }
        None
    }
}
