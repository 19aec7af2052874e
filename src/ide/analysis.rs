//! AnalysisHost: owns document texts and the snapshot cache.
//!
//! ```text
//! AnalysisHost (mutable, one per editor session)
//!   ├── documents: DocumentId → (version, text)
//!   └── cache: SnapshotCache
//!         │
//!         ▼ host.analysis(&doc)
//! Analysis (immutable snapshot: text + Arc<SymbolIndex>)
//! ```
//!
//! Edits go through `set_document`; queries go through an [`Analysis`],
//! which keeps answering from its own snapshot even if the host moves on.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::cache::SnapshotCache;
use super::folding::{FoldingRange, folding_ranges};
use super::goto::{GotoTarget, goto_definition};
use super::hover::{HoverResult, hover};
use super::position::occurrence_at;
use super::references::find_references;
use super::symbols::{SymbolInfo, document_symbols};
use crate::base::{DocumentId, LineCol, Span};
use crate::hir::{IndexOptions, Occurrence, SymbolIndex, Version};

/// Owner of all open documents and their cached indices.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    documents: FxHashMap<DocumentId, (Version, Arc<str>)>,
    cache: SnapshotCache,
}

impl AnalysisHost {
    /// Create a new empty host with default index options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty host whose indices are built with `options`.
    pub fn with_options(options: IndexOptions) -> Self {
        Self {
            documents: FxHashMap::default(),
            cache: SnapshotCache::with_options(options),
        }
    }

    /// Record the latest text of a document.
    ///
    /// The index is built lazily on the next [`analysis`](Self::analysis)
    /// for this document.
    pub fn set_document(&mut self, document: impl Into<DocumentId>, text: impl Into<Arc<str>>, version: Version) {
        self.documents.insert(document.into(), (version, text.into()));
    }

    /// Record a document together with an index already built from `text`.
    pub fn set_indexed_document(&mut self, document: DocumentId, text: Arc<str>, index: Arc<SymbolIndex>) {
        self.documents.insert(document.clone(), (index.version(), text));
        self.cache.insert(document, index);
    }

    /// Forget a document and its cached index. Returns whether it was open.
    pub fn remove_document(&mut self, document: &DocumentId) -> bool {
        self.cache.invalidate(document);
        self.documents.remove(document).is_some()
    }

    /// Drop every cached index; texts are kept and reindexed on demand.
    pub fn invalidate_all(&mut self) {
        self.cache.invalidate_all();
    }

    pub fn contains(&self, document: &DocumentId) -> bool {
        self.documents.contains_key(document)
    }

    /// Ids of all known documents, in no particular order.
    pub fn documents(&self) -> impl Iterator<Item = &DocumentId> {
        self.documents.keys()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// A query snapshot of `document` at its latest version.
    pub fn analysis(&self, document: &DocumentId) -> Option<Analysis> {
        let (version, text) = self.documents.get(document)?;
        let index = self.cache.get_or_build(document, text, *version);
        Some(Analysis {
            document: document.clone(),
            text: Arc::clone(text),
            index,
        })
    }
}

/// Immutable view of one document snapshot.
#[derive(Clone, Debug)]
pub struct Analysis {
    document: DocumentId,
    text: Arc<str>,
    index: Arc<SymbolIndex>,
}

impl Analysis {
    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn version(&self) -> Version {
        self.index.version()
    }

    /// The symbol occurrence under `pos`.
    pub fn occurrence_at(&self, pos: LineCol) -> Option<Occurrence> {
        occurrence_at(&self.index, &self.text, pos)
    }

    /// Definition of the symbol under `pos`.
    pub fn goto_definition(&self, pos: LineCol) -> Option<GotoTarget> {
        goto_definition(&self.index, &self.occurrence_at(pos)?)
    }

    /// Uses of the symbol under `pos`, in document order.
    pub fn find_references(&self, pos: LineCol, include_declaration: bool) -> Vec<Span> {
        self.occurrence_at(pos)
            .map(|occ| find_references(&self.index, &occ, include_declaration))
            .unwrap_or_default()
    }

    pub fn hover(&self, pos: LineCol) -> Option<HoverResult> {
        hover(&self.index, &self.occurrence_at(pos)?)
    }

    pub fn document_symbols(&self) -> Vec<SymbolInfo> {
        document_symbols(&self.index)
    }

    pub fn folding_ranges(&self) -> Vec<FoldingRange> {
        folding_ranges(&self.index, &self.text)
    }
}
