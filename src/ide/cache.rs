//! Per-document index snapshots keyed by version.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::base::DocumentId;
use crate::hir::{IndexOptions, SymbolIndex, Version, build_index_with};

/// Memoizes one [`SymbolIndex`] per document.
///
/// An entry is reused only while the caller asks for the same version;
/// any other version rebuilds and replaces it. Readers get an `Arc` to a
/// finished index, and an entry is only swapped in after its index is
/// fully built, so a concurrent reader sees the old snapshot or the new
/// one, never a partial one.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    options: IndexOptions,
    entries: RwLock<FxHashMap<DocumentId, (Version, Arc<SymbolIndex>)>>,
}

impl SnapshotCache {
    /// Create a new empty cache with default index options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty cache that builds indices with `options`.
    pub fn with_options(options: IndexOptions) -> Self {
        Self {
            options,
            entries: RwLock::default(),
        }
    }

    pub fn options(&self) -> &IndexOptions {
        &self.options
    }

    /// Return the index for `(document, version)`, building it from `text`
    /// unless the cached entry already has that version.
    pub fn get_or_build(&self, document: &DocumentId, text: &str, version: Version) -> Arc<SymbolIndex> {
        // Fast path: read lock
        if let Some(index) = self.get(document, version) {
            debug!("[CACHE] hit {} v{}", document, version);
            return index;
        }

        debug!("[CACHE] miss {} v{}", document, version);
        let index = Arc::new(build_index_with(text, version, &self.options));

        let mut entries = self.entries.write();
        // Double-check: another caller may have published this version meanwhile.
        if let Some((cached, existing)) = entries.get(document) {
            if *cached == version {
                return Arc::clone(existing);
            }
        }
        entries.insert(document.clone(), (version, Arc::clone(&index)));
        index
    }

    /// Publish an index built elsewhere, replacing any entry for `document`.
    pub fn insert(&self, document: DocumentId, index: Arc<SymbolIndex>) {
        let version = index.version();
        self.entries.write().insert(document, (version, index));
    }

    /// The cached index for `document`, if it was built for `version`.
    pub fn get(&self, document: &DocumentId, version: Version) -> Option<Arc<SymbolIndex>> {
        let entries = self.entries.read();
        entries
            .get(document)
            .filter(|(cached, _)| *cached == version)
            .map(|(_, index)| Arc::clone(index))
    }

    /// Drop the entry for `document`. Returns whether one existed.
    pub fn invalidate(&self, document: &DocumentId) -> bool {
        let removed = self.entries.write().remove(document).is_some();
        debug!("[CACHE] invalidate {} (present: {})", document, removed);
        removed
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        let mut entries = self.entries.write();
        debug!("[CACHE] invalidate all ({} entries)", entries.len());
        entries.clear();
    }

    pub fn contains(&self, document: &DocumentId) -> bool {
        self.entries.read().contains_key(document)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
