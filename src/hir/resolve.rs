//! Symbol index and name resolution.
//!
//! # Architecture
//!
//! 1. **Scope detection** - one pass over the lines finds function bodies
//! 2. **Extraction** - definitions and references are pulled from each line,
//!    tagged with the enclosing function where the kind is function scoped
//! 3. **Query-time resolution** - an occurrence is resolved through
//!    [`RESOLUTION_ORDER`], a fixed list of key lookups
//!
//! ## Ambiguous `%` names
//!
//! A `%name` token can be a local value, a named type, or (through the
//! `label %name` convention) a basic block. The index does not decide at
//! extraction time; the lookup chain tries each reading in turn.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use tracing::{debug, trace};

use super::extract::{extract_definitions, extract_references, scan_lines};
use super::ids::SymbolKey;
use super::options::IndexOptions;
use super::scopes::{detect_function_scopes, enclosing_scope};
use super::symbols::{FunctionScope, Occurrence, SymbolDefinition, SymbolKind, SymbolReference};
use crate::base::Span;

/// Document version as reported by the editor. Only equality matters.
pub type Version = i32;

// ============================================================================
// SYMBOL INDEX
// ============================================================================

/// All symbols of one document snapshot.
///
/// Built in one go by [`build_index`] and never mutated afterwards; a new
/// snapshot replaces it on edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolIndex {
    version: Version,
    /// Definitions by key, in first-insertion order. A colliding insert
    /// replaces the value and keeps the original position.
    definitions: IndexMap<SymbolKey, SymbolDefinition, FxBuildHasher>,
    /// Every occurrence, in source order.
    references: Vec<SymbolReference>,
    /// Function bodies, in source order.
    scopes: Vec<FunctionScope>,
}

impl SymbolIndex {
    /// Create a new empty index.
    pub fn new(version: Version) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Store a definition under its key; the last write for a key wins.
    ///
    /// A `Function` is stored twice, under its own key and under the
    /// `GlobalValue` key of the same name, because uses of a function go
    /// through its `@name`.
    pub fn insert_definition(&mut self, def: SymbolDefinition) {
        if def.kind == SymbolKind::Function {
            let global = SymbolKey::unscoped(SymbolKind::GlobalValue, def.name.clone());
            self.definitions.insert(global, def.clone());
        }
        let key = SymbolKey::new(def.kind, def.name.clone(), def.function_name.as_deref());
        self.definitions.insert(key, def);
    }

    pub fn push_reference(&mut self, reference: SymbolReference) {
        self.references.push(reference);
    }

    /// The document version this index was built from.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Look up a definition by exact key.
    pub fn definition(&self, key: &SymbolKey) -> Option<&SymbolDefinition> {
        self.definitions.get(key)
    }

    /// All stored definitions with their keys, in insertion order.
    ///
    /// Functions show up twice (see [`insert_definition`](Self::insert_definition)).
    pub fn definitions(&self) -> impl Iterator<Item = (&SymbolKey, &SymbolDefinition)> {
        self.definitions.iter()
    }

    /// All occurrences, in source order.
    pub fn references(&self) -> &[SymbolReference] {
        &self.references
    }

    /// Function bodies, in source order.
    pub fn function_scopes(&self) -> &[FunctionScope] {
        &self.scopes
    }

    /// The function whose body contains `line`.
    pub fn enclosing_function(&self, line: u32) -> Option<&FunctionScope> {
        enclosing_scope(&self.scopes, line)
    }

    /// Number of stored definition keys.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the index holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Resolve an occurrence to its definition.
    pub fn find_definition(&self, occurrence: &Occurrence) -> Option<&SymbolDefinition> {
        self.resolve(occurrence).map(|resolution| resolution.definition)
    }

    /// Resolve an occurrence, reporting which strategy matched.
    pub fn resolve(&self, occurrence: &Occurrence) -> Option<Resolution<'_>> {
        for strategy in RESOLUTION_ORDER {
            let Some(key) = strategy.key_for(occurrence) else {
                continue;
            };
            trace!("[RESOLVE] {:?} for {} tries {:?}", strategy, occurrence.name, key);
            if let Some(definition) = self.definitions.get(&key) {
                return Some(Resolution { definition, strategy });
            }
        }
        trace!("[RESOLVE] no definition for {:?} {}", occurrence.kind, occurrence.name);
        None
    }

    /// Spans of every use of `def`, in document order.
    ///
    /// Function-scoped definitions only match occurrences in the same
    /// function. The definition's own name token is never reported as a
    /// use; with `include_declaration` it comes first instead. For a label,
    /// plain `%name` occurrences in its function count as uses as well,
    /// unless they are the same text already reported through `label %name`.
    /// For a named type, `%name` occurrences anywhere count, except inside a
    /// function that defines a local value of the same name.
    pub fn references_to(&self, def: &SymbolDefinition, include_declaration: bool) -> Vec<Span> {
        let target_kind = def.kind.reference_kind();
        let scoped = def.kind.is_function_scoped();
        let same_function = |r: &SymbolReference| {
            if scoped {
                return r.function_name == def.function_name;
            }
            if def.kind != SymbolKind::NamedType {
                return true;
            }
            r.function_name.as_deref().is_none_or(|function| {
                let local = SymbolKey::new(SymbolKind::LocalValue, def.name.clone(), Some(function));
                !self.definitions.contains_key(&local)
            })
        };

        let mut uses: Vec<Span> = Vec::new();
        // (line, end column) of each reported label occurrence
        let mut label_sites: FxHashSet<(u32, u32)> = FxHashSet::default();

        for reference in self.references.iter().filter(|r| same_function(r)) {
            if reference.kind == target_kind
                && reference.name == def.name
                && reference.range != def.selection_range
            {
                uses.push(reference.range);
                if reference.kind == SymbolKind::Label {
                    label_sites.insert((reference.range.end.line, reference.range.end.col));
                }
            }
        }

        if def.kind == SymbolKind::Label {
            for reference in self.references.iter().filter(|r| same_function(r)) {
                let matches_label = reference.kind == SymbolKind::LocalValue
                    && strip_sigil(&reference.name) == def.name.as_str()
                    && !label_sites.contains(&(reference.range.end.line, reference.range.end.col));
                if matches_label {
                    uses.push(reference.range);
                }
            }
        }

        uses.sort();
        if include_declaration {
            uses.insert(0, def.selection_range);
        }
        uses
    }
}

fn strip_sigil(name: &str) -> &str {
    name.strip_prefix(['%', '@', '!', '#', '$']).unwrap_or(name)
}

// ============================================================================
// INDEX CONSTRUCTION
// ============================================================================

/// Build the index for one document snapshot with default options.
pub fn build_index(text: &str, version: Version) -> SymbolIndex {
    build_index_with(text, version, &IndexOptions::default())
}

/// Build the index for one document snapshot.
///
/// Pure: the result depends only on the arguments. Malformed lines
/// contribute nothing; nothing here fails.
pub fn build_index_with(text: &str, version: Version, options: &IndexOptions) -> SymbolIndex {
    let lines: Vec<&str> = text.lines().collect();
    let scopes = detect_function_scopes(&lines, options.scope_policy);
    let scanned = scan_lines(&lines);

    let mut index = SymbolIndex::new(version);
    for def in extract_definitions(&lines, &scanned, &scopes) {
        index.insert_definition(def);
    }
    for reference in extract_references(&scanned, &scopes) {
        index.push_reference(reference);
    }
    index.scopes = scopes;

    debug!(
        "built index v{}: {} lines, {} functions, {} definition keys, {} references",
        version,
        lines.len(),
        index.scopes.len(),
        index.definitions.len(),
        index.references.len()
    );

    index
}

// ============================================================================
// RESOLUTION CHAIN
// ============================================================================

/// One step of the definition lookup chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LookupStrategy {
    /// Local value or label, keyed by the occurrence's function.
    FunctionScoped,
    /// `(kind, name)` with no function qualification.
    Exact,
    /// A `%name` local occurrence read as a named type.
    LocalAsNamedType,
    /// A `%name` local occurrence read as a label in the same function.
    LocalAsLabel,
    /// An `@name` global occurrence read as a function.
    GlobalAsFunction,
}

/// The order in which lookups are attempted. The first hit wins.
pub const RESOLUTION_ORDER: [LookupStrategy; 5] = [
    LookupStrategy::FunctionScoped,
    LookupStrategy::Exact,
    LookupStrategy::LocalAsNamedType,
    LookupStrategy::LocalAsLabel,
    LookupStrategy::GlobalAsFunction,
];

impl LookupStrategy {
    /// The key this strategy looks up for `occurrence`, if it applies.
    pub fn key_for(self, occurrence: &Occurrence) -> Option<SymbolKey> {
        let kind = occurrence.kind;
        let name = occurrence.name.as_str();
        let function = occurrence.function_name.as_deref();
        let local_sigiled = kind == SymbolKind::LocalValue && name.starts_with('%');

        match self {
            LookupStrategy::FunctionScoped => {
                if kind.is_function_scoped() {
                    function.map(|f| SymbolKey::new(kind, name, Some(f)))
                } else {
                    None
                }
            }
            LookupStrategy::Exact => Some(SymbolKey::unscoped(kind, name)),
            LookupStrategy::LocalAsNamedType => {
                local_sigiled.then(|| SymbolKey::unscoped(SymbolKind::NamedType, name))
            }
            LookupStrategy::LocalAsLabel => {
                if local_sigiled {
                    function.map(|f| SymbolKey::new(SymbolKind::Label, &name[1..], Some(f)))
                } else {
                    None
                }
            }
            LookupStrategy::GlobalAsFunction => (kind == SymbolKind::GlobalValue)
                .then(|| SymbolKey::unscoped(SymbolKind::Function, name)),
        }
    }
}

/// A successful lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub definition: &'a SymbolDefinition,
    pub strategy: LookupStrategy,
}
