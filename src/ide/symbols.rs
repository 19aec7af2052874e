//! Document outline.

use smol_str::SmolStr;

use crate::base::Span;
use crate::hir::{SymbolDefinition, SymbolIndex, SymbolKey, SymbolKind};

/// One outline entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub range: Span,
    pub selection_range: Span,
    pub detail: Option<SmolStr>,
}

impl From<&SymbolDefinition> for SymbolInfo {
    fn from(def: &SymbolDefinition) -> Self {
        Self {
            name: def.name.clone(),
            kind: def.kind,
            range: def.range,
            selection_range: def.selection_range,
            detail: def.detail.clone(),
        }
    }
}

/// Module-level symbols of a document, in document order.
///
/// Lists functions, globals, named types, named metadata and attribute
/// groups. Local values and labels never appear. A global that is also
/// keyed as a function is listed once, as the function, and numbered
/// metadata (`!0`) is left out.
pub fn document_symbols(index: &SymbolIndex) -> Vec<SymbolInfo> {
    let mut symbols: Vec<SymbolInfo> = index
        .definitions()
        .filter(|(key, _)| in_outline(index, key))
        .map(|(_, def)| SymbolInfo::from(def))
        .collect();

    symbols.sort_by_key(|s| s.selection_range);
    symbols
}

fn in_outline(index: &SymbolIndex, key: &SymbolKey) -> bool {
    match key.kind {
        SymbolKind::Function | SymbolKind::NamedType | SymbolKind::AttributeGroup => true,
        SymbolKind::GlobalValue => index
            .definition(&SymbolKey::unscoped(SymbolKind::Function, key.name.clone()))
            .is_none(),
        SymbolKind::Metadata => !is_numbered_metadata(&key.name),
        SymbolKind::LocalValue | SymbolKind::Label | SymbolKind::Comdat => false,
    }
}

fn is_numbered_metadata(name: &str) -> bool {
    name.strip_prefix('!')
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}
