//! Go-to-definition.

use crate::base::Span;
use crate::hir::{LookupStrategy, Occurrence, SymbolIndex, SymbolKind};
use smol_str::SmolStr;

/// Where an occurrence is defined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GotoTarget {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// The whole defining construct.
    pub range: Span,
    /// The name token, where the cursor should land.
    pub selection_range: Span,
    /// Which lookup matched.
    pub strategy: LookupStrategy,
}

/// Resolve `occurrence` to its definition site.
pub fn goto_definition(index: &SymbolIndex, occurrence: &Occurrence) -> Option<GotoTarget> {
    let resolution = index.resolve(occurrence)?;
    let def = resolution.definition;
    Some(GotoTarget {
        name: def.name.clone(),
        kind: def.kind,
        range: def.range,
        selection_range: def.selection_range,
        strategy: resolution.strategy,
    })
}
