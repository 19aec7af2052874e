//! Find-references.

use crate::base::Span;
use crate::hir::{Occurrence, SymbolIndex};

/// Spans of every use of the symbol `occurrence` resolves to.
///
/// Resolves first, then collects uses of the definition found, so asking
/// from a use site and from the definition give the same answer. An
/// occurrence with no definition has no references.
pub fn find_references(index: &SymbolIndex, occurrence: &Occurrence, include_declaration: bool) -> Vec<Span> {
    match index.find_definition(occurrence) {
        Some(def) => index.references_to(def, include_declaration),
        None => Vec::new(),
    }
}
