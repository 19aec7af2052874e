//! Hover text for the symbol under the cursor.

use crate::base::Span;
use crate::hir::{Occurrence, SymbolDefinition, SymbolIndex};

/// Plain-text hover content. Markdown rendering is the caller's concern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    pub contents: String,
    /// The hovered occurrence.
    pub range: Span,
}

/// Describe the definition `occurrence` resolves to.
pub fn hover(index: &SymbolIndex, occurrence: &Occurrence) -> Option<HoverResult> {
    let def = index.find_definition(occurrence)?;
    Some(HoverResult {
        contents: describe(def),
        range: occurrence.range,
    })
}

fn describe(def: &SymbolDefinition) -> String {
    let kind = def.kind.display();
    let mut out = format!("{} {}", kind, def.name);
    let mut scope = None;
    if let Some(function) = &def.function_name {
        out.push_str(" in ");
        out.push_str(function);
        scope = Some(format!("{kind} in {function}"));
    }
    // Labels carry a synthesized `label in @f` detail the header already says.
    if let Some(detail) = def.detail.as_deref().filter(|d| scope.as_deref() != Some(*d)) {
        out.push('\n');
        out.push_str(detail);
    }
    out
}
