//! Symbol records produced by the extractors.
//!
//! One record type per role (definition, reference, occurrence) rather than
//! one type per kind: `function_name` is only meaningful for
//! [`SymbolKind::LocalValue`] and [`SymbolKind::Label`], and
//! `function_range` only for [`SymbolKind::Function`]. Code that branches
//! on kind does so through exhaustive matches on [`SymbolKind`].

use smol_str::SmolStr;

use crate::base::Span;

/// The family a symbol belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    /// `%name` SSA value or parameter, scoped to one function.
    LocalValue,
    /// `@name` global variable, alias, ifunc or function.
    GlobalValue,
    /// Basic block `name:`, scoped to one function.
    Label,
    /// `%name = type ...`
    NamedType,
    /// `!name` or `!0`
    Metadata,
    /// `#0`
    AttributeGroup,
    /// `define`/`declare` of `@name`.
    Function,
    /// `$name = comdat ...`
    Comdat,
}

impl SymbolKind {
    /// Every kind, in declaration order.
    pub const ALL: [SymbolKind; 8] = [
        SymbolKind::LocalValue,
        SymbolKind::GlobalValue,
        SymbolKind::Label,
        SymbolKind::NamedType,
        SymbolKind::Metadata,
        SymbolKind::AttributeGroup,
        SymbolKind::Function,
        SymbolKind::Comdat,
    ];

    /// Whether symbols of this kind live inside one function.
    pub fn is_function_scoped(self) -> bool {
        match self {
            SymbolKind::LocalValue | SymbolKind::Label => true,
            SymbolKind::GlobalValue
            | SymbolKind::NamedType
            | SymbolKind::Metadata
            | SymbolKind::AttributeGroup
            | SymbolKind::Function
            | SymbolKind::Comdat => false,
        }
    }

    /// The kind that occurrences of a symbol of this kind are recorded as.
    ///
    /// Call sites address functions through the `@name` global sigil, so
    /// a function's uses are `GlobalValue` references. A named type is
    /// written with the local sigil, so its uses are `LocalValue` ones.
    pub fn reference_kind(self) -> SymbolKind {
        match self {
            SymbolKind::Function => SymbolKind::GlobalValue,
            SymbolKind::NamedType => SymbolKind::LocalValue,
            SymbolKind::LocalValue
            | SymbolKind::GlobalValue
            | SymbolKind::Label
            | SymbolKind::Metadata
            | SymbolKind::AttributeGroup
            | SymbolKind::Comdat => self,
        }
    }

    /// Get a display label for this kind.
    pub fn display(self) -> &'static str {
        match self {
            SymbolKind::LocalValue => "local value",
            SymbolKind::GlobalValue => "global value",
            SymbolKind::Label => "label",
            SymbolKind::NamedType => "named type",
            SymbolKind::Metadata => "metadata",
            SymbolKind::AttributeGroup => "attribute group",
            SymbolKind::Function => "function",
            SymbolKind::Comdat => "comdat",
        }
    }
}

/// Where a symbol is defined.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolDefinition {
    /// Sigil-inclusive name (`%x`, `@f`, `!0`, `#1`, `$c`); labels are bare.
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// The whole defining construct. For a function with a body this runs
    /// from the header line through the closing brace line.
    pub range: Span,
    /// The name token alone.
    pub selection_range: Span,
    /// Trimmed source line or a synthesized description.
    pub detail: Option<SmolStr>,
    /// Enclosing function, for `LocalValue` and `Label` only.
    pub function_name: Option<SmolStr>,
    /// Body span, for `Function` only.
    pub function_range: Option<Span>,
}

impl SymbolDefinition {
    /// A definition with no detail and no function context.
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind, range: Span, selection_range: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            selection_range,
            detail: None,
            function_name: None,
            function_range: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<SmolStr>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach the enclosing function. Ignored for kinds that are not
    /// function scoped.
    pub fn in_function(mut self, function: impl Into<SmolStr>) -> Self {
        if self.kind.is_function_scoped() {
            self.function_name = Some(function.into());
        }
        self
    }

    pub fn with_function_range(mut self, range: Span) -> Self {
        if self.kind == SymbolKind::Function {
            self.function_range = Some(range);
        }
        self
    }
}

/// One textual occurrence of a symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolReference {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// The identifier span; includes the sigil except for labels.
    pub range: Span,
    /// Enclosing function at the occurrence, for `LocalValue` and `Label`.
    pub function_name: Option<SmolStr>,
}

/// A function body's line extent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionScope {
    /// `@name` of the function.
    pub name: SmolStr,
    /// Header line (0-indexed).
    pub start_line: u32,
    /// Closing brace line (0-indexed, inclusive).
    pub end_line: u32,
    /// False when input ended before the body's braces balanced and the
    /// scope was closed at end of input instead.
    pub closed: bool,
}

impl FunctionScope {
    #[inline]
    pub fn contains_line(&self, line: u32) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// The symbol under a cursor, or any lookup request for one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occurrence {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub range: Span,
    /// Enclosing function, for `LocalValue` and `Label` occurrences.
    pub function_name: Option<SmolStr>,
}

impl From<&SymbolReference> for Occurrence {
    fn from(reference: &SymbolReference) -> Self {
        Self {
            name: reference.name.clone(),
            kind: reference.kind,
            range: reference.range,
            function_name: reference.function_name.clone(),
        }
    }
}

impl From<&SymbolDefinition> for Occurrence {
    fn from(def: &SymbolDefinition) -> Self {
        Self {
            name: def.name.clone(),
            kind: def.kind,
            range: def.selection_range,
            function_name: def.function_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_kind_is_function_scoped() {
        let scoped: Vec<_> = SymbolKind::ALL
            .into_iter()
            .filter(|k| k.is_function_scoped())
            .collect();
        assert_eq!(scoped, vec![SymbolKind::LocalValue, SymbolKind::Label]);
    }

    #[test]
    fn test_function_references_are_globals() {
        assert_eq!(SymbolKind::Function.reference_kind(), SymbolKind::GlobalValue);
        assert_eq!(SymbolKind::Label.reference_kind(), SymbolKind::Label);
        assert_eq!(SymbolKind::NamedType.reference_kind(), SymbolKind::LocalValue);
    }

    #[test]
    fn test_function_name_only_on_scoped_kinds() {
        let span = Span::on_line(0, 0, 2);
        let global = SymbolDefinition::new("@g", SymbolKind::GlobalValue, span, span).in_function("@f");
        let local = SymbolDefinition::new("%x", SymbolKind::LocalValue, span, span).in_function("@f");

        assert_eq!(global.function_name, None);
        assert_eq!(local.function_name.as_deref(), Some("@f"));
    }

    #[test]
    fn test_function_range_only_on_functions() {
        let span = Span::on_line(0, 0, 2);
        let global = SymbolDefinition::new("@g", SymbolKind::GlobalValue, span, span).with_function_range(span);
        assert_eq!(global.function_range, None);
    }
}
