//! Keys identifying a definition within one document's index.

use std::fmt;

use smol_str::SmolStr;

use super::symbols::SymbolKind;

/// Composite key a [`SymbolDefinition`](super::SymbolDefinition) is stored
/// under.
///
/// Local values and labels are qualified by their enclosing function;
/// every other kind is module-global and keyed by kind and name only. Two
/// definitions that map to the same key collide, and the later one wins.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SymbolKey {
    pub kind: SymbolKind,
    pub name: SmolStr,
    pub function: Option<SmolStr>,
}

impl SymbolKey {
    /// Build a key, dropping `function` for kinds that are not function
    /// scoped.
    pub fn new(kind: SymbolKind, name: impl Into<SmolStr>, function: Option<&str>) -> Self {
        let function = if kind.is_function_scoped() {
            function.map(SmolStr::new)
        } else {
            None
        };
        Self {
            kind,
            name: name.into(),
            function,
        }
    }

    /// A key with no function qualification.
    pub fn unscoped(kind: SymbolKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            function: None,
        }
    }
}

impl fmt::Debug for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function {
            Some(function) => write!(f, "{:?}({}::{})", self.kind, function, self.name),
            None => write!(f, "{:?}({})", self.kind, self.name),
        }
    }
}
