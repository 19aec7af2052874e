//! Options controlling how an index is built.

/// What to do with a function whose braces never balance before the end
/// of the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScopePolicy {
    /// Close the scope on the last line of input. Locals and labels typed
    /// so far stay scoped to the function, which is what an editor wants
    /// while the body is still being written.
    #[default]
    CloseAtEof,
    /// Drop the scope. The header still defines the function (on its
    /// header line alone) but the lines after it are treated as module
    /// level.
    Discard,
}

/// Index construction options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndexOptions {
    pub scope_policy: ScopePolicy,
}

impl IndexOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for unterminated function bodies.
    pub fn with_scope_policy(mut self, policy: ScopePolicy) -> Self {
        self.scope_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_closes_at_eof() {
        assert_eq!(IndexOptions::default().scope_policy, ScopePolicy::CloseAtEof);
    }

    #[test]
    fn test_with_scope_policy() {
        let options = IndexOptions::new().with_scope_policy(ScopePolicy::Discard);
        assert_eq!(options.scope_policy, ScopePolicy::Discard);
    }
}
