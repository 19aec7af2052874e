//! Semantic model: symbols, function scopes and the per-document index.
//!
//! ## Pipeline
//!
//! ```text
//! text ─► scopes::detect_function_scopes ─► extract::{definitions, references}
//!                                             │
//!                                             ▼
//!                                   resolve::SymbolIndex  ◄── find_definition
//! ```
//!
//! Everything here is a pure function of one document's text.

mod extract;
mod ids;
mod options;
mod resolve;
mod scopes;
mod symbols;

pub use extract::{extract_definitions, extract_references};
pub use ids::SymbolKey;
pub use options::{IndexOptions, ScopePolicy};
pub use resolve::{
    LookupStrategy, RESOLUTION_ORDER, Resolution, SymbolIndex, Version, build_index,
    build_index_with,
};
pub use scopes::{detect_function_scopes, enclosing_scope};
pub use symbols::{FunctionScope, Occurrence, SymbolDefinition, SymbolKind, SymbolReference};
