//! # llir-base
//!
//! Symbol indexing for LLVM textual IR (`.ll`): definitions, references,
//! outline and hover.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → Editor queries (goto, references, hover, outline, folding)
//!   ↓       and the AnalysisHost that caches index snapshots
//! hir     → Function scopes, symbol extraction, SymbolIndex, resolution
//!   ↓
//! syntax  → Line lexer and comment stripping
//!   ↓
//! base    → Primitives (DocumentId, LineCol, Span)
//! ```
//!
//! `project` sits beside `ide` and loads files from disk into a host.
//!
//! The scanner is not a verifier: lines it does not recognize contribute
//! nothing and raise no error.

/// Foundation types: DocumentId, LineCol, Span
pub mod base;

/// Symbol model, scope detection and the per-document index
pub mod hir;

/// IDE features: hover, goto-definition, find-references, outline
pub mod ide;

/// Workspace loading from disk
pub mod project;

/// Line-level lexer shared by every extractor
pub mod syntax;

// Re-export the common entry points
pub use base::{DocumentId, LineCol, Span};
pub use hir::{Occurrence, SymbolDefinition, SymbolIndex, SymbolKind, build_index};
pub use ide::{Analysis, AnalysisHost};
