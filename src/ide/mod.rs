//! IDE features: high-level APIs for editor integrations.
//!
//! This module provides the interface between the symbol index (HIR) and
//! whatever editor protocol sits on top. Each function corresponds to one
//! editor request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take an index in, return data out
//! 2. **No protocol types**: Uses our own types, converted at the boundary
//! 3. **Explicit caching**: Snapshots live in a [`SnapshotCache`] owned by
//!    the caller, never in global state
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```
//! use llir::base::{DocumentId, LineCol};
//! use llir::ide::AnalysisHost;
//!
//! let mut host = AnalysisHost::new();
//! let doc = DocumentId::new("test.ll");
//! host.set_document(doc.clone(), "define void @f() {\n  ret void\n}\n", 1);
//!
//! let analysis = host.analysis(&doc).unwrap();
//! let symbols = analysis.document_symbols();
//! assert_eq!(symbols[0].name, "@f");
//! assert!(analysis.hover(LineCol::new(0, 13)).is_some());
//! ```

mod analysis;
mod cache;
mod folding;
mod goto;
mod hover;
mod position;
mod references;
mod symbols;

pub use analysis::{Analysis, AnalysisHost};
pub use cache::SnapshotCache;
pub use folding::{FoldingRange, folding_ranges};
pub use goto::{GotoTarget, goto_definition};
pub use hover::{HoverResult, hover};
pub use position::occurrence_at;
pub use references::find_references;
pub use symbols::{SymbolInfo, document_symbols};
