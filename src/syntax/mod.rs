//! Line-level syntax for LLVM textual IR.
//!
//! Nothing here builds a tree: the indexer works line by line, and every
//! consumer (definition extractor, reference extractor, position resolver)
//! tokenizes through the same [`TokenKind`] so they agree on what an
//! identifier is.

mod lexer;
mod line;

pub use lexer::{Token, TokenKind, tokenize};
pub use line::{IrLine, is_blank_or_comment, strip_comment};
