//! Foundation types for the llir toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`DocumentId`] - Identity of an open or loaded `.ll` document
//! - [`LineCol`] - 0-indexed line/column positions
//! - [`Span`] - Line/column ranges within one document
//!
//! This module has NO dependencies on other llir modules.

mod document_id;
mod span;

pub use document_id::DocumentId;
pub use span::{LineCol, Span};
