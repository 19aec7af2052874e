//! Loading `.ll` files from disk.
//!
//! Editors feed open buffers straight into an
//! [`AnalysisHost`](crate::ide::AnalysisHost); this module covers files
//! that are not open, such as the rest of a build directory.

mod error;
mod workspace_loader;

pub use error::LoadError;
pub use workspace_loader::{DISK_VERSION, IR_EXTENSION, WorkspaceLoader};
