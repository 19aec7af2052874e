use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};
use walkdir::WalkDir;

use super::error::LoadError;
use crate::base::DocumentId;
use crate::hir::{IndexOptions, SymbolIndex, Version, build_index_with};
use crate::ide::AnalysisHost;

/// Version assigned to documents read from disk.
pub const DISK_VERSION: Version = 0;

/// File extension of textual LLVM IR.
pub const IR_EXTENSION: &str = "ll";

/// Loads `.ll` files from disk into an [`AnalysisHost`].
///
/// Each file's document id is its path.
pub struct WorkspaceLoader;

impl WorkspaceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Loads every `.ll` file under `path`, recursively.
    ///
    /// Files are read and indexed in parallel, then published to the host
    /// in path order. Files that fail to load are skipped and reported
    /// together in a [`LoadError::Batch`]; the others stay loaded.
    /// Returns the number of files loaded.
    pub fn load_directory_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<usize, LoadError> {
        let path = path.into();
        if !path.is_dir() {
            return Err(LoadError::DirectoryNotFound { path });
        }

        let mut errors = Vec::new();
        let mut paths = Vec::new();
        for entry in WalkDir::new(&path).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_ir_file(entry.path()) => {
                    paths.push(entry.into_path());
                }
                Ok(_) => {}
                Err(err) => errors.push(LoadError::Walk(err)),
            }
        }

        let options = host.cache().options().clone();
        let results: Vec<_> = paths
            .par_iter()
            .map(|path| load_and_index(path, &options))
            .collect();

        let mut loaded = 0;
        for result in results {
            match result {
                Ok((id, text, index)) => {
                    host.set_indexed_document(id, text, index);
                    loaded += 1;
                }
                Err(err) => errors.push(err),
            }
        }

        for err in &errors {
            warn!("{}", err);
        }
        info!(
            "Loaded {} .{} file(s) from {} ({} failed)",
            loaded,
            IR_EXTENSION,
            path.display(),
            errors.len()
        );

        if errors.is_empty() {
            Ok(loaded)
        } else {
            Err(LoadError::Batch { errors })
        }
    }

    /// Loads a single file into an AnalysisHost.
    pub fn load_file_into_host<P: Into<PathBuf>>(
        &self,
        path: P,
        host: &mut AnalysisHost,
    ) -> Result<DocumentId, LoadError> {
        let path = path.into();
        let options = host.cache().options().clone();
        let (id, text, index) = load_and_index(&path, &options)?;
        host.set_indexed_document(id.clone(), text, index);
        Ok(id)
    }
}

impl Default for WorkspaceLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ir_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == IR_EXTENSION)
}

fn load_and_index(
    path: &Path,
    options: &IndexOptions,
) -> Result<(DocumentId, Arc<str>, Arc<SymbolIndex>), LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let index = build_index_with(&text, DISK_VERSION, options);
    Ok((DocumentId::from_path(path), Arc::from(text), Arc::new(index)))
}
