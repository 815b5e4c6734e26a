//! Document persistence.
//!
//! Each document is written to a dot-prefixed temp file next to its target and
//! renamed into place, so an interrupted run never leaves a half-written page.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use stepdoc_shared::{Document, Result, StepdocError};

/// Write every document under `out_dir`, returning the written paths in order.
#[instrument(skip_all, fields(out_dir = %out_dir.display(), count = documents.len()))]
pub fn write_documents(out_dir: &Path, documents: &[Document]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir).map_err(|e| StepdocError::io(out_dir, e))?;

    let mut written = Vec::with_capacity(documents.len());
    for doc in documents {
        written.push(write_document(out_dir, doc)?);
    }

    info!(count = written.len(), "documents written");
    Ok(written)
}

/// Write a single document atomically.
fn write_document(out_dir: &Path, doc: &Document) -> Result<PathBuf> {
    let target = out_dir.join(&doc.filename);

    // Step ids may contain separators; the page then lands in a subdirectory.
    let parent = target.parent().unwrap_or(out_dir);
    std::fs::create_dir_all(parent).map_err(|e| StepdocError::io(parent, e))?;

    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| doc.filename.clone());
    let temp = parent.join(format!(".{file_name}.tmp"));

    std::fs::write(&temp, &doc.content).map_err(|e| StepdocError::io(&temp, e))?;
    std::fs::rename(&temp, &target).map_err(|e| StepdocError::io(&target, e))?;

    debug!(path = %target.display(), size = doc.content.len(), "wrote document");
    Ok(target)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
