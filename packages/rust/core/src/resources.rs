//! Read access to the files of a tutorial directory.
//!
//! Assembly only ever asks two questions of a directory: "give me the file
//! called X, if it exists" and "give me the first file matching P, if any".
//! [`ResourceSource`] captures exactly that, so the assemblers can run against
//! the real file system ([`FsResources`]) or an in-memory tree
//! ([`InMemoryResources`]).

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::trace;

use stepdoc_shared::{Result, StepdocError};

/// A resource that was found, with the path it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Directory joined with the file name; rendered verbatim in pages.
    pub path: PathBuf,
    /// Full text content.
    pub content: String,
}

/// Lookup of named resources inside a directory.
pub trait ResourceSource {
    /// Read `dir/name`. `Ok(None)` when it does not exist.
    fn read(&self, dir: &Path, name: &str) -> Result<Option<Resource>>;

    /// Read the first file in `dir` (alphabetical by name) whose name matches
    /// the glob `pattern`. `Ok(None)` when nothing matches.
    fn find_first(&self, dir: &Path, pattern: &str) -> Result<Option<Resource>>;
}

/// Wildcards never match a leading `.`, so hidden files are skipped.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

fn compile_pattern(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| StepdocError::Pattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// File system
// ---------------------------------------------------------------------------

/// Resources read from disk, relative to the working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsResources;

impl ResourceSource for FsResources {
    fn read(&self, dir: &Path, name: &str) -> Result<Option<Resource>> {
        let path = dir.join(name);
        if path.is_dir() {
            trace!(path = %path.display(), "directory in place of resource, treated as absent");
            return Ok(None);
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(Resource { path, content })),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %path.display(), "resource absent");
                Ok(None)
            }
            Err(e) => Err(StepdocError::io(&path, e)),
        }
    }

    fn find_first(&self, dir: &Path, pattern: &str) -> Result<Option<Resource>> {
        let pattern = compile_pattern(pattern)?;

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StepdocError::io(dir, e)),
        };

        // Directory listings are unordered; sort so the pick is stable.
        let mut names: Vec<String> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StepdocError::io(dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if pattern.matches_with(&name, MATCH_OPTIONS) && entry.path().is_file() {
                names.push(name);
            }
        }
        names.sort();

        match names.first() {
            Some(name) => self.read(dir, name),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// In memory
// ---------------------------------------------------------------------------

/// A fixed set of files keyed by path. Useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResources {
    files: BTreeMap<PathBuf, String>,
}

impl InMemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Remove a file, returning its content if it was present.
    pub fn remove(&mut self, path: impl AsRef<Path>) -> Option<String> {
        self.files.remove(path.as_ref())
    }
}

impl ResourceSource for InMemoryResources {
    fn read(&self, dir: &Path, name: &str) -> Result<Option<Resource>> {
        let path = dir.join(name);
        Ok(self.files.get(&path).map(|content| Resource {
            path,
            content: content.clone(),
        }))
    }

    fn find_first(&self, dir: &Path, pattern: &str) -> Result<Option<Resource>> {
        let pattern = compile_pattern(pattern)?;

        // BTreeMap iteration is already sorted by path.
        let found = self.files.iter().find(|(path, _)| {
            path.parent() == Some(dir)
                && path
                    .file_name()
                    .is_some_and(|n| pattern.matches_with(&n.to_string_lossy(), MATCH_OPTIONS))
        });

        Ok(found.map(|(path, content)| Resource {
            path: path.clone(),
            content: content.clone(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
