//! Directory walking seam consumed by the indexer.
//!
//! The indexer only needs `(name, is_dir)` listings per directory, so the
//! seam is a small trait with two bundled implementations: [`FsWalker`] for
//! real filesystem trees and [`MemoryWalker`] for in-code trees in tests,
//! benches and embedded setups.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use walkdir::WalkDir;

/// One directory listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    name: String,
    is_dir: bool,
}

impl DirEntry {
    /// Creates an entry from a name and a directory flag.
    pub fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self { name: name.into(), is_dir }
    }

    /// Gets the entry's file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true for a directory entry.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// Yields one directory listing per call, addressed by a root-relative path
/// (`""` is the root itself).
pub trait DirWalker {
    /// Lists the entries of the given directory.
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>>;
}

/// A [`DirWalker`] over a real directory tree.
///
/// Listings are sorted by file name, so index registration order does not
/// depend on the platform's directory order.
#[derive(Debug)]
pub struct FsWalker {
    root: PathBuf,
}

impl FsWalker {
    /// Creates a walker rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DirWalker for FsWalker {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let dir = if path.is_empty() { self.root.clone() } else { self.root.join(path) };

        let mut entries = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push(DirEntry::new(name, entry.file_type().is_dir()));
        }
        Ok(entries)
    }
}

/// A [`DirWalker`] over an in-memory list of file paths.
///
/// Directories are implied by the path components; listings come back sorted
/// by name.
#[derive(Debug)]
pub struct MemoryWalker {
    files: Vec<String>,
}

impl MemoryWalker {
    /// Creates a walker from root-relative file paths such as
    /// `blog/:slug/route.tsx`. A leading `/` is tolerated.
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let files = files.into_iter().map(|file| file.into().trim_start_matches('/').to_owned()).collect();
        Self { files }
    }
}

impl DirWalker for MemoryWalker {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let prefix = if path.is_empty() { String::new() } else { format!("{path}/") };

        let mut children = BTreeMap::new();
        for file in &self.files {
            let Some(rest) = file.strip_prefix(&prefix) else { continue };
            if rest.is_empty() {
                continue;
            }
            match rest.split_once('/') {
                Some((dir_name, _)) => children.insert(dir_name.to_owned(), true),
                None => children.insert(rest.to_owned(), false),
            };
        }

        if children.is_empty() && !path.is_empty() {
            return Err(io::Error::new(io::ErrorKind::NotFound, format!("no such directory: {path}")));
        }
        Ok(children.into_iter().map(|(name, is_dir)| DirEntry::new(name, is_dir)).collect())
    }
}
