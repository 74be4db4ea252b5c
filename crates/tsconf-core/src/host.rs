//! Host collaborator interface
//!
//! The resolver never touches the file system directly. Everything it needs is
//! expressed by [`ConfigHost`]: existence checks, reading documents, listing
//! directories, the host's case sensitivity, and realpath resolution.
//!
//! Two implementations are provided: [`RealFileSystem`] backed by `std::fs`,
//! and [`MemoryHost`], an in-memory tree used by tests and by embedders that
//! already hold the project files in memory.

use crate::path::{
    canonical_key, combine_paths, contains_path, directory_path, normalize_slashes,
    normalized_absolute_path, relative_path,
};
use crate::{Result, TsconfError};
use std::collections::{BTreeMap, BTreeSet};
use std::io::ErrorKind as IoErrorKind;
use tracing::trace;

/// A single entry returned by [`ConfigHost::get_entries`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Entry name (not the full path)
    pub name: String,
    /// True for files, false for directories
    pub is_file: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: true,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_file: false,
        }
    }
}

/// Read-only file system contract consumed by configuration resolution
///
/// All paths are normalized `/`-separated strings. Implementations return
/// `Ok(None)` / empty listings for missing paths and reserve `Err` for real
/// I/O failures, which abort the resolution call.
pub trait ConfigHost {
    fn file_exists(&self, path: &str) -> bool;

    /// Read a document; `Ok(None)` when it does not exist
    fn read_file(&self, path: &str) -> Result<Option<String>>;

    /// List the files and directories directly inside `dir`
    fn get_entries(&self, dir: &str) -> Result<Vec<DirEntry>>;

    fn use_case_sensitive_file_names(&self) -> bool;

    /// Resolve symbolic links; hosts without links return the path unchanged
    fn realpath(&self, path: &str) -> String {
        path.to_string()
    }
}

/// Host backed by the real file system
#[derive(Debug, Clone)]
pub struct RealFileSystem {
    case_sensitive: bool,
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RealFileSystem {
    /// Create a host using the platform's usual case sensitivity
    pub fn new() -> Self {
        Self {
            case_sensitive: !cfg!(any(windows, target_os = "macos")),
        }
    }

    pub fn with_case_sensitivity(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}

impl ConfigHost for RealFileSystem {
    fn file_exists(&self, path: &str) -> bool {
        std::path::Path::new(path).is_file()
    }

    fn read_file(&self, path: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
            Err(e) => Err(TsconfError::io_error(path, e)),
        }
    }

    fn get_entries(&self, dir: &str) -> Result<Vec<DirEntry>> {
        let read_dir = match std::fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(TsconfError::io_error(dir, e)),
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| TsconfError::io_error(dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks so linked directories are walked like real ones
            let metadata = match std::fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(e) => {
                    trace!("Skipping unreadable entry {}: {}", name, e);
                    continue;
                }
            };
            if metadata.is_file() {
                entries.push(DirEntry::file(name));
            } else if metadata.is_dir() {
                entries.push(DirEntry::directory(name));
            }
        }
        Ok(entries)
    }

    fn use_case_sensitive_file_names(&self) -> bool {
        self.case_sensitive
    }

    fn realpath(&self, path: &str) -> String {
        std::fs::canonicalize(path)
            .map(|resolved| normalize_slashes(&resolved.to_string_lossy()).into_owned())
            .unwrap_or_else(|_| path.to_string())
    }
}

/// In-memory host
///
/// Directories are implied by the files added beneath them; empty directories
/// can be added explicitly. Directory symlinks are supported so realpath-based
/// deduplication can be exercised.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    case_sensitive: bool,
    /// canonical key -> (path as added, content)
    files: BTreeMap<String, (String, String)>,
    directories: BTreeMap<String, String>,
    /// link path -> target path
    links: BTreeMap<String, String>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create an empty, case-sensitive host
    pub fn new() -> Self {
        Self {
            case_sensitive: true,
            files: BTreeMap::new(),
            directories: BTreeMap::new(),
            links: BTreeMap::new(),
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Add a file, creating its parent directories
    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn add_file(&mut self, path: &str, content: &str) {
        let path = normalized_absolute_path(path, "/");
        self.add_directory(&directory_path(&path));
        self.files.insert(
            canonical_key(&path, self.case_sensitive),
            (path, content.to_string()),
        );
    }

    pub fn add_directory(&mut self, path: &str) {
        let mut current = normalized_absolute_path(path, "/");
        loop {
            let key = canonical_key(&current, self.case_sensitive);
            if self.directories.contains_key(&key) {
                break;
            }
            self.directories.insert(key, current.clone());
            let parent = directory_path(&current);
            if parent == current {
                break;
            }
            current = parent;
        }
    }

    /// Make `link` a directory symlink pointing at `target`
    pub fn with_symlink(mut self, link: &str, target: &str) -> Self {
        let link = normalized_absolute_path(link, "/");
        self.add_directory(&directory_path(&link));
        self.links.insert(
            canonical_key(&link, self.case_sensitive),
            normalized_absolute_path(target, "/"),
        );
        self
    }

    fn resolve(&self, path: &str) -> String {
        let path = normalized_absolute_path(path, "/");
        for (link, target) in &self.links {
            if contains_path(link, &path, "", !self.case_sensitive) {
                let rest = relative_path(link, &path, !self.case_sensitive);
                return normalized_absolute_path(&rest, target);
            }
        }
        path
    }
}

impl ConfigHost for MemoryHost {
    fn file_exists(&self, path: &str) -> bool {
        let resolved = self.resolve(path);
        self.files
            .contains_key(&canonical_key(&resolved, self.case_sensitive))
    }

    fn read_file(&self, path: &str) -> Result<Option<String>> {
        let resolved = self.resolve(path);
        Ok(self
            .files
            .get(&canonical_key(&resolved, self.case_sensitive))
            .map(|(_, content)| content.clone()))
    }

    fn get_entries(&self, dir: &str) -> Result<Vec<DirEntry>> {
        let resolved = self.resolve(dir);
        let dir_key = canonical_key(&resolved, self.case_sensitive);
        let is_child = |candidate: &str| {
            let parent = directory_path(candidate);
            parent != candidate && canonical_key(&parent, self.case_sensitive) == dir_key
        };

        let mut files = BTreeSet::new();
        let mut directories = BTreeSet::new();
        for (path, _) in self.files.values() {
            if is_child(path) {
                files.insert(crate::path::base_file_name(path).to_string());
            }
        }
        for path in self.directories.values() {
            if is_child(path) {
                directories.insert(crate::path::base_file_name(path).to_string());
            }
        }
        for link in self.links.keys() {
            if is_child(link) {
                directories.insert(crate::path::base_file_name(link).to_string());
            }
        }

        Ok(files
            .into_iter()
            .map(DirEntry::file)
            .chain(directories.into_iter().map(DirEntry::directory))
            .collect())
    }

    fn use_case_sensitive_file_names(&self) -> bool {
        self.case_sensitive
    }

    fn realpath(&self, path: &str) -> String {
        self.resolve(path)
    }
}

/// Join a directory entry name onto its directory
pub(crate) fn entry_path(dir: &str, name: &str) -> String {
    combine_paths(dir, name)
}
