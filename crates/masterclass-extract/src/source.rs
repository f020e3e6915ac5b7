//! Example source discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::extractor::ExtractError;

/// File extensions treated as example sources.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx"];

/// An example file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path to the file
    pub path: PathBuf,

    /// Path relative to the examples root, with forward slashes
    pub relative_path: String,

    /// Raw file content
    pub content: String,

    /// File name (e.g. `api.test.ts`)
    pub file_name: String,

    /// Name of the directory containing the file
    pub dir_name: String,

    /// Whether the file name carries a `.test.` or `.spec.` marker
    pub is_test_file: bool,
}

impl SourceFile {
    /// Build a source file from content already in memory.
    pub fn new(root: &Path, path: &Path, content: String) -> Self {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let dir_name = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let relative_path = path
            .strip_prefix(root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        Self {
            path: path.to_path_buf(),
            relative_path,
            is_test_file: is_test_file_name(&file_name),
            file_name,
            dir_name,
            content,
        }
    }

    /// Read a source file below `root`.
    pub fn read(root: &Path, path: &Path) -> Result<Self, ExtractError> {
        let content = fs::read_to_string(path).map_err(|source| ExtractError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(root, path, content))
    }
}

/// Check whether a file name marks a test file.
pub fn is_test_file_name(file_name: &str) -> bool {
    file_name.contains(".test.") || file_name.contains(".spec.")
}

/// Find all `.ts` and `.tsx` files below `root`.
///
/// Files are returned in depth-first order with directory entries sorted by
/// name, so repeated runs over an unchanged tree see the same sequence.
pub fn discover_sources(root: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    if !root.is_dir() {
        return Err(ExtractError::SourceDirNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ExtractError::Walk {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if SOURCE_EXTENSIONS.contains(&ext) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}
