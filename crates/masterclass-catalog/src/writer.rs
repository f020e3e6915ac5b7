//! JSON output for a catalog.
//!
//! Every document is written to every destination directory. Writes are
//! staged: all documents go to temporary files first and are renamed into
//! place only once every temporary file in every destination has been
//! written, so a failed run leaves the previous output untouched.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::catalog::{Catalog, Section};
use crate::category::Category;
use crate::document::Index;

/// Name of the index document.
pub const INDEX_FILE: &str = "index.json";

/// Errors that can occur while writing output.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to serialize {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {} into place: {source}", path.display())]
    Commit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Summary of a completed write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Every file written, across all destinations
    pub files: Vec<PathBuf>,

    /// Entries written per category
    pub counts: Vec<(Category, usize)>,

    /// Number of examples recorded in the index
    pub total_examples: usize,
}

/// A serialized document waiting to be written.
#[derive(Debug)]
struct Document {
    name: String,
    json: String,
}

/// A temporary file and its final location.
#[derive(Debug)]
struct Staged {
    temp: PathBuf,
    target: PathBuf,
}

/// Writes catalogs as JSON documents to one or more directories.
#[derive(Debug, Clone)]
pub struct CatalogWriter {
    destinations: Vec<PathBuf>,
}

impl CatalogWriter {
    /// Create a writer for the given destination directories.
    ///
    /// Destinations that name the same directory are written once.
    pub fn new(destinations: Vec<PathBuf>) -> Self {
        let mut unique: Vec<PathBuf> = Vec::with_capacity(destinations.len());
        for dir in destinations {
            if !unique.iter().any(|d| same_dir(d, &dir)) {
                unique.push(dir);
            }
        }
        Self {
            destinations: unique,
        }
    }

    /// Destination directories, in write order.
    pub fn destinations(&self) -> &[PathBuf] {
        &self.destinations
    }

    /// Write every category document and the index to every destination.
    pub fn write(&self, catalog: &Catalog) -> Result<WriteReport, WriteError> {
        let documents = render(catalog)?;

        for dir in &self.destinations {
            fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }

        let staged = self.stage(&documents)?;
        let files = commit(staged)?;

        let counts: Vec<(Category, usize)> =
            catalog.sections().map(|(c, s)| (c, s.len())).collect();

        for (category, count) in &counts {
            tracing::info!(
                "Wrote {} examples to {}",
                count,
                self.targets(&category.file_name())
            );
        }
        tracing::info!("Wrote index file to {}", self.targets(INDEX_FILE));

        Ok(WriteReport {
            files,
            counts,
            total_examples: catalog.total_examples,
        })
    }

    /// Every destination path of one document, for logging.
    fn targets(&self, name: &str) -> String {
        self.destinations
            .iter()
            .map(|d| d.join(name).display().to_string())
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Write all documents to temporary files, removing them again on failure.
    fn stage(&self, documents: &[Document]) -> Result<Vec<Staged>, WriteError> {
        let mut staged = Vec::new();

        for dir in &self.destinations {
            for doc in documents {
                let target = dir.join(&doc.name);
                let temp = temp_path(dir, &doc.name);

                if let Err(source) = fs::write(&temp, &doc.json) {
                    discard(&staged);
                    return Err(WriteError::Stage { path: temp, source });
                }

                staged.push(Staged { temp, target });
            }
        }

        Ok(staged)
    }
}

/// Serialize every document of a catalog.
fn render(catalog: &Catalog) -> Result<Vec<Document>, WriteError> {
    let mut documents = Vec::new();

    for (category, section) in catalog.sections() {
        let name = category.file_name();
        let json = match section {
            Section::Examples(examples) => to_json(&name, &examples)?,
            Section::Patterns(patterns) => to_json(&name, &patterns)?,
        };
        documents.push(Document { name, json });
    }

    let json = to_json(INDEX_FILE, &Index::from(catalog))?;
    documents.push(Document {
        name: INDEX_FILE.to_string(),
        json,
    });

    Ok(documents)
}

fn to_json<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<String, WriteError> {
    serde_json::to_string_pretty(value).map_err(|source| WriteError::Serialize {
        name: name.to_string(),
        source,
    })
}

/// Rename staged files into place.
fn commit(staged: Vec<Staged>) -> Result<Vec<PathBuf>, WriteError> {
    let mut written = Vec::with_capacity(staged.len());

    for (i, file) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(&file.temp, &file.target) {
            discard(&staged[i..]);
            return Err(WriteError::Commit {
                path: file.target.clone(),
                source,
            });
        }
        written.push(file.target.clone());
    }

    Ok(written)
}

/// Best-effort removal of temporary files.
fn discard(staged: &[Staged]) {
    for file in staged {
        if let Err(e) = fs::remove_file(&file.temp) {
            tracing::warn!("Failed to remove {}: {}", file.temp.display(), e);
        }
    }
}

/// Whether two directory paths name the same directory.
fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => normalize(a) == normalize(b),
    }
}

/// Lexical normalization for directories that do not exist yet.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn temp_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!(".{}.tmp", name))
}
