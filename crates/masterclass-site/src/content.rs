//! Loading of the generated JSON documents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use masterclass_catalog::{Category, CommonPattern, Index};
use masterclass_extract::Example;

/// Message shown in place of a section whose content could not be loaded.
pub const LOAD_FAILED: &str = "Failed to load examples";

/// One card-level item of a category document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// An example file from a directory-assigned category
    Example(Example),
    /// A derived pattern group
    Pattern(CommonPattern),
}

impl Entry {
    /// Directory of the entry, if it has one.
    pub fn dir_name(&self) -> Option<&str> {
        match self {
            Entry::Example(example) => Some(&example.dir_name),
            Entry::Pattern(_) => None,
        }
    }
}

/// Outcome of loading one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionState<T> {
    Loaded(T),
    Failed(String),
}

impl<T> SectionState<T> {
    /// Loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            SectionState::Loaded(value) => Some(value),
            SectionState::Failed(_) => None,
        }
    }
}

/// Errors that can occur while loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Directory of generated documents.
#[derive(Debug, Clone)]
pub struct ContentSource {
    dir: PathBuf,
}

impl ContentSource {
    /// Create a source reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the documents are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load `index.json`.
    pub fn load_index(&self) -> Result<Index, ContentError> {
        self.load("index.json")
    }

    /// Load the entries of one category document.
    pub fn load_category(&self, category: Category) -> Result<Vec<Entry>, ContentError> {
        let name = category.file_name();

        let entries = if category.is_derived() {
            self.load::<Vec<CommonPattern>>(&name)?
                .into_iter()
                .map(Entry::Pattern)
                .collect()
        } else {
            self.load::<Vec<Example>>(&name)?
                .into_iter()
                .map(Entry::Example)
                .collect()
        };

        Ok(entries)
    }

    /// Load a category, collapsing any failure into a generic message.
    pub fn section(&self, category: Category) -> SectionState<Vec<Entry>> {
        match self.load_category(category) {
            Ok(entries) => SectionState::Loaded(entries),
            Err(e) => {
                tracing::warn!("{}", e);
                SectionState::Failed(LOAD_FAILED.to_string())
            }
        }
    }

    /// Load the index, collapsing any failure into a generic message.
    pub fn index(&self) -> SectionState<Index> {
        match self.load_index() {
            Ok(index) => SectionState::Loaded(index),
            Err(e) => {
                tracing::warn!("{}", e);
                SectionState::Failed(LOAD_FAILED.to_string())
            }
        }
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, ContentError> {
        let path = self.dir.join(name);

        let json = fs::read_to_string(&path).map_err(|source| ContentError::Read {
            path: path.clone(),
            source,
        })?;

        serde_json::from_str(&json).map_err(|source| ContentError::Parse { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const EXAMPLES: &str = r#"[
  {
    "fileName": "api.test.ts",
    "dirName": "direct-imports",
    "description": "Mocks the API",
    "isTestFile": true,
    "path": "direct-imports/api.test.ts",
    "codeBlocks": [{ "title": "loads", "code": "it('loads', () => {})", "type": "test-case" }]
  }
]"#;

    const PATTERNS: &str = r#"[
  {
    "title": "Spy Assertions",
    "description": "Verifying function calls with spy assertions",
    "examples": [{ "fileName": "api.test.ts", "dirName": "direct-imports", "path": "direct-imports/api.test.ts" }]
  }
]"#;

    #[test]
    fn loads_examples_as_example_entries() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("unit-tests.json"), EXAMPLES).unwrap();

        let entries = ContentSource::new(temp.path())
            .load_category(Category::UnitTests)
            .unwrap();

        assert_eq!(entries.len(), 1);
        match &entries[0] {
            Entry::Example(example) => {
                assert_eq!(example.file_name, "api.test.ts");
                assert_eq!(example.code_blocks[0].title, "loads");
            }
            other => panic!("expected example, got {:?}", other),
        }
        assert_eq!(entries[0].dir_name(), Some("direct-imports"));
    }

    #[test]
    fn loads_patterns_as_pattern_entries() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("common-patterns.json"), PATTERNS).unwrap();

        let entries = ContentSource::new(temp.path())
            .load_category(Category::CommonPatterns)
            .unwrap();

        assert!(matches!(&entries[0], Entry::Pattern(p) if p.title == "Spy Assertions"));
        assert_eq!(entries[0].dir_name(), None);
    }

    #[test]
    fn missing_document_is_a_failed_section() {
        let temp = tempdir().unwrap();

        let state = ContentSource::new(temp.path()).section(Category::E2eTests);

        assert_eq!(state, SectionState::Failed(LOAD_FAILED.to_string()));
    }

    #[test]
    fn malformed_document_is_a_failed_section() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("e2e-tests.json"), "{ not json").unwrap();
        let source = ContentSource::new(temp.path());

        assert!(matches!(
            source.load_category(Category::E2eTests),
            Err(ContentError::Parse { .. })
        ));
        assert!(source.section(Category::E2eTests).loaded().is_none());
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("unit-tests.json"), PATTERNS).unwrap();

        let result = ContentSource::new(temp.path()).load_category(Category::UnitTests);

        assert!(matches!(result, Err(ContentError::Parse { .. })));
    }
}
