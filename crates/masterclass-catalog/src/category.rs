//! Documentation categories and the directory lookup table.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the fixed documentation sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    UnitTests,
    IntegrationTests,
    E2eTests,
    CommonPatterns,
}

impl Category {
    /// All categories in output order.
    pub const ALL: [Category; 4] = [
        Category::UnitTests,
        Category::IntegrationTests,
        Category::E2eTests,
        Category::CommonPatterns,
    ];

    /// Identifier used for file names and URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnitTests => "unit-tests",
            Self::IntegrationTests => "integration-tests",
            Self::E2eTests => "e2e-tests",
            Self::CommonPatterns => "common-patterns",
        }
    }

    /// Display title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::UnitTests => "Unit Tests",
            Self::IntegrationTests => "Integration Tests",
            Self::E2eTests => "E2E Tests",
            Self::CommonPatterns => "Common Patterns",
        }
    }

    /// Whether the section is derived from markers rather than assigned by directory.
    pub fn is_derived(&self) -> bool {
        matches!(self, Self::CommonPatterns)
    }

    /// Name of the JSON document for this category.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized category identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category '{0}' (expected one of unit-tests, integration-tests, e2e-tests, common-patterns)")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CategoryParseError(s.to_string()))
    }
}

/// Directory name to category mapping.
///
/// Directories that are not listed fall into [`Category::UnitTests`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: HashMap<String, Category>,
}

impl CategoryTable {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace a directory mapping.
    pub fn insert(&mut self, dir_name: impl Into<String>, category: Category) {
        self.entries.insert(dir_name.into(), category);
    }

    /// Merge string-keyed overrides, as read from configuration.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Result<Self, CategoryParseError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (dir, category) in overrides {
            self.insert(dir.clone(), category.parse()?);
        }
        Ok(self)
    }

    /// Category for a directory name.
    pub fn lookup(&self, dir_name: &str) -> Category {
        self.entries
            .get(dir_name)
            .copied()
            .unwrap_or(Category::UnitTests)
    }

    /// Number of explicit mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no explicit mappings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        let mut table = Self::empty();

        for dir in [
            "direct-imports",
            "indirect-dependencies",
            "same-package",
            "test-doubles",
        ] {
            table.insert(dir, Category::UnitTests);
        }

        for dir in [
            "react-specific",
            "dynamic-imports",
            "lazy-loaded-components",
        ] {
            table.insert(dir, Category::IntegrationTests);
        }

        for dir in ["accessibility-testing", "async-testing", "nodejs-testing"] {
            table.insert(dir, Category::E2eTests);
        }

        table
    }
}
