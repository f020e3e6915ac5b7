//! Partitioning of examples into documentation sections.

use masterclass_extract::Example;

use crate::category::{Category, CategoryTable};
use crate::patterns::{CommonPattern, PatternRule};

/// Immutable configuration for the categorizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Directory to category lookup
    pub categories: CategoryTable,

    /// Rules for the derived common-patterns section
    pub patterns: Vec<PatternRule>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            categories: CategoryTable::default(),
            patterns: PatternRule::defaults(),
        }
    }
}

/// Examples grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub unit_tests: Vec<Example>,
    pub integration_tests: Vec<Example>,
    pub e2e_tests: Vec<Example>,
    pub common_patterns: Vec<CommonPattern>,

    /// Number of examples given to the categorizer
    pub total_examples: usize,
}

/// Contents of one category, borrowed from a [`Catalog`].
#[derive(Debug, Clone, Copy)]
pub enum Section<'a> {
    /// Examples assigned by directory
    Examples(&'a [Example]),
    /// Derived pattern groups
    Patterns(&'a [CommonPattern]),
}

impl Section<'_> {
    /// Number of entries in the section.
    pub fn len(&self) -> usize {
        match self {
            Section::Examples(examples) => examples.len(),
            Section::Patterns(patterns) => patterns.len(),
        }
    }

    /// Check if the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Catalog {
    /// Contents of a category.
    pub fn section(&self, category: Category) -> Section<'_> {
        match category {
            Category::UnitTests => Section::Examples(&self.unit_tests),
            Category::IntegrationTests => Section::Examples(&self.integration_tests),
            Category::E2eTests => Section::Examples(&self.e2e_tests),
            Category::CommonPatterns => Section::Patterns(&self.common_patterns),
        }
    }

    /// Sections in output order.
    pub fn sections(&self) -> impl Iterator<Item = (Category, Section<'_>)> {
        Category::ALL.into_iter().map(|c| (c, self.section(c)))
    }
}

/// Assigns examples to categories and derives common patterns.
#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    config: CatalogConfig,
}

impl Categorizer {
    /// Create a categorizer from configuration.
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    /// Category an example is assigned to by its directory.
    pub fn assign(&self, example: &Example) -> Category {
        self.config.categories.lookup(&example.dir_name)
    }

    /// Partition examples into a catalog.
    ///
    /// Input order is preserved within each category. Examples whose
    /// directory maps to common-patterns are dropped from the partition,
    /// since that section holds the derived groups instead.
    pub fn categorize(&self, examples: Vec<Example>) -> Catalog {
        let common_patterns: Vec<CommonPattern> = self
            .config
            .patterns
            .iter()
            .filter_map(|rule| rule.detect(&examples))
            .collect();

        let mut catalog = Catalog {
            total_examples: examples.len(),
            common_patterns,
            ..Default::default()
        };

        for example in examples {
            match self.assign(&example) {
                Category::UnitTests => catalog.unit_tests.push(example),
                Category::IntegrationTests => catalog.integration_tests.push(example),
                Category::E2eTests => catalog.e2e_tests.push(example),
                Category::CommonPatterns => {
                    tracing::debug!(
                        "{} maps to common-patterns and is only reachable through pattern groups",
                        example.path
                    );
                }
            }
        }

        catalog
    }
}
