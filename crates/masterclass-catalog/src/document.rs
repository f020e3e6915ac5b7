//! Index document written next to the per-category files.

use serde::{Deserialize, Serialize};

use masterclass_extract::Example;

use crate::catalog::Catalog;
use crate::category::Category;
use crate::patterns::CommonPattern;

/// Example metadata without its fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleSummary {
    pub file_name: String,
    pub dir_name: String,
    pub description: String,
    pub is_test_file: bool,
    pub path: String,
}

impl From<&Example> for ExampleSummary {
    fn from(example: &Example) -> Self {
        Self {
            file_name: example.file_name.clone(),
            dir_name: example.dir_name.clone(),
            description: example.description.clone(),
            is_test_file: example.is_test_file,
            path: example.path.clone(),
        }
    }
}

/// Per-category index entries, in output order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSections {
    #[serde(rename = "unit-tests", default)]
    pub unit_tests: Vec<ExampleSummary>,

    #[serde(rename = "integration-tests", default)]
    pub integration_tests: Vec<ExampleSummary>,

    #[serde(rename = "e2e-tests", default)]
    pub e2e_tests: Vec<ExampleSummary>,

    #[serde(rename = "common-patterns", default)]
    pub common_patterns: Vec<CommonPattern>,
}

impl IndexSections {
    /// Summaries for a directory-assigned category; `None` for common-patterns.
    pub fn summaries(&self, category: Category) -> Option<&[ExampleSummary]> {
        match category {
            Category::UnitTests => Some(&self.unit_tests),
            Category::IntegrationTests => Some(&self.integration_tests),
            Category::E2eTests => Some(&self.e2e_tests),
            Category::CommonPatterns => None,
        }
    }

    /// Number of entries listed for a category.
    pub fn count(&self, category: Category) -> usize {
        self.summaries(category)
            .map(<[ExampleSummary]>::len)
            .unwrap_or(self.common_patterns.len())
    }
}

/// Contents of `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// Category identifiers in output order
    pub categories: Vec<Category>,

    /// Number of discovered examples, not counting pattern groups
    pub total_examples: usize,

    /// Slim listings per category
    pub examples_by_category: IndexSections,
}

impl From<&Catalog> for Index {
    fn from(catalog: &Catalog) -> Self {
        let summarize = |examples: &[Example]| -> Vec<ExampleSummary> {
            examples.iter().map(ExampleSummary::from).collect()
        };

        Self {
            categories: Category::ALL.to_vec(),
            total_examples: catalog.total_examples,
            examples_by_category: IndexSections {
                unit_tests: summarize(&catalog.unit_tests),
                integration_tests: summarize(&catalog.integration_tests),
                e2e_tests: summarize(&catalog.e2e_tests),
                common_patterns: catalog.common_patterns.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::ExampleRef;

    fn catalog() -> Catalog {
        let example = Example {
            file_name: "api.test.ts".to_string(),
            dir_name: "direct-imports".to_string(),
            description: "Mocks the API".to_string(),
            extended_description: Some("Long form".to_string()),
            is_test_file: true,
            path: "direct-imports/api.test.ts".to_string(),
            code_blocks: vec![],
            content: "vi.mocked(api)".to_string(),
        };

        Catalog {
            common_patterns: vec![CommonPattern {
                title: "Type Safety with MockedFunction".to_string(),
                description: "Using TypeScript to ensure type safety in mocks".to_string(),
                examples: vec![ExampleRef::from(&example)],
            }],
            unit_tests: vec![example],
            total_examples: 1,
            ..Default::default()
        }
    }

    #[test]
    fn serializes_expected_shape() {
        let json = serde_json::to_value(Index::from(&catalog())).unwrap();

        assert_eq!(
            json["categories"],
            serde_json::json!(["unit-tests", "integration-tests", "e2e-tests", "common-patterns"])
        );
        assert_eq!(json["totalExamples"], 1);

        let unit = &json["examplesByCategory"]["unit-tests"][0];
        assert_eq!(
            unit,
            &serde_json::json!({
                "fileName": "api.test.ts",
                "dirName": "direct-imports",
                "description": "Mocks the API",
                "isTestFile": true,
                "path": "direct-imports/api.test.ts",
            })
        );

        let pattern = &json["examplesByCategory"]["common-patterns"][0];
        assert_eq!(pattern["examples"][0]["path"], "direct-imports/api.test.ts");
    }

    #[test]
    fn keeps_category_key_order() {
        let text = serde_json::to_string(&Index::from(&catalog())).unwrap();

        let unit = text.find("\"unit-tests\":").unwrap();
        let integration = text.find("\"integration-tests\":").unwrap();
        let e2e = text.find("\"e2e-tests\":").unwrap();
        let common = text.find("\"common-patterns\":").unwrap();

        assert!(unit < integration && integration < e2e && e2e < common);
    }

    #[test]
    fn counts_per_category() {
        let index = Index::from(&catalog());

        assert_eq!(index.examples_by_category.count(Category::UnitTests), 1);
        assert_eq!(index.examples_by_category.count(Category::E2eTests), 0);
        assert_eq!(index.examples_by_category.count(Category::CommonPatterns), 1);
    }
}
