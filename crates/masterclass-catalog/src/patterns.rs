//! Common-pattern detection over raw example content.

use serde::{Deserialize, Serialize};

use masterclass_extract::Example;

/// Marker rule that groups examples sharing a technique.
///
/// A rule matches when the content contains every `all_of` marker and, if
/// `any_of` is non-empty, at least one of the `any_of` markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Group title
    pub title: String,

    /// Group description
    pub description: String,

    /// Markers that must all be present
    #[serde(default)]
    pub all_of: Vec<String>,

    /// Markers of which at least one must be present
    #[serde(default)]
    pub any_of: Vec<String>,
}

impl PatternRule {
    /// Create a rule from marker lists.
    pub fn new(title: &str, description: &str, all_of: &[&str], any_of: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            all_of: all_of.iter().map(|m| m.to_string()).collect(),
            any_of: any_of.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Check the rule against raw source text.
    pub fn matches(&self, content: &str) -> bool {
        self.all_of.iter().all(|m| content.contains(m.as_str()))
            && (self.any_of.is_empty() || self.any_of.iter().any(|m| content.contains(m.as_str())))
    }

    /// Build the pattern group for this rule, if any example matches.
    pub fn detect(&self, examples: &[Example]) -> Option<CommonPattern> {
        let refs: Vec<ExampleRef> = examples
            .iter()
            .filter(|e| self.matches(&e.content))
            .map(ExampleRef::from)
            .collect();

        if refs.is_empty() {
            return None;
        }

        Some(CommonPattern {
            title: self.title.clone(),
            description: self.description.clone(),
            examples: refs,
        })
    }

    /// The built-in rules: typed mocks, spy assertions, mock implementations.
    pub fn defaults() -> Vec<PatternRule> {
        vec![
            PatternRule::new(
                "Type Safety with MockedFunction",
                "Using TypeScript to ensure type safety in mocks",
                &[],
                &["MockedFunction", "vi.mocked"],
            ),
            PatternRule::new(
                "Spy Assertions",
                "Verifying function calls with spy assertions",
                &["expect("],
                &[".toHaveBeenCalled", ".toBeCalledWith"],
            ),
            PatternRule::new(
                "Mock Implementation",
                "Providing custom implementations for mocked functions",
                &[],
                &[".mockImplementation", ".mockReturnValue"],
            ),
        ]
    }
}

/// A derived grouping of examples sharing a detected technique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonPattern {
    /// Group title
    pub title: String,

    /// Group description
    pub description: String,

    /// Matching examples
    pub examples: Vec<ExampleRef>,
}

/// Lightweight reference to an example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleRef {
    pub file_name: String,
    pub dir_name: String,
    pub path: String,
}

impl From<&Example> for ExampleRef {
    fn from(example: &Example) -> Self {
        Self {
            file_name: example.file_name.clone(),
            dir_name: example.dir_name.clone(),
            path: example.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn example(file_name: &str, content: &str) -> Example {
        Example {
            file_name: file_name.to_string(),
            dir_name: "test-doubles".to_string(),
            description: String::new(),
            extended_description: None,
            is_test_file: true,
            path: format!("test-doubles/{}", file_name),
            code_blocks: vec![],
            content: content.to_string(),
        }
    }

    #[test]
    fn spy_rule_requires_expect() {
        let rule = &PatternRule::defaults()[1];

        assert!(rule.matches("expect(spy).toHaveBeenCalledWith(1)"));
        assert!(rule.matches("expect(fn).toBeCalledWith('a')"));
        assert!(!rule.matches("spy.toHaveBeenCalled"));
        assert!(!rule.matches("expect(value).toBe(1)"));
    }

    #[test]
    fn any_of_only_rule() {
        let rule = &PatternRule::defaults()[0];

        assert!(rule.matches("const m = vi.mocked(fetch);"));
        assert!(rule.matches("let f: MockedFunction<typeof g>;"));
        assert!(!rule.matches("vi.fn()"));
    }

    #[test]
    fn empty_any_of_is_satisfied() {
        let rule = PatternRule::new("Hoisting", "vi.mock hoisting", &["vi.mock("], &[]);

        assert!(rule.matches("vi.mock('./api')"));
        assert!(!rule.matches("vi.fn()"));
    }

    #[test]
    fn detect_collects_refs_in_order() {
        let rule = &PatternRule::defaults()[2];
        let examples = vec![
            example("b.test.ts", "fn.mockReturnValue(1)"),
            example("a.test.ts", "nothing here"),
            example("c.test.ts", "fn.mockImplementation(() => 2)"),
        ];

        let pattern = rule.detect(&examples).unwrap();

        assert_eq!(pattern.title, "Mock Implementation");
        assert_eq!(
            pattern.examples,
            vec![
                ExampleRef {
                    file_name: "b.test.ts".to_string(),
                    dir_name: "test-doubles".to_string(),
                    path: "test-doubles/b.test.ts".to_string(),
                },
                ExampleRef {
                    file_name: "c.test.ts".to_string(),
                    dir_name: "test-doubles".to_string(),
                    path: "test-doubles/c.test.ts".to_string(),
                },
            ]
        );
    }

    #[test]
    fn detect_skips_unmatched_rule() {
        let rule = &PatternRule::defaults()[0];
        let examples = vec![example("a.test.ts", "vi.fn()")];

        assert!(rule.detect(&examples).is_none());
    }
}
