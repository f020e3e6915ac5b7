//! The externally visible unit of extraction.

use serde::{Deserialize, Serialize};

use crate::fragment::CodeFragment;

/// One example file with its description and extracted fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    /// File name (e.g. `api.test.ts`)
    pub file_name: String,

    /// Name of the containing directory
    pub dir_name: String,

    /// Doc comment text or a synthesized default
    pub description: String,

    /// Longer curated description, when one is configured for this file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_description: Option<String>,

    /// Whether this is a test file
    pub is_test_file: bool,

    /// Path relative to the examples root
    pub path: String,

    /// Extracted fragments, never empty
    pub code_blocks: Vec<CodeFragment>,

    /// Raw file content, kept for marker detection only
    #[serde(skip)]
    pub content: String,
}

impl Example {
    /// Language hint for syntax highlighting, from the file extension.
    pub fn language(&self) -> &'static str {
        if self.file_name.ends_with(".tsx") {
            "tsx"
        } else {
            "typescript"
        }
    }

    /// Check whether the raw content contains a marker substring.
    pub fn contains(&self, marker: &str) -> bool {
        self.content.contains(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::FragmentKind;

    fn sample() -> Example {
        Example {
            file_name: "Router.tsx".to_string(),
            dir_name: "router".to_string(),
            description: "Example from Router.tsx".to_string(),
            extended_description: None,
            is_test_file: false,
            path: "react-specific/router/Router.tsx".to_string(),
            code_blocks: vec![CodeFragment::new("Router", "", FragmentKind::Function)],
            content: "export function Router() {}".to_string(),
        }
    }

    #[test]
    fn omits_content_and_missing_extended_description() {
        let json = serde_json::to_value(sample()).unwrap();

        assert!(json.get("content").is_none());
        assert!(json.get("extendedDescription").is_none());
        assert_eq!(json["fileName"], "Router.tsx");
        assert_eq!(json["isTestFile"], false);
        assert_eq!(json["codeBlocks"][0]["type"], "function");
    }

    #[test]
    fn language_follows_extension() {
        let mut example = sample();
        assert_eq!(example.language(), "tsx");

        example.file_name = "api.ts".to_string();
        assert_eq!(example.language(), "typescript");
    }
}
