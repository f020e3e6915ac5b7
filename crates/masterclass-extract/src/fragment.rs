//! Titled code fragments pulled out of example files.

use serde::{Deserialize, Serialize};

/// Kind of construct a fragment was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FragmentKind {
    /// `it(...)` / `test(...)` call in a test file
    #[serde(rename = "test-case")]
    TestCase,
    /// `describe(...)` grouping in a test file
    #[serde(rename = "describe-block")]
    DescribeBlock,
    /// Function or const-arrow declaration
    #[serde(rename = "function")]
    Function,
    /// Class, interface or type declaration
    #[serde(rename = "class")]
    ClassOrType,
    /// Entire file, used when nothing else matched
    #[serde(rename = "file")]
    WholeFile,
}

impl FragmentKind {
    /// Wire name used in generated JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TestCase => "test-case",
            Self::DescribeBlock => "describe-block",
            Self::Function => "function",
            Self::ClassOrType => "class",
            Self::WholeFile => "file",
        }
    }

    /// Human-readable label for badges.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TestCase => "Test case",
            Self::DescribeBlock => "Describe block",
            Self::Function => "Function",
            Self::ClassOrType => "Type",
            Self::WholeFile => "Full file",
        }
    }
}

/// A titled span of source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFragment {
    /// Test title, describe title, or declared identifier
    pub title: String,

    /// Matched source text
    pub code: String,

    /// What the fragment was extracted from
    #[serde(rename = "type")]
    pub kind: FragmentKind,
}

impl CodeFragment {
    /// Create a new fragment.
    pub fn new(title: impl Into<String>, code: impl Into<String>, kind: FragmentKind) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            kind,
        }
    }

    /// Fragment covering a whole file, titled with the file name.
    pub fn whole_file(file_name: &str, content: &str) -> Self {
        Self::new(file_name, content, FragmentKind::WholeFile)
    }

    /// Check if this fragment is the whole-file fallback.
    pub fn is_fallback(&self) -> bool {
        self.kind == FragmentKind::WholeFile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_names() {
        let fragment = CodeFragment::new("adds", "it('adds', () => {})", FragmentKind::TestCase);
        let json = serde_json::to_string(&fragment).unwrap();

        assert_eq!(
            json,
            r#"{"title":"adds","code":"it('adds', () => {})","type":"test-case"}"#
        );
    }

    #[test]
    fn kind_names_match_serde() {
        for kind in [
            FragmentKind::TestCase,
            FragmentKind::DescribeBlock,
            FragmentKind::Function,
            FragmentKind::ClassOrType,
            FragmentKind::WholeFile,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn whole_file_is_fallback() {
        let fragment = CodeFragment::whole_file("setup.ts", "import './a';");

        assert!(fragment.is_fallback());
        assert_eq!(fragment.title, "setup.ts");
        assert_eq!(fragment.code, "import './a';");
    }
}
