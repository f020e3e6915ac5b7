//! Fragment extraction from example sources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use std::sync::LazyLock;

use crate::description::describe;
use crate::example::Example;
use crate::fragment::{CodeFragment, FragmentKind};
use crate::source::{discover_sources, SourceFile};

// Test file patterns. Both scans run over the whole file and may overlap.
static TEST_CASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:it|test)\s*\(\s*['"](.+?)['"]\s*,\s*(?:async\s*)?\(\s*.*?\s*\)\s*=>\s*\{([\s\S]*?)\}\s*\)"#,
    )
    .expect("Invalid test case regex")
});

static DESCRIBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"describe\s*\(\s*['"](.+?)['"]\s*,\s*\(\s*\)\s*=>\s*\{([\s\S]*?)\}\s*\)"#)
        .expect("Invalid describe regex")
});

// Non-test file patterns. The first function branch covers expression-bodied
// arrows terminated by `;`.
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:export\s+)?(?:function|const)\s+(\w+)\s*(?:=\s*(?:async\s*)?\([^)]*\)\s*=>[^{;]*;|(?:=\s*(?:async\s*)?\([\s\S]*?\)\s*=>|[\s\S]*?\([\s\S]*?\)\s*\{)[\s\S]*?(?:\}|\);))",
    )
    .expect("Invalid function regex")
});

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:export\s+)?(?:class|interface|type)\s+(\w+)[\s\S]*?\{[\s\S]*?\}")
        .expect("Invalid class regex")
});

/// Errors that can occur while reading example sources.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Examples directory not found: {}", .0.display())]
    SourceDirNotFound(PathBuf),

    #[error("Failed to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Turns source files into examples.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    /// Curated descriptions keyed by file name
    extended_descriptions: HashMap<String, String>,
}

impl Extractor {
    /// Create an extractor with no extended descriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach curated descriptions, keyed by file name.
    pub fn with_extended_descriptions(mut self, descriptions: HashMap<String, String>) -> Self {
        self.extended_descriptions = descriptions;
        self
    }

    /// Extract every example below `root`, in discovery order.
    pub fn extract_dir(&self, root: &Path) -> Result<Vec<Example>, ExtractError> {
        let files = discover_sources(root)?;
        tracing::debug!("Found {} example files in {}", files.len(), root.display());

        files
            .iter()
            .map(|path| {
                let source = SourceFile::read(root, path)?;
                Ok(self.extract(source))
            })
            .collect()
    }

    /// Build an example from a single source file.
    pub fn extract(&self, source: SourceFile) -> Example {
        let code_blocks = self.fragments(&source);
        let description = describe(&source.content, &source.file_name);

        tracing::debug!(
            "Extracted {} fragments from {}",
            code_blocks.len(),
            source.relative_path
        );

        Example {
            extended_description: self.extended_descriptions.get(&source.file_name).cloned(),
            file_name: source.file_name,
            dir_name: source.dir_name,
            description,
            is_test_file: source.is_test_file,
            path: source.relative_path,
            code_blocks,
            content: source.content,
        }
    }

    /// Extract the titled fragments of a source file.
    ///
    /// Never returns an empty list: when no pattern matches, the whole file is
    /// returned as a single fallback fragment.
    pub fn fragments(&self, source: &SourceFile) -> Vec<CodeFragment> {
        let content = source.content.as_str();

        let mut fragments = if source.is_test_file {
            let mut found = scan(&TEST_CASE_RE, content, FragmentKind::TestCase);
            found.extend(scan(&DESCRIBE_RE, content, FragmentKind::DescribeBlock));
            found
        } else {
            let mut found = scan(&FUNCTION_RE, content, FragmentKind::Function);
            found.extend(scan(&CLASS_RE, content, FragmentKind::ClassOrType));
            found
        };

        if fragments.is_empty() {
            fragments.push(CodeFragment::whole_file(&source.file_name, content));
        }

        fragments
    }
}

/// Collect every non-overlapping match of `re`, titled by its first group.
fn scan(re: &Regex, content: &str, kind: FragmentKind) -> Vec<CodeFragment> {
    re.captures_iter(content)
        .filter_map(|caps| {
            let title = caps.get(1)?.as_str();
            let code = caps.get(0)?.as_str();
            Some(CodeFragment::new(title, code, kind))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn source(relative: &str, content: &str) -> SourceFile {
        let root = Path::new("/examples");
        SourceFile::new(root, &root.join(relative), content.to_string())
    }

    fn titles(fragments: &[CodeFragment]) -> Vec<(&str, FragmentKind)> {
        fragments.iter().map(|f| (f.title.as_str(), f.kind)).collect()
    }

    #[test]
    fn extracts_single_test_case() {
        let src = source("misc/feature.test.ts", "it('does X', () => { run(); })");

        let fragments = Extractor::new().fragments(&src);

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].title, "does X");
        assert_eq!(fragments[0].kind, FragmentKind::TestCase);
        assert_eq!(fragments[0].code, "it('does X', () => { run(); })");
    }

    #[test]
    fn extracts_tests_and_overlapping_describe() {
        let src = source(
            "same-package/math.test.ts",
            r#"describe('math', () => {
  it('adds numbers', () => {
    expect(add(1, 2)).toBe(3);
  });

  test("handles async", async () => {
    await expect(load()).resolves.toBe(1);
  });
});
"#,
        );

        let fragments = Extractor::new().fragments(&src);

        assert_eq!(
            titles(&fragments),
            vec![
                ("adds numbers", FragmentKind::TestCase),
                ("handles async", FragmentKind::TestCase),
                ("math", FragmentKind::DescribeBlock),
            ]
        );

        // The describe scan stops at the first closing `})`, overlapping the first test.
        let describe = &fragments[2];
        assert!(describe.code.starts_with("describe('math'"));
        assert!(describe.code.contains("it('adds numbers'"));
    }

    #[test]
    fn extracts_expression_arrow_function() {
        let src = source("helpers/utils.ts", "export const add = (a, b) => a + b;");

        let fragments = Extractor::new().fragments(&src);

        assert_eq!(titles(&fragments), vec![("add", FragmentKind::Function)]);
        assert_eq!(fragments[0].code, "export const add = (a, b) => a + b;");
    }

    #[test]
    fn extracts_functions_and_types() {
        let src = source(
            "direct-imports/user-service.ts",
            r#"export interface User {
  id: number;
}

export async function getUser(id: number) {
  return fetchUser(id);
}
"#,
        );

        let fragments = Extractor::new().fragments(&src);

        assert_eq!(
            titles(&fragments),
            vec![
                ("getUser", FragmentKind::Function),
                ("User", FragmentKind::ClassOrType),
            ]
        );
        assert_eq!(fragments[1].code, "export interface User {\n  id: number;\n}");
    }

    #[test]
    fn falls_back_to_whole_file() {
        let content = "import './setup';\n";
        let src = source("misc/setup.test.ts", content);

        let fragments = Extractor::new().fragments(&src);

        assert_eq!(fragments, vec![CodeFragment::whole_file("setup.test.ts", content)]);
    }

    #[test]
    fn non_test_file_ignores_test_patterns() {
        let content = "it('looks like a test', () => { x(); })";
        let src = source("misc/notes.ts", content);

        let fragments = Extractor::new().fragments(&src);

        assert_eq!(fragments.len(), 1);
        assert!(fragments[0].is_fallback());
    }

    #[test]
    fn builds_example_with_description() {
        let src = source(
            "async-testing/api-client.ts",
            "/**\n * Fetches users.\n */\nexport function fetchUsers() { return []; }\n",
        );

        let example = Extractor::new().extract(src);

        assert_eq!(example.file_name, "api-client.ts");
        assert_eq!(example.dir_name, "async-testing");
        assert_eq!(example.path, "async-testing/api-client.ts");
        assert_eq!(example.description, "Fetches users.");
        assert!(!example.is_test_file);
        assert_eq!(example.code_blocks[0].title, "fetchUsers");
        assert!(example.extended_description.is_none());
    }

    #[test]
    fn attaches_extended_description() {
        let mut descriptions = HashMap::new();
        descriptions.insert(
            "async-testing.test.ts".to_string(),
            "Deep dive into async testing.".to_string(),
        );
        let extractor = Extractor::new().with_extended_descriptions(descriptions);

        let example = extractor.extract(source("async-testing/async-testing.test.ts", ""));

        assert_eq!(
            example.extended_description.as_deref(),
            Some("Deep dive into async testing.")
        );
    }

    #[test]
    fn extracts_directory_in_order() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("test-doubles")).unwrap();
        fs::write(
            root.join("test-doubles/payment.test.ts"),
            "it('charges', () => { pay(); })",
        )
        .unwrap();
        fs::write(root.join("test-doubles/payment.ts"), "export class Payment { }").unwrap();

        let examples = Extractor::new().extract_dir(root).unwrap();

        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].file_name, "payment.test.ts");
        assert_eq!(examples[0].code_blocks[0].kind, FragmentKind::TestCase);
        assert_eq!(examples[1].file_name, "payment.ts");
        assert_eq!(examples[1].code_blocks[0].kind, FragmentKind::ClassOrType);
        assert_eq!(examples[1].description, "Example from payment.ts");
    }
}
