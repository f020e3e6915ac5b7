//! Description extraction from doc comments.

use regex::Regex;
use std::sync::LazyLock;

static DOC_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\*\*[\s\S]*?\*/").expect("Invalid doc comment regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Derive the description of an example file.
///
/// Uses the first `/** ... */` comment in the file with delimiters and leading
/// asterisks stripped and whitespace collapsed. Falls back to
/// `"Example from <file_name>"` when no comment is present or it is empty.
pub fn describe(content: &str, file_name: &str) -> String {
    doc_comment(content).unwrap_or_else(|| format!("Example from {}", file_name))
}

/// Extract the cleaned text of the first doc comment, if any.
pub fn doc_comment(content: &str) -> Option<String> {
    let raw = DOC_COMMENT_RE.find(content)?.as_str();

    let inner = &raw[3..raw.len() - 2];
    let stripped = inner
        .lines()
        .map(|line| line.trim().trim_start_matches('*'))
        .collect::<Vec<_>>()
        .join(" ");

    let text = WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_multiline_comment() {
        let source = r#"import { vi } from 'vitest';

/**
 * Demonstrates mocking a direct import.
 *
 *   The API module is replaced   with a stub.
 */
export function load() {}
"#;

        assert_eq!(
            describe(source, "api.ts"),
            "Demonstrates mocking a direct import. The API module is replaced with a stub."
        );
    }

    #[test]
    fn uses_first_comment_only() {
        let source = "/** First */\n/** Second */";

        assert_eq!(describe(source, "a.ts"), "First");
    }

    #[test]
    fn keeps_inline_asterisks() {
        let source = "/** Multiplies a * b */";

        assert_eq!(describe(source, "math.ts"), "Multiplies a * b");
    }

    #[test]
    fn falls_back_without_comment() {
        let source = "// line comment\n/* plain block */\nexport const x = 1;";

        assert_eq!(describe(source, "utils.ts"), "Example from utils.ts");
    }

    #[test]
    fn falls_back_on_empty_comment() {
        assert_eq!(describe("/** */", "empty.ts"), "Example from empty.ts");
        assert_eq!(describe("/***/", "tiny.ts"), "Example from tiny.ts");
    }
}
