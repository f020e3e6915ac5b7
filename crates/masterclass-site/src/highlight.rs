//! Token highlighting for code fragments.
//!
//! Fragments are split into classed tokens, one list per source line. The
//! templates wrap classed tokens in `<span class="token ...">` and escape
//! the text, so no markup is built here.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Source language of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    TypeScript,
    Tsx,
    /// Rendered without tokens
    Plain,
}

impl Language {
    /// Parse a language name such as `typescript` or `tsx`.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "typescript" | "ts" | "javascript" | "js" => Self::TypeScript,
            "tsx" | "jsx" => Self::Tsx,
            _ => Self::Plain,
        }
    }
}

/// A run of source text with an optional token class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub class: Option<&'static str>,
    pub text: String,
}

/// Capture group names, in the order they are checked.
const CLASSES: [&str; 10] = [
    "comment",
    "string",
    "tag",
    "keyword",
    "constant",
    "number",
    "function",
    "identifier",
    "operator",
    "punctuation",
];

const SCRIPT_PATTERN: &str = concat!(
    r"(?P<comment>//[^\n]*|/\*(?s:.*?)\*/)",
    r#"|(?P<string>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\(?s:.))*`)"#,
    r"|(?P<keyword>\b(?:abstract|as|async|await|break|case|catch|class|const|continue|declare|default|delete|do|else|enum|export|extends|finally|for|from|function|get|if|implements|import|in|instanceof|interface|keyof|let|namespace|new|of|private|protected|public|readonly|return|satisfies|set|static|super|switch|this|throw|try|type|typeof|var|void|while|yield)\b)",
    r"|(?P<constant>\b(?:true|false|null|undefined|NaN|Infinity)\b)",
    r"|(?P<number>\b(?:0[xX][\da-fA-F_]+|\d[\d_]*(?:\.\d+)?(?:[eE][+-]?\d+)?n?)\b)",
    r"|(?P<function>[A-Za-z_$][\w$]*)\s*\(",
    r"|(?P<identifier>[A-Za-z_$][\w$]*)",
    r"|(?P<operator>=>|[=!]={0,2}|[<>]=?|&&|\|\||\?\??|[+\-*/%]=?)",
    r"|(?P<punctuation>[{}\[\]();,.:])",
);

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SCRIPT_PATTERN).expect("Invalid script token regex"));

static TSX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?P<tag></?[A-Za-z][\w.\-]*)|{}", SCRIPT_PATTERN))
        .expect("Invalid TSX token regex")
});

/// Split `code` into highlighted lines.
///
/// Yields the same lines as `str::lines`. Comments and template strings
/// spanning several lines keep their class on every line.
pub fn highlight(code: &str, language: Language) -> Vec<Vec<Token>> {
    let tokens = match language {
        Language::TypeScript => tokenize(code, &SCRIPT_RE),
        Language::Tsx => tokenize(code, &TSX_RE),
        Language::Plain => vec![Token {
            class: None,
            text: code.to_string(),
        }],
    };

    let mut lines = split_lines(tokens);
    if code.is_empty() || code.ends_with('\n') {
        lines.pop();
    }
    lines
}

fn tokenize(code: &str, re: &Regex) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in re.captures_iter(code) {
        let Some((class, m)) = CLASSES
            .iter()
            .find_map(|&class| caps.name(class).map(|m| (class, m)))
        else {
            continue;
        };

        push(&mut tokens, None, &code[last..m.start()]);
        let class = (class != "identifier").then_some(class);
        push(&mut tokens, class, m.as_str());
        last = m.end();
    }

    push(&mut tokens, None, &code[last..]);
    tokens
}

/// Append text, merging it into the previous token when the class matches.
fn push(tokens: &mut Vec<Token>, class: Option<&'static str>, text: &str) {
    if text.is_empty() {
        return;
    }
    match tokens.last_mut() {
        Some(prev) if prev.class == class => prev.text.push_str(text),
        _ => tokens.push(Token {
            class,
            text: text.to_string(),
        }),
    }
}

fn split_lines(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut lines: Vec<Vec<Token>> = vec![Vec::new()];

    for token in tokens {
        for (i, part) in token.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(Vec::new());
            }
            let part = part.strip_suffix('\r').unwrap_or(part);
            if let Some(line) = lines.last_mut() {
                push(line, token.class, part);
            }
        }
    }

    lines
}
