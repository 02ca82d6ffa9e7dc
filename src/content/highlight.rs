//! Fenced code highlighting
//!
//! Language tags are normalised through a fixed table, then each block is
//! tokenised line by line with syntect using a single theme. Anything the
//! table or the grammar set does not know is rendered as plain text.

use serde::{Deserialize, Serialize};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// Theme used when the configured one is not bundled
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Canonical name for un-highlighted code
pub const PLAIN_TEXT: &str = "text";

/// Supported languages: (canonical name, syntect lookup token)
const LANGUAGES: &[(&str, &str)] = &[
    ("csharp", "cs"),
    ("json", "json"),
    ("yaml", "yaml"),
    ("sql", "sql"),
    ("bash", "bash"),
    ("powershell", "ps1"),
    ("javascript", "js"),
    ("typescript", "ts"),
    ("html", "html"),
    ("css", "css"),
];

/// Map a fence tag to its canonical language, `text` when unsupported
pub fn canonical_language(tag: Option<&str>) -> &'static str {
    let tag = tag.map(|t| t.trim().to_lowercase()).unwrap_or_default();

    let name = match tag.as_str() {
        "cs" | "c#" | "csharp" => "csharp",
        "js" => "javascript",
        "ts" => "typescript",
        "yml" => "yaml",
        "sh" | "shell" => "bash",
        "ps" | "ps1" | "pwsh" => "powershell",
        "htm" => "html",
        other => other,
    };

    LANGUAGES
        .iter()
        .find(|(canonical, _)| *canonical == name)
        .map(|(canonical, _)| *canonical)
        .unwrap_or(PLAIN_TEXT)
}

/// Display label for a canonical language
pub fn language_label(language: &str) -> String {
    match language {
        "csharp" => "C#".to_string(),
        "javascript" => "JavaScript".to_string(),
        "typescript" => "TypeScript".to_string(),
        "json" => "JSON".to_string(),
        "yaml" => "YAML".to_string(),
        other => other.to_uppercase(),
    }
}

/// One coloured span of source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: String,
    /// `#rrggbb`, absent for plain text
    pub color: Option<String>,
}

/// One line of a code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLine {
    /// 1-based
    pub number: usize,
    pub tokens: Vec<Token>,
}

/// A highlighted (or plain) code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    /// Canonical language name
    pub language: String,
    /// Human readable language name
    pub label: String,
    /// Whether the lines carry theme colours
    pub highlighted: bool,
    /// Cleaned source text
    pub code: String,
    pub lines: Vec<CodeLine>,
}

/// Syntax highlighter with a fixed theme
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    /// Create a highlighter using a bundled syntect theme
    pub fn new(theme_name: &str) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(
                    "Unknown highlight theme '{}', using '{}'",
                    theme_name,
                    DEFAULT_THEME
                );
                theme_set.themes.remove(DEFAULT_THEME).unwrap_or_default()
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Highlight a code block given its raw fence tag
    pub fn highlight(&self, code: &str, tag: Option<&str>) -> CodeBlock {
        let code = clean_code(code);
        let language = canonical_language(tag);

        let (highlighted, lines) = match self.highlight_lines(&code, language) {
            Some(lines) => (true, lines),
            None => (false, plain_lines(&code)),
        };

        CodeBlock {
            language: language.to_string(),
            label: language_label(language),
            highlighted,
            code,
            lines,
        }
    }

    /// Tokenise with the grammar for `language`, `None` when there is none
    fn highlight_lines(&self, code: &str, language: &str) -> Option<Vec<CodeLine>> {
        let token = LANGUAGES
            .iter()
            .find(|(canonical, _)| *canonical == language)
            .map(|(_, token)| *token)?;

        let syntax = self.syntax_set.find_syntax_by_token(token)?;
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let mut lines = Vec::new();
        for (i, line) in LinesWithEndings::from(code).enumerate() {
            let ranges = match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => ranges,
                Err(e) => {
                    tracing::debug!("Highlighting {} failed, rendering plain: {}", language, e);
                    return None;
                }
            };

            let tokens = ranges
                .into_iter()
                .map(|(style, text)| (style, text.trim_end_matches(['\n', '\r'])))
                .filter(|(_, text)| !text.is_empty())
                .map(|(style, text)| Token {
                    text: text.to_string(),
                    color: Some(hex_color(style.foreground)),
                })
                .collect();

            lines.push(CodeLine {
                number: i + 1,
                tokens,
            });
        }

        Some(lines)
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

fn plain_lines(code: &str) -> Vec<CodeLine> {
    if code.is_empty() {
        return Vec::new();
    }

    code.split('\n')
        .enumerate()
        .map(|(i, line)| CodeLine {
            number: i + 1,
            tokens: if line.is_empty() {
                Vec::new()
            } else {
                vec![Token {
                    text: line.to_string(),
                    color: None,
                }]
            },
        })
        .collect()
}

fn hex_color(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Normalise line endings and drop trailing blank lines
///
/// A line counts as blank when only whitespace, NBSP, zero-width characters
/// or a BOM remain.
pub fn clean_code(code: &str) -> String {
    let normalized = code.replace("\r\n", "\n");
    let mut lines: Vec<&str> = normalized.split('\n').collect();

    while lines.last().is_some_and(|line| is_blank_line(line)) {
        lines.pop();
    }

    lines.join("\n")
}

fn is_blank_line(line: &str) -> bool {
    line.chars().all(|c| {
        c.is_whitespace() || matches!(c, '\u{00A0}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_language_aliases() {
        assert_eq!(canonical_language(Some("cs")), "csharp");
        assert_eq!(canonical_language(Some("CSharp")), "csharp");
        assert_eq!(canonical_language(Some("c#")), "csharp");
        assert_eq!(canonical_language(Some("js")), "javascript");
        assert_eq!(canonical_language(Some("ts")), "typescript");
        assert_eq!(canonical_language(Some("yml")), "yaml");
        assert_eq!(canonical_language(Some("sh")), "bash");
        assert_eq!(canonical_language(Some("pwsh")), "powershell");
        assert_eq!(canonical_language(Some("json")), "json");
    }

    #[test]
    fn test_unknown_language_is_text() {
        assert_eq!(canonical_language(None), PLAIN_TEXT);
        assert_eq!(canonical_language(Some("")), PLAIN_TEXT);
        assert_eq!(canonical_language(Some("brainfuck")), PLAIN_TEXT);
        assert_eq!(canonical_language(Some("text")), PLAIN_TEXT);
    }

    #[test]
    fn test_language_label() {
        assert_eq!(language_label("csharp"), "C#");
        assert_eq!(language_label("json"), "JSON");
        assert_eq!(language_label("yaml"), "YAML");
        assert_eq!(language_label("sql"), "SQL");
        assert_eq!(language_label("text"), "TEXT");
    }

    #[test]
    fn test_cs_and_csharp_match() {
        let highlighter = Highlighter::default();
        let code = "public class Foo { }\n";
        let a = highlighter.highlight(code, Some("cs"));
        let b = highlighter.highlight(code, Some("csharp"));
        assert_eq!(a.language, "csharp");
        assert_eq!(a.label, "C#");
        assert_eq!(a, b);
    }

    #[test]
    fn test_highlight_json() {
        let highlighter = Highlighter::default();
        let block = highlighter.highlight("{\"a\":1}\n", Some("json"));
        assert_eq!(block.label, "JSON");
        assert!(block.highlighted);
        assert_eq!(block.lines.len(), 1);
        assert_eq!(block.lines[0].number, 1);

        let text: String = block.lines[0].tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(text, "{\"a\":1}");
        assert!(block.lines[0]
            .tokens
            .iter()
            .all(|t| t.color.as_deref().is_some_and(|c| c.starts_with('#') && c.len() == 7)));
    }

    #[test]
    fn test_plain_fallback() {
        let highlighter = Highlighter::default();
        let block = highlighter.highlight("just words\nmore words\n", None);
        assert_eq!(block.language, "text");
        assert_eq!(block.label, "TEXT");
        assert!(!block.highlighted);
        assert_eq!(block.lines.len(), 2);
        assert_eq!(block.lines[1].number, 2);
        assert_eq!(block.lines[1].tokens[0].text, "more words");
        assert!(block.lines[1].tokens[0].color.is_none());
    }

    #[test]
    fn test_highlight_is_deterministic() {
        let highlighter = Highlighter::default();
        let code = "SELECT * FROM posts WHERE id = 1;";
        assert_eq!(
            highlighter.highlight(code, Some("sql")),
            highlighter.highlight(code, Some("sql"))
        );
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let highlighter = Highlighter::new("no-such-theme");
        let block = highlighter.highlight("let x = 1;", Some("js"));
        assert!(block.highlighted);
    }

    #[test]
    fn test_clean_code() {
        assert_eq!(clean_code("a\r\nb\r\n\r\n"), "a\nb");
        assert_eq!(clean_code("a\n\u{00A0}\n\u{200B}\n  \n"), "a");
        assert_eq!(clean_code("\n\n"), "");
        assert_eq!(clean_code("  indented\n"), "  indented");
    }
}
