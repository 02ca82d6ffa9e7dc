//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use super::highlight::{CodeBlock, Highlighter, DEFAULT_THEME};
use crate::helpers::html_escape;

/// Rendered markdown body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Whole body as one HTML fragment, code blocks rendered in place
    pub html: String,
    /// Every code block, in document order
    pub code_blocks: Vec<CodeBlock>,
}

impl Document {
    pub fn to_html(&self) -> String {
        self.html.clone()
    }
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    highlighter: Highlighter,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(DEFAULT_THEME, true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            highlighter: Highlighter::new(theme),
            line_numbers,
        }
    }

    /// Render markdown into a document
    pub fn render(&self, markdown: &str) -> Document {
        // Front-matter is split off before we get here, so no metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_blocks = Vec::new();
        // (fence tag, accumulated source) while inside a code block
        let mut open_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let tag = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_lowercase()),
                        CodeBlockKind::Indented => None,
                    };
                    open_block = Some((tag, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((tag, source)) = open_block.take() {
                        let block = self.highlighter.highlight(&source, tag.as_deref());
                        events.push(Event::Html(CowStr::from(
                            self.render_code_block(&block),
                        )));
                        code_blocks.push(block);
                    }
                }
                Event::Text(text) if open_block.is_some() => {
                    if let Some((_, source)) = open_block.as_mut() {
                        source.push_str(&text);
                    }
                }
                _ if open_block.is_some() => {}
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Document {
            html: html_output,
            code_blocks,
        }
    }

    /// Render one code block as HTML
    fn render_code_block(&self, block: &CodeBlock) -> String {
        if !block.highlighted {
            return format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                block.language,
                html_escape(&block.code)
            );
        }

        let mut gutter = String::new();
        let mut code_lines = String::new();

        for line in &block.lines {
            gutter.push_str(&format!(
                r#"<span class="code-block__ln">{}</span>"#,
                line.number
            ));

            code_lines.push_str(r#"<span class="code-block__line">"#);
            for token in &line.tokens {
                match &token.color {
                    Some(color) => code_lines.push_str(&format!(
                        r#"<span style="color:{}">{}</span>"#,
                        color,
                        html_escape(&token.text)
                    )),
                    None => code_lines.push_str(&html_escape(&token.text)),
                }
            }
            code_lines.push_str("\n</span>");
        }

        let gutter = if self.line_numbers {
            format!(r#"<div class="code-block__gutter" aria-hidden="true">{}</div>"#, gutter)
        } else {
            String::new()
        };

        format!(
            r#"<figure class="code-block" data-language="{}"><figcaption class="code-block__lang">{}</figcaption><pre class="code-block__pre"><div class="code-block__row">{}<code class="code-block__code">{}</code></div></pre></figure>"#,
            block.language,
            html_escape(&block.label),
            gutter,
            code_lines
        ) + "\n"
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
