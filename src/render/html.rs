// src/render/html.rs
//! Markdown to HTML conversion for the PDF renderer.

use super::highlight::CodeHighlighter;
use super::theme::Theme;
use crate::formatting::anchor_slug;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Renders Markdown into a complete, styled HTML page.
pub struct HtmlDocumentBuilder<'a> {
    highlighter: &'a dyn CodeHighlighter,
    theme: Theme,
}

impl<'a> HtmlDocumentBuilder<'a> {
    pub fn new(highlighter: &'a dyn CodeHighlighter, theme: Theme) -> Self {
        Self { highlighter, theme }
    }

    /// Parser options: GFM tables, strikethrough, task lists and
    /// typographic substitutions. Raw HTML is always passed through.
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
    }

    /// Renders the body fragment only.
    ///
    /// Soft line breaks become `<br>`, headings get ids matching the table
    /// of contents anchors and fenced code goes through the highlighter.
    pub fn render_body(&self, markdown: &str) -> String {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, Self::parser_options()).collect();
        let events = self.transform(events);

        let mut body = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut body, events.into_iter());
        body
    }

    /// Wraps the rendered body in a standalone HTML page with the theme's
    /// stylesheet inlined.
    pub fn render_document(&self, markdown: &str, title: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            escape_html(title),
            self.theme.stylesheet(),
            self.render_body(markdown)
        )
    }

    fn transform<'e>(&self, events: Vec<Event<'e>>) -> Vec<Event<'e>> {
        let mut out = Vec::with_capacity(events.len());
        let mut iter = events.into_iter();

        while let Some(event) = iter.next() {
            match event {
                Event::SoftBreak => out.push(Event::HardBreak),

                Event::Start(Tag::CodeBlock(kind)) => {
                    let language = match &kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    let mut code = String::new();
                    for inner in iter.by_ref() {
                        match inner {
                            Event::End(TagEnd::CodeBlock) => break,
                            Event::Text(text) => code.push_str(&text),
                            _ => {}
                        }
                    }
                    out.push(Event::Html(CowStr::from(self.code_block_html(
                        &code,
                        language.as_deref(),
                    ))));
                }

                Event::Start(Tag::Heading {
                    level,
                    id: None,
                    classes,
                    attrs,
                }) => {
                    let mut inner = Vec::new();
                    let mut text = String::new();
                    for next in iter.by_ref() {
                        if matches!(next, Event::End(TagEnd::Heading(_))) {
                            inner.push(next);
                            break;
                        }
                        if let Event::Text(ref t) | Event::Code(ref t) = next {
                            text.push_str(t);
                        }
                        inner.push(next);
                    }
                    let slug = anchor_slug(&text);
                    out.push(Event::Start(Tag::Heading {
                        level,
                        id: if slug.is_empty() {
                            None
                        } else {
                            Some(CowStr::from(slug))
                        },
                        classes,
                        attrs,
                    }));
                    out.extend(inner.into_iter().map(|e| match e {
                        Event::SoftBreak => Event::HardBreak,
                        other => other,
                    }));
                }

                other => out.push(other),
            }
        }
        out
    }

    fn code_block_html(&self, code: &str, language: Option<&str>) -> String {
        let highlighted = self.highlighter.highlight(code, language);
        match highlighted.language {
            Some(lang) => format!(
                "<pre><code class=\"hljs language-{}\">{}</code></pre>\n",
                lang, highlighted.html
            ),
            None => format!("<pre><code class=\"hljs\">{}</code></pre>\n", highlighted.html),
        }
    }
}

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::highlight::RegexHighlighter;
    use pretty_assertions::assert_eq;

    fn body(markdown: &str) -> String {
        HtmlDocumentBuilder::new(&RegexHighlighter, Theme::Dark).render_body(markdown)
    }

    #[test]
    fn test_line_breaks_are_preserved() {
        assert_eq!(body("first\nsecond"), "<p>first<br />\nsecond</p>\n");
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = body("<details>\n<summary>More</summary>\n\nHidden text\n\n</details>\n");
        assert!(html.contains("<details>"));
        assert!(html.contains("<summary>More</summary>"));
        assert!(html.contains("<p>Hidden text</p>"));
    }

    #[test]
    fn test_typographic_quotes() {
        assert_eq!(body("\"quoted\""), "<p>\u{201c}quoted\u{201d}</p>\n");
    }

    #[test]
    fn test_headings_get_anchor_ids() {
        assert_eq!(
            body("## Main Content"),
            "<h2 id=\"main-content\">Main Content</h2>\n"
        );
    }

    #[test]
    fn test_fenced_code_is_highlighted() {
        let html = body("```rust\nfn main() {}\n```\n");
        assert!(html.starts_with("<pre><code class=\"hljs language-rust\">"));
        assert!(html.contains("<span class=\"hljs-keyword\">fn</span>"));
    }

    #[test]
    fn test_unknown_code_is_escaped() {
        let html = body("```\n<not> & highlighted\n```\n");
        assert_eq!(
            html,
            "<pre><code class=\"hljs\">&lt;not&gt; &amp; highlighted\n</code></pre>\n"
        );
    }

    #[test]
    fn test_document_embeds_theme_and_title() {
        let doc = HtmlDocumentBuilder::new(&RegexHighlighter, Theme::Light)
            .render_document("# Hi", "A & B");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>A &amp; B</title>"));
        assert!(doc.contains("#ffffff"));
        assert!(doc.contains("<h1 id=\"hi\">Hi</h1>"));
    }

    #[test]
    fn test_tables_render() {
        let html = body("| a | b |\n| --- | --- |\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>a</th>"));
        assert!(html.contains("<td>2</td>"));
    }
}
