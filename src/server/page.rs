// src/server/page.rs
//! The converter form. One page serves both modes.

use crate::render::escape_html;
use crate::types::OutputMode;

const PAGE_STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
       max-width: 760px; margin: 3rem auto; padding: 0 1rem; color: #1f2328; }
nav a { margin-right: 1rem; }
nav a.active { font-weight: 600; text-decoration: none; color: inherit; }
form { display: flex; gap: 0.5rem; margin: 1.5rem 0; }
input[type=url] { flex: 1; padding: 0.5rem; font-size: 1rem; }
button { padding: 0.5rem 1rem; font-size: 1rem; cursor: pointer; }
#message { color: #cf222e; }
#result pre { white-space: pre-wrap; background: #f6f8fa; padding: 1rem; border-radius: 6px; }
"#;

const PAGE_SCRIPT: &str = r#"
const form = document.getElementById('export-form');
const message = document.getElementById('message');
const result = document.getElementById('result');
form.addEventListener('submit', async (event) => {
  event.preventDefault();
  message.textContent = '';
  result.textContent = 'Converting...';
  const response = await fetch('/api/export', {
    method: 'POST',
    body: new URLSearchParams(new FormData(form)),
  });
  const data = await response.json();
  result.textContent = '';
  if (data.message) {
    message.textContent = data.message;
    return;
  }
  if (data.pdfPath) {
    const link = document.createElement('a');
    link.href = data.pdfPath;
    link.textContent = 'Download PDF';
    link.setAttribute('download', '');
    result.appendChild(link);
  } else if (data.markdown !== undefined && data.markdown !== null) {
    const pre = document.createElement('pre');
    pre.textContent = data.markdown;
    result.appendChild(pre);
  }
});
"#;

fn heading(mode: OutputMode) -> &'static str {
    match mode {
        OutputMode::Markdown => "Notion to Markdown",
        OutputMode::Pdf => "Notion to PDF",
    }
}

fn nav_link(target: OutputMode, current: OutputMode) -> String {
    let class = if target == current { " class=\"active\"" } else { "" };
    format!(
        "<a href=\"/?mode={}\"{}>{}</a>",
        target.as_str(),
        class,
        heading(target)
    )
}

/// Renders the form for `mode`.
pub fn converter_page_html(mode: OutputMode) -> String {
    let title = escape_html(heading(mode));
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<nav>{markdown_link}{pdf_link}</nav>
<h1>{title}</h1>
<p>Paste the URL of a Notion page shared with the integration.</p>
<form id="export-form">
<input type="url" name="notionUrl" placeholder="https://www.notion.so/..." required>
<input type="hidden" name="mode" value="{mode}">
<button type="submit">Convert</button>
</form>
<p id="message" role="alert"></p>
<div id="result"></div>
<script>{script}</script>
</body>
</html>
"#,
        title = title,
        style = PAGE_STYLE,
        markdown_link = nav_link(OutputMode::Markdown, mode),
        pdf_link = nav_link(OutputMode::Pdf, mode),
        mode = mode.as_str(),
        script = PAGE_SCRIPT,
    )
}
