// src/render/theme.rs
//! Stylesheets for rendered documents.

use crate::types::ValidationError;
use std::fmt;
use std::str::FromStr;

/// Color scheme of the generated PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Full stylesheet: the shared layout with this theme's colors filled in.
    ///
    /// Colors are substituted rather than left as CSS custom properties; the
    /// PDF engine's WebKit predates `var()`.
    pub fn stylesheet(&self) -> String {
        let palette = match self {
            Self::Dark => DARK_PALETTE,
            Self::Light => LIGHT_PALETTE,
        };
        palette
            .iter()
            .fold(LAYOUT.to_string(), |css, (name, color)| {
                css.replace(&format!("var(--{})", name), color)
            })
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(ValidationError::InvalidTheme(other.to_string())),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DARK_PALETTE: &[(&str, &str)] = &[
    ("bg", "#0d1117"),
    ("fg", "#c9d1d9"),
    ("heading", "#ffffff"),
    ("accent", "#58a6ff"),
    ("border", "#30363d"),
    ("surface", "#1f2937"),
    ("surface-strong", "#2d3748"),
    ("stripe", "#242f3d"),
    ("code-fg", "#e6e6e6"),
    ("hl-comment", "#8b949e"),
    ("hl-keyword", "#ff7b72"),
    ("hl-string", "#a5d6ff"),
    ("hl-number", "#a5d6ff"),
    ("hl-literal", "#ffa657"),
];

const LIGHT_PALETTE: &[(&str, &str)] = &[
    ("bg", "#ffffff"),
    ("fg", "#24292f"),
    ("heading", "#1f2328"),
    ("accent", "#0969da"),
    ("border", "#d0d7de"),
    ("surface", "#f6f8fa"),
    ("surface-strong", "#eaeef2"),
    ("stripe", "#f6f8fa"),
    ("code-fg", "#24292f"),
    ("hl-comment", "#6e7781"),
    ("hl-keyword", "#cf222e"),
    ("hl-string", "#0a3069"),
    ("hl-number", "#0550ae"),
    ("hl-literal", "#953800"),
];

const LAYOUT: &str = r#"@import url('https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&display=swap');

body {
  font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', sans-serif;
  background-color: var(--bg);
  color: var(--fg);
  line-height: 1.7;
  padding: 3em;
  max-width: 1000px;
  margin: 0 auto;
}

h1, h2, h3, h4, h5, h6 {
  color: var(--heading);
  margin-top: 2em;
  margin-bottom: 1em;
  font-weight: 600;
  letter-spacing: -0.02em;
}

h1 { font-size: 2.5em; border-bottom: 2px solid var(--border); padding-bottom: 0.3em; color: var(--accent); }
h2 { font-size: 2em; border-bottom: 1px solid var(--border); padding-bottom: 0.2em; color: var(--accent); }
h3 { font-size: 1.6em; color: var(--accent); }

p { margin: 1.2em 0; line-height: 1.8; }

code {
  font-family: 'Fira Code', 'JetBrains Mono', 'Consolas', monospace;
  background-color: var(--surface);
  color: var(--code-fg);
  padding: 0.2em 0.4em;
  border-radius: 6px;
  font-size: 0.9em;
  border: 1px solid var(--border);
}

pre {
  background-color: var(--surface);
  padding: 1.2em;
  border-radius: 8px;
  overflow-x: auto;
  margin: 1.5em 0;
  border: 1px solid var(--border);
}

pre code { background-color: transparent; padding: 0; border: none; font-size: 0.95em; line-height: 1.7; }

blockquote {
  border-left: 4px solid var(--accent);
  margin: 1.5em 0;
  padding: 1em 1.5em;
  background-color: var(--surface);
  border-radius: 0 8px 8px 0;
  font-style: italic;
}

details { margin: 1.2em 0; padding: 0.5em 1em; border: 1px solid var(--border); border-radius: 8px; }
summary { font-weight: 600; }

table { border-collapse: collapse; width: 100%; margin: 1.5em 0; background-color: var(--surface); }
th, td { border: 1px solid var(--border); padding: 12px 16px; text-align: left; }
th { background-color: var(--surface-strong); font-weight: 600; color: var(--heading); }
tr:nth-child(even) { background-color: var(--stripe); }

a { color: var(--accent); text-decoration: none; }

img { max-width: 100%; height: auto; border-radius: 8px; margin: 1.5em 0; }

hr { border: none; border-top: 2px solid var(--border); margin: 2.5em 0; }

ul, ol { padding-left: 2em; margin: 1.2em 0; }
li { margin: 0.5em 0; }

.hljs { display: block; overflow-x: auto; color: var(--fg); background: var(--surface); }
.hljs-comment { color: var(--hl-comment); font-style: italic; }
.hljs-keyword { color: var(--hl-keyword); }
.hljs-string { color: var(--hl-string); }
.hljs-number { color: var(--hl-number); }
.hljs-literal { color: var(--hl-literal); }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_parsing() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_palette_is_substituted() {
        let dark = Theme::Dark.stylesheet();
        let light = Theme::Light.stylesheet();
        assert!(dark.contains("background-color: #0d1117"));
        assert!(light.contains("background-color: #ffffff"));
        assert!(!dark.contains("var(--"));
        assert!(!light.contains("var(--"));
        assert!(dark.contains(".hljs-keyword"));
        assert!(light.contains(".hljs-keyword"));
    }
}
