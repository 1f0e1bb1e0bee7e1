// src/render/highlight.rs
//! Lightweight syntax highlighting for fenced code blocks.
//!
//! Produces `hljs-*` span classes so the page theme can color them. A block
//! is highlighted with its declared language when known, otherwise with the
//! language that best matches its content, otherwise it is emitted as
//! escaped literal text.

use super::html::escape_html;
use once_cell::sync::Lazy;
use regex::Regex;

/// Turns code into HTML for the body of a `<code>` element.
pub trait CodeHighlighter: Send + Sync {
    fn highlight(&self, code: &str, language: Option<&str>) -> HighlightedCode;
}

/// Highlighted code plus the language actually used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedCode {
    pub html: String,
    pub language: Option<&'static str>,
}

/// Regex-driven highlighter covering the languages most often pasted into
/// Notion pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexHighlighter;

impl CodeHighlighter for RegexHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> HighlightedCode {
        let requested = language
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .and_then(find_language);

        let chosen = requested.or_else(|| detect_language(code));
        match chosen {
            Some(lang) => HighlightedCode {
                html: lang.highlight(code),
                language: Some(lang.name),
            },
            None => HighlightedCode {
                html: escape_html(code),
                language: None,
            },
        }
    }
}

struct LanguageDef {
    name: &'static str,
    aliases: &'static [&'static str],
    keywords: &'static [&'static str],
    case_insensitive: bool,
    tokens: Regex,
    signals: Vec<Regex>,
}

impl LanguageDef {
    fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        keywords: &'static [&'static str],
        comment: &str,
        string: &str,
        signals: &[&str],
    ) -> Self {
        let tokens = format!(
            r"(?P<comment>{})|(?P<string>{})|(?P<number>\b\d+(?:\.\d+)?\b)|(?P<word>[A-Za-z_][A-Za-z0-9_]*)",
            comment, string
        );
        Self {
            name,
            aliases,
            keywords,
            case_insensitive: false,
            tokens: Regex::new(&tokens).expect("invalid highlighter token regex"),
            signals: signals
                .iter()
                .map(|s| Regex::new(s).expect("invalid highlighter signal regex"))
                .collect(),
        }
    }

    fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    fn matches_name(&self, requested: &str) -> bool {
        self.name.eq_ignore_ascii_case(requested)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(requested))
    }

    fn is_keyword(&self, word: &str) -> bool {
        if self.case_insensitive {
            self.keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
        } else {
            self.keywords.contains(&word)
        }
    }

    fn score(&self, code: &str) -> usize {
        self.signals.iter().filter(|re| re.is_match(code)).count()
    }

    fn highlight(&self, code: &str) -> String {
        let mut out = String::with_capacity(code.len() * 2);
        let mut last = 0;

        for caps in self.tokens.captures_iter(code) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            out.push_str(&escape_html(&code[last..whole.start()]));
            last = whole.end();

            let text = whole.as_str();
            let class = if caps.name("comment").is_some() {
                Some("hljs-comment")
            } else if caps.name("string").is_some() {
                Some("hljs-string")
            } else if caps.name("number").is_some() {
                Some("hljs-number")
            } else if LITERALS.contains(&text) {
                Some("hljs-literal")
            } else if self.is_keyword(text) {
                Some("hljs-keyword")
            } else {
                None
            };

            match class {
                Some(class) => {
                    out.push_str(&format!(
                        "<span class=\"{}\">{}</span>",
                        class,
                        escape_html(text)
                    ));
                }
                None => out.push_str(&escape_html(text)),
            }
        }

        out.push_str(&escape_html(&code[last..]));
        out
    }
}

const LITERALS: &[&str] = &["true", "false", "null", "None", "True", "False", "nil", "undefined"];

const C_COMMENT: &str = r"//[^\n]*|/\*[\s\S]*?\*/";
const HASH_COMMENT: &str = r"#[^\n]*";
const DOUBLE_QUOTED: &str = r#""(?:\\.|[^"\\])*""#;
const SINGLE_QUOTED: &str = r"'(?:\\.|[^'\\])*'";

/// Minimum number of signals a language needs to be auto-detected.
const DETECTION_THRESHOLD: usize = 2;

static LANGUAGES: Lazy<Vec<LanguageDef>> = Lazy::new(|| {
    vec![
        LanguageDef::new(
            "rust",
            &["rs"],
            &[
                "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else",
                "enum", "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod",
                "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct",
                "super", "trait", "type", "unsafe", "use", "where", "while",
            ],
            C_COMMENT,
            DOUBLE_QUOTED,
            &[r"\bfn\s+\w+", r"\blet\s+mut\b", r"\bimpl\b", r"\w::\w", r"\)\s*->\s*\w", r"\bpub\s+(fn|struct|enum)\b"],
        ),
        LanguageDef::new(
            "typescript",
            &["ts", "tsx"],
            &[
                "abstract", "as", "async", "await", "break", "case", "catch", "class", "const",
                "continue", "default", "else", "enum", "export", "extends", "finally", "for",
                "from", "function", "if", "implements", "import", "interface", "let", "new",
                "private", "public", "readonly", "return", "switch", "this", "throw", "try",
                "type", "typeof", "var", "while",
            ],
            C_COMMENT,
            &format!("{}|{}|`(?:\\\\.|[^`\\\\])*`", DOUBLE_QUOTED, SINGLE_QUOTED),
            &[r"\binterface\s+\w+", r":\s*(string|number|boolean)\b", r"\btype\s+\w+\s*="],
        ),
        LanguageDef::new(
            "javascript",
            &["js", "jsx", "node"],
            &[
                "async", "await", "break", "case", "catch", "class", "const", "continue",
                "default", "else", "export", "extends", "finally", "for", "from", "function",
                "if", "import", "let", "new", "return", "switch", "this", "throw", "try",
                "typeof", "var", "while",
            ],
            C_COMMENT,
            &format!("{}|{}|`(?:\\\\.|[^`\\\\])*`", DOUBLE_QUOTED, SINGLE_QUOTED),
            &[r"\bfunction\b", r"\bconst\s+\w+\s*=", r"=>", r"\bconsole\.\w+", r"\brequire\(", r"===?"],
        ),
        LanguageDef::new(
            "python",
            &["py", "python3"],
            &[
                "and", "as", "async", "await", "break", "class", "continue", "def", "del",
                "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
                "in", "is", "lambda", "not", "or", "pass", "raise", "return", "self", "try",
                "while", "with", "yield",
            ],
            HASH_COMMENT,
            &format!(
                "\"\"\"[\\s\\S]*?\"\"\"|'''[\\s\\S]*?'''|{}|{}",
                DOUBLE_QUOTED, SINGLE_QUOTED
            ),
            &[r"(?m)^\s*def\s+\w+\(", r"(?m)^\s*(from\s+\w+\s+)?import\s+\w+", r"\bself\.", r"\belif\b", r"(?m):\s*$"],
        ),
        LanguageDef::new(
            "go",
            &["golang"],
            &[
                "break", "case", "chan", "const", "continue", "default", "defer", "else",
                "fallthrough", "for", "func", "go", "goto", "if", "import", "interface", "map",
                "package", "range", "return", "select", "struct", "switch", "type", "var",
            ],
            C_COMMENT,
            &format!("{}|`[^`]*`", DOUBLE_QUOTED),
            &[r"(?m)^package\s+\w+", r"\bfunc\s+", r":=", r"\bfmt\.\w+"],
        ),
        LanguageDef::new(
            "bash",
            &["sh", "shell", "zsh", "console"],
            &[
                "case", "do", "done", "echo", "elif", "else", "esac", "exit", "export", "fi",
                "for", "function", "if", "in", "local", "return", "then", "while",
            ],
            HASH_COMMENT,
            &format!("{}|{}", DOUBLE_QUOTED, SINGLE_QUOTED),
            &[r"^#!/", r"(?m)^\s*(sudo|apt|npm|cargo|git|cd|ls|curl|export)\s", r"\$\{?\w+", r"\bfi\b", r"\|\s*\w+"],
        ),
        LanguageDef::new(
            "sql",
            &["postgres", "postgresql", "mysql", "sqlite"],
            &[
                "and", "as", "by", "create", "delete", "drop", "from", "group", "having",
                "insert", "into", "join", "left", "limit", "not", "on", "or", "order", "select",
                "set", "table", "update", "values", "where",
            ],
            r"--[^\n]*",
            SINGLE_QUOTED,
            &[r"(?i)\bselect\b", r"(?i)\bfrom\b", r"(?i)\bwhere\b", r"(?i)\binsert\s+into\b", r"(?i)\bcreate\s+table\b"],
        )
        .case_insensitive(),
        LanguageDef::new(
            "json",
            &["jsonc"],
            &[],
            r"//[^\n]*",
            DOUBLE_QUOTED,
            &[r"^\s*[\{\[]", r#""[^"]+"\s*:"#, r"[\}\]]\s*$"],
        ),
    ]
});

fn find_language(requested: &str) -> Option<&'static LanguageDef> {
    LANGUAGES.iter().find(|lang| lang.matches_name(requested))
}

/// Picks the language whose signals best match `code`.
///
/// Ties go to the language listed first.
fn detect_language(code: &str) -> Option<&'static LanguageDef> {
    let mut best: Option<(&'static LanguageDef, usize)> = None;
    for lang in LANGUAGES.iter() {
        let score = lang.score(code);
        if score >= DETECTION_THRESHOLD && best.map_or(true, |(_, top)| score > top) {
            best = Some((lang, score));
        }
    }
    best.map(|(lang, _)| lang)
}
