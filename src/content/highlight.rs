//! Syntax highlighting for fenced code blocks

use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use thiserror::Error;

/// Why a code block could not be highlighted
#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    #[error("highlighting is disabled")]
    Disabled,

    #[error(transparent)]
    Syntect(#[from] syntect::Error),
}

/// Converts source code into highlighted HTML
///
/// The returned HTML must already be escaped. Callers fall back to a plain
/// escaped block on error.
pub trait Highlighter: Send + Sync {
    fn highlight(&self, code: &str, lang: &str) -> Result<String, HighlightError>;
}

/// Highlighter backed by syntect's bundled syntaxes and themes
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl SyntectHighlighter {
    /// Create a highlighter using the named bundled theme
    pub fn new(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new("base16-ocean.dark")
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, lang: &str) -> Result<String, HighlightError> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .ok_or_else(|| HighlightError::UnsupportedLanguage(lang.to_string()))?;

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .ok_or_else(|| HighlightError::UnknownTheme(self.theme_name.clone()))?;

        Ok(highlighted_html_for_string(
            code,
            &self.syntax_set,
            syntax,
            theme,
        )?)
    }
}

/// Highlighter used when highlighting is turned off
pub struct NoHighlighter;

impl Highlighter for NoHighlighter {
    fn highlight(&self, _code: &str, _lang: &str) -> Result<String, HighlightError> {
        Err(HighlightError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_known_language() {
        let highlighter = SyntectHighlighter::default();
        let html = highlighter.highlight("fn main() {}\n", "rust").unwrap();
        assert!(html.starts_with("<pre"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_highlight_by_extension() {
        let highlighter = SyntectHighlighter::default();
        assert!(highlighter.highlight("let x = 1;\n", "js").is_ok());
    }

    #[test]
    fn test_unknown_language_fails() {
        let highlighter = SyntectHighlighter::default();
        let err = highlighter.highlight("x", "no-such-lang").unwrap_err();
        assert!(matches!(err, HighlightError::UnsupportedLanguage(ref l) if l == "no-such-lang"));
    }

    #[test]
    fn test_unknown_theme_fails() {
        let highlighter = SyntectHighlighter::new("no-such-theme");
        let err = highlighter.highlight("fn main() {}", "rust").unwrap_err();
        assert!(matches!(err, HighlightError::UnknownTheme(_)));
    }

    #[test]
    fn test_highlighted_output_is_escaped() {
        let highlighter = SyntectHighlighter::default();
        let html = highlighter.highlight("<script>alert(1)</script>\n", "txt").unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_no_highlighter() {
        assert!(matches!(
            NoHighlighter.highlight("x", "rust"),
            Err(HighlightError::Disabled)
        ));
    }
}
