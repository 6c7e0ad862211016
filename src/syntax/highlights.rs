//! Highlight classes and per-line highlight spans
//!
//! The renderer colours tokens by class; this module only classifies them.

use serde::Serialize;

use crate::lexer::{LineTokens, TokenKind};

/// Colour class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightClass {
    Comment,
    String,
    Identifier,
    Number,
    Keyword,
    /// Default text colour (punctuation, meta-commands, line breaks)
    Text,
}

impl HighlightClass {
    pub fn name(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::String => "string",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::Keyword => "keyword",
            Self::Text => "text",
        }
    }
}

impl From<&TokenKind> for HighlightClass {
    fn from(kind: &TokenKind) -> Self {
        match kind {
            TokenKind::Comment => Self::Comment,
            TokenKind::StringLiteral(_) => Self::String,
            TokenKind::Identifier(_) | TokenKind::AtIdentifier(_) => Self::Identifier,
            TokenKind::NumberLiteral(_) => Self::Number,
            TokenKind::Keyword(_) => Self::Keyword,
            _ => Self::Text,
        }
    }
}

/// A single highlighted span within a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightToken {
    /// Start column (0-indexed, inclusive)
    pub start_col: usize,
    /// End column (exclusive)
    pub end_col: usize,
    pub class: HighlightClass,
}

/// Highlight spans for a single line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineHighlights {
    /// Spans sorted by start_col; text-class tokens are omitted
    pub tokens: Vec<HighlightToken>,
}

impl LineHighlights {
    pub fn from_tokens(line: &LineTokens) -> Self {
        let tokens = line
            .iter()
            .filter_map(|token| {
                let class = token.kind.highlight_class();
                (class != HighlightClass::Text).then(|| HighlightToken {
                    start_col: token.range.start,
                    end_col: token.range.end,
                    class,
                })
            })
            .collect();
        Self { tokens }
    }

    /// Get the highlight class for a given column, if any
    pub fn highlight_at(&self, col: usize) -> Option<HighlightClass> {
        for token in &self.tokens {
            if col >= token.start_col && col < token.end_col {
                return Some(token.class);
            }
            if token.start_col > col {
                break; // tokens are sorted, no need to continue
            }
        }
        None
    }
}
