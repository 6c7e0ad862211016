//! Language tables consumed by bracket matching
//!
//! The core only needs two facts about the language: the fixed spelling of a token
//! kind, and which kinds pair up as brackets.

use crate::lexer::{Punctuation, TokenKind};

/// Lexeme and bracket-pairing tables of a language
pub trait LanguageTables: std::fmt::Debug {
    /// Fixed source spelling of a token kind, if it has one
    fn lexeme(&self, kind: &TokenKind) -> Option<String>;

    /// Bracket pairs as `(open, close)`
    fn bracket_pairs(&self) -> &[(TokenKind, TokenKind)];

    fn closing_bracket(&self, open: &TokenKind) -> Option<&TokenKind> {
        self.bracket_pairs()
            .iter()
            .find(|(o, _)| o == open)
            .map(|(_, close)| close)
    }

    fn opening_bracket(&self, close: &TokenKind) -> Option<&TokenKind> {
        self.bracket_pairs()
            .iter()
            .find(|(_, c)| c == close)
            .map(|(open, _)| open)
    }

    fn is_open_bracket(&self, kind: &TokenKind) -> bool {
        self.closing_bracket(kind).is_some()
    }

    fn is_close_bracket(&self, kind: &TokenKind) -> bool {
        self.opening_bracket(kind).is_some()
    }

    /// The partner of a bracket, in either direction
    fn matching_bracket(&self, kind: &TokenKind) -> Option<&TokenKind> {
        self.closing_bracket(kind)
            .or_else(|| self.opening_bracket(kind))
    }
}

/// Tables for the PostgreSQL dialect: `()` and `{}` are brackets
#[derive(Debug, Clone)]
pub struct SqlLanguage {
    bracket_pairs: Vec<(TokenKind, TokenKind)>,
}

impl Default for SqlLanguage {
    fn default() -> Self {
        let pair = |open, close| {
            (
                TokenKind::Punctuation(open),
                TokenKind::Punctuation(close),
            )
        };
        Self {
            bracket_pairs: vec![
                pair(Punctuation::LParen, Punctuation::RParen),
                pair(Punctuation::LBrace, Punctuation::RBrace),
            ],
        }
    }
}

impl LanguageTables for SqlLanguage {
    fn lexeme(&self, kind: &TokenKind) -> Option<String> {
        match kind {
            TokenKind::Punctuation(p) => Some(p.symbol().to_string()),
            TokenKind::Keyword(keyword) => Some(keyword.clone()),
            _ => None,
        }
    }

    fn bracket_pairs(&self) -> &[(TokenKind, TokenKind)] {
        &self.bracket_pairs
    }
}
