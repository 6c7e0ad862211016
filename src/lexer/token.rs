//! Token kinds and positioned tokens

use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::syntax::HighlightClass;

/// Single-character punctuation recognised by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Punctuation {
    Dot,
    DoubleQuote,
    Semicolon,
    Comma,
    Plus,
    Minus,
    Star,
    Slash,
    Equals,
    GreaterThan,
    LessThan,
    LParen,
    RParen,
    Percent,
    Hash,
    Ampersand,
    Underscore,
    Caret,
    Tilde,
    Colon,
    Pipe,
    BackTick,
    QuestionMark,
    Bang,
    LBrace,
    RBrace,
}

impl Punctuation {
    pub const ALL: [Punctuation; 26] = [
        Self::Dot,
        Self::DoubleQuote,
        Self::Semicolon,
        Self::Comma,
        Self::Plus,
        Self::Minus,
        Self::Star,
        Self::Slash,
        Self::Equals,
        Self::GreaterThan,
        Self::LessThan,
        Self::LParen,
        Self::RParen,
        Self::Percent,
        Self::Hash,
        Self::Ampersand,
        Self::Underscore,
        Self::Caret,
        Self::Tilde,
        Self::Colon,
        Self::Pipe,
        Self::BackTick,
        Self::QuestionMark,
        Self::Bang,
        Self::LBrace,
        Self::RBrace,
    ];

    /// The source character of this punctuation
    pub fn symbol(self) -> char {
        match self {
            Self::Dot => '.',
            Self::DoubleQuote => '"',
            Self::Semicolon => ';',
            Self::Comma => ',',
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Star => '*',
            Self::Slash => '/',
            Self::Equals => '=',
            Self::GreaterThan => '>',
            Self::LessThan => '<',
            Self::LParen => '(',
            Self::RParen => ')',
            Self::Percent => '%',
            Self::Hash => '#',
            Self::Ampersand => '&',
            Self::Underscore => '_',
            Self::Caret => '^',
            Self::Tilde => '~',
            Self::Colon => ':',
            Self::Pipe => '|',
            Self::BackTick => '`',
            Self::QuestionMark => '?',
            Self::Bang => '!',
            Self::LBrace => '{',
            Self::RBrace => '}',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.symbol() == ch)
    }

    /// Stable lowercase name, e.g. `"lparen"`
    pub fn name(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::DoubleQuote => "double_quote",
            Self::Semicolon => "semicolon",
            Self::Comma => "comma",
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Star => "star",
            Self::Slash => "slash",
            Self::Equals => "equals",
            Self::GreaterThan => "greater_than",
            Self::LessThan => "less_than",
            Self::LParen => "lparen",
            Self::RParen => "rparen",
            Self::Percent => "percent",
            Self::Hash => "hash",
            Self::Ampersand => "ampersand",
            Self::Underscore => "underscore",
            Self::Caret => "caret",
            Self::Tilde => "tilde",
            Self::Colon => "colon",
            Self::Pipe => "pipe",
            Self::BackTick => "back_tick",
            Self::QuestionMark => "question_mark",
            Self::Bang => "bang",
            Self::LBrace => "lbrace",
            Self::RBrace => "rbrace",
        }
    }
}

/// Classification of a token, with its literal value where it has one
///
/// Identifier, at-identifier and keyword values compare case-insensitively; string
/// and number literals compare exactly.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TokenKind {
    Eof,
    Comment,
    MetaCommand,
    NewLine,
    Punctuation(Punctuation),
    /// Decoded string contents (quotes removed, `''` collapsed)
    StringLiteral(String),
    Identifier(String),
    AtIdentifier(String),
    NumberLiteral(String),
    /// Canonical spelling from the keyword table
    Keyword(String),
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Eof => "eof",
            Self::Comment => "comment",
            Self::MetaCommand => "meta_command",
            Self::NewLine => "new_line",
            Self::Punctuation(p) => p.name(),
            Self::StringLiteral(_) => "string",
            Self::Identifier(_) | Self::AtIdentifier(_) => "identifier",
            Self::NumberLiteral(_) => "number",
            Self::Keyword(_) => "keyword",
        }
    }

    /// The literal value carried by the token, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::StringLiteral(value)
            | Self::Identifier(value)
            | Self::AtIdentifier(value)
            | Self::NumberLiteral(value)
            | Self::Keyword(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    pub fn is_at_identifier(&self) -> bool {
        matches!(self, Self::AtIdentifier(_))
    }

    pub fn is_string_literal(&self) -> bool {
        matches!(self, Self::StringLiteral(_))
    }

    pub fn is_number_literal(&self) -> bool {
        matches!(self, Self::NumberLiteral(_))
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Self::Keyword(_))
    }

    pub fn punctuation(&self) -> Option<Punctuation> {
        match self {
            Self::Punctuation(p) => Some(*p),
            _ => None,
        }
    }

    /// How the token is coloured by a highlighter
    pub fn highlight_class(&self) -> HighlightClass {
        HighlightClass::from(self)
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl PartialEq for TokenKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Eof, Self::Eof)
            | (Self::Comment, Self::Comment)
            | (Self::MetaCommand, Self::MetaCommand)
            | (Self::NewLine, Self::NewLine) => true,
            (Self::Punctuation(a), Self::Punctuation(b)) => a == b,
            (Self::StringLiteral(a), Self::StringLiteral(b))
            | (Self::NumberLiteral(a), Self::NumberLiteral(b)) => a == b,
            (Self::Identifier(a), Self::Identifier(b))
            | (Self::AtIdentifier(a), Self::AtIdentifier(b))
            | (Self::Keyword(a), Self::Keyword(b)) => eq_ignore_case(a, b),
            _ => false,
        }
    }
}

impl Eq for TokenKind {}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eof => write!(f, "eof"),
            Self::Comment => write!(f, "comment"),
            Self::MetaCommand => write!(f, "metacommand"),
            Self::NewLine => writeln!(f),
            Self::Punctuation(p) => write!(f, "{}", p.symbol()),
            Self::StringLiteral(value) | Self::NumberLiteral(value) => write!(f, "{}", value),
            Self::Identifier(value) => write!(f, "id:{}", value),
            Self::AtIdentifier(value) => write!(f, "@id:{}", value),
            Self::Keyword(value) => write!(f, "kw:{}", value),
        }
    }
}

/// A token with a char range
///
/// Inside a line payload the range is relative to the line start; in the document
/// token cache it is absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub range: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, range: Range<usize>) -> Self {
        Self { kind, range }
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// The same token with its range moved right by `offset`
    pub fn offset_by(&self, offset: usize) -> Self {
        Self {
            kind: self.kind.clone(),
            range: self.range.start + offset..self.range.end + offset,
        }
    }
}

/// Tokens of a single line, sorted by start column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTokens {
    pub tokens: Vec<Token>,
}

impl LineTokens {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a LineTokens {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
