//! PostgreSQL/psql lexer
//!
//! A single-pass scanner with one char of state and two chars of lookahead. Produces
//! tokens with exact source locations:
//!
//! - keywords (via a case-insensitive [`Keywords`] table) and identifiers
//! - `'...'` strings with `''` escapes, `$tag$...$tag$` dollar-quoted strings
//! - numbers (`12`, `1.5`, `1.5e-3`), `[bracketed]` identifiers
//! - `--` and `/* */` comments, `\` meta-commands
//! - single-character punctuation
//!
//! Unterminated strings and comments end at the end of input (strings also at a line
//! break). Any other character is a [`LexError`] and ends the scan.

mod error;
mod keywords;
mod location;
mod token;

pub use error::LexError;
pub use keywords::{Keywords, POSTGRES_KEYWORDS};
pub use location::ScannerLocation;
pub use token::{LineTokens, Punctuation, Token, TokenKind};

use crate::util::text::{is_blank, is_identifier_char, is_line_break};

/// Lexer configuration
#[derive(Debug, Clone)]
pub struct LexerOptions {
    /// Keyword table; words not in it lex as identifiers
    pub keywords: Keywords,
    /// Emit `NewLine` tokens instead of skipping line breaks
    pub emit_newlines: bool,
    /// Emit `Comment` tokens instead of skipping comments
    pub emit_comments: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            keywords: Keywords::postgres(),
            emit_newlines: false,
            emit_comments: false,
        }
    }
}

/// A token produced by the lexer, located in the scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexToken<'a> {
    pub kind: TokenKind,
    pub location: ScannerLocation<'a>,
}

impl LexToken<'_> {
    /// Detach from the source, keeping the char range
    pub fn into_token(self) -> Token {
        Token::new(self.kind, self.location.char_range())
    }
}

#[derive(Debug, Clone, Copy)]
struct Mark {
    byte: usize,
    char: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Whole,
    Fractional,
    ExponentSign,
    Exponent,
    Done,
}

pub struct Lexer<'a> {
    source: &'a str,
    options: &'a LexerOptions,
    /// Byte offset of `current`
    pos: usize,
    /// Char offset of `current`
    char_pos: usize,
    current: Option<char>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, options: &'a LexerOptions) -> Self {
        Self {
            source,
            options,
            pos: 0,
            char_pos: 0,
            current: source.chars().next(),
            finished: false,
        }
    }

    /// Scan all tokens; the result ends with exactly one `Eof` token
    pub fn all_tokens(&mut self) -> Result<Vec<LexToken<'a>>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    /// Scan the next token
    ///
    /// Once the input is exhausted every call returns an `Eof` token.
    pub fn next_token(&mut self) -> Result<LexToken<'a>, LexError> {
        while let Some(ch) = self.current {
            if is_blank(ch) {
                self.eat_while(is_blank);
                continue;
            }

            let begin = self.mark();

            if is_line_break(ch) {
                self.advance();
                if self.options.emit_newlines {
                    return Ok(self.token(TokenKind::NewLine, begin));
                }
                continue;
            }

            match ch {
                '\\' => return Ok(self.meta_command()),
                '\'' => return Ok(self.string()),
                c if c.is_ascii_digit() => return Ok(self.number()),
                c if is_identifier_char(c) => return Ok(self.identifier()),
                '$' => return Ok(self.identifier_or_dollar_string()),
                '[' => return Ok(self.quoted_identifier()),
                '-' if self.looking_at("--") => {
                    let comment = self.line_comment();
                    if self.options.emit_comments {
                        return Ok(comment);
                    }
                }
                '/' if self.looking_at("/*") => {
                    let comment = self.block_comment();
                    if self.options.emit_comments {
                        return Ok(comment);
                    }
                }
                c => {
                    let Some(punctuation) = Punctuation::from_char(c) else {
                        return Err(LexError::UnexpectedCharacter {
                            character: c,
                            position: self.char_pos,
                        });
                    };
                    self.advance();
                    return Ok(self.token(TokenKind::Punctuation(punctuation), begin));
                }
            }
        }

        let end = self.mark();
        Ok(self.token(TokenKind::Eof, end))
    }

    // ========================================================================
    // Cursor helpers
    // ========================================================================

    fn mark(&self) -> Mark {
        Mark {
            byte: self.pos,
            char: self.char_pos,
        }
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current {
            self.pos += ch.len_utf8();
            self.char_pos += 1;
            self.current = self.source[self.pos..].chars().next();
        }
    }

    /// Advance until the byte offset `target` is reached
    fn advance_to(&mut self, target: usize) {
        while self.pos < target && self.current.is_some() {
            self.advance();
        }
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.current.is_some_and(&predicate) {
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().nth(1)
    }

    fn peek_after_next(&self) -> Option<char> {
        self.source[self.pos..].chars().nth(2)
    }

    fn looking_at(&self, text: &str) -> bool {
        self.source[self.pos..].starts_with(text)
    }

    fn text_from(&self, begin: Mark) -> &'a str {
        &self.source[begin.byte..self.pos]
    }

    fn token(&self, kind: TokenKind, begin: Mark) -> LexToken<'a> {
        LexToken {
            kind,
            location: ScannerLocation::new(
                self.source,
                begin.byte..self.pos,
                begin.char..self.char_pos,
            ),
        }
    }

    // ========================================================================
    // Token rules
    // ========================================================================

    fn meta_command(&mut self) -> LexToken<'a> {
        let begin = self.mark();
        self.eat_while(|ch| !is_line_break(ch));
        self.token(TokenKind::MetaCommand, begin)
    }

    fn line_comment(&mut self) -> LexToken<'a> {
        let begin = self.mark();
        self.eat_while(|ch| !is_line_break(ch));
        self.token(TokenKind::Comment, begin)
    }

    fn block_comment(&mut self) -> LexToken<'a> {
        let begin = self.mark();
        // skip the opening "/*" so that "/*/" does not close itself
        self.advance();
        self.advance();
        let target = match self.source[self.pos..].find("*/") {
            Some(offset) => self.pos + offset + 2,
            None => self.source.len(),
        };
        self.advance_to(target);
        self.token(TokenKind::Comment, begin)
    }

    fn string(&mut self) -> LexToken<'a> {
        let begin = self.mark();
        self.advance();

        let mut value = String::new();
        while let Some(ch) = self.current {
            if is_line_break(ch) {
                break;
            }
            self.advance();
            if ch == '\'' {
                if self.current == Some('\'') {
                    value.push('\'');
                    self.advance();
                    continue;
                }
                break;
            }
            value.push(ch);
        }
        self.token(TokenKind::StringLiteral(value), begin)
    }

    fn number(&mut self) -> LexToken<'a> {
        let begin = self.mark();
        let mut state = NumberState::Whole;

        while state != NumberState::Done {
            let Some(ch) = self.current else {
                break;
            };
            state = match (state, ch) {
                (NumberState::Whole, '0'..='9') => NumberState::Whole,
                (NumberState::Whole, '.') => NumberState::Fractional,
                (NumberState::Fractional, '0'..='9') => NumberState::Fractional,
                (NumberState::Fractional, 'e' | 'E') => self.exponent_start(),
                (NumberState::ExponentSign, '+' | '-') => NumberState::Exponent,
                (NumberState::Exponent, '0'..='9') => NumberState::Exponent,
                _ => NumberState::Done,
            };
            if state != NumberState::Done {
                self.advance();
            }
        }

        let lexeme = self.text_from(begin).to_string();
        self.token(TokenKind::NumberLiteral(lexeme), begin)
    }

    /// State after an `e`/`E` in the fractional part; `Done` leaves the `e` unconsumed
    fn exponent_start(&self) -> NumberState {
        let next = self.peek();
        if matches!(next, Some('+' | '-'))
            && self.peek_after_next().is_some_and(|c| c.is_ascii_digit())
        {
            NumberState::ExponentSign
        } else if next.is_some_and(|c| c.is_ascii_digit()) {
            NumberState::Exponent
        } else {
            NumberState::Done
        }
    }

    fn identifier(&mut self) -> LexToken<'a> {
        let begin = self.mark();
        self.eat_while(is_identifier_char);

        let lexeme = self.text_from(begin);
        let kind = match self.options.keywords.canonical(lexeme) {
            Some(keyword) => TokenKind::Keyword(keyword.to_string()),
            None => TokenKind::Identifier(lexeme.to_string()),
        };
        self.token(kind, begin)
    }

    /// `$tag$ ... $tag$` string, or an identifier such as `$1` if there is no tag or
    /// the tag is never closed
    fn identifier_or_dollar_string(&mut self) -> LexToken<'a> {
        let begin = self.mark();
        self.advance();
        while let Some(ch) = self.current {
            if ch.is_whitespace() {
                break;
            }
            self.advance();
            if ch == '$' {
                break;
            }
        }

        let tag = self.text_from(begin);
        if tag.len() > 1 && tag.ends_with('$') {
            if let Some(offset) = self.source[self.pos..].find(tag) {
                let body = self.source[self.pos..self.pos + offset].to_string();
                self.advance_to(self.pos + offset + tag.len());
                return self.token(TokenKind::StringLiteral(body), begin);
            }
        }
        self.token(TokenKind::Identifier(tag.to_string()), begin)
    }

    fn quoted_identifier(&mut self) -> LexToken<'a> {
        let begin = self.mark();
        self.eat_while(|ch| ch != ']');
        self.advance();

        let lexeme = self.text_from(begin).to_string();
        self.token(TokenKind::Identifier(lexeme), begin)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<LexToken<'a>, LexError>;

    /// Yields tokens up to and including `Eof`, or up to the first error
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        self.finished = match &result {
            Ok(token) => token.kind == TokenKind::Eof,
            Err(_) => true,
        };
        Some(result)
    }
}

/// Tokenize one line of text into line-local tokens (without the `Eof`)
pub fn tokenize_line(text: &str, options: &LexerOptions) -> Result<LineTokens, LexError> {
    let mut lexer = Lexer::new(text, options);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.kind == TokenKind::Eof {
            return Ok(LineTokens::new(tokens));
        }
        tokens.push(token.into_token());
    }
}
