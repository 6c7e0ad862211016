//! Token lookup by location
//!
//! Two views of the same tokens:
//! - [`TokenCache`]: every token of the document in one flat list with absolute
//!   ranges, searched by binary search.
//! - line payloads in a [`LineIndex`]: line-local tokens, scanned linearly once the
//!   line is known.

use std::ops::{ControlFlow, Range};

use crate::line_index::{shift_range, LineIndex};
use crate::lexer::{LineTokens, Token};

/// Result of a token lookup at a position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAt<'a> {
    /// The token at the position (line-local range), or `None` in a gap between tokens
    pub token: Option<&'a Token>,
    /// Absolute range of the token, or of the token-free gap around the position
    pub effective_range: Range<usize>,
}

/// The token on `line` covering `column`
///
/// Returns `None` if the line does not exist or has not been tokenized.
pub fn token_on_line(
    index: &LineIndex<LineTokens>,
    line: usize,
    column: usize,
) -> Option<TokenAt<'_>> {
    let line = index.lookup(line)?;
    let tokens = line.info.as_ref()?;
    let line_start = line.start();

    // lines are short, a linear scan is fine
    let mut previous_end = 0;
    for token in tokens {
        if column < token.range.start {
            return Some(TokenAt {
                token: None,
                effective_range: line_start + previous_end..line_start + token.range.start,
            });
        }
        if token.range.contains(&column) {
            return Some(TokenAt {
                token: Some(token),
                effective_range: shift_range(&token.range, line_start as isize),
            });
        }
        previous_end = token.range.end;
    }

    Some(TokenAt {
        token: None,
        effective_range: (line_start + previous_end).min(line.end())..line.end(),
    })
}

/// The token at an absolute location
///
/// Without line or token information this is a one-char range without token.
pub fn token_at(index: &LineIndex<LineTokens>, location: usize) -> TokenAt<'_> {
    index
        .line_containing(location)
        .and_then(|line| {
            let start = index.lookup(line)?.start();
            token_on_line(index, line, location - start)
        })
        .unwrap_or(TokenAt {
            token: None,
            effective_range: location..location + 1,
        })
}

/// The token at an absolute location, with its range made absolute
pub fn token_only_at(index: &LineIndex<LineTokens>, location: usize) -> Option<Token> {
    let found = token_at(index, location);
    found
        .token
        .map(|token| Token::new(token.kind.clone(), found.effective_range))
}

/// All tokens of a document, ordered by start location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCache {
    tokens: Vec<Token>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from tokens with absolute ranges, sorted by start
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        debug_assert!(tokens
            .windows(2)
            .all(|pair| pair[0].range.start <= pair[1].range.start));
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Index of the first token starting at or after `location`
    pub fn first_token_index(&self, location: usize) -> Option<usize> {
        let index = self
            .tokens
            .partition_point(|token| token.range.start < location);
        (index < self.tokens.len()).then_some(index)
    }

    /// Visit tokens in order, starting with the first one at or after `location`,
    /// until `visit` breaks or the tokens run out
    pub fn enumerate_from<'a>(
        &'a self,
        location: usize,
        mut visit: impl FnMut(&'a Token) -> ControlFlow<()>,
    ) {
        let Some(first) = self.first_token_index(location) else {
            return;
        };
        for token in &self.tokens[first..] {
            if visit(token).is_break() {
                break;
            }
        }
    }

    /// Visit the tokens of `range`
    ///
    /// Stops after the first token reaching `range.end`, so the last visited token
    /// may extend past the range.
    pub fn enumerate_in<'a>(&'a self, range: Range<usize>, mut visit: impl FnMut(&'a Token)) {
        self.enumerate_from(range.start, |token| {
            visit(token);
            if token.range.end < range.end {
                ControlFlow::Continue(())
            } else {
                ControlFlow::Break(())
            }
        });
    }

    /// Collect the tokens [`enumerate_in`](Self::enumerate_in) visits
    pub fn tokens_in(&self, range: Range<usize>) -> Vec<&Token> {
        let mut tokens = Vec::new();
        self.enumerate_in(range, |token| tokens.push(token));
        tokens
    }

    /// Replace the tokens starting inside `old_span` with `replacement`, and shift the
    /// tokens after it by `delta`
    ///
    /// `replacement` must be sorted and use post-edit absolute positions.
    pub fn splice(&mut self, old_span: Range<usize>, delta: isize, replacement: Vec<Token>) {
        let len = self.tokens.len();
        let first = self.first_token_index(old_span.start).unwrap_or(len);
        let after = self
            .first_token_index(old_span.end)
            .unwrap_or(len)
            .max(first);

        for token in &mut self.tokens[after..] {
            token.range = shift_range(&token.range, delta);
        }
        self.tokens.splice(first..after, replacement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Punctuation, TokenKind};

    fn punct(start: usize) -> Token {
        Token::new(TokenKind::Punctuation(Punctuation::Comma), start..start + 1)
    }

    fn word(range: Range<usize>) -> Token {
        Token::new(TokenKind::Identifier("w".into()), range)
    }

    #[test]
    fn test_first_token_index_empty_cache() {
        assert_eq!(TokenCache::new().first_token_index(0), None);
        assert_eq!(TokenCache::new().first_token_index(10), None);
    }

    #[test]
    fn test_first_token_index_boundaries() {
        let cache = TokenCache::from_tokens(vec![word(0..3), word(4..8), word(10..12)]);
        assert_eq!(cache.first_token_index(0), Some(0));
        assert_eq!(cache.first_token_index(1), Some(1));
        assert_eq!(cache.first_token_index(4), Some(1));
        assert_eq!(cache.first_token_index(6), Some(2));
        assert_eq!(cache.first_token_index(10), Some(2));
        assert_eq!(cache.first_token_index(11), None);
        assert_eq!(cache.first_token_index(12), None);
    }

    #[test]
    fn test_enumerate_in_includes_overlapping_last_token() {
        let cache = TokenCache::from_tokens(vec![word(0..3), word(4..8), word(10..12)]);
        let visited: Vec<_> = cache
            .tokens_in(4..6)
            .into_iter()
            .map(|t| t.range.clone())
            .collect();
        assert_eq!(visited, vec![4..8]);

        let visited: Vec<_> = cache
            .tokens_in(0..9)
            .into_iter()
            .map(|t| t.range.clone())
            .collect();
        assert_eq!(visited, vec![0..3, 4..8, 10..12]);
    }

    #[test]
    fn test_enumerate_in_keeps_references() {
        let cache = TokenCache::from_tokens(vec![word(0..3), word(4..8), word(10..12)]);
        let mut kept: Vec<&Token> = Vec::new();
        cache.enumerate_in(3..11, |token| kept.push(token));
        assert_eq!(kept.len(), 2);
        assert!(std::ptr::eq(kept[0], &cache.tokens()[1]));
        assert_eq!(kept[1].range, 10..12);
    }

    #[test]
    fn test_enumerate_from_stops_on_break() {
        let cache = TokenCache::from_tokens(vec![punct(0), punct(1), punct(2), punct(3)]);
        let mut seen = 0;
        cache.enumerate_from(1, |_| {
            seen += 1;
            if seen == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_splice_replaces_and_shifts() {
        let mut cache = TokenCache::from_tokens(vec![word(0..3), word(4..8), word(10..12)]);
        cache.splice(4..9, 2, vec![word(4..6), word(7..10)]);
        let ranges: Vec<_> = cache.tokens().iter().map(|t| t.range.clone()).collect();
        assert_eq!(ranges, vec![0..3, 4..6, 7..10, 12..14]);
    }

    #[test]
    fn test_token_on_line_gaps() {
        let mut index: LineIndex<LineTokens> = LineIndex::from("ab\n x  y\n");
        index.set_info_of(
            1,
            Some(LineTokens::new(vec![word(1..2), word(4..5)])),
        );

        let at = token_on_line(&index, 1, 1).unwrap();
        assert_eq!(at.token.map(|t| t.range.clone()), Some(1..2));
        assert_eq!(at.effective_range, 4..5);

        let gap = token_on_line(&index, 1, 2).unwrap();
        assert_eq!(gap.token, None);
        assert_eq!(gap.effective_range, 5..7);

        let tail = token_on_line(&index, 1, 5).unwrap();
        assert_eq!(tail.token, None);
        assert_eq!(tail.effective_range, 8..9);

        assert_eq!(token_on_line(&index, 0, 0), None);
        assert_eq!(token_on_line(&index, 7, 0), None);
    }

    #[test]
    fn test_token_at_falls_back_to_single_char() {
        let index: LineIndex<LineTokens> = LineIndex::from("abc");
        let at = token_at(&index, 1);
        assert_eq!(at.token, None);
        assert_eq!(at.effective_range, 1..2);
    }

    #[test]
    fn test_token_only_at_uses_absolute_range() {
        let mut index: LineIndex<LineTokens> = LineIndex::from("ab\n x");
        index.set_info_of(1, Some(LineTokens::new(vec![word(1..2)])));
        let token = token_only_at(&index, 4).unwrap();
        assert_eq!(token.range, 4..5);
        assert_eq!(token_only_at(&index, 3), None);
    }
}
