//! Bracket matching and paired bracket deletion
//!
//! Both work on the per-line token payloads of a [`LineIndex`], so bracket
//! characters inside strings and comments never match.

use std::ops::Range;

use crate::language::LanguageTables;
use crate::lexer::{LineTokens, Token};
use crate::line_index::{shift_range, LineIndex};
use crate::query::{token_at, token_on_line};

/// Find the partner of the bracket just before `location`
///
/// The bracket token must end exactly at `location`. Opening brackets search
/// forward, closing brackets backward, counting nesting of the same bracket kind.
/// Only lines in `within` are searched. Returns the absolute range of the partner.
pub fn matching_bracket(
    index: &LineIndex<LineTokens>,
    language: &dyn LanguageTables,
    location: usize,
    within: Range<usize>,
) -> Option<Range<usize>> {
    let (line, column) = index.line_and_position_of(location)?;
    if column == 0 {
        return None;
    }

    let origin = token_on_line(index, line, column - 1)?.token?;
    if origin.range.end != column {
        return None;
    }
    let partner = language.matching_bracket(&origin.kind)?;
    let forward = language.is_open_bracket(&origin.kind);

    tracing::trace!(line, column, forward, origin = %origin.kind, "bracket search");

    let mut candidates: Vec<&Token> = if forward {
        line_tokens(index, line)
            .iter()
            .filter(|token| token.range.start >= origin.range.end)
            .collect()
    } else {
        line_tokens(index, line)
            .iter()
            .rev()
            .filter(|token| token.range.end <= origin.range.start)
            .collect()
    };

    let mut level = 1usize;
    let mut current = line;
    while within.contains(&current) && current < index.len() {
        for token in &candidates {
            if token.kind == origin.kind {
                level += 1;
            } else if token.kind == *partner {
                level -= 1;
                if level == 0 {
                    let line_start = index.lookup(current)?.start();
                    return Some(shift_range(&token.range, line_start as isize));
                }
            }
        }

        current = if forward {
            current + 1
        } else {
            current.checked_sub(1)?
        };
        candidates = if forward {
            line_tokens(index, current).iter().collect()
        } else {
            line_tokens(index, current).iter().rev().collect()
        };
    }

    None
}

fn line_tokens(index: &LineIndex<LineTokens>, line: usize) -> &[Token] {
    index
        .info_of(line)
        .map(|tokens| tokens.tokens.as_slice())
        .unwrap_or_default()
}

/// Widen the deletion of a lone opening bracket to its adjacent closing partner
///
/// Applies when `range` deletes exactly one char, `replacement` is empty, the
/// deleted char is a one-char opening bracket, and the token right after it is the
/// matching closing bracket. Returns the widened two-char range.
pub fn paired_deletion(
    index: &LineIndex<LineTokens>,
    language: &dyn LanguageTables,
    text_len: usize,
    range: Range<usize>,
    replacement: &str,
) -> Option<Range<usize>> {
    if range.len() != 1 || !replacement.is_empty() {
        return None;
    }

    let deleted = token_at(index, range.start).token?;
    let closing = language.closing_bracket(&deleted.kind)?;
    if range.start + 1 >= text_len {
        return None;
    }
    if language.lexeme(&deleted.kind)?.chars().count() != 1 {
        return None;
    }

    let next = token_at(index, range.start + 1).token?;
    (next.kind == *closing).then(|| range.start..range.start + 2)
}
