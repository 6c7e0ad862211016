//! Source locations of scanned tokens

use std::fmt;
use std::ops::Range;

use crate::util::text::is_line_break;

/// Where a token sits in the scanned source
///
/// Borrows the source text, so a location cannot outlive the text it points into.
/// Byte offsets are kept for slicing, char offsets for positions reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerLocation<'a> {
    source: &'a str,
    start: usize,
    end: usize,
    char_start: usize,
    char_end: usize,
}

impl<'a> ScannerLocation<'a> {
    pub(crate) fn new(source: &'a str, bytes: Range<usize>, chars: Range<usize>) -> Self {
        Self {
            source,
            start: bytes.start,
            end: bytes.end,
            char_start: chars.start,
            char_end: chars.end,
        }
    }

    /// Char range of the token in the scanned source
    pub fn char_range(&self) -> Range<usize> {
        self.char_start..self.char_end
    }

    /// Byte range of the token in the scanned source
    pub fn byte_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The token's source text
    pub fn text(&self) -> &'a str {
        &self.source[self.start..self.end]
    }

    /// Full text of the line(s) the token lies on, including the terminating break
    pub fn line_text(&self) -> &'a str {
        &self.source[self.line_start()..self.line_end()]
    }

    /// Zero-based column (in chars) of the token start
    pub fn start_column(&self) -> usize {
        self.source[self.line_start()..self.start].chars().count()
    }

    /// Zero-based line number of the token start
    pub fn line_number(&self) -> usize {
        self.source[..self.start]
            .chars()
            .filter(|&ch| is_line_break(ch))
            .count()
    }

    fn line_start(&self) -> usize {
        self.source[..self.start]
            .char_indices()
            .rev()
            .find(|&(_, ch)| is_line_break(ch))
            .map_or(0, |(i, ch)| i + ch.len_utf8())
    }

    fn line_end(&self) -> usize {
        let ends_on_break = self.end > self.start
            && self.source[..self.end]
                .chars()
                .next_back()
                .is_some_and(is_line_break);
        if ends_on_break {
            return self.end;
        }
        self.source[self.end..]
            .char_indices()
            .find(|&(_, ch)| is_line_break(ch))
            .map_or(self.source.len(), |(i, ch)| self.end + i + ch.len_utf8())
    }
}

impl fmt::Display for ScannerLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.char_start, self.char_end)
    }
}
