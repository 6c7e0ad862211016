//! Line index - character ranges of every line in a buffer
//!
//! Keeps an ordered, gapless partition of the text into lines together with an
//! optional per-line payload (typically the line's tokens). The index is updated in
//! place after each edit by re-scanning only the lines the edit touched.
//!
//! All positions are char indices, matching `ropey`.

use std::ops::Range;

use ropey::{Rope, RopeSlice};

/// One line of the indexed text
///
/// The range includes the line's terminating line break, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<T> {
    /// Char range of the line in the whole text
    pub range: Range<usize>,
    /// Payload, `None` until the line has been (re-)processed
    pub info: Option<T>,
}

impl<T> Line<T> {
    /// Create a line without payload
    pub fn new(range: Range<usize>) -> Self {
        Self { range, info: None }
    }

    /// Create a line with payload
    pub fn with_info(range: Range<usize>, info: T) -> Self {
        Self {
            range,
            info: Some(info),
        }
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    fn shift(&mut self, delta: isize) {
        self.range = shift_range(&self.range, delta);
    }
}

/// Ordered partition of a text into lines, each with an optional payload of type `T`
///
/// Invariant: the line ranges are contiguous, increasing, and cover `0..text_len`
/// exactly. There is always at least one line; a text ending in a line break has a
/// trailing zero-length line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex<T> {
    lines: Vec<Line<T>>,
}

impl<T> Default for LineIndex<T> {
    fn default() -> Self {
        Self {
            lines: vec![Line::new(0..0)],
        }
    }
}

impl<T> From<&str> for LineIndex<T> {
    fn from(text: &str) -> Self {
        Self::new(&Rope::from_str(text))
    }
}

impl<T> LineIndex<T> {
    /// Index all lines of the given text
    pub fn new(text: &Rope) -> Self {
        Self {
            lines: lines_in(text.slice(..), 0),
        }
    }

    /// Direct construction from prepared lines (used by tests)
    pub fn from_lines(lines: Vec<Line<T>>) -> Self {
        Self { lines }
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Length of the indexed text in chars
    pub fn text_len(&self) -> usize {
        self.lines.last().map_or(0, Line::end)
    }

    /// Iterate over all lines in order
    pub fn lines(&self) -> std::slice::Iter<'_, Line<T>> {
        self.lines.iter()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Bounds-checked access to a line (zero-based)
    pub fn lookup(&self, line: usize) -> Option<&Line<T>> {
        self.lines.get(line)
    }

    /// Payload of the given line, if the line exists and has one
    pub fn info_of(&self, line: usize) -> Option<&T> {
        self.lookup(line).and_then(|line| line.info.as_ref())
    }

    /// The char range covered by a range of lines
    ///
    /// Line numbers outside the index are clipped; an empty line range yields an empty
    /// char range at the start of its first line.
    pub fn char_range_of(&self, lines: Range<usize>) -> Range<usize> {
        let Some(last_line) = self.lines.len().checked_sub(1) else {
            return 0..0;
        };
        let first = self.lines[lines.start.min(last_line)].start();
        if lines.is_empty() {
            return first..first;
        }
        let last = self.lines[(lines.end - 1).min(last_line)].end();
        first..last.max(first)
    }

    /// Zero-based line containing the char at `index`
    ///
    /// Returns `None` if `index` is past the end of the text.
    ///
    /// Complexity: O(log n) in the number of lines.
    pub fn line_containing(&self, index: usize) -> Option<usize> {
        let candidate = self
            .lines
            .partition_point(|line| line.start() <= index)
            .checked_sub(1)?;
        self.lines[candidate]
            .range
            .contains(&index)
            .then_some(candidate)
    }

    /// Zero-based line of the caret position `index`
    ///
    /// Like [`line_containing`](Self::line_containing), but the position just past the
    /// last char belongs to the last line.
    pub fn line_of(&self, index: usize) -> Option<usize> {
        match self.lines.last() {
            Some(last) if last.end() == index => Some(self.lines.len() - 1),
            _ => self.line_containing(index),
        }
    }

    /// Line of the caret position `index` together with its column on that line
    pub fn line_and_position_of(&self, index: usize) -> Option<(usize, usize)> {
        let line = self.line_of(index)?;
        let start = self.lookup(line)?.start();
        Some((line, index - start))
    }

    /// Smallest range of lines covering all chars in `range`
    ///
    /// - An empty range maps to the line of its start (also at the end of the text).
    /// - A range equal to the last line's range maps to the last line alone.
    /// - A range starting past the end of the text maps to the empty range at the
    ///   last line.
    pub fn lines_containing(&self, range: Range<usize>) -> Range<usize> {
        let Some(last_line) = self.lines.len().checked_sub(1) else {
            return 0..0;
        };
        let start = range.start;
        let end = if range.is_empty() {
            start
        } else {
            range.end - 1
        };

        match self.line_of(start) {
            Some(_) if range == self.lines[last_line].range => last_line..last_line + 1,
            Some(start_line) => {
                let end_line = self.line_containing(end).unwrap_or(last_line);
                start_line..end_line.max(start_line) + 1
            }
            None => last_line..last_line,
        }
    }

    /// Like [`lines_containing`](Self::lines_containing), but includes a trailing
    /// empty line if `range` reaches up to it.
    pub fn lines_of(&self, range: Range<usize>) -> Range<usize> {
        match self.lines.last() {
            Some(last) if last.is_empty() && range.end == last.start() => {
                self.lines_containing(range).start..self.lines.len()
            }
            _ => self.lines_containing(range),
        }
    }

    /// Lines of the text *before* an edit that the edit touched
    ///
    /// `edited_range` is the range of the edit in the new text, `delta` the change in
    /// text length. The range is extended by one char so that an edit ending on a line
    /// break also covers the line after it.
    pub fn lines_affected(&self, edited_range: Range<usize>, delta: isize) -> Range<usize> {
        let old_end = edited_range.end as isize - delta;
        if old_end < edited_range.start as isize {
            return 0..0;
        }
        let old_range = edited_range.start..old_end as usize;
        self.lines_of(extend(old_range, self.text_len()))
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Replace the payload of a line; lines that do not exist are ignored
    pub fn set_info_of(&mut self, line: usize, info: Option<T>) {
        if let Some(line) = self.lines.get_mut(line) {
            line.info = info;
        }
    }

    /// Bring the index up to date after `text` was edited
    ///
    /// - `text`: the full text after the edit
    /// - `edited_range`: range of the edit in the new text
    /// - `delta`: change in text length (negative if the text got shorter)
    ///
    /// Only the affected lines are re-scanned; their payloads are reset to `None`. All
    /// following lines are shifted by `delta` and keep their payload. Returns the range
    /// of lines in the updated index that replaced the affected ones.
    pub fn update_after_editing(
        &mut self,
        text: &Rope,
        edited_range: Range<usize>,
        delta: isize,
    ) -> Range<usize> {
        let (old_lines, region) = self.edit_region(text, edited_range, delta);
        let mut new_lines = lines_in(text.slice(region.clone()), region.start);

        // The scan yields a trailing empty line whenever the region ends on a line
        // break; it is only real if the old lines reached the end of the text.
        let reaches_end = !old_lines.is_empty() && old_lines.end == self.lines.len();
        if !reaches_end && new_lines.last().is_some_and(Line::is_empty) {
            new_lines.pop();
        }

        let replaced = old_lines.start..old_lines.start + new_lines.len();
        self.lines.splice(old_lines, new_lines);
        for line in &mut self.lines[replaced.end..] {
            line.shift(delta);
        }

        tracing::trace!(
            ?replaced,
            line_count = self.lines.len(),
            "line index updated"
        );
        replaced
    }

    /// Lines [`update_after_editing`](Self::update_after_editing) will replace
    ///
    /// `text` is the full text after the edit; the index must not be updated yet.
    pub fn lines_replaced(
        &self,
        text: &Rope,
        edited_range: Range<usize>,
        delta: isize,
    ) -> Range<usize> {
        self.edit_region(text, edited_range, delta).0
    }

    /// Old lines to replace and the char region of the new text replacing them
    fn edit_region(
        &self,
        text: &Rope,
        edited_range: Range<usize>,
        delta: isize,
    ) -> (Range<usize>, Range<usize>) {
        let mut old_lines = self.lines_affected(edited_range.clone(), delta);
        let mut region = line_region(text, extend(edited_range, text.len_chars()));

        // A `\r` just before the edit can join a `\n` at its start into one break, or
        // stop doing so, which moves the first line start in either direction.
        let old_start = self.char_range_of(old_lines.clone()).start;
        if region.start < old_start {
            old_lines.start = self.line_of(region.start).unwrap_or(old_lines.start);
        } else {
            region.start = old_start;
        }
        (old_lines, region)
    }
}

/// Lines of `text`, with ranges offset by `offset`
fn lines_in<T>(text: RopeSlice<'_>, offset: usize) -> Vec<Line<T>> {
    let mut lines = Vec::with_capacity(text.len_lines());
    let mut start = offset;
    for line in text.lines() {
        let end = start + line.len_chars();
        lines.push(Line::new(start..end));
        start = end;
    }
    lines
}

/// Char range of the whole lines of `text` that `range` touches
fn line_region(text: &Rope, range: Range<usize>) -> Range<usize> {
    let first = text.char_to_line(range.start);
    let last = if range.is_empty() {
        first
    } else {
        text.char_to_line(range.end - 1)
    };
    text.line_to_char(first)..text.line_to_char(last + 1)
}

/// Extend `range` by one char, clipped to `0..text_len`
///
/// A zero-length range at the very end of the text stays as it is.
fn extend(range: Range<usize>, text_len: usize) -> Range<usize> {
    if range.start >= text_len {
        return text_len..text_len;
    }
    range.start..(range.end + 1).min(text_len)
}

pub(crate) fn shift_range(range: &Range<usize>, delta: isize) -> Range<usize> {
    let start = range.start.saturating_add_signed(delta);
    start..start + range.len()
}
