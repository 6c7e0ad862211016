//! Document model - the text buffer with its line index and token cache
//!
//! An edit runs the whole pipeline before returning: paired-deletion widening,
//! buffer mutation, line index update, re-tokenization of the replaced lines and the
//! token cache splice. Queries in between always see a consistent state.

use std::borrow::Cow;
use std::ops::{ControlFlow, Range};
use std::path::Path;

use ropey::Rope;

use crate::brackets;
use crate::config::DialectConfig;
use crate::language::{LanguageTables, SqlLanguage};
use crate::lexer::{tokenize_line, LexError, LexerOptions, LineTokens, Token};
use crate::line_index::LineIndex;
use crate::query::{self, TokenAt, TokenCache};

/// What an edit changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Range of the old text that was replaced (widened for paired deletions)
    pub applied_range: Range<usize>,
    /// Range of the inserted text in the new text
    pub edited_range: Range<usize>,
    /// Change in text length
    pub delta: isize,
    /// Char range of the re-tokenized lines in the new text
    pub invalidated_range: Range<usize>,
    /// Number of re-tokenized lines
    pub invalidated_lines: usize,
    /// Lines that failed to tokenize; their payload stays `None`
    pub failed_lines: Vec<(usize, LexError)>,
}

impl EditOutcome {
    /// Part of the invalidated range a renderer must redraw beyond the edited text
    ///
    /// Only multi-line invalidations need extra redrawing.
    pub fn additional_redraw_range(&self) -> Option<Range<usize>> {
        if self.invalidated_lines <= 1 {
            return None;
        }
        let extra = if self.edited_range.start == self.invalidated_range.start {
            self.edited_range.end.min(self.invalidated_range.end)..self.invalidated_range.end
        } else {
            self.invalidated_range.clone()
        };
        (!extra.is_empty()).then_some(extra)
    }
}

/// Document state - the text buffer and its token structures
#[derive(Debug, Clone)]
pub struct Document<L = SqlLanguage> {
    buffer: Rope,
    lines: LineIndex<LineTokens>,
    tokens: TokenCache,
    language: L,
    options: LexerOptions,
    /// Lines a bracket search may scan on either side of its origin
    pub bracket_search_lines: usize,
    /// Incremented on each edit
    pub revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text and the default dialect settings
    pub fn with_text(text: &str) -> Self {
        Self::with_config(text, &DialectConfig::default())
    }

    pub fn with_config(text: &str, config: &DialectConfig) -> Self {
        let mut document =
            Self::with_language(text, SqlLanguage::default(), config.lexer_options());
        document.bracket_search_lines = config.bracket_search_lines;
        document
    }

    /// Load a document from a file path
    pub fn from_file(path: &Path, config: &DialectConfig) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::with_config(&content, config))
    }
}

impl<L: LanguageTables> Document<L> {
    pub fn with_language(text: &str, language: L, options: LexerOptions) -> Self {
        let buffer = Rope::from(text);
        let lines = LineIndex::new(&buffer);
        let mut document = Self {
            buffer,
            lines,
            tokens: TokenCache::new(),
            language,
            options,
            bracket_search_lines: DialectConfig::default().bracket_search_lines,
            revision: 0,
        };

        let (tokens, failed) = document.tokenize_lines(0..document.lines.len());
        document.tokens = TokenCache::from_tokens(tokens);
        tracing::debug!(
            lines = document.lines.len(),
            tokens = document.tokens.len(),
            failed = failed.len(),
            "document tokenized"
        );
        document
    }

    pub fn buffer(&self) -> &Rope {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn line_index(&self) -> &LineIndex<LineTokens> {
        &self.lines
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.tokens
    }

    pub fn language(&self) -> &L {
        &self.language
    }

    pub fn lexer_options(&self) -> &LexerOptions {
        &self.options
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Replace `range` with `replacement`
    ///
    /// The range is clamped to the text. Deleting a lone opening bracket that is
    /// directly followed by its closing partner deletes both.
    pub fn apply_edit(&mut self, range: Range<usize>, replacement: &str) -> EditOutcome {
        let len = self.buffer.len_chars();
        let start = range.start.min(len);
        let range = start..range.end.clamp(start, len);

        let range = match brackets::paired_deletion(
            &self.lines,
            &self.language,
            len,
            range.clone(),
            replacement,
        ) {
            Some(widened) => {
                tracing::debug!(?widened, "deleting bracket pair");
                widened
            }
            None => range,
        };

        let inserted = replacement.chars().count();
        let delta = inserted as isize - range.len() as isize;
        let edited_range = range.start..range.start + inserted;

        self.buffer.remove(range.clone());
        self.buffer.insert(range.start, replacement);
        self.revision += 1;

        let old_lines = self
            .lines
            .lines_replaced(&self.buffer, edited_range.clone(), delta);
        let old_span = self.lines.char_range_of(old_lines);
        let replaced = self
            .lines
            .update_after_editing(&self.buffer, edited_range.clone(), delta);
        let (new_tokens, failed_lines) = self.tokenize_lines(replaced.clone());
        self.tokens.splice(old_span, delta, new_tokens);

        tracing::debug!(
            revision = self.revision,
            ?range,
            delta,
            ?replaced,
            "edit applied"
        );

        EditOutcome {
            applied_range: range,
            edited_range,
            delta,
            invalidated_range: self.lines.char_range_of(replaced.clone()),
            invalidated_lines: replaced.len(),
            failed_lines,
        }
    }

    pub fn insert(&mut self, location: usize, text: &str) -> EditOutcome {
        self.apply_edit(location..location, text)
    }

    pub fn delete(&mut self, range: Range<usize>) -> EditOutcome {
        self.apply_edit(range, "")
    }

    /// Retry tokenizing lines without a payload
    ///
    /// Returns the lines that still fail.
    pub fn retokenize_pending(&mut self) -> Vec<(usize, LexError)> {
        let pending: Vec<usize> = self
            .lines
            .lines()
            .enumerate()
            .filter(|(_, line)| line.info.is_none())
            .map(|(number, _)| number)
            .collect();

        let mut failed = Vec::new();
        for line in pending {
            let (tokens, mut errors) = self.tokenize_lines(line..line + 1);
            if errors.is_empty() {
                let span = self.lines.char_range_of(line..line + 1);
                self.tokens.splice(span, 0, tokens);
            }
            failed.append(&mut errors);
        }
        failed
    }

    /// Tokenize `lines`, storing line-local payloads in the line index
    ///
    /// Returns the tokens of the successful lines with absolute ranges, and the
    /// failures.
    fn tokenize_lines(&mut self, lines: Range<usize>) -> (Vec<Token>, Vec<(usize, LexError)>) {
        let mut tokens = Vec::new();
        let mut failed = Vec::new();

        for number in lines {
            let Some(line) = self.lines.lookup(number) else {
                break;
            };
            let line_range = line.range.clone();
            let text: Cow<'_, str> = self.buffer.slice(line_range.clone()).into();

            match tokenize_line(&text, &self.options) {
                Ok(line_tokens) => {
                    tokens.extend(
                        line_tokens
                            .iter()
                            .map(|token| token.offset_by(line_range.start)),
                    );
                    self.lines.set_info_of(number, Some(line_tokens));
                }
                Err(e) => {
                    tracing::debug!(line = number, error = %e, "line failed to tokenize");
                    self.lines.set_info_of(number, None);
                    failed.push((number, e));
                }
            }
        }

        (tokens, failed)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn token_at(&self, location: usize) -> TokenAt<'_> {
        query::token_at(&self.lines, location)
    }

    pub fn token_on_line(&self, line: usize, column: usize) -> Option<TokenAt<'_>> {
        query::token_on_line(&self.lines, line, column)
    }

    /// The token at `location` with an absolute range
    pub fn token_only_at(&self, location: usize) -> Option<Token> {
        query::token_only_at(&self.lines, location)
    }

    /// Partner of the bracket ending at `location`, searching only lines in `within`
    pub fn matching_bracket(&self, location: usize, within: Range<usize>) -> Option<Range<usize>> {
        brackets::matching_bracket(&self.lines, &self.language, location, within)
    }

    /// Partner of the bracket ending at `location`, within
    /// [`bracket_search_lines`](Self::bracket_search_lines) of its line
    pub fn matching_bracket_near(&self, location: usize) -> Option<Range<usize>> {
        let line = self.lines.line_of(location)?;
        let within = line.saturating_sub(self.bracket_search_lines)
            ..line.saturating_add(self.bracket_search_lines).saturating_add(1);
        self.matching_bracket(location, within)
    }

    /// Visit the cached tokens of `range`
    pub fn enumerate_tokens<'a>(&'a self, range: Range<usize>, visit: impl FnMut(&'a Token)) {
        self.tokens.enumerate_in(range, visit);
    }

    /// Visit cached tokens from `location` on until `visit` breaks
    pub fn enumerate_tokens_from<'a>(
        &'a self,
        location: usize,
        visit: impl FnMut(&'a Token) -> ControlFlow<()>,
    ) {
        self.tokens.enumerate_from(location, visit);
    }
}
