//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::ops::Range;

use pgedit::{Document, LineIndex};

/// Char ranges of all lines in the index
pub fn line_ranges<T>(index: &LineIndex<T>) -> Vec<Range<usize>> {
    index.lines().map(|line| line.range.clone()).collect()
}

/// Assert that the lines of `index` partition `text` exactly
pub fn assert_partition<T>(index: &LineIndex<T>, text: &str) {
    let chars: Vec<char> = text.chars().collect();
    let mut expected_start = 0;
    let mut rebuilt = String::new();

    for line in index.lines() {
        assert_eq!(
            line.start(),
            expected_start,
            "lines are not contiguous in {:?}",
            text
        );
        rebuilt.extend(&chars[line.range.clone()]);
        expected_start = line.end();
    }

    assert_eq!(expected_start, chars.len(), "lines do not reach the end of {:?}", text);
    assert_eq!(rebuilt, text);
}

/// Assert that an edited document is in the state a freshly opened one would be
pub fn assert_matches_fresh(document: &Document, context: &str) {
    let text = document.text();
    let fresh = Document::with_text(&text);

    assert_partition(document.line_index(), &text);
    assert_eq!(
        line_ranges(document.line_index()),
        line_ranges(fresh.line_index()),
        "line ranges differ ({context}) for {text:?}"
    );
    for (number, (line, fresh_line)) in document
        .line_index()
        .lines()
        .zip(fresh.line_index().lines())
        .enumerate()
    {
        assert_eq!(
            line.info, fresh_line.info,
            "line {number} payload differs ({context}) for {text:?}"
        );
    }
    assert_eq!(
        document.token_cache(),
        fresh.token_cache(),
        "token cache differs ({context}) for {text:?}"
    );
}

/// A small psql script touching every token class
pub fn sample_script() -> &'static str {
    "\\timing on\n\
     -- totals per account\n\
     select a.id, sum(t.amount) as total\n\
       from accounts a\n\
       join transfers t on (t.account_id = a.id)\n\
      where t.note <> 'it''s' and t.body = $$raw (text)$$\n\
      group by a.id /* keep { } */;\n"
}
