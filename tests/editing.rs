//! Editing session tests
//!
//! Every edit must leave the document in the same state as re-opening its text.

mod common;

use std::ops::ControlFlow;

use common::{assert_matches_fresh, sample_script};
use pgedit::lexer::{Punctuation, TokenKind};
use pgedit::Document;

// ========================================================================
// Incremental retokenization
// ========================================================================

#[test]
fn test_typing_a_statement_char_by_char() {
    let mut document = Document::with_text(sample_script());
    let statement = "select (a, 'b''c', $$d$$) from t; -- done\n";

    let mut at = document.len_chars();
    for ch in statement.chars() {
        document.insert(at, &ch.to_string());
        at += 1;
        assert_matches_fresh(&document, &format!("after typing {ch:?}"));
    }
}

#[test]
fn test_monkey_edits_match_fresh_document() {
    let mut document = Document::with_text(sample_script());
    let inserts = [
        "(", ")", "\n", "'", "$$", "-- c\n", "/*", "*/", "select", "", "]", "\\", "\r", "{",
    ];

    for step in 0..400usize {
        let len = document.len_chars();
        let start = (step * 31 + step / 3) % (len + 1);
        let remove = (step % 5).min(len - start);
        let insert = inserts[step % inserts.len()];

        document.apply_edit(start..start + remove, insert);
        assert_matches_fresh(&document, &format!("step {step}"));
    }
}

#[test]
fn test_joining_lines_retokenizes_both() {
    let mut document = Document::with_text("select 'a\n' from t");
    // the string ends at the line break, so `from t` starts a string
    assert!(document
        .token_cache()
        .tokens()
        .iter()
        .any(|token| token.kind == TokenKind::StringLiteral(" from t".to_string())));

    let outcome = document.delete(9..10);
    assert_eq!(document.text(), "select 'a' from t");
    assert_eq!(outcome.invalidated_lines, 1);
    assert_matches_fresh(&document, "after join");
}

#[test]
fn test_edit_range_is_clamped() {
    let mut document = Document::with_text("abc");
    let outcome = document.apply_edit(2..99, "");
    assert_eq!(document.text(), "ab");
    assert_eq!(outcome.applied_range, 2..3);

    let outcome = document.apply_edit(50..60, "!");
    assert_eq!(document.text(), "ab!");
    assert_eq!(outcome.applied_range, 2..2);
    assert_matches_fresh(&document, "after clamped edits");
}

// ========================================================================
// Paired bracket deletion
// ========================================================================

#[test]
fn test_deleting_open_paren_before_close_removes_both() {
    let mut document = Document::with_text("select count()");
    let outcome = document.delete(12..13);

    assert_eq!(document.text(), "select count");
    assert_eq!(outcome.applied_range, 12..14);
    assert_eq!(outcome.delta, -2);
    assert_matches_fresh(&document, "after paired deletion");
}

#[test]
fn test_deleting_brace_pair() {
    let mut document = Document::with_text("{}x");
    document.delete(0..1);
    assert_eq!(document.text(), "x");
}

#[test]
fn test_paren_inside_string_is_not_paired() {
    let mut document = Document::with_text("'()'");
    let outcome = document.delete(1..2);
    assert_eq!(document.text(), "')'");
    assert_eq!(outcome.applied_range, 1..2);
}

// ========================================================================
// Tokenizer failures
// ========================================================================

#[test]
fn test_unrecognized_character_only_fails_its_line() {
    let mut document = Document::with_text("select 1;\nselect 2;\n");
    let outcome = document.insert(10, "]");

    assert_eq!(outcome.failed_lines.len(), 1);
    assert_eq!(outcome.failed_lines[0].0, 1);
    assert!(document.line_index().info_of(0).is_some());
    assert!(document.line_index().info_of(1).is_none());
    assert_eq!(document.token_cache().len(), 3);
    assert_matches_fresh(&document, "with a failed line");
}

// ========================================================================
// Token queries
// ========================================================================

#[test]
fn test_token_at_positions() {
    let document = Document::with_text("select a\n  from t");

    let at = document.token_at(1);
    assert_eq!(at.token.map(|t| t.kind.clone()), Some(TokenKind::Keyword("select".into())));
    assert_eq!(at.effective_range, 0..6);

    // gap between `select` and `a`
    let gap = document.token_at(6);
    assert_eq!(gap.token, None);
    assert_eq!(gap.effective_range, 6..7);

    let from = document.token_on_line(1, 3).unwrap();
    assert_eq!(from.effective_range, 11..15);
    assert_eq!(from.token.unwrap().range, 2..6);

    assert_eq!(document.token_at(100).effective_range, 100..101);
}

#[test]
fn test_first_token_index_at_starts_midpoints_and_end() {
    let document = Document::with_text("select a, bb from t");
    let cache = document.token_cache();
    let tokens = cache.tokens();

    for (i, token) in tokens.iter().enumerate() {
        assert_eq!(cache.first_token_index(token.range.start), Some(i));
        if token.len() > 1 {
            let mid = token.range.start + 1;
            let expected = (i + 1 < tokens.len()).then_some(i + 1);
            assert_eq!(cache.first_token_index(mid), expected);
        }
    }
    let end = tokens.last().unwrap().range.end;
    assert_eq!(cache.first_token_index(end), None);
}

#[test]
fn test_enumerate_tokens_in_range() {
    let document = Document::with_text("select a, b\nfrom t");
    let mut seen = Vec::new();
    document.enumerate_tokens(7..10, |token| seen.push(token.kind.clone()));
    assert_eq!(
        seen,
        vec![
            TokenKind::Identifier("a".into()),
            TokenKind::Punctuation(Punctuation::Comma),
            TokenKind::Identifier("b".into()),
        ]
    );

    let mut count = 0;
    document.enumerate_tokens_from(0, |_| {
        count += 1;
        ControlFlow::Continue(())
    });
    assert_eq!(count, document.token_cache().len());
}

#[test]
fn test_enumerated_tokens_outlive_the_visitor() {
    let document = Document::with_text("select a
from t;");
    let mut borrowed = Vec::new();
    document.enumerate_tokens(0..document.len_chars(), |token| borrowed.push(token));
    assert_eq!(borrowed.len(), document.token_cache().len());
    assert_eq!(borrowed[2].kind, TokenKind::Keyword("from".into()));

    let mut from_second_line = Vec::new();
    document.enumerate_tokens_from(9, |token| {
        from_second_line.push(token);
        ControlFlow::Continue(())
    });
    assert_eq!(
        from_second_line
            .iter()
            .map(|token| token.range.clone())
            .collect::<Vec<_>>(),
        vec![9..13, 14..15, 15..16]
    );
}
