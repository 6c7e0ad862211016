//! Line index tests
//!
//! Partition and lookup properties over a range of texts, plus incremental updates.

mod common;

use common::{assert_partition, line_ranges};
use pgedit::LineIndex;
use ropey::Rope;

fn texts() -> Vec<&'static str> {
    vec![
        "",
        "\n",
        "\n\n",
        "select 1",
        "select 1;\n",
        "a\r\nb\r\n",
        "a\rb",
        "ünïcödé\nλ → μ\n",
        "one\u{2028}two",
        "trailing\n\n\n",
    ]
}

// ========================================================================
// Partition
// ========================================================================

#[test]
fn test_lines_partition_every_text() {
    for text in texts() {
        let index: LineIndex<()> = LineIndex::from(text);
        assert_partition(&index, text);
    }
}

#[test]
fn test_text_len_matches_char_count() {
    for text in texts() {
        let index: LineIndex<()> = LineIndex::from(text);
        assert_eq!(index.text_len(), text.chars().count());
    }
}

// ========================================================================
// Lookups
// ========================================================================

#[test]
fn test_line_containing_finds_unique_line() {
    for text in texts() {
        let index: LineIndex<()> = LineIndex::from(text);
        for i in 0..text.chars().count() {
            let line = index.line_containing(i).unwrap();
            let matching = index
                .lines()
                .filter(|candidate| candidate.range.contains(&i))
                .count();
            assert_eq!(matching, 1, "{:?} at {}", text, i);
            assert!(index.lookup(line).unwrap().range.contains(&i));
        }
    }
}

#[test]
fn test_end_of_text_belongs_to_last_line() {
    for text in texts() {
        let index: LineIndex<()> = LineIndex::from(text);
        let len = text.chars().count();
        assert_eq!(index.line_of(len), Some(index.len() - 1), "{:?}", text);
        assert_eq!(index.line_containing(len), None);
    }
}

#[test]
fn test_line_and_position_of() {
    let index: LineIndex<()> = LineIndex::from("select\n  a,\n  b");
    assert_eq!(index.line_and_position_of(0), Some((0, 0)));
    assert_eq!(index.line_and_position_of(9), Some((1, 2)));
    assert_eq!(index.line_and_position_of(15), Some((2, 3)));
    assert_eq!(index.line_and_position_of(16), None);
}

// ========================================================================
// Incremental updates
// ========================================================================

#[test]
fn test_replaced_lines_have_no_payload() {
    let mut text = Rope::from_str("a\nb\nc\nd");
    let mut index: LineIndex<&str> = LineIndex::new(&text);
    for line in 0..index.len() {
        index.set_info_of(line, Some("tokens"));
    }

    text.remove(2..5);
    text.insert(2, "x\ny\nz");
    let replaced = index.update_after_editing(&text, 2..7, 2);

    assert_partition(&index, &text.to_string());
    assert_eq!(replaced, 1..4);
    for line in replaced.clone() {
        assert_eq!(index.info_of(line), None);
    }
    assert_eq!(index.info_of(0), Some(&"tokens"));
    assert_eq!(index.info_of(replaced.end), Some(&"tokens"));
}

#[test]
fn test_monkey_edits_keep_partition() {
    let mut text = Rope::from_str("select 1;\r\nselect 2;\n\u{2028}end\n");
    let mut index: LineIndex<()> = LineIndex::new(&text);
    let inserts = ["", "\r", "\n", "é", "\r\n\r\n", "abc", "\u{2029}"];

    for step in 0..300usize {
        let len = text.len_chars();
        let start = (step * 13 + step / 7) % (len + 1);
        let remove = (step % 4).min(len - start);
        let insert = inserts[step % inserts.len()];

        text.remove(start..start + remove);
        text.insert(start, insert);
        let inserted = insert.chars().count();
        index.update_after_editing(
            &text,
            start..start + inserted,
            inserted as isize - remove as isize,
        );

        let fresh = LineIndex::<()>::new(&text);
        assert_eq!(
            line_ranges(&index),
            line_ranges(&fresh),
            "step {step}: {:?}",
            text.to_string()
        );
    }
}
