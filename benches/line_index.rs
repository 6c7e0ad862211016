//! Benchmarks for the incremental line index
//!
//! Run with: cargo bench --bench line_index

mod support;

use pgedit::line_index::LineIndex;
use ropey::Rope;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Building
// ============================================================================

#[divan::bench(args = [100, 1000, 10000])]
fn build_from_rope(statements: usize) {
    let rope = Rope::from_str(&support::sample_script(statements));
    divan::black_box(LineIndex::<()>::new(&rope));
}

// ============================================================================
// Queries
// ============================================================================

#[divan::bench(args = [1000, 50000, 150000])]
fn line_containing(offset: usize) {
    let rope = Rope::from_str(&support::sample_script(2000));
    let index = LineIndex::<()>::new(&rope);
    divan::black_box(index.line_containing(divan::black_box(offset)));
}

// ============================================================================
// Incremental update
// ============================================================================

#[divan::bench(args = [1000, 10000])]
fn insert_char_middle(statements: usize) {
    let mut rope = Rope::from_str(&support::sample_script(statements));
    let mut index = LineIndex::<()>::new(&rope);
    let pos = rope.len_chars() / 2;
    rope.insert(pos, "x");
    index.update_after_editing(&rope, pos..pos + 1, 1);
    divan::black_box(index.len());
}

#[divan::bench(args = [1000, 10000])]
fn insert_newline_middle(statements: usize) {
    let mut rope = Rope::from_str(&support::sample_script(statements));
    let mut index = LineIndex::<()>::new(&rope);
    let pos = rope.len_chars() / 2;
    rope.insert(pos, "\n");
    index.update_after_editing(&rope, pos..pos + 1, 1);
    divan::black_box(index.len());
}

#[divan::bench(args = [1000, 10000])]
fn delete_line_middle(statements: usize) {
    let mut rope = Rope::from_str(&support::sample_script(statements));
    let mut index = LineIndex::<()>::new(&rope);
    let line = rope.len_lines() / 2;
    let start = rope.line_to_char(line);
    let end = rope.line_to_char(line + 1);
    rope.remove(start..end);
    index.update_after_editing(&rope, start..start, -((end - start) as isize));
    divan::black_box(index.len());
}
