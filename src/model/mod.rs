//! Editing session model
//!
//! A [`Document`] owns the buffer together with everything derived from it, and keeps
//! them in sync across edits.

pub mod document;

pub use document::{Document, EditOutcome};
