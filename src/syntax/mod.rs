//! Syntax highlighting classification
//!
//! Maps lexer tokens to highlight classes and per-line highlight spans that a
//! renderer can colour directly.

mod highlights;

pub use highlights::{HighlightClass, HighlightToken, LineHighlights};
