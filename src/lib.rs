//! pgedit - incremental line and token structures for PostgreSQL script editing
//!
//! This crate provides the pieces a code editor needs to keep SQL text structured
//! while it is being edited: a line index updated incrementally per edit, a psql-aware
//! lexer, token lookup by location, and bracket matching.

pub mod brackets;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod language;
pub mod lexer;
pub mod line_index;
pub mod model;
pub mod query;
pub mod syntax;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use config::DialectConfig;
pub use language::{LanguageTables, SqlLanguage};
pub use lexer::{LexError, Lexer, LexerOptions, Token, TokenKind};
pub use line_index::{Line, LineIndex};
pub use model::{Document, EditOutcome};
pub use query::{TokenAt, TokenCache};
