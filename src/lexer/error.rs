//! Lexer errors

/// Failure to tokenize a piece of text
///
/// Unterminated strings and comments are not errors; they produce tokens covering
/// what was scanned. Only characters no rule accepts abort the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character no lexical rule accepts, with its char offset in the scanned text
    UnexpectedCharacter { character: char, position: usize },
}

impl LexError {
    /// Char offset of the failure in the scanned text
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter {
                character,
                position,
            } => write!(
                f,
                "unrecognized character {:?} at offset {}",
                character, position
            ),
        }
    }
}

impl std::error::Error for LexError {}
