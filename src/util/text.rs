//! Character classification shared by the lexer and the line index

/// Check if a character ends a line
///
/// `\r` is not a break on its own: in `\r\n` the `\n` ends the line and a lone `\r`
/// is treated as blank space.
pub fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Check if a character is blank space that separates tokens on a line
pub fn is_blank(ch: char) -> bool {
    ch == '\r' || (ch.is_whitespace() && !is_line_break(ch))
}

/// Check if a character can be part of an identifier or keyword
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '@' || ch == '_'
}
