//! Character classification predicates.
//!
//! Pure, stateless helpers over single bytes. AquaLang identifiers
//! are ASCII-only; anything outside these classes is either an
//! operator/punctuation byte or a lexical error.

/// First character of an identifier: ASCII letter or underscore.
#[must_use]
pub const fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

/// Continuation character of an identifier: letter, digit, or
/// underscore.
#[must_use]
pub const fn is_ident_continue(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

/// Decimal digit.
#[must_use]
pub const fn is_digit(ch: u8) -> bool {
    ch.is_ascii_digit()
}

/// Hexadecimal digit (for `0x...` integer literals).
#[must_use]
pub const fn is_hex_digit(ch: u8) -> bool {
    ch.is_ascii_hexdigit()
}

/// Inter-token whitespace: space, tab, carriage return, newline.
/// Newlines additionally advance the scanner's line counter.
#[must_use]
pub const fn is_whitespace(ch: u8) -> bool {
    matches!(ch, b' ' | b'\t' | b'\r' | b'\n')
}
