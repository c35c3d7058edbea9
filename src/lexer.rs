use std::fmt;

use log::debug;

use crate::classify::{is_digit, is_hex_digit, is_ident_continue, is_ident_start, is_whitespace};
use crate::config::LexConfig;
use crate::token::{Span, Token, TokenKind};

/// Classifies a lexer error.
///
/// The unterminated variants are fatal: the scanner position after
/// one of them cannot be trusted, so the scan ends there and the
/// end-of-file token is emitted immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Byte that cannot start any token.
    UnexpectedCharacter(char),
    /// Digit run that does not form a valid numeric literal
    /// (`123abc`, `0xZZ`, `1efoo`).
    MalformedNumber,
    /// Identifier run containing `$` (`foo$bar`).
    MalformedIdentifier,
    /// String literal reaching a newline or end-of-input before the
    /// closing quote.
    UnterminatedString,
    /// Char literal with no closing quote, or an empty one.
    UnterminatedCharLiteral,
    /// Block comment still open at end-of-input.
    UnterminatedComment,
}

impl LexErrorKind {
    /// True for errors that end the scan.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedString | Self::UnterminatedCharLiteral | Self::UnterminatedComment
        )
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(_) => write!(f, "invalid character"),
            Self::MalformedNumber => write!(f, "malformed number literal"),
            Self::MalformedIdentifier => write!(f, "invalid identifier"),
            Self::UnterminatedString => write!(f, "unterminated string"),
            Self::UnterminatedCharLiteral => {
                write!(f, "unterminated char literal")
            }
            Self::UnterminatedComment => {
                write!(f, "unterminated block comment")
            }
        }
    }
}

/// Error produced during lexing.
///
/// `text` is the offending source substring (for unterminated
/// constructs, its first line).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}: '{text}'", span.line, span.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub text: String,
    pub span: Span,
}

impl LexError {
    /// Renders the error with a file name prefix:
    /// `<file>:<line>:<column>: <reason>: '<offending text>'`.
    #[must_use]
    pub fn render(&self, file: &str) -> String {
        format!(
            "{file}:{}:{}: {}: '{}'",
            self.span.line, self.span.column, self.kind, self.text
        )
    }
}

/// Result of scanning one source buffer.
///
/// `tokens` always ends with exactly one [`TokenKind::Eof`] token,
/// even when errors were reported. Consumers must check `errors`
/// before trusting the token stream as parser input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl ScanOutput {
    /// True when no lexical errors were reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Scan a source buffer into tokens and errors with the given
/// configuration.
#[must_use]
pub fn scan(input: &str, config: &LexConfig) -> ScanOutput {
    debug!("scanning {} bytes", input.len());
    let output = Lexer::new(input, config).scan();
    debug!(
        "scan complete: {} tokens, {} errors",
        output.tokens.len(),
        output.errors.len()
    );
    output
}

/// Tokenize with the default AquaLang configuration.
///
/// # Errors
///
/// Returns the first reported `LexError`, if any. Use [`scan`] to
/// get the full error list alongside the tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut output = scan(input, &LexConfig::default());
    if output.errors.is_empty() {
        Ok(output.tokens)
    } else {
        Err(output.errors.remove(0))
    }
}

struct Lexer<'a> {
    src: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
    col: usize,
    config: &'a LexConfig,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str, config: &'a LexConfig) -> Self {
        let bytes = src.as_bytes();
        let start = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            3
        } else {
            0
        };
        Self {
            src,
            input: bytes,
            pos: start,
            line: 1,
            col: 1,
            config,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn scan(mut self) -> ScanOutput {
        while self.pos < self.input.len() {
            let ch = self.input[self.pos];

            match ch {
                c if is_whitespace(c) => self.advance(),
                b'/' if self.peek_at(1) == Some(b'/') => {
                    self.skip_line_comment();
                }
                b'/' if self.peek_at(1) == Some(b'*') => {
                    if let Err(err) = self.skip_block_comment() {
                        self.report(err);
                        break;
                    }
                }
                b'"' => match self.read_string() {
                    Ok(token) => self.tokens.push(token),
                    Err(err) => {
                        self.report(err);
                        break;
                    }
                },
                b'\'' => match self.read_char_literal() {
                    Ok(token) => self.tokens.push(token),
                    Err(err) => {
                        self.report(err);
                        break;
                    }
                },
                c if is_digit(c) => self.read_number(),
                c if is_ident_start(c) => self.read_identifier(),
                _ => self.read_operator(),
            }

            if self.config.halts_on_first_error() && !self.errors.is_empty() {
                break;
            }
        }

        self.tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            span: self.span(),
        });

        ScanOutput {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn current_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Advances one byte; newline bumps the line counter and resets
    /// the column. Only call on ASCII bytes.
    fn advance(&mut self) {
        if self.pos < self.input.len() {
            if self.input[self.pos] == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    /// Advances one full character (UTF-8 aware), counting it as a
    /// single column.
    fn advance_char(&mut self) {
        if let Some(ch) = self.current_char() {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn report(&mut self, err: LexError) {
        debug!("lex error: {err}");
        self.errors.push(err);
    }

    fn error_at(&self, kind: LexErrorKind, text: impl Into<String>, span: Span) -> LexError {
        LexError {
            kind,
            text: text.into(),
            span,
        }
    }

    /// First line of the source consumed since `start`, for error
    /// snippets.
    fn snippet_since(&self, start: usize) -> String {
        let raw = &self.src[start..self.pos];
        raw.split('\n').next().unwrap_or(raw).to_string()
    }

    fn skip_line_comment(&mut self) {
        // Leave the newline for the main loop.
        while self.pos < self.input.len() && self.input[self.pos] != b'\n' {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let span = self.span();
        let start = self.pos;
        self.advance(); // skip /
        self.advance(); // skip *

        while self.pos < self.input.len() {
            if self.input[self.pos] == b'*' && self.peek_at(1) == Some(b'/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(self.error_at(
            LexErrorKind::UnterminatedComment,
            self.snippet_since(start),
            span,
        ))
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        let start = self.pos;
        self.advance(); // skip opening quote

        let mut value = String::new();
        loop {
            match self.current_char() {
                None | Some('\n') => {
                    return Err(self.error_at(
                        LexErrorKind::UnterminatedString,
                        self.snippet_since(start),
                        span,
                    ));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.current_char() {
                        // A backslash cannot hide a newline; strings
                        // stay on one line.
                        None | Some('\n') => {
                            return Err(self.error_at(
                                LexErrorKind::UnterminatedString,
                                self.snippet_since(start),
                                span,
                            ));
                        }
                        Some(esc) => {
                            if let Some(decoded) = decode_escape(esc) {
                                value.push(decoded);
                            } else {
                                // Unknown escape keeps the backslash.
                                value.push('\\');
                                value.push(esc);
                            }
                            self.advance_char();
                        }
                    }
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance_char();
                }
            }
        }

        Ok(Token {
            kind: TokenKind::StringLit { value },
            lexeme: self.src[start..self.pos].to_string(),
            span,
        })
    }

    fn read_char_literal(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        let start = self.pos;
        self.advance(); // skip opening quote

        let value = match self.current_char() {
            None | Some('\n' | '\'') => {
                return Err(self.error_at(
                    LexErrorKind::UnterminatedCharLiteral,
                    self.snippet_since(start),
                    span,
                ));
            }
            Some('\\') => {
                self.advance();
                match self.current_char() {
                    None | Some('\n') => {
                        return Err(self.error_at(
                            LexErrorKind::UnterminatedCharLiteral,
                            self.snippet_since(start),
                            span,
                        ));
                    }
                    Some(esc) => {
                        self.advance_char();
                        decode_escape(esc).unwrap_or(esc)
                    }
                }
            }
            Some(ch) => {
                self.advance_char();
                ch
            }
        };

        if self.peek() == Some(b'\'') {
            self.advance();
            Ok(Token {
                kind: TokenKind::CharLit { value },
                lexeme: self.src[start..self.pos].to_string(),
                span,
            })
        } else {
            Err(self.error_at(
                LexErrorKind::UnterminatedCharLiteral,
                self.snippet_since(start),
                span,
            ))
        }
    }

    fn read_number(&mut self) {
        let span = self.span();
        let start = self.pos;

        // Hexadecimal branch: 0x / 0X prefix.
        if self.input[self.pos] == b'0' && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.advance();
            self.advance();
            let digits_start = self.pos;
            while self.peek().is_some_and(is_hex_digit) {
                self.advance();
            }
            let no_digits = self.pos == digits_start;
            if no_digits || self.peek().is_some_and(is_ident_continue) {
                self.malformed_run(LexErrorKind::MalformedNumber, start, span);
                return;
            }
            self.push_token(TokenKind::IntLit, start, span);
            return;
        }

        while self.peek().is_some_and(is_digit) {
            self.advance();
        }

        let mut is_float = false;

        // Fractional part needs a digit after the dot, otherwise the
        // dot is left for the main loop.
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(is_digit) {
            self.advance();
            while self.peek().is_some_and(is_digit) {
                self.advance();
            }
            is_float = true;
        }

        // C-style exponent, valid after a fraction or directly after
        // the integer part (1e10).
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let digit_offset = if matches!(self.peek_at(1), Some(b'+' | b'-')) {
                2
            } else {
                1
            };
            if self.peek_at(digit_offset).is_some_and(is_digit) {
                self.advance(); // e
                if digit_offset == 2 {
                    self.advance(); // sign
                }
                while self.peek().is_some_and(is_digit) {
                    self.advance();
                }
                is_float = true;
            } else if !is_float {
                // Digit run bleeding into identifier characters.
                self.malformed_run(LexErrorKind::MalformedNumber, start, span);
                return;
            }
        }

        if !is_float && self.peek().is_some_and(is_ident_continue) {
            self.malformed_run(LexErrorKind::MalformedNumber, start, span);
            return;
        }

        let kind = if is_float {
            TokenKind::FloatLit
        } else {
            TokenKind::IntLit
        };
        self.push_token(kind, start, span);
    }

    fn read_identifier(&mut self) {
        let span = self.span();
        let start = self.pos;

        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }

        // An identifier run containing `$` is rejected as a whole.
        if self.peek() == Some(b'$') {
            while self
                .peek()
                .is_some_and(|c| is_ident_continue(c) || c == b'$')
            {
                self.advance();
            }
            let text = self.src[start..self.pos].to_string();
            self.report(self.error_at(LexErrorKind::MalformedIdentifier, text, span));
            return;
        }

        let lexeme = &self.src[start..self.pos];
        let kind = self
            .config
            .keyword(lexeme)
            .cloned()
            .unwrap_or(TokenKind::Ident);
        self.push_token(kind, start, span);
    }

    fn read_operator(&mut self) {
        let rest = &self.src[self.pos..];
        for (spelling, kind) in self.config.operators() {
            if rest.starts_with(spelling) {
                let span = self.span();
                self.tokens.push(Token {
                    kind: kind.clone(),
                    lexeme: (*spelling).to_string(),
                    span,
                });
                for _ in 0..spelling.len() {
                    self.advance();
                }
                return;
            }
        }

        // No rule matches: report the single offending character and
        // keep scanning.
        if let Some(ch) = self.current_char() {
            let span = self.span();
            self.advance_char();
            self.report(self.error_at(
                LexErrorKind::UnexpectedCharacter(ch),
                ch.to_string(),
                span,
            ));
        }
    }

    /// Consumes the rest of an identifier-character run and reports
    /// the whole slice as one non-fatal error.
    fn malformed_run(&mut self, kind: LexErrorKind, start: usize, span: Span) {
        while self.peek().is_some_and(is_ident_continue) {
            self.advance();
        }
        let text = self.src[start..self.pos].to_string();
        self.report(self.error_at(kind, text, span));
    }

    fn push_token(&mut self, kind: TokenKind, start: usize, span: Span) {
        self.tokens.push(Token {
            kind,
            lexeme: self.src[start..self.pos].to_string(),
            span,
        });
    }
}

/// Decodes one escape character; `None` means the escape is not
/// recognised.
const fn decode_escape(esc: char) -> Option<char> {
    match esc {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        '\'' => Some('\''),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let output = scan(input, &LexConfig::default());
        assert!(output.is_clean(), "unexpected errors: {:?}", output.errors);
        output.tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn simple_declaration() {
        assert_eq!(
            kinds("int x = 10; // comment"),
            vec![
                TokenKind::Int,
                TokenKind::Ident,
                TokenKind::Assign,
                TokenKind::IntLit,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keywords_beat_identifiers() {
        assert_eq!(kinds("while"), vec![TokenKind::While, TokenKind::Eof]);
        assert_eq!(kinds("whilex"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn maximal_munch_on_operators() {
        assert_eq!(kinds("<="), vec![TokenKind::LessEq, TokenKind::Eof]);
        assert_eq!(
            kinds("< ="),
            vec![TokenKind::Less, TokenKind::Assign, TokenKind::Eof]
        );
        assert_eq!(
            kinds("===")[..2],
            [TokenKind::EqEq, TokenKind::Assign][..]
        );
    }

    #[test]
    fn float_with_exponent_is_one_token() {
        let output = scan("5.5e-3", &LexConfig::default());
        assert!(output.is_clean());
        assert_eq!(output.tokens[0].kind, TokenKind::FloatLit);
        assert_eq!(output.tokens[0].lexeme, "5.5e-3");
        assert_eq!(output.tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn integer_exponent_is_float() {
        assert_eq!(kinds("1e10"), vec![TokenKind::FloatLit, TokenKind::Eof]);
    }

    #[test]
    fn trailing_dot_stays_separate() {
        let output = scan("3.", &LexConfig::default());
        assert_eq!(output.tokens[0].kind, TokenKind::IntLit);
        assert_eq!(
            output.errors[0].kind,
            LexErrorKind::UnexpectedCharacter('.')
        );
    }

    #[test]
    fn hex_literal() {
        let output = scan("0xFF", &LexConfig::default());
        assert!(output.is_clean());
        assert_eq!(output.tokens[0].lexeme, "0xFF");
        assert_eq!(output.tokens[0].kind, TokenKind::IntLit);
    }

    #[test]
    fn malformed_number_consumes_whole_run() {
        let output = scan("123abc ok", &LexConfig::default());
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, LexErrorKind::MalformedNumber);
        assert_eq!(output.errors[0].text, "123abc");
        // Scanning continues after the bad run.
        assert_eq!(output.tokens[0].kind, TokenKind::Ident);
        assert_eq!(output.tokens[0].lexeme, "ok");
    }

    #[test]
    fn dollar_identifier_is_rejected() {
        let output = scan("foo$bar baz", &LexConfig::default());
        assert_eq!(output.errors[0].kind, LexErrorKind::MalformedIdentifier);
        assert_eq!(output.errors[0].text, "foo$bar");
        assert_eq!(output.tokens[0].lexeme, "baz");
    }

    #[test]
    fn string_with_escapes() {
        let output = scan(r#""a\tb\"c""#, &LexConfig::default());
        assert!(output.is_clean());
        match &output.tokens[0].kind {
            TokenKind::StringLit { value } => assert_eq!(value, "a\tb\"c"),
            other => panic!("expected string literal, got {other:?}"),
        }
        assert_eq!(output.tokens[0].lexeme, r#""a\tb\"c""#);
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let output = scan("\"abc", &LexConfig::default());
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedString);
        // No value tokens, but EOF still appears.
        assert_eq!(output.tokens.len(), 1);
        assert_eq!(output.tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn newline_in_string_is_fatal() {
        let output = scan("\"abc\ndef\"", &LexConfig::default());
        assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedString);
        assert_eq!(output.tokens.last().map(|t| &t.kind), Some(&TokenKind::Eof));
    }

    #[test]
    fn backslash_newline_in_string_is_fatal() {
        // An escape cannot carry a string onto the next line.
        let output = scan("\"abc\\\ndef\"", &LexConfig::default());
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedString);
        assert_eq!(output.tokens.len(), 1);
        assert_eq!(output.tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn char_literals() {
        let output = scan(r"'a' '\n'", &LexConfig::default());
        assert!(output.is_clean());
        assert!(matches!(
            output.tokens[0].kind,
            TokenKind::CharLit { value: 'a' }
        ));
        assert!(matches!(
            output.tokens[1].kind,
            TokenKind::CharLit { value: '\n' }
        ));
    }

    #[test]
    fn unterminated_char_is_fatal() {
        let output = scan("'a", &LexConfig::default());
        assert_eq!(
            output.errors[0].kind,
            LexErrorKind::UnterminatedCharLiteral
        );
        assert_eq!(output.tokens.len(), 1);
    }

    #[test]
    fn block_comment_tracks_lines() {
        let output = scan("/* a\nb\nc */ x", &LexConfig::default());
        assert!(output.is_clean());
        assert_eq!(output.tokens[0].lexeme, "x");
        assert_eq!(output.tokens[0].span.line, 3);
    }

    #[test]
    fn unterminated_comment_is_fatal() {
        let output = scan("x /* open", &LexConfig::default());
        assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedComment);
        assert_eq!(output.tokens.len(), 2); // x + EOF
    }

    #[test]
    fn invalid_character_recovers() {
        let output = scan("# int", &LexConfig::default());
        assert_eq!(
            output.errors[0].kind,
            LexErrorKind::UnexpectedCharacter('#')
        );
        assert_eq!(output.tokens[0].kind, TokenKind::Int);
        assert_eq!(output.tokens.last().map(|t| &t.kind), Some(&TokenKind::Eof));
    }

    #[test]
    fn stop_on_first_error_still_emits_eof() {
        let config = LexConfig::new().stop_on_first_error(true);
        let output = scan("# int", &config);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.tokens.len(), 1);
        assert_eq!(output.tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn bool_literals() {
        let output = scan("true false", &LexConfig::default());
        assert_eq!(output.tokens[0].kind, TokenKind::BoolLit(true));
        assert_eq!(output.tokens[1].kind, TokenKind::BoolLit(false));
    }

    #[test]
    fn empty_input_is_just_eof() {
        let output = scan("", &LexConfig::default());
        assert!(output.is_clean());
        assert_eq!(output.tokens.len(), 1);
        assert_eq!(output.tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn error_render_format() {
        let output = scan("#", &LexConfig::default());
        assert_eq!(
            output.errors[0].render("main.aq"),
            "main.aq:1:1: invalid character: '#'"
        );
    }

    #[test]
    fn tokenize_returns_first_error() {
        let err = tokenize("\"abc").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn bom_stripping() {
        let tokens = tokenize("\u{FEFF}int").expect("tokenize");
        assert_eq!(tokens[0].kind, TokenKind::Int);
    }
}
