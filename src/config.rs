//! Scanner configuration: the keyword set and operator table.
//!
//! Modeled as an explicit immutable object passed into the scanner
//! rather than ambient global state, so independent scans stay
//! isolated and tests can construct variants freely.

use std::collections::HashMap;

use crate::token::TokenKind;

/// Operator and punctuation spellings in match priority order.
///
/// Every multi-character operator appears before any of its
/// single-character prefixes; the scanner takes the first entry the
/// remaining input starts with, which yields maximal munch.
const OPERATORS: &[(&str, TokenKind)] = &[
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::NotEq),
    ("<=", TokenKind::LessEq),
    (">=", TokenKind::GreaterEq),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
    ("=", TokenKind::Assign),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("!", TokenKind::Not),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    (",", TokenKind::Comma),
    (";", TokenKind::Semicolon),
];

/// Immutable lexer configuration for one language definition.
///
/// [`LexConfig::default`] gives the AquaLang keyword set and
/// operator table.
#[derive(Debug, Clone)]
pub struct LexConfig {
    keywords: HashMap<&'static str, TokenKind>,
    operators: &'static [(&'static str, TokenKind)],
    stop_on_first_error: bool,
}

impl LexConfig {
    /// Builds the AquaLang configuration.
    #[must_use]
    pub fn new() -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("func", TokenKind::Func);
        keywords.insert("if", TokenKind::If);
        keywords.insert("elif", TokenKind::Elif);
        keywords.insert("else", TokenKind::Else);
        keywords.insert("while", TokenKind::While);
        keywords.insert("for", TokenKind::For);
        keywords.insert("break", TokenKind::Break);
        keywords.insert("continue", TokenKind::Continue);
        keywords.insert("return", TokenKind::Return);
        keywords.insert("print", TokenKind::Print);
        // Both spellings are accepted for the input builtin.
        keywords.insert("input", TokenKind::Input);
        keywords.insert("Input", TokenKind::Input);
        keywords.insert("int", TokenKind::Int);
        keywords.insert("float", TokenKind::Float);
        keywords.insert("bool", TokenKind::Bool);
        keywords.insert("char", TokenKind::Char);
        keywords.insert("string", TokenKind::Str);
        keywords.insert("true", TokenKind::BoolLit(true));
        keywords.insert("false", TokenKind::BoolLit(false));

        Self {
            keywords,
            operators: OPERATORS,
            stop_on_first_error: false,
        }
    }

    /// Ends the scan at the first reported error of any severity
    /// (the end-of-file token is still emitted).
    #[must_use]
    pub const fn stop_on_first_error(mut self, stop: bool) -> Self {
        self.stop_on_first_error = stop;
        self
    }

    /// Looks up a matched identifier in the reserved-word table.
    #[must_use]
    pub fn keyword(&self, ident: &str) -> Option<&TokenKind> {
        self.keywords.get(ident)
    }

    /// The operator table in match priority order.
    #[must_use]
    pub const fn operators(&self) -> &'static [(&'static str, TokenKind)] {
        self.operators
    }

    pub(crate) const fn halts_on_first_error(&self) -> bool {
        self.stop_on_first_error
    }
}

impl Default for LexConfig {
    fn default() -> Self {
        Self::new()
    }
}
