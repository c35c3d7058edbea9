//! AquaLang lexer.
//!
//! Converts AquaLang source text into an ordered sequence of
//! classified tokens for a downstream parser, collecting lexical
//! errors along the way. AquaLang blends C-style syntax with
//! Python-style constructs; the lexer covers its keywords, ASCII
//! identifiers, integer/float/string/char/bool literals, operators,
//! punctuation, and both comment forms.
//!
//! # Quick start
//!
//! ## Tokenize a clean program
//!
//! ```
//! use aqualang_lex::{TokenKind, tokenize};
//!
//! let tokens = tokenize("int x = 10;").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Int);
//! assert_eq!(tokens[1].lexeme, "x");
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
//! ```
//!
//! ## Collect every error in one pass
//!
//! ```
//! use aqualang_lex::{LexConfig, scan};
//!
//! let output = scan("int x = #;", &LexConfig::default());
//! assert!(!output.is_clean());
//! for err in &output.errors {
//!     eprintln!("{}", err.render("main.aq"));
//! }
//! ```
//!
//! The token stream always terminates with exactly one
//! [`TokenKind::Eof`] token, even when errors were reported; check
//! [`ScanOutput::is_clean`] before handing tokens to a parser.

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod classify;
pub mod config;
pub mod lexer;
pub mod token;

pub use config::LexConfig;
pub use lexer::{LexError, LexErrorKind, ScanOutput, scan, tokenize};
pub use token::{Span, Token, TokenKind};
