/// Source location for tokens and error reporting.
///
/// Line and column are 1-based and point at the first character of
/// the token or offending text. File names are not stored here; the
/// caller that knows the origin prefixes them when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer.
///
/// Keywords get one variant each and are resolved by table lookup
/// after the identifier rule matches, never by a dedicated pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords.
    /// `func`.
    Func,
    /// `if`.
    If,
    /// `elif`.
    Elif,
    /// `else`.
    Else,
    /// `while`.
    While,
    /// `for`.
    For,
    /// `break`.
    Break,
    /// `continue`.
    Continue,
    /// `return`.
    Return,
    /// `print`.
    Print,
    /// `input` (the spelling `Input` is accepted too).
    Input,

    // Type keywords.
    /// `int`.
    Int,
    /// `float`.
    Float,
    /// `bool`.
    Bool,
    /// `char`.
    Char,
    /// `string`.
    Str,

    /// Identifier that is not a reserved word.
    Ident,

    // Literals.
    /// Integer literal, decimal (`42`) or hexadecimal (`0xFF`).
    IntLit,
    /// Floating literal (`3.14`, `5.5e-3`, `1e10`).
    FloatLit,
    /// String literal; `value` holds the text with escapes decoded.
    StringLit { value: String },
    /// Character literal; `value` holds the decoded character.
    CharLit { value: char },
    /// Boolean literal (`true` / `false`).
    BoolLit(bool),

    // Operators.
    /// `+`.
    Plus,
    /// `-`.
    Minus,
    /// `*`.
    Star,
    /// `/`.
    Slash,
    /// `%`.
    Percent,
    /// `<`.
    Less,
    /// `>`.
    Greater,
    /// `<=`.
    LessEq,
    /// `>=`.
    GreaterEq,
    /// `==`.
    EqEq,
    /// `!=`.
    NotEq,
    /// `!`.
    Not,
    /// `&&`.
    And,
    /// `||`.
    Or,
    /// `=`.
    Assign,

    // Punctuation.
    /// `(`.
    LParen,
    /// `)`.
    RParen,
    /// `[`.
    LBracket,
    /// `]`.
    RBracket,
    /// `{`.
    LBrace,
    /// `}`.
    RBrace,
    /// `,`.
    Comma,
    /// `;`.
    Semicolon,

    /// End-of-file marker; always the final token, exactly once.
    Eof,
}

impl TokenKind {
    /// Returns true for reserved-word kinds (type keywords included).
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Func
                | Self::If
                | Self::Elif
                | Self::Else
                | Self::While
                | Self::For
                | Self::Break
                | Self::Continue
                | Self::Return
                | Self::Print
                | Self::Input
                | Self::Int
                | Self::Float
                | Self::Bool
                | Self::Char
                | Self::Str
        )
    }

    /// Stable human-readable name, used by the CLI table and in
    /// diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Func => "func",
            Self::If => "if",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::While => "while",
            Self::For => "for",
            Self::Break => "break",
            Self::Continue => "continue",
            Self::Return => "return",
            Self::Print => "print",
            Self::Input => "input",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Str => "string",
            Self::Ident => "identifier",
            Self::IntLit => "int literal",
            Self::FloatLit => "float literal",
            Self::StringLit { .. } => "string literal",
            Self::CharLit { .. } => "char literal",
            Self::BoolLit(_) => "bool literal",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEq => "<=",
            Self::GreaterEq => ">=",
            Self::EqEq => "==",
            Self::NotEq => "!=",
            Self::Not => "!",
            Self::And => "&&",
            Self::Or => "||",
            Self::Assign => "=",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Eof => "EOF",
        }
    }
}

/// A single token: its kind, the exact matched source substring, and
/// the location of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}
