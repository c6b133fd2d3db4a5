//! Token definitions for the Monkey language.
//!
//! Tokens are the smallest meaningful units of Monkey source code: keywords,
//! identifiers, operators, literals and punctuation. The lexer produces a flat
//! vector of [`Token`]s terminated by [`TokenKind::Eof`], and the parser
//! consumes that vector.
//!
//! # Token Categories
//!
//! - **Identifiers**: binding and parameter names (`five`, `add`, `my_var`)
//! - **Literals**: integers and strings (`42`, `"hello"`)
//! - **Keywords**: `fn`, `let`, `true`, `false`, `if`, `else`, `return`
//! - **Operators**: `=`, `+`, `-`, `!`, `*`, `/`, `<`, `>`, `==`, `!=`
//! - **Punctuation**: `,`, `;`, `(`, `)`, `{`, `}`
//! - **Special**: end-of-file marker
//!
//! # Examples
//!
//! ```rust
//! use monkey_syntax::{Token, TokenKind};
//!
//! let keyword = Token {
//!     kind: TokenKind::Let,
//!     line: 1,
//!     col: 1,
//! };
//!
//! let identifier = Token {
//!     kind: TokenKind::Ident("five".to_string()),
//!     line: 1,
//!     col: 5,
//! };
//!
//! assert_eq!(keyword.kind.to_string(), "let");
//! assert_eq!(identifier.kind.to_string(), "five");
//! ```

use std::fmt;

/// Token types that can be produced by the Monkey lexer.
///
/// Literal-bearing variants carry their semantic content (the text of an
/// identifier, the parsed value of an integer, the unescaped contents of a
/// string). Every other variant is fully described by its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // === Literals ===

    /// An identifier token (binding names, parameter names, builtin names)
    ///
    /// Examples: `x`, `add`, `len`
    Ident(String),

    /// An integer literal token (64-bit signed)
    ///
    /// Examples: `5`, `10`, `0`
    Int(i64),

    /// A string literal token, with escapes already resolved
    ///
    /// Examples: `"foobar"`, `"foo bar"`, `""`
    String(String),

    // === Operators ===

    /// Binding operator `=`
    Assign,

    /// Addition / concatenation operator `+`
    Plus,

    /// Subtraction and negation operator `-`
    Minus,

    /// Logical not operator `!`
    Bang,

    /// Multiplication operator `*`
    Asterisk,

    /// Integer division operator `/`
    Slash,

    /// Less-than operator `<`
    Lt,

    /// Greater-than operator `>`
    Gt,

    /// Equality operator `==`
    Eq,

    /// Inequality operator `!=`
    NotEq,

    // === Punctuation ===

    /// Comma separator `,`
    Comma,

    /// Statement terminator `;`
    Semicolon,

    /// Left parenthesis `(`
    LParen,

    /// Right parenthesis `)`
    RParen,

    /// Left brace `{`
    LBrace,

    /// Right brace `}`
    RBrace,

    // === Keywords ===

    /// The `fn` keyword - introduces a function literal
    Function,

    /// The `let` keyword - introduces a binding
    Let,

    /// The `true` keyword - boolean literal
    True,

    /// The `false` keyword - boolean literal
    False,

    /// The `if` keyword - conditional expression
    If,

    /// The `else` keyword - alternative branch
    Else,

    /// The `return` keyword - early exit from a function body
    Return,

    /// End-of-file marker - indicates no more tokens
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "{}", name),
            TokenKind::Int(n) => write!(f, "{}", n),
            TokenKind::String(s) => write!(f, "{}", s),
            TokenKind::Assign => write!(f, "="),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::Asterisk => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Eq => write!(f, "=="),
            TokenKind::NotEq => write!(f, "!="),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::Function => write!(f, "fn"),
            TokenKind::Let => write!(f, "let"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::If => write!(f, "if"),
            TokenKind::Else => write!(f, "else"),
            TokenKind::Return => write!(f, "return"),
            TokenKind::Eof => write!(f, "EOF"),
        }
    }
}

/// Maps an identifier-shaped word to its keyword token, or to
/// [`TokenKind::Ident`] when it is not reserved.
///
/// ```rust
/// use monkey_syntax::{lookup_ident, TokenKind};
///
/// assert_eq!(lookup_ident("fn"), TokenKind::Function);
/// assert_eq!(lookup_ident("fnord"), TokenKind::Ident("fnord".to_string()));
/// ```
pub fn lookup_ident(word: &str) -> TokenKind {
    match word {
        "fn" => TokenKind::Function,
        "let" => TokenKind::Let,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "return" => TokenKind::Return,
        _ => TokenKind::Ident(word.to_string()),
    }
}

/// A token with its source location.
///
/// Position information lets the parser report errors such as:
///
/// ```text
/// Parse error: expected next token to be ), got { at 1:9
///   if (x { 1 }
///         ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The type and semantic content of this token
    pub kind: TokenKind,

    /// Line number in the source file (1-based)
    pub line: usize,

    /// Column number in the source file (1-based)
    pub col: usize,
}
