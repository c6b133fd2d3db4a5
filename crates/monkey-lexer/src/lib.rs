//! Monkey lexer: converts source text into tokens.
use monkey_syntax::error::{error_at, Error, Result};
use monkey_syntax::token::{lookup_ident, Token, TokenKind};

/// Streaming character scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else if c == '/' && self.peek_next() == Some('/') {
                while let Some(c2) = self.advance() {
                    if c2 == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self, line: usize, col: usize) -> Result<TokenKind> {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let val: i64 = s
            .parse()
            .map_err(|_| Error::with_span(format!("Invalid number '{}'", s), line, col))?;
        Ok(TokenKind::Int(val))
    }

    fn read_ident_or_keyword(&mut self) -> TokenKind {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        lookup_ident(&s)
    }

    // Called with the opening quote already consumed.
    fn read_string(&mut self, line: usize, col: usize) -> Result<TokenKind> {
        let mut s = String::new();
        while let Some(c) = self.advance() {
            match c {
                '"' => return Ok(TokenKind::String(s)),
                '\\' => match self.advance() {
                    Some(n) => s.push(match n {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    }),
                    None => break,
                },
                other => s.push(other),
            }
        }
        error_at(line, col, "Unterminated string")
    }

    /// Consumes `second` if it is the next character, choosing between a
    /// two-character and a one-character token.
    fn either(&mut self, second: char, two: TokenKind, one: TokenKind) -> TokenKind {
        if self.peek() == Some(second) {
            self.advance();
            two
        } else {
            one
        }
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let line = self.line;
            let col = self.col;
            let Some(c) = self.advance() else {
                tokens.push(Token { kind: TokenKind::Eof, line, col });
                break;
            };
            let kind = match c {
                '=' => self.either('=', TokenKind::Eq, TokenKind::Assign),
                '!' => self.either('=', TokenKind::NotEq, TokenKind::Bang),
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Asterisk,
                '/' => TokenKind::Slash,
                '<' => TokenKind::Lt,
                '>' => TokenKind::Gt,
                ',' => TokenKind::Comma,
                ';' => TokenKind::Semicolon,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                '"' => self.read_string(line, col)?,
                c if c.is_ascii_digit() => {
                    // step back so the number scanner sees the first digit
                    self.pos -= 1;
                    self.col -= 1;
                    self.read_number(line, col)?
                }
                c if c.is_ascii_alphabetic() || c == '_' => {
                    self.pos -= 1;
                    self.col -= 1;
                    self.read_ident_or_keyword()
                }
                other => {
                    return error_at(line, col, format!("Unexpected character '{}'", other));
                }
            };
            tokens.push(Token { kind, line, col });
        }
        Ok(tokens)
    }
}
