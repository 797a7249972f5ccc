//! Tokenizer for the CQL2 text syntax.
//!
//! Single-quoted strings use `''` as an escaped quote. Keywords are matched
//! case-insensitively; spatial function names and `TIMESTAMP`/`DATE` stay
//! plain identifiers and are recognized by the parser.

use crate::lexer::{
    error::LexError,
    token::{Token, TokenKind},
};

pub mod error;
pub mod token;

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
        Lexer::new(input).run()
    }

    fn run(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.pos += 1;
                continue;
            }

            let start = self.pos;
            let kind = match ch {
                '(' => {
                    self.pos += 1;
                    TokenKind::LeftParen
                }
                ')' => {
                    self.pos += 1;
                    TokenKind::RightParen
                }
                ',' => {
                    self.pos += 1;
                    TokenKind::Comma
                }
                '=' => {
                    self.pos += 1;
                    TokenKind::Eq
                }
                '>' => {
                    self.pos += 1;
                    TokenKind::Gt
                }
                '<' => {
                    self.pos += 1;
                    TokenKind::Lt
                }
                '!' => {
                    self.pos += 1;
                    match self.peek() {
                        Some('=') => {
                            self.pos += 1;
                            TokenKind::NotEq
                        }
                        _ => return Err(LexError::UnexpectedChar { ch: '!', pos: start }),
                    }
                }
                '\'' => self.string(start)?,
                '-' => {
                    if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
                        self.number(start)?
                    } else {
                        return Err(LexError::UnexpectedChar { ch: '-', pos: start });
                    }
                }
                c if c.is_ascii_digit() => self.number(start)?,
                c if c.is_alphabetic() || c == '_' => self.ident(),
                c => return Err(LexError::UnexpectedChar { ch: c, pos: start }),
            };

            tokens.push(Token { kind, pos: start });
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            pos: self.pos,
        });
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Consumes a single-quoted string; `''` inside is one literal quote.
    fn string(&mut self, start: usize) -> Result<TokenKind, LexError> {
        self.pos += 1; // opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                None => return Err(LexError::UnterminatedString { pos: start }),
                Some('\'') => {
                    if self.peek_at(1) == Some('\'') {
                        value.push('\'');
                        self.pos += 2;
                    } else {
                        self.pos += 1;
                        return Ok(TokenKind::String(value));
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn number(&mut self, start: usize) -> Result<TokenKind, LexError> {
        let mut lexeme = String::new();
        if self.peek() == Some('-') {
            lexeme.push('-');
            self.pos += 1;
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                lexeme.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            lexeme.push('.');
            self.pos += 1;
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    lexeme.push(c);
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }

        let value = lexeme.parse::<f64>().map_err(|_| LexError::InvalidNumber {
            lexeme: lexeme.clone(),
            pos: start,
        })?;
        Ok(TokenKind::Number(value))
    }

    fn ident(&mut self) -> TokenKind {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }

        match word.to_ascii_uppercase().as_str() {
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "NOT" => TokenKind::Not,
            "LIKE" => TokenKind::Like,
            "IN" => TokenKind::In,
            "BETWEEN" => TokenKind::Between,
            _ => TokenKind::Ident(word),
        }
    }
}
