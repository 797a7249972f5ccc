//! Recursive-descent parser for the CQL2 text syntax, one token of
//! lookahead.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr      := and ('OR' and)*
//! and       := not_expr ('AND' not_expr)*
//! not_expr  := 'NOT' not_expr | primary
//! primary   := '(' expr ')' | predicate
//! predicate := spatial_call
//!            | ident ( cmp literal
//!                    | 'LIKE' literal
//!                    | 'IN' '(' literal (',' literal)* ')'
//!                    | 'BETWEEN' literal 'AND' literal )
//! ```
//!
//! Repeated `AND`/`OR` fold left-associatively into nested binary nodes.
//! `TIMESTAMP('...')` and `DATE('...')` desugar to plain string literals.

use crate::{
    ast::{BBox, CompareOp, Expr, Identifier, Literal, LogicalOp, SpatialOp},
    error::{CqlError, ParseError},
    lexer::{
        Lexer,
        token::{Token, TokenKind},
    },
};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Tokenizes and parses a complete filter string. Empty input is
    /// rejected before tokenizing; trailing tokens are a syntax error.
    pub fn parse_str(input: &str) -> Result<Expr, CqlError> {
        if input.trim().is_empty() {
            return Err(ParseError::EmptyFilter.into());
        }

        let tokens = Lexer::tokenize(input)?;
        let mut parser = Parser { tokens, pos: 0 };
        let expr = parser.expr()?;

        let trailing = parser.peek();
        if trailing.kind != TokenKind::Eof {
            return Err(ParseError::TrailingToken {
                found: trailing.kind.to_string(),
                pos: trailing.pos,
            }
            .into());
        }
        Ok(expr)
    }

    fn peek(&self) -> &Token {
        // The token stream always ends with Eof, which is never consumed.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: token.kind.to_string(),
            pos: token.pos,
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.and_expr()?;
        while self.peek().kind == TokenKind::Or {
            self.advance();
            let right = self.and_expr()?;
            left = Expr::Logical {
                op: LogicalOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.not_expr()?;
        while self.peek().kind == TokenKind::And {
            self.advance();
            let right = self.not_expr()?;
            left = Expr::Logical {
                op: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn not_expr(&mut self) -> Result<Expr, ParseError> {
        if self.peek().kind == TokenKind::Not {
            self.advance();
            let inner = self.not_expr()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.peek().kind == TokenKind::LeftParen {
            self.advance();
            let expr = self.expr()?;
            self.expect(TokenKind::RightParen, "')'")?;
            return Ok(expr);
        }
        self.predicate()
    }

    fn predicate(&mut self) -> Result<Expr, ParseError> {
        let name = match &self.peek().kind {
            TokenKind::Ident(name) => name.clone(),
            _ => return Err(self.unexpected("a property name or spatial function")),
        };
        self.advance();

        if let Some(op) = SpatialOp::from_name(&name) {
            if self.peek().kind == TokenKind::LeftParen {
                return self.spatial_call(op);
            }
        }

        let left = Identifier::new(name);
        match self.peek().kind {
            TokenKind::Eq | TokenKind::NotEq | TokenKind::Lt | TokenKind::Gt => {
                let op = match self.advance().kind {
                    TokenKind::Eq => CompareOp::Eq,
                    TokenKind::NotEq => CompareOp::NotEq,
                    TokenKind::Lt => CompareOp::Lt,
                    TokenKind::Gt => CompareOp::Gt,
                    _ => unreachable!(),
                };
                let right = self.literal()?;
                Ok(Expr::Compare { op, left, right })
            }
            TokenKind::Like => {
                self.advance();
                let right = self.literal()?;
                Ok(Expr::Compare {
                    op: CompareOp::Like,
                    left,
                    right,
                })
            }
            TokenKind::In => {
                self.advance();
                self.expect(TokenKind::LeftParen, "'(' after IN")?;
                let mut values = vec![self.literal()?];
                while self.peek().kind == TokenKind::Comma {
                    self.advance();
                    values.push(self.literal()?);
                }
                self.expect(TokenKind::RightParen, "')' after IN value list")?;
                Ok(Expr::In { left, values })
            }
            TokenKind::Between => {
                self.advance();
                let low = self.literal()?;
                self.expect(TokenKind::And, "AND between bounds")?;
                let high = self.literal()?;
                Ok(Expr::Between { left, low, high })
            }
            _ => Err(self.unexpected("a comparison operator, LIKE, IN or BETWEEN")),
        }
    }

    /// `S_INTERSECTS(spatial_extent, BBOX(minx, miny, maxx, maxy))` and the
    /// three other spatial operators, names matched case-insensitively.
    fn spatial_call(&mut self, op: SpatialOp) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LeftParen, "'('")?;
        let left = match &self.peek().kind {
            TokenKind::Ident(name) => Identifier::new(name.clone()),
            _ => return Err(self.unexpected("a property name")),
        };
        self.advance();
        self.expect(TokenKind::Comma, "','")?;

        match &self.peek().kind {
            TokenKind::Ident(name) if name.eq_ignore_ascii_case("BBOX") => {
                self.advance();
            }
            _ => return Err(self.unexpected("BBOX(...)")),
        }
        self.expect(TokenKind::LeftParen, "'(' after BBOX")?;
        let minx = self.number()?;
        self.expect(TokenKind::Comma, "','")?;
        let miny = self.number()?;
        self.expect(TokenKind::Comma, "','")?;
        let maxx = self.number()?;
        self.expect(TokenKind::Comma, "','")?;
        let maxy = self.number()?;
        self.expect(TokenKind::RightParen, "')' after BBOX coordinates")?;
        self.expect(TokenKind::RightParen, "')'")?;

        Ok(Expr::Spatial {
            op,
            left,
            right: BBox::new(minx, miny, maxx, maxy),
        })
    }

    fn number(&mut self) -> Result<f64, ParseError> {
        match self.peek().kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(n)
            }
            _ => Err(self.unexpected("a number")),
        }
    }

    fn literal(&mut self) -> Result<Literal, ParseError> {
        match &self.peek().kind {
            TokenKind::String(s) => {
                let value = s.clone();
                self.advance();
                Ok(Literal::text(value))
            }
            TokenKind::Number(n) => {
                let value = *n;
                self.advance();
                Ok(Literal::number(value))
            }
            // TIMESTAMP('...') / DATE('...') desugar to their string value.
            TokenKind::Ident(name)
                if name.eq_ignore_ascii_case("TIMESTAMP") || name.eq_ignore_ascii_case("DATE") =>
            {
                self.advance();
                self.expect(TokenKind::LeftParen, "'('")?;
                let value = match &self.peek().kind {
                    TokenKind::String(s) => s.clone(),
                    _ => return Err(self.unexpected("a quoted timestamp")),
                };
                self.advance();
                self.expect(TokenKind::RightParen, "')'")?;
                Ok(Literal::text(value))
            }
            _ => Err(self.unexpected("a literal value")),
        }
    }
}
