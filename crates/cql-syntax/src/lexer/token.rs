use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset into the filter string, for error reporting.
    pub pos: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords (matched case-insensitively)
    And,
    Or,
    Not,
    Like,
    In,
    Between,

    // Literals
    String(String),
    Number(f64),

    // Identifiers
    Ident(String),

    // Operators
    Eq,    // =
    NotEq, // !=
    Gt,    // >
    Lt,    // <

    // Punctuation
    LeftParen,
    RightParen,
    Comma,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::And => write!(f, "AND"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::Like => write!(f, "LIKE"),
            TokenKind::In => write!(f, "IN"),
            TokenKind::Between => write!(f, "BETWEEN"),
            TokenKind::String(s) => write!(f, "'{}'", s),
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Ident(s) => write!(f, "{}", s),
            TokenKind::Eq => write!(f, "="),
            TokenKind::NotEq => write!(f, "!="),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Eof => write!(f, "end of filter"),
        }
    }
}
