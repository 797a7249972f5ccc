use crate::lexer::error::LexError;
use thiserror::Error;

/// Syntax errors from the recursive-descent text parser.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Filter expression is empty")]
    EmptyFilter,

    #[error("Unexpected {found} at position {pos}, expected {expected}")]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: usize,
    },

    #[error("Unexpected trailing {found} at position {pos} after a complete filter")]
    TrailingToken { found: String, pos: usize },
}

/// Errors from the JSON filter translator.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Filter is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown operator '{0}'")]
    UnknownOp(String),

    #[error("Operator '{op}' expects {expected} arguments, got {got}")]
    WrongArity {
        op: String,
        expected: &'static str,
        got: usize,
    },

    #[error("Expected a {{\"property\": ...}} reference, got {0}")]
    ExpectedProperty(String),

    #[error("Expected a literal value, got {0}")]
    ExpectedLiteral(String),

    #[error("Invalid BBox literal: {0}")]
    InvalidBBox(String),
}

/// Umbrella error for both filter front ends.
#[derive(Error, Debug)]
pub enum CqlError {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("Syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("Filter translation error: {0}")]
    Translate(#[from] TranslateError),
}
