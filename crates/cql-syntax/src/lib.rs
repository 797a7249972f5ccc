//! CQL2 filter front ends for the collection catalog.
//!
//! Two surface syntaxes are supported and both terminate in the same AST:
//! the SQL-like text form (`license = 'CC-BY-4.0' AND title LIKE '%x%'`) is
//! handled by [`lexer`] + [`parser`], the nested-object JSON form
//! (`{"op":"=","args":[{"property":"license"},"CC-BY-4.0"]}`) by [`json`].
//! The compiler downstream never sees which syntax a filter arrived in.

pub mod ast;
pub mod error;
pub mod json;
pub mod lang;
pub mod lexer;
pub mod parser;

pub use ast::Expr;
pub use error::CqlError;
pub use lang::FilterLang;

/// Parse a text-syntax filter into an AST.
pub fn parse_text(input: &str) -> Result<Expr, CqlError> {
    let expr = parser::Parser::parse_str(input)?;
    Ok(expr)
}

/// Translate a JSON-encoded filter string into an AST.
pub fn parse_json_str(input: &str) -> Result<Expr, CqlError> {
    let expr = json::translate_str(input)?;
    Ok(expr)
}

/// Translate an already-decoded JSON filter into an AST.
pub fn parse_json_value(value: &serde_json::Value) -> Result<Expr, CqlError> {
    let expr = json::translate(value)?;
    Ok(expr)
}

/// Parse a filter in the given surface syntax.
pub fn parse(input: &str, lang: FilterLang) -> Result<Expr, CqlError> {
    match lang {
        FilterLang::Cql2Text => parse_text(input),
        FilterLang::Cql2Json => parse_json_str(input),
    }
}
