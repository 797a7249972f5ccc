use crate::{error::FilterError, params::SqlParams};
use model::value::SqlValue;

/// Upper bound on the raw query string, in characters; anything longer is
/// rejected.
pub const MAX_QUERY_LENGTH: usize = 200;

/// The columns a free-text term is matched against. Arrays and nested JSON
/// are flattened to text so one ILIKE per field suffices.
const SEARCH_FIELDS: [&str; 5] = [
    "title",
    "description",
    "license",
    "array_to_string(keywords, ' ')",
    "providers::text",
];

/// Builds the free-text clause: terms are split on whitespace, each term
/// binds one `%term%` parameter referenced once per searched field, and
/// everything is OR-joined.
pub fn free_text_filter(
    query: Option<&str>,
    params: &mut SqlParams,
) -> Result<Option<String>, FilterError> {
    let Some(query) = query else {
        return Ok(None);
    };
    let query = query.trim();
    if query.is_empty() {
        return Ok(None);
    }
    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(FilterError::QueryTooLong {
            limit: MAX_QUERY_LENGTH,
        });
    }

    let mut term_clauses = Vec::new();
    for term in query.split_whitespace() {
        let placeholder = params.push(SqlValue::Text(format!("%{}%", term)));
        let fields = SEARCH_FIELDS
            .iter()
            .map(|field| format!("{} ILIKE {}", field, placeholder))
            .collect::<Vec<_>>();
        term_clauses.push(format!("({})", fields.join(" OR ")));
    }

    if term_clauses.len() == 1 {
        Ok(Some(term_clauses.remove(0)))
    } else {
        Ok(Some(format!("({})", term_clauses.join(" OR "))))
    }
}
