//! Type-directed AST -> SQL compiler.
//!
//! Every property reference is resolved against the queryable schema and
//! checked against the operator/type compatibility matrix; literals are
//! appended to the shared parameter list in traversal order. Each predicate
//! emission is parenthesized, so composition never changes meaning.

use crate::{error::CompileError, params::SqlParams};
use cql_syntax::ast::{BBox, CompareOp, Expr, Identifier, Literal, Scalar, SpatialOp};
use model::{
    queryable::{Queryable, QueryableSchema, QueryableType},
    value::SqlValue,
};

/// Compiles a filter AST into a SQL fragment, appending its literal values
/// to `params`.
pub fn compile(
    expr: &Expr,
    schema: &QueryableSchema,
    params: &mut SqlParams,
) -> Result<String, CompileError> {
    match expr {
        Expr::Logical { op, left, right } => {
            let left_sql = compile(left, schema, params)?;
            let right_sql = compile(right, schema, params)?;
            Ok(format!("({} {} {})", left_sql, op, right_sql))
        }
        Expr::Not(inner) => {
            let inner_sql = compile(inner, schema, params)?;
            Ok(format!("(NOT {})", inner_sql))
        }
        Expr::Compare { op, left, right } => compile_compare(*op, left, right, schema, params),
        Expr::In { left, values } => compile_in(left, values, schema, params),
        Expr::Between { left, low, high } => compile_between(left, low, high, schema, params),
        Expr::Spatial { op, left, right } => compile_spatial(*op, left, right, schema, params),
    }
}

fn resolve<'a>(
    schema: &'a QueryableSchema,
    ident: &Identifier,
) -> Result<&'a Queryable, CompileError> {
    schema
        .resolve(&ident.name)
        .ok_or_else(|| CompileError::UnknownQueryable(ident.name.clone()))
}

fn unsupported(op: impl ToString, queryable: &Queryable) -> CompileError {
    CompileError::UnsupportedOperation {
        op: op.to_string(),
        name: queryable.name.clone(),
        data_type: queryable.data_type,
    }
}

/// Unwraps a scalar literal into a bindable value; geometry literals are
/// only legal as the right-hand side of a spatial predicate.
fn scalar_value(
    literal: &Literal,
    op: impl ToString,
    queryable: &Queryable,
) -> Result<SqlValue, CompileError> {
    match literal {
        Literal::Scalar(Scalar::Text(s)) => Ok(SqlValue::Text(s.clone())),
        Literal::Scalar(Scalar::Number(n)) => Ok(SqlValue::Number(*n)),
        Literal::BBox(_) => Err(CompileError::GeometryLiteral {
            op: op.to_string(),
            name: queryable.name.clone(),
        }),
    }
}

fn compile_compare(
    op: CompareOp,
    left: &Identifier,
    right: &Literal,
    schema: &QueryableSchema,
    params: &mut SqlParams,
) -> Result<String, CompileError> {
    let queryable = resolve(schema, left)?;
    let column = &queryable.column;

    match (op, queryable.data_type) {
        (CompareOp::Like, QueryableType::Text) => {
            let placeholder = params.push(scalar_value(right, op, queryable)?);
            Ok(format!("({} ILIKE {})", column, placeholder))
        }
        // Array columns match when any element matches.
        (CompareOp::Like, QueryableType::TextArray) => {
            let placeholder = params.push(scalar_value(right, op, queryable)?);
            Ok(format!(
                "(EXISTS (SELECT 1 FROM unnest({}) v WHERE v ILIKE {}))",
                column, placeholder
            ))
        }
        (CompareOp::Eq | CompareOp::NotEq | CompareOp::Lt | CompareOp::Gt, QueryableType::Text) => {
            let placeholder = params.push(scalar_value(right, op, queryable)?);
            Ok(format!("({} {} {})", column, sql_cmp(op), placeholder))
        }
        (
            CompareOp::Eq | CompareOp::NotEq | CompareOp::Lt | CompareOp::Gt,
            QueryableType::Timestamptz,
        ) => {
            let placeholder = params.push(scalar_value(right, op, queryable)?);
            Ok(format!(
                "({} {} {}::timestamptz)",
                column,
                sql_cmp(op),
                placeholder
            ))
        }
        _ => Err(unsupported(op, queryable)),
    }
}

fn sql_cmp(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "=",
        CompareOp::NotEq => "<>",
        CompareOp::Lt => "<",
        CompareOp::Gt => ">",
        // LIKE never reaches here; it has dedicated emissions.
        CompareOp::Like => "ILIKE",
    }
}

fn compile_in(
    left: &Identifier,
    values: &[Literal],
    schema: &QueryableSchema,
    params: &mut SqlParams,
) -> Result<String, CompileError> {
    let queryable = resolve(schema, left)?;
    let column = &queryable.column;

    // The whole value list binds as one text[] parameter.
    let mut list = Vec::with_capacity(values.len());
    for value in values {
        match scalar_value(value, "IN", queryable)? {
            SqlValue::Text(s) => list.push(s),
            SqlValue::Number(n) => list.push(n.to_string()),
            SqlValue::TextArray(_) => unreachable!("scalar_value never returns an array"),
        }
    }

    match queryable.data_type {
        QueryableType::Text => {
            let placeholder = params.push(SqlValue::TextArray(list));
            Ok(format!("({} = ANY({}::text[]))", column, placeholder))
        }
        // Array overlap: any shared element is a match.
        QueryableType::TextArray => {
            let placeholder = params.push(SqlValue::TextArray(list));
            Ok(format!("({} && {}::text[])", column, placeholder))
        }
        _ => Err(unsupported("IN", queryable)),
    }
}

fn compile_between(
    left: &Identifier,
    low: &Literal,
    high: &Literal,
    schema: &QueryableSchema,
    params: &mut SqlParams,
) -> Result<String, CompileError> {
    let queryable = resolve(schema, left)?;

    match queryable.data_type {
        QueryableType::Timestamptz => {
            let low_placeholder = params.push(scalar_value(low, "BETWEEN", queryable)?);
            let high_placeholder = params.push(scalar_value(high, "BETWEEN", queryable)?);
            Ok(format!(
                "({} BETWEEN {}::timestamptz AND {}::timestamptz)",
                queryable.column, low_placeholder, high_placeholder
            ))
        }
        _ => Err(unsupported("BETWEEN", queryable)),
    }
}

fn compile_spatial(
    op: SpatialOp,
    left: &Identifier,
    bbox: &BBox,
    schema: &QueryableSchema,
    params: &mut SqlParams,
) -> Result<String, CompileError> {
    let queryable = resolve(schema, left)?;
    if queryable.data_type != QueryableType::Geometry {
        return Err(unsupported(op, queryable));
    }

    let [minx, miny, maxx, maxy] = bbox.coords;
    let p1 = params.push(SqlValue::Number(minx));
    let p2 = params.push(SqlValue::Number(miny));
    let p3 = params.push(SqlValue::Number(maxx));
    let p4 = params.push(SqlValue::Number(maxy));
    Ok(format!(
        "({}({}, ST_MakeEnvelope({}, {}, {}, {}, 4326)))",
        op.sql_function(),
        queryable.column,
        p1,
        p2,
        p3,
        p4
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cql_syntax::parse_text;
    use model::queryable::QueryableSchema;

    fn compile_filter(filter: &str) -> (String, Vec<SqlValue>) {
        let expr = parse_text(filter).unwrap();
        let mut params = SqlParams::new();
        let sql = compile(&expr, QueryableSchema::catalog(), &mut params).unwrap();
        (sql, params.into_values())
    }

    fn compile_err(filter: &str) -> CompileError {
        let expr = parse_text(filter).unwrap();
        let mut params = SqlParams::new();
        compile(&expr, QueryableSchema::catalog(), &mut params).unwrap_err()
    }

    #[test]
    fn test_text_comparison() {
        let (sql, params) = compile_filter("license = 'CC-BY-4.0'");
        assert_eq!(sql, "(license = $1)");
        assert_eq!(params, vec![SqlValue::from("CC-BY-4.0")]);
    }

    #[test]
    fn test_not_equal_becomes_angle_brackets() {
        let (sql, _) = compile_filter("license != 'proprietary'");
        assert_eq!(sql, "(license <> $1)");
    }

    #[test]
    fn test_timestamptz_comparison_casts() {
        let (sql, params) = compile_filter("created > TIMESTAMP('2023-06-01T00:00:00Z')");
        assert_eq!(sql, "(created > $1::timestamptz)");
        assert_eq!(params, vec![SqlValue::from("2023-06-01T00:00:00Z")]);
    }

    #[test]
    fn test_like_on_text_uses_ilike() {
        let (sql, _) = compile_filter("title LIKE '%Sentinel%'");
        assert_eq!(sql, "(title ILIKE $1)");
        assert!(!sql.contains("EXISTS"));
    }

    #[test]
    fn test_like_on_text_array_uses_unnest() {
        let (sql, params) = compile_filter("keywords LIKE '%eo%'");
        assert_eq!(
            sql,
            "(EXISTS (SELECT 1 FROM unnest(keywords) v WHERE v ILIKE $1))"
        );
        assert_eq!(params, vec![SqlValue::from("%eo%")]);
    }

    #[test]
    fn test_in_on_text_uses_any() {
        let (sql, params) = compile_filter("license IN ('CC-BY-4.0', 'CC0-1.0')");
        assert_eq!(sql, "(license = ANY($1::text[]))");
        assert_eq!(
            params,
            vec![SqlValue::TextArray(vec![
                "CC-BY-4.0".to_string(),
                "CC0-1.0".to_string()
            ])]
        );
    }

    #[test]
    fn test_in_on_text_array_uses_overlap() {
        let (sql, params) = compile_filter("keywords IN ('eo', 'sar')");
        assert_eq!(sql, "(keywords && $1::text[])");
        // One array parameter, not one parameter per element.
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_between_on_timestamptz() {
        let (sql, params) = compile_filter("created BETWEEN '2020-01-01' AND '2021-01-01'");
        assert_eq!(
            sql,
            "(created BETWEEN $1::timestamptz AND $2::timestamptz)"
        );
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_between_rejected_on_text() {
        let err = compile_err("license BETWEEN 'a' AND 'b'");
        assert_eq!(
            err.to_string(),
            "BETWEEN not supported for license (type text)"
        );
    }

    #[test]
    fn test_spatial_predicate() {
        let (sql, params) = compile_filter("S_WITHIN(spatial_extent, BBOX(5.8, 47.2, 15.0, 55.1))");
        assert_eq!(
            sql,
            "(ST_Within(spatial_extent, ST_MakeEnvelope($1, $2, $3, $4, 4326)))"
        );
        assert_eq!(
            params,
            vec![
                SqlValue::Number(5.8),
                SqlValue::Number(47.2),
                SqlValue::Number(15.0),
                SqlValue::Number(55.1)
            ]
        );
    }

    #[test]
    fn test_spatial_rejected_on_non_geometry() {
        let err = compile_err("S_INTERSECTS(title, BBOX(0, 0, 1, 1))");
        assert_eq!(
            err.to_string(),
            "S_INTERSECTS not supported for title (type text)"
        );
    }

    #[test]
    fn test_unknown_queryable() {
        let err = compile_err("platform = 'sentinel-2'");
        assert_eq!(err.to_string(), "Unknown queryable: platform");
    }

    #[test]
    fn test_ops_rejected_on_jsonb_and_virtual_queryables() {
        let err = compile_err("providers = 'ESA'");
        assert_eq!(err.to_string(), "= not supported for providers (type jsonb_array)");

        let err = compile_err("gsd < 10");
        assert_eq!(err.to_string(), "< not supported for gsd (type number_jsonb_array)");

        let err = compile_err("q = 'sentinel'");
        assert_eq!(err.to_string(), "= not supported for q (type virtual)");
    }

    #[test]
    fn test_logical_and_not_composition() {
        let (sql, params) =
            compile_filter("license = 'CC-BY-4.0' AND (title LIKE '%Sentinel%' OR keywords IN ('eo'))");
        assert_eq!(
            sql,
            "((license = $1) AND ((title ILIKE $2) OR (keywords && $3::text[])))"
        );
        assert_eq!(
            params,
            vec![
                SqlValue::from("CC-BY-4.0"),
                SqlValue::from("%Sentinel%"),
                SqlValue::TextArray(vec!["eo".to_string()]),
            ]
        );

        let (sql, _) = compile_filter("NOT license = 'x'");
        assert_eq!(sql, "(NOT (license = $1))");
    }

    #[test]
    fn test_params_append_in_traversal_order() {
        let (sql, params) = compile_filter(
            "created > '2020-01-01' AND S_INTERSECTS(spatial_extent, BBOX(1, 2, 3, 4)) AND license = 'x'",
        );
        assert_eq!(params.len(), 6);
        assert_eq!(params[0], SqlValue::from("2020-01-01"));
        assert_eq!(params[5], SqlValue::from("x"));
        assert!(sql.contains("$6"));
    }
}
